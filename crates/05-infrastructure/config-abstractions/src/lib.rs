//! # Configuration Abstractions
//!
//! 属性管理抽象层，定义属性来源和占位符解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`PropertySource`] - 按命名空间和键查找属性值
//! - [`PlaceholderResolver`] - 容器加载配置时解析占位符

pub mod provider;
pub mod resolver;

pub use provider::*;
pub use resolver::*;
