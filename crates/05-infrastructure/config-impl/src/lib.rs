//! # Configuration Implementation
//!
//! 属性管理的具体实现，提供各种属性来源以及容器占位符桥接。
//!
//! ## 主要组件
//!
//! - [`PropertyManager`] - 分层属性管理器
//! - [`InMemoryPropertySource`] - 内存属性来源
//! - [`TomlPropertySource`] - TOML 文件属性来源
//! - [`EnvironmentPropertySource`] - 环境变量属性来源
//! - [`ContainerPropertyLoader`] - 把容器占位符解析转发到属性管理器
//! - [`PlaceholderExpander`] - 展开配置值中的 `${name}` 占位符

pub mod loader;
pub mod manager;
pub mod placeholder;
pub mod providers;

pub use loader::*;
pub use manager::*;
pub use placeholder::*;
pub use providers::*;
