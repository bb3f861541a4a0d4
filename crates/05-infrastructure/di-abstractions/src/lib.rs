//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 bean 查找、bean 定义和数据对象注册的核心接口。
//!
//! ## 核心接口
//!
//! - [`BeanFactory`] - 按名称查找 bean
//! - [`ContainerBuilder`] - 从定义位置构建容器
//! - [`BeanTypeCatalog`] - bean 类型目录
//! - [`DataObjectRegistry`] - 数据对象注册表
//! - [`ComponentScanner`] - 数据对象扫描器

pub mod catalog;
pub mod container;
pub mod definition;
pub mod factory;
pub mod registry;
pub mod scanner;

pub use catalog::*;
pub use container::*;
pub use definition::*;
pub use factory::*;
pub use registry::*;
pub use scanner::*;
