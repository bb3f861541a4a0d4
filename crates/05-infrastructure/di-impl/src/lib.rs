//! # 依赖注入具体实现
//!
//! 提供 bean 容器、定义文件加载器、数据对象注册表和基于目录的组件扫描器。
//!
//! ## 核心类型
//!
//! - [`BeanContainer`] / [`BeanContainerBuilder`] - 从定义文件构建的单例容器
//! - [`DefinitionLoader`] - 解析 `classpath*:` 和 `file:` 位置
//! - [`JsonObjectRegistry`] - 以类型去重的数据对象注册表
//! - [`CatalogComponentScanner`] - 按模块路径筛选数据对象

pub mod container;
pub mod loader;
pub mod registry;
pub mod scanner;

pub use container::*;
pub use loader::*;
pub use registry::*;
pub use scanner::*;
