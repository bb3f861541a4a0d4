//! # Infrastructure Common
//!
//! 这个 crate 提供了容器桥接层的公共 traits、错误类型和全局目录。
//!
//! ## 核心组件
//!
//! - [`Component`] - 组件基础 trait
//! - [`NamedBean`] - 按约定名称查找 bean 的能力
//! - [`DataObject`] - 数据对象标记 trait
//! - [`DataObjectCatalog`] - 程序启动时登记的数据对象目录
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时约定，取代运行时反射
//! - 约定优于配置

pub mod catalog;
pub mod component;
pub mod errors;
pub mod metadata;

pub use catalog::*;
pub use component::*;
pub use errors::*;
pub use metadata::*;
