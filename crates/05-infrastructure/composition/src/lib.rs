//! # 基础设施组合层
//!
//! 把属性、容器和数据对象注册组合起来，提供应用进入容器的唯一入口。
//!
//! ## 主要功能
//!
//! - **数据对象注册**: [`DataObjectRegistrar`] 按模块路径扫描并注册数据对象
//! - **容器启动**: [`ContainerBootstrap`] 在进程中只启动一次容器
//! - **bean 查找**: [`ContainerAccessor`] 按 `BEAN_NAME` 约定查找 bean
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{instance, scan_path};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     scan_path("my_app::messages");
//!
//!     let accessor = instance().await?;
//!     println!("容器已启动: {}", accessor.is_managed());
//!     Ok(())
//! }
//! ```

pub mod accessor;
pub mod definitions;
pub mod logging;
pub mod registrar;

pub use accessor::{
    get_container_bean, get_container_bean_with, instance, ContainerAccessor, ContainerBootstrap,
};
pub use definitions::{
    ContextDefinitions, ACCESSOR_NAMESPACE, CONTEXT_DEFINITION_KEY, DEFAULT_CONTEXT_DEFINITIONS,
};
pub use logging::init_logging;
pub use registrar::{scan_path, DataObjectRegistrar, ScanReport};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
