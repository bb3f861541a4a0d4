//! # Component Macros
//!
//! 这个 crate 提供了在程序启动时自动登记数据对象和 bean 类型的过程宏。
//!
//! ## 核心宏
//!
//! - [`data_object`] - 登记数据对象，供按模块路径扫描
//! - [`component`] - 登记 bean 类型，供定义文件通过 `type` 引用
//!
//! 使用这两个宏的 crate 需要依赖 `ctor`、`infrastructure-common`，
//! `#[component]` 还需要 `di-abstractions`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{component, data_object};
//! use serde::Deserialize;
//!
//! #[data_object]
//! #[derive(Debug, Default)]
//! pub struct Heartbeat {
//!     pub sequence: u64,
//! }
//!
//! #[component(name = "messageService")]
//! #[derive(Debug, Deserialize)]
//! pub struct MessageService {
//!     message: String,
//! }
//! ```

use proc_macro::TokenStream;

mod component;
mod data_object;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 数据对象登记宏
///
/// 为结构体实现 `DataObject`，并在程序启动时把它登记到全局数据对象目录，
/// 模块路径取自 `module_path!()`。结构体必须实现 `Default`。
///
/// # 参数
///
/// - `serialize` - 通过 serde 实现 `to_json`，序列化失败时记录警告并返回 `null`（需要 `Serialize`）
///
/// # 示例
///
/// ```rust,ignore
/// #[data_object(serialize)]
/// #[derive(Debug, Default, Serialize)]
/// pub struct Heartbeat {
///     pub sequence: u64,
/// }
/// ```
#[proc_macro_attribute]
pub fn data_object(args: TokenStream, input: TokenStream) -> TokenStream {
    data_object::data_object_impl(args, input)
}

/// bean 类型登记宏
///
/// 为结构体实现 `NamedBean` 和 `Component`，并在程序启动时把 bean 类型
/// 登记到全局 bean 类型目录。类型键为 `模块路径::类型名`。
///
/// # 参数
///
/// - `name = "bean_name"` - bean 名称（默认与类型键相同）
/// - `service` - 容器中没有同名定义时自动创建
/// - `factory = path::to::fn` - 自定义工厂（默认从属性反序列化，需要 `Deserialize`）
/// - `priority = N` - 组件优先级（默认为 0）
/// - `disabled` - 标记组件未启用
///
/// # 示例
///
/// ```rust,ignore
/// #[component(name = "messageService", priority = 10)]
/// #[derive(Debug, Deserialize)]
/// pub struct MessageService {
///     message: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(args, input)
}
