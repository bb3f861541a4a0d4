//! 组件基础接口定义
//!
//! 提供容器管理对象和数据对象必须实现的基础 trait

use crate::metadata::TypeInfo;
use serde::Serialize;
use std::fmt::Debug;
use tracing::warn;

/// 组件基础 trait
///
/// 所有由容器管理的组件都可以实现此 trait
pub trait Component: Send + Sync + Debug + 'static {
    /// 组件名称
    fn name(&self) -> &'static str;

    /// 组件优先级，作为服务自动创建时数值大的先创建
    fn priority(&self) -> i32 {
        0
    }

    /// 组件是否启用，禁用的组件类型不会被容器创建
    fn is_enabled(&self) -> bool {
        true
    }
}

/// 按约定名称查找的 bean
///
/// 每个希望通过 `ContainerAccessor::get_bean` 获取的类型都必须声明
/// `BEAN_NAME`，容器使用它作为查找键。
pub trait NamedBean: Send + Sync + 'static {
    /// 容器中的 bean 名称
    const BEAN_NAME: &'static str;
}

/// 数据对象标记 trait
///
/// 扫描器只根据此 trait 识别候选类型，本身不携带行为。
/// 实现类型需要提供无参构造（`Default`）才能被扫描注册。
pub trait DataObject: Send + Sync + Debug + 'static {
    /// 数据对象的具体类型信息
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<Self>()
    }

    /// 序列化为 JSON
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

/// 通过 serde 把数据对象序列化为 JSON
///
/// `#[data_object(serialize)]` 生成的 `to_json` 调用此函数。序列化失败时
/// 记录警告并返回 `Value::Null`。
pub fn data_object_json<T: Serialize + ?Sized>(object: &T) -> serde_json::Value {
    match serde_json::to_value(object) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "数据对象 {} 序列化失败: {}",
                std::any::type_name::<T>(),
                e
            );
            serde_json::Value::Null
        }
    }
}
