//! 数据对象注册表抽象接口

use infrastructure_common::{ComponentError, DataObject};
use std::any::TypeId;

/// 数据对象注册表 trait
///
/// 序列化层使用的外部注册表。重复注册必须被容忍：
/// 以具体类型（`TypeId`）为键去重，已存在时保留原有实例。
pub trait DataObjectRegistry: Send + Sync {
    /// 注册数据对象实例
    ///
    /// 新注册返回 `true`，该类型已注册时返回 `false`。
    fn register(&self, instance: Box<dyn DataObject>) -> Result<bool, ComponentError>;

    /// 检查类型是否已注册
    fn is_registered(&self, type_id: TypeId) -> bool;

    /// 已注册的类型数量
    fn registered_count(&self) -> usize;
}
