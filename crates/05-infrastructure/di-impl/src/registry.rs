//! JSON 数据对象注册表
//!
//! 保存每个数据对象类型的原型实例，以 `TypeId` 去重。

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use di_abstractions::DataObjectRegistry;
use infrastructure_common::{ComponentError, DataObject};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::any::TypeId;
use std::sync::Arc;
use tracing::debug;

static GLOBAL_JSON_OBJECT_REGISTRY: Lazy<Arc<JsonObjectRegistry>> =
    Lazy::new(|| Arc::new(JsonObjectRegistry::new()));

/// JSON 数据对象注册表
#[derive(Debug, Default)]
pub struct JsonObjectRegistry {
    prototypes: DashMap<TypeId, Arc<dyn DataObject>>,
    names: DashMap<&'static str, TypeId>,
}

impl JsonObjectRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取进程级注册表
    pub fn global() -> Arc<Self> {
        GLOBAL_JSON_OBJECT_REGISTRY.clone()
    }

    /// 检查类型是否已注册
    pub fn contains<T: DataObject>(&self) -> bool {
        self.prototypes.contains_key(&TypeId::of::<T>())
    }

    /// 按完整类型名称获取原型
    pub fn prototype(&self, type_name: &str) -> Option<Arc<dyn DataObject>> {
        let type_id = *self.names.get(type_name)?;
        self.prototypes.get(&type_id).map(|entry| entry.value().clone())
    }

    /// 按完整类型名称把原型序列化为 JSON
    pub fn to_json(&self, type_name: &str) -> Option<Value> {
        self.prototype(type_name).map(|prototype| prototype.to_json())
    }

    /// 已注册的类型名称，按字母排序
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.names.iter().map(|entry| *entry.key()).collect();
        names.sort_unstable();
        names
    }

    /// 已注册的类型数量
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

impl DataObjectRegistry for JsonObjectRegistry {
    fn register(&self, instance: Box<dyn DataObject>) -> Result<bool, ComponentError> {
        let type_info = instance.type_info();

        match self.prototypes.entry(type_info.id) {
            Entry::Occupied(_) => {
                debug!("数据对象已注册，忽略重复注册: {}", type_info);
                Ok(false)
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::from(instance));
                self.names.insert(type_info.name, type_info.id);
                debug!("注册数据对象: {}", type_info);
                Ok(true)
            }
        }
    }

    fn is_registered(&self, type_id: TypeId) -> bool {
        self.prototypes.contains_key(&type_id)
    }

    fn registered_count(&self) -> usize {
        self.len()
    }
}
