//! bean 类型目录
//!
//! `#[component]` 宏在程序启动时把 bean 类型登记到全局目录，
//! 容器加载定义时按 `type` 键在目录中查找工厂。

use crate::factory::BeanTypeDescriptor;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};

static GLOBAL_BEAN_TYPE_CATALOG: Lazy<BeanTypeCatalog> = Lazy::new(BeanTypeCatalog::new);

/// bean 类型目录
#[derive(Debug, Default)]
pub struct BeanTypeCatalog {
    types: RwLock<HashMap<&'static str, BeanTypeDescriptor>>,
}

impl BeanTypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取全局目录
    pub fn global() -> &'static Self {
        &GLOBAL_BEAN_TYPE_CATALOG
    }

    /// 登记 bean 类型，同一键重复登记时保留第一次的描述符
    pub fn submit(&self, descriptor: BeanTypeDescriptor) -> bool {
        let mut types = self.types.write();
        if types.contains_key(descriptor.type_key) {
            warn!("bean 类型重复登记，已忽略: {}", descriptor.type_key);
            return false;
        }

        debug!("登记 bean 类型: {}", descriptor.type_key);
        types.insert(descriptor.type_key, descriptor);
        true
    }

    /// 按键查找 bean 类型
    pub fn get(&self, type_key: &str) -> Option<BeanTypeDescriptor> {
        self.types.read().get(type_key).copied()
    }

    /// 需要自动创建的服务类型，优先级高的在前，同优先级按键排序
    pub fn services(&self) -> Vec<BeanTypeDescriptor> {
        let mut services: Vec<_> = self
            .types
            .read()
            .values()
            .filter(|descriptor| descriptor.is_auto_service())
            .copied()
            .collect();
        sort_by_priority(&mut services);
        services
    }

    /// 已登记的类型数量
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

/// 按优先级降序、键升序排列
pub fn sort_by_priority(descriptors: &mut [BeanTypeDescriptor]) {
    descriptors.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.type_key.cmp(b.type_key))
    });
}

/// 向全局目录登记 bean 类型，供 `#[component]` 生成的代码调用
pub fn submit_bean_type(descriptor: BeanTypeDescriptor) {
    BeanTypeCatalog::global().submit(descriptor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Plain {}

    #[derive(Debug, Deserialize)]
    struct Service {}

    #[test]
    fn test_submit_and_get() {
        let catalog = BeanTypeCatalog::new();
        assert!(catalog.submit(BeanTypeDescriptor::of::<Plain>("app::Plain")));
        assert!(!catalog.submit(BeanTypeDescriptor::of::<Service>("app::Plain")));

        let found = catalog.get("app::Plain").unwrap();
        assert_eq!(found.type_info.short_name(), "Plain");
        assert!(catalog.get("app::Missing").is_none());
    }

    #[test]
    fn test_services_require_name() {
        let catalog = BeanTypeCatalog::new();
        catalog.submit(BeanTypeDescriptor::of::<Plain>("app::Plain").as_service());
        catalog.submit(
            BeanTypeDescriptor::of::<Service>("app::Service")
                .named("service")
                .as_service(),
        );

        let services = catalog.services();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].bean_name, Some("service"));
    }

    #[test]
    fn test_services_skip_disabled_and_follow_priority() {
        let catalog = BeanTypeCatalog::new();
        catalog.submit(BeanTypeDescriptor::of::<Plain>("app::A").named("a").as_service());
        catalog.submit(
            BeanTypeDescriptor::of::<Plain>("app::B")
                .named("b")
                .as_service()
                .with_priority(10),
        );
        catalog.submit(
            BeanTypeDescriptor::of::<Plain>("app::C")
                .named("c")
                .as_service()
                .with_priority(-1),
        );
        catalog.submit(
            BeanTypeDescriptor::of::<Service>("app::Off")
                .named("off")
                .as_service()
                .with_priority(100)
                .disabled(),
        );

        let keys: Vec<_> = catalog.services().iter().map(|d| d.type_key).collect();
        assert_eq!(keys, vec!["app::B", "app::A", "app::C"]);
        assert!(!catalog.get("app::Off").unwrap().enabled);
    }
}
