//! 组件宏与注册器、容器的集成测试

use component_macros::{component, data_object};
use di_abstractions::{BeanDefinition, BeanFactory, BeanFactoryExt, ContainerBuilder};
use di_impl::{BeanContainer, JsonObjectRegistry};
use infrastructure_common::NamedBean;
use infrastructure_composition::{scan_path, DataObjectRegistrar};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod events {
    use super::*;

    #[data_object(serialize)]
    #[derive(Debug, Default, Serialize)]
    pub struct Opened {
        pub id: u64,
    }

    #[data_object]
    #[derive(Debug, Default)]
    pub struct Closed;

    pub mod audit {
        use super::*;

        #[data_object(serialize)]
        #[derive(Debug, Default, Serialize)]
        pub struct Audited {
            pub actor: String,
        }
    }
}

mod unrelated {
    use super::*;

    #[data_object]
    #[derive(Debug, Default)]
    pub struct Elsewhere;
}

#[component(name = "counter")]
#[derive(Debug, Deserialize)]
pub struct Counter {
    start: u64,
}

#[component(service)]
#[derive(Debug, Default, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    entries: Vec<String>,
}

#[component(name = "journal", service, priority = 5)]
#[derive(Debug, Default, Deserialize)]
pub struct Journal {}

#[component(name = "mirror", service, disabled)]
#[derive(Debug, Default, Deserialize)]
pub struct Mirror {}

#[test]
fn test_scan_registers_every_type_under_path() {
    let registry = Arc::new(JsonObjectRegistry::new());
    let registrar = DataObjectRegistrar::with_registry(registry.clone());

    let report = registrar.scan_path("integration_tests.events");
    assert_eq!(report.discovered, 3);
    assert_eq!(report.registered, 3);
    assert_eq!(report.failed, 0);

    assert!(registry.contains::<events::Opened>());
    assert!(registry.contains::<events::Closed>());
    assert!(registry.contains::<events::audit::Audited>());
    assert!(!registry.contains::<unrelated::Elsewhere>());

    let opened = registry
        .to_json(std::any::type_name::<events::Opened>())
        .unwrap();
    assert_eq!(opened, serde_json::json!({ "id": 0 }));

    // 重复扫描不再注册
    let again = registrar.scan_path("integration_tests::events");
    assert_eq!(again.registered, 0);
    assert_eq!(again.already_registered, 3);
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_scan_nested_path_and_global_registry() {
    let report = scan_path("integration_tests::events::audit");
    assert_eq!(report.discovered, 1);
    assert!(JsonObjectRegistry::global().contains::<events::audit::Audited>());

    assert_eq!(scan_path("integration_tests::nothing_here").discovered, 0);
}

#[tokio::test]
async fn test_container_uses_macro_registered_types() {
    let container = BeanContainer::builder()
        .with_definition(
            BeanDefinition::new("counter", "integration_tests::Counter").with_property("start", 5),
        )
        .build()
        .await
        .unwrap();

    let counter = container.get_named_bean::<Counter>().unwrap();
    assert_eq!(counter.start, 5);

    // 服务 bean 在没有定义时自动创建
    assert_eq!(Ledger::BEAN_NAME, "integration_tests::Ledger");
    assert!(container.contains_bean(Ledger::BEAN_NAME));
    assert!(container
        .get_named_bean::<Ledger>()
        .unwrap()
        .entries
        .is_empty());
}

#[tokio::test]
async fn test_container_orders_and_skips_macro_services() {
    let container = BeanContainer::builder().build().await.unwrap();

    let names = container.bean_names();
    let journal = names.iter().position(|n| n == Journal::BEAN_NAME).unwrap();
    let ledger = names.iter().position(|n| n == Ledger::BEAN_NAME).unwrap();
    assert!(journal < ledger);

    assert!(!container.contains_bean(Mirror::BEAN_NAME));
    assert!(container.get_named_bean::<Mirror>().is_err());
}

#[tokio::test]
async fn test_disabled_component_cannot_be_defined() {
    let result = BeanContainer::builder()
        .with_definition(BeanDefinition::new("mirror", "integration_tests::Mirror"))
        .build()
        .await;
    assert!(result.is_err());
}
