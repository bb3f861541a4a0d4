//! 容器启动与 bean 查找的端到端测试

use anyhow::Result;
use component_macros::component;
use config_impl::{PropertyManager, TomlPropertySource};
use di_abstractions::{BeanContext, BeanFactoryExt, BeanInstance};
use di_impl::DefinitionLoader;
use infrastructure_common::{ConfigError, DependencyError, InfrastructureError, NamedBean};
use infrastructure_composition::{ContainerAccessor, ContainerBootstrap, ContextDefinitions};
use serde::Deserialize;
use std::sync::Arc;

#[component(name = "fooHolder")]
#[derive(Debug, Deserialize)]
pub struct FooHolder {
    message: String,
    #[serde(default)]
    nested: String,
    #[serde(default)]
    fallback: String,
}

#[component(name = "fooReporter", factory = make_reporter)]
#[derive(Debug)]
pub struct FooReporter {
    holder: Arc<FooHolder>,
}

fn make_reporter(context: &BeanContext<'_>) -> Result<BeanInstance, DependencyError> {
    let holder = context.factory.get_named_bean::<FooHolder>()?;
    Ok(Arc::new(FooReporter { holder }))
}

#[derive(Debug)]
pub struct NotInContainer;

impl NamedBean for NotInContainer {
    const BEAN_NAME: &'static str = "notInContainer";
}

fn bootstrap() -> Result<ContainerBootstrap> {
    let properties = PropertyManager::new().with_source(Arc::new(TomlPropertySource::from_file(
        "resources/properties.toml",
    )?));

    Ok(ContainerBootstrap::new(Arc::new(properties))
        .with_loader(DefinitionLoader::new().with_search_roots(["resources"])))
}

#[tokio::test]
async fn test_placeholders_resolve_through_property_bridge() -> Result<()> {
    let bootstrap = bootstrap()?;
    let holder = bootstrap
        .get_container_bean_with::<FooHolder>(&ContextDefinitions::new(["classpath*:container.toml"]))
        .await?;

    assert_eq!(holder.message, "I am the foo");
    assert_eq!(holder.nested, "I am the foo");
    assert_eq!(holder.fallback, "plain");
    Ok(())
}

#[tokio::test]
async fn test_instance_returns_same_accessor_and_singletons() -> Result<()> {
    let bootstrap = bootstrap()?;
    // 默认定义位置下没有 beans.toml，容器中只有访问器本身
    let accessor = bootstrap.instance().await?;
    assert!(Arc::ptr_eq(&accessor, &bootstrap.instance().await?));
    assert!(matches!(
        accessor.get_bean::<FooHolder>(),
        Err(DependencyError::BeanNotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_accessor_bean_lookups() -> Result<()> {
    let bootstrap = bootstrap()?;
    let accessor = bootstrap
        .get_container_bean_with::<ContainerAccessor>(&ContextDefinitions::new([
            "classpath*:container.toml",
        ]))
        .await?;

    let holder = accessor.get_bean::<FooHolder>()?;
    let reporter = accessor.get_bean::<FooReporter>()?;
    assert!(Arc::ptr_eq(&reporter.holder, &holder));
    assert!(Arc::ptr_eq(&holder, &accessor.get_bean::<FooHolder>()?));

    assert!(matches!(
        accessor.get_bean::<NotInContainer>(),
        Err(DependencyError::BeanNotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_later_location_overrides_definition() -> Result<()> {
    let bootstrap = bootstrap()?;
    let holder = bootstrap
        .get_container_bean_with::<FooHolder>(&ContextDefinitions::new([
            "classpath*:container.toml",
            "file:resources/container-override.json",
        ]))
        .await?;

    assert_eq!(holder.message, "overridden foo");
    Ok(())
}

#[tokio::test]
async fn test_missing_file_location_fails() -> Result<()> {
    let err = bootstrap()?
        .get_container_bean_with::<FooHolder>(&ContextDefinitions::new(["file:resources/missing.toml"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InfrastructureError::ConfigError {
            source: ConfigError::FileNotFound { .. }
        }
    ));
    Ok(())
}
