//! 容器访问器
//!
//! [`ContainerBootstrap`] 负责在进程中只启动一次容器；[`ContainerAccessor`]
//! 本身是容器中的一个服务 bean，按 [`NamedBean::BEAN_NAME`] 约定查找其他 bean。
//!
//! 容器只应从一个入口进入：第一次调用 `get_container_bean` 之后，
//! 其他代码应通过 [`instance`] 获取缓存的访问器。

use crate::definitions::ContextDefinitions;
use config_abstractions::PropertySource;
use config_impl::{ContainerPropertyLoader, PropertyManager};
use di_abstractions::{
    BeanContext, BeanFactory, BeanFactoryExt, BeanInstance, BeanTypeDescriptor, ContainerBuilder,
};
use di_impl::{BeanContainer, DefinitionLoader};
use infrastructure_common::{DependencyError, InfrastructureError, NamedBean};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

static GLOBAL_CONTAINER_BOOTSTRAP: Lazy<ContainerBootstrap> = Lazy::new(ContainerBootstrap::default);

/// 容器访问器
///
/// 由容器创建时持有容器句柄；通过 [`ContainerAccessor::unmanaged`] 创建的实例
/// 不能查找 bean。
pub struct ContainerAccessor {
    factory: Option<Arc<dyn BeanFactory>>,
}

impl NamedBean for ContainerAccessor {
    const BEAN_NAME: &'static str = "infrastructure_composition::ContainerAccessor";
}

impl fmt::Debug for ContainerAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerAccessor")
            .field("managed", &self.is_managed())
            .finish()
    }
}

impl ContainerAccessor {
    /// 使用容器创建访问器
    pub fn new(factory: Arc<dyn BeanFactory>) -> Self {
        Self {
            factory: Some(factory),
        }
    }

    /// 创建不受容器管理的访问器
    pub fn unmanaged() -> Self {
        Self { factory: None }
    }

    /// 是否由容器管理
    pub fn is_managed(&self) -> bool {
        self.factory.is_some()
    }

    /// 创建该访问器的容器
    pub fn bean_factory(&self) -> Option<&Arc<dyn BeanFactory>> {
        self.factory.as_ref()
    }

    /// 按 `T::BEAN_NAME` 获取 bean，可重复调用
    pub fn get_bean<T: NamedBean>(&self) -> Result<Arc<T>, DependencyError> {
        self.factory
            .as_ref()
            .ok_or(DependencyError::NotManaged)?
            .get_named_bean::<T>()
    }

    /// 访问器的 bean 类型描述符，登记为服务
    pub fn bean_type() -> BeanTypeDescriptor {
        BeanTypeDescriptor::with_factory::<Self>(Self::BEAN_NAME, create_accessor)
            .named(Self::BEAN_NAME)
            .as_service()
    }
}

fn create_accessor(context: &BeanContext<'_>) -> Result<BeanInstance, DependencyError> {
    Ok(Arc::new(ContainerAccessor::new(context.factory.clone())))
}

#[derive(Default)]
struct BootstrapState {
    attempted: bool,
    instance: Option<Arc<ContainerAccessor>>,
}

/// 容器启动器
///
/// 状态只能从未启动变为已启动。启动标志在构建容器之前设置，
/// 因此构建失败也会消耗这次启动。
pub struct ContainerBootstrap {
    state: Mutex<BootstrapState>,
    properties: Arc<dyn PropertySource>,
    loader: DefinitionLoader,
    bean_types: Vec<BeanTypeDescriptor>,
}

impl fmt::Debug for ContainerBootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBootstrap")
            .field("properties", &self.properties.name())
            .field("loader", &self.loader)
            .field("bean_types", &self.bean_types)
            .finish_non_exhaustive()
    }
}

impl Default for ContainerBootstrap {
    fn default() -> Self {
        Self::new(PropertyManager::global())
    }
}

impl ContainerBootstrap {
    /// 使用指定属性源创建启动器
    ///
    /// 属性源同时用于占位符解析和读取定义位置。
    pub fn new(properties: Arc<dyn PropertySource>) -> Self {
        Self {
            state: Mutex::new(BootstrapState::default()),
            properties,
            loader: DefinitionLoader::new(),
            bean_types: Vec::new(),
        }
    }

    /// 进程级启动器
    pub fn global() -> &'static Self {
        &GLOBAL_CONTAINER_BOOTSTRAP
    }

    /// 设置定义文件加载器
    pub fn with_loader(mut self, loader: DefinitionLoader) -> Self {
        self.loader = loader;
        self
    }

    /// 额外登记 bean 类型
    pub fn with_bean_type(mut self, descriptor: BeanTypeDescriptor) -> Self {
        self.bean_types.push(descriptor);
        self
    }

    /// 是否已尝试启动
    pub async fn is_bootstrapped(&self) -> bool {
        self.state.lock().await.attempted
    }

    /// 使用配置的定义位置启动容器并获取 bean
    ///
    /// 只能调用一次，之后请使用 [`ContainerBootstrap::instance`]。
    pub async fn get_container_bean<T: NamedBean>(&self) -> Result<Arc<T>, InfrastructureError> {
        let definitions = ContextDefinitions::from_properties(self.properties.as_ref()).await;
        self.get_container_bean_with(&definitions).await
    }

    /// 使用指定定义位置启动容器并获取 bean
    ///
    /// 只能调用一次。
    pub async fn get_container_bean_with<T: NamedBean>(
        &self,
        definitions: &ContextDefinitions,
    ) -> Result<Arc<T>, InfrastructureError> {
        let mut state = self.state.lock().await;
        let accessor = self.bootstrap(&mut state, definitions).await?;
        Ok(accessor.get_bean::<T>()?)
    }

    /// 获取缓存的访问器，第一次调用时启动容器
    pub async fn instance(&self) -> Result<Arc<ContainerAccessor>, InfrastructureError> {
        let mut state = self.state.lock().await;
        if let Some(instance) = &state.instance {
            return Ok(instance.clone());
        }

        let definitions = ContextDefinitions::from_properties(self.properties.as_ref()).await;
        let accessor = self.bootstrap(&mut state, &definitions).await?;
        state.instance = Some(accessor.clone());
        Ok(accessor)
    }

    async fn bootstrap(
        &self,
        state: &mut BootstrapState,
        definitions: &ContextDefinitions,
    ) -> Result<Arc<ContainerAccessor>, InfrastructureError> {
        if state.attempted {
            warn!("容器已经启动过，拒绝再次启动");
            return Err(DependencyError::ContainerAlreadyBootstrapped.into());
        }
        state.attempted = true;

        info!("启动容器，定义位置: {:?}", definitions.locations());
        let builder = self.bean_types.iter().fold(
            BeanContainer::builder()
                .with_loader(self.loader.clone())
                .with_locations(definitions.iter())
                .with_placeholder_resolver(Arc::new(ContainerPropertyLoader::new(
                    self.properties.clone(),
                )))
                .with_bean_type(ContainerAccessor::bean_type()),
            |builder, descriptor| builder.with_bean_type(*descriptor),
        );

        let container = builder.build().await?;
        Ok(container.get_named_bean::<ContainerAccessor>()?)
    }
}

/// 使用全局启动器和配置的定义位置获取 bean，只能调用一次
pub async fn get_container_bean<T: NamedBean>() -> Result<Arc<T>, InfrastructureError> {
    ContainerBootstrap::global().get_container_bean::<T>().await
}

/// 使用全局启动器和指定定义位置获取 bean，只能调用一次
pub async fn get_container_bean_with<T: NamedBean>(
    definitions: &ContextDefinitions,
) -> Result<Arc<T>, InfrastructureError> {
    ContainerBootstrap::global()
        .get_container_bean_with::<T>(definitions)
        .await
}

/// 获取全局缓存的访问器
pub async fn instance() -> Result<Arc<ContainerAccessor>, InfrastructureError> {
    ContainerBootstrap::global().instance().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_impl::{InMemoryPropertySource, PLACEHOLDER_NAMESPACE};
    use serde::Deserialize;
    use std::fs;

    #[derive(Debug, Deserialize)]
    struct Greeter {
        greeting: String,
    }

    impl NamedBean for Greeter {
        const BEAN_NAME: &'static str = "greeter";
    }

    #[derive(Debug)]
    struct Unregistered;

    impl NamedBean for Unregistered {
        const BEAN_NAME: &'static str = "unregistered";
    }

    fn bootstrap(dir: &tempfile::TempDir) -> ContainerBootstrap {
        fs::write(
            dir.path().join("beans.toml"),
            "[[bean]]\nname = \"greeter\"\ntype = \"test::Greeter\"\n\n[bean.properties]\ngreeting = \"I am the ${foo}\"\n",
        )
        .unwrap();

        let properties = InMemoryPropertySource::new("test")
            .with_property(PLACEHOLDER_NAMESPACE, "foo", "foo");

        ContainerBootstrap::new(Arc::new(properties))
            .with_loader(DefinitionLoader::new().with_search_roots([dir.path()]))
            .with_bean_type(BeanTypeDescriptor::of::<Greeter>("test::Greeter"))
    }

    #[tokio::test]
    async fn test_bootstrap_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let bootstrap = bootstrap(&dir);
        assert!(!bootstrap.is_bootstrapped().await);

        let greeter = bootstrap.get_container_bean::<Greeter>().await.unwrap();
        assert_eq!(greeter.greeting, "I am the foo");
        assert!(bootstrap.is_bootstrapped().await);

        let err = bootstrap.get_container_bean::<Greeter>().await.unwrap_err();
        assert!(matches!(
            err,
            InfrastructureError::DependencyError {
                source: DependencyError::ContainerAlreadyBootstrapped
            }
        ));

        // 直接启动之后 instance() 同样失败
        assert!(bootstrap.instance().await.is_err());
    }

    #[tokio::test]
    async fn test_instance_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let bootstrap = bootstrap(&dir);

        let first = bootstrap.instance().await.unwrap();
        let second = bootstrap.instance().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let greeter = first.get_bean::<Greeter>().unwrap();
        assert!(Arc::ptr_eq(&greeter, &second.get_bean::<Greeter>().unwrap()));

        // 访问器本身也是容器中的 bean
        let accessor = first.get_bean::<ContainerAccessor>().unwrap();
        assert!(accessor.is_managed());
    }

    #[tokio::test]
    async fn test_failed_bootstrap_consumes_flag() {
        let bootstrap = ContainerBootstrap::new(Arc::new(InMemoryPropertySource::new("empty")));
        let definitions = ContextDefinitions::new(["file:/no/such/beans.toml"]);

        assert!(bootstrap
            .get_container_bean_with::<ContainerAccessor>(&definitions)
            .await
            .is_err());
        assert!(bootstrap.is_bootstrapped().await);
        assert!(matches!(
            bootstrap.instance().await.unwrap_err(),
            InfrastructureError::DependencyError {
                source: DependencyError::ContainerAlreadyBootstrapped
            }
        ));
    }

    #[tokio::test]
    async fn test_lookup_failures() {
        let dir = tempfile::tempdir().unwrap();
        let accessor = bootstrap(&dir).instance().await.unwrap();

        assert!(matches!(
            accessor.get_bean::<Unregistered>(),
            Err(DependencyError::BeanNotFound { .. })
        ));
        assert!(matches!(
            ContainerAccessor::unmanaged().get_bean::<Greeter>(),
            Err(DependencyError::NotManaged)
        ));
    }
}
