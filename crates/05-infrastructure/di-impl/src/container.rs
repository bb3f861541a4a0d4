//! bean 容器实现
//!
//! 从定义文件构建容器：先加载全部定义并合并同名定义，再展开占位符，
//! 最后按定义顺序创建单例，随后补齐未定义的服务 bean。

use crate::loader::DefinitionLoader;
use async_trait::async_trait;
use config_abstractions::{NoopPlaceholderResolver, PlaceholderResolver};
use config_impl::PlaceholderExpander;
use di_abstractions::{
    sort_by_priority, BeanContext, BeanDefinition, BeanFactory, BeanInstance, BeanTypeCatalog,
    BeanTypeDescriptor, ContainerBuilder,
};
use infrastructure_common::{DependencyError, InfrastructureError};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// bean 容器
///
/// 所有 bean 都是在构建时创建的单例。
pub struct BeanContainer {
    beans: RwLock<HashMap<String, BeanInstance>>,
    /// bean 名称，按创建顺序
    names: RwLock<Vec<String>>,
    locations: Vec<String>,
    resources: RwLock<Vec<PathBuf>>,
}

impl fmt::Debug for BeanContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanContainer")
            .field("beans", &*self.names.read())
            .field("locations", &self.locations)
            .field("resources", &*self.resources.read())
            .finish()
    }
}

impl BeanContainer {
    fn empty(locations: Vec<String>) -> Self {
        Self {
            beans: RwLock::new(HashMap::new()),
            names: RwLock::new(Vec::new()),
            locations,
            resources: RwLock::new(Vec::new()),
        }
    }

    /// 创建容器构建器
    pub fn builder() -> BeanContainerBuilder {
        BeanContainerBuilder::new()
    }

    /// 手动注册单例，同名时替换
    pub fn register_singleton(&self, name: impl Into<String>, instance: BeanInstance) {
        let name = name.into();
        let replaced = self.beans.write().insert(name.clone(), instance);
        if replaced.is_some() {
            warn!("覆盖已存在的 bean: {}", name);
        } else {
            self.names.write().push(name);
        }
    }

    /// 构建时使用的定义位置
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// 实际加载的定义文件
    pub fn resources(&self) -> Vec<PathBuf> {
        self.resources.read().clone()
    }

    /// bean 数量
    pub fn len(&self) -> usize {
        self.beans.read().len()
    }

    /// 容器是否为空
    pub fn is_empty(&self) -> bool {
        self.beans.read().is_empty()
    }
}

impl BeanFactory for BeanContainer {
    fn get_bean_by_name(&self, name: &str) -> Result<BeanInstance, DependencyError> {
        self.beans
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| DependencyError::BeanNotFound {
                name: name.to_string(),
            })
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.beans.read().contains_key(name)
    }

    fn bean_names(&self) -> Vec<String> {
        self.names.read().clone()
    }
}

/// 容器构建器
pub struct BeanContainerBuilder {
    locations: Vec<String>,
    loader: DefinitionLoader,
    resolver: Arc<dyn PlaceholderResolver>,
    expander: PlaceholderExpander,
    bean_types: Vec<BeanTypeDescriptor>,
    definitions: Vec<BeanDefinition>,
    use_global_catalog: bool,
}

impl fmt::Debug for BeanContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanContainerBuilder")
            .field("locations", &self.locations)
            .field("loader", &self.loader)
            .field("bean_types", &self.bean_types)
            .field("definitions", &self.definitions)
            .field("use_global_catalog", &self.use_global_catalog)
            .finish_non_exhaustive()
    }
}

impl Default for BeanContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            locations: Vec::new(),
            loader: DefinitionLoader::new(),
            resolver: Arc::new(NoopPlaceholderResolver),
            expander: PlaceholderExpander::new(),
            bean_types: Vec::new(),
            definitions: Vec::new(),
            use_global_catalog: true,
        }
    }

    /// 替换定义加载器
    pub fn with_loader(mut self, loader: DefinitionLoader) -> Self {
        self.loader = loader;
        self
    }

    /// 追加 `classpath*:` 搜索根目录
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.loader.add_search_root(root);
        self
    }

    /// 设置占位符展开器
    pub fn with_expander(mut self, expander: PlaceholderExpander) -> Self {
        self.expander = expander;
        self
    }

    /// 直接添加 bean 定义，排在文件定义之后
    pub fn with_definition(mut self, definition: BeanDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// 是否查询全局 bean 类型目录
    pub fn with_global_catalog(mut self, enabled: bool) -> Self {
        self.use_global_catalog = enabled;
        self
    }

    fn find_bean_type(&self, type_key: &str) -> Option<BeanTypeDescriptor> {
        self.bean_types
            .iter()
            .find(|descriptor| descriptor.type_key == type_key)
            .copied()
            .or_else(|| {
                self.use_global_catalog
                    .then(|| BeanTypeCatalog::global().get(type_key))
                    .flatten()
            })
            .filter(|descriptor| descriptor.enabled)
    }

    fn services(&self) -> Vec<BeanTypeDescriptor> {
        let mut services: Vec<_> = self
            .bean_types
            .iter()
            .filter(|descriptor| descriptor.is_auto_service())
            .copied()
            .collect();

        // 本地登记的类型覆盖全局目录中的同键类型
        if self.use_global_catalog {
            for descriptor in BeanTypeCatalog::global().services() {
                if !self.bean_types.iter().any(|s| s.type_key == descriptor.type_key) {
                    services.push(descriptor);
                }
            }
        }
        sort_by_priority(&mut services);
        services
    }

    /// 加载所有位置的定义，同名定义由后者替换前者并保留原位置
    async fn collect_definitions(
        &self,
        container: &BeanContainer,
    ) -> Result<Vec<BeanDefinition>, InfrastructureError> {
        let mut merged: Vec<BeanDefinition> = Vec::new();
        let mut merge = |definition: BeanDefinition| {
            if let Some(existing) = merged.iter_mut().find(|d| d.name == definition.name) {
                warn!(
                    "bean 定义 {} 被覆盖: {} -> {}",
                    definition.name, existing.type_key, definition.type_key
                );
                *existing = definition;
            } else {
                merged.push(definition);
            }
        };

        for location in &self.locations {
            let loaded = self.loader.load_location(location).await?;
            if loaded.is_empty() {
                debug!("位置 {} 没有匹配的定义文件", location);
            }
            for (path, context_definition) in loaded {
                container.resources.write().push(path);
                context_definition.beans.into_iter().for_each(&mut merge);
            }
        }
        self.definitions.iter().cloned().for_each(&mut merge);

        Ok(merged)
    }

    fn instantiate(
        container: &Arc<BeanContainer>,
        name: &str,
        descriptor: &BeanTypeDescriptor,
        properties: &Map<String, Value>,
    ) -> Result<(), DependencyError> {
        let context = BeanContext {
            name,
            properties,
            factory: container.clone(),
        };

        let instance = descriptor.create(&context)?;
        container.register_singleton(name, instance);
        debug!("创建 bean: {} ({})", name, descriptor.type_info);
        Ok(())
    }
}

#[async_trait]
impl ContainerBuilder for BeanContainerBuilder {
    type Container = BeanContainer;

    fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations.extend(locations.into_iter().map(Into::into));
        self
    }

    fn with_placeholder_resolver(mut self, resolver: Arc<dyn PlaceholderResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    fn with_bean_type(mut self, descriptor: BeanTypeDescriptor) -> Self {
        self.bean_types.push(descriptor);
        self
    }

    async fn build(self) -> Result<Arc<BeanContainer>, InfrastructureError> {
        info!("开始构建容器，定义位置: {:?}", self.locations);
        let container = Arc::new(BeanContainer::empty(self.locations.clone()));

        let definitions = self.collect_definitions(&container).await?;

        // 先展开全部占位符，再创建任何 bean
        let mut resolved = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let descriptor = self.find_bean_type(&definition.type_key).ok_or_else(|| {
                DependencyError::BeanTypeNotRegistered {
                    type_key: definition.type_key.clone(),
                }
            })?;

            let properties = Value::Object(definition.properties);
            let properties = match self
                .expander
                .expand_value(&properties, self.resolver.as_ref())
                .await?
            {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            resolved.push((definition.name, descriptor, properties));
        }

        for (name, descriptor, properties) in &resolved {
            Self::instantiate(&container, name, descriptor, properties)?;
        }

        let empty = Map::new();
        for descriptor in self.services() {
            if let Some(name) = descriptor.bean_name {
                if !container.contains_bean(name) {
                    Self::instantiate(&container, name, &descriptor, &empty)?;
                }
            }
        }

        info!("容器构建完成，共 {} 个 bean", container.len());
        Ok(container)
    }
}
