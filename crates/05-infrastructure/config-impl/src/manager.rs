//! 属性管理器实现

use async_trait::async_trait;
use config_abstractions::PropertySource;
use infrastructure_common::ConfigError;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::providers::EnvironmentPropertySource;

/// 全局属性管理器使用的环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "APP";

static GLOBAL_PROPERTY_MANAGER: Lazy<Arc<PropertyManager>> = Lazy::new(|| {
    let manager = PropertyManager::new();
    manager.add_source(Arc::new(EnvironmentPropertySource::new(DEFAULT_ENV_PREFIX)));
    Arc::new(manager)
});

/// 分层属性管理器
///
/// 按优先级从高到低依次查询各属性来源，返回第一个命中的值。
/// 优先级相同时先添加的来源先被查询。
#[derive(Default)]
pub struct PropertyManager {
    sources: RwLock<Vec<Arc<dyn PropertySource>>>,
}

impl fmt::Debug for PropertyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyManager")
            .field("sources", &self.source_names())
            .finish()
    }
}

impl PropertyManager {
    /// 创建空的属性管理器
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取进程级属性管理器
    ///
    /// 第一次调用时创建，默认包含前缀为 `APP` 的环境变量来源。
    pub fn global() -> Arc<Self> {
        GLOBAL_PROPERTY_MANAGER.clone()
    }

    /// 添加属性来源
    pub fn add_source(&self, source: Arc<dyn PropertySource>) {
        info!("注册属性来源: {} (优先级 {})", source.name(), source.priority());

        let mut sources = self.sources.write();
        let position = sources
            .iter()
            .position(|existing| existing.priority() < source.priority())
            .unwrap_or(sources.len());
        sources.insert(position, source);
    }

    /// 以构建者方式添加属性来源
    pub fn with_source(self, source: Arc<dyn PropertySource>) -> Self {
        self.add_source(source);
        self
    }

    /// 按名称移除属性来源，返回移除的数量
    pub fn remove_source(&self, name: &str) -> usize {
        let mut sources = self.sources.write();
        let before = sources.len();
        sources.retain(|source| source.name() != name);
        before - sources.len()
    }

    /// 按查询顺序列出来源名称
    pub fn source_names(&self) -> Vec<String> {
        self.sources
            .read()
            .iter()
            .map(|source| source.name().to_string())
            .collect()
    }

    /// 获取必需的属性
    pub async fn require_property(&self, namespace: &str, key: &str) -> Result<String, ConfigError> {
        self.get_property(namespace, key)
            .await
            .ok_or_else(|| ConfigError::KeyNotFound {
                namespace: namespace.to_string(),
                key: key.to_string(),
            })
    }

    fn snapshot(&self) -> Vec<Arc<dyn PropertySource>> {
        self.sources.read().clone()
    }
}

#[async_trait]
impl PropertySource for PropertyManager {
    async fn get_property(&self, namespace: &str, key: &str) -> Option<String> {
        for source in self.snapshot() {
            if let Some(value) = source.get_property(namespace, key).await {
                debug!("属性 {}.{} 来自 {}", namespace, key, source.name());
                return Some(value);
            }
        }
        None
    }

    fn name(&self) -> &str {
        "PropertyManager"
    }
}
