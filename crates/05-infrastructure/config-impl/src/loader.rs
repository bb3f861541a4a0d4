//! 容器属性加载器
//!
//! 让容器从属性管理器初始化，而不是在每个环境维护单独的属性文件。
//! 按约定，这些值都放在 `container` 命名空间下。

use async_trait::async_trait;
use config_abstractions::{PlaceholderResolver, PropertySource};
use std::sync::Arc;
use tracing::debug;

use crate::manager::PropertyManager;

/// 占位符查询使用的固定命名空间
pub const PLACEHOLDER_NAMESPACE: &str = "container";

/// 容器属性加载器
///
/// 拦截容器的占位符解析，原样返回属性来源在 [`PLACEHOLDER_NAMESPACE`]
/// 下给出的值（包括 `None`）。不缓存、不校验、不转换。
#[derive(Clone)]
pub struct ContainerPropertyLoader {
    source: Arc<dyn PropertySource>,
}

impl std::fmt::Debug for ContainerPropertyLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerPropertyLoader")
            .field("source", &self.source.name())
            .finish()
    }
}

impl ContainerPropertyLoader {
    /// 使用指定属性来源创建加载器
    pub fn new(source: Arc<dyn PropertySource>) -> Self {
        Self { source }
    }

    /// 使用全局属性管理器创建加载器
    pub fn from_global() -> Self {
        Self::new(PropertyManager::global())
    }
}

#[async_trait]
impl PlaceholderResolver for ContainerPropertyLoader {
    async fn resolve_placeholder(&self, placeholder: &str) -> Option<String> {
        let value = self
            .source
            .get_property(PLACEHOLDER_NAMESPACE, placeholder)
            .await;
        debug!("resolved '{}' to '{:?}'", placeholder, value);
        value
    }
}
