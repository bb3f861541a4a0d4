//! 上下文定义位置列表

use config_abstractions::{get_indexed_properties, PropertySource};
use tracing::debug;

/// 覆盖定义位置时使用的属性命名空间
pub const ACCESSOR_NAMESPACE: &str = "container.accessor";

/// 定义位置的属性键前缀，实际键为 `CONTEXT_DEFINITION.0`、`CONTEXT_DEFINITION.1` ...
pub const CONTEXT_DEFINITION_KEY: &str = "CONTEXT_DEFINITION";

/// 默认的定义位置
pub const DEFAULT_CONTEXT_DEFINITIONS: [&str; 2] = [
    "classpath*:beans.toml",
    "classpath*:application-context.toml",
];

/// 有序的上下文定义位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDefinitions(Vec<String>);

impl Default for ContextDefinitions {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_DEFINITIONS)
    }
}

impl ContextDefinitions {
    /// 使用指定位置创建
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(locations.into_iter().map(Into::into).collect())
    }

    /// 从属性源读取
    ///
    /// 只要 `CONTEXT_DEFINITION.0` 存在，整个默认列表都会被替换。
    pub async fn from_properties(source: &dyn PropertySource) -> Self {
        let overrides =
            get_indexed_properties(source, ACCESSOR_NAMESPACE, CONTEXT_DEFINITION_KEY).await;

        if overrides.is_empty() {
            Self::default()
        } else {
            debug!("使用配置的定义位置: {:?}", overrides);
            Self(overrides)
        }
    }

    /// 定义位置
    pub fn locations(&self) -> &[String] {
        &self.0
    }

    /// 遍历定义位置
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// 位置数量
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_impl::InMemoryPropertySource;

    #[tokio::test]
    async fn test_defaults_without_overrides() {
        let source = InMemoryPropertySource::new("empty");
        let definitions = ContextDefinitions::from_properties(&source).await;
        assert_eq!(definitions, ContextDefinitions::default());
        assert_eq!(
            definitions.locations(),
            ["classpath*:beans.toml", "classpath*:application-context.toml"]
        );
    }

    #[tokio::test]
    async fn test_indexed_overrides_replace_defaults() {
        let source = InMemoryPropertySource::new("overrides")
            .with_property(ACCESSOR_NAMESPACE, "CONTEXT_DEFINITION.0", "classpath*:a.toml")
            .with_property(ACCESSOR_NAMESPACE, "CONTEXT_DEFINITION.1", "file:b.json")
            .with_property(ACCESSOR_NAMESPACE, "CONTEXT_DEFINITION.3", "ignored.yaml");

        let definitions = ContextDefinitions::from_properties(&source).await;
        assert_eq!(definitions.iter().collect::<Vec<_>>(), vec!["classpath*:a.toml", "file:b.json"]);
    }
}
