//! 占位符解析抽象接口

use async_trait::async_trait;

/// 占位符解析器 trait
///
/// 容器在加载 bean 定义时，为每个 `${name}` 调用一次解析器。
/// 返回 `None` 表示该占位符没有配置值，由容器决定如何处理。
#[async_trait]
pub trait PlaceholderResolver: Send + Sync {
    /// 解析占位符
    async fn resolve_placeholder(&self, placeholder: &str) -> Option<String>;
}

/// 不解析任何占位符的解析器
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlaceholderResolver;

#[async_trait]
impl PlaceholderResolver for NoopPlaceholderResolver {
    async fn resolve_placeholder(&self, _placeholder: &str) -> Option<String> {
        None
    }
}
