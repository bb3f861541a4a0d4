//! 属性来源抽象接口

use async_trait::async_trait;
use std::sync::Arc;

/// 属性来源 trait
///
/// 定义从不同数据源按 `(namespace, key)` 获取属性的统一接口。
/// 未配置的键返回 `None`。
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// 获取属性值
    async fn get_property(&self, namespace: &str, key: &str) -> Option<String>;

    /// 获取来源名称
    fn name(&self) -> &str;

    /// 获取来源优先级，数值越高越先被查询
    fn priority(&self) -> i32 {
        0
    }
}

#[async_trait]
impl<S> PropertySource for Arc<S>
where
    S: PropertySource + ?Sized,
{
    async fn get_property(&self, namespace: &str, key: &str) -> Option<String> {
        (**self).get_property(namespace, key).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn priority(&self) -> i32 {
        (**self).priority()
    }
}

/// 按命名空间收集以 `prefix.0`、`prefix.1` ... 连续编号的属性
///
/// 遇到第一个缺失的编号即停止，`prefix.0` 缺失时返回空列表。
pub async fn get_indexed_properties(
    source: &dyn PropertySource,
    namespace: &str,
    prefix: &str,
) -> Vec<String> {
    let mut values = Vec::new();
    loop {
        let key = format!("{}.{}", prefix, values.len());
        match source.get_property(namespace, &key).await {
            Some(value) => values.push(value),
            None => break,
        }
    }
    values
}
