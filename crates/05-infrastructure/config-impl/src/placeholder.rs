//! 占位符展开
//!
//! 容器加载 bean 定义时使用，把 `${name}` 和 `${name:default}` 替换为
//! [`PlaceholderResolver`] 返回的值。只有解析出的值本身会继续展开，
//! 与其相邻的字面文本不会参与新的占位符匹配。

use config_abstractions::PlaceholderResolver;
use infrastructure_common::ConfigError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tracing::trace;

const PLACEHOLDER_PREFIX: &str = "${";
const PLACEHOLDER_SUFFIX: u8 = b'}';
const VALUE_SEPARATOR: u8 = b':';

/// 默认最大展开深度
pub const DEFAULT_MAX_DEPTH: usize = 8;

type ExpandFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ConfigError>> + Send + 'a>>;
type ParseFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ConfigError>> + Send + 'a>>;

/// 占位符展开器
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderExpander {
    max_depth: usize,
}

impl Default for PlaceholderExpander {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PlaceholderExpander {
    /// 创建新的展开器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置最大展开深度
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 检查字符串中是否包含完整的占位符
    pub fn contains_placeholder(value: &str) -> bool {
        value.find(PLACEHOLDER_PREFIX).is_some_and(|start| {
            find_placeholder_end(&value[start + PLACEHOLDER_PREFIX.len()..]).is_some()
        })
    }

    /// 展开字符串中的全部占位符
    pub async fn expand(
        &self,
        value: &str,
        resolver: &dyn PlaceholderResolver,
    ) -> Result<String, ConfigError> {
        let mut visiting = Vec::new();
        self.parse(value, resolver, &mut visiting).await
    }

    /// 递归展开 JSON 值中的所有字符串
    pub fn expand_value<'a>(
        &'a self,
        value: &'a Value,
        resolver: &'a dyn PlaceholderResolver,
    ) -> ExpandFuture<'a> {
        Box::pin(async move {
            match value {
                Value::String(s) => Ok(Value::String(self.expand(s, resolver).await?)),
                Value::Array(items) => {
                    let mut expanded = Vec::with_capacity(items.len());
                    for item in items {
                        expanded.push(self.expand_value(item, resolver).await?);
                    }
                    Ok(Value::Array(expanded))
                }
                Value::Object(map) => {
                    let mut expanded = serde_json::Map::with_capacity(map.len());
                    for (key, item) in map {
                        expanded.insert(key.clone(), self.expand_value(item, resolver).await?);
                    }
                    Ok(Value::Object(expanded))
                }
                other => Ok(other.clone()),
            }
        })
    }

    /// `visiting` 记录当前展开链上的占位符名称，用于检测循环引用
    fn parse<'a>(
        &'a self,
        value: &'a str,
        resolver: &'a dyn PlaceholderResolver,
        visiting: &'a mut Vec<String>,
    ) -> ParseFuture<'a> {
        Box::pin(async move {
            let mut result = String::with_capacity(value.len());
            let mut rest = value;

            while let Some(start) = rest.find(PLACEHOLDER_PREFIX) {
                result.push_str(&rest[..start]);
                let body = &rest[start + PLACEHOLDER_PREFIX.len()..];

                // 没有配对的 '}' 时原样保留
                let Some(end) = find_placeholder_end(body) else {
                    result.push_str(&rest[start..]);
                    rest = "";
                    break;
                };
                let (raw_name, default) = split_default(&body[..end]);
                rest = &body[end + 1..];

                let name = self.parse(raw_name, resolver, visiting).await?;
                let name = name.trim().to_string();
                if visiting.contains(&name) || visiting.len() >= self.max_depth {
                    return Err(ConfigError::PlaceholderRecursion {
                        value: format!("${{{}}}", name),
                    });
                }

                visiting.push(name.clone());
                let expanded = match resolver.resolve_placeholder(&name).await {
                    Some(resolved) => self.parse(&resolved, resolver, visiting).await?,
                    None => match default {
                        Some(default) => self.parse(default, resolver, visiting).await?,
                        None => {
                            return Err(ConfigError::PlaceholderUnresolved { placeholder: name })
                        }
                    },
                };
                visiting.pop();

                trace!("占位符 ${{{}}} 展开为 '{}'", name, expanded);
                result.push_str(&expanded);
            }
            result.push_str(rest);

            Ok(result)
        })
    }
}

/// 返回与开头 `${` 配对的 `}` 在 `body` 中的位置
fn find_placeholder_end(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, byte) in body.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            PLACEHOLDER_SUFFIX if depth == 0 => return Some(index),
            PLACEHOLDER_SUFFIX => depth -= 1,
            _ => {}
        }
    }
    None
}

/// 在最外层的第一个 `:` 处拆分名称和默认值
fn split_default(inner: &str) -> (&str, Option<&str>) {
    let mut depth = 0usize;
    for (index, byte) in inner.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            VALUE_SEPARATOR if depth == 0 => return (&inner[..index], Some(&inner[index + 1..])),
            _ => {}
        }
    }
    (inner, None)
}
