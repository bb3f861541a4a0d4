//! 属性来源实现

use async_trait::async_trait;
use config_abstractions::PropertySource;
use infrastructure_common::ConfigError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

type NamespaceMap = HashMap<String, HashMap<String, String>>;

/// 内存属性来源
#[derive(Debug, Default)]
pub struct InMemoryPropertySource {
    name: String,
    priority: i32,
    properties: RwLock<NamespaceMap>,
}

impl InMemoryPropertySource {
    /// 创建新的内存属性来源
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: 0,
            properties: RwLock::new(HashMap::new()),
        }
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 以构建者方式添加属性
    pub fn with_property(
        self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_property(namespace, key, value);
        self
    }

    /// 设置属性
    pub fn set_property(
        &self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.properties
            .write()
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// 移除属性
    pub fn remove_property(&self, namespace: &str, key: &str) -> Option<String> {
        self.properties
            .write()
            .get_mut(namespace)
            .and_then(|entries| entries.remove(key))
    }
}

#[async_trait]
impl PropertySource for InMemoryPropertySource {
    async fn get_property(&self, namespace: &str, key: &str) -> Option<String> {
        self.properties
            .read()
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// TOML 属性来源
///
/// 顶层表的键是命名空间，表内的嵌套表和数组被展开为以 `.` 连接的键，
/// 数组元素使用下标：
///
/// ```toml
/// [container]
/// foo = "I am the foo"
///
/// ["container.accessor"]
/// CONTEXT_DEFINITION = ["file:beans.toml"]   # => CONTEXT_DEFINITION.0
/// ```
#[derive(Debug)]
pub struct TomlPropertySource {
    file_path: Option<PathBuf>,
    priority: i32,
    properties: NamespaceMap,
}

impl TomlPropertySource {
    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_path = path.as_ref().to_path_buf();
        debug!("加载 TOML 属性文件: {}", file_path.display());

        if !file_path.exists() {
            return Err(ConfigError::FileNotFound {
                path: file_path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&file_path)?;
        let mut source = Self::parse(&content, &file_path.display().to_string())?;
        source.file_path = Some(file_path);
        Ok(source)
    }

    /// 从字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn parse(content: &str, location: &str) -> Result<Self, ConfigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::parse_error(location, e))?;

        let mut properties = NamespaceMap::new();
        for (namespace, value) in &table {
            match value {
                toml::Value::Table(entries) => {
                    let flattened = properties.entry(namespace.clone()).or_default();
                    for (key, value) in entries {
                        flatten_toml(key, value, flattened);
                    }
                }
                _ => warn!("忽略不在命名空间表中的属性: {} ({})", namespace, location),
            }
        }

        debug!("TOML 属性加载完成: {} 个命名空间", properties.len());
        Ok(Self {
            file_path: None,
            priority: 100,
            properties,
        })
    }

    /// 获取文件路径
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

fn flatten_toml(prefix: &str, value: &toml::Value, out: &mut HashMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (key, nested) in table {
                flatten_toml(&format!("{}.{}", prefix, key), nested, out);
            }
        }
        toml::Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                flatten_toml(&format!("{}.{}", prefix, index), nested, out);
            }
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        toml::Value::Integer(i) => {
            out.insert(prefix.to_string(), i.to_string());
        }
        toml::Value::Float(f) => {
            out.insert(prefix.to_string(), f.to_string());
        }
        toml::Value::Boolean(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        toml::Value::Datetime(dt) => {
            out.insert(prefix.to_string(), dt.to_string());
        }
    }
}

#[async_trait]
impl PropertySource for TomlPropertySource {
    async fn get_property(&self, namespace: &str, key: &str) -> Option<String> {
        self.properties
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .cloned()
    }

    fn name(&self) -> &str {
        "TomlPropertySource"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// 环境变量属性来源
///
/// `(namespace, key)` 映射为 `PREFIX__NAMESPACE__KEY`，
/// 其中 `.` 和 `-` 分别替换为分隔符和 `_`，整体转为大写。
/// 每次查询时读取环境变量。
#[derive(Debug, Clone)]
pub struct EnvironmentPropertySource {
    prefix: String,
    separator: String,
    priority: i32,
}

impl EnvironmentPropertySource {
    /// 创建新的环境变量属性来源
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: "__".to_string(),
            priority: 200, // 环境变量最高优先级
        }
    }

    /// 设置分隔符
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 将属性键转换为环境变量名
    pub fn env_key(&self, namespace: &str, key: &str) -> String {
        let convert = |part: &str| {
            part.replace('.', &self.separator)
                .replace('-', "_")
                .to_uppercase()
        };

        format!(
            "{}{sep}{}{sep}{}",
            self.prefix,
            convert(namespace),
            convert(key),
            sep = self.separator
        )
    }
}

#[async_trait]
impl PropertySource for EnvironmentPropertySource {
    async fn get_property(&self, namespace: &str, key: &str) -> Option<String> {
        std::env::var(self.env_key(namespace, key)).ok()
    }

    fn name(&self) -> &str {
        "EnvironmentPropertySource"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
