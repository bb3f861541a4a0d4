//! bean 定义
//!
//! 定义文件（TOML / JSON / YAML）中的 bean 声明：
//!
//! ```toml
//! [[bean]]
//! name = "test_bean"
//! type = "app::TestBean"
//!
//! [bean.properties]
//! foo = "${foo}"
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 单个 bean 定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanDefinition {
    /// bean 名称
    pub name: String,
    /// bean 类型键
    #[serde(rename = "type")]
    pub type_key: String,
    /// bean 属性，字符串中可以包含占位符
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl BeanDefinition {
    /// 创建新的 bean 定义
    pub fn new(name: impl Into<String>, type_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_key: type_key.into(),
            properties: Map::new(),
        }
    }

    /// 添加属性
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// 一个定义文件的内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextDefinition {
    /// bean 定义，按声明顺序
    #[serde(default, rename = "bean")]
    pub beans: Vec<BeanDefinition>,
}
