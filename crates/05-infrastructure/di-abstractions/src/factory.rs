//! bean 工厂抽象
//!
//! 描述容器如何根据 bean 定义创建实例

use crate::container::{BeanFactory, BeanInstance};
use infrastructure_common::{DependencyError, TypeInfo};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// bean 创建上下文
///
/// 工厂通过 `factory` 可以查找已创建的 bean，或保留容器句柄供以后使用。
pub struct BeanContext<'a> {
    /// bean 名称
    pub name: &'a str,
    /// 已展开占位符的属性
    pub properties: &'a Map<String, Value>,
    /// 正在构建的容器
    pub factory: Arc<dyn BeanFactory>,
}

impl fmt::Debug for BeanContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanContext")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// bean 工厂函数类型
pub type BeanFactoryFn = fn(&BeanContext<'_>) -> Result<BeanInstance, DependencyError>;

/// 把属性反序列化为 bean
///
/// `#[component]` 生成的默认工厂。
pub fn bean_from_properties<T>(context: &BeanContext<'_>) -> Result<BeanInstance, DependencyError>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let bean: T = serde_json::from_value(Value::Object(context.properties.clone()))
        .map_err(|e| DependencyError::creation_failed(context.name, e.to_string()))?;
    Ok(Arc::new(bean))
}

/// bean 类型描述符
#[derive(Clone, Copy)]
pub struct BeanTypeDescriptor {
    /// 定义文件中 `type` 字段引用的键
    pub type_key: &'static str,
    /// 类型信息
    pub type_info: TypeInfo,
    /// 默认 bean 名称
    pub bean_name: Option<&'static str>,
    /// 是否在没有显式定义时自动创建
    pub service: bool,
    /// 服务创建顺序，数值大的先创建
    pub priority: i32,
    /// 禁用的类型对容器不可见
    pub enabled: bool,
    /// 工厂函数
    pub factory: BeanFactoryFn,
}

impl BeanTypeDescriptor {
    /// 使用属性反序列化工厂创建描述符
    pub fn of<T>(type_key: &'static str) -> Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        Self::with_factory::<T>(type_key, bean_from_properties::<T>)
    }

    /// 使用自定义工厂创建描述符
    pub fn with_factory<T: 'static>(type_key: &'static str, factory: BeanFactoryFn) -> Self {
        Self {
            type_key,
            type_info: TypeInfo::of::<T>(),
            bean_name: None,
            service: false,
            priority: 0,
            enabled: true,
            factory,
        }
    }

    /// 设置默认 bean 名称
    pub fn named(mut self, bean_name: &'static str) -> Self {
        self.bean_name = Some(bean_name);
        self
    }

    /// 标记为服务：容器中没有同名定义时自动创建
    ///
    /// 服务必须有默认 bean 名称，否则该标记被忽略。
    pub fn as_service(mut self) -> Self {
        self.service = true;
        self
    }

    /// 设置服务创建优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 禁用该类型：容器既不按定义创建它，也不自动创建服务
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// 是否需要在没有显式定义时自动创建
    pub fn is_auto_service(&self) -> bool {
        self.enabled && self.service && self.bean_name.is_some()
    }

    /// 创建实例
    pub fn create(&self, context: &BeanContext<'_>) -> Result<BeanInstance, DependencyError> {
        (self.factory)(context)
    }
}

impl fmt::Debug for BeanTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanTypeDescriptor")
            .field("type_key", &self.type_key)
            .field("type_info", &self.type_info)
            .field("bean_name", &self.bean_name)
            .field("service", &self.service)
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .field("factory", &"<function>")
            .finish()
    }
}
