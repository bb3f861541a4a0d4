//! 容器抽象接口
//!
//! 提供 bean 查找和容器构建的核心抽象

use crate::factory::BeanTypeDescriptor;
use async_trait::async_trait;
use config_abstractions::PlaceholderResolver;
use infrastructure_common::{DependencyError, InfrastructureError, NamedBean};
use std::any::Any;
use std::sync::Arc;

/// 容器中保存的 bean 实例
pub type BeanInstance = Arc<dyn Any + Send + Sync>;

/// bean 工厂 trait
///
/// 容器对外暴露的查找接口，只按名称查找。
pub trait BeanFactory: Send + Sync {
    /// 按名称获取 bean
    fn get_bean_by_name(&self, name: &str) -> Result<BeanInstance, DependencyError>;

    /// 检查是否存在指定名称的 bean
    fn contains_bean(&self, name: &str) -> bool;

    /// 获取所有 bean 名称
    fn bean_names(&self) -> Vec<String>;
}

/// 带类型的 bean 查找扩展
pub trait BeanFactoryExt: BeanFactory {
    /// 按名称获取指定类型的 bean
    fn get_bean<T>(&self, name: &str) -> Result<Arc<T>, DependencyError>
    where
        T: Send + Sync + 'static,
    {
        self.get_bean_by_name(name)?
            .downcast::<T>()
            .map_err(|_| DependencyError::BeanTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
            })
    }

    /// 按 `BEAN_NAME` 约定获取 bean
    fn get_named_bean<T: NamedBean>(&self) -> Result<Arc<T>, DependencyError> {
        self.get_bean::<T>(T::BEAN_NAME)
    }
}

impl<F: BeanFactory + ?Sized> BeanFactoryExt for F {}

/// 容器构建器 trait
#[async_trait]
pub trait ContainerBuilder: Send + Sized {
    /// 关联的容器类型
    type Container: BeanFactory;

    /// 添加定义位置
    fn with_locations<I, S>(self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// 设置占位符解析器
    fn with_placeholder_resolver(self, resolver: Arc<dyn PlaceholderResolver>) -> Self;

    /// 额外登记 bean 类型，优先于全局目录
    fn with_bean_type(self, descriptor: BeanTypeDescriptor) -> Self;

    /// 构建容器
    async fn build(self) -> Result<Arc<Self::Container>, InfrastructureError>;
}
