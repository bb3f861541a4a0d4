//! 数据对象目录
//!
//! `#[data_object]` 宏在程序启动时把描述符登记到全局目录，
//! 扫描器再按模块路径从目录中筛选候选类型。

use crate::component::DataObject;
use crate::errors::ComponentError;
use crate::metadata::{module_path_matches, TypeInfo};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use tracing::{debug, warn};

/// 数据对象工厂函数类型
pub type DataObjectFactory = fn() -> Result<Box<dyn DataObject>, ComponentError>;

/// 数据对象描述符
#[derive(Clone, Copy)]
pub struct DataObjectDescriptor {
    /// 类型信息
    pub type_info: TypeInfo,
    /// 定义该类型的模块路径
    pub module_path: &'static str,
    /// 无参构造工厂
    pub factory: DataObjectFactory,
}

impl DataObjectDescriptor {
    /// 为实现了 `Default` 的数据对象创建描述符
    pub fn of<T>(module_path: &'static str) -> Self
    where
        T: DataObject + Default,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            module_path,
            factory: default_factory::<T>,
        }
    }

    /// 使用自定义工厂创建描述符
    pub fn with_factory<T: DataObject>(
        module_path: &'static str,
        factory: DataObjectFactory,
    ) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            module_path,
            factory,
        }
    }

    /// 创建实例
    pub fn instantiate(&self) -> Result<Box<dyn DataObject>, ComponentError> {
        (self.factory)()
    }
}

impl fmt::Debug for DataObjectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataObjectDescriptor")
            .field("type_info", &self.type_info)
            .field("module_path", &self.module_path)
            .field("factory", &"<function>")
            .finish()
    }
}

fn default_factory<T>() -> Result<Box<dyn DataObject>, ComponentError>
where
    T: DataObject + Default,
{
    Ok(Box::new(T::default()))
}

/// 数据对象目录
#[derive(Debug, Default)]
pub struct DataObjectCatalog {
    descriptors: RwLock<Vec<DataObjectDescriptor>>,
}

static GLOBAL_DATA_OBJECT_CATALOG: Lazy<DataObjectCatalog> = Lazy::new(DataObjectCatalog::new);

impl DataObjectCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取全局目录
    pub fn global() -> &'static Self {
        &GLOBAL_DATA_OBJECT_CATALOG
    }

    /// 登记描述符，同一类型重复登记时保留第一次的描述符
    pub fn submit(&self, descriptor: DataObjectDescriptor) -> bool {
        let mut descriptors = self.descriptors.write();
        if descriptors
            .iter()
            .any(|existing| existing.type_info.id == descriptor.type_info.id)
        {
            warn!("数据对象重复登记，已忽略: {}", descriptor.type_info);
            return false;
        }

        debug!(
            "登记数据对象: {} ({})",
            descriptor.type_info, descriptor.module_path
        );
        descriptors.push(descriptor);
        true
    }

    /// 查找模块路径位于 `path` 之下的所有描述符
    pub fn find_under(&self, path: &str) -> Vec<DataObjectDescriptor> {
        self.descriptors
            .read()
            .iter()
            .filter(|descriptor| module_path_matches(path, descriptor.module_path))
            .copied()
            .collect()
    }

    /// 已登记的描述符数量
    pub fn len(&self) -> usize {
        self.descriptors.read().len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.descriptors.read().is_empty()
    }
}

/// 向全局目录登记数据对象，供 `#[data_object]` 生成的代码调用
pub fn submit_data_object(descriptor: DataObjectDescriptor) {
    DataObjectCatalog::global().submit(descriptor);
}
