//! 组件扫描器抽象接口
//!
//! 提供按模块路径发现数据对象的能力

use infrastructure_common::{ComponentError, DataObjectDescriptor};

/// 组件扫描器 trait
pub trait ComponentScanner: Send + Sync {
    /// 查找模块路径位于 `path` 之下的数据对象
    fn find_candidates(&self, path: &str) -> Result<Vec<DataObjectDescriptor>, ComponentError>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}
