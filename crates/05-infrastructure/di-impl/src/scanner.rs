//! 基于数据对象目录的组件扫描器

use di_abstractions::ComponentScanner;
use infrastructure_common::{normalize_module_path, ComponentError, DataObjectCatalog, DataObjectDescriptor};
use tracing::debug;

/// 目录扫描器
///
/// 从程序启动时登记的 [`DataObjectCatalog`] 中按模块路径筛选候选类型。
#[derive(Debug, Clone, Copy)]
pub struct CatalogComponentScanner {
    catalog: &'static DataObjectCatalog,
}

impl Default for CatalogComponentScanner {
    fn default() -> Self {
        Self::global()
    }
}

impl CatalogComponentScanner {
    /// 使用指定目录创建扫描器
    pub fn new(catalog: &'static DataObjectCatalog) -> Self {
        Self { catalog }
    }

    /// 使用全局目录创建扫描器
    pub fn global() -> Self {
        Self::new(DataObjectCatalog::global())
    }
}

impl ComponentScanner for CatalogComponentScanner {
    fn find_candidates(&self, path: &str) -> Result<Vec<DataObjectDescriptor>, ComponentError> {
        let normalized = normalize_module_path(path);
        if !normalized
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == ':')
        {
            return Err(ComponentError::scan_error(format!("无效的模块路径: '{}'", path)));
        }

        let mut candidates = self.catalog.find_under(&normalized);
        candidates.sort_by_key(|descriptor| descriptor.type_info.name);

        debug!("模块路径 '{}' 下发现 {} 个数据对象", normalized, candidates.len());
        Ok(candidates)
    }

    fn name(&self) -> &str {
        "CatalogComponentScanner"
    }
}
