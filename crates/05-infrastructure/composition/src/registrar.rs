//! 数据对象注册器
//!
//! 扫描模块路径下所有 `#[data_object]` 类型，用默认构造创建实例并交给
//! [`DataObjectRegistry`]。单个类型失败只记录日志，不影响其他类型。

use di_abstractions::{ComponentScanner, DataObjectRegistry};
use di_impl::{CatalogComponentScanner, JsonObjectRegistry};
use infrastructure_common::DataObjectDescriptor;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 一次扫描的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// 发现的候选类型数
    pub discovered: usize,
    /// 新注册的类型数
    pub registered: usize,
    /// 之前已注册、被忽略的类型数
    pub already_registered: usize,
    /// 实例化或注册失败的类型数
    pub failed: usize,
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "发现 {}，注册 {}，已存在 {}，失败 {}",
            self.discovered, self.registered, self.already_registered, self.failed
        )
    }
}

/// 数据对象注册器
#[derive(Clone)]
pub struct DataObjectRegistrar {
    scanner: Arc<dyn ComponentScanner>,
    registry: Arc<dyn DataObjectRegistry>,
}

impl fmt::Debug for DataObjectRegistrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataObjectRegistrar")
            .field("scanner", &self.scanner.name())
            .field("registered", &self.registry.registered_count())
            .finish()
    }
}

impl Default for DataObjectRegistrar {
    fn default() -> Self {
        Self::new(
            Arc::new(CatalogComponentScanner::global()),
            JsonObjectRegistry::global(),
        )
    }
}

impl DataObjectRegistrar {
    /// 创建注册器
    pub fn new(scanner: Arc<dyn ComponentScanner>, registry: Arc<dyn DataObjectRegistry>) -> Self {
        Self { scanner, registry }
    }

    /// 使用全局目录扫描，注册到指定注册表
    pub fn with_registry(registry: Arc<dyn DataObjectRegistry>) -> Self {
        Self::new(Arc::new(CatalogComponentScanner::global()), registry)
    }

    /// 扫描模块路径并注册所有数据对象
    ///
    /// `path` 可以用 `.` 或 `::` 分隔。错误不会返回给调用方。
    pub fn scan_path(&self, path: &str) -> ScanReport {
        let mut report = ScanReport::default();

        let candidates = match self.scanner.find_candidates(path) {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("扫描模块路径 '{}' 失败: {}", path, e);
                return report;
            }
        };

        report.discovered = candidates.len();
        for descriptor in &candidates {
            match self.register(descriptor) {
                Ok(true) => report.registered += 1,
                Ok(false) => report.already_registered += 1,
                Err(()) => report.failed += 1,
            }
        }

        info!("扫描模块路径 '{}' 完成: {}", path, report);
        report
    }

    fn register(&self, descriptor: &DataObjectDescriptor) -> Result<bool, ()> {
        let instance = descriptor.instantiate().map_err(|e| {
            error!("无法实例化数据对象 {}: {}", descriptor.type_info, e);
        })?;

        let registered = self.registry.register(instance).map_err(|e| {
            error!("无法注册数据对象 {}: {}", descriptor.type_info, e);
        })?;

        debug!(
            "数据对象 {} {}",
            descriptor.type_info,
            if registered { "已注册" } else { "已存在" }
        );
        Ok(registered)
    }
}

/// 扫描模块路径，注册到全局 [`JsonObjectRegistry`]
pub fn scan_path(path: &str) -> ScanReport {
    DataObjectRegistrar::default().scan_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::{ComponentError, DataObject, DataObjectCatalog};
    use std::any::TypeId;

    #[derive(Debug, Default)]
    struct Order;
    impl DataObject for Order {}

    #[derive(Debug, Default)]
    struct Invoice;
    impl DataObject for Invoice {}

    #[derive(Debug, Default)]
    struct Broken;
    impl DataObject for Broken {}

    fn broken_factory() -> Result<Box<dyn DataObject>, ComponentError> {
        Err(ComponentError::instantiation_failed("Broken", "构造失败"))
    }

    struct RejectingRegistry;

    impl DataObjectRegistry for RejectingRegistry {
        fn register(&self, instance: Box<dyn DataObject>) -> Result<bool, ComponentError> {
            Err(ComponentError::RegistrationError {
                type_name: instance.type_info().name.to_string(),
                message: "只读".to_string(),
            })
        }

        fn is_registered(&self, _type_id: TypeId) -> bool {
            false
        }

        fn registered_count(&self) -> usize {
            0
        }
    }

    fn scanner(with_broken: bool) -> Arc<dyn ComponentScanner> {
        let catalog: &'static DataObjectCatalog = Box::leak(Box::new(DataObjectCatalog::new()));
        catalog.submit(DataObjectDescriptor::of::<Order>("shop::model"));
        catalog.submit(DataObjectDescriptor::of::<Invoice>("shop::model::billing"));
        if with_broken {
            catalog.submit(DataObjectDescriptor::with_factory::<Broken>(
                "shop::model",
                broken_factory,
            ));
        }
        Arc::new(CatalogComponentScanner::new(catalog))
    }

    #[test]
    fn test_scan_registers_each_type_once() {
        let registry = Arc::new(JsonObjectRegistry::new());
        let registrar = DataObjectRegistrar::new(scanner(false), registry.clone());

        let first = registrar.scan_path("shop.model");
        assert_eq!(first.discovered, 2);
        assert_eq!(first.registered, 2);
        assert_eq!(registry.len(), 2);

        let second = registrar.scan_path("shop::model");
        assert_eq!(second.registered, 0);
        assert_eq!(second.already_registered, 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_instantiation_is_skipped() {
        let registry = Arc::new(JsonObjectRegistry::new());
        let report = DataObjectRegistrar::new(scanner(true), registry.clone()).scan_path("shop");

        assert_eq!(report.discovered, 3);
        assert_eq!(report.registered, 2);
        assert_eq!(report.failed, 1);
        assert!(!registry.contains::<Broken>());
    }

    #[test]
    fn test_registry_errors_are_not_propagated() {
        let report =
            DataObjectRegistrar::new(scanner(false), Arc::new(RejectingRegistry)).scan_path("shop");
        assert_eq!(report.failed, 2);
        assert_eq!(report.registered, 0);
    }

    #[test]
    fn test_invalid_path_gives_empty_report() {
        let registry = Arc::new(JsonObjectRegistry::new());
        let report = DataObjectRegistrar::new(scanner(false), registry).scan_path("shop/model");
        assert_eq!(report, ScanReport::default());
    }
}
