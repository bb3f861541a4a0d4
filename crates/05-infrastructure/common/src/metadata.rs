//! 元数据定义
//!
//! 提供类型的元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称（包含模块路径）
    pub name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 规范化模块路径
///
/// 同时接受 `.` 和 `::` 作为分隔符，去掉首尾分隔符。
pub fn normalize_module_path(path: &str) -> String {
    path.trim()
        .replace('.', "::")
        .trim_matches(':')
        .to_string()
}

/// 判断 `module_path` 是否位于 `root` 之下（包括相等）
///
/// 空的 `root` 匹配所有模块。
pub fn module_path_matches(root: &str, module_path: &str) -> bool {
    let root = normalize_module_path(root);
    if root.is_empty() {
        return true;
    }

    match module_path.strip_prefix(root.as_str()) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}
