//! 定义文件加载
//!
//! 位置语法：
//!
//! - `classpath*:<glob>` 在每个搜索根目录下匹配，允许没有匹配
//! - `file:<path>` 或直接写路径，文件必须存在

use di_abstractions::ContextDefinition;
use infrastructure_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 在所有搜索根目录中匹配的位置前缀
pub const CLASSPATH_ALL_PREFIX: &str = "classpath*:";
/// 显式文件位置前缀
pub const FILE_PREFIX: &str = "file:";

/// 定义文件加载器
#[derive(Debug, Clone)]
pub struct DefinitionLoader {
    search_roots: Vec<PathBuf>,
}

impl Default for DefinitionLoader {
    fn default() -> Self {
        Self {
            search_roots: vec![PathBuf::from("."), PathBuf::from("resources")],
        }
    }
}

impl DefinitionLoader {
    /// 使用默认搜索根目录（`.` 和 `resources`）创建加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换搜索根目录
    pub fn with_search_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// 追加搜索根目录
    pub fn add_search_root(&mut self, root: impl Into<PathBuf>) {
        self.search_roots.push(root.into());
    }

    /// 搜索根目录
    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// 把位置解析为文件列表
    pub fn resolve_location(&self, location: &str) -> Result<Vec<PathBuf>, ConfigError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ConfigError::InvalidLocation {
                location: location.to_string(),
                message: "位置为空".to_string(),
            });
        }

        if let Some(pattern) = location.strip_prefix(CLASSPATH_ALL_PREFIX) {
            return self.resolve_pattern(location, pattern);
        }

        let path = PathBuf::from(location.strip_prefix(FILE_PREFIX).unwrap_or(location));
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(vec![path])
    }

    fn resolve_pattern(&self, location: &str, pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
        let mut matches = Vec::new();

        for root in &self.search_roots {
            let full = root.join(pattern);
            let full = full.to_str().ok_or_else(|| ConfigError::InvalidLocation {
                location: location.to_string(),
                message: format!("路径不是有效的 UTF-8: {}", full.display()),
            })?;

            let entries = glob::glob(full).map_err(|e| ConfigError::InvalidLocation {
                location: location.to_string(),
                message: e.to_string(),
            })?;

            let mut found: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .filter(|path| path.is_file())
                .collect();
            found.sort();

            for path in found {
                if !matches.contains(&path) {
                    matches.push(path);
                }
            }
        }

        debug!("位置 {} 匹配到 {} 个文件", location, matches.len());
        Ok(matches)
    }

    /// 加载位置下的所有定义文件
    pub async fn load_location(
        &self,
        location: &str,
    ) -> Result<Vec<(PathBuf, ContextDefinition)>, ConfigError> {
        let mut loaded = Vec::new();
        for path in self.resolve_location(location)? {
            let definition = Self::load_file(&path).await?;
            loaded.push((path, definition));
        }
        Ok(loaded)
    }

    /// 加载单个定义文件，格式由扩展名决定
    pub async fn load_file(path: &Path) -> Result<ContextDefinition, ConfigError> {
        info!("加载定义文件: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        parse_definition(path, &content)
    }
}

/// 按扩展名解析定义文件内容
pub fn parse_definition(path: &Path, content: &str) -> Result<ContextDefinition, ConfigError> {
    let location = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("toml") => toml::from_str(content).map_err(|e| ConfigError::parse_error(location, e)),
        Some("json") => {
            serde_json::from_str(content).map_err(|e| ConfigError::parse_error(location, e))
        }
        Some("yaml" | "yml") => {
            serde_yaml::from_str(content).map_err(|e| ConfigError::parse_error(location, e))
        }
        _ => Err(ConfigError::UnsupportedFormat { location }),
    }
}
