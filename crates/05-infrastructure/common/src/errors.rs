//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {location}, 原因: {source}")]
    ParseError {
        location: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("不支持的配置文件格式: {location}")]
    UnsupportedFormat { location: String },

    #[error("配置位置无效: {location}, 原因: {message}")]
    InvalidLocation { location: String, message: String },

    #[error("占位符无法解析: ${{{placeholder}}}")]
    PlaceholderUnresolved { placeholder: String },

    #[error("占位符嵌套过深: {value}")]
    PlaceholderRecursion { value: String },

    #[error("配置键不存在: {namespace}.{key}")]
    KeyNotFound { namespace: String, key: String },
}

impl ConfigError {
    /// 创建解析错误
    pub fn parse_error(
        location: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ParseError {
            location: location.into(),
            source: Box::new(source),
        }
    }
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("bean 未注册: {name}")]
    BeanNotFound { name: String },

    #[error("bean 类型不匹配: {name}, 期望类型 {expected}")]
    BeanTypeMismatch { name: String, expected: String },

    #[error("bean 类型未登记: {type_key}")]
    BeanTypeNotRegistered { type_key: String },

    #[error("bean 创建失败: {name}, 原因: {message}")]
    BeanCreationFailed { name: String, message: String },

    #[error("容器只能启动一次，请改用 ContainerAccessor::instance()")]
    ContainerAlreadyBootstrapped,

    #[error("在非容器管理的 ContainerAccessor 上调用 get_bean")]
    NotManaged,
}

impl DependencyError {
    /// 创建 bean 创建失败错误
    pub fn creation_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BeanCreationFailed {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// 组件错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件扫描失败: {message}")]
    ScanError { message: String },

    #[error("组件实例化失败: {type_name}, 原因: {message}")]
    InstantiationFailed { type_name: String, message: String },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },
}

impl ComponentError {
    /// 创建扫描错误
    pub fn scan_error(message: impl Into<String>) -> Self {
        Self::ScanError {
            message: message.into(),
        }
    }

    /// 创建实例化错误
    pub fn instantiation_failed(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InstantiationFailed {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("组件错误: {source}")]
    ComponentError {
        #[from]
        source: ComponentError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ComponentResult<T> = Result<T, ComponentError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
