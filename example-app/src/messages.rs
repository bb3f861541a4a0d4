//! 示例数据对象

use component_macros::data_object;
use serde::Serialize;

/// 心跳
#[data_object(serialize)]
#[derive(Debug, Default, Serialize)]
pub struct Heartbeat {
    pub sequence: u64,
    pub source: String,
}

/// 停止通知
#[data_object(serialize)]
#[derive(Debug, Default, Serialize)]
pub struct ShutdownNotice {
    pub reason: Option<String>,
}
