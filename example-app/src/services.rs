//! 示例 bean

use component_macros::component;
use serde::Deserialize;

/// 问候服务
#[component(name = "messageService")]
#[derive(Debug, Deserialize)]
pub struct MessageService {
    message: String,
    #[serde(default = "default_repeat")]
    repeat: usize,
}

fn default_repeat() -> usize {
    1
}

impl MessageService {
    /// 生成输出行
    pub fn render(&self) -> Vec<String> {
        vec![self.message.clone(); self.repeat]
    }
}
