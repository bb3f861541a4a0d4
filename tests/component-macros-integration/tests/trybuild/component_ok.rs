use component_macros::component;
use infrastructure_common::{Component, NamedBean};
use serde::Deserialize;

#[component(name = "okService", priority = -1)]
#[derive(Debug, Deserialize)]
struct OkService {
    #[serde(default)]
    _label: String,
}

fn main() {
    let s = OkService { _label: String::new() };
    assert_eq!(s.name(), "okService");
    assert_eq!(s.priority(), -1);
    assert_eq!(OkService::BEAN_NAME, "okService");
}
