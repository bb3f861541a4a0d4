use component_macros::data_object;
use infrastructure_common::DataObject;
use serde::Serialize;

#[data_object(serialize)]
#[derive(Debug, Default, Serialize)]
struct Ping {
    sequence: u32,
}

fn main() {
    let ping = Ping { sequence: 9 };
    assert_eq!(ping.to_json()["sequence"], 9);
}
