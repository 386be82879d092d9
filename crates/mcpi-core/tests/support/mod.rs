#![allow(dead_code)]

pub mod toolchain;

use std::path::Path;

use serde_json::Value;

pub use toolchain::FakeToolchain;

pub fn read_json(path: &Path) -> Value {
    let bytes = std::fs::read(path).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}
