use serde_json::{json, Value};
use std::sync::LazyLock;

pub static SETTINGS_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "run": {
                "type": "object",
                "properties": {
                    "workers": { "type": "integer", "minimum": 1 },
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "target": { "type": "string", "format": "uri" }
                }
            },
            "output": {
                "type": "object",
                "properties": {
                    "directory": { "type": "string" }
                }
            }
        }
    })
});
