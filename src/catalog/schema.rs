use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CATALOG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["suite", "scenarios"],
        "properties": {
            "suite": { "type": "string" },
            "scenarios": { "type": "array", "items": { "$ref": "#/$defs/scenario" } }
        },
        "$defs": {
            "scenario": {
                "type": "object",
                "required": ["id", "category", "trigger", "expectation"],
                "properties": {
                    "id": { "type": "string", "minLength": 1 },
                    "category": {
                        "type": "string",
                        "enum": [
                            "dir-listing", "file-read", "file-write", "file-rename",
                            "file-include", "command-exec", "ssrf", "sql-injection",
                            "xss", "web-shell"
                        ]
                    },
                    "description": { "type": "string" },
                    "trigger": { "$ref": "#/$defs/trigger" },
                    "expectation": { "$ref": "#/$defs/expectation" }
                }
            },
            "trigger": {
                "type": "object",
                "required": ["kind"],
                "properties": {
                    "kind": { "type": "string", "enum": ["local-call", "http-request"] },
                    "program": { "type": "string" },
                    "args": { "type": "array", "items": { "type": "string" } },
                    "method": {
                        "type": "string",
                        "enum": ["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"]
                    },
                    "url": { "type": "string" },
                    "headers": { "type": "object", "additionalProperties": { "type": "string" } },
                    "body": { "type": "string" }
                }
            },
            "expectation": {
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": [
                            "contains-text", "file-exists", "file-absent",
                            "exit-code-equals", "paths-accessed"
                        ]
                    },
                    "text": { "type": "string" },
                    "path": { "type": "string" },
                    "code": { "type": "integer" },
                    "paths": { "type": "array", "items": { "type": "string" } }
                }
            }
        }
    })
});
