//! Shared fixtures for unit tests.

use serde_json::{Value, json};

/// A minimal block with a tag and id.
pub fn block(tag: &str, id: i64) -> Value {
    json!({"__component": tag, "id": id})
}

/// A collection response holding one page with `blocks`.
pub fn page_document(blocks: Vec<Value>) -> Value {
    json!({"data": [{"id": 1, "slug": "test-page", "blocks": blocks}]})
}
