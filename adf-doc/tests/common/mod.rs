//! Shared builders for document JSON used across the integration tests.

use serde_json::{json, Value};

pub fn doc(content: Vec<Value>) -> Value {
    json!({"type": "doc", "version": 1, "content": content})
}

pub fn para(content: Vec<Value>) -> Value {
    json!({"type": "paragraph", "content": content})
}

pub fn text(s: &str) -> Value {
    json!({"type": "text", "text": s})
}

pub fn marked_text(s: &str, marks: Vec<Value>) -> Value {
    json!({"type": "text", "text": s, "marks": marks})
}

pub fn list_item(label: &str) -> Value {
    json!({"type": "listItem", "content": [para(vec![text(label)])]})
}
