//! Conversion of Atlassian Document Format (ADF) trees to Markdown.
//!
//! ADF is the JSON document format used by Jira and Confluence rich-text
//! fields: a `doc` root over nested, type-tagged nodes, with formatting
//! expressed as `marks` attached to text. This crate parses that untyped
//! JSON into a typed tree and renders the tree as portable Markdown.
//!
//! The pipeline has two independent halves:
//!
//! 1. **Parse** ([`model`]): recursive descent over the JSON, dispatched on
//!    the `type` tag ([`tag`]). Field access goes through [`data`] so
//!    missing-versus-malformed is diagnosed uniformly. Every variant also
//!    serializes back to its declared JSON subset via `to_data`.
//! 2. **Render** ([`markdown`]): each node knows its own Markdown shape;
//!    output policy is carried in [`RenderRules`].
//!
//! Both halves offer a tolerant mode that skips children failing with data
//! errors, for feeds where one exotic node should not sink the document.
//!
//! File structure:
//!
//! - `tag`: the closed node and mark type-tag tables
//! - `data`: typed accessors over untyped JSON objects
//! - `model/`: the typed tree (`nodes`, `marks`) and parse dispatch
//! - `markdown/`: render rules and the Markdown serializer
//! - `source`: traits for document fetching and caching collaborators
//! - `error`: the error taxonomy shared by both halves
//!
//! Library choices: `serde_json` is the only runtime dependency of the
//! parsing core; `comrak` appears in dev-dependencies to parse rendered
//! output back and assert it is well-formed Markdown.

pub mod data;
pub mod error;
pub mod markdown;
pub mod model;
pub mod source;
pub mod tag;

pub use error::AdfError;
pub use markdown::{HardBreakStyle, RenderRules};
pub use model::{Mark, Node};

use serde_json::Value;

/// Parse a complete document. The root must be a `doc` node.
pub fn parse(value: &Value) -> Result<Node, AdfError> {
    parse_with(value, false)
}

/// Parse a complete document, optionally skipping children that fail with
/// data errors. The root itself must still be a well-formed `doc` node.
pub fn parse_with(value: &Value, ignore_errors: bool) -> Result<Node, AdfError> {
    let node = model::parse_node(value, ignore_errors)?;
    if !matches!(node, Node::Doc(_)) {
        return Err(AdfError::Malformed(format!(
            "document root must be a 'doc' node, got '{}'",
            node.node_type().as_str()
        )));
    }
    Ok(node)
}

/// One-call convenience: JSON text in, Markdown out.
pub fn convert_str(json: &str, rules: &RenderRules) -> Result<String, AdfError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|err| AdfError::Malformed(format!("invalid JSON: {err}")))?;
    let doc = parse_with(&value, rules.ignore_errors)?;
    doc.to_markdown(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_rejects_non_doc_roots() {
        let err = parse(&json!({"type": "paragraph", "content": []})).unwrap_err();
        assert!(matches!(err, AdfError::Malformed(_)));
    }

    #[test]
    fn convert_str_end_to_end() {
        let json = r#"{
            "type": "doc",
            "version": 1,
            "content": [{
                "type": "paragraph",
                "content": [
                    {"type": "text", "text": "Hello "},
                    {"type": "text", "text": "world", "marks": [{"type": "strong"}]}
                ]
            }]
        }"#;
        let md = convert_str(json, &RenderRules::default()).unwrap();
        assert_eq!(md, "Hello **world**\n");
    }

    #[test]
    fn convert_str_reports_invalid_json() {
        let err = convert_str("{not json", &RenderRules::default()).unwrap_err();
        assert!(matches!(err, AdfError::Malformed(_)));
    }
}
