//! Strict versus tolerant handling of broken or unknown content at the
//! document level.

use adf_doc::{convert_str, parse_with, AdfError, RenderRules};
use serde_json::json;

use crate::common::{doc, para, text};

fn tolerant() -> RenderRules {
    RenderRules {
        ignore_errors: true,
        ..RenderRules::default()
    }
}

#[test]
fn strict_mode_fails_on_the_first_unknown_node() {
    let json = serde_json::to_string(&doc(vec![
        para(vec![text("kept")]),
        json!({"type": "futureNode", "attrs": {"x": 1}}),
    ]))
    .unwrap();
    let err = convert_str(&json, &RenderRules::default()).unwrap_err();
    assert_eq!(err, AdfError::UnknownNodeType("futureNode".to_string()));
}

#[test]
fn tolerant_mode_skips_unknown_nodes() {
    let json = serde_json::to_string(&doc(vec![
        para(vec![text("kept")]),
        json!({"type": "futureNode", "attrs": {"x": 1}}),
        para(vec![text("also kept")]),
    ]))
    .unwrap();
    let md = convert_str(&json, &tolerant()).unwrap();
    assert_eq!(md, "kept\n\nalso kept\n");
}

#[test]
fn tolerant_mode_skips_malformed_children() {
    // A text node without its text field is malformed, not unknown.
    let json = serde_json::to_string(&doc(vec![para(vec![
        text("before "),
        json!({"type": "text"}),
        text("after"),
    ])]))
    .unwrap();
    let md = convert_str(&json, &tolerant()).unwrap();
    assert_eq!(md, "before after\n");
}

#[test]
fn tolerant_mode_never_masks_a_broken_root() {
    let err = parse_with(&json!({"type": "futureNode"}), true).unwrap_err();
    assert_eq!(err, AdfError::UnknownNodeType("futureNode".to_string()));

    let err = parse_with(&json!({"type": "paragraph", "content": []}), true).unwrap_err();
    assert!(matches!(err, AdfError::Malformed(_)));
}

#[test]
fn unimplemented_renders_fail_even_in_tolerant_mode() {
    let value = doc(vec![para(vec![
        json!({"type": "emoji", "attrs": {"shortName": ":custom:"}}),
    ])]);
    let node = parse_with(&value, true).unwrap();
    let err = node.to_markdown(&tolerant()).unwrap_err();
    assert_eq!(
        err,
        AdfError::UnimplementedRender("emoji without fallback text")
    );
}
