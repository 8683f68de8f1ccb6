//! End-to-end conversion: JSON documents in, Markdown out. The larger
//! outputs are parsed back through comrak to confirm the Markdown carries
//! the structure we meant to emit, not just the right characters.

use adf_doc::{convert_str, parse, HardBreakStyle, RenderRules};
use comrak::nodes::NodeValue;
use comrak::{parse_document, Arena, ComrakOptions};
use insta::assert_snapshot;
use serde_json::json;

use crate::common::{doc, list_item, marked_text, para, text};

fn render(value: serde_json::Value) -> String {
    parse(&value)
        .unwrap()
        .to_markdown(&RenderRules::default())
        .unwrap()
}

#[test]
fn paragraph_document() {
    let md = render(doc(vec![para(vec![
        text("Hello "),
        marked_text("world", vec![json!({"type": "strong"})]),
    ])]));
    assert_snapshot!(md.trim_end(), @"Hello **world**");
}

#[test]
fn report_document() {
    let md = render(doc(vec![
        json!({
            "type": "heading",
            "attrs": {"level": 1},
            "content": [text("Intro")],
        }),
        para(vec![
            text("Hello "),
            marked_text("world", vec![json!({"type": "strong"})]),
        ]),
        json!({"type": "bulletList", "content": [list_item("A"), list_item("B")]}),
        json!({
            "type": "codeBlock",
            "attrs": {"language": "python"},
            "content": [text("print(1)")],
        }),
        json!({"type": "rule"}),
        para(vec![text("end")]),
    ]));
    assert_eq!(
        md,
        "\n\n# Intro\n\nHello **world**\n\n- A\n- B\n\n```python\nprint(1)\n```\n\n---\nend\n"
    );
}

#[test]
fn rendered_markdown_parses_back_with_expected_structure() {
    let md = render(doc(vec![
        json!({
            "type": "heading",
            "attrs": {"level": 2},
            "content": [text("Findings")],
        }),
        json!({
            "type": "bulletList",
            "content": [list_item("first"), list_item("second"), list_item("third")],
        }),
        json!({
            "type": "codeBlock",
            "attrs": {"language": "rust"},
            "content": [text("let x = 1;")],
        }),
    ]));

    let arena = Arena::new();
    let root = parse_document(&arena, &md, &ComrakOptions::default());
    let mut heading_levels = Vec::new();
    let mut item_count = 0;
    let mut code_info = None;
    for node in root.descendants() {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => heading_levels.push(heading.level),
            NodeValue::Item(_) => item_count += 1,
            NodeValue::CodeBlock(block) => code_info = Some(block.info.clone()),
            _ => {}
        }
    }
    assert_eq!(heading_levels, vec![2]);
    assert_eq!(item_count, 3);
    assert_eq!(code_info.as_deref(), Some("rust"));
}

#[test]
fn convert_str_honors_hard_break_style() {
    let json = serde_json::to_string(&doc(vec![para(vec![
        text("one"),
        json!({"type": "hardBreak"}),
        text("two"),
    ])]))
    .unwrap();

    let md = convert_str(&json, &RenderRules::default()).unwrap();
    assert_eq!(md, "one  \ntwo\n");

    let rules = RenderRules {
        hard_break: HardBreakStyle::Empty,
        ..RenderRules::default()
    };
    assert_eq!(convert_str(&json, &rules).unwrap(), "onetwo\n");
}

#[test]
fn mixed_inline_leaves_in_one_paragraph() {
    let md = render(doc(vec![para(vec![
        json!({"type": "mention", "attrs": {"id": "u1", "text": "@dana"}}),
        text(" set "),
        json!({"type": "status", "attrs": {"text": "DONE", "color": "green"}}),
        text(" on "),
        json!({"type": "date", "attrs": {"timestamp": "1700000000000"}}),
    ])]));
    assert_snapshot!(md.trim_end(), @"@dana set `DONE` on 2023-11-14");
}
