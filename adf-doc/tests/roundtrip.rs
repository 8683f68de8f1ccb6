//! Structural round-trip and serializer properties.

use adf_doc::model::parse_node;
use adf_doc::{Mark, Node, RenderRules};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn full_document_survives_a_data_round_trip() {
    let input = json!({
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "heading", "attrs": {"level": 3},
             "content": [{"type": "text", "text": "Notes"}]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "see "},
                {"type": "text", "text": "here",
                 "marks": [{"type": "link", "attrs": {"href": "https://example.com"}}]},
            ]},
            {"type": "taskList", "attrs": {"localId": "tl"}, "content": [
                {"type": "taskItem", "attrs": {"state": "TODO"},
                 "content": [{"type": "text", "text": "follow up"}]},
            ]},
        ],
    });
    let node = Node::from_data(&input).unwrap();
    assert_eq!(node.to_data(), input);
    // Parsing the re-serialized form yields the same tree.
    assert_eq!(Node::from_data(&node.to_data()).unwrap(), node);
}

proptest! {
    #[test]
    fn pass_through_marks_change_nothing(s in ".*") {
        prop_assert_eq!(Mark::Underline.to_markdown(&s).unwrap(), s.clone());
        prop_assert_eq!(
            Mark::TextColor(None).to_markdown(&s).unwrap(),
            s.clone()
        );
    }

    #[test]
    fn text_nodes_round_trip(s in ".*") {
        let input = json!({"type": "text", "text": s});
        let node = Node::from_data(&input).unwrap();
        prop_assert_eq!(node.to_data(), input);
    }

    #[test]
    fn code_mark_wraps_plain_text(s in "[a-zA-Z0-9 ][a-zA-Z0-9 ]*") {
        let md = Mark::Code.to_markdown(&s).unwrap();
        prop_assert_eq!(md, format!("`{s}`"));
    }

    #[test]
    fn heading_prefix_matches_level(level in 1i64..=6) {
        let input = json!({
            "type": "heading",
            "attrs": {"level": level},
            "content": [{"type": "text", "text": "T"}],
        });
        let md = parse_node(&input, false)
            .unwrap()
            .to_markdown(&RenderRules::default())
            .unwrap();
        prop_assert_eq!(md, format!("\n\n{} T\n\n", "#".repeat(level as usize)));
    }
}
