//! The closed set of node and mark type tags defined by the document format.
//!
//! These enums are the dispatch table for [`crate::model::parse_node`] and
//! [`crate::model::parse_mark`]. They are compile-time constants; there is no
//! runtime registration, so concurrent readers never need synchronization.

/// Type tag of a structural document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    BlockCard,
    Blockquote,
    BulletList,
    Caption,
    CodeBlock,
    Date,
    DecisionItem,
    DecisionList,
    Doc,
    EmbedCard,
    Emoji,
    Expand,
    HardBreak,
    Heading,
    InlineCard,
    ListItem,
    Media,
    MediaGroup,
    MediaSingle,
    Mention,
    NestedExpand,
    OrderedList,
    Panel,
    Paragraph,
    Rule,
    Status,
    Table,
    TableCell,
    TableHeader,
    TableRow,
    TaskItem,
    TaskList,
    Text,
}

impl NodeType {
    /// The wire tag as it appears in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::BlockCard => "blockCard",
            NodeType::Blockquote => "blockquote",
            NodeType::BulletList => "bulletList",
            NodeType::Caption => "caption",
            NodeType::CodeBlock => "codeBlock",
            NodeType::Date => "date",
            NodeType::DecisionItem => "decisionItem",
            NodeType::DecisionList => "decisionList",
            NodeType::Doc => "doc",
            NodeType::EmbedCard => "embedCard",
            NodeType::Emoji => "emoji",
            NodeType::Expand => "expand",
            NodeType::HardBreak => "hardBreak",
            NodeType::Heading => "heading",
            NodeType::InlineCard => "inlineCard",
            NodeType::ListItem => "listItem",
            NodeType::Media => "media",
            NodeType::MediaGroup => "mediaGroup",
            NodeType::MediaSingle => "mediaSingle",
            NodeType::Mention => "mention",
            NodeType::NestedExpand => "nestedExpand",
            NodeType::OrderedList => "orderedList",
            NodeType::Panel => "panel",
            NodeType::Paragraph => "paragraph",
            NodeType::Rule => "rule",
            NodeType::Status => "status",
            NodeType::Table => "table",
            NodeType::TableCell => "tableCell",
            NodeType::TableHeader => "tableHeader",
            NodeType::TableRow => "tableRow",
            NodeType::TaskItem => "taskItem",
            NodeType::TaskList => "taskList",
            NodeType::Text => "text",
        }
    }

    /// Look up a wire tag. Returns `None` for tags this library does not know.
    pub fn from_str(tag: &str) -> Option<Self> {
        let node_type = match tag {
            "blockCard" => NodeType::BlockCard,
            "blockquote" => NodeType::Blockquote,
            "bulletList" => NodeType::BulletList,
            "caption" => NodeType::Caption,
            "codeBlock" => NodeType::CodeBlock,
            "date" => NodeType::Date,
            "decisionItem" => NodeType::DecisionItem,
            "decisionList" => NodeType::DecisionList,
            "doc" => NodeType::Doc,
            "embedCard" => NodeType::EmbedCard,
            "emoji" => NodeType::Emoji,
            "expand" => NodeType::Expand,
            "hardBreak" => NodeType::HardBreak,
            "heading" => NodeType::Heading,
            "inlineCard" => NodeType::InlineCard,
            "listItem" => NodeType::ListItem,
            "media" => NodeType::Media,
            "mediaGroup" => NodeType::MediaGroup,
            "mediaSingle" => NodeType::MediaSingle,
            "mention" => NodeType::Mention,
            "nestedExpand" => NodeType::NestedExpand,
            "orderedList" => NodeType::OrderedList,
            "panel" => NodeType::Panel,
            "paragraph" => NodeType::Paragraph,
            "rule" => NodeType::Rule,
            "status" => NodeType::Status,
            "table" => NodeType::Table,
            "tableCell" => NodeType::TableCell,
            "tableHeader" => NodeType::TableHeader,
            "tableRow" => NodeType::TableRow,
            "taskItem" => NodeType::TaskItem,
            "taskList" => NodeType::TaskList,
            "text" => NodeType::Text,
            _ => return None,
        };
        Some(node_type)
    }
}

/// Type tag of a formatting annotation attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkType {
    Annotation,
    BackgroundColor,
    Breakout,
    Code,
    Em,
    Indentation,
    Link,
    Strike,
    Strong,
    Subsup,
    TextColor,
    Underline,
}

impl MarkType {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkType::Annotation => "annotation",
            MarkType::BackgroundColor => "backgroundColor",
            MarkType::Breakout => "breakout",
            MarkType::Code => "code",
            MarkType::Em => "em",
            MarkType::Indentation => "indentation",
            MarkType::Link => "link",
            MarkType::Strike => "strike",
            MarkType::Strong => "strong",
            MarkType::Subsup => "subsup",
            MarkType::TextColor => "textColor",
            MarkType::Underline => "underline",
        }
    }

    pub fn from_str(tag: &str) -> Option<Self> {
        let mark_type = match tag {
            "annotation" => MarkType::Annotation,
            "backgroundColor" => MarkType::BackgroundColor,
            "breakout" => MarkType::Breakout,
            "code" => MarkType::Code,
            "em" => MarkType::Em,
            "indentation" => MarkType::Indentation,
            "link" => MarkType::Link,
            "strike" => MarkType::Strike,
            "strong" => MarkType::Strong,
            "subsup" => MarkType::Subsup,
            "textColor" => MarkType::TextColor,
            "underline" => MarkType::Underline,
            _ => return None,
        };
        Some(mark_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE_TAGS: &[&str] = &[
        "blockCard",
        "blockquote",
        "bulletList",
        "caption",
        "codeBlock",
        "date",
        "decisionItem",
        "decisionList",
        "doc",
        "embedCard",
        "emoji",
        "expand",
        "hardBreak",
        "heading",
        "inlineCard",
        "listItem",
        "media",
        "mediaGroup",
        "mediaSingle",
        "mention",
        "nestedExpand",
        "orderedList",
        "panel",
        "paragraph",
        "rule",
        "status",
        "table",
        "tableCell",
        "tableHeader",
        "tableRow",
        "taskItem",
        "taskList",
        "text",
    ];

    const MARK_TAGS: &[&str] = &[
        "annotation",
        "backgroundColor",
        "breakout",
        "code",
        "em",
        "indentation",
        "link",
        "strike",
        "strong",
        "subsup",
        "textColor",
        "underline",
    ];

    #[test]
    fn node_tags_round_trip() {
        for tag in NODE_TAGS {
            let node_type = NodeType::from_str(tag).expect(tag);
            assert_eq!(node_type.as_str(), *tag);
        }
    }

    #[test]
    fn mark_tags_round_trip() {
        for tag in MARK_TAGS {
            let mark_type = MarkType::from_str(tag).expect(tag);
            assert_eq!(mark_type.as_str(), *tag);
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert_eq!(NodeType::from_str("futureNode"), None);
        assert_eq!(NodeType::from_str("Paragraph"), None);
        assert_eq!(MarkType::from_str("glow"), None);
    }
}
