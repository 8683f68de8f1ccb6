//! Typed node variants (structural document elements).
//!
//! Nodes form the document tree: a `doc` root over block nodes over inline
//! nodes. Each variant declares exactly the fields it reads from the wire
//! form; everything else is dropped on parse and therefore absent from
//! [`Node::to_data`] output. The one deliberately lossy family is the table
//! group, which keeps its attrs but not its children.
//!
//! Parsing is recursive descent driven by the `type` tag, see [`parse_node`].
//! With `ignore_errors` set, a child that fails with a data error is skipped
//! and the rest of the sibling list still parses; errors that signal a bug in
//! this library propagate regardless.

use serde_json::{Map, Number, Value};

use crate::data::{self, DataMap};
use crate::error::AdfError;
use crate::model::marks::{parse_mark, Mark};
use crate::tag::NodeType;

/// Attributes of the `paragraph` node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphAttrs {
    pub local_id: Option<String>,
}

/// Attributes of the `heading` node. Levels run 1 through 6.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingAttrs {
    pub level: i64,
    pub local_id: Option<String>,
}

/// Attributes of the `panel` node. The panel type is free-form on the wire
/// (`info`, `note`, `warning`, `error`, `success`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct PanelAttrs {
    pub panel_type: String,
}

/// Attributes shared by `expand` and `nestedExpand`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpandAttrs {
    pub title: Option<String>,
}

/// Attributes of the `orderedList` node. `order` is the starting number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderedListAttrs {
    pub order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskListAttrs {
    pub local_id: Option<String>,
}

/// Attributes of the `taskItem` node. `state` is `TODO` or `DONE`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskItemAttrs {
    pub state: String,
    pub local_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionListAttrs {
    pub local_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionItemAttrs {
    pub local_id: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlockAttrs {
    pub language: Option<String>,
}

/// Attributes of the `mention` inline node.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionAttrs {
    pub id: String,
    pub text: Option<String>,
    pub user_type: Option<String>,
    pub access_level: Option<String>,
}

/// Attributes of the `date` inline node. The timestamp is epoch milliseconds,
/// kept in its wire string form until render time.
#[derive(Debug, Clone, PartialEq)]
pub struct DateAttrs {
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmojiAttrs {
    pub short_name: String,
    pub id: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusAttrs {
    pub text: String,
    pub color: Option<String>,
    pub local_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineCardAttrs {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockCardAttrs {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedCardAttrs {
    pub url: String,
    pub layout: Option<String>,
}

/// Attributes of the `media` node. `media_type` is the wire `type` field
/// (`file`, `link`, `external`), distinct from the node's own type tag.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAttrs {
    pub media_type: String,
    pub id: Option<String>,
    pub collection: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub occurrence_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaSingleAttrs {
    pub layout: String,
    pub width: Option<f64>,
    pub width_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableAttrs {
    pub is_number_column_enabled: Option<bool>,
    pub layout: Option<String>,
    pub local_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCellAttrs {
    pub colspan: Option<i64>,
    pub rowspan: Option<i64>,
    pub background: Option<String>,
}

/// The document root.
#[derive(Debug, Clone, PartialEq)]
pub struct Doc {
    pub version: Option<i64>,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub attrs: Option<ParagraphAttrs>,
    pub content: Option<Vec<Node>>,
    pub marks: Option<Vec<Mark>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub attrs: HeadingAttrs,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub marks: Option<Vec<Mark>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Blockquote {
    pub content: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub attrs: PanelAttrs,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expand {
    pub attrs: ExpandAttrs,
    pub content: Vec<Node>,
    pub marks: Option<Vec<Mark>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NestedExpand {
    pub attrs: Option<ExpandAttrs>,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulletList {
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderedList {
    pub attrs: Option<OrderedListAttrs>,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskList {
    pub attrs: Option<TaskListAttrs>,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskItem {
    pub attrs: TaskItemAttrs,
    pub content: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionList {
    pub attrs: Option<DecisionListAttrs>,
    pub content: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionItem {
    pub attrs: Option<DecisionItemAttrs>,
    pub content: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub attrs: Option<CodeBlockAttrs>,
    pub content: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mention {
    pub attrs: MentionAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateNode {
    pub attrs: DateAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Emoji {
    pub attrs: EmojiAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub attrs: StatusAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineCard {
    pub attrs: InlineCardAttrs,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockCard {
    pub attrs: Option<BlockCardAttrs>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedCard {
    pub attrs: EmbedCardAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub attrs: MediaAttrs,
    pub marks: Option<Vec<Mark>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaGroup {
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaSingle {
    pub attrs: MediaSingleAttrs,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Caption {
    pub content: Option<Vec<Node>>,
}

/// Tables keep their attrs but drop their children: cell-level structure has
/// no faithful rendering here, so it is not modeled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub attrs: Option<TableAttrs>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub attrs: Option<TableCellAttrs>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableHeader {
    pub attrs: Option<TableCellAttrs>,
}

/// A structural document element, one variant per [`NodeType`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    BlockCard(BlockCard),
    Blockquote(Blockquote),
    BulletList(BulletList),
    Caption(Caption),
    CodeBlock(CodeBlock),
    Date(DateNode),
    DecisionItem(DecisionItem),
    DecisionList(DecisionList),
    Doc(Doc),
    EmbedCard(EmbedCard),
    Emoji(Emoji),
    Expand(Expand),
    HardBreak,
    Heading(Heading),
    InlineCard(InlineCard),
    ListItem(ListItem),
    Media(Media),
    MediaGroup(MediaGroup),
    MediaSingle(MediaSingle),
    Mention(Mention),
    NestedExpand(NestedExpand),
    OrderedList(OrderedList),
    Panel(Panel),
    Paragraph(Paragraph),
    Rule,
    Status(Status),
    Table(Table),
    TableCell(TableCell),
    TableHeader(TableHeader),
    TableRow(TableRow),
    TaskItem(TaskItem),
    TaskList(TaskList),
    Text(Text),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::BlockCard(_) => NodeType::BlockCard,
            Node::Blockquote(_) => NodeType::Blockquote,
            Node::BulletList(_) => NodeType::BulletList,
            Node::Caption(_) => NodeType::Caption,
            Node::CodeBlock(_) => NodeType::CodeBlock,
            Node::Date(_) => NodeType::Date,
            Node::DecisionItem(_) => NodeType::DecisionItem,
            Node::DecisionList(_) => NodeType::DecisionList,
            Node::Doc(_) => NodeType::Doc,
            Node::EmbedCard(_) => NodeType::EmbedCard,
            Node::Emoji(_) => NodeType::Emoji,
            Node::Expand(_) => NodeType::Expand,
            Node::HardBreak => NodeType::HardBreak,
            Node::Heading(_) => NodeType::Heading,
            Node::InlineCard(_) => NodeType::InlineCard,
            Node::ListItem(_) => NodeType::ListItem,
            Node::Media(_) => NodeType::Media,
            Node::MediaGroup(_) => NodeType::MediaGroup,
            Node::MediaSingle(_) => NodeType::MediaSingle,
            Node::Mention(_) => NodeType::Mention,
            Node::NestedExpand(_) => NodeType::NestedExpand,
            Node::OrderedList(_) => NodeType::OrderedList,
            Node::Panel(_) => NodeType::Panel,
            Node::Paragraph(_) => NodeType::Paragraph,
            Node::Rule => NodeType::Rule,
            Node::Status(_) => NodeType::Status,
            Node::Table(_) => NodeType::Table,
            Node::TableCell(_) => NodeType::TableCell,
            Node::TableHeader(_) => NodeType::TableHeader,
            Node::TableRow(_) => NodeType::TableRow,
            Node::TaskItem(_) => NodeType::TaskItem,
            Node::TaskList(_) => NodeType::TaskList,
            Node::Text(_) => NodeType::Text,
        }
    }

    /// Construct a typed node from untyped JSON data, rejecting the first
    /// problem found. For the tolerant mode see [`parse_node`].
    pub fn from_data(value: &Value) -> Result<Self, AdfError> {
        parse_node(value, false)
    }

    /// The inverse of [`Node::from_data`] over the declared field subset:
    /// absent optional fields stay absent, unknown input keys do not survive.
    pub fn to_data(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "type".to_string(),
            Value::String(self.node_type().as_str().to_string()),
        );
        match self {
            Node::Doc(node) => {
                if let Some(version) = node.version {
                    map.insert("version".to_string(), Value::Number(version.into()));
                }
                put_content(&mut map, &node.content);
            }
            Node::Paragraph(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    put_opt_str(&mut a, "localId", &attrs.local_id);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
                put_opt_content(&mut map, &node.content);
                put_marks(&mut map, &node.marks);
            }
            Node::Heading(node) => {
                let mut a = Map::new();
                a.insert("level".to_string(), Value::Number(node.attrs.level.into()));
                put_opt_str(&mut a, "localId", &node.attrs.local_id);
                map.insert("attrs".to_string(), Value::Object(a));
                put_content(&mut map, &node.content);
            }
            Node::Text(node) => {
                map.insert("text".to_string(), Value::String(node.text.clone()));
                put_marks(&mut map, &node.marks);
            }
            Node::HardBreak | Node::Rule | Node::TableRow(_) => {}
            Node::Blockquote(node) => put_opt_content(&mut map, &node.content),
            Node::Panel(node) => {
                let mut a = Map::new();
                a.insert(
                    "panelType".to_string(),
                    Value::String(node.attrs.panel_type.clone()),
                );
                map.insert("attrs".to_string(), Value::Object(a));
                put_content(&mut map, &node.content);
            }
            Node::Expand(node) => {
                let mut a = Map::new();
                put_opt_str(&mut a, "title", &node.attrs.title);
                map.insert("attrs".to_string(), Value::Object(a));
                put_content(&mut map, &node.content);
                put_marks(&mut map, &node.marks);
            }
            Node::NestedExpand(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    put_opt_str(&mut a, "title", &attrs.title);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
                put_content(&mut map, &node.content);
            }
            Node::BulletList(node) => put_content(&mut map, &node.content),
            Node::OrderedList(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    if let Some(order) = attrs.order {
                        a.insert("order".to_string(), Value::Number(order.into()));
                    }
                    map.insert("attrs".to_string(), Value::Object(a));
                }
                put_content(&mut map, &node.content);
            }
            Node::ListItem(node) => put_content(&mut map, &node.content),
            Node::TaskList(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    put_opt_str(&mut a, "localId", &attrs.local_id);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
                put_content(&mut map, &node.content);
            }
            Node::TaskItem(node) => {
                let mut a = Map::new();
                a.insert(
                    "state".to_string(),
                    Value::String(node.attrs.state.clone()),
                );
                put_opt_str(&mut a, "localId", &node.attrs.local_id);
                map.insert("attrs".to_string(), Value::Object(a));
                put_opt_content(&mut map, &node.content);
            }
            Node::DecisionList(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    put_opt_str(&mut a, "localId", &attrs.local_id);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
                put_opt_content(&mut map, &node.content);
            }
            Node::DecisionItem(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    put_opt_str(&mut a, "localId", &attrs.local_id);
                    put_opt_str(&mut a, "state", &attrs.state);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
                put_opt_content(&mut map, &node.content);
            }
            Node::CodeBlock(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    put_opt_str(&mut a, "language", &attrs.language);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
                put_opt_content(&mut map, &node.content);
            }
            Node::Mention(node) => {
                let mut a = Map::new();
                a.insert("id".to_string(), Value::String(node.attrs.id.clone()));
                put_opt_str(&mut a, "text", &node.attrs.text);
                put_opt_str(&mut a, "userType", &node.attrs.user_type);
                put_opt_str(&mut a, "accessLevel", &node.attrs.access_level);
                map.insert("attrs".to_string(), Value::Object(a));
            }
            Node::Date(node) => {
                let mut a = Map::new();
                a.insert(
                    "timestamp".to_string(),
                    Value::String(node.attrs.timestamp.clone()),
                );
                map.insert("attrs".to_string(), Value::Object(a));
            }
            Node::Emoji(node) => {
                let mut a = Map::new();
                a.insert(
                    "shortName".to_string(),
                    Value::String(node.attrs.short_name.clone()),
                );
                put_opt_str(&mut a, "id", &node.attrs.id);
                put_opt_str(&mut a, "text", &node.attrs.text);
                map.insert("attrs".to_string(), Value::Object(a));
            }
            Node::Status(node) => {
                let mut a = Map::new();
                a.insert("text".to_string(), Value::String(node.attrs.text.clone()));
                put_opt_str(&mut a, "color", &node.attrs.color);
                put_opt_str(&mut a, "localId", &node.attrs.local_id);
                map.insert("attrs".to_string(), Value::Object(a));
            }
            Node::InlineCard(node) => {
                let mut a = Map::new();
                a.insert("url".to_string(), Value::String(node.attrs.url.clone()));
                map.insert("attrs".to_string(), Value::Object(a));
            }
            Node::BlockCard(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    put_opt_str(&mut a, "url", &attrs.url);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
            }
            Node::EmbedCard(node) => {
                let mut a = Map::new();
                a.insert("url".to_string(), Value::String(node.attrs.url.clone()));
                put_opt_str(&mut a, "layout", &node.attrs.layout);
                map.insert("attrs".to_string(), Value::Object(a));
            }
            Node::Media(node) => {
                let mut a = Map::new();
                a.insert(
                    "type".to_string(),
                    Value::String(node.attrs.media_type.clone()),
                );
                put_opt_str(&mut a, "id", &node.attrs.id);
                put_opt_str(&mut a, "collection", &node.attrs.collection);
                if let Some(width) = node.attrs.width {
                    a.insert("width".to_string(), Value::Number(width.into()));
                }
                if let Some(height) = node.attrs.height {
                    a.insert("height".to_string(), Value::Number(height.into()));
                }
                put_opt_str(&mut a, "occurrenceKey", &node.attrs.occurrence_key);
                map.insert("attrs".to_string(), Value::Object(a));
                put_marks(&mut map, &node.marks);
            }
            Node::MediaGroup(node) => put_content(&mut map, &node.content),
            Node::MediaSingle(node) => {
                let mut a = Map::new();
                a.insert(
                    "layout".to_string(),
                    Value::String(node.attrs.layout.clone()),
                );
                if let Some(width) = node.attrs.width {
                    if let Some(n) = Number::from_f64(width) {
                        a.insert("width".to_string(), Value::Number(n));
                    }
                }
                put_opt_str(&mut a, "widthType", &node.attrs.width_type);
                map.insert("attrs".to_string(), Value::Object(a));
                put_content(&mut map, &node.content);
            }
            Node::Caption(node) => put_opt_content(&mut map, &node.content),
            Node::Table(node) => {
                if let Some(attrs) = &node.attrs {
                    let mut a = Map::new();
                    if let Some(enabled) = attrs.is_number_column_enabled {
                        a.insert("isNumberColumnEnabled".to_string(), Value::Bool(enabled));
                    }
                    put_opt_str(&mut a, "layout", &attrs.layout);
                    put_opt_str(&mut a, "localId", &attrs.local_id);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
            }
            Node::TableCell(TableCell { attrs }) | Node::TableHeader(TableHeader { attrs }) => {
                if let Some(attrs) = attrs {
                    let mut a = Map::new();
                    if let Some(colspan) = attrs.colspan {
                        a.insert("colspan".to_string(), Value::Number(colspan.into()));
                    }
                    if let Some(rowspan) = attrs.rowspan {
                        a.insert("rowspan".to_string(), Value::Number(rowspan.into()));
                    }
                    put_opt_str(&mut a, "background", &attrs.background);
                    map.insert("attrs".to_string(), Value::Object(a));
                }
            }
        }
        Value::Object(map)
    }
}

fn put_opt_str(map: &mut DataMap, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value.clone()));
    }
}

fn put_content(map: &mut DataMap, content: &[Node]) {
    map.insert(
        "content".to_string(),
        Value::Array(content.iter().map(Node::to_data).collect()),
    );
}

fn put_opt_content(map: &mut DataMap, content: &Option<Vec<Node>>) {
    if let Some(content) = content {
        put_content(map, content);
    }
}

fn put_marks(map: &mut DataMap, marks: &Option<Vec<Mark>>) {
    if let Some(marks) = marks {
        map.insert(
            "marks".to_string(),
            Value::Array(marks.iter().map(Mark::to_data).collect()),
        );
    }
}

/// Parse a `content` array if present. With `ignore_errors`, children that
/// fail with data errors are skipped; other errors still propagate.
pub fn parse_children(
    map: &DataMap,
    owner: &'static str,
    ignore_errors: bool,
) -> Result<Option<Vec<Node>>, AdfError> {
    let Some(value) = map.get("content") else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .ok_or_else(|| AdfError::Malformed(format!("{owner}.content is not an array")))?;
    let mut children = Vec::with_capacity(items.len());
    for item in items {
        match parse_node(item, ignore_errors) {
            Ok(child) => children.push(child),
            Err(err) if ignore_errors && err.is_data_error() => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(Some(children))
}

fn req_children(
    map: &DataMap,
    owner: &'static str,
    ignore_errors: bool,
) -> Result<Vec<Node>, AdfError> {
    parse_children(map, owner, ignore_errors)?.ok_or(AdfError::MissingField {
        owner,
        field: "content",
    })
}

/// Parse a `marks` array if present, under the same skip policy as
/// [`parse_children`].
pub fn parse_marks(
    map: &DataMap,
    owner: &'static str,
    ignore_errors: bool,
) -> Result<Option<Vec<Mark>>, AdfError> {
    let Some(value) = map.get("marks") else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .ok_or_else(|| AdfError::Malformed(format!("{owner}.marks is not an array")))?;
    let mut marks = Vec::with_capacity(items.len());
    for item in items {
        match parse_mark(item) {
            Ok(mark) => marks.push(mark),
            Err(err) if ignore_errors && err.is_data_error() => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(Some(marks))
}

fn req_attrs<'a>(map: &'a DataMap, owner: &'static str) -> Result<&'a DataMap, AdfError> {
    match map.get("attrs") {
        None => Err(AdfError::MissingField {
            owner,
            field: "attrs",
        }),
        Some(value) => data::as_object(value, owner),
    }
}

fn opt_attrs<'a>(map: &'a DataMap, owner: &'static str) -> Result<Option<&'a DataMap>, AdfError> {
    map.get("attrs")
        .map(|value| data::as_object(value, owner))
        .transpose()
}

fn expand_attrs(attrs: &DataMap, owner: &'static str) -> Result<ExpandAttrs, AdfError> {
    Ok(ExpandAttrs {
        title: data::opt_str(attrs, "title", owner)?,
    })
}

fn cell_attrs(map: &DataMap, owner: &'static str) -> Result<Option<TableCellAttrs>, AdfError> {
    opt_attrs(map, owner)?
        .map(|attrs| {
            Ok(TableCellAttrs {
                colspan: data::opt_i64(attrs, "colspan", owner)?,
                rowspan: data::opt_i64(attrs, "rowspan", owner)?,
                background: data::opt_str(attrs, "background", owner)?,
            })
        })
        .transpose()
}

/// Parse dispatch for nodes: pick the concrete variant by the `type` tag and
/// recurse into `content` and `marks`.
pub fn parse_node(value: &Value, ignore_errors: bool) -> Result<Node, AdfError> {
    let map = data::as_object(value, "node")?;
    let tag = data::req_str(map, "type", "node")?;
    let Some(node_type) = NodeType::from_str(&tag) else {
        return Err(AdfError::UnknownNodeType(tag));
    };
    let node = match node_type {
        NodeType::Doc => Node::Doc(Doc {
            version: data::opt_i64(map, "version", "doc")?,
            content: req_children(map, "doc", ignore_errors)?,
        }),
        NodeType::Paragraph => Node::Paragraph(Paragraph {
            attrs: opt_attrs(map, "paragraph.attrs")?
                .map(|attrs| {
                    Ok(ParagraphAttrs {
                        local_id: data::opt_str(attrs, "localId", "paragraph")?,
                    })
                })
                .transpose()?,
            content: parse_children(map, "paragraph", ignore_errors)?,
            marks: parse_marks(map, "paragraph", ignore_errors)?,
        }),
        NodeType::Heading => {
            let attrs = req_attrs(map, "heading")?;
            Node::Heading(Heading {
                attrs: HeadingAttrs {
                    level: data::req_i64(attrs, "level", "heading")?,
                    local_id: data::opt_str(attrs, "localId", "heading")?,
                },
                content: req_children(map, "heading", ignore_errors)?,
            })
        }
        NodeType::Text => Node::Text(Text {
            text: data::req_str(map, "text", "text")?,
            marks: parse_marks(map, "text", ignore_errors)?,
        }),
        NodeType::HardBreak => Node::HardBreak,
        NodeType::Rule => Node::Rule,
        NodeType::Blockquote => Node::Blockquote(Blockquote {
            content: parse_children(map, "blockquote", ignore_errors)?,
        }),
        NodeType::Panel => {
            let attrs = req_attrs(map, "panel")?;
            Node::Panel(Panel {
                attrs: PanelAttrs {
                    panel_type: data::req_str(attrs, "panelType", "panel")?,
                },
                content: req_children(map, "panel", ignore_errors)?,
            })
        }
        NodeType::Expand => Node::Expand(Expand {
            attrs: expand_attrs(req_attrs(map, "expand")?, "expand")?,
            content: req_children(map, "expand", ignore_errors)?,
            marks: parse_marks(map, "expand", ignore_errors)?,
        }),
        NodeType::NestedExpand => Node::NestedExpand(NestedExpand {
            attrs: opt_attrs(map, "nestedExpand.attrs")?
                .map(|attrs| expand_attrs(attrs, "nestedExpand"))
                .transpose()?,
            content: req_children(map, "nestedExpand", ignore_errors)?,
        }),
        NodeType::BulletList => Node::BulletList(BulletList {
            content: req_children(map, "bulletList", ignore_errors)?,
        }),
        NodeType::OrderedList => Node::OrderedList(OrderedList {
            attrs: opt_attrs(map, "orderedList.attrs")?
                .map(|attrs| {
                    Ok(OrderedListAttrs {
                        order: data::opt_i64(attrs, "order", "orderedList")?,
                    })
                })
                .transpose()?,
            content: req_children(map, "orderedList", ignore_errors)?,
        }),
        NodeType::ListItem => Node::ListItem(ListItem {
            content: req_children(map, "listItem", ignore_errors)?,
        }),
        NodeType::TaskList => Node::TaskList(TaskList {
            attrs: opt_attrs(map, "taskList.attrs")?
                .map(|attrs| {
                    Ok(TaskListAttrs {
                        local_id: data::opt_str(attrs, "localId", "taskList")?,
                    })
                })
                .transpose()?,
            content: req_children(map, "taskList", ignore_errors)?,
        }),
        NodeType::TaskItem => {
            let attrs = req_attrs(map, "taskItem")?;
            Node::TaskItem(TaskItem {
                attrs: TaskItemAttrs {
                    state: data::req_str(attrs, "state", "taskItem")?,
                    local_id: data::opt_str(attrs, "localId", "taskItem")?,
                },
                content: parse_children(map, "taskItem", ignore_errors)?,
            })
        }
        NodeType::DecisionList => Node::DecisionList(DecisionList {
            attrs: opt_attrs(map, "decisionList.attrs")?
                .map(|attrs| {
                    Ok(DecisionListAttrs {
                        local_id: data::opt_str(attrs, "localId", "decisionList")?,
                    })
                })
                .transpose()?,
            content: parse_children(map, "decisionList", ignore_errors)?,
        }),
        NodeType::DecisionItem => Node::DecisionItem(DecisionItem {
            attrs: opt_attrs(map, "decisionItem.attrs")?
                .map(|attrs| {
                    Ok(DecisionItemAttrs {
                        local_id: data::opt_str(attrs, "localId", "decisionItem")?,
                        state: data::opt_str(attrs, "state", "decisionItem")?,
                    })
                })
                .transpose()?,
            content: parse_children(map, "decisionItem", ignore_errors)?,
        }),
        NodeType::CodeBlock => Node::CodeBlock(CodeBlock {
            attrs: opt_attrs(map, "codeBlock.attrs")?
                .map(|attrs| {
                    Ok(CodeBlockAttrs {
                        language: data::opt_str(attrs, "language", "codeBlock")?,
                    })
                })
                .transpose()?,
            content: parse_children(map, "codeBlock", ignore_errors)?,
        }),
        NodeType::Mention => {
            let attrs = req_attrs(map, "mention")?;
            Node::Mention(Mention {
                attrs: MentionAttrs {
                    id: data::req_str(attrs, "id", "mention")?,
                    text: data::opt_str(attrs, "text", "mention")?,
                    user_type: data::opt_str(attrs, "userType", "mention")?,
                    access_level: data::opt_str(attrs, "accessLevel", "mention")?,
                },
            })
        }
        NodeType::Date => {
            let attrs = req_attrs(map, "date")?;
            Node::Date(DateNode {
                attrs: DateAttrs {
                    timestamp: data::req_stringy(attrs, "timestamp", "date")?,
                },
            })
        }
        NodeType::Emoji => {
            let attrs = req_attrs(map, "emoji")?;
            Node::Emoji(Emoji {
                attrs: EmojiAttrs {
                    short_name: data::req_str(attrs, "shortName", "emoji")?,
                    id: data::opt_str(attrs, "id", "emoji")?,
                    text: data::opt_str(attrs, "text", "emoji")?,
                },
            })
        }
        NodeType::Status => {
            let attrs = req_attrs(map, "status")?;
            Node::Status(Status {
                attrs: StatusAttrs {
                    text: data::req_str(attrs, "text", "status")?,
                    color: data::opt_str(attrs, "color", "status")?,
                    local_id: data::opt_str(attrs, "localId", "status")?,
                },
            })
        }
        NodeType::InlineCard => {
            let attrs = req_attrs(map, "inlineCard")?;
            Node::InlineCard(InlineCard {
                attrs: InlineCardAttrs {
                    url: data::req_str(attrs, "url", "inlineCard")?,
                },
            })
        }
        NodeType::BlockCard => Node::BlockCard(BlockCard {
            attrs: opt_attrs(map, "blockCard.attrs")?
                .map(|attrs| {
                    Ok(BlockCardAttrs {
                        url: data::opt_str(attrs, "url", "blockCard")?,
                    })
                })
                .transpose()?,
        }),
        NodeType::EmbedCard => {
            let attrs = req_attrs(map, "embedCard")?;
            Node::EmbedCard(EmbedCard {
                attrs: EmbedCardAttrs {
                    url: data::req_str(attrs, "url", "embedCard")?,
                    layout: data::opt_str(attrs, "layout", "embedCard")?,
                },
            })
        }
        NodeType::Media => {
            let attrs = req_attrs(map, "media")?;
            Node::Media(Media {
                attrs: MediaAttrs {
                    media_type: data::req_str(attrs, "type", "media")?,
                    id: data::opt_str(attrs, "id", "media")?,
                    collection: data::opt_str(attrs, "collection", "media")?,
                    width: data::opt_i64(attrs, "width", "media")?,
                    height: data::opt_i64(attrs, "height", "media")?,
                    occurrence_key: data::opt_str(attrs, "occurrenceKey", "media")?,
                },
                marks: parse_marks(map, "media", ignore_errors)?,
            })
        }
        NodeType::MediaGroup => Node::MediaGroup(MediaGroup {
            content: req_children(map, "mediaGroup", ignore_errors)?,
        }),
        NodeType::MediaSingle => {
            let attrs = req_attrs(map, "mediaSingle")?;
            Node::MediaSingle(MediaSingle {
                attrs: MediaSingleAttrs {
                    layout: data::req_str(attrs, "layout", "mediaSingle")?,
                    width: data::opt_f64(attrs, "width", "mediaSingle")?,
                    width_type: data::opt_str(attrs, "widthType", "mediaSingle")?,
                },
                content: req_children(map, "mediaSingle", ignore_errors)?,
            })
        }
        NodeType::Caption => Node::Caption(Caption {
            content: parse_children(map, "caption", ignore_errors)?,
        }),
        NodeType::Table => Node::Table(Table {
            attrs: opt_attrs(map, "table.attrs")?
                .map(|attrs| {
                    Ok(TableAttrs {
                        is_number_column_enabled: data::opt_bool(
                            attrs,
                            "isNumberColumnEnabled",
                            "table",
                        )?,
                        layout: data::opt_str(attrs, "layout", "table")?,
                        local_id: data::opt_str(attrs, "localId", "table")?,
                    })
                })
                .transpose()?,
        }),
        NodeType::TableRow => Node::TableRow(TableRow {}),
        NodeType::TableCell => Node::TableCell(TableCell {
            attrs: cell_attrs(map, "tableCell")?,
        }),
        NodeType::TableHeader => Node::TableHeader(TableHeader {
            attrs: cell_attrs(map, "tableHeader")?,
        }),
    };
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Value {
        json!({"type": "text", "text": s})
    }

    #[test]
    fn parse_minimal_doc() {
        let input = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [text("Hello")]},
            ],
        });
        let node = Node::from_data(&input).unwrap();
        let Node::Doc(doc) = &node else {
            panic!("expected doc, got {node:?}");
        };
        assert_eq!(doc.version, Some(1));
        assert_eq!(doc.content.len(), 1);
        assert_eq!(node.to_data(), input);
    }

    #[test]
    fn doc_without_content_is_missing_field() {
        let err = Node::from_data(&json!({"type": "doc", "version": 1})).unwrap_err();
        assert_eq!(
            err,
            AdfError::MissingField {
                owner: "doc",
                field: "content",
            }
        );
    }

    #[test]
    fn unknown_node_type_carries_the_tag() {
        let err = Node::from_data(&json!({"type": "futureNode"})).unwrap_err();
        assert_eq!(err, AdfError::UnknownNodeType("futureNode".to_string()));
    }

    #[test]
    fn heading_requires_level() {
        let err = Node::from_data(&json!({
            "type": "heading",
            "attrs": {},
            "content": [text("Title")],
        }))
        .unwrap_err();
        assert_eq!(
            err,
            AdfError::MissingField {
                owner: "heading",
                field: "level",
            }
        );
    }

    #[test]
    fn text_with_marks_round_trips() {
        let input = json!({
            "type": "text",
            "text": "bold link",
            "marks": [
                {"type": "strong"},
                {"type": "link", "attrs": {"href": "https://example.com"}},
            ],
        });
        let node = Node::from_data(&input).unwrap();
        assert_eq!(node.to_data(), input);
    }

    #[test]
    fn unknown_input_keys_do_not_round_trip() {
        let node = Node::from_data(&json!({
            "type": "paragraph",
            "content": [text("hi")],
            "futureField": 7,
        }))
        .unwrap();
        assert_eq!(
            node.to_data(),
            json!({"type": "paragraph", "content": [text("hi")]})
        );
    }

    #[test]
    fn absent_optional_content_stays_absent() {
        let input = json!({"type": "blockquote"});
        let node = Node::from_data(&input).unwrap();
        assert_eq!(node, Node::Blockquote(Blockquote { content: None }));
        assert_eq!(node.to_data(), input);
    }

    #[test]
    fn table_children_are_dropped() {
        let node = Node::from_data(&json!({
            "type": "table",
            "attrs": {"layout": "default"},
            "content": [{"type": "tableRow", "content": []}],
        }))
        .unwrap();
        assert_eq!(
            node.to_data(),
            json!({"type": "table", "attrs": {"layout": "default"}})
        );
    }

    #[test]
    fn task_and_decision_round_trip() {
        let input = json!({
            "type": "taskList",
            "attrs": {"localId": "tl-1"},
            "content": [
                {
                    "type": "taskItem",
                    "attrs": {"state": "DONE", "localId": "ti-1"},
                    "content": [text("ship it")],
                },
            ],
        });
        assert_eq!(Node::from_data(&input).unwrap().to_data(), input);

        let input = json!({
            "type": "decisionList",
            "content": [
                {
                    "type": "decisionItem",
                    "attrs": {"state": "DECIDED"},
                    "content": [text("use JSON")],
                },
            ],
        });
        assert_eq!(Node::from_data(&input).unwrap().to_data(), input);
    }

    #[test]
    fn strict_parse_rejects_bad_children() {
        let input = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [text("ok")]},
                {"type": "futureNode"},
            ],
        });
        let err = parse_node(&input, false).unwrap_err();
        assert_eq!(err, AdfError::UnknownNodeType("futureNode".to_string()));
    }

    #[test]
    fn tolerant_parse_skips_bad_children() {
        let input = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [text("ok")]},
                {"type": "futureNode"},
                {"type": "text"},
                {"type": "paragraph", "content": [text("also ok")]},
            ],
        });
        let Node::Doc(doc) = parse_node(&input, true).unwrap() else {
            panic!("expected doc");
        };
        assert_eq!(doc.content.len(), 2);
    }

    #[test]
    fn tolerant_parse_skips_bad_marks() {
        let input = json!({
            "type": "text",
            "text": "hi",
            "marks": [
                {"type": "glow"},
                {"type": "strong"},
            ],
        });
        let Node::Text(node) = parse_node(&input, true).unwrap() else {
            panic!("expected text");
        };
        assert_eq!(node.marks, Some(vec![Mark::Strong]));
    }

    #[test]
    fn media_single_parses_fractional_width() {
        let input = json!({
            "type": "mediaSingle",
            "attrs": {"layout": "center", "width": 66.67},
            "content": [{
                "type": "media",
                "attrs": {"type": "file", "id": "m-1", "collection": "c"},
            }],
        });
        let Node::MediaSingle(node) = Node::from_data(&input).unwrap() else {
            panic!("expected mediaSingle");
        };
        assert_eq!(node.attrs.width, Some(66.67));
        assert_eq!(node.content.len(), 1);
    }

    #[test]
    fn date_timestamp_normalizes_to_string() {
        let node = Node::from_data(&json!({
            "type": "date",
            "attrs": {"timestamp": 1700000000000i64},
        }))
        .unwrap();
        assert_eq!(
            node.to_data(),
            json!({"type": "date", "attrs": {"timestamp": "1700000000000"}})
        );
    }
}
