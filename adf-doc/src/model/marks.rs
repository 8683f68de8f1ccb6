//! Typed mark variants (formatting annotations).
//!
//! Marks are leaves: they never contain nodes or other marks. At render time
//! each mark acts as a text transformation (see the Markdown serializer);
//! here they are pure data parsed from and serialized back to untyped JSON.

use serde_json::{Map, Value};

use crate::data::{self, DataMap};
use crate::error::AdfError;
use crate::tag::MarkType;

/// Attributes of the `link` mark.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAttrs {
    pub href: String,
    pub title: Option<String>,
    pub id: Option<String>,
    pub collection: Option<String>,
    pub occurrence_key: Option<String>,
}

impl LinkAttrs {
    fn from_data(value: &Value) -> Result<Self, AdfError> {
        let map = data::as_object(value, "link.attrs")?;
        Ok(LinkAttrs {
            href: data::req_str(map, "href", "link")?,
            title: data::opt_str(map, "title", "link")?,
            id: data::opt_str(map, "id", "link")?,
            collection: data::opt_str(map, "collection", "link")?,
            occurrence_key: data::opt_str(map, "occurrenceKey", "link")?,
        })
    }

    fn to_data(&self) -> Value {
        let mut map = Map::new();
        map.insert("href".to_string(), Value::String(self.href.clone()));
        if let Some(title) = &self.title {
            map.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(id) = &self.id {
            map.insert("id".to_string(), Value::String(id.clone()));
        }
        if let Some(collection) = &self.collection {
            map.insert("collection".to_string(), Value::String(collection.clone()));
        }
        if let Some(key) = &self.occurrence_key {
            map.insert("occurrenceKey".to_string(), Value::String(key.clone()));
        }
        Value::Object(map)
    }
}

/// Attributes shared by the `textColor` and `backgroundColor` marks.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAttrs {
    pub color: Option<String>,
}

impl ColorAttrs {
    fn from_data(value: &Value, owner: &'static str) -> Result<Self, AdfError> {
        let map = data::as_object(value, owner)?;
        Ok(ColorAttrs {
            color: data::opt_str(map, "color", owner)?,
        })
    }

    fn to_data(&self) -> Value {
        let mut map = Map::new();
        if let Some(color) = &self.color {
            map.insert("color".to_string(), Value::String(color.clone()));
        }
        Value::Object(map)
    }
}

/// Whether a `subsup` mark lowers or raises its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsupKind {
    Sub,
    Sup,
}

impl SubsupKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SubsupKind::Sub => "sub",
            SubsupKind::Sup => "sup",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubsupAttrs {
    pub kind: SubsupKind,
}

impl SubsupAttrs {
    fn from_data(value: &Value) -> Result<Self, AdfError> {
        let map = data::as_object(value, "subsup.attrs")?;
        let kind = match data::req_str(map, "type", "subsup")?.as_str() {
            "sub" => SubsupKind::Sub,
            "sup" => SubsupKind::Sup,
            other => {
                return Err(AdfError::Malformed(format!(
                    "subsup.type must be 'sub' or 'sup', got '{other}'"
                )))
            }
        };
        Ok(SubsupAttrs { kind })
    }

    fn to_data(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "type".to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        Value::Object(map)
    }
}

/// Attributes of the non-visual `annotation` mark.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationAttrs {
    pub id: String,
    pub annotation_type: Option<String>,
}

impl AnnotationAttrs {
    fn from_data(value: &Value) -> Result<Self, AdfError> {
        let map = data::as_object(value, "annotation.attrs")?;
        Ok(AnnotationAttrs {
            id: data::req_str(map, "id", "annotation")?,
            annotation_type: data::opt_str(map, "annotationType", "annotation")?,
        })
    }

    fn to_data(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        if let Some(kind) = &self.annotation_type {
            map.insert("annotationType".to_string(), Value::String(kind.clone()));
        }
        Value::Object(map)
    }
}

/// Attributes of the `indentation` mark. `level` counts tab stops.
#[derive(Debug, Clone, PartialEq)]
pub struct IndentationAttrs {
    pub level: i64,
}

impl IndentationAttrs {
    fn from_data(value: &Value) -> Result<Self, AdfError> {
        let map = data::as_object(value, "indentation.attrs")?;
        Ok(IndentationAttrs {
            level: data::req_i64(map, "level", "indentation")?,
        })
    }

    fn to_data(&self) -> Value {
        let mut map = Map::new();
        map.insert("level".to_string(), Value::Number(self.level.into()));
        Value::Object(map)
    }
}

/// Attributes of the `breakout` layout mark.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakoutAttrs {
    pub mode: String,
    pub width: Option<i64>,
}

impl BreakoutAttrs {
    fn from_data(value: &Value) -> Result<Self, AdfError> {
        let map = data::as_object(value, "breakout.attrs")?;
        Ok(BreakoutAttrs {
            mode: data::req_str(map, "mode", "breakout")?,
            width: data::opt_i64(map, "width", "breakout")?,
        })
    }

    fn to_data(&self) -> Value {
        let mut map = Map::new();
        map.insert("mode".to_string(), Value::String(self.mode.clone()));
        if let Some(width) = self.width {
            map.insert("width".to_string(), Value::Number(width.into()));
        }
        Value::Object(map)
    }
}

/// A formatting annotation attached to a node, almost always a text node.
///
/// The variants form a closed union over [`MarkType`]. Marks are immutable
/// once parsed and owned by the node whose `marks` list holds them.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Annotation(AnnotationAttrs),
    BackgroundColor(Option<ColorAttrs>),
    Breakout(Option<BreakoutAttrs>),
    Code,
    Em,
    Indentation(IndentationAttrs),
    Link(LinkAttrs),
    Strike,
    Strong,
    Subsup(SubsupAttrs),
    TextColor(Option<ColorAttrs>),
    Underline,
}

impl Mark {
    pub fn mark_type(&self) -> MarkType {
        match self {
            Mark::Annotation(_) => MarkType::Annotation,
            Mark::BackgroundColor(_) => MarkType::BackgroundColor,
            Mark::Breakout(_) => MarkType::Breakout,
            Mark::Code => MarkType::Code,
            Mark::Em => MarkType::Em,
            Mark::Indentation(_) => MarkType::Indentation,
            Mark::Link(_) => MarkType::Link,
            Mark::Strike => MarkType::Strike,
            Mark::Strong => MarkType::Strong,
            Mark::Subsup(_) => MarkType::Subsup,
            Mark::TextColor(_) => MarkType::TextColor,
            Mark::Underline => MarkType::Underline,
        }
    }

    /// Construct a typed mark from untyped JSON data.
    pub fn from_data(value: &Value) -> Result<Self, AdfError> {
        parse_mark(value)
    }

    /// The inverse of [`Mark::from_data`]: untyped JSON with absent fields omitted.
    pub fn to_data(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "type".to_string(),
            Value::String(self.mark_type().as_str().to_string()),
        );
        let attrs = match self {
            Mark::Annotation(attrs) => Some(attrs.to_data()),
            Mark::BackgroundColor(attrs) => attrs.as_ref().map(ColorAttrs::to_data),
            Mark::Breakout(attrs) => attrs.as_ref().map(BreakoutAttrs::to_data),
            Mark::Indentation(attrs) => Some(attrs.to_data()),
            Mark::Link(attrs) => Some(attrs.to_data()),
            Mark::Subsup(attrs) => Some(attrs.to_data()),
            Mark::TextColor(attrs) => attrs.as_ref().map(ColorAttrs::to_data),
            Mark::Code | Mark::Em | Mark::Strike | Mark::Strong | Mark::Underline => None,
        };
        if let Some(attrs) = attrs {
            map.insert("attrs".to_string(), attrs);
        }
        Value::Object(map)
    }
}

fn req_attrs<'a>(map: &'a DataMap, owner: &'static str) -> Result<&'a Value, AdfError> {
    map.get("attrs").ok_or(AdfError::MissingField {
        owner,
        field: "attrs",
    })
}

/// Parse dispatch for marks: pick the concrete variant by the `type` tag.
pub fn parse_mark(value: &Value) -> Result<Mark, AdfError> {
    let map = data::as_object(value, "mark")?;
    let tag = data::req_str(map, "type", "mark")?;
    let Some(mark_type) = MarkType::from_str(&tag) else {
        return Err(AdfError::UnknownMarkType(tag));
    };
    let mark = match mark_type {
        MarkType::Annotation => {
            Mark::Annotation(AnnotationAttrs::from_data(req_attrs(map, "annotation")?)?)
        }
        MarkType::BackgroundColor => Mark::BackgroundColor(
            map.get("attrs")
                .map(|v| ColorAttrs::from_data(v, "backgroundColor.attrs"))
                .transpose()?,
        ),
        MarkType::Breakout => Mark::Breakout(
            map.get("attrs")
                .map(BreakoutAttrs::from_data)
                .transpose()?,
        ),
        MarkType::Code => Mark::Code,
        MarkType::Em => Mark::Em,
        MarkType::Indentation => {
            Mark::Indentation(IndentationAttrs::from_data(req_attrs(map, "indentation")?)?)
        }
        MarkType::Link => Mark::Link(LinkAttrs::from_data(req_attrs(map, "link")?)?),
        MarkType::Strike => Mark::Strike,
        MarkType::Strong => Mark::Strong,
        MarkType::Subsup => Mark::Subsup(SubsupAttrs::from_data(req_attrs(map, "subsup")?)?),
        MarkType::TextColor => Mark::TextColor(
            map.get("attrs")
                .map(|v| ColorAttrs::from_data(v, "textColor.attrs"))
                .transpose()?,
        ),
        MarkType::Underline => Mark::Underline,
    };
    Ok(mark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_bare_marks() {
        for tag in ["strong", "em", "code", "strike", "underline"] {
            let mark = parse_mark(&json!({"type": tag})).unwrap();
            assert_eq!(mark.mark_type().as_str(), tag);
        }
    }

    #[test]
    fn parse_link_requires_href() {
        let err = parse_mark(&json!({"type": "link", "attrs": {"title": "t"}})).unwrap_err();
        assert_eq!(
            err,
            AdfError::MissingField {
                owner: "link",
                field: "href",
            }
        );

        let err = parse_mark(&json!({"type": "link"})).unwrap_err();
        assert_eq!(
            err,
            AdfError::MissingField {
                owner: "link",
                field: "attrs",
            }
        );
    }

    #[test]
    fn parse_unknown_mark_type() {
        let err = parse_mark(&json!({"type": "glow"})).unwrap_err();
        assert_eq!(err, AdfError::UnknownMarkType("glow".to_string()));
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let mark = parse_mark(&json!({
            "type": "strong",
            "futureField": {"nested": true},
        }))
        .unwrap();
        assert_eq!(mark, Mark::Strong);
        assert_eq!(mark.to_data(), json!({"type": "strong"}));
    }

    #[test]
    fn round_trip_link_with_optional_fields() {
        let input = json!({
            "type": "link",
            "attrs": {
                "href": "https://example.com",
                "title": "Example",
            },
        });
        let mark = parse_mark(&input).unwrap();
        assert_eq!(mark.to_data(), input);

        // Absent title stays absent, not empty.
        let input = json!({
            "type": "link",
            "attrs": {"href": "https://example.com"},
        });
        let mark = parse_mark(&input).unwrap();
        assert_eq!(mark.to_data(), input);
    }

    #[test]
    fn round_trip_subsup() {
        let input = json!({"type": "subsup", "attrs": {"type": "sup"}});
        let mark = parse_mark(&input).unwrap();
        assert_eq!(
            mark,
            Mark::Subsup(SubsupAttrs {
                kind: SubsupKind::Sup,
            })
        );
        assert_eq!(mark.to_data(), input);

        let err = parse_mark(&json!({"type": "subsup", "attrs": {"type": "mid"}})).unwrap_err();
        assert!(matches!(err, AdfError::Malformed(_)));
    }

    #[test]
    fn round_trip_annotation_and_indentation() {
        let input = json!({
            "type": "annotation",
            "attrs": {"id": "abc-123", "annotationType": "inlineComment"},
        });
        assert_eq!(parse_mark(&input).unwrap().to_data(), input);

        let input = json!({"type": "indentation", "attrs": {"level": 2}});
        assert_eq!(parse_mark(&input).unwrap().to_data(), input);
    }

    #[test]
    fn round_trip_breakout() {
        let input = json!({"type": "breakout", "attrs": {"mode": "wide", "width": 1800}});
        assert_eq!(parse_mark(&input).unwrap().to_data(), input);

        // Attrs are optional on breakout and stay absent when omitted.
        let input = json!({"type": "breakout"});
        let mark = parse_mark(&input).unwrap();
        assert_eq!(mark, Mark::Breakout(None));
        assert_eq!(mark.to_data(), input);
    }

    #[test]
    fn color_marks_tolerate_missing_attrs() {
        let input = json!({"type": "textColor"});
        let mark = parse_mark(&input).unwrap();
        assert_eq!(mark, Mark::TextColor(None));
        assert_eq!(mark.to_data(), input);

        let input = json!({"type": "backgroundColor", "attrs": {"color": "#deebff"}});
        assert_eq!(parse_mark(&input).unwrap().to_data(), input);
    }
}
