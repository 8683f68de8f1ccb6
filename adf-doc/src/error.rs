//! Error types for parsing and rendering ADF documents

use std::fmt;

/// Errors that can occur while parsing ADF data or rendering it as Markdown
#[derive(Debug, Clone, PartialEq)]
pub enum AdfError {
    /// The `type` discriminator names a node variant this library does not know
    UnknownNodeType(String),
    /// The `type` discriminator names a mark variant this library does not know
    UnknownMarkType(String),
    /// A required field was absent from the input data
    MissingField {
        owner: &'static str,
        field: &'static str,
    },
    /// The input data had the wrong shape (not an object, content not an array, ...)
    Malformed(String),
    /// A render-time Markdown constraint was violated (e.g. newline in inline code)
    MarkdownIncompatible(String),
    /// A node variant has no Markdown rendering defined. Signals an incomplete
    /// implementation, not bad data, and is never absorbed by ignore-errors joins.
    UnimplementedRender(&'static str),
}

impl AdfError {
    /// Whether this error describes a problem with the input document rather
    /// than with this library. Only data errors may be skipped by the
    /// ignore-errors mode of the container joins.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, AdfError::UnimplementedRender(_))
    }
}

impl fmt::Display for AdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdfError::UnknownNodeType(tag) => write!(f, "Unknown node type '{tag}'"),
            AdfError::UnknownMarkType(tag) => write!(f, "Unknown mark type '{tag}'"),
            AdfError::MissingField { owner, field } => {
                write!(f, "Missing required field '{field}' on '{owner}'")
            }
            AdfError::Malformed(msg) => write!(f, "Malformed data: {msg}"),
            AdfError::MarkdownIncompatible(msg) => {
                write!(f, "Markdown incompatible: {msg}")
            }
            AdfError::UnimplementedRender(what) => {
                write!(f, "No Markdown rendering implemented for {what}")
            }
        }
    }
}

impl std::error::Error for AdfError {}
