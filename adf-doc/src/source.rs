//! Collaborator seams for obtaining and caching raw documents.
//!
//! The conversion pipeline itself is pure; fetching a document from a remote
//! service and remembering it locally are injected behind these traits so
//! the library never picks an HTTP client or a storage layout for its
//! callers. The CLI ships a file-backed [`DocumentCache`].

use serde_json::Value;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fetches the raw JSON form of a document by identifier.
pub trait DocumentSource {
    fn fetch(&self, id: &str) -> Result<Value, BoxError>;
}

/// Stores raw documents under caller-chosen names for later reuse.
pub trait DocumentCache {
    /// Returns `Ok(None)` when nothing is stored under `name`.
    fn load(&self, name: &str) -> Result<Option<Value>, BoxError>;
    fn store(&self, name: &str, doc: &Value) -> Result<(), BoxError>;
}
