//! File-backed document cache.
//!
//! Raw documents are stored as pretty-printed JSON under
//! `<dir>/<name>.json`. Names are flat identifiers; anything that looks
//! like a path is rejected so a cache name can never escape the directory.

use adf_doc::source::{BoxError, DocumentCache};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf, BoxError> {
        // Separators are rejected outright, so only the bare dot names could
        // still act as path components.
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(format!("invalid cache name '{name}'").into());
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentCache for FileCache {
    fn load(&self, name: &str) -> Result<Option<Value>, BoxError> {
        let path = self.entry_path(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&raw)?;
        Ok(Some(value))
    }

    fn store(&self, name: &str, doc: &Value) -> Result<(), BoxError> {
        let path = self.entry_path(name)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(doc)?)?;
        Ok(())
    }
}
