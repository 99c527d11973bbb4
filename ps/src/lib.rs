//! PlanStore - JSON document persistence for generated plans
//!
//! Each document is a pretty-printed JSON file named `<id>.json` under a
//! data directory. Ids are opaque identifiers (uuids in practice); anything
//! that could escape the data directory is rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {id}")]
    NotFound { id: String },

    #[error("invalid document id: {id}")]
    InvalidId { id: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A directory of JSON documents keyed by id
pub struct PlanStore {
    data_dir: PathBuf,
}

impl PlanStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        debug!(?data_dir, "PlanStore::open: called");
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId { id: id.to_string() });
        }
        Ok(self.data_dir.join(format!("{id}.json")))
    }

    /// Save a document under `id`, replacing any existing one
    pub fn save<T: Serialize>(&self, id: &str, doc: &T) -> Result<(), StoreError> {
        debug!(%id, "PlanStore::save: called");
        let path = self.path_for(id)?;
        let text = serde_json::to_string_pretty(doc)?;
        fs::write(&path, text)?;
        Ok(())
    }

    /// Load the document stored under `id`
    pub fn load<T: DeserializeOwned>(&self, id: &str) -> Result<T, StoreError> {
        debug!(%id, "PlanStore::load: called");
        let path = self.path_for(id)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { id: id.to_string() });
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// List stored document ids, sorted
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        debug!("PlanStore::list: called");
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}
