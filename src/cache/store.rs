//! Persistence for the suppression cache
//!
//! The whole document is read once and rewritten in full after every change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::record::CacheRecord;
use crate::error::{DailyLogError, Result};

/// Schema version written to and expected from the cache file
pub const CURRENT_CACHE_VERSION: u32 = 1;

/// Serializable format for the cache file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, CacheRecord>,
}

impl Default for CacheDocument {
    fn default() -> Self {
        Self {
            version: CURRENT_CACHE_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Store for persisting the cache document
#[derive(Debug, Clone)]
pub struct CacheStore {
    store_path: PathBuf,
}

impl CacheStore {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: path.into(),
        }
    }

    /// Get the path to the store file
    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Load the cache document, creating and saving an empty one if the file is missing
    pub fn load_or_create(&self) -> Result<CacheDocument> {
        if !self.store_path.is_file() {
            let document = CacheDocument::default();
            self.save(&document)?;
            return Ok(document);
        }

        let content = fs::read_to_string(&self.store_path)?;
        let document: CacheDocument =
            serde_json::from_str(&content).map_err(|source| DailyLogError::CacheParse {
                path: self.store_path.clone(),
                source,
            })?;
        if document.version != CURRENT_CACHE_VERSION {
            return Err(DailyLogError::UnsupportedVersion {
                document: "cache",
                found: document.version,
                expected: CURRENT_CACHE_VERSION,
            });
        }

        tracing::debug!(
            "Loaded {} cache entries from {}",
            document.entries.len(),
            self.store_path.display()
        );
        Ok(document)
    }

    /// Save the cache document to disk
    pub fn save(&self, document: &CacheDocument) -> Result<()> {
        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.store_path, content)?;

        tracing::debug!("Saved cache to {}", self.store_path.display());
        Ok(())
    }
}
