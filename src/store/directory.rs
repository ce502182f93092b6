//! Directory-backed store: one JSON document per artwork.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{EditError, Result};
use crate::io::{from_json, to_json};
use crate::types::Artwork;

use super::{check_key, ArtworkStore};

const EXTENSION: &str = "json";

/// Stores each artwork as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store rooted at a directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| EditError::Io {
            path: root.clone(),
            message: format!("Failed to create store directory: {}", e),
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, EXTENSION)))
    }
}

impl ArtworkStore for DirectoryStore {
    fn save(&mut self, artwork: &Artwork) -> Result<()> {
        let path = self.path_for(artwork.id())?;
        let json = to_json(artwork)?;

        // write-then-rename so a crash never leaves a half-written document
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| EditError::Store {
                key: artwork.id().to_string(),
                message: format!("Failed to write {}: {}", path.display(), e),
            })?;

        tracing::debug!(key = artwork.id(), path = %path.display(), "saved artwork");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Artwork>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let source = fs::read_to_string(&path).map_err(|e| EditError::Store {
            key: key.to_string(),
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        let mut artwork = from_json(&source)?;
        if artwork.id() != key {
            tracing::warn!(key, stored = artwork.id(), "stored id differs from key, using key");
            artwork.set_id(key);
        }
        Ok(Some(artwork))
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| EditError::Store {
            key: key.to_string(),
            message: format!("Failed to delete {}: {}", path.display(), e),
        })?;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| EditError::Io {
                path: self.root.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if check_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key)?.exists())
    }
}
