//! Persistence for artworks.
//!
//! The editor treats storage as an opaque key-value store keyed by the
//! artwork id. Saving is best-effort from the session's point of view: a
//! failed save is logged and editing carries on with the in-memory state.

mod directory;
mod memory;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;

use uuid::Uuid;

use crate::error::{EditError, Result};
use crate::types::Artwork;

/// A key-value store of artworks.
pub trait ArtworkStore {
    /// Insert or replace the artwork under its id.
    fn save(&mut self, artwork: &Artwork) -> Result<()>;

    /// Load an artwork, or `None` if the key is unknown.
    fn get(&self, key: &str) -> Result<Option<Artwork>>;

    /// Remove an artwork. Returns false if the key was unknown.
    fn delete(&mut self, key: &str) -> Result<bool>;

    /// All stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.keys()?.iter().any(|k| k == key))
    }

    /// A fresh key not used by any stored artwork.
    fn generate_key(&self) -> Result<String> {
        let existing = self.keys()?;
        loop {
            let key = Uuid::new_v4().simple().to_string();
            if !existing.contains(&key) {
                return Ok(key);
            }
            tracing::debug!(key, "generated key collided, retrying");
        }
    }
}

/// Keys become file names, so only a conservative character set is allowed.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(EditError::Store {
            key: key.to_string(),
            message: "keys may only contain letters, digits, '-' and '_'".to_string(),
        })
    }
}
