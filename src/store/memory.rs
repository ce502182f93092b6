//! In-memory store.

use std::collections::HashMap;

use crate::error::Result;
use crate::types::Artwork;

use super::ArtworkStore;

/// Keeps artworks in a map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    artworks: HashMap<String, Artwork>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }
}

impl ArtworkStore for MemoryStore {
    fn save(&mut self, artwork: &Artwork) -> Result<()> {
        self.artworks.insert(artwork.id().to_string(), artwork.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Artwork>> {
        Ok(self.artworks.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        Ok(self.artworks.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.artworks.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.artworks.contains_key(key))
    }
}
