//! Linear undo/redo history over artwork snapshots.
//!
//! Snapshots are copies of the whole artwork. Pixel buffers inside an
//! artwork are reference counted and copied on first write, so a snapshot
//! costs one pointer per frame slot until the live artwork changes that
//! slot. Either way, editing the live artwork never shows up in a stored
//! snapshot, and a restored snapshot can be edited freely.

use std::collections::VecDeque;

use crate::types::Artwork;

/// Number of snapshots kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Bounded undo/redo stack.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Artwork>,
    pointer: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create an empty history keeping at most `limit` snapshots (at least 1).
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            pointer: 0,
            limit: limit.max(1),
        }
    }

    /// Record a snapshot.
    ///
    /// Anything after the pointer (undone states) is discarded first; when
    /// the stack overflows its limit, the oldest snapshot is evicted.
    pub fn commit(&mut self, artwork: &Artwork) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.pointer + 1);
        }
        self.entries.push_back(artwork.clone());
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.pointer = self.entries.len() - 1;
        tracing::debug!(entries = self.entries.len(), "history commit");
    }

    /// Step back. Returns the snapshot now current, or `None` at the start.
    pub fn undo(&mut self) -> Option<Artwork> {
        if self.pointer == 0 || self.entries.is_empty() {
            return None;
        }
        self.pointer -= 1;
        self.entries.get(self.pointer).cloned()
    }

    /// Step forward. Returns the snapshot now current, or `None` at the end.
    pub fn redo(&mut self) -> Option<Artwork> {
        if self.pointer + 1 >= self.entries.len() {
            return None;
        }
        self.pointer += 1;
        self.entries.get(self.pointer).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    /// The snapshot at the pointer.
    pub fn current(&self) -> Option<&Artwork> {
        self.entries.get(self.pointer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pointer = 0;
    }
}
