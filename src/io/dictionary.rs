//! Character dictionary built while decoding
//!
//! Maps on-disk character IDs to the handles of tags already decoded.
//! Entries are inserted in stream order, so only backward references
//! resolve.

use indexmap::IndexMap;

use crate::error::{Result, SwfError};
use crate::types::{CharacterRef, TagHandle, INVALID_CHARACTER_ID};

/// ID to tag handle map for one decode session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<u16, TagHandle>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character; returns the handle previously bound to `id`.
    pub fn insert(&mut self, id: u16, handle: TagHandle) -> Option<TagHandle> {
        self.entries.insert(id, handle)
    }

    pub fn get(&self, id: u16) -> Option<TagHandle> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: u16) -> bool {
        self.entries.contains_key(&id)
    }

    /// Resolve a reference read from the stream.
    ///
    /// ID 65535 never fails: some producers write it for characters that
    /// do not exist, and it decodes to [`CharacterRef::Invalid`].
    pub fn resolve(&self, id: u16) -> Result<CharacterRef> {
        if id == INVALID_CHARACTER_ID {
            return Ok(CharacterRef::Invalid);
        }
        self.get(id)
            .map(CharacterRef::Tag)
            .ok_or(SwfError::UnresolvedCharacterReference(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, TagHandle)> + '_ {
        self.entries.iter().map(|(&id, &handle)| (id, handle))
    }
}
