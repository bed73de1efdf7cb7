//! Handles and character references
//!
//! Every decoded tag lives in a [`TagTable`](crate::tags::TagTable) arena and
//! is addressed by a [`TagHandle`].  Records that point at another character
//! (a bitmap fill, a placed shape, a font used by a text) hold a
//! [`CharacterRef`] instead of the raw on-disk ID; the writer maps handles
//! back to sequential character IDs when the movie is encoded.

use std::fmt;

/// Character ID reserved by legacy producers for "no character".
///
/// References to this ID are kept as [`CharacterRef::Invalid`] so that the
/// movie can be written back unchanged.
pub const INVALID_CHARACTER_ID: u16 = 65535;

/// Index of a tag inside a document's tag table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagHandle(usize);

impl TagHandle {
    /// Create a handle from a raw table index
    #[inline]
    pub const fn new(index: usize) -> Self {
        TagHandle(index)
    }

    /// Get the raw table index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for TagHandle {
    fn from(value: usize) -> Self {
        TagHandle(value)
    }
}

impl fmt::Display for TagHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A reference from one record to a character tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterRef {
    /// A resolved character in the same tag table.
    Tag(TagHandle),
    /// The legacy placeholder for character ID 65535.
    Invalid,
}

impl CharacterRef {
    /// The referenced handle, if this is not the placeholder.
    pub fn handle(&self) -> Option<TagHandle> {
        match self {
            CharacterRef::Tag(h) => Some(*h),
            CharacterRef::Invalid => None,
        }
    }

    /// Check if this is the legacy placeholder
    pub fn is_invalid(&self) -> bool {
        matches!(self, CharacterRef::Invalid)
    }
}

impl From<TagHandle> for CharacterRef {
    fn from(handle: TagHandle) -> Self {
        CharacterRef::Tag(handle)
    }
}
