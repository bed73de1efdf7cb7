//! Error types for the swfkit library

use std::io;
use thiserror::Error;

use crate::types::TagHandle;

/// Main error type for swfkit operations
#[derive(Debug, Error)]
pub enum SwfError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The byte source ran dry before the requested read completed
    #[error("Unexpected end of stream at offset {offset}")]
    StreamExhausted { offset: u64 },

    /// A read was attempted at or past the active read boundary
    #[error("Read boundary exceeded at offset {offset} (boundary {boundary})")]
    BoundaryExceeded { offset: u64, boundary: u64 },

    /// The first three bytes are not FWS, CWS or ZWS
    #[error("Invalid signature: {0:02X?}")]
    InvalidSignature([u8; 3]),

    /// A character ID that is not in the dictionary
    #[error("Character ID not found: {0}")]
    UnresolvedCharacterReference(u16),

    /// Fill style type byte outside the known set
    #[error("Unknown fill style type: {0:#04X}")]
    UnknownFillStyle(u8),

    /// A record whose content contradicts its own framing
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// A value does not fit the bit width chosen for it
    #[error("Value {value} does not fit in {bits} bits (signed: {signed})")]
    BitWidthOverflow { value: i64, bits: u32, signed: bool },

    /// A tag was referenced but never received a character ID
    #[error("Tag {0} has no character ID assigned")]
    UnassignedCharacter(TagHandle),

    /// Error during compression
    #[error("Compression error: {0}")]
    Compression(String),

    /// Error during decompression
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// String encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for swfkit operations
pub type Result<T> = std::result::Result<T, SwfError>;
