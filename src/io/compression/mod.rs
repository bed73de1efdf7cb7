//! Body compression filters
//!
//! The part of a file after the 8-byte header may be stored raw, as a zlib
//! stream, or as an LZMA stream:
//! - **FWS**: uncompressed
//! - **CWS**: zlib ([`ZlibCompressor`], [`ZlibDecompressor`])
//! - **ZWS**: LZMA ([`LzmaCompressor`], [`LzmaDecompressor`]) with a
//!   5-byte property header and an end-of-stream marker

pub mod lzma;
pub mod zlib;

use crate::error::Result;

pub use lzma::{LzmaCompressor, LzmaDecompressor, LZMA_PROPERTIES_SIZE};
pub use zlib::{ZlibCompressor, ZlibDecompressor};

/// Trait for compressing a file body.
pub trait Compressor {
    /// Compress the whole `source` buffer.
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>>;
}

/// Trait for decompressing a file body.
pub trait Decompressor {
    /// Decompress `source`, expecting `decompressed_size` bytes of output.
    fn decompress(&self, source: &[u8], decompressed_size: usize) -> Result<Vec<u8>>;
}

/// Upper bound on the output reserved per compressed input byte.
const MAX_PREALLOCATION_RATIO: usize = 4;

/// Capacity to reserve before decompressing.
///
/// The declared size comes from the file header and is not trusted; the
/// buffer grows past this bound on demand.
pub(crate) fn output_capacity(source_len: usize, declared_size: usize) -> usize {
    declared_size.min(source_len.saturating_mul(MAX_PREALLOCATION_RATIO))
}

/// Compression mode selected by the file signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    #[default]
    None,
    Zlib,
    Lzma,
}

impl Compression {
    /// Look up the mode for a 3-byte signature.
    pub fn from_signature(signature: &[u8; 3]) -> Option<Compression> {
        match signature {
            b"FWS" => Some(Compression::None),
            b"CWS" => Some(Compression::Zlib),
            b"ZWS" => Some(Compression::Lzma),
            _ => None,
        }
    }

    pub fn signature(&self) -> [u8; 3] {
        match self {
            Compression::None => *b"FWS",
            Compression::Zlib => *b"CWS",
            Compression::Lzma => *b"ZWS",
        }
    }

    /// The compressor for this mode, `None` for uncompressed files.
    pub fn compressor(&self) -> Option<Box<dyn Compressor>> {
        match self {
            Compression::None => None,
            Compression::Zlib => Some(Box::new(ZlibCompressor::default())),
            Compression::Lzma => Some(Box::new(LzmaCompressor)),
        }
    }

    /// The decompressor for this mode, `None` for uncompressed files.
    pub fn decompressor(&self) -> Option<Box<dyn Decompressor>> {
        match self {
            Compression::None => None,
            Compression::Zlib => Some(Box::new(ZlibDecompressor)),
            Compression::Lzma => Some(Box::new(LzmaDecompressor)),
        }
    }
}
