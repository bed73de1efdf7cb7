//! zlib filter for CWS files

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::{Result, SwfError};

use super::{output_capacity, Compressor, Decompressor};

/// zlib compressor
#[derive(Debug, Clone, Copy)]
pub struct ZlibCompressor {
    pub level: flate2::Compression,
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self {
            level: flate2::Compression::best(),
        }
    }
}

impl Compressor for ZlibCompressor {
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(source.len() / 2), self.level);
        encoder
            .write_all(source)
            .map_err(|e| SwfError::Compression(format!("zlib write failed: {}", e)))?;
        encoder
            .finish()
            .map_err(|e| SwfError::Compression(format!("zlib finish failed: {}", e)))
    }
}

/// zlib decompressor
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibDecompressor;

impl Decompressor for ZlibDecompressor {
    fn decompress(&self, source: &[u8], decompressed_size: usize) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(output_capacity(source.len(), decompressed_size));
        let mut decoder = ZlibDecoder::new(source);
        decoder
            .read_to_end(&mut output)
            .map_err(|e| SwfError::Decompression(e.to_string()))?;
        Ok(output)
    }
}
