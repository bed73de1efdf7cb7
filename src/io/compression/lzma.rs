//! LZMA filter for ZWS files
//!
//! On disk the stream is stored as the 5 LZMA property bytes followed by
//! the range-coded data, without the 8-byte size field of the `.lzma`
//! container. The unpacked size comes from the file header instead.

use std::io::Cursor;

use lzma_rs::compress::{Options as CompressOptions, UnpackedSize as CompressUnpackedSize};
use lzma_rs::decompress::{Options as DecompressOptions, UnpackedSize};

use crate::error::{Result, SwfError};

use super::{output_capacity, Compressor, Decompressor};

/// Size of the LZMA property header
pub const LZMA_PROPERTIES_SIZE: usize = 5;

/// LZMA compressor; output carries the property header and an end marker
#[derive(Debug, Clone, Copy, Default)]
pub struct LzmaCompressor;

impl Compressor for LzmaCompressor {
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>> {
        let options = CompressOptions {
            unpacked_size: CompressUnpackedSize::SkipWritingToHeader,
        };
        let mut output = Vec::with_capacity(source.len() / 2 + LZMA_PROPERTIES_SIZE);
        lzma_rs::lzma_compress_with_options(&mut Cursor::new(source), &mut output, &options)
            .map_err(|e| SwfError::Compression(format!("lzma: {}", e)))?;
        Ok(output)
    }
}

/// LZMA decompressor; input starts with the property header
#[derive(Debug, Clone, Copy, Default)]
pub struct LzmaDecompressor;

impl Decompressor for LzmaDecompressor {
    fn decompress(&self, source: &[u8], decompressed_size: usize) -> Result<Vec<u8>> {
        if source.len() < LZMA_PROPERTIES_SIZE {
            return Err(SwfError::Decompression(format!(
                "lzma stream of {} bytes has no property header",
                source.len()
            )));
        }
        // The declared size bounds the output; the end marker closes the stream
        let options = DecompressOptions {
            unpacked_size: UnpackedSize::UseProvided(Some(decompressed_size as u64)),
            ..Default::default()
        };
        let mut output = Vec::with_capacity(output_capacity(source.len(), decompressed_size));
        lzma_rs::lzma_decompress_with_options(&mut Cursor::new(source), &mut output, &options)
            .map_err(|e| SwfError::Decompression(format!("lzma: {}", e)))?;
        Ok(output)
    }
}
