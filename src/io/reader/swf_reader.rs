//! SWF reader, the main entry point for decoding files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swfkit::io::SwfReader;
//!
//! let doc = SwfReader::from_file("movie.swf")?.read()?;
//! for problem in doc.notifications.iter() {
//!     eprintln!("{}", problem);
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::document::SwfDocument;
use crate::error::{Result, SwfError};
use crate::io::bit_reader::{BitReader, NO_BOUNDARY};
use crate::io::compression::Compression;
use crate::io::Dictionary;
use crate::notification::{NotificationCollection, NotificationType};
use crate::tags::TagTable;
use crate::types::{Rect, TagHandle};

use super::document_builder::DocumentBuilder;
use super::tag_reader::common::read_rect;
use super::tag_reader::TagReader;

/// Length of the fixed part of the header (signature, version, length)
pub const HEADER_PREFIX_LENGTH: u64 = 8;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the SWF reader.
#[derive(Debug, Clone)]
pub struct SwfReaderConfiguration {
    /// When `true`, a tag whose body cannot be decoded is recorded as a
    /// notification and dropped; when `false` the read aborts.
    ///
    /// Default: `true`.
    pub failsafe: bool,

    /// When `true`, tags with unknown codes are kept as raw tags instead
    /// of being skipped.
    ///
    /// Default: `true`.
    pub keep_unknown_tags: bool,
}

impl Default for SwfReaderConfiguration {
    fn default() -> Self {
        Self {
            failsafe: true,
            keep_unknown_tags: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Decoded output
// ---------------------------------------------------------------------------

/// Header fields as found in the file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwfHeader {
    pub compression: Compression,
    pub version: u8,
    /// Uncompressed file length, header included
    pub file_length: u32,
    /// Length of the LZMA payload (ZWS only)
    pub compressed_length: Option<u32>,
    pub frame_size: Rect,
    pub frame_rate: f64,
    /// Frame count declared in the header
    pub frame_count: u16,
}

/// Flat result of decoding the tag stream, before frame assembly
#[derive(Debug, Clone, Default)]
pub struct DecodedTags {
    pub header: SwfHeader,
    /// Every stored tag, sprite children included
    pub tags: TagTable,
    /// Top-level tags in stream order, End excluded
    pub order: Vec<TagHandle>,
    pub dictionary: Dictionary,
    pub notifications: NotificationCollection,
}

// ---------------------------------------------------------------------------
// SwfReader
// ---------------------------------------------------------------------------

/// SWF file reader, produces a [`SwfDocument`].
///
/// The read pipeline is:
///
/// 1. Read the signature, version and file length.
/// 2. Inflate the body for CWS and ZWS files.
/// 3. Read the frame size, frame rate and frame count.
/// 4. Decode the tag stream with a [`TagReader`].
/// 5. Assemble frames with the [`DocumentBuilder`].
pub struct SwfReader {
    data: Vec<u8>,
    config: SwfReaderConfiguration,
}

impl SwfReader {
    /// Open a SWF file by path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read the whole stream into memory.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes(data))
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            config: SwfReaderConfiguration::default(),
        }
    }

    /// Set configuration options.
    pub fn with_config(mut self, config: SwfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the file and assemble its frames.
    pub fn read(self) -> Result<SwfDocument> {
        let decoded = self.read_tags()?;
        let document = DocumentBuilder::new(decoded).build();
        info!(
            version = document.version,
            compression = ?document.compression,
            frames = document.frame_count(),
            "read SWF document"
        );
        Ok(document)
    }

    /// Read the header and the flat tag stream.
    pub fn read_tags(self) -> Result<DecodedTags> {
        let failsafe = self.config.failsafe;
        let mut reader = BitReader::new(self.data);
        let mut decoded = DecodedTags::default();

        if let Err(e) = read_header(&mut reader, &mut decoded.header) {
            if !failsafe {
                return Err(e);
            }
            let message = match &e {
                SwfError::InvalidSignature(signature) => format!(
                    "Invalid signature {}",
                    String::from_utf8_lossy(signature)
                ),
                _ => format!("Unable to read header: {}", e),
            };
            debug!(error = %e, "header unreadable");
            decoded
                .notifications
                .notify_at(NotificationType::Error, message, reader.offset(), None);
            return Ok(decoded);
        }

        debug!(
            version = decoded.header.version,
            compression = ?decoded.header.compression,
            file_length = decoded.header.file_length,
            "read header"
        );

        let mut tag_reader = TagReader::new(reader, decoded.header.version)
            .with_failsafe(failsafe)
            .with_unknown_tags(self.config.keep_unknown_tags)
            .with_notifications(std::mem::take(&mut decoded.notifications));
        decoded.order = tag_reader.read_tag_list()?;

        let (tags, dictionary, notifications) = tag_reader.into_parts();
        decoded.tags = tags;
        decoded.dictionary = dictionary;
        decoded.notifications = notifications;
        Ok(decoded)
    }
}

/// Fill `header` field by field, so a failure leaves what was read.
fn read_header(reader: &mut BitReader, header: &mut SwfHeader) -> Result<()> {
    reader.set_boundary(HEADER_PREFIX_LENGTH);
    let bytes = reader.read_bytes(3)?;
    let signature = [bytes[0], bytes[1], bytes[2]];
    header.compression =
        Compression::from_signature(&signature).ok_or(SwfError::InvalidSignature(signature))?;
    header.version = reader.read_u8()?;
    header.file_length = reader.read_u32()?;

    if header.compression == Compression::Lzma {
        reader.set_boundary(HEADER_PREFIX_LENGTH + 4);
        header.compressed_length = Some(reader.read_u32()?);
    }

    reader.set_boundary(NO_BOUNDARY);
    if let Some(decompressor) = header.compression.decompressor() {
        let expected = header.file_length.saturating_sub(HEADER_PREFIX_LENGTH as u32) as usize;
        let body = decompressor.decompress(reader.remaining(), expected)?;
        reader.replace_remaining(body);
    }

    header.frame_size = read_rect(reader)?;
    header.frame_rate = reader.read_fixed8()?;
    header.frame_count = reader.read_u16()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::compression::{Compressor, ZlibCompressor};
    use crate::tags::Tag;

    /// Rect with zero-width fields, 24 fps, one frame
    const HEADER_TAIL: [u8; 5] = [0x00, 0x00, 0x18, 0x01, 0x00];
    const SHOW_FRAME_END: [u8; 4] = [0x40, 0x00, 0x00, 0x00];

    fn fws_file() -> Vec<u8> {
        let mut data = b"FWS".to_vec();
        data.push(10);
        data.extend_from_slice(&17u32.to_le_bytes());
        data.extend_from_slice(&HEADER_TAIL);
        data.extend_from_slice(&SHOW_FRAME_END);
        data
    }

    #[test]
    fn test_read_minimal_file() {
        let decoded = SwfReader::from_bytes(fws_file()).read_tags().unwrap();
        assert_eq!(decoded.header.compression, Compression::None);
        assert_eq!(decoded.header.version, 10);
        assert_eq!(decoded.header.file_length, 17);
        assert_eq!(decoded.header.frame_rate, 24.0);
        assert_eq!(decoded.header.frame_count, 1);
        assert_eq!(decoded.order.len(), 1);
        assert_eq!(decoded.tags.get(decoded.order[0]), Some(&Tag::ShowFrame));
        assert!(decoded.notifications.is_empty());
    }

    #[test]
    fn test_read_zlib_file() {
        let mut body = HEADER_TAIL.to_vec();
        body.extend_from_slice(&SHOW_FRAME_END);
        let mut data = b"CWS".to_vec();
        data.push(10);
        data.extend_from_slice(&17u32.to_le_bytes());
        data.extend(ZlibCompressor::default().compress(&body).unwrap());

        let doc = SwfReader::from_bytes(data).read().unwrap();
        assert_eq!(doc.compression, Compression::Zlib);
        assert_eq!(doc.frame_count(), 1);
        assert!(doc.notifications.is_empty());
    }

    #[test]
    fn test_invalid_signature() {
        let mut data = fws_file();
        data[0] = b'G';
        let decoded = SwfReader::from_bytes(data.clone()).read_tags().unwrap();
        assert!(decoded.tags.is_empty());
        assert!(decoded.notifications.has_type(NotificationType::Error));

        let strict = SwfReaderConfiguration {
            failsafe: false,
            ..Default::default()
        };
        assert!(matches!(
            SwfReader::from_bytes(data).with_config(strict).read_tags(),
            Err(SwfError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_truncated_header_keeps_partial_fields() {
        let data = b"FWS\x09\x11\x00".to_vec();
        let decoded = SwfReader::from_bytes(data).read_tags().unwrap();
        assert_eq!(decoded.header.version, 9);
        assert_eq!(decoded.notifications.len(), 1);
    }
}
