//! SWF writer, the main entry point for encoding documents.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swfkit::io::{Compression, SwfWriter, SwfWriterConfiguration};
//!
//! let config = SwfWriterConfiguration {
//!     compression: Some(Compression::Zlib),
//! };
//! SwfWriter::new(&doc).with_config(config).write_to_file("movie.swf")?;
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::document::SwfDocument;
use crate::error::{Result, SwfError};
use crate::io::compression::{Compression, LZMA_PROPERTIES_SIZE};
use crate::io::BitWriter;

use super::tag_writer::common::write_rect;
use super::tag_writer::TagWriter;

/// Length of the fixed part of the header (signature, version, length)
const HEADER_PREFIX_LENGTH: usize = 8;

/// Configuration options for the SWF writer.
#[derive(Debug, Clone, Default)]
pub struct SwfWriterConfiguration {
    /// Body compression; the document's own mode is used when `None`.
    pub compression: Option<Compression>,
}

/// SWF file writer.
///
/// The write pipeline is:
///
/// 1. Assign character IDs and encode the tag stream with a [`TagWriter`].
/// 2. Prefix the frame size, frame rate and frame count.
/// 3. Compress the body for CWS and ZWS files.
/// 4. Prepend the signature, version and uncompressed file length.
pub struct SwfWriter<'a> {
    document: &'a SwfDocument,
    config: SwfWriterConfiguration,
}

impl<'a> SwfWriter<'a> {
    pub fn new(document: &'a SwfDocument) -> Self {
        Self {
            document,
            config: SwfWriterConfiguration::default(),
        }
    }

    /// Set configuration options.
    pub fn with_config(mut self, config: SwfWriterConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Encode the document into a complete file.
    pub fn write(&self) -> Result<Vec<u8>> {
        let document = self.document;
        let compression = self.config.compression.unwrap_or(document.compression);
        let body = self.write_body()?;
        let file_length = u32::try_from(body.len() + HEADER_PREFIX_LENGTH)
            .map_err(|_| SwfError::Malformed(format!("body of {} bytes is too long", body.len())))?;

        let mut out = Vec::with_capacity(body.len() + HEADER_PREFIX_LENGTH + 4);
        out.extend_from_slice(&compression.signature());
        out.push(document.version);
        out.extend_from_slice(&file_length.to_le_bytes());

        match compression.compressor() {
            None => out.extend_from_slice(&body),
            Some(compressor) => {
                let packed = compressor.compress(&body)?;
                if compression == Compression::Lzma {
                    // The length field leaves out the property header
                    let payload = packed.len().saturating_sub(LZMA_PROPERTIES_SIZE);
                    let payload = u32::try_from(payload).map_err(|_| {
                        SwfError::Compression(format!("lzma payload of {} bytes", payload))
                    })?;
                    out.extend_from_slice(&payload.to_le_bytes());
                }
                debug!(
                    uncompressed = body.len(),
                    compressed = packed.len(),
                    "compressed body"
                );
                out.extend_from_slice(&packed);
            }
        }

        info!(
            version = document.version,
            compression = ?compression,
            frames = document.frame_count(),
            length = out.len(),
            "wrote SWF document"
        );
        Ok(out)
    }

    /// Write the file to `writer` and return the number of bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        let bytes = self.write()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(bytes.len())
    }

    /// Write the file to disk.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(BufWriter::new(file))?;
        Ok(())
    }

    /// Frame size, frame rate, frame count and the tag stream.
    fn write_body(&self) -> Result<Vec<u8>> {
        let document = self.document;
        let frame_count = u16::try_from(document.frame_count()).map_err(|_| {
            SwfError::Malformed(format!("{} frames exceed 65535", document.frame_count()))
        })?;
        let tags = TagWriter::new(document)?.write_tag_stream()?;

        let mut body = BitWriter::new();
        write_rect(&mut body, &document.frame_size)?;
        body.write_fixed8(document.frame_rate)?;
        body.write_u16(frame_count)?;
        body.write_bytes(&tags)?;
        Ok(body.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Frame;
    use crate::io::SwfReader;
    use crate::tags::{DefineBinaryData, Tag};
    use crate::types::Rect;

    fn minimal_document() -> SwfDocument {
        let mut doc = SwfDocument::new(6);
        doc.frame_rate = 12.0;
        doc.add_frame(Frame::new());
        doc
    }

    #[test]
    fn test_minimal_file() {
        let bytes = SwfWriter::new(&minimal_document()).write().unwrap();
        assert_eq!(
            bytes,
            vec![
                b'F', b'W', b'S', 6, 18, 0, 0, 0, // header
                0x08, 0x00, // zero rect
                0x00, 0x0C, // 12 fps
                0x01, 0x00, // one frame
                0x40, 0x00, // ShowFrame
                0x00, 0x00, // End
            ]
        );
    }

    #[test]
    fn test_zlib_file_reads_back() {
        let mut doc = minimal_document();
        doc.frame_size = Rect::from_size(11000, 8000);
        doc.add_tag_to_frame(
            0,
            Tag::DefineBinaryData(DefineBinaryData {
                data: b"payload".repeat(20),
            }),
        );
        let config = SwfWriterConfiguration {
            compression: Some(Compression::Zlib),
        };
        let bytes = SwfWriter::new(&doc).with_config(config).write().unwrap();
        assert_eq!(&bytes[..3], b"CWS");

        let read = SwfReader::from_bytes(bytes).read().unwrap();
        assert_eq!(read.compression, Compression::Zlib);
        assert_eq!(read.frame_size, doc.frame_size);
        assert_eq!(read.frame_count(), 1);
        assert!(read.notifications.is_empty());
    }

    #[test]
    fn test_lzma_length_fields() {
        let mut doc = minimal_document();
        doc.compression = Compression::Lzma;
        let bytes = SwfWriter::new(&doc).write().unwrap();
        assert_eq!(&bytes[..3], b"ZWS");
        let file_length = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(file_length, 18);
        let payload = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
        assert_eq!(payload, bytes.len() - 12 - LZMA_PROPERTIES_SIZE);

        let read = SwfReader::from_bytes(bytes).read().unwrap();
        assert_eq!(read.frame_rate, 12.0);
        assert_eq!(read.frame_count(), 1);
    }

    #[test]
    fn test_write_to_counts_bytes() {
        let doc = minimal_document();
        let mut sink = Vec::new();
        let written = SwfWriter::new(&doc).write_to(&mut sink).unwrap();
        assert_eq!(written, 18);
        assert_eq!(sink.len(), 18);
    }
}
