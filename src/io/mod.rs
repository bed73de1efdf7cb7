//! I/O module for reading and writing SWF files
//!
//! - [`BitReader`] / [`BitWriter`]: bit-level primitives
//! - [`compression`]: zlib and LZMA body filters
//! - [`reader`]: header, tag stream decoding and frame assembly
//! - [`writer`]: ID assignment, tag encoding and file framing

pub mod bit_reader;
pub mod bit_width;
pub mod bit_writer;
pub mod compression;
pub mod dictionary;
pub mod reader;
pub mod writer;

pub use bit_reader::BitReader;
pub use bit_writer::BitWriter;
pub use compression::Compression;
pub use dictionary::Dictionary;
pub use reader::{DecodedTags, SwfHeader, SwfReader, SwfReaderConfiguration};
pub use writer::{SwfWriter, SwfWriterConfiguration};
