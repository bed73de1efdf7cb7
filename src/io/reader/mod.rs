//! SWF decoding
//!
//! [`SwfReader`] handles the file header and body compression,
//! [`TagReader`] decodes the tag stream and [`DocumentBuilder`] groups the
//! decoded tags into frames.

pub mod document_builder;
pub mod swf_reader;
pub mod tag_reader;

pub use document_builder::DocumentBuilder;
pub use swf_reader::{DecodedTags, SwfHeader, SwfReader, SwfReaderConfiguration};
pub use tag_reader::{TagHeader, TagReader};
