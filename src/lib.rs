//! # swfkit
//!
//! A pure Rust library for reading and writing Flash SWF movies.
//!
//! ## Features
//!
//! - Read and write uncompressed (FWS), zlib (CWS) and LZMA (ZWS) files
//! - Typed decoding of shapes, morph shapes, fonts, text, buttons, bitmaps,
//!   sounds, video, sprites and the document control tags
//! - Character references held as handles into a tag arena, so documents
//!   can be edited without tracking on-disk IDs
//! - Failsafe decoding: damaged tags are reported and skipped
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swfkit::io::{SwfReader, SwfWriter};
//!
//! // Read a SWF file
//! let doc = SwfReader::from_file("movie.swf")?.read()?;
//!
//! // Inspect frames
//! for (index, frame) in doc.frames().iter().enumerate() {
//!     println!("frame {}: {} tags", index, frame.tags.len());
//! }
//!
//! // Write it back
//! SwfWriter::new(&doc).write_to_file("copy.swf")?;
//! # Ok::<(), swfkit::error::SwfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::BitReader`] / [`io::BitWriter`] - bit-level primitives
//! - [`io::compression`] - zlib and LZMA body filters
//! - [`io::reader`] - header and tag stream decoding, frame assembly
//! - [`io::writer`] - character ID assignment and tag encoding
//! - [`SwfDocument`] - frames over a tag arena addressed by [`TagHandle`]

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod io;
pub mod notification;
pub mod tags;
pub mod types;

// Re-export commonly used types
pub use document::{Frame, SwfDocument};
pub use error::{Result, SwfError};
pub use io::{Compression, SwfReader, SwfReaderConfiguration, SwfWriter, SwfWriterConfiguration};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use tags::{Tag, TagTable, TagType};
pub use types::{CharacterRef, Color, Matrix, Rect, TagHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
