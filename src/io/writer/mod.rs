//! Encoding side: character ID assignment, tag encoding and file framing

pub mod swf_writer;
pub mod tag_writer;

pub use swf_writer::{SwfWriter, SwfWriterConfiguration};
pub use tag_writer::TagWriter;
