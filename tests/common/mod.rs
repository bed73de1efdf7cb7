//! Shared test utilities for swfkit integration tests.
//!
//! Consolidates the helpers used across test crates (raw file assembly,
//! read/write shortcuts, tag counting) into a single module that all test
//! crates import via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use std::collections::BTreeMap;

use swfkit::io::{Compression, SwfReader, SwfReaderConfiguration, SwfWriter, SwfWriterConfiguration};
use swfkit::{SwfDocument, Tag};

// ===========================================================================
// Raw file assembly
// ===========================================================================

/// Encode one tag record by hand; long form for bodies of 63 bytes and more.
pub fn tag_record(code: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 6);
    if body.len() < 0x3F {
        out.extend_from_slice(&((code << 6) | body.len() as u16).to_le_bytes());
    } else {
        out.extend_from_slice(&((code << 6) | 0x3F).to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    }
    out.extend_from_slice(body);
    out
}

/// Build an uncompressed file around a tag stream.
///
/// The frame size is the one-byte zero rectangle and the frame rate
/// is 24 fps.
pub fn fws_file(version: u8, frame_count: u16, tags: &[u8]) -> Vec<u8> {
    let mut body = vec![0x00, 0x00, 0x18];
    body.extend_from_slice(&frame_count.to_le_bytes());
    body.extend_from_slice(tags);

    let mut file = b"FWS".to_vec();
    file.push(version);
    file.extend_from_slice(&((body.len() + 8) as u32).to_le_bytes());
    file.extend_from_slice(&body);
    file
}

/// Concatenate tag records and close the stream with End.
pub fn tag_stream(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out: Vec<u8> = records.concat();
    out.extend_from_slice(&[0x00, 0x00]);
    out
}

// ===========================================================================
// Read / write shortcuts
// ===========================================================================

pub fn read_bytes(data: Vec<u8>) -> SwfDocument {
    SwfReader::from_bytes(data)
        .read()
        .expect("failsafe read should not fail")
}

pub fn read_strict(data: Vec<u8>) -> swfkit::Result<SwfDocument> {
    let config = SwfReaderConfiguration {
        failsafe: false,
        ..Default::default()
    };
    SwfReader::from_bytes(data).with_config(config).read()
}

pub fn write_document(doc: &SwfDocument, compression: Compression) -> Vec<u8> {
    let config = SwfWriterConfiguration {
        compression: Some(compression),
    };
    SwfWriter::new(doc)
        .with_config(config)
        .write()
        .expect("document should encode")
}

/// Write then read back with the given compression.
pub fn roundtrip(doc: &SwfDocument, compression: Compression) -> SwfDocument {
    read_bytes(write_document(doc, compression))
}

// ===========================================================================
// Tag counting
// ===========================================================================

/// Display name of a tag, `Raw(code)` for undecoded tags.
pub fn tag_name(tag: &Tag) -> String {
    match tag {
        Tag::Raw(raw) => format!("Raw({})", raw.code),
        _ => tag
            .tag_type()
            .map_or_else(|| format!("Code({})", tag.code()), |t| format!("{:?}", t)),
    }
}

/// Count tags by name across all frames, sprite children included.
pub fn count_tags_by_type(doc: &SwfDocument) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for frame in doc.frames() {
        for &handle in &frame.tags {
            count_from(doc, handle, &mut counts);
        }
    }
    counts
}

fn count_from(doc: &SwfDocument, handle: swfkit::TagHandle, counts: &mut BTreeMap<String, usize>) {
    let Some(tag) = doc.tag(handle) else {
        return;
    };
    *counts.entry(tag_name(tag)).or_insert(0) += 1;
    if let Tag::DefineSprite(sprite) = tag {
        for &child in &sprite.control_tags {
            count_from(doc, child, counts);
        }
    }
}

/// Tag names per frame, in frame order.
pub fn frame_tag_names(doc: &SwfDocument) -> Vec<Vec<String>> {
    doc.frames()
        .iter()
        .map(|frame| {
            frame
                .tags
                .iter()
                .filter_map(|&h| doc.tag(h))
                .map(tag_name)
                .collect()
        })
        .collect()
}
