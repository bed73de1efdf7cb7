//! Document comparison utilities for tests.
//!
//! Handles differ between a document and its decoded copy, so documents
//! are compared through their header fields, per-frame tag names and
//! their re-encoded bytes.

#![allow(dead_code)]

use swfkit::io::Compression;
use swfkit::SwfDocument;

use super::{frame_tag_names, write_document};

/// Tolerance for the 8.8 fixed-point frame rate.
pub const RATE_TOL: f64 = 1.0 / 256.0;

// ===========================================================================
// Diff-based comparison helpers
// ===========================================================================

fn check<T: PartialEq + std::fmt::Debug>(diffs: &mut Vec<String>, name: &str, a: &T, b: &T) {
    if a != b {
        diffs.push(format!("{name}: {a:?} vs {b:?}"));
    }
}

/// Compare header and control fields.
pub fn diff_headers(a: &SwfDocument, b: &SwfDocument) -> Vec<String> {
    let mut diffs = Vec::new();
    check(&mut diffs, "version", &a.version, &b.version);
    check(&mut diffs, "frame_size", &a.frame_size, &b.frame_size);
    if (a.frame_rate - b.frame_rate).abs() > RATE_TOL {
        diffs.push(format!("frame_rate: {} vs {}", a.frame_rate, b.frame_rate));
    }
    check(&mut diffs, "file_attributes", &a.file_attributes, &b.file_attributes);
    check(&mut diffs, "metadata", &a.metadata, &b.metadata);
    check(&mut diffs, "background_color", &a.background_color, &b.background_color);
    check(&mut diffs, "enable_debugger2", &a.enable_debugger2, &b.enable_debugger2);
    check(&mut diffs, "enable_telemetry", &a.enable_telemetry, &b.enable_telemetry);
    check(&mut diffs, "product_info", &a.product_info, &b.product_info);
    check(&mut diffs, "script_limits", &a.script_limits, &b.script_limits);
    check(&mut diffs, "top_level_class", &a.top_level_class, &b.top_level_class);
    diffs
}

/// Compare frame layout: tag names, labels and symbol counts.
pub fn diff_frames(a: &SwfDocument, b: &SwfDocument) -> Vec<String> {
    let mut diffs = Vec::new();
    if a.frame_count() != b.frame_count() {
        diffs.push(format!("frame count: {} vs {}", a.frame_count(), b.frame_count()));
        return diffs;
    }

    let names_a = frame_tag_names(a);
    let names_b = frame_tag_names(b);
    for (index, (fa, fb)) in a.frames().iter().zip(b.frames()).enumerate() {
        check(&mut diffs, &format!("frame {index} label"), &fa.label, &fb.label);
        check(
            &mut diffs,
            &format!("frame {index} symbols"),
            &fa.symbols.len(),
            &fb.symbols.len(),
        );
        check(&mut diffs, &format!("frame {index} tags"), &names_a[index], &names_b[index]);
    }
    diffs
}

/// Assert that header fields and frame layout match.
pub fn assert_same_structure(a: &SwfDocument, b: &SwfDocument) {
    let mut diffs = diff_headers(a, b);
    diffs.extend(diff_frames(a, b));
    assert!(diffs.is_empty(), "documents differ:\n  {}", diffs.join("\n  "));
}

/// Assert that both documents encode to the same uncompressed bytes.
pub fn assert_same_encoding(a: &SwfDocument, b: &SwfDocument) {
    let bytes_a = write_document(a, Compression::None);
    let bytes_b = write_document(b, Compression::None);
    if bytes_a != bytes_b {
        let first = bytes_a
            .iter()
            .zip(&bytes_b)
            .position(|(x, y)| x != y)
            .unwrap_or(bytes_a.len().min(bytes_b.len()));
        panic!(
            "encodings differ at byte {} (lengths {} vs {})",
            first,
            bytes_a.len(),
            bytes_b.len()
        );
    }
}
