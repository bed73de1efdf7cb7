//! Frame assembly: turns the flat decoded tag sequence into a [`SwfDocument`].
//!
//! Tags are walked in stream order. ShowFrame closes the frame being
//! built; FrameLabel and SymbolClass are folded into it; the document
//! level control tags (file attributes, metadata, background color,
//! debugger and telemetry settings, product info, script limits) are
//! lifted onto the document. Everything else is appended to the current
//! frame by handle.

use std::mem;

use tracing::warn;

use crate::document::{Frame, SwfDocument};
use crate::notification::NotificationType;
use crate::tags::Tag;

use super::swf_reader::DecodedTags;

/// Builds the document from one decode
pub struct DocumentBuilder {
    decoded: DecodedTags,
}

impl DocumentBuilder {
    pub fn new(decoded: DecodedTags) -> Self {
        Self { decoded }
    }

    /// Assemble frames and attach the tag arena and dictionary.
    pub fn build(self) -> SwfDocument {
        let DecodedTags {
            header,
            tags,
            order,
            dictionary,
            mut notifications,
        } = self.decoded;

        let mut document = SwfDocument::new(header.version);
        document.compression = header.compression;
        document.frame_size = header.frame_size;
        document.frame_rate = header.frame_rate;

        let mut current = Frame::new();
        for &handle in &order {
            let Some(tag) = tags.get(handle) else {
                continue;
            };
            match tag {
                Tag::ShowFrame => document.frames.push(mem::take(&mut current)),
                Tag::FrameLabel(label) => current.label = Some(label.clone()),
                Tag::SymbolClass(symbols) => {
                    current.symbols.extend(symbols.symbols.iter().cloned());
                    if document.top_level_class.is_none() {
                        document.top_level_class = symbols.root_class.clone();
                    }
                }
                Tag::FileAttributes(attributes) => document.file_attributes = Some(*attributes),
                Tag::Metadata(metadata) => document.metadata = Some(metadata.clone()),
                Tag::SetBackgroundColor(color) => document.background_color = Some(*color),
                Tag::EnableDebugger2(debugger) => {
                    document.enable_debugger2 = Some(debugger.clone())
                }
                Tag::EnableTelemetry(telemetry) => {
                    document.enable_telemetry = Some(telemetry.clone())
                }
                Tag::ProductInfo(info) => document.product_info = Some(*info),
                Tag::ScriptLimits(limits) => document.script_limits = Some(*limits),
                _ => current.add(handle),
            }
        }

        // Trailing tags without a closing ShowFrame still form a frame
        let declared = header.frame_count as usize;
        if !current.is_empty() || document.frames.len() < declared {
            document.frames.push(current);
        }

        if document.frames.len() != declared {
            let message = format!(
                "Frame count mismatch: header declares {} frames, found {}",
                declared,
                document.frames.len()
            );
            warn!("{}", message);
            notifications.notify(NotificationType::Warning, message);
        }

        document.notifications = notifications;
        document.with_parts(tags, dictionary)
    }
}
