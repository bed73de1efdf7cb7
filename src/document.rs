//! SWF document structure

use crate::io::compression::Compression;
use crate::io::Dictionary;
use crate::notification::NotificationCollection;
use crate::tags::{
    EnableDebugger2, EnableTelemetry, FileAttributes, FrameLabel, ProductInfo, ScriptLimits, Tag,
    TagTable,
};
use crate::types::{CharacterRef, Color, Rect, TagHandle};

/// One frame of the main timeline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    /// Label written as a FrameLabel tag ahead of the frame's tags
    pub label: Option<FrameLabel>,
    /// Tags in the order they are written
    pub tags: Vec<TagHandle>,
    /// Class names bound in this frame (SymbolClass entries)
    pub symbols: Vec<(CharacterRef, String)>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(name: impl Into<String>) -> Self {
        Frame {
            label: Some(FrameLabel {
                name: name.into(),
                named_anchor: false,
            }),
            ..Self::default()
        }
    }

    /// Append a tag to the frame.
    pub fn add(&mut self, handle: TagHandle) {
        self.tags.push(handle);
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.tags.is_empty() && self.symbols.is_empty()
    }
}

/// An in-memory SWF movie
#[derive(Debug, Clone, PartialEq)]
pub struct SwfDocument {
    /// File format version from the header
    pub version: u8,
    /// Body compression mode
    pub compression: Compression,
    /// Stage bounds in twips
    pub frame_size: Rect,
    /// Frames per second (8.8 fixed point on disk)
    pub frame_rate: f64,
    pub file_attributes: Option<FileAttributes>,
    pub metadata: Option<String>,
    pub background_color: Option<Color>,
    pub enable_debugger2: Option<EnableDebugger2>,
    pub enable_telemetry: Option<EnableTelemetry>,
    pub product_info: Option<ProductInfo>,
    pub script_limits: Option<ScriptLimits>,
    /// Document class bound through SymbolClass ID 0
    pub top_level_class: Option<String>,
    /// Frames of the main timeline
    pub frames: Vec<Frame>,
    /// Problems collected during the last read
    pub notifications: NotificationCollection,

    tags: TagTable,
    dictionary: Dictionary,
}

impl SwfDocument {
    /// Create an empty uncompressed document.
    pub fn new(version: u8) -> Self {
        SwfDocument {
            version,
            compression: Compression::None,
            frame_size: Rect::default(),
            frame_rate: 24.0,
            file_attributes: None,
            metadata: None,
            background_color: None,
            enable_debugger2: None,
            enable_telemetry: None,
            product_info: None,
            script_limits: None,
            top_level_class: None,
            frames: Vec::new(),
            notifications: NotificationCollection::new(),
            tags: TagTable::new(),
            dictionary: Dictionary::new(),
        }
    }

    /// Attach the tag arena and dictionary produced by a decode.
    pub(crate) fn with_parts(mut self, tags: TagTable, dictionary: Dictionary) -> Self {
        self.tags = tags;
        self.dictionary = dictionary;
        self
    }

    /// Store a tag in the document's tag table.
    ///
    /// The tag is not part of any frame until its handle is added to one.
    pub fn add_tag(&mut self, tag: Tag) -> TagHandle {
        self.tags.push(tag)
    }

    /// Store a tag and append it to the given frame.
    pub fn add_tag_to_frame(&mut self, frame: usize, tag: Tag) -> Option<TagHandle> {
        if frame >= self.frames.len() {
            return None;
        }
        let handle = self.tags.push(tag);
        self.frames[frame].add(handle);
        Some(handle)
    }

    /// Append a frame and return its index.
    pub fn add_frame(&mut self, frame: Frame) -> usize {
        self.frames.push(frame);
        self.frames.len() - 1
    }

    pub fn tag(&self, handle: TagHandle) -> Option<&Tag> {
        self.tags.get(handle)
    }

    pub fn tag_mut(&mut self, handle: TagHandle) -> Option<&mut Tag> {
        self.tags.get_mut(handle)
    }

    /// Tag table holding every tag of the document, sprite children included.
    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Character IDs seen while decoding; empty for documents built in memory.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Look up a decoded character by its on-disk ID.
    pub fn character_by_id(&self, id: u16) -> Option<&Tag> {
        self.dictionary.get(id).and_then(|h| self.tags.get(h))
    }

    /// Whether the document declares ActionScript 3.
    pub fn is_as3(&self) -> bool {
        self.file_attributes.map_or(false, |a| a.is_as3())
    }
}

impl Default for SwfDocument {
    fn default() -> Self {
        Self::new(10)
    }
}
