//! Display list and timeline tags

use crate::types::{CharacterRef, ColorTransform, Filter, Matrix, Rect, TagHandle};

use super::TagType;

/// PlaceObject: legacy placement with a mandatory matrix
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceObject {
    pub character: CharacterRef,
    pub depth: u16,
    pub matrix: Matrix,
    pub color_transform: Option<ColorTransform>,
}

/// PlaceObject2 or PlaceObject3
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceObject2 {
    /// 2 or 3
    pub version: u8,
    pub is_move: bool,
    pub depth: u16,
    /// PlaceObject3 only
    pub class_name: Option<String>,
    pub character: Option<CharacterRef>,
    pub matrix: Option<Matrix>,
    pub color_transform: Option<ColorTransform>,
    pub ratio: Option<u16>,
    pub name: Option<String>,
    pub clip_depth: Option<u16>,
    /// PlaceObject3 only
    pub filters: Option<Vec<Filter>>,
    /// PlaceObject3 only
    pub blend_mode: Option<u8>,
    /// PlaceObject3 only
    pub bitmap_cache: Option<u8>,
    /// PlaceObject3 only
    pub has_image: bool,
    /// Opaque clip action records
    pub clip_actions: Option<Vec<u8>>,
}

impl PlaceObject2 {
    pub fn new(depth: u16) -> Self {
        PlaceObject2 {
            version: 2,
            depth,
            ..Default::default()
        }
    }

    pub fn tag_type(&self) -> TagType {
        if self.version >= 3 {
            TagType::PlaceObject3
        } else {
            TagType::PlaceObject2
        }
    }
}

/// RemoveObject
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoveObject {
    pub character: CharacterRef,
    pub depth: u16,
}

/// RemoveObject2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveObject2 {
    pub depth: u16,
}

/// Movie clip with its own timeline
///
/// The control tags live in the same [`TagTable`](super::TagTable) as
/// every other tag and are never routed into the document's frames.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefineSprite {
    pub frame_count: u16,
    pub control_tags: Vec<TagHandle>,
}

/// Frame label, optionally a named anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLabel {
    pub name: String,
    pub named_anchor: bool,
}

/// Tab order of the object at a depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTabIndex {
    pub depth: u16,
    pub tab_index: u16,
}

/// 9-slice scaling rectangle for a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefineScalingGrid {
    pub character: CharacterRef,
    pub splitter: Rect,
}
