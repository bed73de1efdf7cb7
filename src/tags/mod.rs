//! Tag model
//!
//! Every decoded tag lives in a [`TagTable`] and is addressed by a
//! [`TagHandle`]. Tags that refer to other characters hold a
//! [`CharacterRef`](crate::types::CharacterRef) instead of the numeric
//! character ID found on disk; IDs are reassigned on every write.

use crate::types::{Color, TagHandle};

pub mod buttons;
pub mod control;
pub mod display;
pub mod fonts;
pub mod media;
pub mod shapes;
pub mod tag_type;
pub mod text;

pub use buttons::{DefineButton, DefineButton2, DefineButtonSound};
pub use control::{
    DoAbc, EnableDebugger2, EnableTelemetry, ExportAssets, FileAttributes, ProductInfo, RawTag,
    SceneAndFrameLabelData, ScriptLimits, SymbolClass,
};
pub use display::{
    DefineScalingGrid, DefineSprite, FrameLabel, PlaceObject, PlaceObject2, RemoveObject,
    RemoveObject2, SetTabIndex,
};
pub use fonts::{
    CsmTextSettings, DefineFont, DefineFont2, DefineFont4, DefineFontAlignZones, DefineFontInfo,
    DefineFontName,
};
pub use media::{
    DefineBinaryData, DefineBits, DefineBitsJpeg2, DefineBitsJpeg3, DefineBitsLossless,
    DefineSound, DefineVideoStream, JpegTables, SoundStreamBlock, SoundStreamHead, StartSound,
    StartSound2, VideoFrame, BITMAP_FORMAT_COLORMAPPED,
};
pub use shapes::{DefineMorphShape, DefineShape};
pub use tag_type::TagType;
pub use text::{DefineEditText, DefineText, TextLayout};

/// A decoded tag
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// End of a tag list
    End,
    /// Frame terminator
    ShowFrame,
    /// DefineShape through DefineShape4
    DefineShape(DefineShape),
    /// DefineMorphShape or DefineMorphShape2
    DefineMorphShape(DefineMorphShape),
    PlaceObject(PlaceObject),
    /// PlaceObject2 or PlaceObject3
    PlaceObject2(PlaceObject2),
    RemoveObject(RemoveObject),
    RemoveObject2(RemoveObject2),
    DefineBits(DefineBits),
    JpegTables(JpegTables),
    DefineBitsJpeg2(DefineBitsJpeg2),
    DefineBitsJpeg3(DefineBitsJpeg3),
    /// DefineBitsLossless or DefineBitsLossless2
    DefineBitsLossless(DefineBitsLossless),
    DefineButton(DefineButton),
    DefineButton2(DefineButton2),
    DefineButtonSound(DefineButtonSound),
    DefineFont(DefineFont),
    /// DefineFont2 or DefineFont3
    DefineFont2(DefineFont2),
    DefineFont4(DefineFont4),
    /// DefineFontInfo or DefineFontInfo2
    DefineFontInfo(DefineFontInfo),
    DefineFontAlignZones(DefineFontAlignZones),
    DefineFontName(DefineFontName),
    CsmTextSettings(CsmTextSettings),
    /// DefineText or DefineText2
    DefineText(DefineText),
    DefineEditText(DefineEditText),
    DefineSound(DefineSound),
    StartSound(StartSound),
    StartSound2(StartSound2),
    /// SoundStreamHead or SoundStreamHead2
    SoundStreamHead(SoundStreamHead),
    SoundStreamBlock(SoundStreamBlock),
    DefineVideoStream(DefineVideoStream),
    VideoFrame(VideoFrame),
    DefineBinaryData(DefineBinaryData),
    DefineSprite(DefineSprite),
    DefineScalingGrid(DefineScalingGrid),
    FrameLabel(FrameLabel),
    SetTabIndex(SetTabIndex),
    SetBackgroundColor(Color),
    FileAttributes(FileAttributes),
    /// XML metadata
    Metadata(String),
    SymbolClass(SymbolClass),
    ExportAssets(ExportAssets),
    DoAbc(DoAbc),
    DefineSceneAndFrameLabelData(SceneAndFrameLabelData),
    ScriptLimits(ScriptLimits),
    ProductInfo(ProductInfo),
    EnableDebugger2(EnableDebugger2),
    EnableTelemetry(EnableTelemetry),
    /// Any tag kept undecoded, including unknown codes
    Raw(RawTag),
}

impl Tag {
    /// The 10-bit code written in the tag header
    pub fn code(&self) -> u16 {
        match self {
            Tag::Raw(raw) => raw.code,
            other => other.known_type().code(),
        }
    }

    /// The tag type, `None` for raw tags with an unknown code
    pub fn tag_type(&self) -> Option<TagType> {
        match self {
            Tag::Raw(raw) => TagType::from_code(raw.code),
            other => Some(other.known_type()),
        }
    }

    fn known_type(&self) -> TagType {
        match self {
            Tag::End | Tag::Raw(_) => TagType::End,
            Tag::ShowFrame => TagType::ShowFrame,
            Tag::DefineShape(t) => t.tag_type(),
            Tag::DefineMorphShape(t) => t.tag_type(),
            Tag::PlaceObject(_) => TagType::PlaceObject,
            Tag::PlaceObject2(t) => t.tag_type(),
            Tag::RemoveObject(_) => TagType::RemoveObject,
            Tag::RemoveObject2(_) => TagType::RemoveObject2,
            Tag::DefineBits(_) => TagType::DefineBits,
            Tag::JpegTables(_) => TagType::JpegTables,
            Tag::DefineBitsJpeg2(_) => TagType::DefineBitsJpeg2,
            Tag::DefineBitsJpeg3(_) => TagType::DefineBitsJpeg3,
            Tag::DefineBitsLossless(t) => t.tag_type(),
            Tag::DefineButton(_) => TagType::DefineButton,
            Tag::DefineButton2(_) => TagType::DefineButton2,
            Tag::DefineButtonSound(_) => TagType::DefineButtonSound,
            Tag::DefineFont(_) => TagType::DefineFont,
            Tag::DefineFont2(t) => t.tag_type(),
            Tag::DefineFont4(_) => TagType::DefineFont4,
            Tag::DefineFontInfo(t) => t.tag_type(),
            Tag::DefineFontAlignZones(_) => TagType::DefineFontAlignZones,
            Tag::DefineFontName(_) => TagType::DefineFontName,
            Tag::CsmTextSettings(_) => TagType::CsmTextSettings,
            Tag::DefineText(t) => t.tag_type(),
            Tag::DefineEditText(_) => TagType::DefineEditText,
            Tag::DefineSound(_) => TagType::DefineSound,
            Tag::StartSound(_) => TagType::StartSound,
            Tag::StartSound2(_) => TagType::StartSound2,
            Tag::SoundStreamHead(t) => t.tag_type(),
            Tag::SoundStreamBlock(_) => TagType::SoundStreamBlock,
            Tag::DefineVideoStream(_) => TagType::DefineVideoStream,
            Tag::VideoFrame(_) => TagType::VideoFrame,
            Tag::DefineBinaryData(_) => TagType::DefineBinaryData,
            Tag::DefineSprite(_) => TagType::DefineSprite,
            Tag::DefineScalingGrid(_) => TagType::DefineScalingGrid,
            Tag::FrameLabel(_) => TagType::FrameLabel,
            Tag::SetTabIndex(_) => TagType::SetTabIndex,
            Tag::SetBackgroundColor(_) => TagType::SetBackgroundColor,
            Tag::FileAttributes(_) => TagType::FileAttributes,
            Tag::Metadata(_) => TagType::Metadata,
            Tag::SymbolClass(_) => TagType::SymbolClass,
            Tag::ExportAssets(_) => TagType::ExportAssets,
            Tag::DoAbc(_) => TagType::DoAbc,
            Tag::DefineSceneAndFrameLabelData(_) => TagType::DefineSceneAndFrameLabelData,
            Tag::ScriptLimits(_) => TagType::ScriptLimits,
            Tag::ProductInfo(_) => TagType::ProductInfo,
            Tag::EnableDebugger2(_) => TagType::EnableDebugger2,
            Tag::EnableTelemetry(_) => TagType::EnableTelemetry,
        }
    }

    /// Whether this tag defines a character and takes a character ID
    pub fn is_character(&self) -> bool {
        matches!(
            self,
            Tag::DefineShape(_)
                | Tag::DefineMorphShape(_)
                | Tag::DefineBits(_)
                | Tag::DefineBitsJpeg2(_)
                | Tag::DefineBitsJpeg3(_)
                | Tag::DefineBitsLossless(_)
                | Tag::DefineButton(_)
                | Tag::DefineButton2(_)
                | Tag::DefineFont(_)
                | Tag::DefineFont2(_)
                | Tag::DefineFont4(_)
                | Tag::DefineText(_)
                | Tag::DefineEditText(_)
                | Tag::DefineSound(_)
                | Tag::DefineVideoStream(_)
                | Tag::DefineBinaryData(_)
                | Tag::DefineSprite(_)
        )
    }

    /// Whether this is a font tag that can own a DefineFontName
    pub fn is_font(&self) -> bool {
        matches!(
            self,
            Tag::DefineFont(_) | Tag::DefineFont2(_) | Tag::DefineFont4(_)
        )
    }
}

/// Arena owning every tag of a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagTable {
    tags: Vec<Tag>,
}

impl TagTable {
    pub fn new() -> Self {
        TagTable { tags: Vec::new() }
    }

    /// Store a tag and return its handle
    pub fn push(&mut self, tag: Tag) -> TagHandle {
        let handle = TagHandle::new(self.tags.len());
        self.tags.push(tag);
        handle
    }

    pub fn get(&self, handle: TagHandle) -> Option<&Tag> {
        self.tags.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: TagHandle) -> Option<&mut Tag> {
        self.tags.get_mut(handle.index())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over all tags in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (TagHandle, &Tag)> {
        self.tags
            .iter()
            .enumerate()
            .map(|(i, tag)| (TagHandle::new(i), tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_codes() {
        assert_eq!(Tag::End.code(), 0);
        assert_eq!(Tag::ShowFrame.code(), 1);
        let raw = Tag::Raw(RawTag::new(200, vec![1, 2, 3]));
        assert_eq!(raw.code(), 200);
        assert_eq!(raw.tag_type(), None);
        let action = Tag::Raw(RawTag::new(12, Vec::new()));
        assert_eq!(action.tag_type(), Some(TagType::DoAction));
        let place = Tag::PlaceObject2(PlaceObject2 {
            version: 3,
            ..PlaceObject2::new(1)
        });
        assert_eq!(place.code(), 70);
    }

    #[test]
    fn test_character_classification() {
        assert!(Tag::DefineBinaryData(DefineBinaryData::default()).is_character());
        assert!(Tag::DefineSprite(DefineSprite::default()).is_character());
        assert!(!Tag::ShowFrame.is_character());
        assert!(!Tag::JpegTables(JpegTables::default()).is_character());
        assert!(Tag::DefineFont4(DefineFont4::default()).is_font());
    }

    #[test]
    fn test_table_handles_are_sequential() {
        let mut table = TagTable::new();
        let a = table.push(Tag::ShowFrame);
        let b = table.push(Tag::End);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b), Some(&Tag::End));
        assert!(table.get(TagHandle::new(5)).is_none());
        assert_eq!(table.iter().count(), 2);
    }
}
