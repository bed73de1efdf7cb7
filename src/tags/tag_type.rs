//! Tag type codes
//!
//! The 10-bit code stored in every tag header.

use std::fmt;

/// Known tag codes.
///
/// Codes outside this set decode to [`Tag::Raw`](super::Tag::Raw).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum TagType {
    End = 0,
    ShowFrame = 1,
    DefineShape = 2,
    PlaceObject = 4,
    RemoveObject = 5,
    DefineBits = 6,
    DefineButton = 7,
    JpegTables = 8,
    SetBackgroundColor = 9,
    DefineFont = 10,
    DefineText = 11,
    DoAction = 12,
    DefineFontInfo = 13,
    DefineSound = 14,
    StartSound = 15,
    DefineButtonSound = 17,
    SoundStreamHead = 18,
    SoundStreamBlock = 19,
    DefineBitsLossless = 20,
    DefineBitsJpeg2 = 21,
    DefineShape2 = 22,
    PlaceObject2 = 26,
    RemoveObject2 = 28,
    DefineShape3 = 32,
    DefineText2 = 33,
    DefineButton2 = 34,
    DefineBitsJpeg3 = 35,
    DefineBitsLossless2 = 36,
    DefineEditText = 37,
    DefineSprite = 39,
    ProductInfo = 41,
    FrameLabel = 43,
    SoundStreamHead2 = 45,
    DefineMorphShape = 46,
    DefineFont2 = 48,
    ExportAssets = 56,
    ImportAssets = 57,
    DoInitAction = 59,
    DefineVideoStream = 60,
    VideoFrame = 61,
    DefineFontInfo2 = 62,
    EnableDebugger2 = 64,
    ScriptLimits = 65,
    SetTabIndex = 66,
    FileAttributes = 69,
    PlaceObject3 = 70,
    ImportAssets2 = 71,
    DefineFontAlignZones = 73,
    CsmTextSettings = 74,
    DefineFont3 = 75,
    SymbolClass = 76,
    Metadata = 77,
    DefineScalingGrid = 78,
    DoAbc = 82,
    DefineShape4 = 83,
    DefineMorphShape2 = 84,
    DefineSceneAndFrameLabelData = 86,
    DefineBinaryData = 87,
    DefineFontName = 88,
    StartSound2 = 89,
    DefineFont4 = 91,
    EnableTelemetry = 93,
}

impl TagType {
    /// Look up a code; `None` for codes this crate does not model
    pub fn from_code(code: u16) -> Option<TagType> {
        use TagType::*;
        let t = match code {
            0 => End,
            1 => ShowFrame,
            2 => DefineShape,
            4 => PlaceObject,
            5 => RemoveObject,
            6 => DefineBits,
            7 => DefineButton,
            8 => JpegTables,
            9 => SetBackgroundColor,
            10 => DefineFont,
            11 => DefineText,
            12 => DoAction,
            13 => DefineFontInfo,
            14 => DefineSound,
            15 => StartSound,
            17 => DefineButtonSound,
            18 => SoundStreamHead,
            19 => SoundStreamBlock,
            20 => DefineBitsLossless,
            21 => DefineBitsJpeg2,
            22 => DefineShape2,
            26 => PlaceObject2,
            28 => RemoveObject2,
            32 => DefineShape3,
            33 => DefineText2,
            34 => DefineButton2,
            35 => DefineBitsJpeg3,
            36 => DefineBitsLossless2,
            37 => DefineEditText,
            39 => DefineSprite,
            41 => ProductInfo,
            43 => FrameLabel,
            45 => SoundStreamHead2,
            46 => DefineMorphShape,
            48 => DefineFont2,
            56 => ExportAssets,
            57 => ImportAssets,
            59 => DoInitAction,
            60 => DefineVideoStream,
            61 => VideoFrame,
            62 => DefineFontInfo2,
            64 => EnableDebugger2,
            65 => ScriptLimits,
            66 => SetTabIndex,
            69 => FileAttributes,
            70 => PlaceObject3,
            71 => ImportAssets2,
            73 => DefineFontAlignZones,
            74 => CsmTextSettings,
            75 => DefineFont3,
            76 => SymbolClass,
            77 => Metadata,
            78 => DefineScalingGrid,
            82 => DoAbc,
            83 => DefineShape4,
            84 => DefineMorphShape2,
            86 => DefineSceneAndFrameLabelData,
            87 => DefineBinaryData,
            88 => DefineFontName,
            89 => StartSound2,
            91 => DefineFont4,
            93 => EnableTelemetry,
            _ => return None,
        };
        Some(t)
    }

    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Tags that are always framed with the long (32-bit length) header
    pub fn is_always_long(self) -> bool {
        matches!(
            self,
            TagType::DefineBits
                | TagType::DefineBitsJpeg2
                | TagType::DefineBitsJpeg3
                | TagType::DefineBitsLossless
                | TagType::DefineBitsLossless2
                | TagType::SoundStreamBlock
        )
    }

    /// Glyph outlines whose style-change fill indices carry no meaning
    pub fn is_glyph_font(self) -> bool {
        matches!(
            self,
            TagType::DefineFont | TagType::DefineFont2 | TagType::DefineFont3
        )
    }

    /// Shape variants that honour mid-outline style replacement
    pub fn supports_new_styles(self) -> bool {
        matches!(
            self,
            TagType::DefineShape2 | TagType::DefineShape3 | TagType::DefineShape4
        )
    }

    /// Shape variants whose colors carry an alpha channel
    pub fn has_alpha_colors(self) -> bool {
        matches!(
            self,
            TagType::DefineShape3
                | TagType::DefineShape4
                | TagType::DefineMorphShape
                | TagType::DefineMorphShape2
        )
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_lookup() {
        for code in 0u16..100 {
            if let Some(t) = TagType::from_code(code) {
                assert_eq!(t.code(), code);
            }
        }
        assert_eq!(TagType::from_code(26), Some(TagType::PlaceObject2));
        assert_eq!(TagType::from_code(3), None);
        assert_eq!(TagType::from_code(1000), None);
    }

    #[test]
    fn test_groups() {
        assert!(TagType::DefineBitsLossless.is_always_long());
        assert!(!TagType::DefineShape.is_always_long());
        assert!(TagType::DefineFont3.is_glyph_font());
        assert!(!TagType::DefineFont4.is_glyph_font());
        assert!(TagType::DefineShape2.supports_new_styles());
        assert!(!TagType::DefineShape.supports_new_styles());
    }
}
