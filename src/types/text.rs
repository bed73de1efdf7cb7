//! Text and font sub-records

use super::{CharacterRef, Color, Rect};

/// One glyph in a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphEntry {
    pub glyph_index: u32,
    pub glyph_advance: i32,
}

/// A styled run of glyphs inside DefineText/DefineText2
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRecord {
    /// Font and text height, both present or both absent
    pub font: Option<(CharacterRef, u16)>,
    /// RGB in DefineText, RGBA in DefineText2
    pub color: Option<Color>,
    pub x_offset: Option<i16>,
    pub y_offset: Option<i16>,
    pub glyphs: Vec<GlyphEntry>,
}

/// Pair kerning adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KerningRecord {
    pub code1: u16,
    pub code2: u16,
    pub adjustment: i16,
}

/// Layout tables of DefineFont2/DefineFont3
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontLayout {
    pub ascent: i16,
    pub descent: i16,
    pub leading: i16,
    /// One entry per glyph
    pub advances: Vec<i16>,
    /// One entry per glyph
    pub bounds: Vec<Rect>,
    pub kerning: Vec<KerningRecord>,
}

/// Alignment zone for one glyph
///
/// Zone data are raw 32-bit values (two half-floats each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZoneRecord {
    pub zone_data: [u32; 2],
    pub mask_y: bool,
    pub mask_x: bool,
}

/// Style flags shared by the font tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontFlags {
    pub shift_jis: bool,
    pub small_text: bool,
    pub ansi: bool,
    pub italic: bool,
    pub bold: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_record_defaults() {
        let rec = TextRecord::default();
        assert!(rec.font.is_none());
        assert!(rec.glyphs.is_empty());
    }
}
