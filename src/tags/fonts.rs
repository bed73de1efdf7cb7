//! Font definitions and their companion tags

use crate::types::{CharacterRef, FontFlags, FontLayout, Shape, TagHandle, ZoneRecord};

use super::TagType;

/// DefineFont: bare glyph outlines
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefineFont {
    pub glyphs: Vec<Shape>,
    /// DefineFontName companion
    pub license: Option<TagHandle>,
}

/// DefineFont2 or DefineFont3
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefineFont2 {
    /// 2 or 3
    pub version: u8,
    pub flags: FontFlags,
    pub wide_offsets: bool,
    pub wide_codes: bool,
    pub language_code: u8,
    pub name: String,
    pub glyphs: Vec<Shape>,
    /// One code per glyph, sorted ascending
    pub code_table: Vec<u16>,
    pub layout: Option<FontLayout>,
    /// DefineFontAlignZones companion (DefineFont3 only)
    pub zones: Option<TagHandle>,
    /// DefineFontName companion
    pub license: Option<TagHandle>,
}

impl DefineFont2 {
    pub fn tag_type(&self) -> TagType {
        if self.version >= 3 {
            TagType::DefineFont3
        } else {
            TagType::DefineFont2
        }
    }
}

/// DefineFont4: embedded CFF font data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefineFont4 {
    pub italic: bool,
    pub bold: bool,
    pub name: String,
    /// Empty when the font carries no data
    pub font_data: Vec<u8>,
    pub license: Option<TagHandle>,
}

/// DefineFontInfo or DefineFontInfo2
#[derive(Debug, Clone, PartialEq)]
pub struct DefineFontInfo {
    /// 1 or 2
    pub version: u8,
    pub font: CharacterRef,
    pub name: String,
    pub flags: FontFlags,
    pub wide_codes: bool,
    /// DefineFontInfo2 only
    pub language_code: u8,
    pub code_table: Vec<u16>,
}

impl DefineFontInfo {
    pub fn tag_type(&self) -> TagType {
        if self.version >= 2 {
            TagType::DefineFontInfo2
        } else {
            TagType::DefineFontInfo
        }
    }
}

/// Alignment zones for a DefineFont3, one record per glyph
#[derive(Debug, Clone, PartialEq)]
pub struct DefineFontAlignZones {
    pub font: CharacterRef,
    pub csm_table_hint: u8,
    pub zones: Vec<ZoneRecord>,
}

/// Font name and copyright notice
#[derive(Debug, Clone, PartialEq)]
pub struct DefineFontName {
    pub font: CharacterRef,
    pub name: String,
    pub copyright: String,
}

/// Advanced anti-aliasing settings for a text field
#[derive(Debug, Clone, PartialEq)]
pub struct CsmTextSettings {
    pub text: CharacterRef,
    pub use_flash_type: u8,
    pub grid_fit: u8,
    pub thickness: f32,
    pub sharpness: f32,
}
