//! Static and dynamic text

use crate::types::{CharacterRef, Color, Matrix, Rect, TagHandle, TextRecord};

use super::TagType;

/// DefineText or DefineText2
#[derive(Debug, Clone, PartialEq)]
pub struct DefineText {
    /// 1 or 2; version 2 stores RGBA record colors
    pub version: u8,
    pub bounds: Rect,
    pub matrix: Matrix,
    pub records: Vec<TextRecord>,
    /// CsmTextSettings companion
    pub csm_settings: Option<TagHandle>,
}

impl DefineText {
    pub fn tag_type(&self) -> TagType {
        if self.version >= 2 {
            TagType::DefineText2
        } else {
            TagType::DefineText
        }
    }
}

/// Paragraph layout of an edit text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextLayout {
    pub align: u8,
    pub left_margin: u16,
    pub right_margin: u16,
    pub indent: u16,
    pub leading: i16,
}

/// DefineEditText
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefineEditText {
    pub bounds: Rect,
    pub word_wrap: bool,
    pub multiline: bool,
    pub password: bool,
    pub read_only: bool,
    pub auto_size: bool,
    pub no_select: bool,
    pub border: bool,
    pub was_static: bool,
    pub html: bool,
    pub use_outlines: bool,
    pub font: Option<CharacterRef>,
    pub font_class: Option<String>,
    /// Written whenever a font or font class is present
    pub font_height: u16,
    pub text_color: Option<Color>,
    pub max_length: Option<u16>,
    pub layout: Option<TextLayout>,
    pub variable_name: String,
    pub initial_text: Option<String>,
    /// CsmTextSettings companion
    pub csm_settings: Option<TagHandle>,
}
