//! Font and text decoders

use crate::error::{Result, SwfError};
use crate::notification::NotificationType;
use crate::tags::{
    CsmTextSettings, DefineEditText, DefineFont, DefineFont2, DefineFont4, DefineFontAlignZones,
    DefineFontInfo, DefineFontName, DefineText, Tag, TagType, TextLayout,
};
use crate::types::{
    FontFlags, FontLayout, GlyphEntry, KerningRecord, TextRecord, ZoneRecord,
};

use super::common::{read_color, read_matrix, read_rect, read_rgba};
use super::{TagHeader, TagReader};

impl TagReader {
    // ---------------------------------------------------------------
    // Fonts
    // ---------------------------------------------------------------

    /// DefineFont; the glyph count is half the first offset.
    pub(crate) fn read_define_font(&mut self) -> Result<(u16, DefineFont)> {
        let id = self.reader.read_u16()?;
        let mut font = DefineFont::default();
        if self.reader.available() == 0 {
            return Ok((id, font));
        }

        let first_offset = self.reader.read_u16()?;
        let count = (first_offset / 2) as usize;
        if count > 1 {
            self.reader.skip((count - 1) * 2)?;
        }
        for _ in 0..count {
            font.glyphs.push(self.read_shape(TagType::DefineFont, 0, 0)?);
        }
        Ok((id, font))
    }

    /// DefineFont2 or DefineFont3.
    pub(crate) fn read_define_font2(&mut self, tag_type: TagType) -> Result<(u16, DefineFont2)> {
        let id = self.reader.read_u16()?;
        let has_layout = self.reader.read_bit()?;
        let flags_shift_jis = self.reader.read_bit()?;
        let flags_small_text = self.reader.read_bit()?;
        let flags_ansi = self.reader.read_bit()?;
        let wide_offsets = self.reader.read_bit()?;
        let wide_codes = self.reader.read_bit()?;
        let flags_italic = self.reader.read_bit()?;
        let flags_bold = self.reader.read_bit()?;
        let language_code = self.reader.read_u8()?;
        let name = self.read_length_string()?;
        let count = self.reader.read_u16()? as usize;

        // Offset table and code table offset; both are derived on write
        let offset_size = if wide_offsets { 4 } else { 2 };
        if count > 0 {
            self.reader.skip((count + 1) * offset_size)?;
        }

        let mut glyphs = Vec::with_capacity(count);
        for _ in 0..count {
            glyphs.push(self.read_shape(tag_type, 0, 0)?);
        }

        let mut code_table = Vec::with_capacity(count);
        for _ in 0..count {
            code_table.push(self.read_code(wide_codes)?);
        }

        let layout = if has_layout {
            let ascent = self.reader.read_i16()?;
            let descent = self.reader.read_i16()?;
            let leading = self.reader.read_i16()?;
            let mut advances = Vec::with_capacity(count);
            for _ in 0..count {
                advances.push(self.reader.read_i16()?);
            }
            let mut bounds = Vec::with_capacity(count);
            for _ in 0..count {
                bounds.push(read_rect(&mut self.reader)?);
            }
            let kerning_count = self.reader.read_u16()?;
            let mut kerning = Vec::with_capacity(kerning_count as usize);
            for _ in 0..kerning_count {
                kerning.push(KerningRecord {
                    code1: self.read_code(wide_codes)?,
                    code2: self.read_code(wide_codes)?,
                    adjustment: self.reader.read_i16()?,
                });
            }
            Some(FontLayout {
                ascent,
                descent,
                leading,
                advances,
                bounds,
                kerning,
            })
        } else {
            None
        };

        Ok((
            id,
            DefineFont2 {
                version: if tag_type == TagType::DefineFont3 { 3 } else { 2 },
                flags: FontFlags {
                    shift_jis: flags_shift_jis,
                    small_text: flags_small_text,
                    ansi: flags_ansi,
                    italic: flags_italic,
                    bold: flags_bold,
                },
                wide_offsets,
                wide_codes,
                language_code,
                name,
                glyphs,
                code_table,
                layout,
                zones: None,
                license: None,
            },
        ))
    }

    fn read_code(&mut self, wide: bool) -> Result<u16> {
        if wide {
            self.reader.read_u16()
        } else {
            Ok(self.reader.read_u8()? as u16)
        }
    }

    pub(crate) fn read_define_font4(&mut self) -> Result<(u16, DefineFont4)> {
        let id = self.reader.read_u16()?;
        self.reader.read_ub(5)?; // reserved
        // Data flag; the payload runs to the end of the tag either way
        self.reader.read_bit()?;
        let italic = self.reader.read_bit()?;
        let bold = self.reader.read_bit()?;
        let name = self.reader.read_string()?;
        let font_data = self.reader.read_to_boundary()?;
        Ok((
            id,
            DefineFont4 {
                italic,
                bold,
                name,
                font_data,
                license: None,
            },
        ))
    }

    pub(crate) fn read_define_font_info(&mut self, tag_type: TagType) -> Result<DefineFontInfo> {
        let font = self.read_character_ref()?;
        let name = self.read_length_string()?;
        self.reader.read_ub(2)?; // reserved
        let small_text = self.reader.read_bit()?;
        let shift_jis = self.reader.read_bit()?;
        let ansi = self.reader.read_bit()?;
        let italic = self.reader.read_bit()?;
        let bold = self.reader.read_bit()?;
        let wide_codes = self.reader.read_bit()?;
        let language_code = if tag_type == TagType::DefineFontInfo2 {
            self.reader.read_u8()?
        } else {
            0
        };

        let code_size = if wide_codes { 2 } else { 1 };
        let count = self.reader.available() as usize / code_size;
        let mut code_table = Vec::with_capacity(count);
        for _ in 0..count {
            code_table.push(self.read_code(wide_codes)?);
        }

        Ok(DefineFontInfo {
            version: if tag_type == TagType::DefineFontInfo2 { 2 } else { 1 },
            font,
            name,
            flags: FontFlags {
                shift_jis,
                small_text,
                ansi,
                italic,
                bold,
            },
            wide_codes,
            language_code,
            code_table,
        })
    }

    /// Alignment zones; the target must be a DefineFont3 already decoded.
    pub(crate) fn read_define_font_align_zones(&mut self) -> Result<DefineFontAlignZones> {
        let font = self.read_character_ref()?;
        let glyph_count = match self.referenced_tag(font) {
            Some(Tag::DefineFont2(target)) if target.version >= 3 => target.glyphs.len(),
            _ => {
                return Err(SwfError::Malformed(
                    "DefineFontAlignZones target is not a DefineFont3".to_string(),
                ))
            }
        };

        let csm_table_hint = self.reader.read_ub(2)? as u8;
        self.reader.read_ub(6)?; // reserved

        let mut zones = Vec::with_capacity(glyph_count);
        for _ in 0..glyph_count {
            let zone_count = self.reader.read_u8()?;
            if zone_count != 2 {
                return Err(SwfError::Malformed(format!(
                    "zone record holds {} zones, expected 2",
                    zone_count
                )));
            }
            let zone_data = [self.reader.read_u32()?, self.reader.read_u32()?];
            self.reader.read_ub(6)?; // reserved
            let mask_y = self.reader.read_bit()?;
            let mask_x = self.reader.read_bit()?;
            zones.push(ZoneRecord {
                zone_data,
                mask_y,
                mask_x,
            });
        }

        Ok(DefineFontAlignZones {
            font,
            csm_table_hint,
            zones,
        })
    }

    pub(crate) fn read_define_font_name(&mut self) -> Result<DefineFontName> {
        let font = self.read_character_ref()?;
        Ok(DefineFontName {
            font,
            name: self.reader.read_string()?,
            copyright: self.reader.read_string()?,
        })
    }

    /// CSMTextSettings; a target that is not a text tag is kept with a warning.
    pub(crate) fn read_csm_text_settings(&mut self, header: &TagHeader) -> Result<CsmTextSettings> {
        let id = self.reader.read_u16()?;
        let text = self.lookup(id)?;
        let use_flash_type = self.reader.read_ub(2)? as u8;
        let grid_fit = self.reader.read_ub(3)? as u8;
        self.reader.read_ub(3)?; // reserved
        let thickness = self.reader.read_f32()?;
        let sharpness = self.reader.read_f32()?;
        self.reader.read_u8()?; // reserved

        let is_text = matches!(
            self.referenced_tag(text),
            Some(Tag::DefineText(_)) | Some(Tag::DefineEditText(_))
        );
        if !is_text && !text.is_invalid() {
            self.tag_problem(
                NotificationType::Warning,
                format!("CSMTextSettings target {} is not a text tag", id),
                header,
            );
        }

        Ok(CsmTextSettings {
            text,
            use_flash_type,
            grid_fit,
            thickness,
            sharpness,
        })
    }

    // ---------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------

    /// DefineText or DefineText2.
    pub(crate) fn read_define_text(&mut self, tag_type: TagType) -> Result<(u16, DefineText)> {
        let id = self.reader.read_u16()?;
        let bounds = read_rect(&mut self.reader)?;
        let matrix = read_matrix(&mut self.reader)?;
        let glyph_bits = self.reader.read_u8()? as u32;
        let advance_bits = self.reader.read_u8()? as u32;
        let has_alpha = tag_type == TagType::DefineText2;

        let mut records = Vec::new();
        while let Some(record) = self.read_text_record(has_alpha, glyph_bits, advance_bits)? {
            records.push(record);
        }

        Ok((
            id,
            DefineText {
                version: if has_alpha { 2 } else { 1 },
                bounds,
                matrix,
                records,
                csm_settings: None,
            },
        ))
    }

    /// One TEXTRECORD, `None` at the end marker.
    fn read_text_record(
        &mut self,
        has_alpha: bool,
        glyph_bits: u32,
        advance_bits: u32,
    ) -> Result<Option<TextRecord>> {
        self.reader.byte_align();
        if !self.reader.read_bit()? {
            return Ok(None);
        }
        self.reader.read_ub(3)?; // reserved
        let has_font = self.reader.read_bit()?;
        let has_color = self.reader.read_bit()?;
        let has_y_offset = self.reader.read_bit()?;
        let has_x_offset = self.reader.read_bit()?;

        let font = if has_font {
            Some(self.read_character_ref()?)
        } else {
            None
        };
        let color = if has_color {
            Some(read_color(&mut self.reader, has_alpha)?)
        } else {
            None
        };
        let x_offset = if has_x_offset {
            Some(self.reader.read_i16()?)
        } else {
            None
        };
        let y_offset = if has_y_offset {
            Some(self.reader.read_i16()?)
        } else {
            None
        };
        let font = match font {
            Some(font) => Some((font, self.reader.read_u16()?)),
            None => None,
        };

        let count = self.reader.read_u8()?;
        let mut glyphs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            glyphs.push(GlyphEntry {
                glyph_index: self.reader.read_ub(glyph_bits)?,
                glyph_advance: self.reader.read_sb(advance_bits)?,
            });
        }

        Ok(Some(TextRecord {
            font,
            color,
            x_offset,
            y_offset,
            glyphs,
        }))
    }

    pub(crate) fn read_define_edit_text(&mut self) -> Result<(u16, DefineEditText)> {
        let id = self.reader.read_u16()?;
        let mut text = DefineEditText {
            bounds: read_rect(&mut self.reader)?,
            ..Default::default()
        };

        let has_text = self.reader.read_bit()?;
        text.word_wrap = self.reader.read_bit()?;
        text.multiline = self.reader.read_bit()?;
        text.password = self.reader.read_bit()?;
        text.read_only = self.reader.read_bit()?;
        let has_text_color = self.reader.read_bit()?;
        let has_max_length = self.reader.read_bit()?;
        let has_font = self.reader.read_bit()?;
        let has_font_class = self.reader.read_bit()?;
        text.auto_size = self.reader.read_bit()?;
        let has_layout = self.reader.read_bit()?;
        text.no_select = self.reader.read_bit()?;
        text.border = self.reader.read_bit()?;
        text.was_static = self.reader.read_bit()?;
        text.html = self.reader.read_bit()?;
        text.use_outlines = self.reader.read_bit()?;

        // Font and font class are exclusive, but files with both exist
        if has_font {
            text.font = Some(self.read_character_ref()?);
            text.font_height = self.reader.read_u16()?;
        }
        if has_font_class {
            text.font_class = Some(self.reader.read_string()?);
            text.font_height = self.reader.read_u16()?;
        }
        if has_text_color {
            text.text_color = Some(read_rgba(&mut self.reader)?);
        }
        if has_max_length {
            text.max_length = Some(self.reader.read_u16()?);
        }
        if has_layout {
            text.layout = Some(TextLayout {
                align: self.reader.read_u8()?,
                left_margin: self.reader.read_u16()?,
                right_margin: self.reader.read_u16()?,
                indent: self.reader.read_u16()?,
                leading: self.reader.read_i16()?,
            });
        }
        text.variable_name = self.reader.read_string()?;
        if has_text {
            text.initial_text = Some(self.reader.read_string()?);
        }

        Ok((id, text))
    }
}
