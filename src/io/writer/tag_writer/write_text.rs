//! Font and text encoders

use crate::error::{Result, SwfError};
use crate::io::bit_width::{require_sb_all, require_ub};
use crate::tags::{
    CsmTextSettings, DefineEditText, DefineFont, DefineFont2, DefineFont4, DefineFontAlignZones,
    DefineFontInfo, DefineFontName, DefineText, TagType,
};
use crate::types::{FontLayout, Shape, TextRecord};

use super::common::{write_color, write_matrix, write_rect, write_rgba};
use super::TagWriter;

/// Zones per alignment record
const ZONES_PER_GLYPH: u8 = 2;

impl<'a> TagWriter<'a> {
    // ---------------------------------------------------------------
    // Fonts
    // ---------------------------------------------------------------

    /// DefineFont; offsets are relative to the start of the offset table.
    pub(super) fn write_define_font(&mut self, id: u16, font: &DefineFont) -> Result<()> {
        self.body.write_u16(id)?;
        if font.glyphs.is_empty() {
            return Ok(());
        }

        let glyphs = self.encode_glyphs(TagType::DefineFont, &font.glyphs)?;
        let mut offset = font.glyphs.len() * 2;
        for glyph in &glyphs {
            let value = u16::try_from(offset)
                .map_err(|_| SwfError::Malformed("DefineFont glyph table is too large".into()))?;
            self.body.write_u16(value)?;
            offset += glyph.len();
        }
        for glyph in &glyphs {
            self.body.write_bytes(glyph)?;
        }
        Ok(())
    }

    /// DefineFont2 or DefineFont3.
    ///
    /// Offsets and codes are widened when the flags ask for it or when the
    /// values do not fit the narrow form.
    pub(super) fn write_define_font2(&mut self, id: u16, font: &DefineFont2) -> Result<()> {
        let tag_type = font.tag_type();
        let count = font.glyphs.len();
        if font.code_table.len() != count {
            return Err(SwfError::Malformed(format!(
                "{} has {} glyphs but {} codes",
                tag_type,
                count,
                font.code_table.len()
            )));
        }
        if let Some(layout) = &font.layout {
            check_layout(layout, count)?;
        }
        let glyph_count = u16::try_from(count)
            .map_err(|_| SwfError::Malformed(format!("{} glyphs exceed 65535", count)))?;

        let glyphs = self.encode_glyphs(tag_type, &font.glyphs)?;
        let glyph_bytes: usize = glyphs.iter().map(Vec::len).sum();
        let narrow_end = (count + 1) * 2 + glyph_bytes;
        let wide_offsets = font.wide_offsets || narrow_end > u16::MAX as usize;

        let kerning_codes = font
            .layout
            .iter()
            .flat_map(|layout| layout.kerning.iter())
            .flat_map(|k| [k.code1, k.code2]);
        let wide_codes = font.wide_codes
            || font
                .code_table
                .iter()
                .copied()
                .chain(kerning_codes)
                .any(|code| code > u8::MAX as u16);

        self.body.write_u16(id)?;
        self.body.write_bit(font.layout.is_some());
        self.body.write_bit(font.flags.shift_jis);
        self.body.write_bit(font.flags.small_text);
        self.body.write_bit(font.flags.ansi);
        self.body.write_bit(wide_offsets);
        self.body.write_bit(wide_codes);
        self.body.write_bit(font.flags.italic);
        self.body.write_bit(font.flags.bold);
        self.body.write_u8(font.language_code)?;
        self.write_length_string(&font.name)?;
        self.body.write_u16(glyph_count)?;

        if count > 0 {
            let entry_size = if wide_offsets { 4 } else { 2 };
            // The code table offset follows the glyph offsets
            let mut offset = (count + 1) * entry_size;
            for glyph in &glyphs {
                self.write_offset(offset, wide_offsets)?;
                offset += glyph.len();
            }
            self.write_offset(offset, wide_offsets)?;
            for glyph in &glyphs {
                self.body.write_bytes(glyph)?;
            }
        }

        for &code in &font.code_table {
            self.write_code(code, wide_codes)?;
        }

        if let Some(layout) = &font.layout {
            self.body.write_i16(layout.ascent)?;
            self.body.write_i16(layout.descent)?;
            self.body.write_i16(layout.leading)?;
            for &advance in &layout.advances {
                self.body.write_i16(advance)?;
            }
            for bounds in &layout.bounds {
                write_rect(&mut self.body, bounds)?;
            }
            let kerning_count = u16::try_from(layout.kerning.len())
                .map_err(|_| SwfError::Malformed("too many kerning records".into()))?;
            self.body.write_u16(kerning_count)?;
            for kerning in &layout.kerning {
                self.write_code(kerning.code1, wide_codes)?;
                self.write_code(kerning.code2, wide_codes)?;
                self.body.write_i16(kerning.adjustment)?;
            }
        }
        Ok(())
    }

    /// Encode each glyph outline on its own so its length is known.
    fn encode_glyphs(&mut self, tag_type: TagType, glyphs: &[Shape]) -> Result<Vec<Vec<u8>>> {
        glyphs
            .iter()
            .map(|glyph| self.nested(|writer| writer.write_shape(tag_type, glyph, 0, 0)))
            .collect()
    }

    fn write_offset(&mut self, offset: usize, wide: bool) -> Result<()> {
        if wide {
            let value = u32::try_from(offset)
                .map_err(|_| SwfError::Malformed("font glyph table is too large".into()))?;
            self.body.write_u32(value)
        } else {
            self.body.write_u16(offset as u16)
        }
    }

    fn write_code(&mut self, code: u16, wide: bool) -> Result<()> {
        if wide {
            self.body.write_u16(code)
        } else {
            self.body.write_u8(code as u8)
        }
    }

    /// The data flag is derived from the payload.
    pub(super) fn write_define_font4(&mut self, id: u16, font: &DefineFont4) -> Result<()> {
        self.body.write_u16(id)?;
        self.body.write_ub(0, 5)?; // reserved
        self.body.write_bit(!font.font_data.is_empty());
        self.body.write_bit(font.italic);
        self.body.write_bit(font.bold);
        self.body.write_string(&font.name)?;
        self.body.write_bytes(&font.font_data)
    }

    pub(super) fn write_define_font_info(&mut self, info: &DefineFontInfo) -> Result<()> {
        let wide_codes = info.wide_codes || info.code_table.iter().any(|&c| c > u8::MAX as u16);
        self.write_character_ref(info.font)?;
        self.write_length_string(&info.name)?;
        self.body.write_ub(0, 2)?; // reserved
        self.body.write_bit(info.flags.small_text);
        self.body.write_bit(info.flags.shift_jis);
        self.body.write_bit(info.flags.ansi);
        self.body.write_bit(info.flags.italic);
        self.body.write_bit(info.flags.bold);
        self.body.write_bit(wide_codes);
        if info.tag_type() == TagType::DefineFontInfo2 {
            self.body.write_u8(info.language_code)?;
        }
        for &code in &info.code_table {
            self.write_code(code, wide_codes)?;
        }
        Ok(())
    }

    pub(super) fn write_define_font_align_zones(
        &mut self,
        zones: &DefineFontAlignZones,
    ) -> Result<()> {
        self.write_character_ref(zones.font)?;
        self.body.write_ub(zones.csm_table_hint as u32, 2)?;
        self.body.write_ub(0, 6)?; // reserved
        for zone in &zones.zones {
            self.body.write_u8(ZONES_PER_GLYPH)?;
            self.body.write_u32(zone.zone_data[0])?;
            self.body.write_u32(zone.zone_data[1])?;
            self.body.write_ub(0, 6)?; // reserved
            self.body.write_bit(zone.mask_y);
            self.body.write_bit(zone.mask_x);
        }
        Ok(())
    }

    pub(super) fn write_define_font_name(&mut self, name: &DefineFontName) -> Result<()> {
        self.write_character_ref(name.font)?;
        self.body.write_string(&name.name)?;
        self.body.write_string(&name.copyright)
    }

    pub(super) fn write_csm_text_settings(&mut self, settings: &CsmTextSettings) -> Result<()> {
        self.write_character_ref(settings.text)?;
        self.body.write_ub(settings.use_flash_type as u32, 2)?;
        self.body.write_ub(settings.grid_fit as u32, 3)?;
        self.body.write_ub(0, 3)?; // reserved
        self.body.write_f32(settings.thickness)?;
        self.body.write_f32(settings.sharpness)?;
        self.body.write_u8(0) // reserved
    }

    // ---------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------

    /// DefineText or DefineText2; glyph and advance widths cover every
    /// record of the tag.
    pub(super) fn write_define_text(&mut self, id: u16, text: &DefineText) -> Result<()> {
        let glyphs = text.records.iter().flat_map(|r| r.glyphs.iter());
        let max_index = glyphs.clone().map(|g| g.glyph_index).max().unwrap_or(0);
        let advances: Vec<i32> = glyphs.map(|g| g.glyph_advance).collect();
        let glyph_bits = require_ub(max_index);
        let advance_bits = require_sb_all(&advances);
        let has_alpha = text.tag_type() == TagType::DefineText2;

        self.body.write_u16(id)?;
        write_rect(&mut self.body, &text.bounds)?;
        write_matrix(&mut self.body, &text.matrix)?;
        self.body.write_u8(glyph_bits as u8)?;
        self.body.write_u8(advance_bits as u8)?;
        for record in &text.records {
            self.write_text_record(record, has_alpha, glyph_bits, advance_bits)?;
        }
        self.body.write_u8(0) // end of records
    }

    fn write_text_record(
        &mut self,
        record: &TextRecord,
        has_alpha: bool,
        glyph_bits: u32,
        advance_bits: u32,
    ) -> Result<()> {
        let count = u8::try_from(record.glyphs.len()).map_err(|_| {
            SwfError::Malformed(format!(
                "text record holds {} glyphs, at most 255 fit",
                record.glyphs.len()
            ))
        })?;

        self.body.byte_align();
        self.body.write_bit(true);
        self.body.write_ub(0, 3)?; // reserved
        self.body.write_bit(record.font.is_some());
        self.body.write_bit(record.color.is_some());
        self.body.write_bit(record.y_offset.is_some());
        self.body.write_bit(record.x_offset.is_some());

        if let Some((font, _)) = record.font {
            self.write_character_ref(font)?;
        }
        if let Some(color) = &record.color {
            write_color(&mut self.body, color, has_alpha)?;
        }
        if let Some(x) = record.x_offset {
            self.body.write_i16(x)?;
        }
        if let Some(y) = record.y_offset {
            self.body.write_i16(y)?;
        }
        if let Some((_, height)) = record.font {
            self.body.write_u16(height)?;
        }

        self.body.write_u8(count)?;
        for glyph in &record.glyphs {
            self.body.write_ub(glyph.glyph_index, glyph_bits)?;
            self.body.write_sb(glyph.glyph_advance, advance_bits)?;
        }
        Ok(())
    }

    pub(super) fn write_define_edit_text(&mut self, id: u16, text: &DefineEditText) -> Result<()> {
        self.body.write_u16(id)?;
        write_rect(&mut self.body, &text.bounds)?;

        self.body.write_bit(text.initial_text.is_some());
        self.body.write_bit(text.word_wrap);
        self.body.write_bit(text.multiline);
        self.body.write_bit(text.password);
        self.body.write_bit(text.read_only);
        self.body.write_bit(text.text_color.is_some());
        self.body.write_bit(text.max_length.is_some());
        self.body.write_bit(text.font.is_some());
        self.body.write_bit(text.font_class.is_some());
        self.body.write_bit(text.auto_size);
        self.body.write_bit(text.layout.is_some());
        self.body.write_bit(text.no_select);
        self.body.write_bit(text.border);
        self.body.write_bit(text.was_static);
        self.body.write_bit(text.html);
        self.body.write_bit(text.use_outlines);

        if let Some(font) = text.font {
            self.write_character_ref(font)?;
            self.body.write_u16(text.font_height)?;
        }
        if let Some(class) = &text.font_class {
            self.body.write_string(class)?;
            self.body.write_u16(text.font_height)?;
        }
        if let Some(color) = &text.text_color {
            write_rgba(&mut self.body, color)?;
        }
        if let Some(max_length) = text.max_length {
            self.body.write_u16(max_length)?;
        }
        if let Some(layout) = &text.layout {
            self.body.write_u8(layout.align)?;
            self.body.write_u16(layout.left_margin)?;
            self.body.write_u16(layout.right_margin)?;
            self.body.write_u16(layout.indent)?;
            self.body.write_i16(layout.leading)?;
        }
        self.body.write_string(&text.variable_name)?;
        if let Some(initial) = &text.initial_text {
            self.body.write_string(initial)?;
        }
        Ok(())
    }
}

fn check_layout(layout: &FontLayout, count: usize) -> Result<()> {
    if layout.advances.len() != count || layout.bounds.len() != count {
        return Err(SwfError::Malformed(format!(
            "font layout holds {} advances and {} bounds for {} glyphs",
            layout.advances.len(),
            layout.bounds.len(),
            count
        )));
    }
    Ok(())
}
