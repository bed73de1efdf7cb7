//! Shape, style and morph shape encoders
//!
//! Index widths are derived from the style tables they select from. A
//! style change record that brings new styles writes its own indices with
//! the widths of the tables it replaces, so those widths are widened to
//! cover the indices the record carries.

use crate::error::{Result, SwfError};
use crate::io::bit_width::{require_sb_all, require_ub};
use crate::tags::{DefineMorphShape, DefineShape, TagType};
use crate::types::styles::{fill_type, JOIN_MITER};
use crate::types::{
    CurvedEdge, FillStyle, Gradient, LineFill, LineStyle, LineStyle2, MorphFillStyle,
    MorphLineFill, MorphLineStyle, MorphLineStyle2, Shape, ShapeRecord, ShapeWithStyle,
    StraightEdge, StyleChangeRecord, StyleContext,
};

use super::common::{write_color, write_matrix, write_rect, write_rgba};
use super::TagWriter;

/// Style array count byte announcing a UI16 count
const EXTENDED_COUNT: usize = 0xFF;
/// Gradient record count is a 4-bit field
const MAX_GRADIENT_RECORDS: usize = 15;
/// Edge widths are stored as width - 2 in 4 bits
const MIN_EDGE_BITS: u32 = 2;

impl<'a> TagWriter<'a> {
    // ---------------------------------------------------------------
    // Shape tags
    // ---------------------------------------------------------------

    pub(super) fn write_define_shape(&mut self, id: u16, shape: &DefineShape) -> Result<()> {
        let tag_type = shape.tag_type();
        self.body.write_u16(id)?;
        write_rect(&mut self.body, &shape.bounds)?;

        if tag_type == TagType::DefineShape4 {
            write_rect(&mut self.body, &shape.edge_bounds)?;
            self.body.write_ub(0, 5)?; // reserved
            self.body.write_bit(shape.uses_fill_winding_rule);
            self.body.write_bit(shape.uses_non_scaling_strokes);
            self.body.write_bit(shape.uses_scaling_strokes);
        }

        self.write_shape_with_style(tag_type, &shape.shapes)
    }

    /// Styles and start edges go to a scratch buffer first so the offset
    /// to the end edges can precede them.
    pub(super) fn write_define_morph_shape(
        &mut self,
        id: u16,
        morph: &DefineMorphShape,
    ) -> Result<()> {
        let tag_type = morph.tag_type();
        self.body.write_u16(id)?;
        write_rect(&mut self.body, &morph.start_bounds)?;
        write_rect(&mut self.body, &morph.end_bounds)?;
        if tag_type == TagType::DefineMorphShape2 {
            write_rect(&mut self.body, &morph.start_edge_bounds)?;
            write_rect(&mut self.body, &morph.end_edge_bounds)?;
            self.body.write_ub(0, 6)?; // reserved
            self.body.write_bit(morph.uses_non_scaling_strokes);
            self.body.write_bit(morph.uses_scaling_strokes);
        }

        let start = self.nested(|writer| {
            writer.write_style_count(morph.fill_styles.len())?;
            for style in &morph.fill_styles {
                writer.write_morph_fill_style(tag_type, style)?;
            }
            writer.write_style_count(morph.line_styles.len())?;
            for style in &morph.line_styles {
                writer.write_morph_line_style(tag_type, style)?;
            }
            let context = StyleContext::new(
                morph.fill_styles.len(),
                morph.line_styles.len(),
                require_ub(morph.fill_styles.len() as u32),
                require_ub(morph.line_styles.len() as u32),
            );
            writer.write_outline(tag_type, &morph.start_edges.records, context)
        })?;

        let offset = u32::try_from(start.len())
            .map_err(|_| SwfError::Malformed("morph start edges are too long".to_string()))?;
        self.body.write_u32(offset)?;
        self.body.write_bytes(&start)?;

        self.write_shape(
            tag_type,
            &morph.end_edges,
            morph.fill_styles.len(),
            morph.line_styles.len(),
        )
    }

    // ---------------------------------------------------------------
    // Outlines
    // ---------------------------------------------------------------

    pub(super) fn write_shape_with_style(
        &mut self,
        tag_type: TagType,
        shape: &ShapeWithStyle,
    ) -> Result<()> {
        self.write_fill_style_array(tag_type, &shape.fill_styles)?;
        self.write_line_style_array(tag_type, &shape.line_styles)?;
        let context = self.open_context(
            shape.fill_styles.len(),
            shape.line_styles.len(),
            &shape.records,
        );
        self.write_outline(tag_type, &shape.records, context)
    }

    /// SHAPE: index widths and records against styles owned elsewhere.
    ///
    /// Glyph outlines always use one fill bit and no line bits; morph end
    /// edges use the narrowest widths that hold the indices they select.
    pub(super) fn write_shape(
        &mut self,
        tag_type: TagType,
        shape: &Shape,
        fill_count: usize,
        line_count: usize,
    ) -> Result<()> {
        self.body.byte_align();
        let context = if tag_type.is_glyph_font() {
            StyleContext::new(fill_count, line_count, 1, 0)
        } else {
            let (max_fill, max_line) = max_indices(&shape.records);
            StyleContext::new(
                fill_count,
                line_count,
                require_ub(max_fill),
                require_ub(max_line),
            )
        };
        self.write_outline(tag_type, &shape.records, context)
    }

    /// Index widths for a style table and the records written against it.
    fn open_context(
        &self,
        fill_count: usize,
        line_count: usize,
        records: &[ShapeRecord],
    ) -> StyleContext {
        let (max_fill, max_line) = segment_indices(records);
        StyleContext::new(
            fill_count,
            line_count,
            require_ub(max_fill.max(fill_count as u32)),
            require_ub(max_line.max(line_count as u32)),
        )
    }

    /// Index widths, records and the end marker.
    fn write_outline(
        &mut self,
        tag_type: TagType,
        records: &[ShapeRecord],
        mut context: StyleContext,
    ) -> Result<()> {
        self.body.write_ub(context.fill_bits, 4)?;
        self.body.write_ub(context.line_bits, 4)?;

        for (index, record) in records.iter().enumerate() {
            match record {
                ShapeRecord::StyleChange(change) => {
                    let rest = &records[index + 1..];
                    self.write_style_change(tag_type, change, &mut context, rest)?;
                }
                ShapeRecord::StraightEdge(edge) => self.write_straight_edge(edge)?,
                ShapeRecord::CurvedEdge(edge) => self.write_curved_edge(edge)?,
            }
        }

        // End of shape: non-edge record with no flags
        self.body.write_bit(false);
        self.body.write_ub(0, 5)?;
        self.body.byte_align();
        Ok(())
    }

    fn write_style_change(
        &mut self,
        tag_type: TagType,
        change: &StyleChangeRecord,
        context: &mut StyleContext,
        rest: &[ShapeRecord],
    ) -> Result<()> {
        if change.is_empty() {
            return Err(SwfError::Malformed(
                "style change record without state flags".to_string(),
            ));
        }
        if change.new_styles.is_some() && !tag_type.supports_new_styles() {
            return Err(SwfError::Malformed(format!(
                "{} cannot carry new styles",
                tag_type
            )));
        }

        let glyph = tag_type.is_glyph_font();
        // Indices select from the styles this record introduces, if any
        let (fill_count, line_count) = match &change.new_styles {
            Some(styles) => (styles.fill_styles.len(), styles.line_styles.len()),
            None => (context.fill_count, context.line_count),
        };
        let fill0 = change
            .fill_style0
            .map(|i| checked_index(i, fill_count, glyph, 1, "fill"))
            .transpose()?;
        let fill1 = change
            .fill_style1
            .map(|i| checked_index(i, fill_count, glyph, 1, "fill"))
            .transpose()?;
        let line = change
            .line_style
            .map(|i| checked_index(i, line_count, glyph, 0, "line"))
            .transpose()?;

        self.body.write_bit(false);
        self.body.write_bit(change.new_styles.is_some());
        self.body.write_bit(line.is_some());
        self.body.write_bit(fill1.is_some());
        self.body.write_bit(fill0.is_some());
        self.body.write_bit(change.move_to.is_some());

        if let Some((dx, dy)) = change.move_to {
            let bits = require_sb_all(&[dx, dy]);
            self.body.write_ub(bits, 5)?;
            self.body.write_sb(dx, bits)?;
            self.body.write_sb(dy, bits)?;
        }
        if let Some(index) = fill0 {
            self.body.write_ub(index, context.fill_bits)?;
        }
        if let Some(index) = fill1 {
            self.body.write_ub(index, context.fill_bits)?;
        }
        if let Some(index) = line {
            self.body.write_ub(index, context.line_bits)?;
        }

        if let Some(styles) = &change.new_styles {
            self.write_fill_style_array(tag_type, &styles.fill_styles)?;
            self.write_line_style_array(tag_type, &styles.line_styles)?;
            *context = self.open_context(styles.fill_styles.len(), styles.line_styles.len(), rest);
            self.body.write_ub(context.fill_bits, 4)?;
            self.body.write_ub(context.line_bits, 4)?;
        }
        Ok(())
    }

    fn write_straight_edge(&mut self, edge: &StraightEdge) -> Result<()> {
        let (dx, dy) = edge.delta();
        let bits = require_sb_all(&[dx, dy]).max(MIN_EDGE_BITS);
        self.body.write_bit(true);
        self.body.write_bit(true);
        self.write_edge_bits(bits)?;
        match *edge {
            StraightEdge::General { dx, dy } => {
                self.body.write_bit(true);
                self.body.write_sb(dx, bits)?;
                self.body.write_sb(dy, bits)
            }
            StraightEdge::Vertical { dy } => {
                self.body.write_bit(false);
                self.body.write_bit(true);
                self.body.write_sb(dy, bits)
            }
            StraightEdge::Horizontal { dx } => {
                self.body.write_bit(false);
                self.body.write_bit(false);
                self.body.write_sb(dx, bits)
            }
        }
    }

    fn write_curved_edge(&mut self, edge: &CurvedEdge) -> Result<()> {
        let values = [
            edge.control_dx,
            edge.control_dy,
            edge.anchor_dx,
            edge.anchor_dy,
        ];
        let bits = require_sb_all(&values).max(MIN_EDGE_BITS);
        self.body.write_bit(true);
        self.body.write_bit(false);
        self.write_edge_bits(bits)?;
        for value in values {
            self.body.write_sb(value, bits)?;
        }
        Ok(())
    }

    fn write_edge_bits(&mut self, bits: u32) -> Result<()> {
        self.body
            .write_ub(bits - MIN_EDGE_BITS, 4)
            .map_err(|_| SwfError::Malformed(format!("edge delta needs {} bits", bits)))
    }

    // ---------------------------------------------------------------
    // Fill and line styles
    // ---------------------------------------------------------------

    fn write_style_count(&mut self, count: usize) -> Result<()> {
        if count < EXTENDED_COUNT {
            return self.body.write_u8(count as u8);
        }
        let count = u16::try_from(count)
            .map_err(|_| SwfError::Malformed(format!("{} styles exceed 65535", count)))?;
        self.body.write_u8(EXTENDED_COUNT as u8)?;
        self.body.write_u16(count)
    }

    fn write_fill_style_array(&mut self, tag_type: TagType, styles: &[FillStyle]) -> Result<()> {
        self.write_style_count(styles.len())?;
        for style in styles {
            self.write_fill_style(tag_type, style)?;
        }
        Ok(())
    }

    fn write_line_style_array(&mut self, tag_type: TagType, styles: &[LineStyle]) -> Result<()> {
        self.write_style_count(styles.len())?;
        for style in styles {
            self.write_line_style(tag_type, style)?;
        }
        Ok(())
    }

    pub(super) fn write_fill_style(&mut self, tag_type: TagType, style: &FillStyle) -> Result<()> {
        let has_alpha = tag_type.has_alpha_colors();
        self.body.write_u8(style.fill_type())?;
        match style {
            FillStyle::Solid(color) => write_color(&mut self.body, color, has_alpha),
            FillStyle::LinearGradient { matrix, gradient }
            | FillStyle::RadialGradient { matrix, gradient } => {
                write_matrix(&mut self.body, matrix)?;
                self.write_gradient(gradient, has_alpha)
            }
            FillStyle::FocalRadialGradient {
                matrix,
                gradient,
                focal_point,
            } => {
                write_matrix(&mut self.body, matrix)?;
                self.write_gradient(gradient, has_alpha)?;
                self.body.write_fixed8(*focal_point)
            }
            FillStyle::Bitmap { bitmap, matrix, .. } => {
                self.write_character_ref(*bitmap)?;
                write_matrix(&mut self.body, matrix)
            }
        }
    }

    fn write_gradient(&mut self, gradient: &Gradient, has_alpha: bool) -> Result<()> {
        if gradient.records.len() > MAX_GRADIENT_RECORDS {
            return Err(SwfError::Malformed(format!(
                "gradient holds {} records",
                gradient.records.len()
            )));
        }
        self.body.byte_align();
        self.body.write_ub(gradient.spread_mode as u32, 2)?;
        self.body.write_ub(gradient.interpolation_mode as u32, 2)?;
        self.body.write_ub(gradient.records.len() as u32, 4)?;
        for record in &gradient.records {
            self.body.write_u8(record.ratio)?;
            write_color(&mut self.body, &record.color, has_alpha)?;
        }
        Ok(())
    }

    /// DefineShape4 always takes the extended layout; the older versions
    /// only the plain one.
    fn write_line_style(&mut self, tag_type: TagType, style: &LineStyle) -> Result<()> {
        if tag_type != TagType::DefineShape4 {
            return match style {
                LineStyle::Plain { width, color } => {
                    self.body.write_u16(*width)?;
                    write_color(&mut self.body, color, tag_type.has_alpha_colors())
                }
                LineStyle::Extended(_) => Err(SwfError::Malformed(format!(
                    "{} cannot carry extended line styles",
                    tag_type
                ))),
            };
        }

        let extended = match style {
            LineStyle::Plain { width, color } => LineStyle2::solid(*width, *color),
            LineStyle::Extended(style) => (**style).clone(),
        };
        self.body.write_u16(extended.width)?;
        self.body.write_ub(extended.start_cap_style as u32, 2)?;
        self.body.write_ub(extended.join_style as u32, 2)?;
        self.body.write_bit(matches!(extended.fill, LineFill::Fill(_)));
        self.body.write_bit(extended.no_hscale);
        self.body.write_bit(extended.no_vscale);
        self.body.write_bit(extended.pixel_hinting);
        self.body.write_ub(0, 5)?; // reserved
        self.body.write_bit(extended.no_close);
        self.body.write_ub(extended.end_cap_style as u32, 2)?;
        if extended.join_style == JOIN_MITER {
            self.body.write_u16(extended.miter_limit_factor)?;
        }
        match &extended.fill {
            LineFill::Fill(fill) => self.write_fill_style(tag_type, fill),
            LineFill::Color(color) => write_rgba(&mut self.body, color),
        }
    }

    // ---------------------------------------------------------------
    // Morph styles
    // ---------------------------------------------------------------

    fn write_morph_fill_style(&mut self, tag_type: TagType, style: &MorphFillStyle) -> Result<()> {
        self.body.write_u8(style.fill_type())?;
        match style {
            MorphFillStyle::Solid {
                start_color,
                end_color,
            } => {
                write_rgba(&mut self.body, start_color)?;
                write_rgba(&mut self.body, end_color)
            }
            MorphFillStyle::Gradient {
                fill_type: kind,
                start_matrix,
                end_matrix,
                records,
                focal_ratios,
            } => {
                write_matrix(&mut self.body, start_matrix)?;
                write_matrix(&mut self.body, end_matrix)?;
                let count = u8::try_from(records.len()).map_err(|_| {
                    SwfError::Malformed(format!("morph gradient holds {} records", records.len()))
                })?;
                self.body.write_u8(count)?;
                for record in records {
                    self.body.write_u8(record.start_ratio)?;
                    write_rgba(&mut self.body, &record.start_color)?;
                    self.body.write_u8(record.end_ratio)?;
                    write_rgba(&mut self.body, &record.end_color)?;
                }
                if *kind == fill_type::FOCAL_RADIAL_GRADIENT
                    && tag_type == TagType::DefineMorphShape2
                {
                    let (start, end) = focal_ratios.unwrap_or_default();
                    self.body.write_i16(start)?;
                    self.body.write_i16(end)?;
                }
                Ok(())
            }
            MorphFillStyle::Bitmap {
                bitmap,
                start_matrix,
                end_matrix,
                ..
            } => {
                self.write_character_ref(*bitmap)?;
                write_matrix(&mut self.body, start_matrix)?;
                write_matrix(&mut self.body, end_matrix)
            }
        }
    }

    fn write_morph_line_style(&mut self, tag_type: TagType, style: &MorphLineStyle) -> Result<()> {
        if tag_type != TagType::DefineMorphShape2 {
            return match style {
                MorphLineStyle::Plain {
                    start_width,
                    end_width,
                    start_color,
                    end_color,
                } => {
                    self.body.write_u16(*start_width)?;
                    self.body.write_u16(*end_width)?;
                    write_rgba(&mut self.body, start_color)?;
                    write_rgba(&mut self.body, end_color)
                }
                MorphLineStyle::Extended(_) => Err(SwfError::Malformed(
                    "DefineMorphShape cannot carry extended line styles".to_string(),
                )),
            };
        }

        let extended = match style {
            MorphLineStyle::Plain {
                start_width,
                end_width,
                start_color,
                end_color,
            } => MorphLineStyle2 {
                start_width: *start_width,
                end_width: *end_width,
                start_cap_style: 0,
                join_style: 0,
                no_hscale: false,
                no_vscale: false,
                pixel_hinting: false,
                no_close: false,
                end_cap_style: 0,
                miter_limit_factor: 0,
                fill: MorphLineFill::Colors {
                    start: *start_color,
                    end: *end_color,
                },
            },
            MorphLineStyle::Extended(style) => (**style).clone(),
        };
        self.body.write_u16(extended.start_width)?;
        self.body.write_u16(extended.end_width)?;
        self.body.write_ub(extended.start_cap_style as u32, 2)?;
        self.body.write_ub(extended.join_style as u32, 2)?;
        self.body.write_bit(matches!(extended.fill, MorphLineFill::Fill(_)));
        self.body.write_bit(extended.no_hscale);
        self.body.write_bit(extended.no_vscale);
        self.body.write_bit(extended.pixel_hinting);
        self.body.write_ub(0, 5)?; // reserved
        self.body.write_bit(extended.no_close);
        self.body.write_ub(extended.end_cap_style as u32, 2)?;
        if extended.join_style == JOIN_MITER {
            self.body.write_u16(extended.miter_limit_factor)?;
        }
        match &extended.fill {
            MorphLineFill::Fill(fill) => self.write_morph_fill_style(tag_type, fill),
            MorphLineFill::Colors { start, end } => {
                write_rgba(&mut self.body, start)?;
                write_rgba(&mut self.body, end)
            }
        }
    }
}

/// Validate a 1-based index; glyph outlines write a fixed value instead.
fn checked_index(
    index: u32,
    count: usize,
    glyph: bool,
    glyph_value: u32,
    kind: &str,
) -> Result<u32> {
    if glyph {
        return Ok(glyph_value);
    }
    if index as usize > count {
        return Err(SwfError::Malformed(format!(
            "{} style index {} out of range ({} styles)",
            kind, index, count
        )));
    }
    Ok(index)
}

/// Largest fill and line index written before the next new style tables
/// take over, the indices of the record that brings them included.
fn segment_indices(records: &[ShapeRecord]) -> (u32, u32) {
    let mut max_fill = 0;
    let mut max_line = 0;
    for record in records {
        if let ShapeRecord::StyleChange(change) = record {
            max_fill = max_fill
                .max(change.fill_style0.unwrap_or(0))
                .max(change.fill_style1.unwrap_or(0));
            max_line = max_line.max(change.line_style.unwrap_or(0));
            if change.new_styles.is_some() {
                break;
            }
        }
    }
    (max_fill, max_line)
}

/// Largest fill and line index of a whole outline.
fn max_indices(records: &[ShapeRecord]) -> (u32, u32) {
    records
        .iter()
        .filter_map(|record| match record {
            ShapeRecord::StyleChange(change) => Some(change),
            _ => None,
        })
        .fold((0, 0), |(fill, line), change| {
            (
                fill.max(change.fill_style0.unwrap_or(0))
                    .max(change.fill_style1.unwrap_or(0)),
                line.max(change.line_style.unwrap_or(0)),
            )
        })
}
