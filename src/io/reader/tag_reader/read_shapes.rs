//! Shape, style and morph shape decoders
//!
//! Outline records are read against a [`StyleContext`] that holds the
//! current style counts and index widths. A style change record in a
//! DefineShape2/3/4 outline may replace the context for the records that
//! follow it.

use crate::error::{Result, SwfError};
use crate::tags::{DefineMorphShape, DefineShape, TagType};
use crate::types::styles::{fill_type, JOIN_MITER};
use crate::types::{
    CurvedEdge, FillStyle, GradRecord, Gradient, LineFill, LineStyle, LineStyle2,
    MorphFillStyle, MorphGradRecord, MorphLineFill, MorphLineStyle, MorphLineStyle2, NewStyles,
    Shape, ShapeRecord, ShapeWithStyle, StraightEdge, StyleChangeRecord, StyleContext,
};

use super::common::{read_color, read_matrix, read_rect, read_rgba};
use super::TagReader;

/// Style array count byte announcing a UI16 count
const EXTENDED_COUNT: u8 = 0xFF;

impl TagReader {
    // ---------------------------------------------------------------
    // Shape tags
    // ---------------------------------------------------------------

    pub(crate) fn read_define_shape(&mut self, tag_type: TagType) -> Result<(u16, DefineShape)> {
        let version = match tag_type {
            TagType::DefineShape => 1,
            TagType::DefineShape2 => 2,
            TagType::DefineShape3 => 3,
            _ => 4,
        };
        let id = self.reader.read_u16()?;
        let bounds = read_rect(&mut self.reader)?;
        let mut shape = DefineShape::new(version, bounds, ShapeWithStyle::default());

        if tag_type == TagType::DefineShape4 {
            shape.edge_bounds = read_rect(&mut self.reader)?;
            self.reader.read_ub(5)?; // reserved
            shape.uses_fill_winding_rule = self.reader.read_bit()?;
            shape.uses_non_scaling_strokes = self.reader.read_bit()?;
            shape.uses_scaling_strokes = self.reader.read_bit()?;
        }

        shape.shapes = self.read_shape_with_style(tag_type)?;
        Ok((id, shape))
    }

    pub(crate) fn read_define_morph_shape(
        &mut self,
        tag_type: TagType,
    ) -> Result<(u16, DefineMorphShape)> {
        let id = self.reader.read_u16()?;
        let start_bounds = read_rect(&mut self.reader)?;
        let end_bounds = read_rect(&mut self.reader)?;

        let mut start_edge_bounds = start_bounds;
        let mut end_edge_bounds = end_bounds;
        let mut uses_non_scaling_strokes = false;
        let mut uses_scaling_strokes = false;
        if tag_type == TagType::DefineMorphShape2 {
            start_edge_bounds = read_rect(&mut self.reader)?;
            end_edge_bounds = read_rect(&mut self.reader)?;
            self.reader.read_ub(6)?; // reserved
            uses_non_scaling_strokes = self.reader.read_bit()?;
            uses_scaling_strokes = self.reader.read_bit()?;
        }

        // Offset to the end edges; recomputed when writing
        self.reader.read_u32()?;

        let fill_styles = self.read_morph_fill_style_array(tag_type)?;
        let line_styles = self.read_morph_line_style_array(tag_type)?;
        let fill_bits = self.reader.read_ub(4)?;
        let line_bits = self.reader.read_ub(4)?;
        let mut context =
            StyleContext::new(fill_styles.len(), line_styles.len(), fill_bits, line_bits);
        let start_edges = Shape {
            records: self.read_shape_records(tag_type, &mut context)?,
        };

        let end_edges = self.read_shape(tag_type, fill_styles.len(), line_styles.len())?;

        Ok((
            id,
            DefineMorphShape {
                version: if tag_type == TagType::DefineMorphShape2 { 2 } else { 1 },
                start_bounds,
                end_bounds,
                start_edge_bounds,
                end_edge_bounds,
                uses_non_scaling_strokes,
                uses_scaling_strokes,
                fill_styles,
                line_styles,
                start_edges,
                end_edges,
            },
        ))
    }

    // ---------------------------------------------------------------
    // Outlines
    // ---------------------------------------------------------------

    /// SHAPEWITHSTYLE: style arrays, index widths, records.
    pub(crate) fn read_shape_with_style(&mut self, tag_type: TagType) -> Result<ShapeWithStyle> {
        let fill_styles = self.read_fill_style_array(tag_type)?;
        let line_styles = self.read_line_style_array(tag_type)?;
        let fill_bits = self.reader.read_ub(4)?;
        let line_bits = self.reader.read_ub(4)?;
        let mut context =
            StyleContext::new(fill_styles.len(), line_styles.len(), fill_bits, line_bits);
        let records = self.read_shape_records(tag_type, &mut context)?;
        Ok(ShapeWithStyle {
            fill_styles,
            line_styles,
            records,
        })
    }

    /// SHAPE: index widths and records against styles owned elsewhere.
    pub(crate) fn read_shape(
        &mut self,
        tag_type: TagType,
        fill_count: usize,
        line_count: usize,
    ) -> Result<Shape> {
        self.reader.byte_align();
        let fill_bits = self.reader.read_ub(4)?;
        let line_bits = self.reader.read_ub(4)?;
        let mut context = StyleContext::new(fill_count, line_count, fill_bits, line_bits);
        let records = self.read_shape_records(tag_type, &mut context)?;
        Ok(Shape { records })
    }

    /// Read records up to the end-of-shape marker.
    fn read_shape_records(
        &mut self,
        tag_type: TagType,
        context: &mut StyleContext,
    ) -> Result<Vec<ShapeRecord>> {
        let mut records = Vec::new();
        loop {
            if self.reader.read_bit()? {
                records.push(self.read_edge_record()?);
                continue;
            }

            let state_new_styles = self.reader.read_bit()?;
            let state_line_style = self.reader.read_bit()?;
            let state_fill_style1 = self.reader.read_bit()?;
            let state_fill_style0 = self.reader.read_bit()?;
            let state_move_to = self.reader.read_bit()?;

            if !(state_new_styles
                || state_line_style
                || state_fill_style1
                || state_fill_style0
                || state_move_to)
            {
                break;
            }

            let mut change = StyleChangeRecord::default();
            if state_move_to {
                let bits = self.reader.read_ub(5)?;
                let dx = self.reader.read_sb(bits)?;
                let dy = self.reader.read_sb(bits)?;
                change.move_to = Some((dx, dy));
            }

            let fill0 = if state_fill_style0 {
                Some(self.reader.read_ub(context.fill_bits)?)
            } else {
                None
            };
            let fill1 = if state_fill_style1 {
                Some(self.reader.read_ub(context.fill_bits)?)
            } else {
                None
            };
            let line = if state_line_style {
                Some(self.reader.read_ub(context.line_bits)?)
            } else {
                None
            };

            if state_new_styles && tag_type.supports_new_styles() {
                let fill_styles = self.read_fill_style_array(tag_type)?;
                let line_styles = self.read_line_style_array(tag_type)?;
                let fill_bits = self.reader.read_ub(4)?;
                let line_bits = self.reader.read_ub(4)?;
                *context =
                    StyleContext::new(fill_styles.len(), line_styles.len(), fill_bits, line_bits);
                change.new_styles = Some(Box::new(NewStyles {
                    fill_styles,
                    line_styles,
                }));
            }

            // Glyph outlines carry the index bits, but the values mean nothing
            let ignore_styles = tag_type.is_glyph_font();
            change.fill_style0 = fill0
                .map(|i| style_index(i, context.fill_count, ignore_styles, "fill"))
                .transpose()?;
            change.fill_style1 = fill1
                .map(|i| style_index(i, context.fill_count, ignore_styles, "fill"))
                .transpose()?;
            change.line_style = line
                .map(|i| style_index(i, context.line_count, ignore_styles, "line"))
                .transpose()?;

            // A record that only carried an ignored new-styles flag
            if !change.is_empty() {
                records.push(ShapeRecord::StyleChange(change));
            }
        }
        Ok(records)
    }

    fn read_edge_record(&mut self) -> Result<ShapeRecord> {
        let straight = self.reader.read_bit()?;
        let bits = self.reader.read_ub(4)? + 2;
        if straight {
            let edge = if self.reader.read_bit()? {
                StraightEdge::General {
                    dx: self.reader.read_sb(bits)?,
                    dy: self.reader.read_sb(bits)?,
                }
            } else if self.reader.read_bit()? {
                StraightEdge::Vertical {
                    dy: self.reader.read_sb(bits)?,
                }
            } else {
                StraightEdge::Horizontal {
                    dx: self.reader.read_sb(bits)?,
                }
            };
            Ok(ShapeRecord::StraightEdge(edge))
        } else {
            Ok(ShapeRecord::CurvedEdge(CurvedEdge {
                control_dx: self.reader.read_sb(bits)?,
                control_dy: self.reader.read_sb(bits)?,
                anchor_dx: self.reader.read_sb(bits)?,
                anchor_dy: self.reader.read_sb(bits)?,
            }))
        }
    }

    // ---------------------------------------------------------------
    // Fill and line styles
    // ---------------------------------------------------------------

    fn read_style_count(&mut self) -> Result<usize> {
        let count = self.reader.read_u8()?;
        if count == EXTENDED_COUNT {
            Ok(self.reader.read_u16()? as usize)
        } else {
            Ok(count as usize)
        }
    }

    fn read_fill_style_array(&mut self, tag_type: TagType) -> Result<Vec<FillStyle>> {
        let count = self.read_style_count()?;
        let mut styles = Vec::with_capacity(count);
        for _ in 0..count {
            styles.push(self.read_fill_style(tag_type)?);
        }
        Ok(styles)
    }

    fn read_line_style_array(&mut self, tag_type: TagType) -> Result<Vec<LineStyle>> {
        let count = self.read_style_count()?;
        let mut styles = Vec::with_capacity(count);
        for _ in 0..count {
            styles.push(self.read_line_style(tag_type)?);
        }
        Ok(styles)
    }

    pub(crate) fn read_fill_style(&mut self, tag_type: TagType) -> Result<FillStyle> {
        let has_alpha = tag_type.has_alpha_colors();
        let style_type = self.reader.read_u8()?;
        let style = match style_type {
            fill_type::SOLID => FillStyle::Solid(read_color(&mut self.reader, has_alpha)?),
            fill_type::LINEAR_GRADIENT => FillStyle::LinearGradient {
                matrix: read_matrix(&mut self.reader)?,
                gradient: self.read_gradient(has_alpha)?,
            },
            fill_type::RADIAL_GRADIENT => FillStyle::RadialGradient {
                matrix: read_matrix(&mut self.reader)?,
                gradient: self.read_gradient(has_alpha)?,
            },
            fill_type::FOCAL_RADIAL_GRADIENT => FillStyle::FocalRadialGradient {
                matrix: read_matrix(&mut self.reader)?,
                gradient: self.read_gradient(has_alpha)?,
                focal_point: self.reader.read_fixed8()?,
            },
            fill_type::REPEATING_BITMAP..=fill_type::NON_SMOOTHED_CLIPPED_BITMAP => {
                let bitmap = self.read_character_ref()?;
                FillStyle::Bitmap {
                    bitmap,
                    matrix: read_matrix(&mut self.reader)?,
                    clipped: style_type & 0x01 != 0,
                    smoothed: style_type & 0x02 == 0,
                }
            }
            other => return Err(SwfError::UnknownFillStyle(other)),
        };
        Ok(style)
    }

    fn read_gradient(&mut self, has_alpha: bool) -> Result<Gradient> {
        self.reader.byte_align();
        let spread_mode = self.reader.read_ub(2)? as u8;
        let interpolation_mode = self.reader.read_ub(2)? as u8;
        let count = self.reader.read_ub(4)?;
        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let ratio = self.reader.read_u8()?;
            let color = read_color(&mut self.reader, has_alpha)?;
            records.push(GradRecord { ratio, color });
        }
        Ok(Gradient {
            spread_mode,
            interpolation_mode,
            records,
        })
    }

    fn read_line_style(&mut self, tag_type: TagType) -> Result<LineStyle> {
        let width = self.reader.read_u16()?;
        if tag_type != TagType::DefineShape4 {
            let color = read_color(&mut self.reader, tag_type.has_alpha_colors())?;
            return Ok(LineStyle::Plain { width, color });
        }

        let start_cap_style = self.reader.read_ub(2)? as u8;
        let join_style = self.reader.read_ub(2)? as u8;
        let has_fill = self.reader.read_bit()?;
        let no_hscale = self.reader.read_bit()?;
        let no_vscale = self.reader.read_bit()?;
        let pixel_hinting = self.reader.read_bit()?;
        self.reader.read_ub(5)?; // reserved
        let no_close = self.reader.read_bit()?;
        let end_cap_style = self.reader.read_ub(2)? as u8;
        let miter_limit_factor = if join_style == JOIN_MITER {
            self.reader.read_u16()?
        } else {
            0
        };
        let fill = if has_fill {
            LineFill::Fill(self.read_fill_style(tag_type)?)
        } else {
            LineFill::Color(read_rgba(&mut self.reader)?)
        };

        Ok(LineStyle::Extended(Box::new(LineStyle2 {
            width,
            start_cap_style,
            join_style,
            no_hscale,
            no_vscale,
            pixel_hinting,
            no_close,
            end_cap_style,
            miter_limit_factor,
            fill,
        })))
    }

    // ---------------------------------------------------------------
    // Morph styles
    // ---------------------------------------------------------------

    fn read_morph_fill_style_array(&mut self, tag_type: TagType) -> Result<Vec<MorphFillStyle>> {
        let count = self.read_style_count()?;
        let mut styles = Vec::with_capacity(count);
        for _ in 0..count {
            styles.push(self.read_morph_fill_style(tag_type)?);
        }
        Ok(styles)
    }

    fn read_morph_line_style_array(&mut self, tag_type: TagType) -> Result<Vec<MorphLineStyle>> {
        let count = self.read_style_count()?;
        let mut styles = Vec::with_capacity(count);
        for _ in 0..count {
            styles.push(self.read_morph_line_style(tag_type)?);
        }
        Ok(styles)
    }

    fn read_morph_fill_style(&mut self, tag_type: TagType) -> Result<MorphFillStyle> {
        let style_type = self.reader.read_u8()?;
        let style = match style_type {
            fill_type::SOLID => MorphFillStyle::Solid {
                start_color: read_rgba(&mut self.reader)?,
                end_color: read_rgba(&mut self.reader)?,
            },
            fill_type::LINEAR_GRADIENT
            | fill_type::RADIAL_GRADIENT
            | fill_type::FOCAL_RADIAL_GRADIENT => {
                let start_matrix = read_matrix(&mut self.reader)?;
                let end_matrix = read_matrix(&mut self.reader)?;
                let count = self.reader.read_u8()?;
                let mut records = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    records.push(MorphGradRecord {
                        start_ratio: self.reader.read_u8()?,
                        start_color: read_rgba(&mut self.reader)?,
                        end_ratio: self.reader.read_u8()?,
                        end_color: read_rgba(&mut self.reader)?,
                    });
                }
                let focal_ratios = if style_type == fill_type::FOCAL_RADIAL_GRADIENT
                    && tag_type == TagType::DefineMorphShape2
                {
                    Some((self.reader.read_i16()?, self.reader.read_i16()?))
                } else {
                    None
                };
                MorphFillStyle::Gradient {
                    fill_type: style_type,
                    start_matrix,
                    end_matrix,
                    records,
                    focal_ratios,
                }
            }
            fill_type::REPEATING_BITMAP..=fill_type::NON_SMOOTHED_CLIPPED_BITMAP => {
                let bitmap = self.read_character_ref()?;
                MorphFillStyle::Bitmap {
                    bitmap,
                    start_matrix: read_matrix(&mut self.reader)?,
                    end_matrix: read_matrix(&mut self.reader)?,
                    clipped: style_type & 0x01 != 0,
                    smoothed: style_type & 0x02 == 0,
                }
            }
            other => return Err(SwfError::UnknownFillStyle(other)),
        };
        Ok(style)
    }

    fn read_morph_line_style(&mut self, tag_type: TagType) -> Result<MorphLineStyle> {
        let start_width = self.reader.read_u16()?;
        let end_width = self.reader.read_u16()?;
        if tag_type != TagType::DefineMorphShape2 {
            return Ok(MorphLineStyle::Plain {
                start_width,
                end_width,
                start_color: read_rgba(&mut self.reader)?,
                end_color: read_rgba(&mut self.reader)?,
            });
        }

        let start_cap_style = self.reader.read_ub(2)? as u8;
        let join_style = self.reader.read_ub(2)? as u8;
        let has_fill = self.reader.read_bit()?;
        let no_hscale = self.reader.read_bit()?;
        let no_vscale = self.reader.read_bit()?;
        let pixel_hinting = self.reader.read_bit()?;
        self.reader.read_ub(5)?; // reserved
        let no_close = self.reader.read_bit()?;
        let end_cap_style = self.reader.read_ub(2)? as u8;
        let miter_limit_factor = if join_style == JOIN_MITER {
            self.reader.read_u16()?
        } else {
            0
        };
        let fill = if has_fill {
            MorphLineFill::Fill(self.read_morph_fill_style(tag_type)?)
        } else {
            MorphLineFill::Colors {
                start: read_rgba(&mut self.reader)?,
                end: read_rgba(&mut self.reader)?,
            }
        };

        Ok(MorphLineStyle::Extended(Box::new(MorphLineStyle2 {
            start_width,
            end_width,
            start_cap_style,
            join_style,
            no_hscale,
            no_vscale,
            pixel_hinting,
            no_close,
            end_cap_style,
            miter_limit_factor,
            fill,
        })))
    }
}

/// Check a 1-based style index against the active style table.
fn style_index(index: u32, count: usize, ignore: bool, kind: &str) -> Result<u32> {
    if ignore {
        return Ok(0);
    }
    if index as usize > count {
        return Err(SwfError::Malformed(format!(
            "{} style index {} out of range ({} styles)",
            kind, index, count
        )));
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BitReader;
    use crate::types::{Color, Matrix, Rect};

    fn make_reader(data: &[u8]) -> TagReader {
        TagReader::new(BitReader::new(data.to_vec()), 10)
    }

    #[test]
    fn test_read_solid_fill_rgb_and_rgba() {
        let mut reader = make_reader(&[0x00, 1, 2, 3, 0x00, 4, 5, 6, 7]);
        assert_eq!(
            reader.read_fill_style(TagType::DefineShape).unwrap(),
            FillStyle::Solid(Color::rgb(1, 2, 3))
        );
        assert_eq!(
            reader.read_fill_style(TagType::DefineShape3).unwrap(),
            FillStyle::Solid(Color::rgba(4, 5, 6, 7))
        );
    }

    #[test]
    fn test_unknown_fill_style() {
        let mut reader = make_reader(&[0x20]);
        assert!(matches!(
            reader.read_fill_style(TagType::DefineShape),
            Err(SwfError::UnknownFillStyle(0x20))
        ));
    }

    #[test]
    fn test_bitmap_fill_with_sentinel() {
        // non-smoothed clipped bitmap, ID 65535, identity matrix
        let mut reader = make_reader(&[0x43, 0xFF, 0xFF, 0x00]);
        let style = reader.read_fill_style(TagType::DefineShape).unwrap();
        assert_eq!(
            style,
            FillStyle::Bitmap {
                bitmap: crate::types::CharacterRef::Invalid,
                matrix: Matrix::IDENTITY,
                clipped: true,
                smoothed: false,
            }
        );
    }

    #[test]
    fn test_read_define_shape() {
        let data = [
            0x01, 0x00, // id 1
            0x00, // empty bounds
            0x01, 0x00, 0xFF, 0x00, 0x00, // one red fill
            0x00, // no line styles
            0x10, // fill bits 1, line bits 0
            // style change: fill1 = 1
            // 000100 1 | end 000000
            0b0001_0010, 0b0000_0000,
        ];
        let mut reader = make_reader(&data);
        let (id, shape) = reader.read_define_shape(TagType::DefineShape).unwrap();
        assert_eq!(id, 1);
        assert_eq!(shape.bounds, Rect::default());
        assert_eq!(shape.shapes.fill_styles.len(), 1);
        assert_eq!(
            shape.shapes.records,
            vec![ShapeRecord::StyleChange(StyleChangeRecord {
                fill_style1: Some(1),
                ..Default::default()
            })]
        );
    }

    #[test]
    fn test_style_index_out_of_range() {
        let data = [
            0x01, 0x00, 0x00, // id, bounds
            0x00, 0x00, // no styles
            0x10, // fill bits 1
            0b0001_0010, 0b0000_0000,
        ];
        let mut reader = make_reader(&data);
        assert!(matches!(
            reader.read_define_shape(TagType::DefineShape),
            Err(SwfError::Malformed(_))
        ));
    }

    #[test]
    fn test_read_edges() {
        // fill bits 0, line bits 0
        // straight general, nbits 2+2=4: dx=3 dy=-1
        //   1 1 0010 1 0011 1111
        // straight vertical: 1 1 0010 0 1 0101
        // curved: 1 0 0000 01 01 01 01
        // end: 000000
        let bits = "00000000\
                    1100101\
                    00111111\
                    1100100\
                    10101\
                    100000\
                    01010101\
                    000000";
        let bits: String = bits.chars().filter(|c| !c.is_whitespace()).collect();
        let mut bytes = Vec::new();
        let padded = format!("{:0<width$}", bits, width = (bits.len() + 7) / 8 * 8);
        for chunk in padded.as_bytes().chunks(8) {
            let text = std::str::from_utf8(chunk).unwrap();
            bytes.push(u8::from_str_radix(text, 2).unwrap());
        }
        let mut reader = make_reader(&bytes);
        let shape = reader.read_shape(TagType::DefineShape, 0, 0).unwrap();
        assert_eq!(
            shape.records,
            vec![
                ShapeRecord::StraightEdge(StraightEdge::General { dx: 3, dy: -1 }),
                ShapeRecord::StraightEdge(StraightEdge::Vertical { dy: 5 }),
                ShapeRecord::CurvedEdge(CurvedEdge {
                    control_dx: 1,
                    control_dy: 1,
                    anchor_dx: 1,
                    anchor_dy: 1,
                }),
            ]
        );
    }

    #[test]
    fn test_glyph_indices_are_ignored() {
        // fill bits 1: style change fill0 = 1
        let data = [0x10, 0b0000_1010, 0b0000_0000];
        let mut reader = make_reader(&data);
        let shape = reader.read_shape(TagType::DefineFont, 0, 0).unwrap();
        assert_eq!(
            shape.records,
            vec![ShapeRecord::StyleChange(StyleChangeRecord {
                fill_style0: Some(0),
                ..Default::default()
            })]
        );
    }
}
