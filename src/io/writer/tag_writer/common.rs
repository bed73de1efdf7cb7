//! Shared value-record encoders
//!
//! Inverse of the reader's common module. Variable-width fields get the
//! smallest width that holds every value of their group.

use encoding_rs::WINDOWS_1252;

use crate::error::{Result, SwfError};
use crate::io::bit_width::{require_fb_all, require_sb_all};
use crate::io::BitWriter;
use crate::types::{Color, ColorTransform, Filter, GradientFilter, Matrix, Rect, SoundInfo};

use super::TagWriter;

// ---------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------

pub fn write_rect(writer: &mut BitWriter, rect: &Rect) -> Result<()> {
    writer.byte_align();
    let fields = rect.fields();
    let bits = require_sb_all(&fields);
    writer.write_ub(bits, 5)?;
    for value in fields {
        writer.write_sb(value, bits)?;
    }
    writer.byte_align();
    Ok(())
}

pub fn write_matrix(writer: &mut BitWriter, matrix: &Matrix) -> Result<()> {
    writer.byte_align();

    writer.write_bit(matrix.has_scale);
    if matrix.has_scale {
        let bits = require_fb_all(&[matrix.scale_x, matrix.scale_y]);
        writer.write_ub(bits, 5)?;
        writer.write_fb(matrix.scale_x, bits)?;
        writer.write_fb(matrix.scale_y, bits)?;
    }

    writer.write_bit(matrix.has_rotate);
    if matrix.has_rotate {
        let bits = require_fb_all(&[matrix.rotate_skew0, matrix.rotate_skew1]);
        writer.write_ub(bits, 5)?;
        writer.write_fb(matrix.rotate_skew0, bits)?;
        writer.write_fb(matrix.rotate_skew1, bits)?;
    }

    let bits = require_sb_all(&[matrix.translate_x, matrix.translate_y]);
    writer.write_ub(bits, 5)?;
    writer.write_sb(matrix.translate_x, bits)?;
    writer.write_sb(matrix.translate_y, bits)?;

    writer.byte_align();
    Ok(())
}

// ---------------------------------------------------------------
// Colors
// ---------------------------------------------------------------

pub fn write_rgb(writer: &mut BitWriter, color: &Color) -> Result<()> {
    writer.write_u8(color.r)?;
    writer.write_u8(color.g)?;
    writer.write_u8(color.b)
}

pub fn write_rgba(writer: &mut BitWriter, color: &Color) -> Result<()> {
    write_rgb(writer, color)?;
    writer.write_u8(color.a)
}

pub fn write_color(writer: &mut BitWriter, color: &Color, has_alpha: bool) -> Result<()> {
    if has_alpha {
        write_rgba(writer, color)
    } else {
        write_rgb(writer, color)
    }
}

/// CXFORM: the alpha terms are not stored.
pub fn write_cxform(writer: &mut BitWriter, transform: &ColorTransform) -> Result<()> {
    write_transform(writer, transform, 3)
}

/// CXFORMWITHALPHA
pub fn write_cxform_alpha(writer: &mut BitWriter, transform: &ColorTransform) -> Result<()> {
    write_transform(writer, transform, 4)
}

fn write_transform(
    writer: &mut BitWriter,
    transform: &ColorTransform,
    channels: usize,
) -> Result<()> {
    writer.byte_align();
    let mut values = Vec::with_capacity(channels * 2);
    if let Some(terms) = &transform.mult_terms {
        values.extend_from_slice(&terms[..channels]);
    }
    if let Some(terms) = &transform.add_terms {
        values.extend_from_slice(&terms[..channels]);
    }
    let bits = require_sb_all(&values);

    writer.write_bit(transform.add_terms.is_some());
    writer.write_bit(transform.mult_terms.is_some());
    writer.write_ub(bits, 4)?;
    for value in values {
        writer.write_sb(value, bits)?;
    }
    writer.byte_align();
    Ok(())
}

// ---------------------------------------------------------------
// Filters
// ---------------------------------------------------------------

pub fn write_filter_list(writer: &mut BitWriter, filters: &[Filter]) -> Result<()> {
    let count = u8::try_from(filters.len())
        .map_err(|_| SwfError::Malformed(format!("{} filters exceed 255", filters.len())))?;
    writer.write_u8(count)?;
    for filter in filters {
        write_filter(writer, filter)?;
    }
    Ok(())
}

pub fn write_filter(writer: &mut BitWriter, filter: &Filter) -> Result<()> {
    writer.write_u8(filter.filter_id())?;
    match filter {
        Filter::DropShadow(f) => {
            write_rgba(writer, &f.color)?;
            writer.write_fixed(f.blur_x)?;
            writer.write_fixed(f.blur_y)?;
            writer.write_fixed(f.angle)?;
            writer.write_fixed(f.distance)?;
            writer.write_fixed8(f.strength)?;
            writer.write_bit(f.inner_shadow);
            writer.write_bit(f.knockout);
            writer.write_bit(f.composite_source);
            writer.write_ub(f.passes as u32, 5)?;
        }
        Filter::Blur(f) => {
            writer.write_fixed(f.blur_x)?;
            writer.write_fixed(f.blur_y)?;
            writer.write_ub(f.passes as u32, 5)?;
            writer.write_ub(0, 3)?;
        }
        Filter::Glow(f) => {
            write_rgba(writer, &f.color)?;
            writer.write_fixed(f.blur_x)?;
            writer.write_fixed(f.blur_y)?;
            writer.write_fixed8(f.strength)?;
            writer.write_bit(f.inner_glow);
            writer.write_bit(f.knockout);
            writer.write_bit(f.composite_source);
            writer.write_ub(f.passes as u32, 5)?;
        }
        Filter::Bevel(f) => {
            write_rgba(writer, &f.highlight_color)?;
            write_rgba(writer, &f.shadow_color)?;
            writer.write_fixed(f.blur_x)?;
            writer.write_fixed(f.blur_y)?;
            writer.write_fixed(f.angle)?;
            writer.write_fixed(f.distance)?;
            writer.write_fixed8(f.strength)?;
            writer.write_bit(f.inner_shadow);
            writer.write_bit(f.knockout);
            writer.write_bit(f.composite_source);
            writer.write_bit(f.on_top);
            writer.write_ub(f.passes as u32, 4)?;
        }
        Filter::GradientGlow(f) | Filter::GradientBevel(f) => write_gradient_filter(writer, f)?,
        Filter::Convolution(f) => {
            let expected = f.matrix_x as usize * f.matrix_y as usize;
            if f.matrix.len() != expected {
                return Err(SwfError::Malformed(format!(
                    "convolution matrix holds {} values, expected {}",
                    f.matrix.len(),
                    expected
                )));
            }
            writer.write_u8(f.matrix_x)?;
            writer.write_u8(f.matrix_y)?;
            writer.write_f32(f.divisor)?;
            writer.write_f32(f.bias)?;
            for &value in &f.matrix {
                writer.write_f32(value)?;
            }
            write_rgba(writer, &f.default_color)?;
            writer.write_ub(0, 6)?;
            writer.write_bit(f.clamp);
            writer.write_bit(f.preserve_alpha);
        }
        Filter::ColorMatrix(matrix) => {
            for &value in matrix {
                writer.write_f32(value)?;
            }
        }
    }
    writer.byte_align();
    Ok(())
}

fn write_gradient_filter(writer: &mut BitWriter, filter: &GradientFilter) -> Result<()> {
    let count = u8::try_from(filter.stops.len())
        .map_err(|_| SwfError::Malformed("gradient filter has too many stops".to_string()))?;
    writer.write_u8(count)?;
    for (color, _) in &filter.stops {
        write_rgba(writer, color)?;
    }
    for (_, ratio) in &filter.stops {
        writer.write_u8(*ratio)?;
    }
    writer.write_fixed(filter.blur_x)?;
    writer.write_fixed(filter.blur_y)?;
    writer.write_fixed(filter.angle)?;
    writer.write_fixed(filter.distance)?;
    writer.write_fixed8(filter.strength)?;
    writer.write_bit(filter.inner_shadow);
    writer.write_bit(filter.knockout);
    writer.write_bit(filter.composite_source);
    writer.write_bit(filter.on_top);
    writer.write_ub(filter.passes as u32, 4)
}

// ---------------------------------------------------------------
// Sound
// ---------------------------------------------------------------

pub fn write_sound_info(writer: &mut BitWriter, info: &SoundInfo) -> Result<()> {
    writer.byte_align();
    writer.write_ub(0, 2)?;
    writer.write_bit(info.sync_stop);
    writer.write_bit(info.sync_no_multiple);
    writer.write_bit(info.envelope.is_some());
    writer.write_bit(info.loop_count.is_some());
    writer.write_bit(info.out_point.is_some());
    writer.write_bit(info.in_point.is_some());

    if let Some(in_point) = info.in_point {
        writer.write_u32(in_point)?;
    }
    if let Some(out_point) = info.out_point {
        writer.write_u32(out_point)?;
    }
    if let Some(loop_count) = info.loop_count {
        writer.write_u16(loop_count)?;
    }
    if let Some(envelope) = &info.envelope {
        let count = u8::try_from(envelope.len())
            .map_err(|_| SwfError::Malformed("sound envelope has too many points".to_string()))?;
        writer.write_u8(count)?;
        for point in envelope {
            writer.write_u32(point.pos44)?;
            writer.write_u16(point.left_level)?;
            writer.write_u16(point.right_level)?;
        }
    }
    Ok(())
}

impl<'a> TagWriter<'a> {
    /// UI8-length string; the length counts the trailing NUL.
    pub(super) fn write_length_string(&mut self, value: &str) -> Result<()> {
        let bytes = if self.version >= 6 {
            value.as_bytes().to_vec()
        } else {
            let (encoded, _, _) = WINDOWS_1252.encode(value);
            encoded.into_owned()
        };
        let length = u8::try_from(bytes.len() + 1).map_err(|_| {
            SwfError::Malformed(format!("string of {} bytes is too long", bytes.len()))
        })?;
        self.body.write_u8(length)?;
        self.body.write_bytes(&bytes)?;
        self.body.write_u8(0)
    }
}
