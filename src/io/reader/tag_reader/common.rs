//! Shared value-record decoders
//!
//! Rectangles, matrices, colors, color transforms, filters and sound
//! info records are read the same way wherever they appear. None of them
//! refer to other characters, so they work on a bare [`BitReader`].

use encoding_rs::WINDOWS_1252;

use crate::error::{Result, SwfError};
use crate::io::BitReader;
use crate::types::filter::filter_id;
use crate::types::{
    BevelFilter, BlurFilter, Color, ColorTransform, ConvolutionFilter, DropShadowFilter, Filter,
    GlowFilter, GradientFilter, Matrix, Rect, SoundEnvelope, SoundInfo,
};

use super::TagReader;

// ---------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------

pub fn read_rect(reader: &mut BitReader) -> Result<Rect> {
    reader.byte_align();
    let bits = reader.read_ub(5)?;
    let rect = Rect {
        x_min: reader.read_sb(bits)?,
        x_max: reader.read_sb(bits)?,
        y_min: reader.read_sb(bits)?,
        y_max: reader.read_sb(bits)?,
    };
    reader.byte_align();
    Ok(rect)
}

pub fn read_matrix(reader: &mut BitReader) -> Result<Matrix> {
    reader.byte_align();
    let mut matrix = Matrix::IDENTITY;

    matrix.has_scale = reader.read_bit()?;
    if matrix.has_scale {
        let bits = reader.read_ub(5)?;
        matrix.scale_x = reader.read_fb(bits)?;
        matrix.scale_y = reader.read_fb(bits)?;
    }

    matrix.has_rotate = reader.read_bit()?;
    if matrix.has_rotate {
        let bits = reader.read_ub(5)?;
        matrix.rotate_skew0 = reader.read_fb(bits)?;
        matrix.rotate_skew1 = reader.read_fb(bits)?;
    }

    let bits = reader.read_ub(5)?;
    matrix.translate_x = reader.read_sb(bits)?;
    matrix.translate_y = reader.read_sb(bits)?;

    reader.byte_align();
    Ok(matrix)
}

// ---------------------------------------------------------------
// Colors
// ---------------------------------------------------------------

pub fn read_rgb(reader: &mut BitReader) -> Result<Color> {
    let r = reader.read_u8()?;
    let g = reader.read_u8()?;
    let b = reader.read_u8()?;
    Ok(Color::rgb(r, g, b))
}

pub fn read_rgba(reader: &mut BitReader) -> Result<Color> {
    let r = reader.read_u8()?;
    let g = reader.read_u8()?;
    let b = reader.read_u8()?;
    let a = reader.read_u8()?;
    Ok(Color::rgba(r, g, b, a))
}

/// RGB or RGBA depending on the enclosing tag.
pub fn read_color(reader: &mut BitReader, has_alpha: bool) -> Result<Color> {
    if has_alpha {
        read_rgba(reader)
    } else {
        read_rgb(reader)
    }
}

/// CXFORM: three channels; alpha terms are filled with their neutral value.
pub fn read_cxform(reader: &mut BitReader) -> Result<ColorTransform> {
    reader.byte_align();
    let has_add = reader.read_bit()?;
    let has_mult = reader.read_bit()?;
    let bits = reader.read_ub(4)?;
    let mut transform = ColorTransform::IDENTITY;
    if has_mult {
        let r = reader.read_sb(bits)?;
        let g = reader.read_sb(bits)?;
        let b = reader.read_sb(bits)?;
        transform.mult_terms = Some([r, g, b, 256]);
    }
    if has_add {
        let r = reader.read_sb(bits)?;
        let g = reader.read_sb(bits)?;
        let b = reader.read_sb(bits)?;
        transform.add_terms = Some([r, g, b, 0]);
    }
    reader.byte_align();
    Ok(transform)
}

/// CXFORMWITHALPHA
pub fn read_cxform_alpha(reader: &mut BitReader) -> Result<ColorTransform> {
    reader.byte_align();
    let has_add = reader.read_bit()?;
    let has_mult = reader.read_bit()?;
    let bits = reader.read_ub(4)?;
    let mut transform = ColorTransform::IDENTITY;
    if has_mult {
        transform.mult_terms = Some(read_terms(reader, bits)?);
    }
    if has_add {
        transform.add_terms = Some(read_terms(reader, bits)?);
    }
    reader.byte_align();
    Ok(transform)
}

fn read_terms(reader: &mut BitReader, bits: u32) -> Result<[i32; 4]> {
    let mut terms = [0i32; 4];
    for term in terms.iter_mut() {
        *term = reader.read_sb(bits)?;
    }
    Ok(terms)
}

// ---------------------------------------------------------------
// Filters
// ---------------------------------------------------------------

/// FILTERLIST: UI8 count followed by the filters.
pub fn read_filter_list(reader: &mut BitReader) -> Result<Vec<Filter>> {
    let count = reader.read_u8()?;
    let mut filters = Vec::with_capacity(count as usize);
    for _ in 0..count {
        filters.push(read_filter(reader)?);
    }
    Ok(filters)
}

pub fn read_filter(reader: &mut BitReader) -> Result<Filter> {
    let id = reader.read_u8()?;
    let filter = match id {
        filter_id::DROP_SHADOW => Filter::DropShadow(DropShadowFilter {
            color: read_rgba(reader)?,
            blur_x: reader.read_fixed()?,
            blur_y: reader.read_fixed()?,
            angle: reader.read_fixed()?,
            distance: reader.read_fixed()?,
            strength: reader.read_fixed8()?,
            inner_shadow: reader.read_bit()?,
            knockout: reader.read_bit()?,
            composite_source: reader.read_bit()?,
            passes: reader.read_ub(5)? as u8,
        }),
        filter_id::BLUR => {
            let blur_x = reader.read_fixed()?;
            let blur_y = reader.read_fixed()?;
            let passes = reader.read_ub(5)? as u8;
            reader.read_ub(3)?; // reserved
            Filter::Blur(BlurFilter {
                blur_x,
                blur_y,
                passes,
            })
        }
        filter_id::GLOW => Filter::Glow(GlowFilter {
            color: read_rgba(reader)?,
            blur_x: reader.read_fixed()?,
            blur_y: reader.read_fixed()?,
            strength: reader.read_fixed8()?,
            inner_glow: reader.read_bit()?,
            knockout: reader.read_bit()?,
            composite_source: reader.read_bit()?,
            passes: reader.read_ub(5)? as u8,
        }),
        filter_id::BEVEL => Filter::Bevel(BevelFilter {
            highlight_color: read_rgba(reader)?,
            shadow_color: read_rgba(reader)?,
            blur_x: reader.read_fixed()?,
            blur_y: reader.read_fixed()?,
            angle: reader.read_fixed()?,
            distance: reader.read_fixed()?,
            strength: reader.read_fixed8()?,
            inner_shadow: reader.read_bit()?,
            knockout: reader.read_bit()?,
            composite_source: reader.read_bit()?,
            on_top: reader.read_bit()?,
            passes: reader.read_ub(4)? as u8,
        }),
        filter_id::GRADIENT_GLOW => Filter::GradientGlow(read_gradient_filter(reader)?),
        filter_id::GRADIENT_BEVEL => Filter::GradientBevel(read_gradient_filter(reader)?),
        filter_id::CONVOLUTION => {
            let matrix_x = reader.read_u8()?;
            let matrix_y = reader.read_u8()?;
            let divisor = reader.read_f32()?;
            let bias = reader.read_f32()?;
            let count = matrix_x as usize * matrix_y as usize;
            let mut matrix = Vec::with_capacity(count);
            for _ in 0..count {
                matrix.push(reader.read_f32()?);
            }
            let default_color = read_rgba(reader)?;
            reader.read_ub(6)?; // reserved
            Filter::Convolution(ConvolutionFilter {
                matrix_x,
                matrix_y,
                divisor,
                bias,
                matrix,
                default_color,
                clamp: reader.read_bit()?,
                preserve_alpha: reader.read_bit()?,
            })
        }
        filter_id::COLOR_MATRIX => {
            let mut matrix = [0f32; 20];
            for value in matrix.iter_mut() {
                *value = reader.read_f32()?;
            }
            Filter::ColorMatrix(matrix)
        }
        other => {
            return Err(SwfError::Malformed(format!("unknown filter id {}", other)));
        }
    };
    reader.byte_align();
    Ok(filter)
}

fn read_gradient_filter(reader: &mut BitReader) -> Result<GradientFilter> {
    let count = reader.read_u8()? as usize;
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        colors.push(read_rgba(reader)?);
    }
    let mut stops = Vec::with_capacity(count);
    for color in colors {
        stops.push((color, reader.read_u8()?));
    }
    Ok(GradientFilter {
        stops,
        blur_x: reader.read_fixed()?,
        blur_y: reader.read_fixed()?,
        angle: reader.read_fixed()?,
        distance: reader.read_fixed()?,
        strength: reader.read_fixed8()?,
        inner_shadow: reader.read_bit()?,
        knockout: reader.read_bit()?,
        composite_source: reader.read_bit()?,
        on_top: reader.read_bit()?,
        passes: reader.read_ub(4)? as u8,
    })
}

// ---------------------------------------------------------------
// Sound
// ---------------------------------------------------------------

pub fn read_sound_info(reader: &mut BitReader) -> Result<SoundInfo> {
    reader.byte_align();
    reader.read_ub(2)?; // reserved
    let sync_stop = reader.read_bit()?;
    let sync_no_multiple = reader.read_bit()?;
    let has_envelope = reader.read_bit()?;
    let has_loops = reader.read_bit()?;
    let has_out_point = reader.read_bit()?;
    let has_in_point = reader.read_bit()?;

    let in_point = if has_in_point {
        Some(reader.read_u32()?)
    } else {
        None
    };
    let out_point = if has_out_point {
        Some(reader.read_u32()?)
    } else {
        None
    };
    let loop_count = if has_loops {
        Some(reader.read_u16()?)
    } else {
        None
    };
    let envelope = if has_envelope {
        let count = reader.read_u8()?;
        let mut points = Vec::with_capacity(count as usize);
        for _ in 0..count {
            points.push(SoundEnvelope {
                pos44: reader.read_u32()?,
                left_level: reader.read_u16()?,
                right_level: reader.read_u16()?,
            });
        }
        Some(points)
    } else {
        None
    };

    Ok(SoundInfo {
        sync_stop,
        sync_no_multiple,
        in_point,
        out_point,
        loop_count,
        envelope,
    })
}

impl TagReader {
    /// UI8-length string; the stored length counts a trailing NUL.
    ///
    /// Files before version 6 store these strings in the ANSI code page.
    pub(super) fn read_length_string(&mut self) -> Result<String> {
        let length = self.reader.read_u8()? as usize;
        let bytes = self.reader.read_bytes(length)?;
        let text = &bytes[..length.saturating_sub(1)];
        if self.version >= 6 {
            String::from_utf8(text.to_vec()).map_err(|e| SwfError::Encoding(e.to_string()))
        } else {
            let (decoded, _, _) = WINDOWS_1252.decode(text);
            Ok(decoded.into_owned())
        }
    }
}
