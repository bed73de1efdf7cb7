//! Fill, line and gradient style records
//!
//! Shape tags own two style arrays (fill and line).  Style-change records
//! inside an outline select entries from those arrays by 1-based index, so
//! the arrays here are plain `Vec`s and the outline stores indices.

use super::{CharacterRef, Color, Matrix};

/// Fill style type codes
pub mod fill_type {
    pub const SOLID: u8 = 0x00;
    pub const LINEAR_GRADIENT: u8 = 0x10;
    pub const RADIAL_GRADIENT: u8 = 0x12;
    pub const FOCAL_RADIAL_GRADIENT: u8 = 0x13;
    pub const REPEATING_BITMAP: u8 = 0x40;
    pub const CLIPPED_BITMAP: u8 = 0x41;
    pub const NON_SMOOTHED_REPEATING_BITMAP: u8 = 0x42;
    pub const NON_SMOOTHED_CLIPPED_BITMAP: u8 = 0x43;
}

/// Line join style that carries a miter limit
pub const JOIN_MITER: u8 = 2;

/// One gradient control point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradRecord {
    pub ratio: u8,
    pub color: Color,
}

/// Gradient definition (up to 15 records)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    /// 0 = pad, 1 = reflect, 2 = repeat
    pub spread_mode: u8,
    /// 0 = normal RGB, 1 = linear RGB
    pub interpolation_mode: u8,
    pub records: Vec<GradRecord>,
}

/// A fill style entry
#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    /// Solid color (RGB in DefineShape/2, RGBA in DefineShape3/4)
    Solid(Color),
    LinearGradient {
        matrix: Matrix,
        gradient: Gradient,
    },
    RadialGradient {
        matrix: Matrix,
        gradient: Gradient,
    },
    FocalRadialGradient {
        matrix: Matrix,
        gradient: Gradient,
        /// 8.8 fixed-point focal point
        focal_point: f64,
    },
    Bitmap {
        bitmap: CharacterRef,
        matrix: Matrix,
        clipped: bool,
        smoothed: bool,
    },
}

impl FillStyle {
    /// On-disk fill style type byte
    pub fn fill_type(&self) -> u8 {
        match self {
            FillStyle::Solid(_) => fill_type::SOLID,
            FillStyle::LinearGradient { .. } => fill_type::LINEAR_GRADIENT,
            FillStyle::RadialGradient { .. } => fill_type::RADIAL_GRADIENT,
            FillStyle::FocalRadialGradient { .. } => fill_type::FOCAL_RADIAL_GRADIENT,
            FillStyle::Bitmap {
                clipped, smoothed, ..
            } => bitmap_fill_type(*clipped, *smoothed),
        }
    }
}

/// Bitmap fill type byte for the given clip/smoothing combination
pub fn bitmap_fill_type(clipped: bool, smoothed: bool) -> u8 {
    fill_type::REPEATING_BITMAP | (clipped as u8) | ((!smoothed as u8) << 1)
}

/// Line fill for a [`LineStyle2`]
#[derive(Debug, Clone, PartialEq)]
pub enum LineFill {
    Color(Color),
    Fill(FillStyle),
}

/// Extended line style used by DefineShape4
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle2 {
    pub width: u16,
    pub start_cap_style: u8,
    pub join_style: u8,
    pub no_hscale: bool,
    pub no_vscale: bool,
    pub pixel_hinting: bool,
    pub no_close: bool,
    pub end_cap_style: u8,
    /// Only stored when `join_style` is [`JOIN_MITER`]
    pub miter_limit_factor: u16,
    pub fill: LineFill,
}

impl LineStyle2 {
    /// A round-capped, round-joined solid line
    pub fn solid(width: u16, color: Color) -> Self {
        LineStyle2 {
            width,
            start_cap_style: 0,
            join_style: 0,
            no_hscale: false,
            no_vscale: false,
            pixel_hinting: false,
            no_close: false,
            end_cap_style: 0,
            miter_limit_factor: 0,
            fill: LineFill::Color(color),
        }
    }
}

/// A line style entry
#[derive(Debug, Clone, PartialEq)]
pub enum LineStyle {
    /// Width plus RGB (DefineShape/2) or RGBA (DefineShape3)
    Plain { width: u16, color: Color },
    /// DefineShape4 line style
    Extended(Box<LineStyle2>),
}

impl LineStyle {
    pub fn width(&self) -> u16 {
        match self {
            LineStyle::Plain { width, .. } => *width,
            LineStyle::Extended(s) => s.width,
        }
    }
}

// ---------------------------------------------------------------------------
// Morph styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphGradRecord {
    pub start_ratio: u8,
    pub start_color: Color,
    pub end_ratio: u8,
    pub end_color: Color,
}

/// Morph fill style; colors are always RGBA
#[derive(Debug, Clone, PartialEq)]
pub enum MorphFillStyle {
    Solid {
        start_color: Color,
        end_color: Color,
    },
    Gradient {
        /// One of the three gradient fill type codes
        fill_type: u8,
        start_matrix: Matrix,
        end_matrix: Matrix,
        records: Vec<MorphGradRecord>,
        /// Focal ratios, present for focal fills in DefineMorphShape2
        focal_ratios: Option<(i16, i16)>,
    },
    Bitmap {
        bitmap: CharacterRef,
        start_matrix: Matrix,
        end_matrix: Matrix,
        clipped: bool,
        smoothed: bool,
    },
}

impl MorphFillStyle {
    pub fn fill_type(&self) -> u8 {
        match self {
            MorphFillStyle::Solid { .. } => fill_type::SOLID,
            MorphFillStyle::Gradient { fill_type, .. } => *fill_type,
            MorphFillStyle::Bitmap {
                clipped, smoothed, ..
            } => bitmap_fill_type(*clipped, *smoothed),
        }
    }
}

/// Line fill for a [`MorphLineStyle2`]
#[derive(Debug, Clone, PartialEq)]
pub enum MorphLineFill {
    Colors { start: Color, end: Color },
    Fill(MorphFillStyle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MorphLineStyle2 {
    pub start_width: u16,
    pub end_width: u16,
    pub start_cap_style: u8,
    pub join_style: u8,
    pub no_hscale: bool,
    pub no_vscale: bool,
    pub pixel_hinting: bool,
    pub no_close: bool,
    pub end_cap_style: u8,
    pub miter_limit_factor: u16,
    pub fill: MorphLineFill,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MorphLineStyle {
    /// DefineMorphShape line style
    Plain {
        start_width: u16,
        end_width: u16,
        start_color: Color,
        end_color: Color,
    },
    /// DefineMorphShape2 line style
    Extended(Box<MorphLineStyle2>),
}
