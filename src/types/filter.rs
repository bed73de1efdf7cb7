//! Surface filter records (PlaceObject3, DefineButton2)

use super::Color;

/// Filter ID byte for each filter kind
pub mod filter_id {
    pub const DROP_SHADOW: u8 = 0;
    pub const BLUR: u8 = 1;
    pub const GLOW: u8 = 2;
    pub const BEVEL: u8 = 3;
    pub const GRADIENT_GLOW: u8 = 4;
    pub const CONVOLUTION: u8 = 5;
    pub const COLOR_MATRIX: u8 = 6;
    pub const GRADIENT_BEVEL: u8 = 7;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropShadowFilter {
    pub color: Color,
    pub blur_x: f64,
    pub blur_y: f64,
    pub angle: f64,
    pub distance: f64,
    pub strength: f64,
    pub inner_shadow: bool,
    pub knockout: bool,
    pub composite_source: bool,
    pub passes: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlurFilter {
    pub blur_x: f64,
    pub blur_y: f64,
    pub passes: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlowFilter {
    pub color: Color,
    pub blur_x: f64,
    pub blur_y: f64,
    pub strength: f64,
    pub inner_glow: bool,
    pub knockout: bool,
    pub composite_source: bool,
    pub passes: u8,
}

/// Bevel filter
///
/// The highlight color is stored first on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct BevelFilter {
    pub highlight_color: Color,
    pub shadow_color: Color,
    pub blur_x: f64,
    pub blur_y: f64,
    pub angle: f64,
    pub distance: f64,
    pub strength: f64,
    pub inner_shadow: bool,
    pub knockout: bool,
    pub composite_source: bool,
    pub on_top: bool,
    pub passes: u8,
}

/// Shared layout of the gradient glow and gradient bevel filters
#[derive(Debug, Clone, PartialEq)]
pub struct GradientFilter {
    /// `(color, ratio)` pairs; colors are written before ratios
    pub stops: Vec<(Color, u8)>,
    pub blur_x: f64,
    pub blur_y: f64,
    pub angle: f64,
    pub distance: f64,
    pub strength: f64,
    pub inner_shadow: bool,
    pub knockout: bool,
    pub composite_source: bool,
    pub on_top: bool,
    pub passes: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionFilter {
    pub matrix_x: u8,
    pub matrix_y: u8,
    pub divisor: f32,
    pub bias: f32,
    /// `matrix_x * matrix_y` values, row-major
    pub matrix: Vec<f32>,
    pub default_color: Color,
    pub clamp: bool,
    pub preserve_alpha: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    DropShadow(DropShadowFilter),
    Blur(BlurFilter),
    Glow(GlowFilter),
    Bevel(BevelFilter),
    GradientGlow(GradientFilter),
    Convolution(ConvolutionFilter),
    ColorMatrix([f32; 20]),
    GradientBevel(GradientFilter),
}

impl Filter {
    pub fn filter_id(&self) -> u8 {
        match self {
            Filter::DropShadow(_) => filter_id::DROP_SHADOW,
            Filter::Blur(_) => filter_id::BLUR,
            Filter::Glow(_) => filter_id::GLOW,
            Filter::Bevel(_) => filter_id::BEVEL,
            Filter::GradientGlow(_) => filter_id::GRADIENT_GLOW,
            Filter::Convolution(_) => filter_id::CONVOLUTION,
            Filter::ColorMatrix(_) => filter_id::COLOR_MATRIX,
            Filter::GradientBevel(_) => filter_id::GRADIENT_BEVEL,
        }
    }
}
