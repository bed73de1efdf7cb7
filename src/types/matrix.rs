//! Affine matrix and color transform records

/// 2x3 affine matrix
///
/// Scale and rotate/skew terms are 16.16 fixed-point on disk; translation
/// is in twips.  A term pair that is absent is written as a single zero bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub has_scale: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    pub has_rotate: bool,
    pub rotate_skew0: f64,
    pub rotate_skew1: f64,
    pub translate_x: i32,
    pub translate_y: i32,
}

impl Matrix {
    /// The identity matrix (no scale or rotate terms stored)
    pub const IDENTITY: Matrix = Matrix {
        has_scale: false,
        scale_x: 1.0,
        scale_y: 1.0,
        has_rotate: false,
        rotate_skew0: 0.0,
        rotate_skew1: 0.0,
        translate_x: 0,
        translate_y: 0,
    };

    /// Pure translation
    pub fn translation(x: i32, y: i32) -> Self {
        Matrix {
            translate_x: x,
            translate_y: y,
            ..Matrix::IDENTITY
        }
    }

    /// Set the scale pair
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.has_scale = true;
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// Set the rotate/skew pair
    pub fn with_rotate(mut self, skew0: f64, skew1: f64) -> Self {
        self.has_rotate = true;
        self.rotate_skew0 = skew0;
        self.rotate_skew1 = skew1;
        self
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

/// Color transform, with or without an alpha channel
///
/// Multiplication terms are 8.8 fixed-point stored as raw integers
/// (`256` == 1.0).  The alpha term is ignored by records that carry a
/// plain CXFORM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTransform {
    /// Red, green, blue, alpha multipliers
    pub mult_terms: Option<[i32; 4]>,
    /// Red, green, blue, alpha offsets
    pub add_terms: Option<[i32; 4]>,
}

impl ColorTransform {
    pub const IDENTITY: ColorTransform = ColorTransform {
        mult_terms: None,
        add_terms: None,
    };

    pub fn with_mult(mut self, r: i32, g: i32, b: i32, a: i32) -> Self {
        self.mult_terms = Some([r, g, b, a]);
        self
    }

    pub fn with_add(mut self, r: i32, g: i32, b: i32, a: i32) -> Self {
        self.add_terms = Some([r, g, b, a]);
        self
    }
}

impl Default for ColorTransform {
    fn default() -> Self {
        ColorTransform::IDENTITY
    }
}
