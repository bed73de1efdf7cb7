//! Rectangle record (twips)

use std::fmt;

/// Axis-aligned rectangle in twips (1/20 pixel)
///
/// Stored on disk as a 5-bit width followed by four signed fields of that
/// width, in `x_min, x_max, y_min, y_max` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    /// Create a rectangle from its four edges
    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Rect {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Rectangle anchored at the origin with the given size
    pub const fn from_size(width: i32, height: i32) -> Self {
        Rect::new(0, width, 0, height)
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    /// The four fields in on-disk order
    pub fn fields(&self) -> [i32; 4] {
        [self.x_min, self.x_max, self.y_min, self.y_max]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}
