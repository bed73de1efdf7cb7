//! Shape outline records

use super::{FillStyle, LineStyle};

/// Straight edge delta, tagged with how it is laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StraightEdge {
    General { dx: i32, dy: i32 },
    Vertical { dy: i32 },
    Horizontal { dx: i32 },
}

impl StraightEdge {
    /// Build the most compact edge for a delta
    pub fn from_delta(dx: i32, dy: i32) -> Self {
        match (dx, dy) {
            (0, dy) => StraightEdge::Vertical { dy },
            (dx, 0) => StraightEdge::Horizontal { dx },
            (dx, dy) => StraightEdge::General { dx, dy },
        }
    }

    pub fn delta(&self) -> (i32, i32) {
        match *self {
            StraightEdge::General { dx, dy } => (dx, dy),
            StraightEdge::Vertical { dy } => (0, dy),
            StraightEdge::Horizontal { dx } => (dx, 0),
        }
    }
}

/// Quadratic Bezier edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurvedEdge {
    pub control_dx: i32,
    pub control_dy: i32,
    pub anchor_dx: i32,
    pub anchor_dy: i32,
}

/// Style arrays introduced mid-outline (DefineShape2/3/4 only)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewStyles {
    pub fill_styles: Vec<FillStyle>,
    pub line_styles: Vec<LineStyle>,
}

/// Non-edge record: pen move and/or style selection
///
/// Each `Option` mirrors a state flag.  Style selections are 1-based
/// indices into the style arrays active at that point in the outline;
/// 0 selects no style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleChangeRecord {
    pub move_to: Option<(i32, i32)>,
    pub fill_style0: Option<u32>,
    pub fill_style1: Option<u32>,
    pub line_style: Option<u32>,
    pub new_styles: Option<Box<NewStyles>>,
}

impl StyleChangeRecord {
    pub fn move_to(dx: i32, dy: i32) -> Self {
        StyleChangeRecord {
            move_to: Some((dx, dy)),
            ..Default::default()
        }
    }

    /// True when no state flag is set (such a record cannot be encoded;
    /// all-zero flags terminate the outline)
    pub fn is_empty(&self) -> bool {
        self.move_to.is_none()
            && self.fill_style0.is_none()
            && self.fill_style1.is_none()
            && self.line_style.is_none()
            && self.new_styles.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRecord {
    StyleChange(StyleChangeRecord),
    StraightEdge(StraightEdge),
    CurvedEdge(CurvedEdge),
}

/// Outline without style arrays (glyphs, morph end edges)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    pub records: Vec<ShapeRecord>,
}

/// Outline preceded by its fill and line style arrays
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeWithStyle {
    pub fill_styles: Vec<FillStyle>,
    pub line_styles: Vec<LineStyle>,
    pub records: Vec<ShapeRecord>,
}

/// Style context threaded through outline decoding and encoding.
///
/// Only the table sizes and index widths matter to the bitstream; a
/// style-change record carrying new styles replaces all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleContext {
    pub fill_count: usize,
    pub line_count: usize,
    pub fill_bits: u32,
    pub line_bits: u32,
}

impl StyleContext {
    pub fn new(fill_count: usize, line_count: usize, fill_bits: u32, line_bits: u32) -> Self {
        StyleContext {
            fill_count,
            line_count,
            fill_bits,
            line_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_edge_from_delta() {
        assert_eq!(StraightEdge::from_delta(0, 5), StraightEdge::Vertical { dy: 5 });
        assert_eq!(StraightEdge::from_delta(-3, 0), StraightEdge::Horizontal { dx: -3 });
        assert_eq!(
            StraightEdge::from_delta(1, 2),
            StraightEdge::General { dx: 1, dy: 2 }
        );
        assert_eq!(StraightEdge::Vertical { dy: 9 }.delta(), (0, 9));
    }

    #[test]
    fn test_empty_style_change() {
        assert!(StyleChangeRecord::default().is_empty());
        assert!(!StyleChangeRecord::move_to(0, 0).is_empty());
    }
}
