//! Shape and morph shape definitions

use crate::types::{MorphFillStyle, MorphLineStyle, Rect, Shape, ShapeWithStyle};

use super::TagType;

/// DefineShape, DefineShape2, DefineShape3 or DefineShape4
#[derive(Debug, Clone, PartialEq)]
pub struct DefineShape {
    /// 1 to 4; selects color depth, style layout and header fields
    pub version: u8,
    pub bounds: Rect,
    /// DefineShape4 only
    pub edge_bounds: Rect,
    /// DefineShape4 only
    pub uses_fill_winding_rule: bool,
    /// DefineShape4 only
    pub uses_non_scaling_strokes: bool,
    /// DefineShape4 only
    pub uses_scaling_strokes: bool,
    pub shapes: ShapeWithStyle,
}

impl DefineShape {
    pub fn new(version: u8, bounds: Rect, shapes: ShapeWithStyle) -> Self {
        DefineShape {
            version,
            bounds,
            edge_bounds: bounds,
            uses_fill_winding_rule: false,
            uses_non_scaling_strokes: false,
            uses_scaling_strokes: false,
            shapes,
        }
    }

    pub fn tag_type(&self) -> TagType {
        match self.version {
            1 => TagType::DefineShape,
            2 => TagType::DefineShape2,
            3 => TagType::DefineShape3,
            _ => TagType::DefineShape4,
        }
    }
}

/// DefineMorphShape or DefineMorphShape2
#[derive(Debug, Clone, PartialEq)]
pub struct DefineMorphShape {
    /// 1 or 2
    pub version: u8,
    pub start_bounds: Rect,
    pub end_bounds: Rect,
    /// DefineMorphShape2 only
    pub start_edge_bounds: Rect,
    /// DefineMorphShape2 only
    pub end_edge_bounds: Rect,
    /// DefineMorphShape2 only
    pub uses_non_scaling_strokes: bool,
    /// DefineMorphShape2 only
    pub uses_scaling_strokes: bool,
    pub fill_styles: Vec<MorphFillStyle>,
    pub line_styles: Vec<MorphLineStyle>,
    pub start_edges: Shape,
    pub end_edges: Shape,
}

impl DefineMorphShape {
    pub fn tag_type(&self) -> TagType {
        if self.version >= 2 {
            TagType::DefineMorphShape2
        } else {
            TagType::DefineMorphShape
        }
    }
}
