//! Value records owned by tags
//!
//! These are plain values without identity: geometry, colors, styles,
//! outline records, filters and sound/text/button sub-records.

pub mod button;
pub mod color;
pub mod filter;
pub mod handle;
pub mod matrix;
pub mod rect;
pub mod shape;
pub mod sound;
pub mod styles;
pub mod text;

pub use button::{ButtonRecord, ButtonSound, ButtonStates};
pub use color::Color;
pub use filter::{
    BevelFilter, BlurFilter, ConvolutionFilter, DropShadowFilter, Filter, GlowFilter,
    GradientFilter,
};
pub use handle::{CharacterRef, TagHandle, INVALID_CHARACTER_ID};
pub use matrix::{ColorTransform, Matrix};
pub use rect::Rect;
pub use shape::{
    CurvedEdge, NewStyles, Shape, ShapeRecord, ShapeWithStyle, StraightEdge, StyleChangeRecord,
    StyleContext,
};
pub use sound::{SoundEnvelope, SoundFormat, SoundInfo, SOUND_COMPRESSION_MP3};
pub use styles::{
    FillStyle, GradRecord, Gradient, LineFill, LineStyle, LineStyle2, MorphFillStyle,
    MorphGradRecord, MorphLineFill, MorphLineStyle, MorphLineStyle2,
};
pub use text::{FontFlags, FontLayout, GlyphEntry, KerningRecord, TextRecord, ZoneRecord};
