//! Bitmaps, sounds, video and binary blobs
//!
//! Payloads are kept as opaque byte vectors; only the framing fields
//! around them are decoded.

use crate::types::{CharacterRef, SoundFormat, SoundInfo};

use super::TagType;

/// Bitmap format holding an 8-bit color table
pub const BITMAP_FORMAT_COLORMAPPED: u8 = 3;

/// DefineBits: JPEG data sharing the JpegTables encoding table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefineBits {
    pub jpeg_data: Vec<u8>,
}

/// JpegTables
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JpegTables {
    pub jpeg_data: Vec<u8>,
}

/// DefineBitsJPEG2: self-contained image data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefineBitsJpeg2 {
    pub image_data: Vec<u8>,
}

/// DefineBitsJPEG3: image data plus zlib-compressed alpha plane
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefineBitsJpeg3 {
    pub image_data: Vec<u8>,
    pub alpha_data: Vec<u8>,
}

/// DefineBitsLossless or DefineBitsLossless2
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefineBitsLossless {
    /// 1 or 2; version 2 carries alpha
    pub version: u8,
    pub format: u8,
    pub width: u16,
    pub height: u16,
    /// Number of color table entries, colormapped images only
    pub color_table_size: Option<u16>,
    pub zlib_data: Vec<u8>,
}

impl DefineBitsLossless {
    pub fn tag_type(&self) -> TagType {
        if self.version >= 2 {
            TagType::DefineBitsLossless2
        } else {
            TagType::DefineBitsLossless
        }
    }
}

/// DefineSound
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefineSound {
    pub format: SoundFormat,
    pub sample_count: u32,
    pub data: Vec<u8>,
}

/// StartSound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartSound {
    pub sound: CharacterRef,
    pub info: SoundInfo,
}

/// StartSound2: sound addressed by class name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartSound2 {
    pub class_name: String,
    pub info: SoundInfo,
}

/// SoundStreamHead or SoundStreamHead2
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoundStreamHead {
    /// 1 or 2
    pub version: u8,
    /// `compression` is not stored for the playback format
    pub playback: SoundFormat,
    pub stream: SoundFormat,
    pub sample_count: u16,
    /// Present on disk only for MP3 streams
    pub latency_seek: i16,
}

impl SoundStreamHead {
    pub fn tag_type(&self) -> TagType {
        if self.version >= 2 {
            TagType::SoundStreamHead2
        } else {
            TagType::SoundStreamHead
        }
    }
}

/// SoundStreamBlock
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoundStreamBlock {
    pub data: Vec<u8>,
}

/// DefineVideoStream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefineVideoStream {
    pub num_frames: u16,
    pub width: u16,
    pub height: u16,
    pub deblocking: u8,
    pub smoothing: bool,
    pub codec_id: u8,
}

/// VideoFrame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub stream: CharacterRef,
    pub frame_num: u16,
    pub data: Vec<u8>,
}

/// DefineBinaryData
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefineBinaryData {
    pub data: Vec<u8>,
}
