//! Document control tags and opaque passthrough

use bitflags::bitflags;

use crate::types::CharacterRef;

bitflags! {
    /// Flag byte of the FileAttributes tag
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileAttributes: u8 {
        const USE_DIRECT_BLIT = 0x40;
        const USE_GPU = 0x20;
        const HAS_METADATA = 0x10;
        const ACTIONSCRIPT3 = 0x08;
        const USE_NETWORK = 0x01;
    }
}

impl FileAttributes {
    pub fn is_as3(&self) -> bool {
        self.contains(FileAttributes::ACTIONSCRIPT3)
    }
}

/// Class names bound to characters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolClass {
    pub symbols: Vec<(CharacterRef, String)>,
    /// Class bound to ID 0, the main timeline
    pub root_class: Option<String>,
}

/// Characters exported by name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportAssets {
    pub assets: Vec<(CharacterRef, String)>,
}

/// DoABC: an ActionScript 3 bytecode block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DoAbc {
    pub flags: u32,
    pub name: String,
    pub abc_data: Vec<u8>,
}

/// Scene offsets and frame labels of the main timeline
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneAndFrameLabelData {
    /// (frame offset, scene name)
    pub scenes: Vec<(u32, String)>,
    /// (frame number, label)
    pub frame_labels: Vec<(u32, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptLimits {
    pub max_recursion_depth: u16,
    pub script_timeout_seconds: u16,
}

/// Tool that produced the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductInfo {
    pub product: u32,
    pub edition: u32,
    pub major_version: u8,
    pub minor_version: u8,
    pub build: u64,
    /// Milliseconds since the Unix epoch
    pub compile_date: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnableDebugger2 {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnableTelemetry {
    /// Password hash; absent when clients may connect freely
    pub password: Option<String>,
}

/// A tag kept as its undecoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub code: u16,
    pub data: Vec<u8>,
}

impl RawTag {
    pub fn new(code: u16, data: Vec<u8>) -> Self {
        RawTag { code, data }
    }
}
