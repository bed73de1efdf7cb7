//! Button characters

use crate::types::{ButtonRecord, ButtonSound, CharacterRef};

/// DefineButton
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefineButton {
    pub characters: Vec<ButtonRecord>,
    /// Action bytes without the trailing end-of-actions marker
    pub actions: Vec<u8>,
}

/// DefineButton2
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefineButton2 {
    pub track_as_menu: bool,
    pub characters: Vec<ButtonRecord>,
    /// Opaque condition action records
    pub actions: Vec<u8>,
}

/// Sounds for the four button transitions
#[derive(Debug, Clone, PartialEq)]
pub struct DefineButtonSound {
    pub button: CharacterRef,
    /// OverUpToIdle, IdleToOverUp, OverUpToOverDown, OverDownToOverUp
    pub sounds: [Option<ButtonSound>; 4],
}
