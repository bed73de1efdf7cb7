//! Button character records

use bitflags::bitflags;

use super::{CharacterRef, ColorTransform, Filter, Matrix};

bitflags! {
    /// Button states in which a character is shown.
    ///
    /// Bit values match the low nibble of the record's flag byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonStates: u8 {
        const UP = 0x01;
        const OVER = 0x02;
        const DOWN = 0x04;
        const HIT_TEST = 0x08;
    }
}

/// Blend mode present flag within the record flag byte
pub(crate) const BUTTON_HAS_BLEND_MODE: u8 = 0x20;
/// Filter list present flag within the record flag byte
pub(crate) const BUTTON_HAS_FILTER_LIST: u8 = 0x10;

/// A character placed in one or more button states
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonRecord {
    pub states: ButtonStates,
    pub character: CharacterRef,
    pub depth: u16,
    pub matrix: Matrix,
    /// DefineButton2 only
    pub color_transform: ColorTransform,
    /// DefineButton2 only
    pub filters: Option<Vec<Filter>>,
    /// DefineButton2 only
    pub blend_mode: Option<u8>,
}

impl ButtonRecord {
    pub fn new(states: ButtonStates, character: CharacterRef, depth: u16) -> Self {
        ButtonRecord {
            states,
            character,
            depth,
            matrix: Matrix::IDENTITY,
            color_transform: ColorTransform::IDENTITY,
            filters: None,
            blend_mode: None,
        }
    }

    /// The on-disk flag byte (never zero for a valid record)
    pub fn flag_byte(&self) -> u8 {
        let mut flags = self.states.bits();
        if self.blend_mode.is_some() {
            flags |= BUTTON_HAS_BLEND_MODE;
        }
        if self.filters.is_some() {
            flags |= BUTTON_HAS_FILTER_LIST;
        }
        flags
    }
}

/// Sound bound to one button transition
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSound {
    pub sound: CharacterRef,
    pub info: super::SoundInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TagHandle;

    #[test]
    fn test_flag_byte() {
        let mut rec = ButtonRecord::new(
            ButtonStates::UP | ButtonStates::HIT_TEST,
            CharacterRef::Tag(TagHandle::new(0)),
            1,
        );
        assert_eq!(rec.flag_byte(), 0x09);
        rec.blend_mode = Some(3);
        rec.filters = Some(Vec::new());
        assert_eq!(rec.flag_byte(), 0x39);
    }
}
