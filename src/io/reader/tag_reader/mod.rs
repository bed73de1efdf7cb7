//! Recursive-descent tag decoder
//!
//! Pulls tags off a [`BitReader`] positioned at the first tag header and
//! turns each body into a typed [`Tag`] stored in a [`TagTable`].
//!
//! # Error isolation
//!
//! Every body is read with the boundary narrowed to the end of the tag, so
//! a decoder can never run into its neighbour. When a body fails to decode
//! the failure is recorded as a problem, the tag is dropped and the stream
//! is resynchronised from the declared length. Only a damaged tag header
//! ends the tag list early.
//!
//! # Character references
//!
//! Character tags are entered into the [`Dictionary`] as soon as they are
//! stored, so later tags resolve their IDs to handles while decoding.
//! Sprite children go through the same path, which makes their characters
//! visible to the rest of the file.

pub mod common;
pub mod read_shapes;
pub mod read_tags;
pub mod read_text;

use tracing::{debug, warn};

use crate::error::{Result, SwfError};
use crate::io::bit_reader::{BitReader, NO_BOUNDARY};
use crate::io::Dictionary;
use crate::notification::{NotificationCollection, NotificationType};
use crate::tags::{RawTag, Tag, TagTable, TagType};
use crate::types::{CharacterRef, TagHandle};

/// A decoded body and the character ID it was defined with
pub type DecodedBody = (Tag, Option<u16>);

/// Header length value announcing a 32-bit length field
pub(crate) const LONG_HEADER_LENGTH: u32 = 0x3F;

/// Tag header as found in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    /// 10-bit tag code
    pub code: u16,
    /// Body length in bytes
    pub length: u32,
    /// Offset of the first header byte
    pub offset: u64,
    /// Offset of the first body byte
    pub body_offset: u64,
}

impl TagHeader {
    pub fn tag_type(&self) -> Option<TagType> {
        TagType::from_code(self.code)
    }

    fn name(&self) -> String {
        match self.tag_type() {
            Some(tag_type) => tag_type.to_string(),
            None => format!("Unknown({})", self.code),
        }
    }
}

/// Tag stream decoder for one file
pub struct TagReader {
    reader: BitReader,
    version: u8,
    failsafe: bool,
    keep_unknown_tags: bool,
    /// End of the tag list being read; narrower than the data for sprites
    list_end: u64,
    tags: TagTable,
    dictionary: Dictionary,
    notifications: NotificationCollection,
}

impl TagReader {
    /// Create a decoder over `reader`, which must sit on a tag header.
    pub fn new(reader: BitReader, version: u8) -> Self {
        TagReader {
            reader,
            version,
            failsafe: true,
            keep_unknown_tags: true,
            list_end: NO_BOUNDARY,
            tags: TagTable::new(),
            dictionary: Dictionary::new(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Abort on the first body error instead of recording it.
    pub fn with_failsafe(mut self, failsafe: bool) -> Self {
        self.failsafe = failsafe;
        self
    }

    /// Keep unknown codes as [`Tag::Raw`] instead of discarding them.
    pub fn with_unknown_tags(mut self, keep: bool) -> Self {
        self.keep_unknown_tags = keep;
        self
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Continue with problems gathered before the tag stream.
    pub fn with_notifications(mut self, notifications: NotificationCollection) -> Self {
        self.notifications = notifications;
        self
    }

    /// Hand over the tag arena, the dictionary and the recorded problems.
    pub fn into_parts(self) -> (TagTable, Dictionary, NotificationCollection) {
        (self.tags, self.dictionary, self.notifications)
    }

    // ---------------------------------------------------------------
    // Tag loop
    // ---------------------------------------------------------------

    /// Read tags up to and including End.
    ///
    /// Returns the handles of the stored tags in stream order; End itself
    /// and dropped tags are not part of the list.
    pub fn read_tag_list(&mut self) -> Result<Vec<TagHandle>> {
        let mut handles = Vec::new();
        loop {
            match self.next_tag()? {
                Some((Tag::End, _)) => break,
                Some((tag, id)) => handles.push(self.store(tag, id)),
                None => {}
            }
        }
        Ok(handles)
    }

    /// Decode the next tag; `None` when the tag was dropped.
    pub fn next_tag(&mut self) -> Result<Option<DecodedBody>> {
        let header = match self.read_tag_header() {
            Ok(header) => header,
            Err(e) => {
                debug!(offset = self.reader.offset(), error = %e, "tag header unreadable");
                let offset = self.reader.offset();
                let message = match e {
                    SwfError::StreamExhausted { .. } | SwfError::BoundaryExceeded { .. } => {
                        "Unexpected end of file in tag header".to_string()
                    }
                    other => format!("Unable to read tag header: {}", other),
                };
                self.report(NotificationType::Error, message, offset, None);
                return Ok(Some((Tag::End, None)));
            }
        };
        self.read_tag(header)
    }

    /// Read the 2 or 6 byte tag header.
    pub fn read_tag_header(&mut self) -> Result<TagHeader> {
        let offset = self.reader.offset();
        self.reader.set_boundary((offset + 2).min(self.list_end));
        let word = self.reader.read_u16()?;
        let code = word >> 6;
        let mut length = (word & 0x3F) as u32;
        if length == LONG_HEADER_LENGTH {
            self.reader.set_boundary((offset + 6).min(self.list_end));
            let long_length = self.reader.read_i32()?;
            if long_length < 0 {
                return Err(SwfError::Malformed(format!(
                    "negative tag length {}",
                    long_length
                )));
            }
            length = long_length as u32;
        }
        Ok(TagHeader {
            code,
            length,
            offset,
            body_offset: self.reader.offset(),
        })
    }

    /// Decode one body and resynchronise on the declared length.
    fn read_tag(&mut self, header: TagHeader) -> Result<Option<DecodedBody>> {
        let end = header.body_offset + header.length as u64;
        self.reader.set_boundary(end.min(self.list_end));

        debug!(
            offset = header.offset,
            code = header.code,
            length = header.length,
            "reading tag"
        );

        let (body, decoded) = match self.read_tag_body(&header) {
            Ok(body) => (body, true),
            Err(e) => {
                if !self.failsafe {
                    return Err(e);
                }
                let message = match &e {
                    SwfError::UnresolvedCharacterReference(id) => {
                        format!("Character ID {} not found in tag {}", id, header.name())
                    }
                    SwfError::UnknownFillStyle(fill_type) => {
                        format!("Unknown fill style type {:#04X} in tag {}", fill_type, header.name())
                    }
                    _ => format!(
                        "Unable to read body of tag {} ({} bytes): {}",
                        header.name(),
                        header.length,
                        e
                    ),
                };
                self.report(
                    NotificationType::Error,
                    message,
                    header.offset,
                    Some(header.code),
                );
                (None, false)
            }
        };

        let rest = match self.reader.read_to_boundary() {
            Ok(rest) => rest,
            Err(e) => {
                if !self.failsafe {
                    return Err(e);
                }
                // A failed body was already reported
                if decoded {
                    self.report(
                        NotificationType::Error,
                        format!(
                            "Tag {} extends past the end of the data ({} bytes declared)",
                            header.name(),
                            header.length
                        ),
                        header.offset,
                        Some(header.code),
                    );
                }
                return Ok(Some((Tag::End, None)));
            }
        };
        if decoded && body.is_some() && rest.iter().any(|&b| b != 0) {
            self.report(
                NotificationType::Warning,
                format!(
                    "Tag {} is longer than its body ({} bytes left)",
                    header.name(),
                    rest.len()
                ),
                header.offset,
                Some(header.code),
            );
        }
        Ok(body)
    }

    /// Dispatch to the body decoder for the header's code.
    ///
    /// `Ok(None)` means the tag was read and deliberately discarded.
    fn read_tag_body(&mut self, header: &TagHeader) -> Result<Option<DecodedBody>> {
        use TagType::*;

        let Some(tag_type) = header.tag_type() else {
            if self.keep_unknown_tags {
                let data = self.reader.read_to_boundary()?;
                return Ok(Some((Tag::Raw(RawTag::new(header.code, data)), None)));
            }
            self.reader.read_to_boundary()?;
            debug!(code = header.code, "skipping unknown tag");
            return Ok(None);
        };

        let body = match tag_type {
            End => (Tag::End, None),
            ShowFrame => (Tag::ShowFrame, None),

            DefineShape | DefineShape2 | DefineShape3 | DefineShape4 => {
                character(self.read_define_shape(tag_type)?, Tag::DefineShape)
            }
            DefineMorphShape | DefineMorphShape2 => {
                character(self.read_define_morph_shape(tag_type)?, Tag::DefineMorphShape)
            }

            PlaceObject => (Tag::PlaceObject(self.read_place_object()?), None),
            PlaceObject2 | PlaceObject3 => {
                (Tag::PlaceObject2(self.read_place_object2(tag_type)?), None)
            }
            RemoveObject => (Tag::RemoveObject(self.read_remove_object()?), None),
            RemoveObject2 => (Tag::RemoveObject2(self.read_remove_object2()?), None),

            DefineBits => character(self.read_define_bits()?, Tag::DefineBits),
            JpegTables => (Tag::JpegTables(self.read_jpeg_tables()?), None),
            DefineBitsJpeg2 => character(self.read_define_bits_jpeg2()?, Tag::DefineBitsJpeg2),
            DefineBitsJpeg3 => character(self.read_define_bits_jpeg3()?, Tag::DefineBitsJpeg3),
            DefineBitsLossless | DefineBitsLossless2 => character(
                self.read_define_bits_lossless(tag_type)?,
                Tag::DefineBitsLossless,
            ),

            DefineButton => character(self.read_define_button()?, Tag::DefineButton),
            DefineButton2 => character(self.read_define_button2()?, Tag::DefineButton2),
            DefineButtonSound => (Tag::DefineButtonSound(self.read_define_button_sound()?), None),

            DefineFont => character(self.read_define_font()?, Tag::DefineFont),
            DefineFont2 | DefineFont3 => {
                character(self.read_define_font2(tag_type)?, Tag::DefineFont2)
            }
            DefineFont4 => character(self.read_define_font4()?, Tag::DefineFont4),
            DefineFontInfo | DefineFontInfo2 => {
                (Tag::DefineFontInfo(self.read_define_font_info(tag_type)?), None)
            }
            DefineFontAlignZones => (
                Tag::DefineFontAlignZones(self.read_define_font_align_zones()?),
                None,
            ),
            DefineFontName => (Tag::DefineFontName(self.read_define_font_name()?), None),
            CsmTextSettings => {
                let settings = self.read_csm_text_settings(header)?;
                (Tag::CsmTextSettings(settings), None)
            }

            DefineText | DefineText2 => character(self.read_define_text(tag_type)?, Tag::DefineText),
            DefineEditText => character(self.read_define_edit_text()?, Tag::DefineEditText),

            DefineSound => character(self.read_define_sound()?, Tag::DefineSound),
            StartSound => (Tag::StartSound(self.read_start_sound()?), None),
            StartSound2 => (Tag::StartSound2(self.read_start_sound2()?), None),
            SoundStreamHead | SoundStreamHead2 => {
                (Tag::SoundStreamHead(self.read_sound_stream_head(tag_type)?), None)
            }
            SoundStreamBlock => (Tag::SoundStreamBlock(self.read_sound_stream_block()?), None),

            DefineVideoStream => {
                character(self.read_define_video_stream()?, Tag::DefineVideoStream)
            }
            VideoFrame => (Tag::VideoFrame(self.read_video_frame()?), None),
            DefineBinaryData => character(self.read_define_binary_data()?, Tag::DefineBinaryData),
            DefineSprite => character(self.read_define_sprite()?, Tag::DefineSprite),
            DefineScalingGrid => (Tag::DefineScalingGrid(self.read_define_scaling_grid()?), None),

            FrameLabel => (Tag::FrameLabel(self.read_frame_label()?), None),
            SetTabIndex => (Tag::SetTabIndex(self.read_set_tab_index()?), None),
            SetBackgroundColor => (Tag::SetBackgroundColor(common::read_rgb(&mut self.reader)?), None),
            FileAttributes => (Tag::FileAttributes(self.read_file_attributes()?), None),
            Metadata => (Tag::Metadata(self.reader.read_string()?), None),
            SymbolClass => (Tag::SymbolClass(self.read_symbol_class()?), None),
            ExportAssets => (Tag::ExportAssets(self.read_export_assets()?), None),
            DoAbc => (Tag::DoAbc(self.read_do_abc()?), None),
            DefineSceneAndFrameLabelData => (
                Tag::DefineSceneAndFrameLabelData(self.read_scene_and_frame_label_data()?),
                None,
            ),
            ScriptLimits => (Tag::ScriptLimits(self.read_script_limits()?), None),
            ProductInfo => (Tag::ProductInfo(self.read_product_info()?), None),
            EnableDebugger2 => (Tag::EnableDebugger2(self.read_enable_debugger2()?), None),
            EnableTelemetry => (Tag::EnableTelemetry(self.read_enable_telemetry()?), None),

            // Bytecode and imports are carried through untouched
            DoAction | DoInitAction | ImportAssets | ImportAssets2 => {
                let data = self.reader.read_to_boundary()?;
                (Tag::Raw(RawTag::new(header.code, data)), None)
            }
        };
        Ok(Some(body))
    }

    // ---------------------------------------------------------------
    // Storage
    // ---------------------------------------------------------------

    /// Store a decoded tag, register its ID and attach it to its owner.
    fn store(&mut self, tag: Tag, id: Option<u16>) -> TagHandle {
        let handle = self.tags.push(tag);
        if let Some(id) = id {
            if let Some(previous) = self.dictionary.insert(id, handle) {
                debug!(id, %previous, %handle, "character ID redefined");
            }
        }
        self.link_companion(handle);
        handle
    }

    /// Point a font or text tag at the companion tag that follows it.
    fn link_companion(&mut self, handle: TagHandle) {
        let (target, companion) = match self.tags.get(handle) {
            Some(Tag::DefineFontName(t)) => (t.font.handle(), Companion::License),
            Some(Tag::DefineFontAlignZones(t)) => (t.font.handle(), Companion::Zones),
            Some(Tag::CsmTextSettings(t)) => (t.text.handle(), Companion::CsmSettings),
            _ => return,
        };
        let Some(target) = target else {
            return;
        };
        match (self.tags.get_mut(target), companion) {
            (Some(Tag::DefineFont(font)), Companion::License) => font.license = Some(handle),
            (Some(Tag::DefineFont2(font)), Companion::License) => font.license = Some(handle),
            (Some(Tag::DefineFont4(font)), Companion::License) => font.license = Some(handle),
            (Some(Tag::DefineFont2(font)), Companion::Zones) => font.zones = Some(handle),
            (Some(Tag::DefineText(text)), Companion::CsmSettings) => {
                text.csm_settings = Some(handle)
            }
            (Some(Tag::DefineEditText(text)), Companion::CsmSettings) => {
                text.csm_settings = Some(handle)
            }
            _ => {}
        }
    }

    // ---------------------------------------------------------------
    // Helpers shared by the body decoders
    // ---------------------------------------------------------------

    /// Resolve a character ID against the tags decoded so far.
    pub(super) fn lookup(&self, id: u16) -> Result<CharacterRef> {
        self.dictionary.resolve(id)
    }

    /// Read a UI16 character ID and resolve it.
    pub(super) fn read_character_ref(&mut self) -> Result<CharacterRef> {
        let id = self.reader.read_u16()?;
        self.lookup(id)
    }

    /// The tag a reference points at, if it was decoded.
    pub(super) fn referenced_tag(&self, character: CharacterRef) -> Option<&Tag> {
        character.handle().and_then(|h| self.tags.get(h))
    }

    /// Record a problem tied to the tag being decoded.
    pub(super) fn tag_problem(
        &mut self,
        notification_type: NotificationType,
        message: String,
        header: &TagHeader,
    ) {
        self.report(notification_type, message, header.offset, Some(header.code));
    }

    fn report(
        &mut self,
        notification_type: NotificationType,
        message: String,
        offset: u64,
        tag_code: Option<u16>,
    ) {
        warn!(offset, ?tag_code, "{}", message);
        self.notifications
            .notify_at(notification_type, message, offset, tag_code);
    }
}

#[derive(Debug, Clone, Copy)]
enum Companion {
    License,
    Zones,
    CsmSettings,
}

fn character<T>(decoded: (u16, T), wrap: impl FnOnce(T) -> Tag) -> DecodedBody {
    let (id, tag) = decoded;
    (wrap(tag), Some(id))
}
