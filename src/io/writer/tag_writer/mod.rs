//! Tag encoder
//!
//! Turns the tags of a [`SwfDocument`] back into tag records. Character
//! IDs are not stored in the document; a pre-pass over the frames hands
//! out fresh IDs in write order, and every [`CharacterRef`] is translated
//! through that table while encoding.
//!
//! Each tag body is encoded into its own buffer so the header can carry
//! the final length. Nested bodies (sprite children, glyph tables, morph
//! start edges) use the same buffer swap.

pub mod common;
pub mod write_shapes;
pub mod write_tags;
pub mod write_text;

use std::mem;

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use crate::document::{Frame, SwfDocument};
use crate::error::{Result, SwfError};
use crate::io::reader::tag_reader::LONG_HEADER_LENGTH;
use crate::io::BitWriter;
use crate::tags::{SymbolClass, Tag, TagTable, TagType};
use crate::types::{CharacterRef, TagHandle, INVALID_CHARACTER_ID};

/// Largest code that fits the 10-bit header field
const MAX_TAG_CODE: u16 = 0x3FF;

/// Raw action tags that AS3 documents must not carry
const DO_ACTION: u16 = TagType::DoAction.code();
const DO_INIT_ACTION: u16 = TagType::DoInitAction.code();

/// Encoder for the tags of one document
pub struct TagWriter<'a> {
    document: &'a SwfDocument,
    tags: &'a TagTable,
    ids: AHashMap<TagHandle, u16>,
    /// Characters and companions already written
    written: AHashSet<TagHandle>,
    body: BitWriter,
    version: u8,
    as3: bool,
}

impl<'a> TagWriter<'a> {
    /// Create an encoder and assign character IDs for `document`.
    pub fn new(document: &'a SwfDocument) -> Result<Self> {
        let ids = assign_character_ids(document.tags(), document.frames())?;
        debug!(characters = ids.len(), "assigned character IDs");
        Ok(TagWriter {
            document,
            tags: document.tags(),
            ids,
            written: AHashSet::new(),
            body: BitWriter::new(),
            version: document.version,
            as3: document.is_as3(),
        })
    }

    /// The ID assigned to a character tag, if it is reachable from a frame.
    pub fn character_id_of(&self, handle: TagHandle) -> Option<u16> {
        self.ids.get(&handle).copied()
    }

    // ---------------------------------------------------------------
    // Tag stream
    // ---------------------------------------------------------------

    /// Encode the whole tag stream: document control tags, every frame and
    /// the closing End tag.
    pub fn write_tag_stream(mut self) -> Result<Vec<u8>> {
        let document = self.document;
        let mut out = BitWriter::new();

        let control_tags = [
            document.file_attributes.map(Tag::FileAttributes),
            document.metadata.clone().map(Tag::Metadata),
            document.background_color.map(Tag::SetBackgroundColor),
            document.enable_debugger2.clone().map(Tag::EnableDebugger2),
            document.enable_telemetry.clone().map(Tag::EnableTelemetry),
            document.product_info.map(Tag::ProductInfo),
            document.script_limits.map(Tag::ScriptLimits),
        ];
        for tag in control_tags.iter().flatten() {
            self.write_unstored(tag, &mut out)?;
        }

        for (index, frame) in document.frames().iter().enumerate() {
            self.write_frame(index, frame, &mut out)?;
        }

        self.write_unstored(&Tag::End, &mut out)?;
        Ok(out.into_bytes())
    }

    fn write_frame(&mut self, index: usize, frame: &Frame, out: &mut BitWriter) -> Result<()> {
        if let Some(label) = &frame.label {
            self.write_unstored(&Tag::FrameLabel(label.clone()), out)?;
        }

        for &handle in &frame.tags {
            // Frame boundaries come from the frame list itself
            if matches!(self.tags.get(handle), Some(Tag::ShowFrame)) {
                continue;
            }
            self.write_handle(handle, out)?;
        }

        let root_class = if index == 0 {
            self.document.top_level_class.clone()
        } else {
            None
        };
        if !frame.symbols.is_empty() || root_class.is_some() {
            let symbols = SymbolClass {
                symbols: frame.symbols.clone(),
                root_class,
            };
            self.write_unstored(&Tag::SymbolClass(symbols), out)?;
        }

        self.write_unstored(&Tag::ShowFrame, out)
    }

    /// Write a stored tag followed by its companion tags.
    ///
    /// Characters and companions are written once; later occurrences of
    /// the same handle are skipped.
    fn write_handle(&mut self, handle: TagHandle, out: &mut BitWriter) -> Result<()> {
        let tags = self.tags;
        let tag = tags
            .get(handle)
            .ok_or_else(|| SwfError::Malformed(format!("tag handle {} is not stored", handle)))?;

        match tag {
            Tag::End => return Ok(()),
            Tag::Raw(raw) if self.as3 && (raw.code == DO_ACTION || raw.code == DO_INIT_ACTION) => {
                debug!(code = raw.code, "skipping action tag in AS3 document");
                return Ok(());
            }
            _ => {}
        }
        if is_write_once(tag) && !self.written.insert(handle) {
            return Ok(());
        }

        let bytes = self.encode_tag(tag, Some(handle))?;
        out.write_bytes(&bytes)?;

        for companion in companions(tag) {
            self.write_handle(companion, out)?;
        }
        Ok(())
    }

    /// Write a tag that is not part of the tag table.
    fn write_unstored(&mut self, tag: &Tag, out: &mut BitWriter) -> Result<()> {
        let bytes = self.encode_tag(tag, None)?;
        out.write_bytes(&bytes)
    }

    /// Encode one tag record, header included.
    pub fn encode_tag(&mut self, tag: &Tag, handle: Option<TagHandle>) -> Result<Vec<u8>> {
        let id = if tag.is_character() {
            let handle = handle.ok_or_else(|| {
                SwfError::Malformed("character tag written outside the tag table".to_string())
            })?;
            self.own_id(handle)?
        } else {
            0
        };

        let body = self.nested(|writer| writer.write_tag_body(tag, id))?;
        let code = tag.code();
        let always_long = tag.tag_type().map_or(false, |t| t.is_always_long());
        debug!(code, length = body.len(), "encoded tag");

        let mut record = BitWriter::new();
        write_tag_header(&mut record, code, body.len(), always_long)?;
        record.write_bytes(&body)?;
        Ok(record.into_bytes())
    }

    /// Run `write` against an empty body buffer and return what it wrote.
    ///
    /// The enclosing body is restored whether or not `write` succeeds.
    pub(super) fn nested<F>(&mut self, write: F) -> Result<Vec<u8>>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let outer = mem::take(&mut self.body);
        let result = write(self);
        let inner = mem::replace(&mut self.body, outer);
        result?;
        Ok(inner.into_bytes())
    }

    fn write_tag_body(&mut self, tag: &Tag, id: u16) -> Result<()> {
        match tag {
            Tag::End | Tag::ShowFrame => Ok(()),
            Tag::DefineShape(t) => self.write_define_shape(id, t),
            Tag::DefineMorphShape(t) => self.write_define_morph_shape(id, t),
            Tag::PlaceObject(t) => self.write_place_object(t),
            Tag::PlaceObject2(t) => self.write_place_object2(t),
            Tag::RemoveObject(t) => self.write_remove_object(t),
            Tag::RemoveObject2(t) => self.body.write_u16(t.depth),
            Tag::DefineBits(t) => {
                self.body.write_u16(id)?;
                self.body.write_bytes(&t.jpeg_data)
            }
            Tag::JpegTables(t) => self.body.write_bytes(&t.jpeg_data),
            Tag::DefineBitsJpeg2(t) => {
                self.body.write_u16(id)?;
                self.body.write_bytes(&t.image_data)
            }
            Tag::DefineBitsJpeg3(t) => self.write_define_bits_jpeg3(id, t),
            Tag::DefineBitsLossless(t) => self.write_define_bits_lossless(id, t),
            Tag::DefineButton(t) => self.write_define_button(id, t),
            Tag::DefineButton2(t) => self.write_define_button2(id, t),
            Tag::DefineButtonSound(t) => self.write_define_button_sound(t),
            Tag::DefineFont(t) => self.write_define_font(id, t),
            Tag::DefineFont2(t) => self.write_define_font2(id, t),
            Tag::DefineFont4(t) => self.write_define_font4(id, t),
            Tag::DefineFontInfo(t) => self.write_define_font_info(t),
            Tag::DefineFontAlignZones(t) => self.write_define_font_align_zones(t),
            Tag::DefineFontName(t) => self.write_define_font_name(t),
            Tag::CsmTextSettings(t) => self.write_csm_text_settings(t),
            Tag::DefineText(t) => self.write_define_text(id, t),
            Tag::DefineEditText(t) => self.write_define_edit_text(id, t),
            Tag::DefineSound(t) => self.write_define_sound(id, t),
            Tag::StartSound(t) => self.write_start_sound(t),
            Tag::StartSound2(t) => self.write_start_sound2(t),
            Tag::SoundStreamHead(t) => self.write_sound_stream_head(t),
            Tag::SoundStreamBlock(t) => self.body.write_bytes(&t.data),
            Tag::DefineVideoStream(t) => self.write_define_video_stream(id, t),
            Tag::VideoFrame(t) => self.write_video_frame(t),
            Tag::DefineBinaryData(t) => {
                self.body.write_u16(id)?;
                self.body.write_u32(0)?; // reserved
                self.body.write_bytes(&t.data)
            }
            Tag::DefineSprite(t) => self.write_define_sprite(id, t),
            Tag::DefineScalingGrid(t) => self.write_define_scaling_grid(t),
            Tag::FrameLabel(t) => self.write_frame_label(t),
            Tag::SetTabIndex(t) => {
                self.body.write_u16(t.depth)?;
                self.body.write_u16(t.tab_index)
            }
            Tag::SetBackgroundColor(color) => common::write_rgb(&mut self.body, color),
            Tag::FileAttributes(attributes) => {
                self.body.write_u8(attributes.bits())?;
                self.body.write_u24(0) // reserved
            }
            Tag::Metadata(xml) => self.body.write_string(xml),
            Tag::SymbolClass(t) => self.write_symbol_class(t),
            Tag::ExportAssets(t) => self.write_export_assets(t),
            Tag::DoAbc(t) => {
                self.body.write_u32(t.flags)?;
                self.body.write_string(&t.name)?;
                self.body.write_bytes(&t.abc_data)
            }
            Tag::DefineSceneAndFrameLabelData(t) => self.write_scene_and_frame_label_data(t),
            Tag::ScriptLimits(t) => {
                self.body.write_u16(t.max_recursion_depth)?;
                self.body.write_u16(t.script_timeout_seconds)
            }
            Tag::ProductInfo(t) => self.write_product_info(t),
            Tag::EnableDebugger2(t) => {
                self.body.write_u16(0)?; // reserved
                self.body.write_string(&t.password)
            }
            Tag::EnableTelemetry(t) => {
                self.body.write_u16(0)?; // reserved
                match &t.password {
                    Some(password) => self.body.write_string(password),
                    None => Ok(()),
                }
            }
            Tag::Raw(raw) => self.body.write_bytes(&raw.data),
        }
    }

    // ---------------------------------------------------------------
    // Character IDs
    // ---------------------------------------------------------------

    fn own_id(&self, handle: TagHandle) -> Result<u16> {
        self.character_id_of(handle)
            .ok_or(SwfError::UnassignedCharacter(handle))
    }

    /// The on-disk ID of a reference; the placeholder maps to 65535.
    pub(super) fn character_id(&self, character: CharacterRef) -> Result<u16> {
        match character {
            CharacterRef::Tag(handle) => self.own_id(handle),
            CharacterRef::Invalid => Ok(INVALID_CHARACTER_ID),
        }
    }

    pub(super) fn write_character_ref(&mut self, character: CharacterRef) -> Result<()> {
        let id = self.character_id(character)?;
        self.body.write_u16(id)
    }
}

/// Write a tag header; long form for bodies of 63 bytes and more and for
/// the tags that always use it.
pub fn write_tag_header(
    out: &mut BitWriter,
    code: u16,
    length: usize,
    always_long: bool,
) -> Result<()> {
    if code > MAX_TAG_CODE {
        return Err(SwfError::Malformed(format!(
            "tag code {} does not fit the header",
            code
        )));
    }
    if length < LONG_HEADER_LENGTH as usize && !always_long {
        return out.write_u16((code << 6) | length as u16);
    }
    let length = i32::try_from(length)
        .map_err(|_| SwfError::Malformed(format!("tag body of {} bytes is too long", length)))?;
    out.write_u16((code << 6) | LONG_HEADER_LENGTH as u16)?;
    out.write_i32(length)
}

/// Hand out IDs from 1 upwards in write order; a sprite gets its ID
/// before its children.
pub fn assign_character_ids(
    tags: &TagTable,
    frames: &[Frame],
) -> Result<AHashMap<TagHandle, u16>> {
    let mut ids = AHashMap::new();
    let mut visited = AHashSet::new();
    for frame in frames {
        for &handle in &frame.tags {
            assign_ids_from(tags, handle, &mut ids, &mut visited)?;
        }
    }
    Ok(ids)
}

fn assign_ids_from(
    tags: &TagTable,
    handle: TagHandle,
    ids: &mut AHashMap<TagHandle, u16>,
    visited: &mut AHashSet<TagHandle>,
) -> Result<()> {
    if !visited.insert(handle) {
        return Ok(());
    }
    let Some(tag) = tags.get(handle) else {
        return Ok(());
    };

    if tag.is_character() {
        let next = ids.len() + 1;
        if next >= INVALID_CHARACTER_ID as usize {
            return Err(SwfError::Malformed(format!(
                "more than {} characters",
                INVALID_CHARACTER_ID - 1
            )));
        }
        ids.insert(handle, next as u16);
    }

    if let Tag::DefineSprite(sprite) = tag {
        for &child in &sprite.control_tags {
            assign_ids_from(tags, child, ids, visited)?;
        }
    }
    Ok(())
}

fn is_write_once(tag: &Tag) -> bool {
    tag.is_character()
        || matches!(
            tag,
            Tag::DefineFontName(_) | Tag::DefineFontAlignZones(_) | Tag::CsmTextSettings(_)
        )
}

/// Companion tags written right after their owner.
fn companions(tag: &Tag) -> Vec<TagHandle> {
    match tag {
        Tag::DefineFont(font) => font.license.into_iter().collect(),
        Tag::DefineFont2(font) => font.zones.into_iter().chain(font.license).collect(),
        Tag::DefineFont4(font) => font.license.into_iter().collect(),
        Tag::DefineText(text) => text.csm_settings.into_iter().collect(),
        Tag::DefineEditText(text) => text.csm_settings.into_iter().collect(),
        _ => Vec::new(),
    }
}
