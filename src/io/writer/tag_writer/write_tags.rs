//! Display list, media, button, sprite and control tag encoders

use crate::error::{Result, SwfError};
use crate::io::BitWriter;
use crate::tags::{
    DefineBitsJpeg3, DefineBitsLossless, DefineButton, DefineButton2, DefineButtonSound,
    DefineScalingGrid, DefineSound, DefineSprite, DefineVideoStream, ExportAssets, FrameLabel,
    PlaceObject, PlaceObject2, ProductInfo, RemoveObject, SceneAndFrameLabelData, SoundStreamHead,
    StartSound, StartSound2, SymbolClass, TagType, VideoFrame, BITMAP_FORMAT_COLORMAPPED,
};
use crate::types::{ButtonRecord, SoundFormat, SOUND_COMPRESSION_MP3};

use super::common::{
    write_cxform, write_cxform_alpha, write_filter_list, write_matrix, write_rect,
    write_sound_info,
};
use super::{write_tag_header, TagWriter};

/// Largest color table a colormapped bitmap can declare
const MAX_COLOR_TABLE_SIZE: u16 = 256;

impl<'a> TagWriter<'a> {
    // ---------------------------------------------------------------
    // Display list
    // ---------------------------------------------------------------

    pub(super) fn write_place_object(&mut self, place: &PlaceObject) -> Result<()> {
        self.write_character_ref(place.character)?;
        self.body.write_u16(place.depth)?;
        write_matrix(&mut self.body, &place.matrix)?;
        if let Some(transform) = &place.color_transform {
            write_cxform(&mut self.body, transform)?;
        }
        Ok(())
    }

    /// PlaceObject2 or PlaceObject3.
    pub(super) fn write_place_object2(&mut self, place: &PlaceObject2) -> Result<()> {
        let extended = place.tag_type() == TagType::PlaceObject3;
        if !extended
            && (place.class_name.is_some()
                || place.filters.is_some()
                || place.blend_mode.is_some()
                || place.bitmap_cache.is_some()
                || place.has_image)
        {
            return Err(SwfError::Malformed(
                "PlaceObject2 cannot carry PlaceObject3 fields".into(),
            ));
        }

        self.body.write_bit(place.clip_actions.is_some());
        self.body.write_bit(place.clip_depth.is_some());
        self.body.write_bit(place.name.is_some());
        self.body.write_bit(place.ratio.is_some());
        self.body.write_bit(place.color_transform.is_some());
        self.body.write_bit(place.matrix.is_some());
        self.body.write_bit(place.character.is_some());
        self.body.write_bit(place.is_move);
        if extended {
            self.body.write_ub(0, 3)?; // reserved
            self.body.write_bit(place.has_image);
            self.body.write_bit(place.class_name.is_some());
            self.body.write_bit(place.bitmap_cache.is_some());
            self.body.write_bit(place.blend_mode.is_some());
            self.body.write_bit(place.filters.is_some());
        }

        self.body.write_u16(place.depth)?;
        if let Some(class_name) = &place.class_name {
            self.body.write_string(class_name)?;
        }
        if let Some(character) = place.character {
            self.write_character_ref(character)?;
        }
        if let Some(matrix) = &place.matrix {
            write_matrix(&mut self.body, matrix)?;
        }
        if let Some(transform) = &place.color_transform {
            write_cxform_alpha(&mut self.body, transform)?;
        }
        if let Some(ratio) = place.ratio {
            self.body.write_u16(ratio)?;
        }
        if let Some(name) = &place.name {
            self.body.write_string(name)?;
        }
        if let Some(clip_depth) = place.clip_depth {
            self.body.write_u16(clip_depth)?;
        }
        if let Some(filters) = &place.filters {
            write_filter_list(&mut self.body, filters)?;
        }
        if let Some(blend_mode) = place.blend_mode {
            self.body.write_u8(blend_mode)?;
        }
        if let Some(cache) = place.bitmap_cache {
            self.body.write_u8(cache)?;
        }
        if let Some(actions) = &place.clip_actions {
            self.body.write_bytes(actions)?;
        }
        Ok(())
    }

    pub(super) fn write_remove_object(&mut self, remove: &RemoveObject) -> Result<()> {
        self.write_character_ref(remove.character)?;
        self.body.write_u16(remove.depth)
    }

    // ---------------------------------------------------------------
    // Bitmaps
    // ---------------------------------------------------------------

    pub(super) fn write_define_bits_jpeg3(&mut self, id: u16, bits: &DefineBitsJpeg3) -> Result<()> {
        let alpha_offset = u32::try_from(bits.image_data.len())
            .map_err(|_| SwfError::Malformed("JPEG image data is too large".into()))?;
        self.body.write_u16(id)?;
        self.body.write_u32(alpha_offset)?;
        self.body.write_bytes(&bits.image_data)?;
        self.body.write_bytes(&bits.alpha_data)
    }

    /// The color table size is stored as one less than the entry count.
    pub(super) fn write_define_bits_lossless(
        &mut self,
        id: u16,
        bits: &DefineBitsLossless,
    ) -> Result<()> {
        self.body.write_u16(id)?;
        self.body.write_u8(bits.format)?;
        self.body.write_u16(bits.width)?;
        self.body.write_u16(bits.height)?;
        if bits.format == BITMAP_FORMAT_COLORMAPPED {
            match bits.color_table_size {
                Some(size @ 1..=MAX_COLOR_TABLE_SIZE) => self.body.write_u8((size - 1) as u8)?,
                other => {
                    return Err(SwfError::Malformed(format!(
                        "colormapped {} needs a color table of 1 to 256 entries, got {:?}",
                        bits.tag_type(),
                        other
                    )))
                }
            }
        }
        self.body.write_bytes(&bits.zlib_data)
    }

    // ---------------------------------------------------------------
    // Buttons
    // ---------------------------------------------------------------

    pub(super) fn write_define_button(&mut self, id: u16, button: &DefineButton) -> Result<()> {
        self.body.write_u16(id)?;
        self.write_button_records(&button.characters, false)?;
        self.body.write_bytes(&button.actions)?;
        self.body.write_u8(0) // end of actions
    }

    /// The action offset counts from the offset field itself; zero means
    /// the button has no actions.
    pub(super) fn write_define_button2(&mut self, id: u16, button: &DefineButton2) -> Result<()> {
        let records = self.nested(|writer| writer.write_button_records(&button.characters, true))?;
        let action_offset = if button.actions.is_empty() {
            0
        } else {
            u16::try_from(2 + records.len())
                .map_err(|_| SwfError::Malformed("button records are too large".into()))?
        };

        self.body.write_u16(id)?;
        self.body.write_ub(0, 7)?; // reserved
        self.body.write_bit(button.track_as_menu);
        self.body.write_u16(action_offset)?;
        self.body.write_bytes(&records)?;
        self.body.write_bytes(&button.actions)
    }

    fn write_button_records(&mut self, records: &[ButtonRecord], extended: bool) -> Result<()> {
        for record in records {
            let flags = if extended {
                record.flag_byte()
            } else {
                record.states.bits()
            };
            if flags == 0 {
                return Err(SwfError::Malformed(
                    "button record is shown in no state".into(),
                ));
            }
            self.body.write_u8(flags)?;
            self.write_character_ref(record.character)?;
            self.body.write_u16(record.depth)?;
            write_matrix(&mut self.body, &record.matrix)?;

            if extended {
                write_cxform_alpha(&mut self.body, &record.color_transform)?;
                if let Some(filters) = &record.filters {
                    write_filter_list(&mut self.body, filters)?;
                }
                if let Some(blend_mode) = record.blend_mode {
                    self.body.write_u8(blend_mode)?;
                }
            }
        }
        self.body.write_u8(0) // end of records
    }

    pub(super) fn write_define_button_sound(&mut self, sound: &DefineButtonSound) -> Result<()> {
        self.write_character_ref(sound.button)?;
        for slot in &sound.sounds {
            match slot {
                Some(button_sound) => {
                    self.write_character_ref(button_sound.sound)?;
                    write_sound_info(&mut self.body, &button_sound.info)?;
                }
                None => self.body.write_u16(0)?,
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Sound and video
    // ---------------------------------------------------------------

    pub(super) fn write_define_sound(&mut self, id: u16, sound: &DefineSound) -> Result<()> {
        self.body.write_u16(id)?;
        self.write_sound_format(&sound.format)?;
        self.body.write_u32(sound.sample_count)?;
        self.body.write_bytes(&sound.data)
    }

    fn write_sound_format(&mut self, format: &SoundFormat) -> Result<()> {
        self.body.write_ub(format.compression as u32, 4)?;
        self.body.write_ub(format.rate as u32, 2)?;
        self.body.write_bit(format.is_16bit);
        self.body.write_bit(format.is_stereo);
        Ok(())
    }

    pub(super) fn write_start_sound(&mut self, start: &StartSound) -> Result<()> {
        self.write_character_ref(start.sound)?;
        write_sound_info(&mut self.body, &start.info)
    }

    pub(super) fn write_start_sound2(&mut self, start: &StartSound2) -> Result<()> {
        self.body.write_string(&start.class_name)?;
        write_sound_info(&mut self.body, &start.info)
    }

    /// SoundStreamHead or SoundStreamHead2; the latency field is only
    /// present for MP3 streams.
    pub(super) fn write_sound_stream_head(&mut self, head: &SoundStreamHead) -> Result<()> {
        self.body.write_ub(0, 4)?; // reserved
        self.body.write_ub(head.playback.rate as u32, 2)?;
        self.body.write_bit(head.playback.is_16bit);
        self.body.write_bit(head.playback.is_stereo);
        self.write_sound_format(&head.stream)?;
        self.body.write_u16(head.sample_count)?;
        if head.stream.compression == SOUND_COMPRESSION_MP3 {
            self.body.write_i16(head.latency_seek)?;
        }
        Ok(())
    }

    pub(super) fn write_define_video_stream(
        &mut self,
        id: u16,
        video: &DefineVideoStream,
    ) -> Result<()> {
        self.body.write_u16(id)?;
        self.body.write_u16(video.num_frames)?;
        self.body.write_u16(video.width)?;
        self.body.write_u16(video.height)?;
        self.body.write_ub(0, 4)?; // reserved
        self.body.write_ub(video.deblocking as u32, 3)?;
        self.body.write_bit(video.smoothing);
        self.body.write_u8(video.codec_id)
    }

    pub(super) fn write_video_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        self.write_character_ref(frame.stream)?;
        self.body.write_u16(frame.frame_num)?;
        self.body.write_bytes(&frame.data)
    }

    // ---------------------------------------------------------------
    // Sprites
    // ---------------------------------------------------------------

    /// DefineSprite: the child tags as complete records, then End.
    ///
    /// Children go through the same path as frame tags, so their own
    /// companions and the write-once rule apply inside the sprite too.
    pub(super) fn write_define_sprite(&mut self, id: u16, sprite: &DefineSprite) -> Result<()> {
        let mut children = BitWriter::new();
        for &child in &sprite.control_tags {
            self.write_handle(child, &mut children)?;
        }
        write_tag_header(&mut children, TagType::End.code(), 0, false)?;

        self.body.write_u16(id)?;
        self.body.write_u16(sprite.frame_count)?;
        self.body.write_bytes(&children.into_bytes())
    }

    pub(super) fn write_define_scaling_grid(&mut self, grid: &DefineScalingGrid) -> Result<()> {
        self.write_character_ref(grid.character)?;
        write_rect(&mut self.body, &grid.splitter)
    }

    // ---------------------------------------------------------------
    // Control tags
    // ---------------------------------------------------------------

    pub(super) fn write_frame_label(&mut self, label: &FrameLabel) -> Result<()> {
        self.body.write_string(&label.name)?;
        if label.named_anchor {
            self.body.write_u8(1)?;
        }
        Ok(())
    }

    /// Symbols first, then the main timeline class under ID 0.
    pub(super) fn write_symbol_class(&mut self, symbol_class: &SymbolClass) -> Result<()> {
        let count = symbol_class.symbols.len() + usize::from(symbol_class.root_class.is_some());
        let count = u16::try_from(count)
            .map_err(|_| SwfError::Malformed(format!("{} symbols exceed 65535", count)))?;
        self.body.write_u16(count)?;
        for (character, name) in &symbol_class.symbols {
            self.write_character_ref(*character)?;
            self.body.write_string(name)?;
        }
        if let Some(root) = &symbol_class.root_class {
            self.body.write_u16(0)?;
            self.body.write_string(root)?;
        }
        Ok(())
    }

    pub(super) fn write_export_assets(&mut self, export: &ExportAssets) -> Result<()> {
        let count = u16::try_from(export.assets.len())
            .map_err(|_| SwfError::Malformed("too many exported assets".into()))?;
        self.body.write_u16(count)?;
        for (character, name) in &export.assets {
            self.write_character_ref(*character)?;
            self.body.write_string(name)?;
        }
        Ok(())
    }

    pub(super) fn write_scene_and_frame_label_data(
        &mut self,
        data: &SceneAndFrameLabelData,
    ) -> Result<()> {
        self.body.write_encoded_u32(data.scenes.len() as u32)?;
        for (offset, name) in &data.scenes {
            self.body.write_encoded_u32(*offset)?;
            self.body.write_string(name)?;
        }
        self.body.write_encoded_u32(data.frame_labels.len() as u32)?;
        for (frame, label) in &data.frame_labels {
            self.body.write_encoded_u32(*frame)?;
            self.body.write_string(label)?;
        }
        Ok(())
    }

    pub(super) fn write_product_info(&mut self, info: &ProductInfo) -> Result<()> {
        self.body.write_u32(info.product)?;
        self.body.write_u32(info.edition)?;
        self.body.write_u8(info.major_version)?;
        self.body.write_u8(info.minor_version)?;
        self.body.write_u64(info.build)?;
        self.body.write_u64(info.compile_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Frame, SwfDocument};
    use crate::io::reader::tag_reader::TagReader;
    use crate::io::BitReader;
    use crate::tags::Tag;
    use crate::types::{ButtonSound, ButtonStates, CharacterRef, Matrix, SoundInfo};

    fn make_writer(doc: &SwfDocument) -> TagWriter<'_> {
        TagWriter::new(doc).unwrap()
    }

    fn make_reader(data: Vec<u8>) -> TagReader {
        TagReader::new(BitReader::new(data), 10)
    }

    #[test]
    fn test_place_object3_round_trip() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let place = PlaceObject2 {
            version: 3,
            is_move: true,
            depth: 12,
            class_name: Some("Hero".into()),
            character: Some(CharacterRef::Invalid),
            matrix: Some(Matrix::translation(200, -40)),
            ratio: Some(3),
            name: Some("hero".into()),
            filters: Some(Vec::new()),
            blend_mode: Some(2),
            bitmap_cache: Some(1),
            clip_actions: Some(vec![0xAA, 0xBB]),
            ..Default::default()
        };

        let bytes = writer.nested(|w| w.write_place_object2(&place)).unwrap();
        assert_eq!(bytes[0], 0b1011_0111);
        assert_eq!(bytes[1], 0b0000_1111);
        let decoded = make_reader(bytes)
            .read_place_object2(TagType::PlaceObject3)
            .unwrap();
        assert_eq!(decoded, place);
    }

    #[test]
    fn test_place_object2_rejects_extended_fields() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let mut place = PlaceObject2::new(1);
        place.blend_mode = Some(1);
        assert!(matches!(
            writer.nested(|w| w.write_place_object2(&place)),
            Err(SwfError::Malformed(_))
        ));
    }

    #[test]
    fn test_colormapped_table_size() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let bits = DefineBitsLossless {
            version: 2,
            format: BITMAP_FORMAT_COLORMAPPED,
            width: 4,
            height: 2,
            color_table_size: Some(256),
            zlib_data: vec![0x78, 0x9C],
        };

        let bytes = writer
            .nested(|w| w.write_define_bits_lossless(5, &bits))
            .unwrap();
        assert_eq!(bytes[7], 0xFF);
        let (id, decoded) = make_reader(bytes)
            .read_define_bits_lossless(TagType::DefineBitsLossless2)
            .unwrap();
        assert_eq!(id, 5);
        assert_eq!(decoded, bits);

        let missing = DefineBitsLossless {
            color_table_size: None,
            ..bits
        };
        assert!(writer
            .nested(|w| w.write_define_bits_lossless(5, &missing))
            .is_err());
    }

    #[test]
    fn test_button2_action_offset() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let button = DefineButton2 {
            track_as_menu: true,
            characters: vec![ButtonRecord::new(
                ButtonStates::UP | ButtonStates::OVER,
                CharacterRef::Invalid,
                1,
            )],
            actions: vec![0x00, 0x00, 0x07, 0x00],
        };

        let bytes = writer.nested(|w| w.write_define_button2(3, &button)).unwrap();
        let offset = bytes[3] as usize | (bytes[4] as usize) << 8;
        assert_eq!(&bytes[3 + offset..], &button.actions[..]);
        let (_, decoded) = make_reader(bytes).read_define_button2().unwrap();
        assert_eq!(decoded, button);

        let silent = DefineButton2 {
            actions: Vec::new(),
            ..button
        };
        let bytes = writer.nested(|w| w.write_define_button2(3, &silent)).unwrap();
        assert_eq!(&bytes[3..5], &[0, 0]);
    }

    #[test]
    fn test_button_actions_end_marker() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let button = DefineButton {
            characters: vec![ButtonRecord::new(ButtonStates::HIT_TEST, CharacterRef::Invalid, 2)],
            actions: vec![0x07],
        };
        let bytes = writer.nested(|w| w.write_define_button(1, &button)).unwrap();
        assert_eq!(&bytes[bytes.len() - 2..], &[0x07, 0x00]);
        let (_, decoded) = make_reader(bytes).read_define_button().unwrap();
        assert_eq!(decoded, button);
    }

    #[test]
    fn test_button_sound_empty_slots() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let sound = DefineButtonSound {
            button: CharacterRef::Invalid,
            sounds: [
                None,
                Some(ButtonSound {
                    sound: CharacterRef::Invalid,
                    info: SoundInfo {
                        sync_stop: true,
                        ..Default::default()
                    },
                }),
                None,
                None,
            ],
        };
        let bytes = writer
            .nested(|w| w.write_define_button_sound(&sound))
            .unwrap();
        assert_eq!(&bytes[..4], &[0xFF, 0xFF, 0x00, 0x00]);
        assert_eq!(make_reader(bytes).read_define_button_sound().unwrap(), sound);
    }

    #[test]
    fn test_sound_stream_head_latency() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let mut head = SoundStreamHead {
            version: 2,
            playback: SoundFormat {
                compression: 0,
                rate: 3,
                is_16bit: true,
                is_stereo: true,
            },
            stream: SoundFormat {
                compression: SOUND_COMPRESSION_MP3,
                rate: 3,
                is_16bit: true,
                is_stereo: false,
            },
            sample_count: 1152,
            latency_seek: -7,
        };

        let bytes = writer.nested(|w| w.write_sound_stream_head(&head)).unwrap();
        assert_eq!(bytes.len(), 6);
        let decoded = make_reader(bytes)
            .read_sound_stream_head(TagType::SoundStreamHead2)
            .unwrap();
        assert_eq!(decoded, head);

        head.stream.compression = 0;
        head.latency_seek = 0;
        let bytes = writer.nested(|w| w.write_sound_stream_head(&head)).unwrap();
        assert_eq!(bytes.len(), 4);
    }

    #[test]
    fn test_video_stream_round_trip() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let video = DefineVideoStream {
            num_frames: 30,
            width: 320,
            height: 240,
            deblocking: 2,
            smoothing: true,
            codec_id: 4,
        };
        let bytes = writer
            .nested(|w| w.write_define_video_stream(7, &video))
            .unwrap();
        assert_eq!(bytes[8], 0b0000_0101);
        assert_eq!(make_reader(bytes).read_define_video_stream().unwrap(), (7, video));
    }

    #[test]
    fn test_sprite_body() {
        let mut doc = SwfDocument::default();
        let place = doc.add_tag(Tag::PlaceObject2(PlaceObject2::new(1)));
        let show = doc.add_tag(Tag::ShowFrame);
        let sprite = doc.add_tag(Tag::DefineSprite(DefineSprite {
            frame_count: 1,
            control_tags: vec![place, show],
        }));
        let frame = doc.add_frame(Frame::new());
        doc.frames[frame].add(sprite);

        let mut writer = make_writer(&doc);
        let tag = doc.tag(sprite).unwrap();
        let bytes = writer.encode_tag(tag, Some(sprite)).unwrap();
        assert_eq!(
            bytes,
            vec![
                0xCD, 0x09, // DefineSprite, 13 bytes
                0x01, 0x00, 0x01, 0x00, // id 1, one frame
                0x83, 0x06, 0x00, 0x01, 0x00, // PlaceObject2 at depth 1
                0x40, 0x00, // ShowFrame
                0x00, 0x00, // End
            ]
        );
    }

    #[test]
    fn test_frame_label_anchor() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let label = FrameLabel {
            name: "a".into(),
            named_anchor: true,
        };
        let bytes = writer.nested(|w| w.write_frame_label(&label)).unwrap();
        assert_eq!(bytes, vec![b'a', 0, 1]);
        assert_eq!(make_reader(bytes).read_frame_label().unwrap(), label);
    }

    #[test]
    fn test_symbol_class_root_last() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let symbols = SymbolClass {
            symbols: vec![(CharacterRef::Invalid, "Asset".into())],
            root_class: Some("Main".into()),
        };
        let bytes = writer.nested(|w| w.write_symbol_class(&symbols)).unwrap();
        assert_eq!(&bytes[..4], &[2, 0, 0xFF, 0xFF]);
        assert_eq!(&bytes[10..12], &[0, 0]);
        assert_eq!(make_reader(bytes).read_symbol_class().unwrap(), symbols);
    }

    #[test]
    fn test_scene_data_round_trip() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let data = SceneAndFrameLabelData {
            scenes: vec![(0, "Scene 1".into()), (300, "Credits".into())],
            frame_labels: vec![(128, "loop".into())],
        };
        let bytes = writer
            .nested(|w| w.write_scene_and_frame_label_data(&data))
            .unwrap();
        assert_eq!(
            make_reader(bytes).read_scene_and_frame_label_data().unwrap(),
            data
        );
    }

    #[test]
    fn test_product_info_round_trip() {
        let doc = SwfDocument::default();
        let mut writer = make_writer(&doc);
        let info = ProductInfo {
            product: 3,
            edition: 6,
            major_version: 4,
            minor_version: 6,
            build: 12345,
            compile_date: 1_234_567_890_000,
        };
        let bytes = writer.nested(|w| w.write_product_info(&info)).unwrap();
        assert_eq!(bytes.len(), 26);
        assert_eq!(make_reader(bytes).read_product_info().unwrap(), info);
    }
}
