//! Display list, media, button, sprite and control tag decoders

use crate::error::Result;
use crate::tags::{
    DefineBinaryData, DefineBits, DefineBitsJpeg2, DefineBitsJpeg3, DefineBitsLossless,
    DefineButton, DefineButton2, DefineButtonSound, DefineScalingGrid, DefineSound, DefineSprite,
    DefineVideoStream, DoAbc, EnableDebugger2, EnableTelemetry, ExportAssets, FileAttributes,
    FrameLabel, JpegTables, PlaceObject, PlaceObject2, ProductInfo, RemoveObject, RemoveObject2,
    SceneAndFrameLabelData, ScriptLimits, SetTabIndex, SoundStreamBlock, SoundStreamHead,
    StartSound, StartSound2, SymbolClass, TagType, VideoFrame, BITMAP_FORMAT_COLORMAPPED,
};
use crate::types::button::{BUTTON_HAS_BLEND_MODE, BUTTON_HAS_FILTER_LIST};
use crate::types::{
    ButtonRecord, ButtonSound, ButtonStates, SoundFormat, SOUND_COMPRESSION_MP3,
};

use super::common::{
    read_cxform, read_cxform_alpha, read_filter_list, read_matrix, read_rect, read_sound_info,
};
use super::TagReader;

impl TagReader {
    // ---------------------------------------------------------------
    // Display list
    // ---------------------------------------------------------------

    pub(crate) fn read_place_object(&mut self) -> Result<PlaceObject> {
        let character = self.read_character_ref()?;
        let depth = self.reader.read_u16()?;
        let matrix = read_matrix(&mut self.reader)?;
        let color_transform = if self.reader.available() > 0 {
            Some(read_cxform(&mut self.reader)?)
        } else {
            None
        };
        Ok(PlaceObject {
            character,
            depth,
            matrix,
            color_transform,
        })
    }

    /// PlaceObject2 or PlaceObject3.
    pub(crate) fn read_place_object2(&mut self, tag_type: TagType) -> Result<PlaceObject2> {
        let has_clip_actions = self.reader.read_bit()?;
        let has_clip_depth = self.reader.read_bit()?;
        let has_name = self.reader.read_bit()?;
        let has_ratio = self.reader.read_bit()?;
        let has_color_transform = self.reader.read_bit()?;
        let has_matrix = self.reader.read_bit()?;
        let has_character = self.reader.read_bit()?;
        let is_move = self.reader.read_bit()?;

        let mut place = PlaceObject2 {
            version: 2,
            is_move,
            ..Default::default()
        };

        let (mut has_class_name, mut has_cache, mut has_blend, mut has_filters) =
            (false, false, false, false);
        if tag_type == TagType::PlaceObject3 {
            place.version = 3;
            self.reader.read_ub(3)?; // reserved
            place.has_image = self.reader.read_bit()?;
            has_class_name = self.reader.read_bit()?;
            has_cache = self.reader.read_bit()?;
            has_blend = self.reader.read_bit()?;
            has_filters = self.reader.read_bit()?;
        }

        place.depth = self.reader.read_u16()?;
        if has_class_name {
            place.class_name = Some(self.reader.read_string()?);
        }
        if has_character {
            place.character = Some(self.read_character_ref()?);
        }
        if has_matrix {
            place.matrix = Some(read_matrix(&mut self.reader)?);
        }
        if has_color_transform {
            place.color_transform = Some(read_cxform_alpha(&mut self.reader)?);
        }
        if has_ratio {
            place.ratio = Some(self.reader.read_u16()?);
        }
        if has_name {
            place.name = Some(self.reader.read_string()?);
        }
        if has_clip_depth {
            place.clip_depth = Some(self.reader.read_u16()?);
        }
        if has_filters {
            place.filters = Some(read_filter_list(&mut self.reader)?);
        }
        if has_blend {
            place.blend_mode = Some(self.reader.read_u8()?);
        }
        if has_cache {
            place.bitmap_cache = Some(self.reader.read_u8()?);
        }
        if has_clip_actions {
            place.clip_actions = Some(self.reader.read_to_boundary()?);
        }
        Ok(place)
    }

    pub(crate) fn read_remove_object(&mut self) -> Result<RemoveObject> {
        Ok(RemoveObject {
            character: self.read_character_ref()?,
            depth: self.reader.read_u16()?,
        })
    }

    pub(crate) fn read_remove_object2(&mut self) -> Result<RemoveObject2> {
        Ok(RemoveObject2 {
            depth: self.reader.read_u16()?,
        })
    }

    // ---------------------------------------------------------------
    // Bitmaps
    // ---------------------------------------------------------------

    pub(crate) fn read_define_bits(&mut self) -> Result<(u16, DefineBits)> {
        let id = self.reader.read_u16()?;
        let jpeg_data = self.reader.read_to_boundary()?;
        Ok((id, DefineBits { jpeg_data }))
    }

    pub(crate) fn read_jpeg_tables(&mut self) -> Result<JpegTables> {
        Ok(JpegTables {
            jpeg_data: self.reader.read_to_boundary()?,
        })
    }

    pub(crate) fn read_define_bits_jpeg2(&mut self) -> Result<(u16, DefineBitsJpeg2)> {
        let id = self.reader.read_u16()?;
        let image_data = self.reader.read_to_boundary()?;
        Ok((id, DefineBitsJpeg2 { image_data }))
    }

    /// Image bytes up to the alpha offset, then the compressed alpha plane.
    pub(crate) fn read_define_bits_jpeg3(&mut self) -> Result<(u16, DefineBitsJpeg3)> {
        let id = self.reader.read_u16()?;
        let alpha_offset = self.reader.read_u32()? as usize;
        let image_data = self.reader.read_bytes(alpha_offset)?;
        let alpha_data = self.reader.read_to_boundary()?;
        Ok((
            id,
            DefineBitsJpeg3 {
                image_data,
                alpha_data,
            },
        ))
    }

    /// DefineBitsLossless or DefineBitsLossless2; pixels stay compressed.
    pub(crate) fn read_define_bits_lossless(
        &mut self,
        tag_type: TagType,
    ) -> Result<(u16, DefineBitsLossless)> {
        let id = self.reader.read_u16()?;
        let format = self.reader.read_u8()?;
        let width = self.reader.read_u16()?;
        let height = self.reader.read_u16()?;
        let color_table_size = if format == BITMAP_FORMAT_COLORMAPPED {
            Some(self.reader.read_u8()? as u16 + 1)
        } else {
            None
        };
        let zlib_data = self.reader.read_to_boundary()?;
        Ok((
            id,
            DefineBitsLossless {
                version: if tag_type == TagType::DefineBitsLossless2 { 2 } else { 1 },
                format,
                width,
                height,
                color_table_size,
                zlib_data,
            },
        ))
    }

    // ---------------------------------------------------------------
    // Buttons
    // ---------------------------------------------------------------

    pub(crate) fn read_define_button(&mut self) -> Result<(u16, DefineButton)> {
        let id = self.reader.read_u16()?;
        let characters = self.read_button_records(false)?;
        let mut actions = self.reader.read_to_boundary()?;
        // Drop the end-of-actions marker
        actions.pop();
        Ok((id, DefineButton { characters, actions }))
    }

    pub(crate) fn read_define_button2(&mut self) -> Result<(u16, DefineButton2)> {
        let id = self.reader.read_u16()?;
        self.reader.read_ub(7)?; // reserved
        let track_as_menu = self.reader.read_bit()?;
        // Action offset; recomputed on write
        self.reader.read_u16()?;
        let characters = self.read_button_records(true)?;
        let actions = self.reader.read_to_boundary()?;
        Ok((
            id,
            DefineButton2 {
                track_as_menu,
                characters,
                actions,
            },
        ))
    }

    /// Button records up to the zero end flag.
    fn read_button_records(&mut self, extended: bool) -> Result<Vec<ButtonRecord>> {
        let mut records = Vec::new();
        loop {
            let flags = self.reader.read_u8()?;
            if flags == 0 {
                break;
            }
            let states = ButtonStates::from_bits_truncate(flags);
            let character = self.read_character_ref()?;
            let depth = self.reader.read_u16()?;
            let mut record = ButtonRecord::new(states, character, depth);
            record.matrix = read_matrix(&mut self.reader)?;

            if extended {
                record.color_transform = read_cxform_alpha(&mut self.reader)?;
                if flags & BUTTON_HAS_FILTER_LIST != 0 {
                    record.filters = Some(read_filter_list(&mut self.reader)?);
                }
                if flags & BUTTON_HAS_BLEND_MODE != 0 {
                    record.blend_mode = Some(self.reader.read_u8()?);
                }
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Four transition sounds; ID 0 leaves a slot empty.
    pub(crate) fn read_define_button_sound(&mut self) -> Result<DefineButtonSound> {
        let button = self.read_character_ref()?;
        let mut sounds: [Option<ButtonSound>; 4] = Default::default();
        for slot in sounds.iter_mut() {
            let id = self.reader.read_u16()?;
            if id == 0 {
                continue;
            }
            let sound = self.lookup(id)?;
            let info = read_sound_info(&mut self.reader)?;
            *slot = Some(ButtonSound { sound, info });
        }
        Ok(DefineButtonSound { button, sounds })
    }

    // ---------------------------------------------------------------
    // Sound and video
    // ---------------------------------------------------------------

    pub(crate) fn read_define_sound(&mut self) -> Result<(u16, DefineSound)> {
        let id = self.reader.read_u16()?;
        let format = SoundFormat {
            compression: self.reader.read_ub(4)? as u8,
            rate: self.reader.read_ub(2)? as u8,
            is_16bit: self.reader.read_bit()?,
            is_stereo: self.reader.read_bit()?,
        };
        let sample_count = self.reader.read_u32()?;
        let data = self.reader.read_to_boundary()?;
        Ok((
            id,
            DefineSound {
                format,
                sample_count,
                data,
            },
        ))
    }

    pub(crate) fn read_start_sound(&mut self) -> Result<StartSound> {
        let sound = self.read_character_ref()?;
        let info = read_sound_info(&mut self.reader)?;
        Ok(StartSound { sound, info })
    }

    pub(crate) fn read_start_sound2(&mut self) -> Result<StartSound2> {
        let class_name = self.reader.read_string()?;
        let info = read_sound_info(&mut self.reader)?;
        Ok(StartSound2 { class_name, info })
    }

    pub(crate) fn read_sound_stream_head(&mut self, tag_type: TagType) -> Result<SoundStreamHead> {
        self.reader.read_ub(4)?; // reserved
        let playback = SoundFormat {
            compression: 0,
            rate: self.reader.read_ub(2)? as u8,
            is_16bit: self.reader.read_bit()?,
            is_stereo: self.reader.read_bit()?,
        };
        let stream = SoundFormat {
            compression: self.reader.read_ub(4)? as u8,
            rate: self.reader.read_ub(2)? as u8,
            is_16bit: self.reader.read_bit()?,
            is_stereo: self.reader.read_bit()?,
        };
        let sample_count = self.reader.read_u16()?;
        let latency_seek = if stream.compression == SOUND_COMPRESSION_MP3 {
            self.reader.read_i16()?
        } else {
            0
        };
        Ok(SoundStreamHead {
            version: if tag_type == TagType::SoundStreamHead2 { 2 } else { 1 },
            playback,
            stream,
            sample_count,
            latency_seek,
        })
    }

    pub(crate) fn read_sound_stream_block(&mut self) -> Result<SoundStreamBlock> {
        Ok(SoundStreamBlock {
            data: self.reader.read_to_boundary()?,
        })
    }

    pub(crate) fn read_define_video_stream(&mut self) -> Result<(u16, DefineVideoStream)> {
        let id = self.reader.read_u16()?;
        let num_frames = self.reader.read_u16()?;
        let width = self.reader.read_u16()?;
        let height = self.reader.read_u16()?;
        self.reader.read_ub(4)?; // reserved
        let deblocking = self.reader.read_ub(3)? as u8;
        let smoothing = self.reader.read_bit()?;
        let codec_id = self.reader.read_u8()?;
        Ok((
            id,
            DefineVideoStream {
                num_frames,
                width,
                height,
                deblocking,
                smoothing,
                codec_id,
            },
        ))
    }

    pub(crate) fn read_video_frame(&mut self) -> Result<VideoFrame> {
        Ok(VideoFrame {
            stream: self.read_character_ref()?,
            frame_num: self.reader.read_u16()?,
            data: self.reader.read_to_boundary()?,
        })
    }

    pub(crate) fn read_define_binary_data(&mut self) -> Result<(u16, DefineBinaryData)> {
        let id = self.reader.read_u16()?;
        self.reader.read_u32()?; // reserved
        let data = self.reader.read_to_boundary()?;
        Ok((id, DefineBinaryData { data }))
    }

    // ---------------------------------------------------------------
    // Sprites
    // ---------------------------------------------------------------

    /// DefineSprite: a nested tag list bounded by the sprite body.
    ///
    /// Children are stored and registered like top-level tags, so their
    /// characters are visible to everything that follows.
    pub(crate) fn read_define_sprite(&mut self) -> Result<(u16, DefineSprite)> {
        let id = self.reader.read_u16()?;
        let frame_count = self.reader.read_u16()?;

        let body_end = self.reader.boundary();
        let outer_end = self.list_end;
        self.list_end = body_end;
        let children = self.read_tag_list();
        self.list_end = outer_end;
        self.reader.set_boundary(body_end);

        Ok((
            id,
            DefineSprite {
                frame_count,
                control_tags: children?,
            },
        ))
    }

    pub(crate) fn read_define_scaling_grid(&mut self) -> Result<DefineScalingGrid> {
        Ok(DefineScalingGrid {
            character: self.read_character_ref()?,
            splitter: read_rect(&mut self.reader)?,
        })
    }

    // ---------------------------------------------------------------
    // Control tags
    // ---------------------------------------------------------------

    pub(crate) fn read_frame_label(&mut self) -> Result<FrameLabel> {
        let name = self.reader.read_string()?;
        let named_anchor = if self.reader.available() > 0 {
            self.reader.read_u8()? != 0
        } else {
            false
        };
        Ok(FrameLabel { name, named_anchor })
    }

    pub(crate) fn read_set_tab_index(&mut self) -> Result<SetTabIndex> {
        Ok(SetTabIndex {
            depth: self.reader.read_u16()?,
            tab_index: self.reader.read_u16()?,
        })
    }

    pub(crate) fn read_file_attributes(&mut self) -> Result<FileAttributes> {
        let flags = FileAttributes::from_bits_truncate(self.reader.read_u8()?);
        self.reader.read_u24()?; // reserved
        Ok(flags)
    }

    /// SymbolClass; ID 0 binds the main timeline class.
    pub(crate) fn read_symbol_class(&mut self) -> Result<SymbolClass> {
        let count = self.reader.read_u16()?;
        let mut symbol_class = SymbolClass::default();
        for _ in 0..count {
            let id = self.reader.read_u16()?;
            let name = self.reader.read_string()?;
            if id == 0 {
                symbol_class.root_class.get_or_insert(name);
            } else {
                let character = self.lookup(id)?;
                symbol_class.symbols.push((character, name));
            }
        }
        Ok(symbol_class)
    }

    pub(crate) fn read_export_assets(&mut self) -> Result<ExportAssets> {
        let count = self.reader.read_u16()?;
        let mut assets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let character = self.read_character_ref()?;
            let name = self.reader.read_string()?;
            assets.push((character, name));
        }
        Ok(ExportAssets { assets })
    }

    pub(crate) fn read_do_abc(&mut self) -> Result<DoAbc> {
        Ok(DoAbc {
            flags: self.reader.read_u32()?,
            name: self.reader.read_string()?,
            abc_data: self.reader.read_to_boundary()?,
        })
    }

    pub(crate) fn read_scene_and_frame_label_data(&mut self) -> Result<SceneAndFrameLabelData> {
        let mut data = SceneAndFrameLabelData::default();
        let scene_count = self.reader.read_encoded_u32()?;
        for _ in 0..scene_count {
            let offset = self.reader.read_encoded_u32()?;
            let name = self.reader.read_string()?;
            data.scenes.push((offset, name));
        }
        let label_count = self.reader.read_encoded_u32()?;
        for _ in 0..label_count {
            let frame = self.reader.read_encoded_u32()?;
            let label = self.reader.read_string()?;
            data.frame_labels.push((frame, label));
        }
        Ok(data)
    }

    pub(crate) fn read_script_limits(&mut self) -> Result<ScriptLimits> {
        Ok(ScriptLimits {
            max_recursion_depth: self.reader.read_u16()?,
            script_timeout_seconds: self.reader.read_u16()?,
        })
    }

    pub(crate) fn read_product_info(&mut self) -> Result<ProductInfo> {
        Ok(ProductInfo {
            product: self.reader.read_u32()?,
            edition: self.reader.read_u32()?,
            major_version: self.reader.read_u8()?,
            minor_version: self.reader.read_u8()?,
            build: self.reader.read_u64()?,
            compile_date: self.reader.read_u64()?,
        })
    }

    pub(crate) fn read_enable_debugger2(&mut self) -> Result<EnableDebugger2> {
        self.reader.read_u16()?; // reserved
        Ok(EnableDebugger2 {
            password: self.reader.read_string()?,
        })
    }

    pub(crate) fn read_enable_telemetry(&mut self) -> Result<EnableTelemetry> {
        self.reader.read_u16()?; // reserved
        let password = if self.reader.available() > 0 {
            Some(self.reader.read_string()?)
        } else {
            None
        };
        Ok(EnableTelemetry { password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BitReader;
    use crate::tags::Tag;
    use crate::types::CharacterRef;

    fn make_reader(data: &[u8]) -> TagReader {
        TagReader::new(BitReader::new(data.to_vec()), 10)
    }

    #[test]
    fn test_place_object2_depth_and_name() {
        // has name, depth 4, "a"
        let data = [0b0010_0000, 0x04, 0x00, b'a', 0];
        let mut reader = make_reader(&data);
        let place = reader.read_place_object2(TagType::PlaceObject2).unwrap();
        assert_eq!(place.version, 2);
        assert_eq!(place.depth, 4);
        assert_eq!(place.name.as_deref(), Some("a"));
        assert!(place.character.is_none());
        assert!(place.clip_actions.is_none());
    }

    #[test]
    fn test_place_object3_blend_mode() {
        // move, then has blend mode; depth 1, blend 3
        let data = [0b0000_0001, 0b0000_0010, 0x01, 0x00, 3];
        let mut reader = make_reader(&data);
        let place = reader.read_place_object2(TagType::PlaceObject3).unwrap();
        assert_eq!(place.version, 3);
        assert!(place.is_move);
        assert_eq!(place.blend_mode, Some(3));
    }

    #[test]
    fn test_lossless_color_table() {
        let data = [0x01, 0x00, 3, 0x02, 0x00, 0x02, 0x00, 0x0F, 0x78, 0x9C];
        let mut reader = make_reader(&data);
        let (id, bitmap) = reader
            .read_define_bits_lossless(TagType::DefineBitsLossless2)
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(bitmap.version, 2);
        assert_eq!(bitmap.color_table_size, Some(16));
        assert_eq!(bitmap.zlib_data, vec![0x78, 0x9C]);
    }

    #[test]
    fn test_jpeg3_split() {
        let data = [0x02, 0x00, 2, 0, 0, 0, 0xFF, 0xD8, 0x78, 0x01];
        let mut reader = make_reader(&data);
        let (_, bitmap) = reader.read_define_bits_jpeg3().unwrap();
        assert_eq!(bitmap.image_data, vec![0xFF, 0xD8]);
        assert_eq!(bitmap.alpha_data, vec![0x78, 0x01]);
    }

    #[test]
    fn test_define_button_drops_end_marker() {
        let data = [0x05, 0x00, 0x00, 0x07, 0x00];
        let mut reader = make_reader(&data);
        let (id, button) = reader.read_define_button().unwrap();
        assert_eq!(id, 5);
        assert!(button.characters.is_empty());
        assert_eq!(button.actions, vec![0x07]);
    }

    #[test]
    fn test_button_sound_empty_slots() {
        let data = [0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut reader = make_reader(&data);
        let sound = reader.read_define_button_sound().unwrap();
        assert_eq!(sound.button, CharacterRef::Invalid);
        assert!(sound.sounds.iter().all(Option::is_none));
    }

    #[test]
    fn test_mp3_stream_head_latency() {
        // playback 44 kHz 16-bit stereo, stream MP3 44 kHz 16-bit stereo
        let data = [0x0F, 0x2F, 0x40, 0x02, 0xFE, 0xFF];
        let mut reader = make_reader(&data);
        let head = reader
            .read_sound_stream_head(TagType::SoundStreamHead2)
            .unwrap();
        assert_eq!(head.version, 2);
        assert_eq!(head.playback.rate, 3);
        assert_eq!(head.stream.compression, SOUND_COMPRESSION_MP3);
        assert_eq!(head.sample_count, 576);
        assert_eq!(head.latency_seek, -2);
    }

    #[test]
    fn test_symbol_class_root() {
        let data = [0x01, 0x00, 0x00, 0x00, b'M', 0];
        let mut reader = make_reader(&data);
        let symbols = reader.read_symbol_class().unwrap();
        assert!(symbols.symbols.is_empty());
        assert_eq!(symbols.root_class.as_deref(), Some("M"));
    }

    #[test]
    fn test_frame_label_anchor() {
        let mut reader = make_reader(&[b'x', 0, 1]);
        let label = reader.read_frame_label().unwrap();
        assert_eq!(label.name, "x");
        assert!(label.named_anchor);
    }

    #[test]
    fn test_telemetry_without_password() {
        let mut reader = make_reader(&[0, 0]);
        assert_eq!(reader.read_enable_telemetry().unwrap().password, None);
    }

    #[test]
    fn test_sprite_children_share_dictionary() {
        let data = [
            // DefineSprite (39), length 12: id 3, one frame
            0xCC, 0x09, 0x03, 0x00, 0x01, 0x00,
            // RemoveObject2 depth 1, ShowFrame, End
            0x02, 0x07, 0x01, 0x00, 0x40, 0x00, 0x00, 0x00,
            // RemoveObject referring to the sprite, End
            0x44, 0x01, 0x03, 0x00, 0x02, 0x00, 0x00, 0x00,
        ];
        let mut reader = make_reader(&data);
        let handles = reader.read_tag_list().unwrap();
        let (tags, dictionary, notifications) = reader.into_parts();
        assert!(notifications.is_empty());
        assert_eq!(handles.len(), 2);

        let sprite = dictionary.get(3).unwrap();
        assert_eq!(handles[0], sprite);
        match tags.get(sprite) {
            Some(Tag::DefineSprite(s)) => {
                assert_eq!(s.frame_count, 1);
                assert_eq!(s.control_tags.len(), 2);
                assert_eq!(tags.get(s.control_tags[1]), Some(&Tag::ShowFrame));
            }
            other => panic!("unexpected tag {:?}", other),
        }
        match tags.get(handles[1]) {
            Some(Tag::RemoveObject(remove)) => {
                assert_eq!(remove.character, CharacterRef::Tag(sprite))
            }
            other => panic!("unexpected tag {:?}", other),
        }
    }
}
