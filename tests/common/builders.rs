//! Test document builders.
//!
//! The `create_all_tags_document()` function produces a document holding
//! at least one instance of every tag kind the library encodes, with
//! character references between them.

#![allow(dead_code)]

use swfkit::tags::*;
use swfkit::types::*;
use swfkit::{Frame, SwfDocument, Tag};

/// A closed square outline drawn with fill 1 and line 1.
pub fn square_outline(size: i32) -> Vec<ShapeRecord> {
    vec![
        ShapeRecord::StyleChange(StyleChangeRecord {
            move_to: Some((0, 0)),
            fill_style1: Some(1),
            line_style: Some(1),
            ..Default::default()
        }),
        ShapeRecord::StraightEdge(StraightEdge::Horizontal { dx: size }),
        ShapeRecord::StraightEdge(StraightEdge::Vertical { dy: size }),
        ShapeRecord::StraightEdge(StraightEdge::Horizontal { dx: -size }),
        ShapeRecord::StraightEdge(StraightEdge::Vertical { dy: -size }),
    ]
}

/// A solid red square with a black outline.
pub fn red_square(version: u8, size: i32) -> DefineShape {
    let shapes = ShapeWithStyle {
        fill_styles: vec![FillStyle::Solid(Color::rgb(255, 0, 0))],
        line_styles: vec![LineStyle::Plain {
            width: 20,
            color: Color::BLACK,
        }],
        records: square_outline(size),
    };
    DefineShape::new(version, Rect::from_size(size, size), shapes)
}

/// A triangle glyph outline.
pub fn triangle_glyph() -> Shape {
    Shape {
        records: vec![
            ShapeRecord::StyleChange(StyleChangeRecord {
                move_to: Some((0, 0)),
                fill_style0: Some(0),
                ..Default::default()
            }),
            ShapeRecord::StraightEdge(StraightEdge::General { dx: 512, dy: -1024 }),
            ShapeRecord::StraightEdge(StraightEdge::General { dx: 512, dy: 1024 }),
            ShapeRecord::CurvedEdge(CurvedEdge {
                control_dx: -512,
                control_dy: 100,
                anchor_dx: -512,
                anchor_dy: -100,
            }),
        ],
    }
}

/// A DefineFont3 with two glyphs and full layout tables.
pub fn layout_font() -> DefineFont2 {
    DefineFont2 {
        version: 3,
        flags: FontFlags {
            bold: true,
            ..Default::default()
        },
        language_code: 1,
        name: "Test Sans".into(),
        glyphs: vec![triangle_glyph(), triangle_glyph()],
        code_table: vec![u16::from(b'A'), u16::from(b'B')],
        layout: Some(FontLayout {
            ascent: 800,
            descent: 200,
            leading: 40,
            advances: vec![1024, 1100],
            bounds: vec![Rect::new(0, 1024, -1024, 0), Rect::new(0, 1024, -1024, 0)],
            kerning: vec![KerningRecord {
                code1: u16::from(b'A'),
                code2: u16::from(b'B'),
                adjustment: -30,
            }],
        }),
        ..Default::default()
    }
}

fn linear_gradient() -> Gradient {
    Gradient {
        spread_mode: 0,
        interpolation_mode: 0,
        records: vec![
            GradRecord {
                ratio: 0,
                color: Color::rgba(255, 255, 255, 255),
            },
            GradRecord {
                ratio: 255,
                color: Color::rgba(0, 0, 128, 200),
            },
        ],
    }
}

fn morph_square() -> DefineMorphShape {
    let start_edges = Shape {
        records: square_outline(400),
    };
    let mut end_records = square_outline(800);
    end_records[0] = ShapeRecord::StyleChange(StyleChangeRecord::move_to(100, 100));
    DefineMorphShape {
        version: 2,
        start_bounds: Rect::from_size(400, 400),
        end_bounds: Rect::new(100, 900, 100, 900),
        start_edge_bounds: Rect::from_size(400, 400),
        end_edge_bounds: Rect::new(100, 900, 100, 900),
        uses_non_scaling_strokes: false,
        uses_scaling_strokes: true,
        fill_styles: vec![MorphFillStyle::Solid {
            start_color: Color::rgba(255, 0, 0, 255),
            end_color: Color::rgba(0, 0, 255, 128),
        }],
        line_styles: vec![MorphLineStyle::Extended(Box::new(MorphLineStyle2 {
            start_width: 20,
            end_width: 60,
            start_cap_style: 0,
            join_style: 1,
            no_hscale: false,
            no_vscale: false,
            pixel_hinting: true,
            no_close: false,
            end_cap_style: 0,
            miter_limit_factor: 0,
            fill: MorphLineFill::Colors {
                start: Color::BLACK,
                end: Color::WHITE,
            },
        }))],
        start_edges,
        end_edges: Shape {
            records: end_records,
        },
    }
}

fn add(doc: &mut SwfDocument, frame: usize, tag: Tag) -> TagHandle {
    doc.add_tag_to_frame(frame, tag).expect("frame exists")
}

/// Create a document holding every tag kind the writer supports, spread
/// over three frames.
///
/// References only point backwards in write order, so the file decodes
/// without problems.
pub fn create_all_tags_document() -> SwfDocument {
    let mut doc = SwfDocument::new(10);
    doc.frame_size = Rect::from_size(11000, 8000);
    doc.frame_rate = 30.0;
    doc.file_attributes = Some(FileAttributes::USE_NETWORK | FileAttributes::HAS_METADATA);
    doc.metadata = Some("<rdf:RDF/>".into());
    doc.background_color = Some(Color::rgb(0x33, 0x66, 0x99));
    doc.enable_debugger2 = Some(EnableDebugger2 {
        password: "$1$hash".into(),
    });
    doc.enable_telemetry = Some(EnableTelemetry { password: None });
    doc.product_info = Some(ProductInfo {
        product: 3,
        edition: 6,
        major_version: 10,
        minor_version: 1,
        build: 52,
        compile_date: 1_300_000_000_000,
    });
    doc.script_limits = Some(ScriptLimits {
        max_recursion_depth: 1000,
        script_timeout_seconds: 15,
    });
    doc.top_level_class = Some("Main".into());

    // -----------------------------------------------------------------
    // Frame 1: bitmaps, shapes, fonts and text
    // -----------------------------------------------------------------
    let first = doc.add_frame(Frame::with_label("intro"));

    let bitmap = add(
        &mut doc,
        first,
        Tag::DefineBitsLossless(DefineBitsLossless {
            version: 2,
            format: 5,
            width: 2,
            height: 2,
            color_table_size: None,
            zlib_data: vec![0x78, 0x9C, 0x63, 0x60, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01],
        }),
    );
    let square = add(&mut doc, first, Tag::DefineShape(red_square(1, 400)));

    let mut gradient_shape = red_square(3, 800);
    gradient_shape.shapes.fill_styles = vec![
        FillStyle::LinearGradient {
            matrix: Matrix::translation(400, 400).with_scale(0.5, 0.5),
            gradient: linear_gradient(),
        },
        FillStyle::Bitmap {
            bitmap: CharacterRef::Tag(bitmap),
            matrix: Matrix::IDENTITY.with_scale(20.0, 20.0),
            clipped: false,
            smoothed: true,
        },
    ];
    gradient_shape.shapes.records.push(ShapeRecord::StyleChange(StyleChangeRecord {
        fill_style1: Some(2),
        ..Default::default()
    }));
    gradient_shape.shapes.records.push(ShapeRecord::StraightEdge(StraightEdge::General {
        dx: 100,
        dy: 100,
    }));
    add(&mut doc, first, Tag::DefineShape(gradient_shape));

    let mut stroked = red_square(4, 600);
    stroked.shapes.line_styles = vec![LineStyle::Extended(Box::new(LineStyle2::solid(
        40,
        Color::rgba(10, 20, 30, 255),
    )))];
    stroked.uses_fill_winding_rule = true;
    add(&mut doc, first, Tag::DefineShape(stroked));
    add(&mut doc, first, Tag::DefineMorphShape(morph_square()));

    let legacy_font = add(
        &mut doc,
        first,
        Tag::DefineFont(DefineFont {
            glyphs: vec![triangle_glyph()],
            license: None,
        }),
    );
    add(
        &mut doc,
        first,
        Tag::DefineFontInfo(DefineFontInfo {
            version: 2,
            font: CharacterRef::Tag(legacy_font),
            name: "Legacy".into(),
            flags: FontFlags::default(),
            wide_codes: true,
            language_code: 1,
            code_table: vec![u16::from(b'x')],
        }),
    );

    let font = add(&mut doc, first, Tag::DefineFont2(layout_font()));
    let zones = doc.add_tag(Tag::DefineFontAlignZones(DefineFontAlignZones {
        font: CharacterRef::Tag(font),
        csm_table_hint: 1,
        zones: vec![
            ZoneRecord {
                zone_data: [0x0000_3C00, 0x0000_3800],
                mask_y: true,
                mask_x: false,
            };
            2
        ],
    }));
    let license = doc.add_tag(Tag::DefineFontName(DefineFontName {
        font: CharacterRef::Tag(font),
        name: "Test Sans".into(),
        copyright: "(c) nobody".into(),
    }));
    if let Some(Tag::DefineFont2(f)) = doc.tag_mut(font) {
        f.zones = Some(zones);
        f.license = Some(license);
    }
    // Companions are listed after their owner the way a decode leaves them
    doc.frames[first].add(zones);
    doc.frames[first].add(license);

    add(
        &mut doc,
        first,
        Tag::DefineFont4(DefineFont4 {
            italic: true,
            bold: false,
            name: "Embedded".into(),
            font_data: vec![0x4F, 0x54, 0x54, 0x4F],
            license: None,
        }),
    );

    let text = add(
        &mut doc,
        first,
        Tag::DefineText(DefineText {
            version: 2,
            bounds: Rect::from_size(3000, 400),
            matrix: Matrix::translation(100, 300),
            records: vec![
                TextRecord {
                    font: Some((CharacterRef::Tag(font), 240)),
                    color: Some(Color::rgba(0, 0, 0, 255)),
                    x_offset: Some(0),
                    y_offset: Some(240),
                    glyphs: vec![
                        GlyphEntry {
                            glyph_index: 0,
                            glyph_advance: 120,
                        },
                        GlyphEntry {
                            glyph_index: 1,
                            glyph_advance: 130,
                        },
                    ],
                },
                TextRecord {
                    x_offset: Some(10),
                    glyphs: vec![GlyphEntry {
                        glyph_index: 1,
                        glyph_advance: -5,
                    }],
                    ..Default::default()
                },
            ],
            csm_settings: None,
        }),
    );
    let csm = doc.add_tag(Tag::CsmTextSettings(CsmTextSettings {
        text: CharacterRef::Tag(text),
        use_flash_type: 1,
        grid_fit: 2,
        thickness: 0.5,
        sharpness: -1.0,
    }));
    if let Some(Tag::DefineText(t)) = doc.tag_mut(text) {
        t.csm_settings = Some(csm);
    }
    doc.frames[first].add(csm);

    let field = add(
        &mut doc,
        first,
        Tag::DefineEditText(DefineEditText {
            bounds: Rect::from_size(4000, 600),
            word_wrap: true,
            border: true,
            font: Some(CharacterRef::Tag(font)),
            font_height: 280,
            text_color: Some(Color::rgba(20, 20, 20, 255)),
            max_length: Some(64),
            layout: Some(TextLayout {
                align: 1,
                left_margin: 40,
                right_margin: 40,
                indent: 0,
                leading: 20,
            }),
            variable_name: "greeting".into(),
            initial_text: Some("Hello".into()),
            ..Default::default()
        }),
    );

    let place = PlaceObject2 {
        character: Some(CharacterRef::Tag(square)),
        matrix: Some(Matrix::translation(200, 200)),
        ..PlaceObject2::new(1)
    };
    add(&mut doc, first, Tag::PlaceObject2(place));
    add(
        &mut doc,
        first,
        Tag::PlaceObject(PlaceObject {
            character: CharacterRef::Tag(field),
            depth: 2,
            matrix: Matrix::translation(0, 4000),
            color_transform: Some(ColorTransform::IDENTITY.with_mult(128, 256, 256, 256)),
        }),
    );

    // -----------------------------------------------------------------
    // Frame 2: sounds, buttons, sprites, video
    // -----------------------------------------------------------------
    let second = doc.add_frame(Frame::new());

    let sound = add(
        &mut doc,
        second,
        Tag::DefineSound(DefineSound {
            format: SoundFormat {
                compression: SOUND_COMPRESSION_MP3,
                rate: 3,
                is_16bit: true,
                is_stereo: true,
            },
            sample_count: 1152,
            data: vec![0xFF, 0xFB, 0x90, 0x64],
        }),
    );
    add(
        &mut doc,
        second,
        Tag::StartSound(StartSound {
            sound: CharacterRef::Tag(sound),
            info: SoundInfo {
                loop_count: Some(2),
                envelope: Some(vec![SoundEnvelope {
                    pos44: 0,
                    left_level: 32768,
                    right_level: 0,
                }]),
                ..Default::default()
            },
        }),
    );
    add(
        &mut doc,
        second,
        Tag::StartSound2(StartSound2 {
            class_name: "ClickSound".into(),
            info: SoundInfo {
                sync_stop: true,
                ..Default::default()
            },
        }),
    );

    let button = add(
        &mut doc,
        second,
        Tag::DefineButton2(DefineButton2 {
            track_as_menu: false,
            characters: vec![ButtonRecord::new(
                ButtonStates::UP | ButtonStates::OVER | ButtonStates::DOWN | ButtonStates::HIT_TEST,
                CharacterRef::Tag(square),
                1,
            )],
            actions: vec![0x00, 0x00, 0x08, 0x07, 0x00],
        }),
    );
    add(
        &mut doc,
        second,
        Tag::DefineButton(DefineButton {
            characters: vec![ButtonRecord::new(
                ButtonStates::UP,
                CharacterRef::Tag(square),
                1,
            )],
            actions: vec![0x07],
        }),
    );
    add(
        &mut doc,
        second,
        Tag::DefineButtonSound(DefineButtonSound {
            button: CharacterRef::Tag(button),
            sounds: [
                None,
                Some(ButtonSound {
                    sound: CharacterRef::Tag(sound),
                    info: SoundInfo::default(),
                }),
                None,
                None,
            ],
        }),
    );

    let child_place = doc.add_tag(Tag::PlaceObject2(PlaceObject2 {
        character: Some(CharacterRef::Tag(square)),
        ..PlaceObject2::new(1)
    }));
    let child_show = doc.add_tag(Tag::ShowFrame);
    let child_remove = doc.add_tag(Tag::RemoveObject2(RemoveObject2 { depth: 1 }));
    let child_show2 = doc.add_tag(Tag::ShowFrame);
    let sprite = add(
        &mut doc,
        second,
        Tag::DefineSprite(DefineSprite {
            frame_count: 2,
            control_tags: vec![child_place, child_show, child_remove, child_show2],
        }),
    );
    add(
        &mut doc,
        second,
        Tag::DefineScalingGrid(DefineScalingGrid {
            character: CharacterRef::Tag(sprite),
            splitter: Rect::new(20, 380, 20, 380),
        }),
    );
    add(
        &mut doc,
        second,
        Tag::PlaceObject2(PlaceObject2 {
            version: 3,
            depth: 3,
            character: Some(CharacterRef::Tag(button)),
            matrix: Some(Matrix::translation(1000, 1000).with_rotate(0.25, -0.25)),
            name: Some("button".into()),
            filters: Some(vec![Filter::Blur(BlurFilter {
                blur_x: 4.0,
                blur_y: 4.0,
                passes: 1,
            })]),
            blend_mode: Some(3),
            ..Default::default()
        }),
    );
    add(
        &mut doc,
        second,
        Tag::SetTabIndex(SetTabIndex {
            depth: 3,
            tab_index: 1,
        }),
    );

    let video = add(
        &mut doc,
        second,
        Tag::DefineVideoStream(DefineVideoStream {
            num_frames: 1,
            width: 160,
            height: 120,
            deblocking: 1,
            smoothing: true,
            codec_id: 2,
        }),
    );
    add(
        &mut doc,
        second,
        Tag::VideoFrame(VideoFrame {
            stream: CharacterRef::Tag(video),
            frame_num: 0,
            data: vec![0x00, 0x00, 0x84, 0x00],
        }),
    );
    add(
        &mut doc,
        second,
        Tag::ExportAssets(ExportAssets {
            assets: vec![(CharacterRef::Tag(sprite), "Spinner".into())],
        }),
    );

    // -----------------------------------------------------------------
    // Frame 3: JPEG data, streams, data blobs and passthrough tags
    // -----------------------------------------------------------------
    let third = doc.add_frame(Frame {
        label: Some(FrameLabel {
            name: "outro".into(),
            named_anchor: true,
        }),
        ..Frame::new()
    });

    add(
        &mut doc,
        third,
        Tag::JpegTables(JpegTables {
            jpeg_data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        }),
    );
    add(
        &mut doc,
        third,
        Tag::DefineBits(DefineBits {
            jpeg_data: vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9],
        }),
    );
    add(
        &mut doc,
        third,
        Tag::DefineBitsJpeg2(DefineBitsJpeg2 {
            image_data: vec![0xFF, 0xD8, 0x01, 0xFF, 0xD9],
        }),
    );
    add(
        &mut doc,
        third,
        Tag::DefineBitsJpeg3(DefineBitsJpeg3 {
            image_data: vec![0xFF, 0xD8, 0x02, 0xFF, 0xD9],
            alpha_data: vec![0x78, 0x9C, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01],
        }),
    );
    add(
        &mut doc,
        third,
        Tag::SoundStreamHead(SoundStreamHead {
            version: 2,
            playback: SoundFormat {
                compression: 0,
                rate: 2,
                is_16bit: true,
                is_stereo: false,
            },
            stream: SoundFormat {
                compression: 3,
                rate: 2,
                is_16bit: true,
                is_stereo: false,
            },
            sample_count: 735,
            latency_seek: 0,
        }),
    );
    add(
        &mut doc,
        third,
        Tag::SoundStreamBlock(SoundStreamBlock {
            data: vec![0x01, 0x02, 0x03],
        }),
    );
    let data = add(
        &mut doc,
        third,
        Tag::DefineBinaryData(DefineBinaryData {
            data: b"config".to_vec(),
        }),
    );
    doc.frames[third]
        .symbols
        .push((CharacterRef::Tag(data), "ConfigData".into()));
    add(
        &mut doc,
        third,
        Tag::DoAbc(DoAbc {
            flags: 1,
            name: "frame3".into(),
            abc_data: vec![0x10, 0x00, 0x2E, 0x00],
        }),
    );
    add(
        &mut doc,
        third,
        Tag::DefineSceneAndFrameLabelData(SceneAndFrameLabelData {
            scenes: vec![(0, "Scene 1".into())],
            frame_labels: vec![(0, "intro".into()), (2, "outro".into())],
        }),
    );
    add(&mut doc, third, Tag::RemoveObject(RemoveObject {
        character: CharacterRef::Tag(field),
        depth: 2,
    }));
    add(&mut doc, third, Tag::Raw(RawTag::new(255, vec![1, 2, 3, 4])));

    doc
}

/// A document with `frames` frames, each placing and removing one square.
pub fn create_animation_document(frames: usize) -> SwfDocument {
    let mut doc = SwfDocument::new(8);
    doc.frame_size = Rect::from_size(5500, 4000);
    doc.frame_rate = 12.0;
    let first = doc.add_frame(Frame::new());
    let square = add(&mut doc, first, Tag::DefineShape(red_square(2, 200)));
    for index in 0..frames {
        let frame = if index == 0 {
            first
        } else {
            doc.add_frame(Frame::new())
        };
        add(
            &mut doc,
            frame,
            Tag::PlaceObject2(PlaceObject2 {
                character: Some(CharacterRef::Tag(square)),
                matrix: Some(Matrix::translation(index as i32 * 20, 0)),
                ..PlaceObject2::new(1)
            }),
        );
        add(&mut doc, frame, Tag::RemoveObject2(RemoveObject2 { depth: 1 }));
    }
    doc
}
