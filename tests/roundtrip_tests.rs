//! Round-trip tests: bit-level laws, header fields and full documents
//! through every compression mode.

mod common;

use common::builders::{create_all_tags_document, create_animation_document, red_square};
use common::comparison::{assert_same_encoding, assert_same_structure};
use common::{count_tags_by_type, roundtrip, write_document};
use proptest::prelude::*;
use swfkit::io::bit_width::{require_sb, require_ub};
use swfkit::io::{BitReader, BitWriter, Compression};
use swfkit::types::{ShapeRecord, StraightEdge};
use swfkit::{CharacterRef, Frame, Rect, SwfDocument, Tag};

const ALL_COMPRESSIONS: [Compression; 3] = [Compression::None, Compression::Zlib, Compression::Lzma];

// ===========================================================================
// Bit-level laws
// ===========================================================================

proptest! {
    #[test]
    fn prop_ub_minimal_width_roundtrips(value in any::<u32>()) {
        let bits = require_ub(value);
        let mut writer = BitWriter::new();
        writer.write_ub(value, bits).unwrap();
        let mut reader = BitReader::new(writer.into_bytes());
        prop_assert_eq!(reader.read_ub(bits).unwrap(), value);
        if bits > 0 {
            prop_assert!(BitWriter::new().write_ub(value, bits - 1).is_err());
        }
    }

    #[test]
    fn prop_sb_minimal_width_roundtrips(value in any::<i32>()) {
        let bits = require_sb(value);
        let mut writer = BitWriter::new();
        writer.write_sb(value, bits).unwrap();
        let mut reader = BitReader::new(writer.into_bytes());
        prop_assert_eq!(reader.read_sb(bits).unwrap(), value);
        if value != 0 {
            prop_assert!(BitWriter::new().write_sb(value, bits - 1).is_err());
        }
    }

    #[test]
    fn prop_mixed_fields_share_bytes(a in 0u32..8, b in -16i32..16, c in any::<u16>()) {
        let mut writer = BitWriter::new();
        writer.write_ub(a, 3).unwrap();
        writer.write_sb(b, 5).unwrap();
        writer.write_u16(c).unwrap();
        let bytes = writer.into_bytes();
        prop_assert_eq!(bytes.len(), 3);

        let mut reader = BitReader::new(bytes);
        prop_assert_eq!(reader.read_ub(3).unwrap(), a);
        prop_assert_eq!(reader.read_sb(5).unwrap(), b);
        prop_assert_eq!(reader.read_u16().unwrap(), c);
    }

    #[test]
    fn prop_encoded_u32_roundtrips(value in any::<u32>()) {
        let mut writer = BitWriter::new();
        writer.write_encoded_u32(value).unwrap();
        let bytes = writer.into_bytes();
        let groups = (require_ub(value).max(1) + 6) / 7;
        prop_assert_eq!(bytes.len() as u32, groups);
        prop_assert_eq!(BitReader::new(bytes).read_encoded_u32().unwrap(), value);
    }

    #[test]
    fn prop_fixed_point_roundtrips(raw in any::<i32>(), raw8 in any::<i16>()) {
        let value = raw as f64 / 65536.0;
        let value8 = raw8 as f64 / 256.0;
        let mut writer = BitWriter::new();
        writer.write_fixed(value).unwrap();
        writer.write_fixed8(value8).unwrap();
        let mut reader = BitReader::new(writer.into_bytes());
        prop_assert_eq!(reader.read_fixed().unwrap(), value);
        prop_assert_eq!(reader.read_fixed8().unwrap(), value8);
    }
}

// ===========================================================================
// Header and outline laws
// ===========================================================================

fn edge() -> impl Strategy<Value = StraightEdge> {
    prop_oneof![
        (-5000i32..5000, -5000i32..5000).prop_map(|(dx, dy)| StraightEdge::General { dx, dy }),
        (-5000i32..5000).prop_map(|dy| StraightEdge::Vertical { dy }),
        (-5000i32..5000).prop_map(|dx| StraightEdge::Horizontal { dx }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_header_fields_roundtrip(
        x_min in -100_000i32..0,
        x_max in 0i32..100_000,
        y_min in -100_000i32..0,
        y_max in 0i32..100_000,
        rate in 0i16..i16::MAX,
        frames in 1usize..20,
    ) {
        let mut doc = create_animation_document(frames);
        doc.frame_size = Rect::new(x_min, x_max, y_min, y_max);
        doc.frame_rate = rate as f64 / 256.0;

        let read = roundtrip(&doc, Compression::None);
        prop_assert_eq!(read.frame_size, doc.frame_size);
        prop_assert_eq!(read.frame_rate, doc.frame_rate);
        prop_assert_eq!(read.frame_count(), frames);
        prop_assert!(read.notifications.is_empty());
    }

    #[test]
    fn prop_shape_edges_roundtrip(edges in prop::collection::vec(edge(), 1..40), version in 1u8..=4) {
        let mut shape = red_square(version, 100);
        shape.shapes.records.extend(edges.iter().copied().map(ShapeRecord::StraightEdge));

        let mut doc = SwfDocument::new(10);
        let frame = doc.add_frame(Frame::new());
        doc.add_tag_to_frame(frame, Tag::DefineShape(shape.clone()));

        let read = roundtrip(&doc, Compression::None);
        prop_assert!(read.notifications.is_empty());
        let Some(Tag::DefineShape(decoded)) = read.tag(read.frames()[0].tags[0]) else {
            panic!("expected a shape");
        };
        prop_assert_eq!(decoded.version, version);
        let tail = &decoded.shapes.records[decoded.shapes.records.len() - edges.len()..];
        for (record, expected) in tail.iter().zip(&edges) {
            prop_assert_eq!(record, &ShapeRecord::StraightEdge(*expected));
        }
    }
}

// ===========================================================================
// Full documents
// ===========================================================================

fn check_all_tags_roundtrip(compression: Compression) {
    let built = create_all_tags_document();
    let once = roundtrip(&built, compression);
    assert!(once.notifications.is_empty(), "{:?}", once.notifications);
    assert_eq!(once.compression, compression);

    assert_same_structure(&built, &once);
    assert_same_encoding(&built, &once);
    assert_eq!(count_tags_by_type(&built), count_tags_by_type(&once));

    let twice = roundtrip(&once, compression);
    assert_same_structure(&once, &twice);
    assert_same_encoding(&once, &twice);
}

#[test]
fn test_all_tags_uncompressed() {
    check_all_tags_roundtrip(Compression::None);
}

#[test]
fn test_all_tags_zlib() {
    check_all_tags_roundtrip(Compression::Zlib);
}

#[test]
fn test_all_tags_lzma() {
    check_all_tags_roundtrip(Compression::Lzma);
}

#[test]
fn test_compressed_bodies_match() {
    let doc = create_all_tags_document();
    let plain = write_document(&doc, Compression::None);
    for compression in ALL_COMPRESSIONS {
        let bytes = write_document(&doc, compression);
        assert_eq!(&bytes[..3], &compression.signature());
        // The length field always counts the uncompressed file
        assert_eq!(&bytes[4..8], &plain[4..8]);
        let reencoded = write_document(&roundtrip(&doc, compression), Compression::None);
        assert_eq!(reencoded, plain);
    }
}

#[test]
fn test_encoding_is_deterministic() {
    let doc = create_all_tags_document();
    assert_eq!(
        write_document(&doc, Compression::None),
        write_document(&doc, Compression::None)
    );
}

#[test]
fn test_links_survive_roundtrip() {
    let read = roundtrip(&create_all_tags_document(), Compression::Zlib);
    let tags: Vec<&Tag> = read.frames()[0]
        .tags
        .iter()
        .filter_map(|&h| read.tag(h))
        .collect();

    let font = tags
        .iter()
        .find_map(|t| match t {
            Tag::DefineFont2(f) => Some(f),
            _ => None,
        })
        .expect("font in first frame");
    assert_eq!(font.version, 3);
    assert_eq!(font.glyphs.len(), 2);
    let zones = font.zones.and_then(|h| read.tag(h));
    assert!(matches!(zones, Some(Tag::DefineFontAlignZones(z)) if z.zones.len() == 2));
    assert!(matches!(
        font.license.and_then(|h| read.tag(h)),
        Some(Tag::DefineFontName(_))
    ));

    let text = tags
        .iter()
        .find_map(|t| match t {
            Tag::DefineText(text) => Some(text),
            _ => None,
        })
        .expect("text in first frame");
    assert!(text.csm_settings.is_some());
    assert_eq!(text.records.len(), 2);

    let sprite = read.frames()[1]
        .tags
        .iter()
        .find_map(|&h| match read.tag(h) {
            Some(Tag::DefineSprite(s)) => Some(s),
            _ => None,
        })
        .expect("sprite in second frame");
    assert_eq!(sprite.frame_count, 2);
    assert_eq!(sprite.control_tags.len(), 4);

    let third = &read.frames()[2];
    assert!(third.label.as_ref().map_or(false, |l| l.named_anchor));
    assert_eq!(third.symbols.len(), 1);
    assert!(matches!(third.symbols[0].0, CharacterRef::Tag(_)));
    assert_eq!(read.top_level_class.as_deref(), Some("Main"));
}
