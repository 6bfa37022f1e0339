use pretty_assertions::assert_eq;

use crate::tag::Tag;
use crate::{compound, from_binary, to_binary, Compound, List, Value};

const ROOT_NAME: &str = "Schematic";

fn example_compound() -> Compound {
    compound! {
        "Materials" => "Alpha",
        "Width" => 2_i16,
        "Height" => 1_i16,
        "Length" => 3_i16,
        "Blocks" => vec![1_i8, 54, 0, -1, 3, 4],
        "Data" => vec![0_i8; 6],
        "TileEntities" => List::Compound(vec![compound! {
            "id" => "Chest",
            "x" => 1,
            "y" => 0,
            "z" => 0,
            "Items" => List::Compound(vec![compound! {
                "id" => 276_i16,
                "Damage" => 0_i16,
                "Count" => 1_i8,
                "Slot" => 13_i8,
            }]),
        }]),
        "Entities" => List::End,
        "WEOriginX" => 12_i32,
        "Seed" => 123_456_789_i64,
        "Pos" => List::Double(vec![0.5, 64.0, -0.5]),
        "Rotation" => Value::Float(90.0),
        "HeightMap" => vec![1_i32, 2, 3],
        "Longs" => vec![i64::MIN, 0, i64::MAX],
        "Nested" => List::List(vec![List::Int(vec![1, 2]), List::End]),
        "Text" => "aé日\u{0}😀",
    }
}

#[test]
fn round_trip() {
    let mut buf = vec![];

    let compound = example_compound();

    to_binary(&compound, &mut buf, ROOT_NAME).unwrap();

    let mut slice = buf.as_slice();
    let (decoded, root_name) = from_binary(&mut slice).unwrap();

    assert_eq!(root_name, ROOT_NAME);
    assert_eq!(compound, decoded);
    assert!(slice.is_empty());
}

#[test]
fn decode_known_bytes() {
    // TAG_Compound "" { TAG_Short "Width": 0x0102 } TAG_End
    let bytes = [
        10, 0, 0, 2, 0, 5, b'W', b'i', b'd', b't', b'h', 0x01, 0x02, 0,
    ];

    let (nbt, root_name) = from_binary(&mut bytes.as_slice()).unwrap();

    assert_eq!(root_name, "");
    assert_eq!(nbt, compound! { "Width" => 0x0102_i16 });
}

#[test]
fn null_is_encoded_as_two_bytes() {
    let mut buf = vec![];
    to_binary(&compound! { "" => "\u{0}" }, &mut buf, "").unwrap();

    // Modified UTF-8 never contains a literal zero byte inside strings.
    assert_eq!(&buf[buf.len() - 5..buf.len() - 1], &[0, 2, 0xc0, 0x80][..]);
}

#[test]
fn root_must_be_compound() {
    let bytes = [Tag::Int as u8, 0, 0, 0, 0, 0, 1];

    assert!(from_binary(&mut bytes.as_slice()).is_err());
}

#[test]
fn invalid_tag_byte() {
    let bytes = [10, 0, 0, 42, 0, 0];

    let err = from_binary(&mut bytes.as_slice()).unwrap_err();
    assert!(err.to_string().contains("invalid tag byte"), "{err}");
}

#[test]
fn negative_length_is_rejected() {
    let mut bytes = vec![10, 0, 0, Tag::ByteArray as u8, 0, 1, b'B'];
    bytes.extend((-5_i32).to_be_bytes());
    bytes.push(0);

    let err = from_binary(&mut bytes.as_slice()).unwrap_err();
    assert!(err.to_string().contains("negative"), "{err}");
}

#[test]
fn oversized_length_is_rejected_before_allocating() {
    let mut bytes = vec![10, 0, 0, Tag::ByteArray as u8, 0, 1, b'B'];
    bytes.extend(i32::MAX.to_be_bytes());
    bytes.extend([1, 2, 3]);

    let err = from_binary(&mut bytes.as_slice()).unwrap_err();
    assert!(err.to_string().contains("exceeds remaining input"), "{err}");
}

#[test]
fn end_list_with_elements_is_rejected() {
    let mut bytes = vec![10, 0, 0, Tag::List as u8, 0, 1, b'L', Tag::End as u8];
    bytes.extend(3_i32.to_be_bytes());
    bytes.push(0);

    assert!(from_binary(&mut bytes.as_slice()).is_err());
}

#[test]
fn truncated_input_is_rejected() {
    let mut buf = vec![];
    to_binary(&example_compound(), &mut buf, ROOT_NAME).unwrap();

    for len in [1, 3, buf.len() / 2, buf.len() - 1] {
        assert!(from_binary(&mut &buf[..len]).is_err(), "len {len}");
    }

    // Running out inside a fixed-size field surfaces the reader's error.
    let err = from_binary(&mut &buf[..1]).unwrap_err();
    assert!(err.io_error().is_some(), "{err}");
}

#[test]
fn deeply_nested_compound_decode() {
    let mut buf = vec![Tag::Compound as u8, 0, 0]; // Root compound
    let n = 10_000;

    for _ in 0..n {
        buf.extend([Tag::Compound as u8, 0, 0]);
    }

    buf.extend((0..n).map(|_| Tag::End as u8));

    buf.push(Tag::End as u8); // End root compound

    // Should not overflow the stack
    let err = from_binary(&mut buf.as_slice()).unwrap_err();
    assert!(err.to_string().contains("recursion depth"), "{err}");
}
