use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use pretty_assertions::assert_eq;

use crate::nbt::{compound, to_binary};
use crate::prelude::*;

fn note_block_schematic() -> Vec<u8> {
    let root = compound! {
        "Materials" => "Alpha",
        "Width" => 2_i16,
        "Height" => 1_i16,
        "Length" => 1_i16,
        "Blocks" => vec![25_i8, 2],
        "Data" => vec![0_i8; 2],
        "TileEntities" => List::Compound(vec![compound! {
            "id" => "Music",
            "x" => 0,
            "y" => 0,
            "z" => 0,
            "note" => 5_i8,
        }]),
    };

    let mut raw = vec![];
    to_binary(&root, &mut raw, "Schematic").unwrap();

    let mut encoder = GzEncoder::new(vec![], Compression::default());
    encoder.write_all(&raw).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn decode_through_facade() {
    let stack = crate::decode(&note_block_schematic()).unwrap();

    assert_eq!(stack.height(), 1);
    assert_eq!(
        stack.get(0, 0, 0).map(|b| &b.kind),
        Some(&BlockKind::Note(Note { pitch: 5 }))
    );
    assert_eq!(stack.get(0, 1, 0).map(Block::name), Some("Grass"));
    assert!(!stack.has_cell_errors());
}

#[test]
fn settings_are_honored() {
    let settings = DecodeSettings {
        max_volume: 1,
        ..Default::default()
    };

    assert!(matches!(
        crate::decode_with(&note_block_schematic(), &settings),
        Err(SchematicError::Parse(ParseError::TooLarge { volume: 2, max: 1 }))
    ));
}
