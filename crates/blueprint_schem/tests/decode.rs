use std::io::Write;

use blueprint_nbt::{compound, to_binary, Compound, List};
use blueprint_schem::block::{BrewingStand, Container, ContainerKind};
use blueprint_schem::{
    decode, load, Axis, Block, BlockError, BlockKind, CellFault, Item, ParseError,
    SchematicError, WireShape,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Builds a root compound. `width`, `height` and `length` are the on-disk
/// field values.
fn schematic(
    width: i16,
    height: i16,
    length: i16,
    blocks: Vec<i8>,
    tile_entities: Vec<Compound>,
) -> Compound {
    let data = vec![0_i8; blocks.len()];

    compound! {
        "Materials" => "Alpha",
        "Width" => width,
        "Height" => height,
        "Length" => length,
        "Blocks" => blocks,
        "Data" => data,
        "TileEntities" => List::Compound(tile_entities),
        "Entities" => List::End,
    }
}

fn raw(root: &Compound) -> Vec<u8> {
    let mut buf = vec![];
    to_binary(root, &mut buf, "Schematic").unwrap();
    buf
}

fn gzipped(root: &Compound) -> Vec<u8> {
    let mut encoder = GzEncoder::new(vec![], Compression::default());
    encoder.write_all(&raw(root)).unwrap();
    encoder.finish().unwrap()
}

fn item(id: i16, count: i8, slot: i8) -> Compound {
    compound! {
        "id" => id,
        "Damage" => 0_i16,
        "Count" => count,
        "Slot" => slot,
    }
}

/// A 3 wide, 2 long, 2 high build: a stone floor with a chest, a furnace
/// and a brewing stand on top.
fn house() -> Compound {
    #[rustfmt::skip]
    let blocks = vec![
        // bottom layer
        1, 1, 1,
        1, 1, 1,
        // top layer
        54, 0, 61,
        0, 117, 0,
    ];

    let mut chest_item = item(299, 1, 13);
    chest_item.insert(
        "tag",
        compound! {
            "display" => compound! { "Name" => "Red Tunic", "color" => 0xff_0000 },
        },
    );

    schematic(
        3,
        2,
        2,
        blocks,
        vec![
            compound! {
                "id" => "Chest",
                "x" => 0,
                "y" => 1,
                "z" => 0,
                "Items" => List::Compound(vec![item(4, 64, 0), chest_item]),
            },
            compound! {
                "id" => "Cauldron",
                "x" => 1,
                "y" => 1,
                "z" => 1,
                "BrewTime" => 120,
                "Items" => List::Compound(vec![item(373, 1, 0)]),
            },
        ],
    )
}

#[test]
fn decoding_is_deterministic() {
    init_logging();

    let bytes = gzipped(&house());

    assert_eq!(decode(&bytes).unwrap(), decode(&bytes).unwrap());
}

#[test]
fn raw_and_gzip_decode_identically() {
    init_logging();

    let root = house();

    assert_eq!(decode(&raw(&root)).unwrap(), decode(&gzipped(&root)).unwrap());
}

#[test]
fn axes_are_remapped() {
    init_logging();

    // On disk: Width 4, Length 2, Height 3. A slice therefore has 2 rows of 4
    // columns.
    let mut blocks = vec![0_i8; 4 * 2 * 3];
    // column 3, row 1, slice 2
    blocks[3 + (1 + 2 * 2) * 4] = 20;

    let stack = decode(&gzipped(&schematic(4, 3, 2, blocks, vec![]))).unwrap();

    assert_eq!(stack.height(), 3);
    assert_eq!(stack.width(), 2);
    assert_eq!(stack.length(), 4);

    let top = stack.slice(2).unwrap();
    assert_eq!(top.width(), 2);
    assert_eq!(top.length(), 4);
    assert_eq!(top.rows().count(), 2);
    assert_eq!(top.get(3, 1).unwrap().id, 20);
    assert_eq!(top.get(1, 3), None);

    let glass: Vec<_> = stack
        .iter()
        .enumerate()
        .flat_map(|(z, slice)| {
            slice.rows().enumerate().flat_map(move |(row, blocks)| {
                blocks
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| !b.is_air())
                    .map(move |(column, _)| (z, column, row))
            })
        })
        .collect();
    assert_eq!(glass, [(2, 3, 1)]);
}

#[test]
fn tile_entities_are_remapped() {
    init_logging();

    let stack = decode(&gzipped(&house())).unwrap();

    let chest = stack.get(1, 0, 0).unwrap();
    let BlockKind::Container(Container { kind, items }) = &chest.kind else {
        panic!("expected a chest, got {chest}");
    };

    assert_eq!(*kind, ContainerKind::Chest);
    assert_eq!(items.len(), 27);
    assert_eq!(items[0], Item::resolve(4, 0, 64));

    let tunic = &items[13];
    assert_eq!(tunic.name.as_deref(), Some("Red Tunic"));
    assert_eq!(tunic.color(), Some(0xff_0000));

    let stand = stack.get(1, 1, 1).unwrap();
    let BlockKind::BrewingStand(BrewingStand { items, brew_time }) = &stand.kind else {
        panic!("expected a brewing stand, got {stand}");
    };

    assert_eq!(*brew_time, 120);
    assert_eq!(items[0], Item::resolve(373, 0, 1));
    assert!(items[1..].iter().all(Item::is_empty));

    assert!(!stack.has_cell_errors());
}

#[test]
fn chest_without_tile_entity_is_empty() {
    init_logging();

    let stack = decode(&gzipped(&schematic(1, 1, 1, vec![54], vec![]))).unwrap();

    assert_eq!(
        stack.get(0, 0, 0).unwrap().kind,
        BlockKind::Container(Container::empty(ContainerKind::Chest))
    );
    assert!(!stack.has_cell_errors());
}

#[test]
fn mismatched_tile_entity_is_fatal() {
    init_logging();

    let hopper = compound! {
        "id" => "Hopper",
        "x" => 0,
        "y" => 0,
        "z" => 0,
        "Items" => List::End,
    };

    let err = decode(&gzipped(&schematic(1, 1, 1, vec![23], vec![hopper]))).unwrap_err();

    let SchematicError::Parse(ParseError::TileEntityMismatch {
        block_id, found, ..
    }) = &err
    else {
        panic!("unexpected error: {err}");
    };

    assert_eq!(*block_id, 23);
    assert_eq!(found, "Hopper");

    let message = err.to_string();
    assert!(message.contains("23") && message.contains("Hopper"), "{message}");
}

#[test]
fn corrupt_cell_becomes_air() {
    init_logging();

    let mut blocks = vec![1_i8; 8];
    blocks[5] = 250_u8 as i8;

    let stack = decode(&gzipped(&schematic(2, 2, 2, blocks, vec![]))).unwrap();

    // Index 5 is column 1, row 0 of the upper slice.
    assert_eq!(stack.get(1, 1, 0), Some(&Block::AIR));
    assert_eq!(
        stack.faults(),
        [CellFault {
            slice: 1,
            column: 1,
            row: 0,
            block_id: 250,
            error: BlockError::UnknownBlock(250),
        }]
    );
    assert!(stack.has_cell_errors());

    let stone = stack
        .iter()
        .flat_map(|slice| slice.rows())
        .flatten()
        .filter(|b| b.id == 1)
        .count();
    assert_eq!(stone, 7);
}

#[test]
fn brew_time_tag_types_agree() {
    init_logging();

    let stand = |brew_time: blueprint_nbt::Value| {
        let mut te = compound! { "id" => "Cauldron", "x" => 0, "y" => 0, "z" => 0 };
        te.insert("BrewTime", brew_time);

        decode(&gzipped(&schematic(1, 1, 1, vec![117], vec![te]))).unwrap()
    };

    let short = stand(400_i16.into());
    let int = stand(400_i32.into());

    assert_eq!(short, int);
    assert!(!short.has_cell_errors());
}

#[test]
fn items_without_display_keep_defaults() {
    init_logging();

    let mut plain = item(298, 1, 0);
    plain.insert("tag", compound! { "ench" => List::End });

    let chest = compound! {
        "id" => "Chest",
        "x" => 0,
        "y" => 0,
        "z" => 0,
        "Items" => List::Compound(vec![plain, item(300, 1, 1)]),
    };

    let stack = decode(&gzipped(&schematic(1, 1, 1, vec![54], vec![chest]))).unwrap();

    let BlockKind::Container(chest) = &stack.get(0, 0, 0).unwrap().kind else {
        panic!("not a chest");
    };

    for item in &chest.items[..2] {
        assert!(item.is_colorable());
        assert_eq!(item.name, None);
        assert_eq!(item.color(), None);
    }
}

#[test]
fn redstone_wires_are_connected() {
    init_logging();

    // A line of wire running east into a lever.
    let stack = decode(&gzipped(&schematic(3, 1, 1, vec![55, 55, 69], vec![]))).unwrap();

    for column in 0..2 {
        let BlockKind::RedstoneWire(wire) = stack.get(0, column, 0).unwrap().kind else {
            panic!("not wire");
        };
        assert_eq!(wire.shape, WireShape::Line(Axis::EastWest));
    }
}

#[test]
fn load_from_file() {
    init_logging();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&gzipped(&house())).unwrap();
    file.flush().unwrap();

    let stack = load(file.path()).unwrap();

    assert_eq!(stack, decode(&gzipped(&house())).unwrap());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        load(dir.path().join("missing.schematic")),
        Err(SchematicError::Io(_))
    ));
}
