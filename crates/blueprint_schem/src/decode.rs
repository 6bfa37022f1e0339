//! Reading whole schematic files.
//!
//! An Alpha schematic is a root compound holding the dimensions, two flat
//! byte arrays (`Blocks` and `Data`) and a list of tile entities. The on-disk
//! `Width` runs along the columns of a [`Slice`] and `Length` along its rows,
//! so the decoder swaps the two when building the grid. Tile entities store
//! the vertical coordinate in `y` and the row in `z`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use blueprint_nbt::{gzip, Compound, Value};
use tracing::{debug, warn};

use crate::block::Block;
use crate::grid::{flat_index, CellFault, Slice, SliceStack};
use crate::{registry, BlockError, ParseError, SchematicError};

/// The only `Materials` value this crate can read.
pub const ALPHA_MATERIALS: &str = "Alpha";

/// Default for [`DecodeSettings::max_volume`].
pub const DEFAULT_MAX_VOLUME: u64 = 1 << 27;

/// Options for [`decode_with`].
#[derive(Clone, Debug)]
pub struct DecodeSettings {
    /// Schematics declaring more blocks than this are rejected before any
    /// allocation.
    pub max_volume: u64,
    /// Work out the shape of redstone wire from its neighbors after
    /// decoding.
    pub connect_redstone_wires: bool,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self {
            max_volume: DEFAULT_MAX_VOLUME,
            connect_redstone_wires: true,
        }
    }
}

/// Reads and decodes the schematic file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<SliceStack, SchematicError> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Decodes a schematic with the default [`DecodeSettings`].
///
/// `bytes` may be gzip compressed or raw.
pub fn decode(bytes: &[u8]) -> Result<SliceStack, SchematicError> {
    decode_with(bytes, &DecodeSettings::default())
}

/// Decodes a schematic, gzip compressed or raw, with the given settings.
pub fn decode_with(bytes: &[u8], settings: &DecodeSettings) -> Result<SliceStack, SchematicError> {
    let (root, _) = gzip::read_compressed(bytes)?;

    check_materials(&root)?;

    let disk_width = read_dimension(&root, "Width")?;
    let disk_height = read_dimension(&root, "Height")?;
    let disk_length = read_dimension(&root, "Length")?;

    let (Ok(length), Ok(height), Ok(width)) = (
        usize::try_from(disk_width),
        usize::try_from(disk_height),
        usize::try_from(disk_length),
    ) else {
        return Err(ParseError::InvalidDimensions {
            width: disk_width,
            height: disk_height,
            length: disk_length,
        }
        .into());
    };

    let volume = height as u64 * width as u64 * length as u64;
    let volume = match usize::try_from(volume) {
        Ok(volume) if volume as u64 <= settings.max_volume => volume,
        _ => {
            return Err(ParseError::TooLarge {
                volume,
                max: settings.max_volume,
            }
            .into())
        }
    };

    debug!(
        disk_width,
        disk_height, disk_length, height, width, length, "decoding schematic"
    );

    let blocks = read_byte_array(&root, "Blocks", volume)?;
    let data = read_byte_array(&root, "Data", volume)?;
    let tile_entities = index_tile_entities(&root, height, width, length)?;

    let mut slices = Vec::with_capacity(height);
    let mut faults = vec![];
    let mut idx = 0;

    for z in 0..height {
        let mut cells = Vec::with_capacity(width * length);

        for y in 0..width {
            for x in 0..length {
                debug_assert_eq!(idx, flat_index(x, y, z, width, length));

                let block_id = blocks[idx] as u8;
                let block_data = data[idx] as u8;
                let tile_entity = tile_entities.get(&idx).copied();

                let block = match decode_cell(block_id, block_data, tile_entity)? {
                    Ok(block) => block,
                    Err(error) => {
                        warn!(
                            slice = z,
                            column = x,
                            row = y,
                            block_id,
                            %error,
                            "faulty block replaced with air"
                        );

                        faults.push(CellFault {
                            slice: z,
                            column: x,
                            row: y,
                            block_id,
                            error,
                        });

                        Block::AIR
                    }
                };

                cells.push(block);
                idx += 1;
            }
        }

        slices.push(Slice::from_blocks(width, length, cells));
    }

    let mut stack = SliceStack::from_slices(width, length, slices, faults);

    if settings.connect_redstone_wires {
        stack.connect_redstone_wires();
    }

    Ok(stack)
}

fn check_materials(root: &Compound) -> Result<(), SchematicError> {
    match root.get("Materials") {
        Some(Value::String(materials)) if materials.eq_ignore_ascii_case(ALPHA_MATERIALS) => Ok(()),
        Some(Value::String(materials)) => Err(SchematicError::UnsupportedFormat {
            found: Some(materials.clone()),
        }),
        _ => Err(SchematicError::UnsupportedFormat { found: None }),
    }
}

fn read_dimension(root: &Compound, key: &'static str) -> Result<i16, ParseError> {
    match root.get(key) {
        Some(&Value::Short(n)) => Ok(n),
        Some(_) => Err(ParseError::InvalidType {
            key,
            expected: "short",
        }),
        None => Err(ParseError::MissingField { key }),
    }
}

/// Returns the first `volume` entries of a byte array. Longer arrays are
/// accepted.
fn read_byte_array<'a>(
    root: &'a Compound,
    key: &'static str,
    volume: usize,
) -> Result<&'a [i8], ParseError> {
    let array = match root.get(key).map(Value::as_byte_array) {
        Some(Some(array)) => array,
        Some(None) => {
            return Err(ParseError::InvalidType {
                key,
                expected: "byte array",
            })
        }
        None => return Err(ParseError::MissingField { key }),
    };

    array.get(..volume).ok_or(ParseError::ArrayTooShort {
        key,
        len: array.len(),
        volume,
    })
}

/// Maps flat block indices to tile entities. Later records replace earlier
/// ones at the same position.
fn index_tile_entities(
    root: &Compound,
    height: usize,
    width: usize,
    length: usize,
) -> Result<HashMap<usize, &Compound>, ParseError> {
    const KEY: &str = "TileEntities";

    let records = match root.get(KEY) {
        Some(Value::List(list)) => list.as_compounds(),
        Some(_) => None,
        None => return Err(ParseError::MissingField { key: KEY }),
    }
    .ok_or(ParseError::InvalidType {
        key: KEY,
        expected: "list of compounds",
    })?;

    let mut index = HashMap::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let coord = |key: &'static str| match record.get(key) {
            Some(&Value::Int(n)) => Ok(n),
            _ => Err(ParseError::MalformedTileEntity { index: i, key }),
        };

        let tx = coord("x")?;
        let ty = coord("y")?;
        let tz = coord("z")?;

        let within = |n: i32, len: usize| usize::try_from(n).ok().filter(|&n| n < len);

        // Tile entities are vertical in y. The grid is vertical in z.
        let (Some(x), Some(y), Some(z)) = (within(tx, length), within(tz, width), within(ty, height))
        else {
            warn!(x = tx, y = ty, z = tz, "skipping tile entity outside the schematic");
            continue;
        };

        index.insert(flat_index(x, y, z, width, length), record);
    }

    debug!(count = index.len(), "indexed tile entities");

    Ok(index)
}

/// Decodes one cell.
///
/// The outer error aborts the whole decode. The inner one replaces just this
/// cell with air.
fn decode_cell(
    id: u8,
    data: u8,
    tile_entity: Option<&Compound>,
) -> Result<Result<Block, BlockError>, ParseError> {
    let Some(special) = registry::special(id) else {
        return Ok(registry::resolve(id, data));
    };

    let Some(tile_entity) = tile_entity else {
        return Ok((special.build)(data, None));
    };

    let Some(found) = tile_entity.get("id").and_then(Value::as_string) else {
        return Ok(Err(BlockError::MissingTileEntityId));
    };

    if found != special.tile_entity {
        return Err(ParseError::TileEntityMismatch {
            block_id: id,
            expected: special.tile_entity,
            found: found.to_owned(),
        });
    }

    Ok((special.build)(data, Some(tile_entity)))
}
