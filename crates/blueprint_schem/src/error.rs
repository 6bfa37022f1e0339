use std::io;

use thiserror::Error;

/// Errors that abort [`decode`](crate::decode()) as a whole.
#[derive(Debug, Error)]
pub enum SchematicError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The input is not decompressible or not well-formed tag data.
    #[error(transparent)]
    Format(#[from] blueprint_nbt::Error),

    /// The root is readable but does not declare the Alpha materials.
    #[error("unsupported schematic materials {found:?} (only Alpha schematics are supported)")]
    UnsupportedFormat { found: Option<String> },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing key: {key}")]
    MissingField { key: &'static str },

    #[error("invalid type for {key} (expected {expected})")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("invalid dimensions: width {width}, height {height}, length {length}")]
    InvalidDimensions { width: i16, height: i16, length: i16 },

    #[error("schematic of {volume} blocks exceeds the maximum of {max}")]
    TooLarge { volume: u64, max: u64 },

    #[error("{key} has {len} entries but the schematic holds {volume} blocks")]
    ArrayTooShort {
        key: &'static str,
        len: usize,
        volume: usize,
    },

    #[error("tile entity #{index} has no int {key:?} coordinate")]
    MalformedTileEntity { index: usize, key: &'static str },

    #[error("block {block_id} has a tile entity of type {found:?} (expected {expected:?})")]
    TileEntityMismatch {
        block_id: u8,
        expected: &'static str,
        found: String,
    },
}

/// Why a single cell was replaced with air.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum BlockError {
    #[error("unknown block id {0}")]
    UnknownBlock(u8),

    #[error("invalid data value {data} for block {id}")]
    InvalidData { id: u8, data: u8 },

    #[error("missing key: {key}")]
    MissingField { key: &'static str },

    #[error("invalid type for {key} (expected {expected})")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("item slot {slot} is out of range for {capacity} slots")]
    SlotOutOfRange { slot: i8, capacity: usize },

    #[error("unknown skull type {0}")]
    UnknownSkullType(i8),

    #[error("tile entity has no string id")]
    MissingTileEntityId,
}
