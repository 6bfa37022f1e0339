//! Redstone wire orientation.
//!
//! The file stores only the power level of a wire. Which way it runs depends
//! on what surrounds it, so the shape is worked out after decoding from the
//! four horizontal neighbors of every wire cell.

use crate::block::{Block, BlockKind, Direction};
use crate::grid::{Slice, SliceStack};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Axis {
    EastWest,
    NorthSouth,
}

/// How a wire is drawn. Junction directions name the cell a piece would
/// occupy in a 3x3 grid of wire: a corner running from the south to the east
/// sits in the north-west cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub enum WireShape {
    /// Connected on all four sides, or on none.
    #[default]
    Cross,
    Line(Axis),
    /// Connected on two adjacent sides.
    Corner(Direction),
    /// Connected on three sides. The direction is the unconnected side.
    Tee(Direction),
}

impl WireShape {
    pub fn from_neighbors(north: bool, east: bool, south: bool, west: bool) -> Self {
        match (north, east, south, west) {
            (false, false, false, false) | (true, true, true, true) => Self::Cross,
            (false, _, false, _) => Self::Line(Axis::EastWest),
            (_, false, _, false) => Self::Line(Axis::NorthSouth),
            (false, true, true, false) => Self::Corner(Direction::NorthWest),
            (false, false, true, true) => Self::Corner(Direction::NorthEast),
            (true, false, false, true) => Self::Corner(Direction::SouthEast),
            (true, true, false, false) => Self::Corner(Direction::SouthWest),
            (false, true, true, true) => Self::Tee(Direction::North),
            (true, false, true, true) => Self::Tee(Direction::East),
            (true, true, false, true) => Self::Tee(Direction::South),
            (true, true, true, false) => Self::Tee(Direction::West),
        }
    }
}

/// Block ids that wire visually connects to.
const CONNECTING_IDS: &[u8] = &[
    28,  // detector rail
    55,  // redstone wire
    69,  // lever
    70,  // stone pressure plate
    72,  // wooden pressure plate
    75,  // redstone torch (off)
    76,  // redstone torch (on)
    77,  // stone button
    93,  // repeater (off)
    94,  // repeater (on)
    143, // wooden button
    146, // trapped chest
    147, // light weighted pressure plate
    148, // heavy weighted pressure plate
    149, // comparator (off)
    150, // comparator (on)
    151, // daylight sensor
    152, // block of redstone
];

/// Returns `true` if wire next to `block` turns toward it.
pub fn connects_to_wire(block: &Block) -> bool {
    CONNECTING_IDS.contains(&block.id)
}

impl Slice {
    /// Sets the shape of every wire in this slice from its neighbors. North
    /// is the previous row, east the next column.
    pub fn connect_redstone_wires(&mut self) {
        let connects = |column: Option<usize>, row: Option<usize>| match (column, row) {
            (Some(column), Some(row)) => self.get(column, row).is_some_and(connects_to_wire),
            _ => false,
        };

        let mut shapes = vec![];

        for (row, blocks) in self.rows().enumerate() {
            for (column, block) in blocks.iter().enumerate() {
                if !matches!(block.kind, BlockKind::RedstoneWire(_)) {
                    continue;
                }

                let shape = WireShape::from_neighbors(
                    connects(Some(column), row.checked_sub(1)),
                    connects(column.checked_add(1), Some(row)),
                    connects(Some(column), row.checked_add(1)),
                    connects(column.checked_sub(1), Some(row)),
                );

                shapes.push((column, row, shape));
            }
        }

        for (column, row, shape) in shapes {
            if let Some(Block {
                kind: BlockKind::RedstoneWire(wire),
                ..
            }) = self.get_mut(column, row)
            {
                wire.shape = shape;
            }
        }
    }
}

impl SliceStack {
    /// Runs [`Slice::connect_redstone_wires`] on every slice.
    pub fn connect_redstone_wires(&mut self) {
        for slice in self.iter_mut() {
            slice.connect_redstone_wires();
        }
    }
}
