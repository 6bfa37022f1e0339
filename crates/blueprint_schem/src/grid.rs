//! The decoded block grid.

use std::slice;

use crate::block::Block;
use crate::BlockError;

/// Position of a block in the flat `Blocks` and `Data` arrays.
///
/// `x` is the column, `y` the row and `z` the slice. Columns vary fastest,
/// then rows, then slices.
pub const fn flat_index(x: usize, y: usize, z: usize, width: usize, length: usize) -> usize {
    x + (y + z * width) * length
}

/// One horizontal layer: `width` rows of `length` columns.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Slice {
    width: usize,
    length: usize,
    /// Row-major.
    blocks: Vec<Block>,
}

impl Slice {
    /// Creates a slice filled with air.
    pub fn new(width: usize, length: usize) -> Self {
        Self {
            width,
            length,
            blocks: vec![Block::AIR; width * length],
        }
    }

    /// `blocks` must hold exactly `width * length` blocks in row-major order.
    pub(crate) fn from_blocks(width: usize, length: usize, blocks: Vec<Block>) -> Self {
        debug_assert_eq!(blocks.len(), width * length);

        Self {
            width,
            length,
            blocks,
        }
    }

    /// Number of rows.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of columns.
    pub fn length(&self) -> usize {
        self.length
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.length && row < self.width).then(|| row * self.length + column)
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Block> {
        self.index(column, row).map(|idx| &self.blocks[idx])
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Block> {
        self.index(column, row).map(|idx| &mut self.blocks[idx])
    }

    /// Replaces a block, returning the previous one. Returns `None` and does
    /// nothing if the position is out of bounds.
    pub fn set(&mut self, column: usize, row: usize, block: Block) -> Option<Block> {
        self.get_mut(column, row)
            .map(|slot| std::mem::replace(slot, block))
    }

    /// Iterates over the rows from north to south. Always yields
    /// [`width`](Self::width) rows, even when they have no columns.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Block]> + '_ {
        (0..self.width).map(move |row| &self.blocks[row * self.length..(row + 1) * self.length])
    }
}

/// A cell that could not be decoded and was replaced with air.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CellFault {
    pub slice: usize,
    pub column: usize,
    pub row: usize,
    /// The id found in the file.
    pub block_id: u8,
    pub error: BlockError,
}

/// A stack of equally sized [`Slice`]s, bottom first.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SliceStack {
    width: usize,
    length: usize,
    slices: Vec<Slice>,
    faults: Vec<CellFault>,
}

impl SliceStack {
    /// Creates a stack of `height` slices filled with air.
    pub fn new(height: usize, width: usize, length: usize) -> Self {
        Self {
            width,
            length,
            slices: vec![Slice::new(width, length); height],
            faults: vec![],
        }
    }

    pub(crate) fn from_slices(
        width: usize,
        length: usize,
        slices: Vec<Slice>,
        faults: Vec<CellFault>,
    ) -> Self {
        Self {
            width,
            length,
            slices,
            faults,
        }
    }

    /// Number of slices.
    pub fn height(&self) -> usize {
        self.slices.len()
    }

    /// Number of rows in each slice.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of columns in each slice.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn slice(&self, z: usize) -> Option<&Slice> {
        self.slices.get(z)
    }

    pub fn slice_mut(&mut self, z: usize) -> Option<&mut Slice> {
        self.slices.get_mut(z)
    }

    pub fn get(&self, z: usize, column: usize, row: usize) -> Option<&Block> {
        self.slice(z)?.get(column, row)
    }

    pub fn set(&mut self, z: usize, column: usize, row: usize, block: Block) -> Option<Block> {
        self.slice_mut(z)?.set(column, row, block)
    }

    /// Iterates over the slices from the bottom up.
    pub fn iter(&self) -> slice::Iter<'_, Slice> {
        self.slices.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Slice> {
        self.slices.iter_mut()
    }

    /// Cells that were replaced with air while decoding.
    pub fn faults(&self) -> &[CellFault] {
        &self.faults
    }

    /// Returns `true` if any cell failed to decode.
    pub fn has_cell_errors(&self) -> bool {
        !self.faults.is_empty()
    }
}

impl<'a> IntoIterator for &'a SliceStack {
    type Item = &'a Slice;
    type IntoIter = slice::Iter<'a, Slice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
