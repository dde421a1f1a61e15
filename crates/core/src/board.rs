//! Board module - the fixed 3D grid of settled cells
//!
//! The board is a `width x depth x height` grid stored as one flat vector.
//! Height is the outer (layer) dimension; inside a layer cells are addressed
//! row-major with `z` as the fast-varying axis:
//!
//! ```text
//! index(x, y, z) = (x * depth + z) + y * width * depth
//! ```
//!
//! With square layers (`width == depth`) this is the familiar
//! `(x * width + z) + y * width * width`. Striding `x` by `depth` keeps
//! rectangular layers from aliasing cells or running past the layer.
//!
//! Each cell holds a packed RGB value (see [`crate::color`]); 0 means empty.
//! The falling block is never stored here until it is merged.

use glam::IVec3;

use crate::color::EMPTY_CELL;

/// The settled-cell grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    depth: i32,
    height: i32,
    /// Flat array of packed colors, layer-major (see module docs)
    cells: Vec<u32>,
}

impl Board {
    /// Create an empty board
    ///
    /// Dimensions are fixed for the lifetime of the board. Panics on a zero
    /// dimension; configuration is validated before a board is built.
    pub fn new(width: u32, depth: u32, height: u32) -> Self {
        assert!(
            width > 0 && depth > 0 && height > 0,
            "board dimensions must be positive"
        );
        let len = (width as usize) * (depth as usize) * (height as usize);
        Self {
            width: width as i32,
            depth: depth as i32,
            height: height as i32,
            cells: vec![EMPTY_CELL; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells in one horizontal layer
    #[inline(always)]
    fn layer_len(&self) -> usize {
        (self.width as usize) * (self.depth as usize)
    }

    #[inline(always)]
    fn index(&self, pos: IVec3) -> usize {
        (pos.x as usize) * (self.depth as usize)
            + (pos.z as usize)
            + (pos.y as usize) * self.layer_len()
    }

    /// Check if position lies inside the grid
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && pos.x < self.width
            && pos.y < self.height
            && pos.z < self.depth
    }

    /// Check if an in-bounds cell is empty
    ///
    /// Callers must check [`Board::contains`] first; an out-of-range position is
    /// a programmer error.
    pub fn is_empty(&self, pos: IVec3) -> bool {
        debug_assert!(self.contains(pos), "is_empty out of bounds: {pos}");
        self.cells[self.index(pos)] == EMPTY_CELL
    }

    /// Get the packed value at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: IVec3) -> Option<u32> {
        if self.contains(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Write a packed value into an in-bounds cell
    ///
    /// No occupancy check: callers only fill cells they know are valid.
    pub fn fill(&mut self, pos: IVec3, value: u32) {
        debug_assert!(self.contains(pos), "fill out of bounds: {pos}");
        let idx = self.index(pos);
        self.cells[idx] = value;
    }

    /// Check if every cell of a horizontal layer is occupied
    pub fn is_layer_filled(&self, layer: usize) -> bool {
        let len = self.layer_len();
        let start = layer * len;
        self.cells[start..start + len]
            .iter()
            .all(|&cell| cell != EMPTY_CELL)
    }

    /// Clear a layer and shift every layer above it down by one
    ///
    /// Relative order of the shifted layers is preserved and the top layer
    /// ends up empty.
    pub fn erase_layer(&mut self, layer: usize) {
        let len = self.layer_len();
        let total = self.cells.len();
        let start = layer * len;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + len..total, start);
        self.cells[total - len..].fill(EMPTY_CELL);
    }

    /// Erase all filled layers and return how many were removed
    ///
    /// Scans bottom-up. After an erase the scan index stays put, since the
    /// layer that moved down into it has not been checked yet.
    pub fn erase_filled_layers(&mut self) -> usize {
        let mut erased = 0;
        let mut layer = 0;
        while layer < self.height as usize {
            if self.is_layer_filled(layer) {
                self.erase_layer(layer);
                erased += 1;
            } else {
                layer += 1;
            }
        }
        erased
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Cells of one horizontal layer, `x`-major with `z` fast-varying
    pub fn layer(&self, layer: usize) -> &[u32] {
        let len = self.layer_len();
        &self.cells[layer * len..(layer + 1) * len]
    }

    /// Fill a whole layer with one value (test and benchmark setup)
    pub fn fill_layer(&mut self, layer: usize, value: u32) {
        let len = self.layer_len();
        self.cells[layer * len..(layer + 1) * len].fill(value);
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_layer_major_with_z_fast() {
        let board = Board::new(3, 3, 4);
        assert_eq!(board.index(IVec3::new(0, 0, 0)), 0);
        assert_eq!(board.index(IVec3::new(0, 0, 1)), 1);
        assert_eq!(board.index(IVec3::new(1, 0, 0)), 3);
        assert_eq!(board.index(IVec3::new(0, 1, 0)), 9);
        assert_eq!(board.index(IVec3::new(2, 3, 2)), 35);
    }

    #[test]
    fn test_rectangular_layers_do_not_alias() {
        let board = Board::new(2, 3, 2);
        let mut seen = std::collections::HashSet::new();
        for y in 0..2 {
            for x in 0..2 {
                for z in 0..3 {
                    assert!(seen.insert(board.index(IVec3::new(x, y, z))));
                }
            }
        }
        assert_eq!(seen.len(), board.cells().len());
    }

    #[test]
    fn test_square_layers_stride_by_width() {
        let board = Board::new(4, 4, 3);
        for y in 0..3 {
            for x in 0..4 {
                for z in 0..4 {
                    let expected = (x * 4 + z + y * 4 * 4) as usize;
                    assert_eq!(board.index(IVec3::new(x, y, z)), expected);
                }
            }
        }
    }

    #[test]
    fn test_erase_layer_keeps_order_above() {
        let mut board = Board::new(2, 2, 4);
        board.fill_layer(0, 1);
        board.fill_layer(1, 2);
        board.fill(IVec3::new(1, 2, 1), 3);
        board.fill_layer(3, 4);

        board.erase_layer(0);

        assert!(board.layer(0).iter().all(|&c| c == 2));
        assert_eq!(board.get(IVec3::new(1, 1, 1)), Some(3));
        assert!(board.layer(2).iter().all(|&c| c == 4));
        assert!(board.layer(3).iter().all(|&c| c == EMPTY_CELL));
    }

    #[test]
    fn test_erase_top_layer_only_clears_it() {
        let mut board = Board::new(2, 2, 3);
        board.fill_layer(1, 5);
        board.fill_layer(2, 6);

        board.erase_layer(2);

        assert!(board.layer(1).iter().all(|&c| c == 5));
        assert!(board.layer(2).iter().all(|&c| c == EMPTY_CELL));
    }
}
