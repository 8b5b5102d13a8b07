#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use parse::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod parse;
mod types;

/// Smallest playable grid edge.
pub const MIN_GRID_SIZE: Coord = 3;

/// Largest grid edge the selection grammar (`A1` through `J10`) can address.
pub const MAX_GRID_SIZE: Coord = 10;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates the player-facing ranges: the grid edge must lie within
    /// `MIN_GRID_SIZE..=MAX_GRID_SIZE` and the mine count within
    /// `1..=max_mines(size)`.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size < MIN_GRID_SIZE || size > MAX_GRID_SIZE {
            return Err(GameError::InvalidSize);
        }
        let max = Self::max_mines(size);
        if mines < 1 || mines > max {
            return Err(GameError::InvalidMineCount { max });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    /// Mine cap for a grid edge: 35% of the cell count, rounded down. Exact in
    /// integer arithmetic for every edge up to `MAX_GRID_SIZE`.
    pub const fn max_mines(size: Coord) -> CellCount {
        mult(size, size) * 35 / 100
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

/// The fixed mine positions for one game, stored as a square boolean mask.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from a boolean mine mask. The mask must be square and
    /// no wider than the selection grammar can address.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols || rows == 0 || rows > MAX_GRID_SIZE as usize {
            return Err(GameError::InvalidBoardShape);
        }
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size as usize, size as usize));

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        self.mine_mask.dim().0 as Coord
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mines among the up to 8 in-bounds neighbors. The queried
    /// square itself is never counted.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}
