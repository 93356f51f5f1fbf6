#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use agent::*;
pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod agent;
mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod solver;
mod types;

/// Episode parameters the agent consumes once at construction.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps the dimensions to at least one cell and the mine count to what
    /// fits while leaving one safe cell to start from.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.max(1);
        let size_y = size_y.max(1);
        let mines = mines.min(mult(size_x, size_y).saturating_sub(1));
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Ground-truth mine placement. Owned by the host side (the simulation engine,
/// the generator, and the tests); the agent itself never sees one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mines: Array2<bool>,
    count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let count = mines.iter().filter(|&&mined| mined).count() as CellCount;
        Self { mines, count }
    }

    pub fn from_mine_coords(size: Coord2, coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        for &pos in coords {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(AgentError::InvalidCoords);
            }
            mines[pos.to_nd_index()] = true;
        }
        Ok(Self::from_mine_mask(mines))
    }

    pub fn size(&self) -> Coord2 {
        self.mines.bounds()
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(AgentError::InvalidCoords)
        }
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mines[coords.to_nd_index()]
    }

    /// The clue value the host reports for a safe cell.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mines
            .iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }
}
