#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use color::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use room::*;
pub use score::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod analysis;
mod color;
mod difficulty;
mod engine;
mod error;
mod generator;
mod room;
mod score;
mod session;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub move_limit: Moves,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, move_limit: Moves) -> Self {
        Self { size, move_limit }
    }

    pub fn new(size: Coord, move_limit: Moves) -> Result<Self> {
        if size == 0 || move_limit == 0 {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new_unchecked(size, move_limit))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

/// Square grid of palette colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: Array2<Color>,
}

#[derive(Deserialize)]
struct RawBoard {
    cells: Array2<Color>,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        Self::from_cells(raw.cells)
    }
}

impl Board {
    pub fn from_cells(cells: Array2<Color>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows == 0 || rows != cols || rows > Coord::MAX as usize {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    pub fn from_rows<R: AsRef<[Color]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        if size == 0 || size > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }
        let mut flat = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return Err(GameError::InvalidBoardShape);
            }
            flat.extend_from_slice(row);
        }
        let cells =
            Array2::from_shape_vec((size, size), flat).map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_cells(cells)
    }

    pub fn filled(size: Coord, color: Color) -> Result<Self> {
        Self::from_cells(Array2::from_elem((usize::from(size), usize::from(size)), color))
    }

    pub fn size(&self) -> Coord {
        // from_cells guarantees the side fits in a Coord
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn color_at(&self, coords: Coord2) -> Color {
        self[coords]
    }

    pub fn cells(&self) -> &Array2<Color> {
        &self.cells
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn paint(&mut self, coords: Coord2, color: Color) {
        self.cells[coords.to_nd_index()] = color;
    }
}

impl Index<Coord2> for Board {
    type Output = Color;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Pick was ignored: same color as the region, or the game is over.
    NoChange,
    /// Move was consumed and the game goes on.
    Expanded,
    Won(Score),
    Lost(Score),
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won(_) | Self::Lost(_))
    }

    pub const fn score(self) -> Option<Score> {
        match self {
            Self::Won(score) | Self::Lost(score) => Some(score),
            Self::NoChange | Self::Expanded => None,
        }
    }
}
