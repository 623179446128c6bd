use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only projection of a [`FloodEngine`] for hosts to render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord,
    pub colors: Array2<Color>,
    pub region: Array2<bool>,
    pub region_color: Color,
    pub moves: Moves,
    pub move_limit: Moves,
    pub state: EngineState,
    pub score: Option<Score>,
}

impl BoardView {
    pub fn from_engine(engine: &FloodEngine) -> Self {
        Self {
            size: engine.size(),
            colors: engine.board().cells().clone(),
            region: engine.region_mask().clone(),
            region_color: engine.region_color(),
            moves: engine.moves(),
            move_limit: engine.move_limit(),
            state: engine.state(),
            score: engine.score(),
        }
    }

    pub fn filled_count(&self) -> CellCount {
        // bounded by the board's CellCount-sized area
        self.region.iter().filter(|&&owned| owned).count() as CellCount
    }

    pub fn filled_percent(&self) -> f64 {
        let total = mult(self.size, self.size);
        if total == 0 {
            return 0.0;
        }
        f64::from(self.filled_count()) * 100.0 / f64::from(total)
    }

    pub fn color_at(&self, coords: Coord2) -> Color {
        self.colors[coords.to_nd_index()]
    }

    pub fn in_region(&self, coords: Coord2) -> bool {
        self.region[coords.to_nd_index()]
    }
}
