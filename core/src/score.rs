use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

pub const WIN_BASE_SCORE: u32 = 1000;
pub const UNUSED_MOVE_BONUS: u32 = 10;

/// Final result of a game, fixed once the engine reaches a terminal state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// `1000 + 10` for every move left unused.
    pub const fn for_win(move_limit: Moves, moves: Moves) -> Self {
        let unused = move_limit.saturating_sub(moves) as u32;
        Self(WIN_BASE_SCORE + unused * UNUSED_MOVE_BONUS)
    }

    /// Filled percentage, rounded down.
    pub const fn for_loss(filled: CellCount, total: CellCount) -> Self {
        if total == 0 {
            return Self(0);
        }
        Self(filled as u32 * 100 / total as u32)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Score> for u32 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rewards_unused_moves() {
        assert_eq!(Score::for_win(20, 1), Score::new(1190));
        assert_eq!(Score::for_win(20, 20), Score::new(1000));
    }

    #[test]
    fn loss_floors_filled_percentage() {
        assert_eq!(Score::for_loss(99, 100), Score::new(99));
        assert_eq!(Score::for_loss(2, 3), Score::new(66));
        assert_eq!(Score::for_loss(0, 324), Score::new(0));
    }
}
