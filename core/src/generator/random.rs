use ndarray::Array2;

use super::*;

/// Draws every cell independently and uniformly from the palette.
///
/// There is no solvability check: some boards cannot be cleared within the move limit.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let side = usize::from(config.size.max(1));
        log::trace!("generating {side}x{side} board from seed {}", self.seed);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let cells = Array2::from_shape_simple_fn((side, side), || {
            Color::PALETTE[rng.random_range(0..Color::COUNT)]
        });

        Board { cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_board() {
        let config = Difficulty::Medium.config();

        let a = RandomBoardGenerator::new(42).generate(config);
        let b = RandomBoardGenerator::new(42).generate(config);

        assert_eq!(a, b);
        assert_eq!(a.size(), 14);
    }

    #[test]
    fn different_seeds_differ() {
        let config = Difficulty::Hard.config();

        let a = RandomBoardGenerator::new(1).generate(config);
        let b = RandomBoardGenerator::new(2).generate(config);

        assert_ne!(a, b);
    }

    #[test]
    fn large_board_uses_whole_palette() {
        let board = RandomBoardGenerator::new(7).generate(Difficulty::Hard.config());

        for color in Color::PALETTE {
            assert!(board.cells().iter().any(|&cell| cell == color));
        }
    }
}
