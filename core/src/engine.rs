use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

/// Flood-fill game state: the board, the region anchored at the origin, and move accounting.
///
/// The region is always the 4-connected component of `region_color` cells containing
/// [`ORIGIN`]. It only ever grows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEngine")]
pub struct FloodEngine {
    board: Board,
    region: Array2<bool>,
    region_size: CellCount,
    region_color: Color,
    moves: Moves,
    move_limit: Moves,
    state: EngineState,
    score: Option<Score>,
}

#[derive(Deserialize)]
struct RawEngine {
    board: Board,
    region: Array2<bool>,
    region_size: CellCount,
    region_color: Color,
    moves: Moves,
    move_limit: Moves,
    state: EngineState,
    score: Option<Score>,
}

impl TryFrom<RawEngine> for FloodEngine {
    type Error = GameError;

    /// Accepts a saved game only if its region is the origin component of its board.
    fn try_from(raw: RawEngine) -> Result<Self> {
        let mut rebuilt = Self::try_new(raw.board, raw.move_limit)?;
        if raw.region.dim() != rebuilt.region.dim()
            || raw.region_color != rebuilt.region_color
            || raw.region != rebuilt.region
            || raw.region_size != rebuilt.region_size
            || raw.moves > raw.move_limit
            || raw.state.is_finished() != raw.score.is_some()
        {
            return Err(GameError::InconsistentState);
        }
        rebuilt.moves = raw.moves;
        rebuilt.state = raw.state;
        rebuilt.score = raw.score;
        Ok(rebuilt)
    }
}

impl FloodEngine {
    /// Starts a game on `board`, claiming the origin's component as the initial region.
    ///
    /// Unchecked: a zero move limit is raised to one. Use [`FloodEngine::try_new`] to reject it.
    pub fn new(board: Board, move_limit: Moves) -> Self {
        let size = board.size();
        let region_color = board[ORIGIN];
        let mut engine = Self {
            region: Array2::default((usize::from(size), usize::from(size))),
            board,
            region_size: 0,
            region_color,
            moves: 0,
            move_limit: move_limit.max(1),
            state: EngineState::Playing,
            score: None,
        };
        engine.claim(ORIGIN);
        engine.expand_region(alloc::vec![ORIGIN]);
        log::debug!(
            "new game: {size}x{size}, limit {}, origin {} covers {} cells",
            engine.move_limit,
            engine.region_color,
            engine.region_size
        );
        engine
    }

    pub fn try_new(board: Board, move_limit: Moves) -> Result<Self> {
        if move_limit == 0 {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new(board, move_limit))
    }

    pub fn new_game(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_generator(RandomBoardGenerator::new(seed), difficulty.config())
    }

    pub fn with_generator<G: BoardGenerator>(generator: G, config: GameConfig) -> Self {
        Self::new(generator.generate(config), config.move_limit)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn total_cells(&self) -> CellCount {
        self.board.total_cells()
    }

    pub fn color_at(&self, coords: Coord2) -> Color {
        self.board[coords]
    }

    pub fn region_color(&self) -> Color {
        self.region_color
    }

    pub fn region_mask(&self) -> &Array2<bool> {
        &self.region
    }

    pub fn region_size(&self) -> CellCount {
        self.region_size
    }

    pub fn in_region(&self, coords: Coord2) -> bool {
        self.region[coords.to_nd_index()]
    }

    pub fn moves(&self) -> Moves {
        self.moves
    }

    pub fn move_limit(&self) -> Moves {
        self.move_limit
    }

    pub fn moves_left(&self) -> Moves {
        self.move_limit.saturating_sub(self.moves)
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn filled_fraction(&self) -> f64 {
        f64::from(self.region_size) / f64::from(self.total_cells())
    }

    pub fn is_fully_filled(&self) -> bool {
        self.region_size == self.total_cells()
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_engine(self)
    }

    /// Recolors the region to `color` and absorbs every newly connected cell of that color.
    ///
    /// Picking the current region color, or picking after the game ended, changes nothing and
    /// does not consume a move.
    pub fn choose_color(&mut self, color: Color) -> MoveOutcome {
        if self.state.is_finished() {
            log::debug!("ignoring {color}: game already ended ({:?})", self.state);
            return MoveOutcome::NoChange;
        }

        if color == self.region_color {
            log::debug!("ignoring {color}: region already has that color");
            return MoveOutcome::NoChange;
        }

        let previous_size = self.region_size;
        let frontier = self.repaint_region(color);
        self.region_color = color;
        self.expand_region(frontier);
        self.moves += 1;

        log::trace!(
            "move {}/{}: {color} grew region {} -> {}",
            self.moves,
            self.move_limit,
            previous_size,
            self.region_size
        );

        self.evaluate_termination()
    }

    /// Snapshot transition: returns the state after picking `color`, leaving `self` untouched.
    pub fn with_choice(&self, color: Color) -> (Self, MoveOutcome) {
        let mut next = self.clone();
        let outcome = next.choose_color(color);
        (next, outcome)
    }

    /// Paints every region cell and returns them as the seeds for expansion.
    fn repaint_region(&mut self, color: Color) -> Vec<Coord2> {
        let mut members = Vec::with_capacity(self.region_size.into());
        for ((row, col), &owned) in self.region.indexed_iter() {
            if owned {
                // region shape mirrors the board, so indices always fit a Coord
                let coords = (row as Coord, col as Coord);
                self.board.paint(coords, color);
                members.push(coords);
            }
        }
        members
    }

    /// Depth-first expansion over an explicit worklist; the region mask doubles as the visited set.
    fn expand_region(&mut self, mut to_visit: Vec<Coord2>) {
        while let Some(coords) = to_visit.pop() {
            for neighbor in self.board.iter_neighbors(coords) {
                if self.region[neighbor.to_nd_index()] || self.board[neighbor] != self.region_color
                {
                    continue;
                }
                self.claim(neighbor);
                to_visit.push(neighbor);
            }
        }
    }

    fn claim(&mut self, coords: Coord2) {
        self.region[coords.to_nd_index()] = true;
        self.region_size += 1;
    }

    fn evaluate_termination(&mut self) -> MoveOutcome {
        if self.is_fully_filled() {
            let score = Score::for_win(self.move_limit, self.moves);
            self.end_game(EngineState::Won, score);
            MoveOutcome::Won(score)
        } else if self.moves >= self.move_limit {
            let score = Score::for_loss(self.region_size, self.total_cells());
            self.end_game(EngineState::Lost, score);
            MoveOutcome::Lost(score)
        } else {
            MoveOutcome::Expanded
        }
    }

    fn end_game(&mut self, state: EngineState, score: Score) {
        if self.state.is_finished() {
            return;
        }

        log::debug!("game over after {} moves: {state:?}, score {score}", self.moves);
        self.state = state;
        self.score = Some(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use Color::*;

    fn engine(rows: &[&[Color]], move_limit: Moves) -> FloodEngine {
        FloodEngine::new(Board::from_rows(rows).unwrap(), move_limit)
    }

    /// Independent breadth-first recomputation of the origin component.
    fn origin_component(engine: &FloodEngine) -> Array2<bool> {
        let board = engine.board();
        let target = board[ORIGIN];
        let mut seen: Array2<bool> = Array2::default(board.cells().dim());
        let mut queue = VecDeque::from([ORIGIN]);
        seen[ORIGIN.to_nd_index()] = true;
        while let Some(coords) = queue.pop_front() {
            for pos in board.iter_neighbors(coords) {
                if !seen[pos.to_nd_index()] && board[pos] == target {
                    seen[pos.to_nd_index()] = true;
                    queue.push_back(pos);
                }
            }
        }
        seen
    }

    #[test]
    fn new_game_claims_origin_component() {
        let engine = engine(&[&[Coral, Coral, Teal], &[Teal, Coral, Teal], &[Coral, Sun, Sun]], 5);

        assert_eq!(engine.region_color(), Coral);
        assert_eq!(engine.region_size(), 3);
        assert!(engine.in_region((0, 0)));
        assert!(engine.in_region((0, 1)));
        assert!(engine.in_region((1, 1)));
        assert!(!engine.in_region((2, 0)));
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.state(), EngineState::Playing);
    }

    #[test]
    fn choosing_color_absorbs_adjacent_cells_transitively() {
        // [[A, A], [B, C]] with A = Coral, B = Teal, C = Sun
        let mut engine = engine(&[&[Coral, Coral], &[Teal, Sun]], 5);
        assert_eq!(engine.region_size(), 2);

        let outcome = engine.choose_color(Teal);

        assert_eq!(outcome, MoveOutcome::Expanded);
        assert_eq!(engine.region_color(), Teal);
        assert_eq!(engine.region_size(), 3);
        assert!(engine.in_region((1, 0)));
        assert!(!engine.in_region((1, 1)));
        assert_eq!(engine.color_at((0, 0)), Teal);
        assert_eq!(engine.color_at((0, 1)), Teal);
        assert_eq!(engine.color_at((1, 1)), Sun);
        assert_eq!(engine.moves(), 1);

        let outcome = engine.choose_color(Sun);

        assert_eq!(outcome, MoveOutcome::Won(Score::new(1030)));
        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.moves(), 2);
    }

    #[test]
    fn expansion_follows_chains_beyond_direct_neighbors() {
        let mut engine = engine(
            &[
                &[Coral, Teal, Teal, Teal],
                &[Sun, Sun, Sun, Teal],
                &[Teal, Teal, Sun, Teal],
                &[Teal, Sun, Sun, Teal],
            ],
            10,
        );

        engine.choose_color(Teal);

        assert_eq!(engine.region_size(), 7);
        assert!(engine.in_region((3, 3)));
        assert!(!engine.in_region((2, 0)));
        assert_eq!(engine.region_mask(), &origin_component(&engine));
    }

    #[test]
    fn same_color_is_free_and_ineffective() {
        let mut engine = engine(&[&[Coral, Teal], &[Sun, Mint]], 5);
        let before = engine.clone();

        let outcome = engine.choose_color(Coral);

        assert_eq!(outcome, MoveOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn monochrome_board_wins_on_first_move() {
        let mut engine = FloodEngine::new(Board::filled(10, Mint).unwrap(), 20);
        assert!(engine.is_fully_filled());
        assert_eq!(engine.filled_fraction(), 1.0);
        assert_eq!(engine.state(), EngineState::Playing);

        let outcome = engine.choose_color(Peach);

        assert_eq!(outcome, MoveOutcome::Won(Score::new(1190)));
        assert_eq!(engine.score(), Some(Score::new(1190)));
    }

    #[test]
    fn single_move_budget_loses_with_floored_percentage() {
        // needs Teal then Sun to finish
        let mut engine = engine(&[&[Coral, Teal, Sun], &[Teal, Sun, Sun], &[Sun, Sun, Sun]], 1);

        let outcome = engine.choose_color(Teal);

        assert_eq!(engine.region_size(), 3);
        assert_eq!(outcome, MoveOutcome::Lost(Score::new(33)));
        assert_eq!(engine.state(), EngineState::Lost);
    }

    #[test]
    fn win_takes_precedence_on_last_allowed_move() {
        let mut engine = engine(&[&[Coral, Teal], &[Teal, Teal]], 1);

        let outcome = engine.choose_color(Teal);

        assert_eq!(outcome, MoveOutcome::Won(Score::new(1000)));
        assert_eq!(engine.state(), EngineState::Won);
    }

    #[test]
    fn terminal_state_absorbs_further_picks() {
        let mut engine = engine(&[&[Coral, Teal], &[Sun, Mint]], 1);
        engine.choose_color(Teal);
        assert_eq!(engine.state(), EngineState::Lost);
        let finished = engine.clone();

        for color in Color::PALETTE {
            assert_eq!(engine.choose_color(color), MoveOutcome::NoChange);
        }

        assert_eq!(engine, finished);
    }

    #[test]
    fn won_state_absorbs_further_picks() {
        let mut engine = engine(&[&[Coral, Teal], &[Teal, Teal]], 3);
        assert_eq!(engine.choose_color(Teal), MoveOutcome::Won(Score::new(1020)));
        let finished = engine.clone();

        for color in Color::PALETTE {
            assert_eq!(engine.choose_color(color), MoveOutcome::NoChange);
        }

        assert_eq!(engine, finished);
    }

    #[test]
    fn try_new_rejects_zero_move_limit() {
        let board = Board::filled(2, Sun).unwrap();

        assert_eq!(
            FloodEngine::try_new(board.clone(), 0),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(FloodEngine::try_new(board, 4).unwrap().move_limit(), 4);
        assert_eq!(engine(&[&[Coral]], 0).move_limit(), 1);
    }

    #[test]
    fn saved_game_round_trips() {
        let mut engine = engine(&[&[Coral, Coral], &[Teal, Sun]], 5);
        engine.choose_color(Teal);

        let json = serde_json::to_string(&engine).unwrap();
        let restored: FloodEngine = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, engine);
    }

    #[test]
    fn saved_game_with_mismatched_region_is_rejected() {
        let engine = engine(&[&[Coral, Coral], &[Teal, Sun]], 5);
        let mut json = serde_json::to_value(&engine).unwrap();
        json["region"] = serde_json::json!({"v": 1, "dim": [1, 2], "data": [true, true]});

        assert!(serde_json::from_value::<FloodEngine>(json.clone()).is_err());

        json["region"] = serde_json::to_value(engine.region_mask()).unwrap();
        json["region_size"] = serde_json::json!(4);
        assert!(serde_json::from_value::<FloodEngine>(json).is_err());
    }

    #[test]
    fn with_choice_leaves_original_untouched() {
        let engine = engine(&[&[Coral, Teal], &[Teal, Sun]], 5);

        let (next, outcome) = engine.with_choice(Teal);

        assert_eq!(outcome, MoveOutcome::Expanded);
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.region_size(), 1);
        assert_eq!(next.moves(), 1);
        assert_eq!(next.region_size(), 3);
    }

    #[test]
    fn random_games_keep_region_invariant_and_grow_monotonically() {
        for seed in 0..16 {
            let mut engine = FloodEngine::new_game(Difficulty::Easy, seed);
            assert_eq!(engine.region_mask(), &origin_component(&engine));

            let mut step = 0;
            while !engine.is_finished() {
                let color = Color::PALETTE[(seed as usize + step) % Color::COUNT];
                step += 1;
                let before = engine.region_size();
                engine.choose_color(color);

                assert!(engine.region_size() >= before);
                assert_eq!(engine.region_mask(), &origin_component(&engine));
                assert!(
                    engine
                        .region_mask()
                        .indexed_iter()
                        .filter(|&(_, &owned)| owned)
                        .all(|((r, c), _)| engine.color_at((r as Coord, c as Coord))
                            == engine.region_color())
                );
            }

            match engine.state() {
                EngineState::Won => {
                    let score = engine.score().unwrap().value();
                    assert!((1000..=1000 + 10 * 19).contains(&score));
                }
                EngineState::Lost => {
                    assert!(engine.score().unwrap().value() <= 99);
                    assert_eq!(engine.moves(), engine.move_limit());
                }
                EngineState::Playing => unreachable!(),
            }
        }
    }

    #[test]
    fn new_game_uses_difficulty_table() {
        let engine = FloodEngine::new_game(Difficulty::Hard, 3);

        assert_eq!(engine.size(), 18);
        assert_eq!(engine.move_limit(), 20);
        assert_eq!(engine.region_color(), engine.color_at(ORIGIN));
    }
}
