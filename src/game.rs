//! Core game state and logic

use crate::bag::Bag;
use crate::clock::SessionClock;
use crate::grid::Grid;
use crate::movegen::Placement;
use crate::piece::Piece;
use crate::score::{ClearEvent, Score};
use crate::tetromino::{RotationDirection, TetrominoType};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Number of upcoming pieces exposed to the renderer
pub const PREVIEW_COUNT: usize = 5;

/// Diagonal neighbours of the piece anchor checked for T-spins
const T_CORNERS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Hold,
    HardDrop,
    Reset,
}

/// A play session: the grid, the falling piece, hold, queue and scoring.
#[derive(Debug, Clone)]
pub struct Game<R: RngCore = ChaCha8Rng> {
    grid: Grid,
    current: Piece,
    hold_piece: Option<Piece>,
    /// Whether hold has been used this piece
    hold_used: bool,
    bag: Bag<R>,
    score: Score,
    pieces_placed: u32,
    /// Set by a rotation that changed the piece, cleared by any movement
    last_move_was_rotation: bool,
    game_over: bool,
    clock: SessionClock,
    last_clear: Option<ClearEvent>,
    preview_count: usize,
}

impl Game<ChaCha8Rng> {
    /// Create a game whose piece sequence is fixed by `seed`
    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Self {
        Self::with_rng(rows, cols, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Game<R> {
    /// Create a game drawing pieces from the given random source
    pub fn with_rng(rows: usize, cols: usize, rng: R) -> Self {
        let mut bag = Bag::with_rng(rng);
        let current = Piece::new(bag.next());

        let mut game = Self {
            grid: Grid::new(rows, cols),
            current,
            hold_piece: None,
            hold_used: false,
            bag,
            score: Score::new(),
            pieces_placed: 0,
            last_move_was_rotation: false,
            game_over: false,
            clock: SessionClock::new(),
            last_clear: None,
            preview_count: PREVIEW_COUNT,
        };
        // a board too narrow or short for the spawn area ends immediately
        if game.current.collides(&game.grid) {
            game.top_out();
        }
        game
    }

    /// Limit how many upcoming pieces `preview` reports (1-5)
    pub fn with_preview(mut self, count: usize) -> Self {
        self.preview_count = count.clamp(1, PREVIEW_COUNT);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn held(&self) -> Option<&Piece> {
        self.hold_piece.as_ref()
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// Get preview of next pieces
    pub fn preview(&self) -> Vec<TetrominoType> {
        self.bag.preview(self.preview_count)
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.score.lines
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn last_move_was_rotation(&self) -> bool {
        self.last_move_was_rotation
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The most recent lock, if it cleared lines
    pub fn last_clear(&self) -> Option<&ClearEvent> {
        self.last_clear.as_ref()
    }

    /// Advance the session clock by one frame
    pub fn tick(&mut self, dt: Duration) {
        if !self.game_over {
            self.clock.advance(dt);
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Process an action. After game over only `Reset` does anything.
    pub fn process_action(&mut self, action: Action) {
        if self.game_over && action != Action::Reset {
            return;
        }
        match action {
            Action::MoveLeft => {
                self.move_left();
            }
            Action::MoveRight => {
                self.move_right();
            }
            Action::SoftDrop => {
                self.move_down();
            }
            Action::RotateCw => {
                self.rotate_cw();
            }
            Action::RotateCcw => {
                self.rotate_ccw();
            }
            Action::Hold => {
                self.hold();
            }
            Action::HardDrop => {
                self.hard_drop();
            }
            Action::Reset => self.reset(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.shift(0, 1)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(RotationDirection::CounterClockwise)
    }

    fn shift(&mut self, dx: i32, dy: i32) -> bool {
        let moved = self.current.move_by(dx, dy, &self.grid);
        if moved {
            self.last_move_was_rotation = false;
        }
        moved
    }

    fn rotate(&mut self, direction: RotationDirection) -> bool {
        let before = self.current;
        self.current.rotate(&self.grid, direction);
        // a kick counts as long as the piece actually changed
        let changed = self.current != before;
        self.last_move_was_rotation = changed;
        changed
    }

    /// Drop the piece to the floor, lock it and spawn the next one.
    /// Returns the number of lines cleared.
    pub fn hard_drop(&mut self) -> usize {
        if self.current.hard_drop(&self.grid) > 0 {
            self.last_move_was_rotation = false;
        }
        let cleared = self.lock_piece();
        if !self.game_over {
            self.spawn_next();
        }
        cleared
    }

    /// Move the current piece straight to a pre-drop placement, then hard
    /// drop it. Returns false, changing nothing, if the placement collides.
    pub fn place(&mut self, placement: Placement) -> bool {
        let mut candidate = self.current;
        candidate.x = placement.x;
        candidate.y = placement.y;
        candidate.rotation = placement.rotation;
        if candidate.collides(&self.grid) {
            debug!(?placement, "rejected colliding placement");
            return false;
        }
        self.current = candidate;
        self.last_move_was_rotation = false;
        self.hard_drop();
        true
    }

    /// Swap the current piece with the held one, or stash it and take the
    /// next piece. Only once per drop; returns false when ignored.
    pub fn hold(&mut self) -> bool {
        if self.hold_used {
            return false;
        }

        let mut outgoing = self.current;
        outgoing.reset_orientation();

        match self.hold_piece.replace(outgoing) {
            Some(mut held) => {
                held.reset_orientation();
                self.current = held;
                self.last_move_was_rotation = false;
                if self.current.collides(&self.grid) {
                    self.top_out();
                }
            }
            None => self.spawn_next(),
        }

        self.hold_used = true;
        debug!(
            held = %outgoing.piece_type,
            current = %self.current.piece_type,
            "hold"
        );
        true
    }

    /// Pop the next piece from the queue into play
    pub fn spawn_next(&mut self) {
        self.current = Piece::new(self.bag.next());
        self.hold_used = false;
        self.last_move_was_rotation = false;
        trace!(piece = %self.current.piece_type, "spawn");

        if self.current.collides(&self.grid) {
            self.top_out();
        }
    }

    /// Write the current piece into the grid and resolve line clears.
    /// Returns the number of lines cleared.
    pub fn lock_piece(&mut self) -> usize {
        // spin status depends on the grid *before* the piece is written
        let is_spin = self.is_immobile_spin();
        let piece = self.current;

        if !piece.lock_into(&mut self.grid) {
            warn!(
                piece = %piece.piece_type,
                x = piece.x,
                y = piece.y,
                "piece locked above the playfield"
            );
            self.game_over = true;
        }
        self.pieces_placed += 1;

        self.clear_lines(is_spin)
    }

    /// Whether the current piece, as it sits now, scores as a spin
    pub fn is_immobile_spin(&self) -> bool {
        if !self.last_move_was_rotation {
            return false;
        }

        let piece = &self.current;
        let immobile = piece.check_collision(&self.grid, -1, 0)
            && piece.check_collision(&self.grid, 1, 0)
            && piece.check_collision(&self.grid, 0, 1);

        if piece.is_t_piece() {
            immobile || self.count_t_spin_corners() >= 3
        } else {
            immobile
        }
    }

    /// Blocked diagonal neighbours of the current piece's anchor. Walls and
    /// the floor count as blocked; the sky above the grid does not.
    fn count_t_spin_corners(&self) -> usize {
        let (x, y) = (self.current.x, self.current.y);
        T_CORNERS
            .iter()
            .filter(|&&(dx, dy)| self.grid.blocks(x + dx, y + dy))
            .count()
    }

    fn clear_lines(&mut self, is_spin: bool) -> usize {
        let cleared = self.grid.clear_lines();
        if cleared == 0 {
            self.score.reset_combo();
            self.last_clear = None;
            return 0;
        }

        let perfect_clear = self.grid.is_empty();
        let event = self.score.record_clear(cleared, is_spin, perfect_clear);
        let piece = &self.current;
        info!(
            clear = event.clear_type.map_or("none", |c| c.name()),
            spin = event.is_spin,
            b2b = event.back_to_back,
            combo = event.combo,
            perfect_clear = event.perfect_clear,
            points = event.points,
            score = event.total,
            piece = %piece.piece_type,
            x = piece.x,
            y = piece.y,
            rotation = piece.rotation.index(),
            last_move_was_rotation = self.last_move_was_rotation,
            "line clear"
        );
        self.last_clear = Some(event);
        cleared
    }

    fn top_out(&mut self) {
        warn!(
            piece = %self.current.piece_type,
            pieces = self.pieces_placed,
            score = self.score.points,
            "spawn blocked, game over"
        );
        self.game_over = true;
    }

    /// Start over on an empty grid with a fresh queue, keeping this session
    pub fn reset(&mut self) {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        self.grid = Grid::new(rows, cols);
        self.bag.reset();
        self.hold_piece = None;
        self.score = Score::new();
        self.pieces_placed = 0;
        self.game_over = false;
        self.last_clear = None;
        self.clock.reset();
        self.spawn_next();
        info!(rows, cols, "session reset");
    }
}
