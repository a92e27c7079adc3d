//! TETRS bot engine: an SRS Tetris session with a move enumerator and
//! search-based bots playing on top of it.

pub mod bag;
pub mod bot;
pub mod clock;
pub mod error;
pub mod eval;
pub mod game;
pub mod grid;
pub mod movegen;
pub mod piece;
pub mod score;
pub mod search;
pub mod settings;
pub mod srs;
pub mod tetromino;

pub use bot::{AlphaBetaPolicy, Bot, Policy, RandomPolicy};
pub use error::{Error, Result};
pub use game::{Action, Game};
pub use grid::{Cell, Grid};
pub use movegen::{generate_moves, DiscoveredMove, Placement, MAX_SEARCH_DEPTH};
pub use piece::Piece;
pub use score::{calculate_score, ClearEvent, Score};
pub use search::{alpha_beta, find_best_move, SearchResult};
pub use settings::Settings;
pub use tetromino::{Rotation, RotationDirection, TetrominoType};
