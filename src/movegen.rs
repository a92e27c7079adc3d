//! Legal move generation for a piece on a grid.
//!
//! A breadth-first search over piece positions: every position reachable with
//! a bounded sequence of primitive commands is hard-dropped, and each
//! distinct resulting board becomes one candidate.

use std::collections::{HashSet, VecDeque};

use crate::game::Action;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::tetromino::{Rotation, RotationDirection};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Longest command sequence explored before the final hard drop
pub const MAX_SEARCH_DEPTH: usize = 30;

/// Commands expanded from every search state, in expansion order
pub const PRIMITIVES: [Action; 5] = [
    Action::MoveLeft,
    Action::MoveRight,
    Action::RotateCw,
    Action::RotateCcw,
    Action::SoftDrop,
];

/// Where a piece sits right before its hard drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
}

impl From<&Piece> for Placement {
    fn from(piece: &Piece) -> Self {
        Self {
            x: piece.x,
            y: piece.y,
            rotation: piece.rotation,
        }
    }
}

/// A candidate move: the pre-drop placement, how to get there, and the board
/// it leaves behind once locked and cleared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredMove {
    pub placement: Placement,
    pub commands: Vec<Action>,
    pub board: Grid,
}

struct SearchState {
    piece: Piece,
    commands: Vec<Action>,
}

/// Enumerate candidate moves with the default depth cap
pub fn generate_moves(piece: &Piece, grid: &Grid) -> Vec<DiscoveredMove> {
    generate_moves_with_depth(piece, grid, MAX_SEARCH_DEPTH)
}

/// Pre-drop placements only, in discovery order
pub fn generate_placements(piece: &Piece, grid: &Grid) -> Vec<Placement> {
    generate_moves(piece, grid)
        .into_iter()
        .map(|m| m.placement)
        .collect()
}

/// Enumerate candidate moves reachable within `max_depth` primitive commands.
///
/// Candidates come out in BFS discovery order, one per distinct final board.
/// A piece that already collides has no moves.
pub fn generate_moves_with_depth(piece: &Piece, grid: &Grid, max_depth: usize) -> Vec<DiscoveredMove> {
    let mut moves = Vec::new();
    if piece.collides(grid) {
        return moves;
    }

    let mut explored: HashSet<Piece> = HashSet::new();
    let mut boards: HashSet<Grid> = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(SearchState {
        piece: *piece,
        commands: Vec::new(),
    });

    while let Some(state) = queue.pop_front() {
        // unchanged successors land here too and are pruned on dequeue
        if !explored.insert(state.piece) {
            continue;
        }

        if state.commands.len() < max_depth {
            for action in PRIMITIVES {
                let mut next = state.piece;
                apply_primitive(&mut next, grid, action);
                let mut commands = state.commands.clone();
                commands.push(action);
                queue.push_back(SearchState {
                    piece: next,
                    commands,
                });
            }
        }

        let board = simulate_drop(&state.piece, grid);
        if boards.contains(&board) {
            continue;
        }
        boards.insert(board.clone());

        let placement = Placement::from(&state.piece);
        trace!(
            commands = ?state.commands,
            x = placement.x,
            y = placement.y,
            rotation = placement.rotation.index(),
            "discovered board"
        );
        moves.push(DiscoveredMove {
            placement,
            commands: state.commands,
            board,
        });
    }

    moves
}

fn apply_primitive(piece: &mut Piece, grid: &Grid, action: Action) -> bool {
    match action {
        Action::MoveLeft => piece.move_by(-1, 0, grid),
        Action::MoveRight => piece.move_by(1, 0, grid),
        Action::SoftDrop => piece.move_by(0, 1, grid),
        Action::RotateCw => piece.rotate(grid, RotationDirection::Clockwise),
        Action::RotateCcw => piece.rotate(grid, RotationDirection::CounterClockwise),
        Action::Hold | Action::HardDrop | Action::Reset => false,
    }
}

/// Hard drop a copy of the piece into a copy of the grid and clear lines
fn simulate_drop(piece: &Piece, grid: &Grid) -> Grid {
    let mut piece = *piece;
    let mut board = grid.clone();
    piece.hard_drop(&board);
    piece.lock_into(&mut board);
    board.clear_lines();
    board
}
