//! Active falling piece logic

use crate::grid::{Cell, Grid};
use crate::srs::get_wall_kicks;
use crate::tetromino::{Rotation, RotationDirection, Shape, TetrominoType};
use serde::{Deserialize, Serialize};

/// Column the piece's bounding box spawns at
pub const SPAWN_X: i32 = 3;
/// Row the piece's bounding box spawns at
pub const SPAWN_Y: i32 = 0;

/// A tetromino placed on a grid.
///
/// `(x, y)` is the top-left corner of the shape's bounding box. The current
/// shape is always looked up from `(piece_type, rotation)`, so it can never
/// drift from the rotation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: TetrominoType,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a new piece at spawn position
    pub fn new(piece_type: TetrominoType) -> Self {
        Self {
            piece_type,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// The solid cells of the current rotation, relative to (x, y)
    pub fn shape(&self) -> Shape {
        self.piece_type.shape(self.rotation)
    }

    /// Absolute (x, y) grid positions of all 4 blocks
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether the piece, shifted by the offset, would overlap a wall, the
    /// floor, or a filled cell. Cells above the top row never collide.
    pub fn check_collision(&self, grid: &Grid, offset_x: i32, offset_y: i32) -> bool {
        self.cells()
            .iter()
            .any(|&(x, y)| grid.blocks(x + offset_x, y + offset_y))
    }

    /// Whether the piece currently overlaps anything
    pub fn collides(&self, grid: &Grid) -> bool {
        self.check_collision(grid, 0, 0)
    }

    /// Translate by (dx, dy) if the destination is free. Returns true if moved.
    pub fn move_by(&mut self, dx: i32, dy: i32, grid: &Grid) -> bool {
        if self.check_collision(grid, dx, dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Try to rotate, falling back to SRS wall kicks.
    ///
    /// The unkicked rotation is tried first; then each kick in table order.
    /// On failure the piece is left exactly as it was.
    pub fn rotate(&mut self, grid: &Grid, direction: RotationDirection) -> bool {
        let original_rotation = self.rotation;
        let new_rotation = original_rotation.rotated(direction);
        self.rotation = new_rotation;

        if !self.collides(grid) {
            return true;
        }

        for &(kick_x, kick_y) in get_wall_kicks(self.piece_type, original_rotation, new_rotation) {
            // Kick tables are y-up, the grid is y-down
            if !self.check_collision(grid, kick_x, -kick_y) {
                self.x += kick_x;
                self.y -= kick_y;
                return true;
            }
        }

        self.rotation = original_rotation;
        false
    }

    /// Rows the piece can fall before landing
    pub fn drop_distance(&self, grid: &Grid) -> i32 {
        let mut distance = 0;
        while !self.check_collision(grid, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Move down as far as possible and return the distance dropped
    pub fn hard_drop(&mut self, grid: &Grid) -> i32 {
        let distance = self.drop_distance(grid);
        self.y += distance;
        distance
    }

    /// Back to spawn position and rotation (used when swapping into hold)
    pub fn reset_orientation(&mut self) {
        self.rotation = Rotation::North;
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
    }

    /// Write the piece into the grid.
    ///
    /// Returns false if any block sits above the top row; those blocks are
    /// dropped and the rest are still written.
    pub fn lock_into(&self, grid: &mut Grid) -> bool {
        let mut fully_visible = true;
        for (x, y) in self.cells() {
            if y < 0 {
                fully_visible = false;
                continue;
            }
            grid.set(x, y, Cell::Filled(self.piece_type));
        }
        fully_visible
    }

    /// Check if this is a T piece (for T-spin detection)
    pub fn is_t_piece(&self) -> bool {
        matches!(self.piece_type, TetrominoType::T)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Grid {
        Grid::new(20, 10)
    }

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.cells(), [(4, 0), (3, 1), (4, 1), (5, 1)]);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let grid = empty();
        let mut piece = Piece::new(TetrominoType::O);
        // O occupies box columns 1..=2, so x can go down to -1
        let mut moves = 0;
        while piece.move_by(-1, 0, &grid) {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(piece.x, -1);
        assert!(!piece.collides(&grid));
    }

    #[test]
    fn test_move_blocked_by_stack() {
        let mut grid = empty();
        grid.set(4, 3, Cell::Filled(TetrominoType::I));
        let mut piece = Piece::new(TetrominoType::T);
        assert!(piece.move_by(0, 1, &grid));
        assert!(!piece.move_by(0, 1, &grid));
        assert_eq!(piece.y, 1);
    }

    #[test]
    fn test_cells_above_top_do_not_collide() {
        let grid = empty();
        let mut piece = Piece::new(TetrominoType::I);
        piece.y = -3;
        assert!(!piece.collides(&grid));
        piece.x = -1;
        assert!(piece.collides(&grid));
    }

    #[test]
    fn test_rotate_in_open_space() {
        let grid = empty();
        let mut piece = Piece::new(TetrominoType::T);
        piece.y = 5;
        assert!(piece.rotate(&grid, RotationDirection::Clockwise));
        assert_eq!(piece.rotation, Rotation::East);
        assert_eq!((piece.x, piece.y), (3, 5));
        assert!(piece.rotate(&grid, RotationDirection::CounterClockwise));
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        let grid = empty();
        let mut piece = Piece::new(TetrominoType::T);
        piece.y = 5;
        piece.rotate(&grid, RotationDirection::Clockwise);
        // East T hugging the left wall: box column 0 is empty
        while piece.move_by(-1, 0, &grid) {}
        assert_eq!(piece.x, -1);

        // North needs box column 0, which is the wall; kick (+1, 0) resolves it
        assert!(piece.rotate(&grid, RotationDirection::CounterClockwise));
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.x, 0);
        assert!(!piece.collides(&grid));
    }

    #[test]
    fn test_kick_y_is_inverted() {
        // A T resting on the floor cannot turn East in place; the SRS kick
        // (-1, +1) is y-up, so the piece must end one row *higher* on the grid
        let grid = empty();
        let mut piece = Piece::new(TetrominoType::T);
        piece.hard_drop(&grid);
        assert_eq!((piece.x, piece.y), (3, 18));

        assert!(piece.rotate(&grid, RotationDirection::Clockwise));
        assert_eq!(piece.rotation, Rotation::East);
        assert_eq!((piece.x, piece.y), (2, 17));
        assert!(!piece.collides(&grid));
    }

    #[test]
    fn test_failed_rotation_restores_state() {
        // I piece lying in a one-high tunnel cannot stand up anywhere
        let grid = Grid::from_ascii(&[
            "OOOOOOOOOO",
            "..........",
            "OOOOOOOOOO",
        ])
        .unwrap();
        let mut piece = Piece::new(TetrominoType::I);
        piece.x = 2;
        piece.y = 0;
        assert!(!piece.collides(&grid));
        let before = piece;
        assert!(!piece.rotate(&grid, RotationDirection::Clockwise));
        assert_eq!(piece, before);
        assert!(!piece.rotate(&grid, RotationDirection::CounterClockwise));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        let grid = empty();
        for kind in TetrominoType::all() {
            let mut piece = Piece::new(kind);
            piece.y = 8;
            let shape = piece.shape();
            for _ in 0..4 {
                assert!(piece.rotate(&grid, RotationDirection::Clockwise));
            }
            assert_eq!(piece.rotation, Rotation::North);
            assert_eq!(piece.shape(), shape);
        }
    }

    #[test]
    fn test_hard_drop() {
        let grid = empty();
        let mut piece = Piece::new(TetrominoType::I);
        let distance = piece.hard_drop(&grid);
        // I lies on box row 1, so its box top ends one row above the last row
        assert_eq!(distance, 18);
        assert_eq!(piece.y, 18);
        assert!(piece.check_collision(&grid, 0, 1));
    }

    #[test]
    fn test_lock_into_reports_hidden_blocks() {
        let mut grid = empty();
        let mut piece = Piece::new(TetrominoType::I);
        piece.rotation = Rotation::East;
        piece.y = -2;
        assert!(!piece.lock_into(&mut grid));
        assert!(grid.is_occupied(5, 0));
        assert!(grid.is_occupied(5, 1));
        assert!(!grid.is_occupied(5, 2));
    }

    #[test]
    fn test_clone_is_independent() {
        let grid = empty();
        let original = Piece::new(TetrominoType::L);
        let mut copy = original;
        copy.move_by(1, 0, &grid);
        copy.rotate(&grid, RotationDirection::Clockwise);
        assert_eq!(original, Piece::new(TetrominoType::L));
        assert_ne!(copy, original);
    }
}
