//! Static board evaluation used at the leaves of the search

use crate::grid::Grid;

pub const FULL_ROW_WEIGHT: i32 = 100;
pub const MAX_HEIGHT_WEIGHT: i32 = -2;

/// Reward full rows, penalize the tallest column
pub fn evaluate_grid(grid: &Grid) -> i32 {
    let full_rows = grid.full_rows() as i32;
    let max_height = grid.max_height() as i32;
    full_rows * FULL_ROW_WEIGHT + max_height * MAX_HEIGHT_WEIGHT
}
