//! Super Rotation System (SRS) wall kick data
//!
//! SRS defines the wall kicks attempted when a rotation would collide. Offsets
//! are (dx, dy) with y pointing *up*, as in the published tables; callers on a
//! row-down grid must negate dy.

use crate::tetromino::{Rotation, TetrominoType};

pub type Kick = (i32, i32);

const JLSTZ_0_R: [Kick; 5] = [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)];
const JLSTZ_R_0: [Kick; 5] = [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)];
const JLSTZ_R_2: [Kick; 5] = [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)];
const JLSTZ_2_R: [Kick; 5] = [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)];
const JLSTZ_2_L: [Kick; 5] = [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)];
const JLSTZ_L_2: [Kick; 5] = [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)];
const JLSTZ_L_0: [Kick; 5] = [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)];
const JLSTZ_0_L: [Kick; 5] = [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)];

const I_0_R: [Kick; 5] = [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)];
const I_R_0: [Kick; 5] = [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)];
const I_R_2: [Kick; 5] = [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)];
const I_2_R: [Kick; 5] = [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)];
const I_2_L: [Kick; 5] = [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)];
const I_L_2: [Kick; 5] = [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)];
const I_L_0: [Kick; 5] = [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)];
const I_0_L: [Kick; 5] = [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)];

const O_KICKS: [Kick; 1] = [(0, 0)];

/// Get the ordered wall kick offsets for a `from -> to` rotation.
///
/// Transitions that are not a single quarter turn have no kicks.
pub fn get_wall_kicks(piece_type: TetrominoType, from: Rotation, to: Rotation) -> &'static [Kick] {
    match piece_type {
        TetrominoType::O => {
            if from == to {
                &[]
            } else {
                &O_KICKS
            }
        }
        TetrominoType::I => i_piece_kicks(from, to),
        _ => jlstz_kicks(from, to),
    }
}

/// Wall kicks for J, L, S, T, Z pieces
fn jlstz_kicks(from: Rotation, to: Rotation) -> &'static [Kick] {
    use Rotation::*;

    match (from, to) {
        (North, East) => &JLSTZ_0_R,
        (East, North) => &JLSTZ_R_0,
        (East, South) => &JLSTZ_R_2,
        (South, East) => &JLSTZ_2_R,
        (South, West) => &JLSTZ_2_L,
        (West, South) => &JLSTZ_L_2,
        (West, North) => &JLSTZ_L_0,
        (North, West) => &JLSTZ_0_L,
        _ => &[],
    }
}

/// Wall kicks for the I piece (different from other pieces)
fn i_piece_kicks(from: Rotation, to: Rotation) -> &'static [Kick] {
    use Rotation::*;

    match (from, to) {
        (North, East) => &I_0_R,
        (East, North) => &I_R_0,
        (East, South) => &I_R_2,
        (South, East) => &I_2_R,
        (South, West) => &I_2_L,
        (West, South) => &I_L_2,
        (West, North) => &I_L_0,
        (North, West) => &I_0_L,
        _ => &[],
    }
}
