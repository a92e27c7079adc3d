//! Scoring: the attack table and the per-session score accumulator

use serde::{Deserialize, Serialize};

/// Base values for regular clears, indexed by lines cleared
const LINE_CLEAR: [u32; 5] = [0, 0, 1, 2, 4];
/// Base values for spin clears, indexed by lines cleared
const SPIN_CLEAR: [u32; 4] = [0, 2, 4, 6];
const BACK_TO_BACK_BONUS: u32 = 1;
const PERFECT_CLEAR_BONUS: u32 = 10;

/// Combo bonus by combo index; indices past the end use the last entry
pub const COMBO_TABLE: [u32; 10] = [0, 0, 1, 1, 1, 2, 2, 3, 3, 4];

/// Line clear classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearType {
    Single,
    Double,
    Triple,
    Quad,
}

impl ClearType {
    pub fn from_lines(lines: usize) -> Option<ClearType> {
        match lines {
            1 => Some(ClearType::Single),
            2 => Some(ClearType::Double),
            3 => Some(ClearType::Triple),
            4 => Some(ClearType::Quad),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClearType::Single => "single",
            ClearType::Double => "double",
            ClearType::Triple => "triple",
            ClearType::Quad => "quad",
        }
    }
}

/// Points for one clearing lock.
///
/// A four-line spin has no entry in the spin table and earns no base value.
pub fn calculate_score(
    cleared_lines: usize,
    is_spin: bool,
    is_back_to_back: bool,
    combo: i32,
    is_perfect_clear: bool,
) -> u32 {
    let base = if is_spin {
        SPIN_CLEAR.get(cleared_lines).copied().unwrap_or(0)
    } else {
        LINE_CLEAR.get(cleared_lines).copied().unwrap_or(0)
    };

    let back_to_back = if is_back_to_back && (cleared_lines == 4 || is_spin) {
        BACK_TO_BACK_BONUS
    } else {
        0
    };

    let combo_index = usize::try_from(combo).unwrap_or(0).min(COMBO_TABLE.len() - 1);
    let combo_bonus = COMBO_TABLE[combo_index];

    let perfect_clear = if is_perfect_clear { PERFECT_CLEAR_BONUS } else { 0 };

    base + back_to_back + combo_bonus + perfect_clear
}

/// Everything that happened on one clearing lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearEvent {
    pub clear_type: Option<ClearType>,
    pub lines: usize,
    pub is_spin: bool,
    pub back_to_back: bool,
    pub combo: i32,
    pub perfect_clear: bool,
    /// Points this clear was worth
    pub points: u32,
    /// Running total after this clear
    pub total: u64,
}

/// Session scoring state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Current combo count (-1 = no combo)
    pub combo: i32,
    /// Whether the last clear was a "difficult" clear (quad or spin)
    pub back_to_back: bool,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            combo: -1,
            back_to_back: false,
        }
    }

    /// Apply a lock that cleared at least one line
    pub fn record_clear(&mut self, lines: usize, is_spin: bool, perfect_clear: bool) -> ClearEvent {
        let clear_type = ClearType::from_lines(lines);
        let is_difficult = clear_type == Some(ClearType::Quad) || is_spin;

        let back_to_back = self.back_to_back && is_difficult;
        self.back_to_back = is_difficult;
        self.combo += 1;
        self.lines += lines as u32;

        let points = calculate_score(lines, is_spin, back_to_back, self.combo, perfect_clear);
        self.points += u64::from(points);

        ClearEvent {
            clear_type,
            lines,
            is_spin,
            back_to_back,
            combo: self.combo,
            perfect_clear,
            points,
            total: self.points,
        }
    }

    /// Reset combo (called when piece locks without clearing lines)
    pub fn reset_combo(&mut self) {
        self.combo = -1;
    }
}
