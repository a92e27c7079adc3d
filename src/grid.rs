//! Playfield grid: cell storage, line clearing, and height queries

use crate::error::{Error, Result};
use crate::tetromino::TetrominoType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default playfield dimensions
pub const DEFAULT_ROWS: usize = 21;
pub const DEFAULT_COLS: usize = 10;

/// A cell on the grid - either empty or filled by a piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The playfield. Row 0 is the top row; rows grow downward.
///
/// Dimensions are fixed at construction. Equality and hashing cover every
/// cell, which is what board deduplication during search relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Grid {
    /// Create a new empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    /// Parse a grid from text rows, top row first. `.` is empty and a piece
    /// letter (`IOTSZJL`) is a filled cell of that type.
    pub fn from_ascii(lines: &[&str]) -> Result<Self> {
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let parsed = line
                .chars()
                .map(|c| match c {
                    '.' => Ok(Cell::Empty),
                    other => TetrominoType::from_letter(other)
                        .map(Cell::Filled)
                        .ok_or(Error::InvalidCell(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            if parsed.len() != cols {
                return Err(Error::RaggedGrid {
                    row,
                    expected: cols,
                    found: parsed.len(),
                });
            }
            cells.push(parsed);
        }
        Ok(Self {
            rows: cells.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Set a cell. Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_filled())
    }

    /// Whether (x, y) blocks a piece cell.
    ///
    /// Side walls and the floor block; anything above the top row is open.
    pub fn blocks(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.cols as i32 || y >= self.rows as i32 {
            return true;
        }
        y >= 0 && self.cells[y as usize][x as usize].is_filled()
    }

    /// Iterate rows from top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Remove every full row, shifting the rest down. Returns rows cleared.
    pub fn clear_lines(&mut self) -> usize {
        let survivors: Vec<Vec<Cell>> = self
            .cells
            .drain(..)
            .filter(|row| row.iter().any(Cell::is_empty))
            .collect();
        let cleared = self.rows - survivors.len();

        let mut rebuilt = vec![vec![Cell::Empty; self.cols]; cleared];
        rebuilt.extend(survivors);
        self.cells = rebuilt;

        cleared
    }

    /// Number of rows with no empty cell
    pub fn full_rows(&self) -> usize {
        self.cells
            .iter()
            .filter(|row| row.iter().all(Cell::is_filled))
            .count()
    }

    /// Check if the grid is completely empty (perfect clear detection)
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(Cell::is_empty))
    }

    /// Height of each column, measured from the floor to its topmost block
    pub fn column_heights(&self) -> Vec<usize> {
        (0..self.cols)
            .map(|x| {
                self.cells
                    .iter()
                    .position(|row| row[x].is_filled())
                    .map_or(0, |y| self.rows - y)
            })
            .collect()
    }

    pub fn max_height(&self) -> usize {
        self.column_heights().into_iter().max().unwrap_or(0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Filled(kind) => kind.letter(),
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
