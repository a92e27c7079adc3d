//! Crate error type
//!
//! Gameplay never fails: illegal moves are reported as `false`. Errors only
//! come from the edges (settings files, fixture parsing).

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("board of {rows} rows by {cols} columns is too small to spawn pieces")]
    InvalidBoard { rows: usize, cols: usize },

    #[error("grid row {row} has {found} columns, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid grid cell {0:?} (expected '.' or a piece letter)")]
    InvalidCell(char),
}
