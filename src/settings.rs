//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetrs-bot/settings.toml (or platform equivalent)

use crate::error::{Error, Result};
use crate::game::PREVIEW_COUNT;
use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::movegen::MAX_SEARCH_DEPTH;
use crate::piece::SPAWN_X;
use crate::search::DEFAULT_DEPTH;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest board a piece can spawn into: the spawn box starts at column 3
/// and the I piece is four wide
pub const MIN_COLS: usize = SPAWN_X as usize + 4;
pub const MIN_ROWS: usize = 4;

/// Runner settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield settings
    pub board: BoardSettings,
    /// Bot settings
    pub bot: BotSettings,
    /// Log settings
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub rows: usize,
    pub cols: usize,
    /// Next pieces shown (1-5)
    pub preview: usize,
}

/// Which policy the bot plays with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    AlphaBeta,
    Random,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    pub policy: PolicyKind,
    /// Placements before the bot stops
    pub max_moves: u32,
    /// Alpha-beta depth
    pub search_depth: u32,
    /// Longest command sequence the move enumerator explores
    pub move_search_depth: usize,
    /// Seed for the piece queue and the random policy; None picks one at startup
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by RUST_LOG
    pub filter: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            preview: PREVIEW_COUNT,
        }
    }
}

impl BoardSettings {
    /// Reject boards that cannot hold a freshly spawned piece
    pub fn validate(&self) -> Result<()> {
        if self.rows < MIN_ROWS || self.cols < MIN_COLS {
            return Err(Error::InvalidBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            policy: PolicyKind::AlphaBeta,
            max_moves: 10,
            search_depth: DEFAULT_DEPTH,
            move_search_depth: MAX_SEARCH_DEPTH,
            seed: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "tetrs_bot=info".to_string(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetrs", "tetrs-bot").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the config directory. A missing directory or file
    /// gives the defaults; an unreadable or invalid file is an error the
    /// caller decides how to report.
    pub fn load() -> Result<Self> {
        match Self::settings_path() {
            Some(path) => Self::load_if_present(&path),
            None => Ok(Self::default()),
        }
    }

    /// Like `load_from`, but a missing file gives the defaults
    pub fn load_if_present(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(contents)?;
        settings.board.preview = settings.board.preview.clamp(1, PREVIEW_COUNT);
        settings.board.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::settings_path().ok_or(Error::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.board.rows, 21);
        assert_eq!(settings.board.cols, 10);
        assert_eq!(settings.board.preview, 5);
        assert_eq!(settings.bot.policy, PolicyKind::AlphaBeta);
        assert_eq!(settings.bot.max_moves, 10);
        assert_eq!(settings.bot.search_depth, 3);
        assert_eq!(settings.bot.move_search_depth, 30);
        assert_eq!(settings.bot.seed, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [bot]
            policy = "random"
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(settings.bot.policy, PolicyKind::Random);
        assert_eq!(settings.bot.seed, Some(7));
        assert_eq!(settings.bot.max_moves, 10);
        assert_eq!(settings.board, BoardSettings::default());
    }

    #[test]
    fn test_preview_is_clamped() {
        let settings = Settings::from_toml("[board]\npreview = 12\n").unwrap();
        assert_eq!(settings.board.preview, 5);
        let settings = Settings::from_toml("[board]\npreview = 0\n").unwrap();
        assert_eq!(settings.board.preview, 1);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(matches!(
            Settings::from_toml("[bot]\npolicy = \"greedy\"\n"),
            Err(Error::TomlDe(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("tetrs-bot-settings-{}", std::process::id()));
        let path = dir.join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.bot.max_moves = 42;
        settings.logging.filter = "tetrs_bot=trace".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_board_dimensions_are_validated() {
        assert!(matches!(
            Settings::from_toml("[board]\ncols = 3\n"),
            Err(Error::InvalidBoard { rows: 21, cols: 3 })
        ));
        assert!(matches!(
            Settings::from_toml("[board]\nrows = 2\n"),
            Err(Error::InvalidBoard { rows: 2, cols: 10 })
        ));
        let smallest = Settings::from_toml("[board]\nrows = 4\ncols = 7\n").unwrap();
        assert_eq!((smallest.board.rows, smallest.board.cols), (MIN_ROWS, MIN_COLS));
        assert!(BoardSettings::default().validate().is_ok());
    }

    #[test]
    fn test_load_if_present() {
        let dir = std::env::temp_dir().join(format!("tetrs-bot-present-{}", std::process::id()));
        let path = dir.join("settings.toml");

        // a missing file is not an error
        assert_eq!(Settings::load_if_present(&path).unwrap(), Settings::default());

        // a malformed one is, so the caller can report it
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "[bot]\nmax_moves = \"many\"\n").unwrap();
        assert!(matches!(Settings::load_if_present(&path), Err(Error::TomlDe(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("tetrs-bot-definitely-missing.toml");
        assert!(matches!(Settings::load_from(&path), Err(Error::Io { .. })));
    }
}
