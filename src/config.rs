//! Game settings, loadable from TOML

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{validate_dimensions, Board, Stone, DEFAULT_BOARD_SIZE, DEFAULT_WIN_LENGTH};
use crate::error::{GameError, StorageError};
use crate::rules::Game;

/// Default settings file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gomoku.toml";

/// Who sits at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Human against the computer
    Pve,
    /// Two humans at one board
    Pvp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOARD_SIZE,
            cols: DEFAULT_BOARD_SIZE,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub mode: GameMode,
    /// Side the human plays in PvE; the computer takes the other one
    pub human_side: Stone,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::Pve,
            human_side: Stone::Black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_coordinates: bool,
    pub highlight_last_move: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_coordinates: true,
            highlight_last_move: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding saved boards
    pub save_dir: PathBuf,
    /// JSON file holding running game totals
    pub stats_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            stats_file: PathBuf::from("gomoku_stats.json"),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub game: GameSettings,
    pub ui: UiConfig,
    pub storage: StorageConfig,
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let content = std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, StorageError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Write the configuration as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        self.validate()?;
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        std::fs::write(path, text).map_err(|e| StorageError::io(path, e))?;
        info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), StorageError> {
        validate_dimensions(self.board.rows, self.board.cols, self.board.win_length)?;
        if self.game.human_side == Stone::Empty {
            return Err(StorageError::Invalid(
                "game.human_side must be \"black\" or \"white\"".into(),
            ));
        }
        if self.storage.save_dir.as_os_str().is_empty() {
            return Err(StorageError::Invalid("storage.save_dir must not be empty".into()));
        }
        if self.storage.stats_file.as_os_str().is_empty() {
            return Err(StorageError::Invalid("storage.stats_file must not be empty".into()));
        }
        Ok(())
    }

    /// Side played by the computer, if any.
    pub fn computer_side(&self) -> Option<Stone> {
        match self.game.mode {
            GameMode::Pve => Some(self.game.human_side.opponent()),
            GameMode::Pvp => None,
        }
    }

    /// Fresh board with the configured dimensions.
    pub fn new_board(&self) -> Result<Board, GameError> {
        Board::new(self.board.rows, self.board.cols, self.board.win_length)
    }

    /// Fresh game with the configured dimensions.
    pub fn new_game(&self) -> Result<Game, GameError> {
        self.new_board().map(Game::new)
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> Result<String, StorageError> {
        Ok(toml::to_string_pretty(&GameConfig::default())?)
    }
}
