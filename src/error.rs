//! Error types for the game core and its storage collaborators

use std::path::PathBuf;

/// Errors raised by the game core.
///
/// All variants are recoverable: a rejected operation never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Target cell is occupied or outside the board.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// Move, undo or redo attempted after the game has ended.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Board dimensions, win length or encoded board data out of range.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by settings, statistics and saved-board storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("no saved board named '{0}'")]
    NotFound(String),

    #[error("invalid value: {0}")]
    Invalid(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        let err = GameError::InvalidMove("(3, 4) is already occupied".to_string());
        assert_eq!(err.to_string(), "invalid move: (3, 4) is already occupied");

        let err = GameError::InvalidState("game is already over".to_string());
        assert_eq!(err.to_string(), "invalid state: game is already over");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::NotFound("opening".to_string());
        assert_eq!(err.to_string(), "no saved board named 'opening'");

        let err: StorageError = GameError::Config("rows must be in 5..=25".to_string()).into();
        assert_eq!(err.to_string(), "configuration error: rows must be in 5..=25");
    }
}
