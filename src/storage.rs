//! Named saved boards, one JSON document per name

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::StorageError;

/// Longest accepted save name
pub const MAX_NAME_LEN: usize = 64;

/// On-disk record for one saved board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedBoard {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    /// Output of [`Board::encode`]
    pub board_data: String,
    /// Milliseconds since the Unix epoch
    pub saved_at: u64,
}

/// Directory-backed board store.
#[derive(Debug, Clone)]
pub struct BoardStore {
    dir: PathBuf,
}

impl BoardStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `board` under `name`, replacing any earlier save of that name.
    pub fn save_board(&self, name: &str, board: &Board) -> Result<(), StorageError> {
        validate_name(name)?;
        let record = SavedBoard {
            name: name.to_string(),
            rows: board.rows(),
            cols: board.cols(),
            board_data: board.encode(),
            saved_at: now_millis(),
        };
        self.write_record(&record)?;
        info!(name, rows = record.rows, cols = record.cols, "board saved");
        Ok(())
    }

    /// Load the board saved under `name`.
    pub fn load_board(&self, name: &str) -> Result<Board, StorageError> {
        let record = self.read_record(name)?;
        let board = Board::decode(&record.board_data)?;
        if board.rows() != record.rows || board.cols() != record.cols {
            return Err(StorageError::Invalid(format!(
                "saved board '{name}' claims {}x{} but holds {}x{}",
                record.rows,
                record.cols,
                board.rows(),
                board.cols()
            )));
        }
        info!(name, "board loaded");
        Ok(board)
    }

    /// Names of all saved boards, newest first.
    ///
    /// Unreadable files are skipped with a warning. A missing directory
    /// means nothing has been saved yet.
    pub fn list_boards(&self) -> Result<Vec<String>, StorageError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.dir, e)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StorageError::io(&self.dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_json(&path) {
                Ok(record) => records.push(record),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable save"),
            }
        }

        records.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then_with(|| a.name.cmp(&b.name)));
        Ok(records.into_iter().map(|r| r.name).collect())
    }

    /// Delete the save named `name`. Returns false if there was none.
    pub fn delete_board(&self, name: &str) -> Result<bool, StorageError> {
        validate_name(name)?;
        let path = self.path_for(name);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(name, "board deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(name, "delete of unknown board");
                Ok(false)
            }
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    fn read_record(&self, name: &str) -> Result<SavedBoard, StorageError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        read_json(&path)
    }

    fn write_record(&self, record: &SavedBoard) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let path = self.path_for(&record.name);
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, json).map_err(|e| StorageError::io(path, e))
    }
}

/// Save names map straight to file names, so only a safe alphabet is allowed.
pub fn validate_name(name: &str) -> Result<(), StorageError> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    if name.is_empty() || name.len() > MAX_NAME_LEN || !name.chars().all(valid_char) {
        return Err(StorageError::Invalid(format!(
            "save name '{name}' must be 1-{MAX_NAME_LEN} characters of A-Z, a-z, 0-9, '_' or '-'"
        )));
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<SavedBoard, StorageError> {
    let text = std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
