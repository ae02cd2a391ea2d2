//! Running totals of finished games

use std::fmt::Write as _;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::Stone;
use crate::error::StorageError;

/// Outcome counters and game durations, persisted as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStatistics {
    pub total_games: u32,
    pub black_wins: u32,
    pub white_wins: u32,
    pub draws: u32,
    /// Sum of all game durations in milliseconds
    pub total_game_ms: u64,
    /// Zero until the first game is recorded
    pub shortest_game_ms: u64,
    pub longest_game_ms: u64,
    #[serde(skip)]
    current_start: Option<Instant>,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load totals from `path`, starting fresh if the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(stats) => stats,
            Err(StorageError::Io { .. }) if !path.exists() => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "statistics unreadable, starting fresh");
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let text = std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        std::fs::write(path, json).map_err(|e| StorageError::io(path, e))
    }

    /// Start timing a new game. Restarting discards the previous start.
    pub fn start_game(&mut self) {
        self.current_start = Some(Instant::now());
    }

    /// Stop timing without recording anything.
    pub fn cancel_game(&mut self) {
        self.current_start = None;
    }

    #[inline]
    pub fn is_game_active(&self) -> bool {
        self.current_start.is_some()
    }

    /// Record the end of the active game; `None` is a draw.
    ///
    /// Returns false and records nothing when no game is active.
    pub fn end_game(&mut self, winner: Option<Stone>) -> bool {
        let Some(start) = self.current_start.take() else {
            return false;
        };
        self.record_game(winner, start.elapsed());
        true
    }

    /// Record a finished game of known length.
    pub fn record_game(&mut self, winner: Option<Stone>, duration: Duration) {
        let ms = duration.as_millis() as u64;

        self.total_games += 1;
        self.total_game_ms += ms;
        if self.shortest_game_ms == 0 || ms < self.shortest_game_ms {
            self.shortest_game_ms = ms;
        }
        self.longest_game_ms = self.longest_game_ms.max(ms);

        match winner {
            Some(Stone::Black) => self.black_wins += 1,
            Some(Stone::White) => self.white_wins += 1,
            _ => self.draws += 1,
        }
        info!(
            winner = winner.map_or("draw", Stone::name),
            duration_ms = ms,
            total = self.total_games,
            "game recorded"
        );
    }

    fn rate(&self, count: u32) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.total_games) * 100.0
        }
    }

    /// Black win rate in percent
    pub fn black_win_rate(&self) -> f64 {
        self.rate(self.black_wins)
    }

    /// White win rate in percent
    pub fn white_win_rate(&self) -> f64 {
        self.rate(self.white_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Mean game length in seconds
    pub fn average_game_secs(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_game_ms as f64 / f64::from(self.total_games) / 1000.0
        }
    }

    pub fn shortest_game_secs(&self) -> f64 {
        self.shortest_game_ms as f64 / 1000.0
    }

    pub fn longest_game_secs(&self) -> f64 {
        self.longest_game_ms as f64 / 1000.0
    }

    /// Human-readable multi-line summary.
    pub fn summary(&self) -> String {
        let mut out = String::from("=== Gomoku Statistics ===\n");
        let _ = writeln!(out, "Total games: {}", self.total_games);
        let _ = writeln!(out, "Black wins:  {} ({:.1}%)", self.black_wins, self.black_win_rate());
        let _ = writeln!(out, "White wins:  {} ({:.1}%)", self.white_wins, self.white_win_rate());
        let _ = writeln!(out, "Draws:       {} ({:.1}%)", self.draws, self.draw_rate());
        if self.total_games > 0 {
            let _ = writeln!(out, "Average game: {:.1} s", self.average_game_secs());
            let _ = writeln!(out, "Shortest game: {:.1} s", self.shortest_game_secs());
            let _ = writeln!(out, "Longest game: {:.1} s", self.longest_game_secs());
        }
        out
    }

    /// Zero every counter and drop any active game.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_without_start_is_ignored() {
        let mut stats = GameStatistics::new();
        assert!(!stats.end_game(Some(Stone::Black)));
        assert_eq!(stats.total_games, 0);
    }

    #[test]
    fn test_start_and_end() {
        let mut stats = GameStatistics::new();
        stats.start_game();
        assert!(stats.is_game_active());
        assert!(stats.end_game(Some(Stone::White)));
        assert!(!stats.is_game_active());
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.white_wins, 1);

        // A second end without a new start records nothing
        assert!(!stats.end_game(None));
        assert_eq!(stats.total_games, 1);

        stats.start_game();
        stats.cancel_game();
        assert!(!stats.end_game(None));
        assert_eq!(stats.total_games, 1);
    }

    #[test]
    fn test_counts_and_rates() {
        let mut stats = GameStatistics::new();
        stats.record_game(Some(Stone::Black), Duration::from_millis(4_000));
        stats.record_game(Some(Stone::Black), Duration::from_millis(1_000));
        stats.record_game(Some(Stone::White), Duration::from_millis(7_000));
        stats.record_game(None, Duration::from_millis(2_000));

        assert_eq!(stats.total_games, 4);
        assert_eq!((stats.black_wins, stats.white_wins, stats.draws), (2, 1, 1));
        assert!((stats.black_win_rate() - 50.0).abs() < 1e-9);
        assert!((stats.white_win_rate() - 25.0).abs() < 1e-9);
        assert!((stats.draw_rate() - 25.0).abs() < 1e-9);
        assert_eq!(stats.shortest_game_ms, 1_000);
        assert_eq!(stats.longest_game_ms, 7_000);
        assert!((stats.average_game_secs() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_rates_are_zero() {
        let stats = GameStatistics::new();
        assert_eq!(stats.black_win_rate(), 0.0);
        assert_eq!(stats.average_game_secs(), 0.0);
        assert!(!stats.summary().contains("Average"));
    }

    #[test]
    fn test_summary() {
        let mut stats = GameStatistics::new();
        stats.record_game(Some(Stone::Black), Duration::from_millis(1_500));
        let summary = stats.summary();
        assert!(summary.contains("Total games: 1"));
        assert!(summary.contains("Black wins:  1 (100.0%)"));
        assert!(summary.contains("Shortest game: 1.5 s"));
    }

    #[test]
    fn test_reset() {
        let mut stats = GameStatistics::new();
        stats.record_game(None, Duration::from_millis(10));
        stats.start_game();
        stats.reset();
        assert_eq!(stats, GameStatistics::default());
        assert!(!stats.is_game_active());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let mut stats = GameStatistics::new();
        stats.record_game(Some(Stone::White), Duration::from_millis(3_000));
        stats.save(&path).unwrap();

        let loaded = GameStatistics::load_or_default(&path);
        assert_eq!(loaded, stats);
    }

    #[test]
    fn test_load_or_default_tolerates_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(GameStatistics::load_or_default(&missing), GameStatistics::default());

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert_eq!(GameStatistics::load_or_default(&corrupt), GameStatistics::default());
        assert!(matches!(GameStatistics::load(&corrupt), Err(StorageError::Json(_))));
    }
}
