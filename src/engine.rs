//! Computer player
//!
//! [`AIEngine`] is what front ends talk to. It runs a [`Searcher`] on a
//! private copy of the board, so the caller's board is never touched and
//! the search can be moved onto a worker thread together with its copy.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Pos, SearchType, Stone};
//!
//! let mut board = Board::with_defaults();
//! board.set(Pos::new(7, 7), Stone::Black);
//!
//! // Shallower than the default depth to keep the example quick
//! let engine = AIEngine::with_depth(2);
//! let result = engine.get_move_with_stats(&board, Stone::White);
//! assert_eq!(result.search_type, SearchType::AlphaBeta);
//! assert!(result.best_move.is_some());
//! ```

use std::time::Instant;

use tracing::{debug, info};

use crate::board::{Board, Pos, Stone};
use crate::search::{SearchResult, Searcher, SEARCH_DEPTH};

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Empty board, answered with the center cell
    Center,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Board full, nothing to play
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Minimax score of the move for the side that searched
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    fn from_search(board: &Board, result: SearchResult, time_ms: u64) -> Self {
        let search_type = match result.best_move {
            None => SearchType::NoMove,
            Some(_) if board.is_board_empty() => SearchType::Center,
            Some(_) => SearchType::AlphaBeta,
        };
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// Computer opponent.
///
/// Holds only the search depth; the side to search for is passed per call so
/// one engine can serve hints for either player.
#[derive(Debug, Clone, Copy)]
pub struct AIEngine {
    depth: u8,
}

impl AIEngine {
    /// Engine searching at the standard depth.
    #[must_use]
    pub fn new() -> Self {
        Self::with_depth(SEARCH_DEPTH)
    }

    /// Engine with a custom depth (clamped to at least one ply).
    #[must_use]
    pub fn with_depth(depth: u8) -> Self {
        Self { depth: depth.max(1) }
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the best move for `color`, or `None` if the board is full.
    #[must_use]
    pub fn get_move(&self, board: &Board, color: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, color).best_move
    }

    /// Get the best move with timing and node statistics.
    #[must_use]
    pub fn get_move_with_stats(&self, board: &Board, color: Stone) -> MoveResult {
        let start = Instant::now();
        let mut scratch = board.clone();
        let mut searcher = Searcher::with_depth(color, self.depth);
        let result = searcher.search(&mut scratch);
        let time_ms = start.elapsed().as_millis() as u64;

        let result = MoveResult::from_search(board, result, time_ms);
        match result.best_move {
            Some(pos) => info!(
                side = color.name(),
                mv = %pos,
                score = result.score,
                nodes = result.nodes,
                time_ms,
                kind = ?result.search_type,
                "computer move chosen"
            ),
            None => debug!(side = color.name(), "no move available"),
        }
        result
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
