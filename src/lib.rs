//! Classic Gomoku engine
//!
//! Two players alternately place stones on a rectangular grid (5 to 25 rows
//! and columns); the first to line up `win_length` stones horizontally,
//! vertically or diagonally wins, and a full board without a line is a draw.
//! There are no captures and no forbidden moves.
//!
//! # Architecture
//!
//! - [`board`]: grid storage on bitboards, text encoding
//! - [`rules`]: turn order, win/draw detection, undo/redo ([`Game`])
//! - [`eval`]: static window-scan evaluation
//! - [`search`]: candidate generation and alpha-beta search
//! - [`engine`]: computer player with timing ([`AIEngine`])
//! - [`config`], [`stats`], [`storage`]: settings, outcome counters, saved boards
//! - [`text_ui`], [`ui`]: line-based and egui front ends
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Game, GameStatus, Stone};
//!
//! let mut game = Game::with_dimensions(9, 9, 4)?;
//! game.apply_move(4, 4)?;
//!
//! let engine = AIEngine::with_depth(2);
//! if let Some(pos) = engine.get_move(game.board(), game.current_side()) {
//!     assert_eq!(game.play(pos)?, GameStatus::InProgress);
//! }
//! assert_eq!(game.current_side(), Stone::Black);
//! # Ok::<(), gomoku::GameError>(())
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod stats;
pub mod storage;
pub mod text_ui;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone};
pub use config::{GameConfig, GameMode};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{GameError, StorageError};
pub use rules::{Game, GameStatus, Move};
pub use search::{SearchResult, Searcher};
pub use stats::GameStatistics;
pub use storage::BoardStore;
pub use text_ui::TextFrontEnd;
