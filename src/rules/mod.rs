//! Game rules for classic Gomoku
//!
//! This module implements:
//! - Win conditions (an unbroken line of `win_length` or more)
//! - The rules engine: move validation, turns, draw detection, undo/redo

pub mod game;
pub mod win;

// Re-exports for convenient access
pub use game::{Game, GameStatus, Move, STARTING_SIDE};
pub use win::{find_winner, has_line_at, winning_line_at, DIRECTIONS};
