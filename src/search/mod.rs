//! Search module for Gomoku AI
//!
//! Contains:
//! - Frontier candidate generation with a fixed emission order
//! - Fixed-depth minimax with alpha-beta pruning

pub mod alphabeta;
pub mod movegen;

pub use alphabeta::{SearchResult, Searcher, SEARCH_DEPTH, WIN_SCORE};
pub use movegen::{candidates, NEIGHBOR_OFFSETS};
