//! Position evaluation
//!
//! - [`heuristic`]: window-sum evaluation used at search leaves
//! - [`patterns`]: window weight table

pub mod heuristic;
pub mod patterns;

pub use heuristic::evaluate;
pub use patterns::{window_weight, PatternScore};
