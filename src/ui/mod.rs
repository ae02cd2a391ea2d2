//! GUI module for the Gomoku game
//!
//! A native egui/eframe front end over the rules engine and computer player.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::GameState;
