//! Game state management for the Gomoku GUI

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::board::{Board, Pos, Stone};
use crate::config::{GameConfig, GameMode};
use crate::engine::{AIEngine, MoveResult};
use crate::error::GameError;
use crate::rules::Game;
use crate::stats::GameStatistics;

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub game: Game,
    pub mode: GameMode,
    pub human_side: Stone,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
    pub stats: GameStatistics,
    stats_path: PathBuf,
    engine: AIEngine,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let mut stats = GameStatistics::load_or_default(&config.storage.stats_file);
        stats.start_game();
        Ok(Self {
            game: config.new_game()?,
            mode: config.game.mode,
            human_side: config.game.human_side,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            stats,
            stats_path: config.storage.stats_file.clone(),
            engine: AIEngine::new(),
        })
    }

    pub fn with_engine(mut self, engine: AIEngine) -> Self {
        self.engine = engine;
        self
    }

    /// New game on the same board shape. Any pending AI result is dropped.
    pub fn reset(&mut self) {
        self.game.reset();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
        self.stats.start_game();
    }

    /// Switch mode and start over.
    pub fn set_mode(&mut self, mode: GameMode, human_side: Stone) {
        self.mode = mode;
        self.human_side = human_side;
        self.reset();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.game.current_side()
    }

    /// Side played by the computer, if any
    pub fn computer_side(&self) -> Option<Stone> {
        match self.mode {
            GameMode::Pve => Some(self.human_side.opponent()),
            GameMode::Pvp => None,
        }
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        Some(self.current_turn()) != self.computer_side()
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.game.is_game_over() && Some(self.current_turn()) == self.computer_side()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        self.execute_move(pos).map_err(|e| e.to_string())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) -> Result<(), GameError> {
        self.game.play(pos)?;
        self.suggested_move = None;
        self.message = None;
        self.move_timer.stop();
        if self.game.is_game_over() {
            self.record_result();
        } else {
            self.move_timer.start();
        }
        Ok(())
    }

    fn record_result(&mut self) {
        if self.stats.end_game(self.game.winner()) {
            if let Err(e) = self.stats.save(&self.stats_path) {
                warn!(error = %e, "failed to save statistics");
            }
        }
    }

    /// Start AI thinking on a worker thread with its own copy of the board
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }

        let board = self.game.board().clone();
        let color = self.current_turn();
        let engine = self.engine;

        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board, color);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.last_ai_result = Some(move_result.clone());
            self.move_timer.set_ai_time(elapsed);

            match move_result.best_move {
                Some(pos) => {
                    if let Err(e) = self.execute_move(pos) {
                        self.message = Some(format!("AI move rejected: {e}"));
                    }
                }
                None => self.message = Some("AI could not find a move".to_string()),
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request move suggestion for PvP mode
    pub fn request_suggestion(&mut self) {
        if self.game.is_game_over() || self.is_ai_thinking() {
            return;
        }
        let result = self
            .engine
            .get_move_with_stats(self.game.board(), self.current_turn());
        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
    }

    /// Undo the last move; in PvE the computer's reply goes with it
    pub fn undo(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        let last_by_ai = self
            .game
            .last_move()
            .is_some_and(|mv| Some(mv.stone) == self.computer_side());
        let steps = if last_by_ai { 2 } else { 1 };
        if self.game.history().len() < steps {
            return;
        }
        for _ in 0..steps {
            match self.game.undo() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.message = Some(e.to_string());
                    return;
                }
            }
        }
        self.suggested_move = None;
        self.move_timer.start();
    }

    /// Redo the last undone move; in PvE the computer's reply comes back too
    pub fn redo(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        if !self.redo_step() {
            return;
        }
        if self.is_ai_turn() && self.game.can_redo() {
            self.redo_step();
        }
        self.suggested_move = None;
        if self.game.is_game_over() {
            self.record_result();
        }
    }

    /// One redo on the game. Failures go to `message`.
    fn redo_step(&mut self) -> bool {
        match self.game.redo() {
            Ok(replayed) => replayed,
            Err(e) => {
                self.message = Some(e.to_string());
                false
            }
        }
    }

    /// Continue from a loaded board
    pub fn load_board(&mut self, board: Board) {
        self.game.load_board(board);
        self.ai_state = AiState::Idle;
        self.suggested_move = None;
        self.last_ai_result = None;
        self.move_timer = MoveTimer::default();
        if self.game.is_game_over() {
            self.stats.cancel_game();
        } else {
            self.stats.start_game();
        }
    }
}
