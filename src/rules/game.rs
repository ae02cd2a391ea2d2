//! Turn management, move validation and undo/redo history

use tracing::{debug, info};

use crate::board::{Board, Pos, Stone};
use crate::error::GameError;

use super::win::{find_winner, has_line_at, winning_line_at};

/// Side that moves first in every game
pub const STARTING_SIDE: Stone = Stone::Black;

/// A stone placed by one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub pos: Pos,
    pub stone: Stone,
}

/// Game status. `Won` and `Draw` are terminal until [`Game::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Stone),
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Rules engine for one playthrough.
///
/// Owns the board, the side to move and two LIFO stacks: applied moves and
/// undone moves. A rejected operation leaves every field untouched.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current: Stone,
    status: GameStatus,
    history: Vec<Move>,
    redo_stack: Vec<Move>,
}

impl Game {
    /// Start a game on `board`, which is cleared first.
    pub fn new(mut board: Board) -> Self {
        board.clear();
        info!(
            rows = board.rows(),
            cols = board.cols(),
            win_length = board.win_length(),
            "new game"
        );
        Self {
            history: Vec::with_capacity(board.rows() * board.cols()),
            redo_stack: Vec::new(),
            board,
            current: STARTING_SIDE,
            status: GameStatus::InProgress,
        }
    }

    /// Start a game on a fresh board of the given shape.
    pub fn with_dimensions(rows: usize, cols: usize, win_length: usize) -> Result<Self, GameError> {
        Ok(Self::new(Board::new(rows, cols, win_length)?))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_side(&self) -> Stone {
        self.current
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Winning side, if the game was won
    pub fn winner(&self) -> Option<Stone> {
        match self.status {
            GameStatus::Won(stone) => Some(stone),
            _ => None,
        }
    }

    /// Applied moves, oldest first
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty() && !self.is_game_over()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty() && !self.is_game_over()
    }

    /// Place the current side's stone at `(row, col)`.
    ///
    /// Fails with [`GameError::InvalidState`] once the game is over and with
    /// [`GameError::InvalidMove`] for an off-board or occupied cell.
    pub fn apply_move(&mut self, row: i32, col: i32) -> Result<GameStatus, GameError> {
        if self.is_game_over() {
            debug!(row, col, "move rejected: game over");
            return Err(GameError::InvalidState(
                "cannot make move: game is already over".to_string(),
            ));
        }
        if !self.board.is_valid_position(row, col) {
            debug!(row, col, "move rejected: off board");
            return Err(GameError::InvalidMove(format!(
                "position ({row}, {col}) is out of bounds"
            )));
        }
        let pos = Pos::new(row as u8, col as u8);
        if !self.board.is_empty(pos) {
            debug!(row, col, "move rejected: occupied");
            return Err(GameError::InvalidMove(format!(
                "position {pos} is already occupied"
            )));
        }

        let mv = Move {
            pos,
            stone: self.current,
        };
        self.board.set(pos, mv.stone);
        self.history.push(mv);
        self.redo_stack.clear();
        info!(side = mv.stone.name(), row, col, "stone placed");

        self.update_status(mv);
        Ok(self.status)
    }

    /// [`Game::apply_move`] for an already-typed position.
    pub fn play(&mut self, pos: Pos) -> Result<GameStatus, GameError> {
        self.apply_move(i32::from(pos.row), i32::from(pos.col))
    }

    /// Take back the most recent move. Returns `false` when there is none.
    pub fn undo(&mut self) -> Result<bool, GameError> {
        if self.is_game_over() {
            return Err(GameError::InvalidState(
                "cannot undo: game is already over".to_string(),
            ));
        }
        let Some(mv) = self.history.pop() else {
            return Ok(false);
        };

        self.board.set(mv.pos, Stone::Empty);
        self.redo_stack.push(mv);
        self.current = mv.stone;
        info!(row = mv.pos.row, col = mv.pos.col, "move undone");
        Ok(true)
    }

    /// Replay the most recently undone move. Returns `false` when there is none.
    ///
    /// The replayed move goes through the same win check as a fresh one, so
    /// a redo can end the game.
    pub fn redo(&mut self) -> Result<bool, GameError> {
        if self.is_game_over() {
            return Err(GameError::InvalidState(
                "cannot redo: game is already over".to_string(),
            ));
        }
        let Some(mv) = self.redo_stack.pop() else {
            return Ok(false);
        };

        self.board.set(mv.pos, mv.stone);
        self.history.push(mv);
        // The turn passes before the win check, so a winning redo leaves
        // the opponent as the side to move.
        self.current = mv.stone.opponent();
        info!(row = mv.pos.row, col = mv.pos.col, "move redone");

        self.update_status(mv);
        Ok(true)
    }

    /// Clear the board and both stacks; Black moves first again.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = STARTING_SIDE;
        self.status = GameStatus::InProgress;
        self.history.clear();
        self.redo_stack.clear();
        info!("game reset");
    }

    /// Continue play on a loaded board.
    ///
    /// History and redo are dropped. Black moves when both sides have the
    /// same number of stones, White otherwise. Terminal state is recomputed
    /// from the whole board.
    pub fn load_board(&mut self, board: Board) {
        let black = board.stones(Stone::Black).map_or(0, |b| b.count());
        let white = board.stones(Stone::White).map_or(0, |b| b.count());

        self.current = if black > white { Stone::White } else { Stone::Black };
        self.status = match find_winner(&board) {
            Some(stone) => GameStatus::Won(stone),
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        };
        self.board = board;
        self.history.clear();
        self.redo_stack.clear();
        info!(stones = black + white, status = ?self.status, "board loaded");
    }

    /// Cells of the completed line when the game was won
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        let winner = self.winner()?;
        if let Some(line) = self.last_move().and_then(|mv| winning_line_at(&self.board, mv.pos)) {
            return Some(line);
        }
        self.board
            .occupied()
            .filter(|&pos| self.board.get(pos) == winner)
            .find_map(|pos| winning_line_at(&self.board, pos))
    }

    /// Win/draw check after `mv` was written; otherwise pass the turn.
    fn update_status(&mut self, mv: Move) {
        if has_line_at(&self.board, mv.pos) {
            self.status = GameStatus::Won(mv.stone);
            info!(winner = mv.stone.name(), "game won");
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
            info!("game drawn");
        } else {
            self.current = mv.stone.opponent();
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(game: &mut Game, moves: &[(i32, i32)]) {
        for &(r, c) in moves {
            game.apply_move(r, c).unwrap();
        }
    }

    /// Black builds a row at `row`, White answers on `row + 1`.
    fn play_horizontal_win(game: &mut Game, row: i32, len: i32) {
        for i in 0..len {
            game.apply_move(row, i).unwrap();
            if i < len - 1 {
                game.apply_move(row + 1, i).unwrap();
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let game = Game::default();
        assert_eq!(game.current_side(), Stone::Black);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert!(!game.can_undo());
        assert!(!game.can_redo());
    }

    #[test]
    fn test_new_clears_board() {
        let mut board = Board::with_defaults();
        board.set(Pos::new(1, 1), Stone::White);
        let game = Game::new(board);
        assert!(game.board().is_board_empty());
    }

    #[test]
    fn test_valid_move_and_alternation() {
        let mut game = Game::default();
        game.apply_move(7, 7).unwrap();
        assert_eq!(game.board().get(Pos::new(7, 7)), Stone::Black);
        assert_eq!(game.current_side(), Stone::White);
        game.apply_move(1, 1).unwrap();
        assert_eq!(game.board().get(Pos::new(1, 1)), Stone::White);
        assert_eq!(game.current_side(), Stone::Black);
        assert_eq!(
            game.last_move(),
            Some(Move {
                pos: Pos::new(1, 1),
                stone: Stone::White
            })
        );
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut game = Game::default();
        game.apply_move(5, 5).unwrap();
        let err = game.apply_move(5, 5).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(_)));
        // Rejection leaves the turn and history alone
        assert_eq!(game.current_side(), Stone::White);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut game = Game::default();
        for (r, c) in [(-1, 5), (5, -1), (20, 5), (5, 20), (15, 0)] {
            assert!(matches!(game.apply_move(r, c), Err(GameError::InvalidMove(_))));
        }
        assert!(game.board().is_board_empty());
        assert_eq!(game.current_side(), Stone::Black);
    }

    #[test]
    fn test_horizontal_win_row_seven() {
        let mut game = Game::default();
        play_horizontal_win(&mut game, 7, 5);
        assert_eq!(game.status(), GameStatus::Won(Stone::Black));
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Stone::Black));
        assert_eq!(game.winning_line().unwrap().len(), 5);
    }

    #[test]
    fn test_vertical_win() {
        let mut game = Game::default();
        for i in 0..5 {
            game.apply_move(i, 7).unwrap();
            if i < 4 {
                game.apply_move(i, 8).unwrap();
            }
        }
        assert_eq!(game.winner(), Some(Stone::Black));
    }

    #[test]
    fn test_diagonal_wins() {
        let mut game = Game::default();
        for i in 0..5 {
            game.apply_move(i, i).unwrap();
            if i < 4 {
                game.apply_move(i, i + 1).unwrap();
            }
        }
        assert_eq!(game.winner(), Some(Stone::Black));

        let mut game = Game::default();
        for i in 0..5 {
            game.apply_move(4 - i, i).unwrap();
            if i < 4 {
                game.apply_move(5 - i, i).unwrap();
            }
        }
        assert_eq!(game.winner(), Some(Stone::Black));
    }

    #[test]
    fn test_white_can_win() {
        let mut game = Game::default();
        play_all(
            &mut game,
            &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (0, 3), (1, 3), (2, 0), (1, 4)],
        );
        assert_eq!(game.status(), GameStatus::Won(Stone::White));
    }

    #[test]
    fn test_overline_wins() {
        let mut game = Game::default();
        for i in [0, 1, 2, 4, 5] {
            game.apply_move(7, i).unwrap();
            game.apply_move(9, i).unwrap();
        }
        assert!(!game.is_game_over());
        game.apply_move(7, 3).unwrap();
        assert_eq!(game.winner(), Some(Stone::Black));
        assert_eq!(game.winning_line().unwrap().len(), 6);
    }

    #[test]
    fn test_four_in_row_keeps_playing() {
        let mut game = Game::default();
        for i in 0..4 {
            game.apply_move(7, i).unwrap();
            game.apply_move(8, i).unwrap();
        }
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_draw_on_full_board() {
        // Rows alternate XXOOX / OOXXO: no row, column or diagonal is uniform
        let mut game = Game::with_dimensions(5, 5, 5).unwrap();
        let layout = ["XXOOX", "OOXXO", "XXOOX", "OOXXO", "XXOOX"];
        let cells = |symbol: char| -> Vec<(i32, i32)> {
            layout
                .iter()
                .enumerate()
                .flat_map(|(r, line)| {
                    line.chars()
                        .enumerate()
                        .filter(move |&(_, c)| c == symbol)
                        .map(move |(c, _)| (r as i32, c as i32))
                })
                .collect()
        };
        let black = cells('X');
        let white = cells('O');
        assert_eq!((black.len(), white.len()), (13, 12));

        for i in 0..black.len() {
            assert_eq!(game.status(), GameStatus::InProgress);
            game.apply_move(black[i].0, black[i].1).unwrap();
            if let Some(&(r, c)) = white.get(i) {
                game.apply_move(r, c).unwrap();
            }
        }
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.winner(), None);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_listed_fill_order_completes_a_column() {
        // This interleaved fill gives Black all of column 2 on move 23
        let order = [
            (0, 0), (0, 1), (0, 2), (0, 3), (0, 4),
            (1, 1), (1, 0), (1, 3), (1, 2), (1, 4),
            (2, 2), (2, 1), (2, 0), (2, 4), (2, 3),
            (3, 3), (3, 2), (3, 1), (3, 0), (3, 4),
            (4, 4), (4, 3), (4, 2),
        ];
        let mut game = Game::with_dimensions(5, 5, 5).unwrap();
        play_all(&mut game, &order);
        assert_eq!(game.status(), GameStatus::Won(Stone::Black));
        assert!(matches!(game.apply_move(4, 1), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_moves_after_game_over_rejected() {
        let mut game = Game::default();
        play_horizontal_win(&mut game, 7, 5);
        let before = game.board().clone();
        assert!(matches!(game.apply_move(9, 9), Err(GameError::InvalidState(_))));
        assert!(matches!(game.undo(), Err(GameError::InvalidState(_))));
        assert!(matches!(game.redo(), Err(GameError::InvalidState(_))));
        assert_eq!(game.board(), &before);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_undo_restores_previous_position() {
        let mut game = Game::default();
        game.apply_move(3, 3).unwrap();
        let before = game.board().clone();
        let side = game.current_side();

        game.apply_move(4, 4).unwrap();
        assert!(game.undo().unwrap());
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_side(), side);
        assert!(game.can_redo());
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut game = Game::default();
        assert!(!game.undo().unwrap());
        assert!(!game.redo().unwrap());
    }

    #[test]
    fn test_redo_replays_in_order() {
        let mut game = Game::default();
        play_all(&mut game, &[(0, 0), (1, 1), (2, 2)]);
        game.undo().unwrap();
        game.undo().unwrap();
        assert_eq!(game.current_side(), Stone::White);

        assert!(game.redo().unwrap());
        assert_eq!(game.board().get(Pos::new(1, 1)), Stone::White);
        assert!(game.board().is_empty(Pos::new(2, 2)));
        assert!(game.redo().unwrap());
        assert_eq!(game.board().get(Pos::new(2, 2)), Stone::Black);
        assert_eq!(game.current_side(), Stone::White);
        assert!(!game.redo().unwrap());
    }

    #[test]
    fn test_new_move_clears_redo() {
        let mut game = Game::default();
        play_all(&mut game, &[(0, 0), (1, 1)]);
        game.undo().unwrap();
        assert!(game.can_redo());
        game.apply_move(5, 5).unwrap();
        assert!(!game.can_redo());
        assert!(!game.redo().unwrap());
    }

    #[test]
    fn test_redo_runs_win_check() {
        let mut game = Game::default();
        for i in 0..4 {
            game.apply_move(7, i).unwrap();
            game.apply_move(8, i).unwrap();
        }
        // Take back White's (8, 3) and Black's (7, 3)
        game.undo().unwrap();
        game.undo().unwrap();
        assert_eq!(game.current_side(), Stone::Black);

        // Extend the line behind the engine's back so replaying (7, 3) makes five
        game.board.set(Pos::new(7, 4), Stone::Black);
        assert!(game.redo().unwrap());
        assert_eq!(game.status(), GameStatus::Won(Stone::Black));
        assert!(!game.can_redo());
    }

    #[test]
    fn test_winning_redo_passes_the_turn() {
        let mut game = Game::default();
        for i in 0..4 {
            game.apply_move(7, i).unwrap();
            game.apply_move(8, i).unwrap();
        }
        game.apply_move(7, 4).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Stone::Black));
        assert_eq!(game.current_side(), Stone::Black);

        // Reopen the game, then replay the winning move
        game.status = GameStatus::InProgress;
        game.undo().unwrap();
        assert_eq!(game.current_side(), Stone::Black);
        assert!(game.redo().unwrap());
        assert_eq!(game.status(), GameStatus::Won(Stone::Black));
        assert_eq!(game.winner(), Some(Stone::Black));
        assert_eq!(game.current_side(), Stone::White);
    }

    #[test]
    fn test_redo_runs_draw_check() {
        let mut game = Game::with_dimensions(5, 5, 5).unwrap();
        let layout = ["XXOOX", "OOXXO", "XXOOX", "OOXXO", "XXOO."];
        for (r, line) in layout.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if let Some(stone) = Stone::from_symbol(ch) {
                    game.board.set(Pos::new(r as u8, c as u8), stone);
                }
            }
        }
        game.current = Stone::Black;
        game.apply_move(4, 4).unwrap();
        assert_eq!(game.status(), GameStatus::Draw);

        // Same position, but reach the last cell through undo/redo
        game.status = GameStatus::InProgress;
        game.undo().unwrap();
        assert!(game.redo().unwrap());
        assert_eq!(game.status(), GameStatus::Draw);
    }

    #[test]
    fn test_reset() {
        let mut game = Game::default();
        play_horizontal_win(&mut game, 7, 5);
        game.reset();
        assert_eq!(game.current_side(), Stone::Black);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.board().is_board_empty());
        assert!(game.history().is_empty());
        assert!(!game.can_redo());
    }

    #[test]
    fn test_non_square_board() {
        let mut game = Game::with_dimensions(10, 15, 5).unwrap();
        game.apply_move(5, 10).unwrap();
        assert_eq!(game.board().get(Pos::new(5, 10)), Stone::Black);
        assert!(game.apply_move(10, 5).is_err());
    }

    #[test]
    fn test_custom_win_length() {
        let mut game = Game::with_dimensions(7, 7, 3).unwrap();
        play_all(&mut game, &[(0, 0), (6, 6), (1, 1), (6, 5)]);
        assert!(!game.is_game_over());
        game.apply_move(2, 2).unwrap();
        assert_eq!(game.winner(), Some(Stone::Black));
    }

    #[test]
    fn test_load_board_derives_turn_and_status() {
        let mut game = Game::default();
        let mut board = Board::with_defaults();
        board.set(Pos::new(7, 7), Stone::Black);
        game.load_board(board);
        assert_eq!(game.current_side(), Stone::White);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.history().is_empty());

        let mut board = Board::with_defaults();
        for i in 0..5 {
            board.set(Pos::new(2, i), Stone::White);
            board.set(Pos::new(3, i), Stone::Black);
        }
        game.load_board(board);
        assert!(game.is_game_over());
        assert!(game.winning_line().is_some());
    }
}
