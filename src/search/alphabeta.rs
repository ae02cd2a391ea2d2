//! Fixed-depth minimax with alpha-beta pruning
//!
//! The searcher explores the position in place: each candidate stone is
//! written onto the caller's board for the duration of one branch and
//! removed again before the next one is tried. Removal is tied to a guard's
//! `Drop`, so the board is restored on every exit path, unwinding included.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::with_defaults();
//! board.set(Pos::new(7, 7), Stone::Black);
//!
//! let mut searcher = Searcher::with_depth(Stone::White, 2);
//! let result = searcher.search(&mut board);
//! assert!(result.best_move.is_some());
//! // The board is handed back unchanged
//! assert_eq!(board.stone_count(), 1);
//! ```

use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::board::{Board, Pos, Stone};
use crate::eval::evaluate;
use crate::rules::find_winner;

use super::movegen::candidates;

/// Plies searched by [`Searcher::new`]
pub const SEARCH_DEPTH: u8 = 4;

/// Score of a position the searching side has already won.
/// Depth-independent; a loss scores `-WIN_SCORE`.
pub const WIN_SCORE: i32 = 1_000_000_000;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found; `None` only when the board is full
    pub best_move: Option<Pos>,
    /// Minimax score of the best move for the searching side
    pub score: i32,
    /// Total nodes searched
    pub nodes: u64,
}

/// A stone placed for one search branch, removed when the guard drops.
struct Placement<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl<'a> Placement<'a> {
    fn new(board: &'a mut Board, pos: Pos, stone: Stone) -> Self {
        debug_assert!(board.is_empty(pos), "search placed on occupied {pos}");
        board.set(pos, stone);
        Self { board, pos }
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, Stone::Empty);
    }
}

/// Minimax searcher playing one side.
///
/// Callers must give the searcher exclusive use of the board for the length
/// of a call; it is mutated during the search and restored before returning.
#[derive(Debug, Clone)]
pub struct Searcher {
    side: Stone,
    depth: u8,
    nodes: u64,
}

impl Searcher {
    /// Searcher for `side` at the standard [`SEARCH_DEPTH`].
    pub fn new(side: Stone) -> Self {
        Self::with_depth(side, SEARCH_DEPTH)
    }

    /// Searcher with a custom depth (at least one ply), for hints and analysis.
    pub fn with_depth(side: Stone, depth: u8) -> Self {
        debug_assert!(side != Stone::Empty);
        Self {
            side,
            depth: depth.max(1),
            nodes: 0,
        }
    }

    #[inline]
    pub fn side(&self) -> Stone {
        self.side
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Pick a move for the searching side, or `None` if the board is full.
    pub fn select_move(&mut self, board: &mut Board) -> Option<Pos> {
        self.search(board).best_move
    }

    /// Full search returning the chosen move with its score and node count.
    ///
    /// An empty board is answered with its center cell without searching.
    /// Ties go to the earliest candidate in move-generator order.
    pub fn search(&mut self, board: &mut Board) -> SearchResult {
        self.nodes = 0;

        if board.is_board_empty() {
            return SearchResult {
                best_move: Some(board.center()),
                score: 0,
                nodes: 0,
            };
        }

        let moves = candidates(board);
        let mut best_move = None;
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;

        for mov in moves {
            let score = {
                let mut placed = Placement::new(board, mov, self.side);
                self.minimax(&mut placed, self.depth - 1, alpha, i32::MAX, false)
            };

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            alpha = alpha.max(score);
        }

        debug!(
            side = self.side.name(),
            depth = self.depth,
            nodes = self.nodes,
            best = ?best_move,
            score = best_score,
            "search finished"
        );

        SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            nodes: self.nodes,
        }
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        // Terminal positions score the same at any remaining depth
        if let Some(winner) = find_winner(board) {
            return if winner == self.side { WIN_SCORE } else { -WIN_SCORE };
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate(board, self.side);
        }

        let moves = candidates(board);

        if maximizing {
            let mut max_eval = i32::MIN;
            for mov in moves {
                let eval = {
                    let mut placed = Placement::new(board, mov, self.side);
                    self.minimax(&mut placed, depth - 1, alpha, beta, false)
                };
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mov in moves {
                let eval = {
                    let mut placed = Placement::new(board, mov, self.side.opponent());
                    self.minimax(&mut placed, depth - 1, alpha, beta, true)
                };
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}
