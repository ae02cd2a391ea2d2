//! Candidate move generation
//!
//! Candidates are the empty neighbors of existing stones (the frontier).
//! Emission order is fixed: occupied cells in row-major order, and for each
//! one its neighbors in [`NEIGHBOR_OFFSETS`] order. Search tie-breaks depend
//! on this order.

use std::collections::HashSet;

use crate::board::{Board, Pos};

/// Neighbor offsets, row by row from the upper-left
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Deterministic, de-duplicated candidate list for `board`.
///
/// Falls back to every empty cell in row-major order when the frontier is
/// empty, which in practice means the board has no stones. A full board
/// yields an empty list.
pub fn candidates(board: &Board) -> Vec<Pos> {
    let mut moves = Vec::new();
    let mut seen = HashSet::new();

    for pos in board.occupied() {
        for &(dr, dc) in &NEIGHBOR_OFFSETS {
            let Some(next) = pos.offset(dr, dc, 1, board.rows(), board.cols()) else {
                continue;
            };
            if board.is_empty(next) && seen.insert(next) {
                moves.push(next);
            }
        }
    }

    if moves.is_empty() {
        moves.extend(board.positions().filter(|&p| board.is_empty(p)));
    }
    moves
}
