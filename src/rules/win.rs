//! Win condition checking
//!
//! A side wins with `win_length` or more of its stones in an unbroken
//! line: horizontal, vertical or either diagonal. Overlines count.

use crate::board::{Board, Pos, Stone};

/// Direction vectors for line checking (4 directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Count consecutive `color` stones from `pos` along `(dr, dc)`, excluding `pos`
#[inline]
fn count_direction(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let mut count = 0;
    let mut k = 1;
    while let Some(next) = pos.offset(dr, dc, k, board.rows(), board.cols()) {
        if board.get(next) != color {
            break;
        }
        count += 1;
        k += 1;
    }
    count
}

/// Check whether the stone at `pos` completes a winning line.
///
/// Only the four lines through `pos` are examined, so this is the check to
/// run right after a placement.
pub fn has_line_at(board: &Board, pos: Pos) -> bool {
    let color = board.get(pos);
    if color == Stone::Empty {
        return false;
    }
    DIRECTIONS.iter().any(|&(dr, dc)| {
        1 + count_direction(board, pos, dr, dc, color) + count_direction(board, pos, -dr, -dc, color)
            >= board.win_length()
    })
}

/// Cells of the winning line through `pos`, ordered from one end to the other.
pub fn winning_line_at(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let color = board.get(pos);
    if color == Stone::Empty {
        return None;
    }
    for &(dr, dc) in &DIRECTIONS {
        let back = count_direction(board, pos, -dr, -dc, color) as i32;
        let forward = count_direction(board, pos, dr, dc, color) as i32;
        if (1 + back + forward) as usize >= board.win_length() {
            let line = (-back..=forward)
                .filter_map(|k| pos.offset(dr, dc, k, board.rows(), board.cols()))
                .collect();
            return Some(line);
        }
    }
    None
}

/// Scan the whole board for a completed line.
///
/// Returns the color owning the first line found in row-major order of its
/// starting stone. Each stone is only examined as the start of a run, so
/// the scan is linear in the number of stones.
pub fn find_winner(board: &Board) -> Option<Stone> {
    for pos in board.occupied() {
        let color = board.get(pos);
        for &(dr, dc) in &DIRECTIONS {
            if let Some(prev) = pos.offset(-dr, -dc, 1, board.rows(), board.cols()) {
                if board.get(prev) == color {
                    continue; // Not the start of this run
                }
            }
            if 1 + count_direction(board, pos, dr, dc, color) >= board.win_length() {
                return Some(color);
            }
        }
    }
    None
}
