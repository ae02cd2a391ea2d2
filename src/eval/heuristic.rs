//! Heuristic evaluation function for Gomoku board positions
//!
//! Every window of `win_length` cells along the four line orientations is
//! scored on its own and the results are summed. A stone sitting in several
//! overlapping windows is counted in each of them; that overlap is what
//! makes dense, open groups outscore scattered stones.

use crate::board::{Board, Pos, Stone};
use crate::rules::DIRECTIONS;

use super::patterns::window_weight;

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate disadvantage for `color`
/// - Zero for an empty or perfectly balanced board
///
/// The evaluation is symmetric: `evaluate(b, Black) == -evaluate(b, White)`.
/// Passing `Stone::Empty` yields zero.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    if color == Stone::Empty {
        return 0;
    }
    let win_length = board.win_length();
    let span = win_length as i32 - 1;
    let mut score = 0;

    for start in board.positions() {
        for &(dr, dc) in &DIRECTIONS {
            // Window must fit entirely on the board
            if start.offset(dr, dc, span, board.rows(), board.cols()).is_none() {
                continue;
            }
            score += evaluate_window(board, start, dr, dc, color);
        }
    }

    score
}

/// Score one window starting at `start` and running along `(dr, dc)`.
///
/// Mixed windows are dead for both sides and score zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn evaluate_window(board: &Board, start: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let win_length = board.win_length();
    let mut own = 0;
    let mut opp = 0;

    for k in 0..win_length as i32 {
        let r = i32::from(start.row) + dr * k;
        let c = i32::from(start.col) + dc * k;
        match board.get(Pos::new(r as u8, c as u8)) {
            Stone::Empty => {}
            s if s == color => own += 1,
            _ => opp += 1,
        }
        if own > 0 && opp > 0 {
            return 0;
        }
    }

    if opp == 0 {
        window_weight(own, win_length)
    } else {
        -window_weight(opp, win_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PatternScore;

    fn place(board: &mut Board, stones: &[(u8, u8, Stone)]) {
        for &(r, c, s) in stones {
            board.set(Pos::new(r, c), s);
        }
    }

    #[test]
    fn test_empty_board_is_zero() {
        let board = Board::with_defaults();
        assert_eq!(evaluate(&board, Stone::Black), 0);
        assert_eq!(evaluate(&board, Stone::White), 0);
    }

    #[test]
    fn test_symmetric() {
        let mut board = Board::with_defaults();
        place(
            &mut board,
            &[
                (7, 7, Stone::Black),
                (7, 8, Stone::Black),
                (8, 8, Stone::White),
                (6, 9, Stone::Black),
                (3, 3, Stone::White),
            ],
        );
        let black = evaluate(&board, Stone::Black);
        assert_ne!(black, 0);
        assert_eq!(black, -evaluate(&board, Stone::White));
    }

    #[test]
    fn test_balanced_position_is_zero() {
        // Mirror-image stones far apart cancel out
        let mut board = Board::with_defaults();
        place(&mut board, &[(2, 2, Stone::Black), (12, 12, Stone::White)]);
        assert_eq!(evaluate(&board, Stone::Black), 0);
    }

    #[test]
    fn test_single_stone_on_five_board() {
        // 5x5: one row, one column, one diagonal window through the corner
        let mut board = Board::new(5, 5, 5).unwrap();
        place(&mut board, &[(0, 0, Stone::Black)]);
        assert_eq!(evaluate(&board, Stone::Black), 3 * PatternScore::ONE);
    }

    #[test]
    fn test_center_stone_on_five_board() {
        // Center cell lies in the middle row, middle column and both diagonals
        let mut board = Board::new(5, 5, 5).unwrap();
        place(&mut board, &[(2, 2, Stone::White)]);
        assert_eq!(evaluate(&board, Stone::White), 4 * PatternScore::ONE);
        assert_eq!(evaluate(&board, Stone::Black), -4 * PatternScore::ONE);
    }

    #[test]
    fn test_mixed_window_scores_zero() {
        let mut board = Board::new(5, 5, 5).unwrap();
        place(&mut board, &[(0, 0, Stone::Black), (0, 4, Stone::White)]);
        // Row 0 is mixed; the column and diagonal windows cancel out
        assert_eq!(evaluate(&board, Stone::Black), 0);
    }

    #[test]
    fn test_four_outscores_scattered_stones() {
        let mut line = Board::with_defaults();
        place(&mut line, &(3..7).map(|c| (7, c, Stone::Black)).collect::<Vec<_>>());

        let mut scattered = Board::with_defaults();
        place(
            &mut scattered,
            &[(1, 1, Stone::Black), (1, 13, Stone::Black), (13, 1, Stone::Black), (13, 13, Stone::Black)],
        );

        let line_score = evaluate(&line, Stone::Black);
        assert!(line_score >= 2 * PatternScore::FOUR);
        assert!(line_score > evaluate(&scattered, Stone::Black));
    }

    #[test]
    fn test_opponent_threat_is_negative() {
        let mut board = Board::with_defaults();
        place(&mut board, &(0..4).map(|c| (10, 5 + c, Stone::White)).collect::<Vec<_>>());
        assert!(evaluate(&board, Stone::Black) <= -PatternScore::FOUR);
    }

    #[test]
    fn test_short_win_length_windows() {
        let mut board = Board::new(5, 5, 3).unwrap();
        place(&mut board, &[(0, 0, Stone::Black), (0, 1, Stone::Black), (0, 2, Stone::Black)]);
        assert!(evaluate(&board, Stone::Black) >= PatternScore::FIVE);
    }
}
