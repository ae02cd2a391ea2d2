//! Window weights for Gomoku evaluation
//!
//! A window is a run of `win_length` cells along one line. Only windows
//! holding stones of a single side score; the weight depends on how many
//! stones that side still needs to fill the window.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Full window: a completed line
    pub const FIVE: i32 = 100_000;
    /// One stone short (4 + 1 empty in classic gomoku)
    pub const FOUR: i32 = 10_000;
    /// Two short
    pub const THREE: i32 = 1_000;
    /// Three short
    pub const TWO: i32 = 100;
    /// Four short (a lone stone in a five-cell window)
    pub const ONE: i32 = 10;
    /// Five short; only reachable when the win length exceeds five
    pub const TRACE: i32 = 1;
}

/// Weights indexed by the number of cells still missing
const WINDOW_WEIGHTS: [i32; 6] = [
    PatternScore::FIVE,
    PatternScore::FOUR,
    PatternScore::THREE,
    PatternScore::TWO,
    PatternScore::ONE,
    PatternScore::TRACE,
];

/// Score of a window holding `own` stones of one side and none of the other.
///
/// An empty window scores zero.
#[inline]
pub fn window_weight(own: usize, win_length: usize) -> i32 {
    if own == 0 || own > win_length {
        return 0;
    }
    WINDOW_WEIGHTS.get(win_length - own).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        // Each step drops by an order of magnitude
        assert_eq!(PatternScore::FIVE, PatternScore::FOUR * 10);
        assert_eq!(PatternScore::FOUR, PatternScore::THREE * 10);
        assert_eq!(PatternScore::THREE, PatternScore::TWO * 10);
        assert_eq!(PatternScore::TWO, PatternScore::ONE * 10);
    }

    #[test]
    fn test_classic_window_weights() {
        assert_eq!(window_weight(5, 5), PatternScore::FIVE);
        assert_eq!(window_weight(4, 5), PatternScore::FOUR);
        assert_eq!(window_weight(3, 5), PatternScore::THREE);
        assert_eq!(window_weight(2, 5), PatternScore::TWO);
        assert_eq!(window_weight(1, 5), PatternScore::ONE);
        assert_eq!(window_weight(0, 5), 0);
    }

    #[test]
    fn test_weights_follow_win_length() {
        assert_eq!(window_weight(3, 3), PatternScore::FIVE);
        assert_eq!(window_weight(2, 3), PatternScore::FOUR);
        assert_eq!(window_weight(1, 10), 0);
        assert_eq!(window_weight(4, 9), PatternScore::TRACE);
    }
}
