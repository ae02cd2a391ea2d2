//! Rectangular board with a configurable winning line length

use std::fmt;

use super::bitboard::Bitboard;
use super::{
    Pos, Stone, DEFAULT_BOARD_SIZE, DEFAULT_WIN_LENGTH, MAX_BOARD_SIZE, MAX_WIN_LENGTH,
    MIN_BOARD_SIZE, MIN_WIN_LENGTH,
};
use crate::error::GameError;

/// Game board.
///
/// Dimensions and win length are fixed at construction. Cells are stored as
/// two occupancy bitboards indexed row-major, so iterating a side's stones
/// visits them in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    win_length: usize,
    /// Black stones bitboard
    black: Bitboard,
    /// White stones bitboard
    white: Bitboard,
}

impl Board {
    /// Create an empty board.
    ///
    /// Fails with [`GameError::Config`] when a dimension is outside
    /// `5..=25`, the win length is outside `3..=10`, or the win length
    /// cannot fit on the board.
    pub fn new(rows: usize, cols: usize, win_length: usize) -> Result<Self, GameError> {
        validate_dimensions(rows, cols, win_length)?;
        Ok(Self {
            rows,
            cols,
            win_length,
            black: Bitboard::new(),
            white: Bitboard::new(),
        })
    }

    /// Standard 15x15 five-in-a-row board.
    pub fn with_defaults() -> Self {
        Self {
            rows: DEFAULT_BOARD_SIZE,
            cols: DEFAULT_BOARD_SIZE,
            win_length: DEFAULT_WIN_LENGTH,
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// True iff both indices are within the board extents
    #[inline]
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        assert!(
            (pos.row as usize) < self.rows && (pos.col as usize) < self.cols,
            "position {pos} outside {}x{} board",
            self.rows,
            self.cols
        );
        pos.to_index(self.cols)
    }

    /// Get stone at position. Panics if `pos` is off the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        let idx = self.index(pos);
        if self.black.get(idx) {
            Stone::Black
        } else if self.white.get(idx) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Write a cell. `Stone::Empty` clears it. Panics if `pos` is off the board.
    #[inline]
    pub fn set(&mut self, pos: Pos, stone: Stone) {
        let idx = self.index(pos);
        match stone {
            Stone::Black => {
                self.white.clear(idx);
                self.black.set(idx);
            }
            Stone::White => {
                self.black.clear(idx);
                self.white.set(idx);
            }
            Stone::Empty => {
                self.black.clear(idx);
                self.white.clear(idx);
            }
        }
    }

    /// Check if position is empty. Panics if `pos` is off the board.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        let idx = self.index(pos);
        !self.black.get(idx) && !self.white.get(idx)
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.black.clear_all();
        self.white.clear_all();
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Occupied cells of either color, in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.black | self.white)
            .iter_ones()
            .map(|idx| Pos::from_index(idx, self.cols))
    }

    /// Every cell in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |idx| Pos::from_index(idx, cols))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board has no stones
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Check if no empty cell remains
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.rows * self.cols
    }

    /// Center cell (rows/2, cols/2)
    #[inline]
    pub fn center(&self) -> Pos {
        Pos::new((self.rows / 2) as u8, (self.cols / 2) as u8)
    }

    /// Encode as text: a `ROWSxCOLS/WIN` header line followed by one line
    /// per row using `.`, `X` and `O`.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(8 + self.rows * (self.cols + 1));
        out.push_str(&format!("{}x{}/{}", self.rows, self.cols, self.win_length));
        for row in 0..self.rows {
            out.push('\n');
            for col in 0..self.cols {
                out.push(self.get(Pos::new(row as u8, col as u8)).symbol());
            }
        }
        out
    }

    /// Rebuild a board from [`Board::encode`] output.
    pub fn decode(text: &str) -> Result<Self, GameError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let header = lines
            .next()
            .ok_or_else(|| GameError::Config("empty board data".to_string()))?;
        let (rows, cols, win_length) = parse_header(header)?;

        let mut board = Board::new(rows, cols, win_length)?;
        let mut row_count = 0;
        for (row, line) in lines.enumerate() {
            if row >= rows {
                return Err(GameError::Config(format!(
                    "board data has more than {rows} rows"
                )));
            }
            let width = line.chars().count();
            if width != cols {
                return Err(GameError::Config(format!(
                    "row {row} has {width} cells, expected {cols}"
                )));
            }
            for (col, c) in line.chars().enumerate() {
                let stone = Stone::from_symbol(c).ok_or_else(|| {
                    GameError::Config(format!("invalid cell '{c}' at ({row}, {col})"))
                })?;
                board.set(Pos::new(row as u8, col as u8), stone);
            }
            row_count += 1;
        }

        if row_count != rows {
            return Err(GameError::Config(format!(
                "board data has {row_count} rows, expected {rows}"
            )));
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.cols {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)?;
        for row in 0..self.rows {
            write!(f, "{row:>3}")?;
            for col in 0..self.cols {
                write!(f, "{:>3}", self.get(Pos::new(row as u8, col as u8)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Check board dimensions against the supported ranges
pub fn validate_dimensions(rows: usize, cols: usize, win_length: usize) -> Result<(), GameError> {
    let sizes = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
    if !sizes.contains(&rows) {
        return Err(GameError::Config(format!(
            "rows must be in {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}, got {rows}"
        )));
    }
    if !sizes.contains(&cols) {
        return Err(GameError::Config(format!(
            "cols must be in {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}, got {cols}"
        )));
    }
    if !(MIN_WIN_LENGTH..=MAX_WIN_LENGTH).contains(&win_length) {
        return Err(GameError::Config(format!(
            "win length must be in {MIN_WIN_LENGTH}..={MAX_WIN_LENGTH}, got {win_length}"
        )));
    }
    if win_length > rows.max(cols) {
        return Err(GameError::Config(format!(
            "win length {win_length} does not fit a {rows}x{cols} board"
        )));
    }
    Ok(())
}

fn parse_header(header: &str) -> Result<(usize, usize, usize), GameError> {
    let bad = || GameError::Config(format!("malformed board header '{header}'"));
    let (dims, win) = header.split_once('/').ok_or_else(bad)?;
    let (rows, cols) = dims.split_once('x').ok_or_else(bad)?;
    let rows = rows.parse().map_err(|_| bad())?;
    let cols = cols.parse().map_err(|_| bad())?;
    let win = win.parse().map_err(|_| bad())?;
    Ok((rows, cols, win))
}
