//! Board representation for Gomoku

pub mod bitboard;
pub mod board;


// Re-exports
pub use bitboard::Bitboard;
pub use board::{validate_dimensions, Board};

/// Smallest allowed row/column count
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest allowed row/column count
pub const MAX_BOARD_SIZE: usize = 25;
/// Default board size (15x15)
pub const DEFAULT_BOARD_SIZE: usize = 15;
pub const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE; // 625

/// Shortest allowed winning line
pub const MIN_WIN_LENGTH: usize = 3;
/// Longest allowed winning line
pub const MAX_WIN_LENGTH: usize = 10;
/// Classic five-in-a-row
pub const DEFAULT_WIN_LENGTH: usize = 5;

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Empty,
    /// First side to move, written `X`
    Black,
    /// Second side, written `O`
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Character used by the text encoding
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Stone::Empty => '.',
            Stone::Black => 'X',
            Stone::White => 'O',
        }
    }

    pub fn from_symbol(c: char) -> Option<Stone> {
        match c {
            '.' => Some(Stone::Empty),
            'X' => Some(Stone::Black),
            'O' => Some(Stone::White),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Empty => "Empty",
            Stone::Black => "Black",
            Stone::White => "White",
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < MAX_BOARD_SIZE && (col as usize) < MAX_BOARD_SIZE);
        Self { row, col }
    }

    /// Row-major index for a board with `cols` columns
    #[inline]
    pub fn to_index(self, cols: usize) -> usize {
        self.row as usize * cols + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, cols: usize) -> Self {
        Self {
            row: (idx / cols) as u8,
            col: (idx % cols) as u8,
        }
    }

    /// Step `k` cells along `(dr, dc)`, or `None` if that leaves `rows x cols`
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, k: i32, rows: usize, cols: usize) -> Option<Pos> {
        let r = self.row as i32 + dr * k;
        let c = self.col as i32 + dc * k;
        if r >= 0 && r < rows as i32 && c >= 0 && c < cols as i32 {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }
}

/// Lowercase name, the same spelling as the serialized form
impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stone::Empty => "empty",
            Stone::Black => "black",
            Stone::White => "white",
        })
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}
