//! Core board types.

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The 8 winning triples: 3 rows, 3 columns, 2 diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// A player's mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Mark {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Seat index for this mark (X = 0, O = 1).
    pub(crate) fn seat(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

/// One cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    /// No mark placed yet.
    Empty,
    /// Cell claimed by a player. Never cleared or reassigned within a session.
    Taken(Mark),
}

/// 3x3 tic-tac-toe board, cells 0-8 in row-major order.
///
/// Pure data. All mutation goes through [`crate::Session`], which validates
/// moves before calling [`Board::place`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Square; CELLS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELLS],
        }
    }

    /// Returns the square at `cell`, or `None` if `cell` is out of range.
    pub fn get(&self, cell: usize) -> Option<Square> {
        self.squares.get(cell).copied()
    }

    /// Whether `cell` already holds a mark. Range-checked via [`Board::get`];
    /// out-of-range cells are rejected upstream before this is asked.
    pub fn is_occupied(&self, cell: usize) -> bool {
        matches!(self.get(cell), Some(Square::Taken(_)))
    }

    /// Writes `mark` into `cell`. The caller (the session's move logic)
    /// guarantees the cell is in range and empty.
    pub fn place(&mut self, cell: usize, mark: Mark) {
        self.squares[cell] = Square::Taken(mark);
    }

    /// True iff any winning triple is non-empty and identical.
    pub fn has_winner(&self) -> bool {
        LINES.iter().any(|line| {
            match (
                self.squares[line[0]],
                self.squares[line[1]],
                self.squares[line[2]],
            ) {
                (Square::Taken(a), Square::Taken(b), Square::Taken(c)) => a == b && b == c,
                _ => false,
            }
        })
    }

    /// True iff all 9 cells are occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|&s| s != Square::Empty)
    }

    /// Formats the board as a 3x3 grid for log output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let cell = row * 3 + col;
                match self.squares[cell] {
                    Square::Empty => out.push('.'),
                    Square::Taken(Mark::X) => out.push('X'),
                    Square::Taken(Mark::O) => out.push('O'),
                }
                if col < 2 {
                    out.push('|');
                }
            }
            if row < 2 {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
