//! Pure tic-tac-toe board data: marks, squares, and win/full queries.

mod types;

pub use types::{Board, CELLS, Mark, Square};
