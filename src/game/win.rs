use crate::models::{Board, Symbol};

/// The eight winning lines, in scan order: rows, columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the symbol owning the first completed line, if any.
///
/// A full board with no winner is a draw; callers check `Board::is_full`
/// for that.
pub fn evaluate(board: &Board) -> Option<Symbol> {
    LINES.iter().find_map(|&[a, b, c]| {
        let symbol = board.get(a)?;
        (board.get(b) == Some(symbol) && board.get(c) == Some(symbol)).then_some(symbol)
    })
}
