//! Valid-move search

use super::board::Board;
use super::cascade::SwapAttempt;
use super::grid::Cell;
use super::matches::detect;

/// First adjacent swap that would produce a match, scanning row-major and
/// trying the right neighbour before the one below. The board is untouched.
pub fn find_swap(board: &Board) -> Option<SwapAttempt> {
    let mut scratch = board.clone();
    for row in 0..board.rows() {
        for col in 0..board.columns() {
            let from = Cell::new(row, col);
            let neighbours = [Cell::new(row, col + 1), Cell::new(row + 1, col)];
            for to in neighbours {
                if !board.contains(to) || board.get(from) == board.get(to) {
                    continue;
                }
                scratch.swap(from, to);
                let matched = !detect(&scratch).is_empty();
                scratch.swap(from, to);
                if matched {
                    return Some(SwapAttempt::new(from, to));
                }
            }
        }
    }
    None
}

/// Whether any swap on the board would match
pub fn has_moves(board: &Board) -> bool {
    find_swap(board).is_some()
}
