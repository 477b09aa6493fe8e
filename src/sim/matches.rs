//! Match detection: horizontal and vertical runs of three or more
//!
//! Pure scan over the board. A cell that sits on both a horizontal and a
//! vertical run (T, L and + shapes) is marked and counted once.

use super::board::Board;
use super::grid::{Cell, Grid};
use crate::consts::MIN_RUN;

/// Cells marked for removal this pass
pub type MarkSet = Grid<bool>;

/// Result of one detection pass
#[derive(Debug, Clone, PartialEq)]
pub struct Matches {
    pub marks: MarkSet,
    /// Number of distinct marked cells
    pub count: usize,
}

impl Matches {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_marked(&self, cell: Cell) -> bool {
        self.marks[cell]
    }
}

/// Scan every row and column for maximal runs of length >= 3
pub fn detect(board: &Board) -> Matches {
    let (rows, cols) = (board.rows(), board.columns());
    let mut marks = Grid::filled(rows, cols, false);
    let mut count = 0;

    for row in 0..rows {
        mark_runs(board, &mut marks, &mut count, cols, |i| Cell::new(row, i));
    }
    for col in 0..cols {
        mark_runs(board, &mut marks, &mut count, rows, |i| Cell::new(i, col));
    }

    Matches { marks, count }
}

/// Mark maximal runs along one line. `at` maps a position on the line to a cell.
fn mark_runs(
    board: &Board,
    marks: &mut MarkSet,
    count: &mut usize,
    len: usize,
    at: impl Fn(usize) -> Cell,
) {
    let mut run_start = 0;
    while run_start < len {
        let tile = board.tiles()[at(run_start)];
        let mut run_end = run_start + 1;
        while run_end < len && board.tiles()[at(run_end)] == tile {
            run_end += 1;
        }
        if run_end - run_start >= MIN_RUN {
            for i in run_start..run_end {
                let cell = at(i);
                if !marks[cell] {
                    marks[cell] = true;
                    *count += 1;
                }
            }
        }
        run_start = run_end;
    }
}
