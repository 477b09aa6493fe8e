//! Fixed-extent 2-D storage and cell coordinates
//!
//! Board tiles, mark sets, drop counts and fall offsets all share this shape.

use serde::{Deserialize, Serialize};

/// A (row, column) coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells
    pub fn manhattan(&self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the cells share an edge
    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

/// Row-major grid with a fixed number of rows and columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid by evaluating `f` for every cell in row-major order
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(Cell) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(Cell::new(row, col)));
            }
        }
        Self { rows, cols, cells }
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
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Flat index of a cell. Panics when the cell is off the grid, so a
    /// column past the edge can never alias the next row.
    #[inline]
    fn offset(&self, cell: Cell) -> usize {
        assert!(self.contains(cell), "cell {cell:?} outside {}x{} grid", self.rows, self.cols);
        cell.row * self.cols + cell.col
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        if self.contains(cell) {
            self.cells.get(self.offset(cell))
        } else {
            None
        }
    }

    pub fn set(&mut self, cell: Cell, value: T) {
        let index = self.offset(cell);
        self.cells[index] = value;
    }

    /// Swap the values held by two cells
    pub fn swap(&mut self, a: Cell, b: Cell) {
        let (ia, ib) = (self.offset(a), self.offset(b));
        self.cells.swap(ia, ib);
    }

    /// Iterate over `(cell, value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (Cell::new(i / cols, i % cols), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }
}

impl<T> std::ops::Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &T {
        &self.cells[self.offset(cell)]
    }
}

impl<T> std::ops::IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        let index = self.offset(cell);
        &mut self.cells[index]
    }
}
