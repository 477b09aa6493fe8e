//! Board state: a fixed grid of tile types
//!
//! The board never holds gaps. "Empty" only exists transiently inside a
//! collapse, so every cell always reads back a valid `TileType`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use crate::consts::*;
use crate::error::BoardError;

/// A tile type. Tiles of equal type are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileType(pub u8);

impl TileType {
    pub const RED: TileType = TileType(0);
    pub const GREEN: TileType = TileType(1);
    pub const BLUE: TileType = TileType(2);
    pub const YELLOW: TileType = TileType(3);

    /// Draw a uniformly random type in `[0, count)`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, count: u8) -> Self {
        TileType(rng.random_range(0..count))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Board dimensions and tile type count, fixed for a board's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    rows: usize,
    columns: usize,
    tile_types: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            columns: GRID_COLUMNS,
            tile_types: TILE_TYPE_COUNT,
        }
    }
}

impl BoardConfig {
    /// Validate a configuration.
    ///
    /// # Errors
    /// `InvalidConfiguration` when either dimension is zero or fewer than
    /// three tile types are requested (the initializer could then be left
    /// without a legal choice).
    pub fn new(rows: usize, columns: usize, tile_types: u8) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::InvalidConfiguration(format!(
                "board must have at least one row and column (got {rows}x{columns})"
            )));
        }
        if tile_types < MIN_TILE_TYPES {
            return Err(BoardError::InvalidConfiguration(format!(
                "tile_types must be at least {MIN_TILE_TYPES} (got {tile_types})"
            )));
        }
        Ok(Self {
            rows,
            columns,
            tile_types,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn tile_types(&self) -> u8 {
        self.tile_types
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.columns
    }
}

/// The grid of tile types. Single source of truth for board state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    tiles: Grid<TileType>,
}

impl Board {
    /// A board with every cell holding `tile`
    pub fn filled(config: BoardConfig, tile: TileType) -> Result<Self, BoardError> {
        check_tile(&config, tile)?;
        Ok(Self {
            config,
            tiles: Grid::filled(config.rows, config.columns, tile),
        })
    }

    /// Build a board from literal rows of tile type values.
    ///
    /// # Errors
    /// `InvalidConfiguration` for ragged rows or out-of-range tile types.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R], tile_types: u8) -> Result<Self, BoardError> {
        let columns = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let config = BoardConfig::new(rows.len(), columns, tile_types)?;
        if let Some(bad) = rows.iter().position(|r| r.as_ref().len() != columns) {
            return Err(BoardError::InvalidConfiguration(format!(
                "row {bad} has {} cells, expected {columns}",
                rows[bad].as_ref().len()
            )));
        }
        let tiles = Grid::from_fn(config.rows, config.columns, |c| TileType(rows[c.row].as_ref()[c.col]));
        for tile in tiles.values() {
            check_tile(&config, *tile)?;
        }
        Ok(Self { config, tiles })
    }

    /// Wrap a grid that the caller has already filled with in-range types
    pub(crate) fn from_grid(config: BoardConfig, tiles: Grid<TileType>) -> Self {
        debug_assert_eq!((tiles.rows(), tiles.cols()), (config.rows, config.columns));
        Self { config, tiles }
    }

    #[inline]
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.config.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.config.columns
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.config.contains(cell)
    }

    /// Tile at a cell (read-only snapshot accessor for rendering).
    /// Panics when the cell is off the board; use `get` to probe.
    #[inline]
    pub fn tile_at(&self, row: usize, col: usize) -> TileType {
        self.tiles[Cell::new(row, col)]
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<TileType> {
        self.tiles.get(cell).copied()
    }

    pub fn set(&mut self, cell: Cell, tile: TileType) {
        debug_assert!(tile.0 < self.config.tile_types);
        self.tiles.set(cell, tile);
    }

    /// Exchange the tiles of two cells
    pub fn swap(&mut self, a: Cell, b: Cell) {
        self.tiles.swap(a, b);
    }

    pub fn tiles(&self) -> &Grid<TileType> {
        &self.tiles
    }

    /// Draw a fresh random tile for this board's type count
    pub fn random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> TileType {
        TileType::random(rng, self.config.tile_types)
    }
}

fn check_tile(config: &BoardConfig, tile: TileType) -> Result<(), BoardError> {
    if tile.0 >= config.tile_types {
        return Err(BoardError::InvalidConfiguration(format!(
            "tile type {} out of range for {} types",
            tile.0, config.tile_types
        )));
    }
    Ok(())
}

/// Parse rows like `"0123"` into a board (tests only)
#[cfg(test)]
pub(crate) fn board_from_strs(rows: &[&str], tile_types: u8) -> Board {
    let rows: Vec<Vec<u8>> = rows
        .iter()
        .map(|r| r.bytes().map(|b| b - b'0').collect())
        .collect();
    Board::from_rows(rows.as_slice(), tile_types).expect("valid test board")
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            if row > 0 {
                writeln!(f)?;
            }
            for tile in self.tiles.row(row) {
                write!(f, "{}", tile.0)?;
            }
        }
        Ok(())
    }
}
