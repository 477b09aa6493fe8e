//! Remove matched tiles, drop survivors, refill from the top
//!
//! Works column by column from the bottom up. Survivors keep their relative
//! order; vacated top rows get uniform-random types. Refill may create new
//! matches, which feed the next cascade pass.

use rand::Rng;

use super::board::{Board, TileType};
use super::grid::{Cell, Grid};
use super::matches::MarkSet;

/// How many row-slots each cell's tile fell during the last collapse.
///
/// Spawned tiles enter from above the board, so a column that lost `n`
/// tiles spawns `n` tiles that each fall `n` slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Drops {
    slots: Grid<u32>,
}

impl Drops {
    /// Slots fallen by the tile now at `cell`
    #[inline]
    pub fn slots(&self, cell: Cell) -> u32 {
        self.slots[cell]
    }

    /// Pixel distance fallen by the tile now at `cell`, given the row pitch
    /// (tile extent + spacing)
    #[inline]
    pub fn distance(&self, cell: Cell, pitch: f32) -> f32 {
        self.slots[cell] as f32 * pitch
    }

    pub fn grid(&self) -> &Grid<u32> {
        &self.slots
    }

    /// True if no tile moved
    pub fn is_still(&self) -> bool {
        self.slots.values().all(|s| *s == 0)
    }
}

/// Remove every marked cell, compact survivors downward and refill.
pub fn collapse<R: Rng + ?Sized>(board: &mut Board, marks: &MarkSet, rng: &mut R) -> Drops {
    let (rows, cols) = (board.rows(), board.columns());
    let mut slots = Grid::filled(rows, cols, 0u32);

    for col in 0..cols {
        // Bottom-up compaction: `write` is the lowest row not yet filled
        let mut write = rows;
        for row in (0..rows).rev() {
            let from = Cell::new(row, col);
            if marks[from] {
                continue;
            }
            write -= 1;
            let to = Cell::new(write, col);
            let tile: TileType = board.tiles()[from];
            board.set(to, tile);
            slots[to] = (write - row) as u32;
        }

        // Rows 0..write were vacated
        let vacated = write as u32;
        for row in 0..write {
            let cell = Cell::new(row, col);
            let tile = board.random_tile(rng);
            board.set(cell, tile);
            slots[cell] = vacated;
        }
    }

    Drops { slots }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{TILE_SIZE, TILE_SPACING};
    use crate::sim::board::board_from_strs;
    use crate::sim::matches::detect;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn column(board: &Board, col: usize) -> Vec<u8> {
        (0..board.rows()).map(|r| board.tile_at(r, col).0).collect()
    }

    #[test]
    fn test_bottom_three_removed_column_shifts_down() {
        // Column of 9, rows 6..=8 are a vertical run of 3s
        let rows = ["0", "1", "2", "0", "1", "2", "3", "3", "3"];
        let mut board = board_from_strs(&rows, 4);
        let matches = detect(&board);
        assert_eq!(matches.count, 3);

        let mut rng = Pcg32::seed_from_u64(1);
        let drops = collapse(&mut board, &matches.marks, &mut rng);

        // Old rows 0..=5 now sit at rows 3..=8
        assert_eq!(&column(&board, 0)[3..], &[0, 1, 2, 0, 1, 2]);
        for row in 0..3 {
            assert!(board.tile_at(row, 0).0 < 4);
        }
        for row in 0..9 {
            assert_eq!(drops.slots(Cell::new(row, 0)), 3);
        }

        let pitch = TILE_SIZE + TILE_SPACING;
        assert_eq!(drops.distance(Cell::new(3, 0), pitch), 3.0 * (TILE_SIZE + TILE_SPACING));
    }

    #[test]
    fn test_gap_in_middle_preserves_order() {
        let rows = ["0", "1", "2", "2", "2", "3", "1"];
        let mut board = board_from_strs(&rows, 4);
        let matches = detect(&board);
        let mut rng = Pcg32::seed_from_u64(2);
        let drops = collapse(&mut board, &matches.marks, &mut rng);

        assert_eq!(&column(&board, 0)[3..], &[0, 1, 3, 1]);
        // Tiles below the gap did not move
        assert_eq!(drops.slots(Cell::new(5, 0)), 0);
        assert_eq!(drops.slots(Cell::new(6, 0)), 0);
        // Tiles above the gap fell three slots
        assert_eq!(drops.slots(Cell::new(3, 0)), 3);
        assert_eq!(drops.slots(Cell::new(4, 0)), 3);
        // Spawned tiles fell the number of tiles removed
        assert_eq!(drops.slots(Cell::new(0, 0)), 3);
    }

    #[test]
    fn test_row_removal_drops_one_slot() {
        let mut board = board_from_strs(&["012", "000", "123"], 4);
        let matches = detect(&board);
        let mut rng = Pcg32::seed_from_u64(3);
        let drops = collapse(&mut board, &matches.marks, &mut rng);
        // Row 1 removed in every column: row 0 drops one, row 2 stays
        for col in 0..3 {
            assert_eq!(drops.slots(Cell::new(2, col)), 0);
            assert_eq!(drops.slots(Cell::new(1, col)), 1);
            assert_eq!(drops.slots(Cell::new(0, col)), 1);
        }
        assert_eq!(board.tile_at(1, 0).0, 0);
        assert_eq!(board.tile_at(1, 1).0, 1);
        assert_eq!(board.tile_at(1, 2).0, 2);
        assert_eq!(board.tile_at(2, 2).0, 3);
    }

    #[test]
    fn test_empty_mark_set_is_noop() {
        let mut board = board_from_strs(&["012", "120"], 3);
        let before = board.clone();
        let marks = Grid::filled(2, 3, false);
        let mut rng = Pcg32::seed_from_u64(4);
        let drops = collapse(&mut board, &marks, &mut rng);
        assert_eq!(board, before);
        assert!(drops.is_still());
    }

    #[test]
    fn test_top_row_run_refilled_in_place() {
        let mut board = board_from_strs(&["2220", "0101", "1010"], 4);
        let matches = detect(&board);
        let mut rng = Pcg32::seed_from_u64(5);
        collapse(&mut board, &matches.marks, &mut rng);
        // Rows below the removed run are unchanged
        assert_eq!(board.tiles().row(1), &[TileType(0), TileType(1), TileType(0), TileType(1)]);
        assert_eq!(board.tile_at(0, 3), TileType(0));
    }
}
