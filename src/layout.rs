//! Board pixel geometry
//!
//! Tiles are laid out on a fixed pitch (tile extent + spacing) inside a
//! margin, and the whole board is centred in the viewport. Hit testing uses
//! the same rectangles the presentation draws, so the spacing gaps and the
//! margin hit nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub rows: usize,
    pub columns: usize,
    pub tile_size: f32,
    pub tile_spacing: f32,
    pub margin: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            columns: GRID_COLUMNS,
            tile_size: TILE_SIZE,
            tile_spacing: TILE_SPACING,
            margin: GRID_MARGIN,
        }
    }
}

impl BoardLayout {
    /// Distance between the tops (or lefts) of neighbouring tiles
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.tile_size + self.tile_spacing
    }

    /// Size of the tile area, without margins
    pub fn grid_size(&self) -> Vec2 {
        let span = |n: usize| n as f32 * self.tile_size + n.saturating_sub(1) as f32 * self.tile_spacing;
        Vec2::new(span(self.columns), span(self.rows))
    }

    /// Size of the board including margins
    pub fn board_size(&self) -> Vec2 {
        self.grid_size() + Vec2::splat(2.0 * self.margin)
    }

    /// Top-left of the board when centred in `viewport` (floored to whole pixels)
    pub fn origin(&self, viewport: Vec2) -> Vec2 {
        ((viewport - self.board_size()) / 2.0).floor()
    }

    /// Top-left of a tile's resting rectangle
    pub fn tile_origin(&self, cell: Cell, viewport: Vec2) -> Vec2 {
        self.origin(viewport)
            + Vec2::splat(self.margin)
            + Vec2::new(cell.col as f32, cell.row as f32) * self.pitch()
    }

    /// Where to draw a tile given its current fall offset
    pub fn tile_draw_origin(&self, cell: Cell, fall_offset: f32, viewport: Vec2) -> Vec2 {
        self.tile_origin(cell, viewport) + Vec2::new(0.0, fall_offset)
    }

    /// Whether `point` lies in the tile rectangle of `cell` (left/top edges inclusive)
    pub fn cell_contains(&self, cell: Cell, point: Vec2, viewport: Vec2) -> bool {
        let min = self.tile_origin(cell, viewport);
        let max = min + Vec2::splat(self.tile_size);
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }

    /// The tile under `point`, if any
    pub fn cell_at(&self, point: Vec2, viewport: Vec2) -> Option<Cell> {
        let local = point - self.origin(viewport) - Vec2::splat(self.margin);
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let col = (local.x / self.pitch()).floor() as usize;
        let row = (local.y / self.pitch()).floor() as usize;
        if row >= self.rows || col >= self.columns {
            return None;
        }
        let cell = Cell::new(row, col);
        self.cell_contains(cell, point, viewport).then_some(cell)
    }
}
