//! Press/drag/release tracking
//!
//! A swap is requested by pressing a tile, dragging off it, and releasing
//! over an orthogonal neighbour. Everything else resets quietly.

use glam::Vec2;

use super::cascade::SwapAttempt;
use super::grid::Cell;
use crate::layout::BoardLayout;

/// Pointer state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Pointer position in viewport pixels
    pub pos: Option<Vec2>,
    /// Button went down this tick
    pub pressed: bool,
    /// Button is held
    pub down: bool,
    /// Button went up this tick
    pub released: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    pressed: Option<Cell>,
    moved_outside: bool,
}

impl DragGesture {
    /// Tile currently held, if any
    pub fn pressed(&self) -> Option<Cell> {
        self.pressed
    }

    /// True once the held tile has been dragged off its own rectangle
    pub fn is_dragging(&self) -> bool {
        self.pressed.is_some() && self.moved_outside
    }

    pub fn reset(&mut self) {
        self.pressed = None;
        self.moved_outside = false;
    }

    /// Feed one pointer sample. Returns a swap request on a qualifying release.
    pub fn update(&mut self, sample: &PointerSample, layout: &BoardLayout, viewport: Vec2) -> Option<SwapAttempt> {
        let hovered = sample.pos.and_then(|p| layout.cell_at(p, viewport));

        if sample.pressed && hovered.is_some() {
            self.pressed = hovered;
            self.moved_outside = false;
        }

        // Button already held when the pointer arrived over the board
        if sample.down && self.pressed.is_none() && hovered.is_some() {
            self.pressed = hovered;
            self.moved_outside = false;
        }

        if sample.down {
            if let (Some(cell), Some(pos)) = (self.pressed, sample.pos) {
                if !layout.cell_contains(cell, pos, viewport) {
                    self.moved_outside = true;
                }
            }
        }

        if !sample.released {
            return None;
        }

        let request = match (self.pressed, hovered) {
            (Some(from), Some(to)) if self.moved_outside && from.is_adjacent(to) => {
                Some(SwapAttempt::new(from, to))
            }
            _ => None,
        };
        self.reset();
        request
    }
}
