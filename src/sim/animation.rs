//! Cascade animation state machine
//!
//! Turns the synchronous resolve loop into one detect+collapse step per
//! visual settle: tiles fall toward their resting rows, and only once every
//! offset reaches zero does the next step run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::cascade::{CascadeStep, resolve_step};
use super::collapse::Drops;
use super::grid::{Cell, Grid};

/// Animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimPhase {
    /// Nothing falling; swaps are accepted
    Idle,
    /// Tiles falling or a detect+collapse step pending
    Resolving,
}

/// Per-cell visual offset (pixels). Negative means the tile is still above
/// its resting position. Offsets only move toward zero and never pass it.
#[derive(Debug, Clone, PartialEq)]
pub struct FallOffsets {
    offsets: Grid<f32>,
}

impl FallOffsets {
    pub fn settled(rows: usize, cols: usize) -> Self {
        Self {
            offsets: Grid::filled(rows, cols, 0.0),
        }
    }

    /// Offsets for a fresh collapse: each tile starts `slots × pitch` above its row
    pub fn from_drops(drops: &Drops, pitch: f32) -> Self {
        let grid = drops.grid();
        Self {
            offsets: Grid::from_fn(grid.rows(), grid.cols(), |cell| -drops.distance(cell, pitch)),
        }
    }

    #[inline]
    pub fn at(&self, cell: Cell) -> f32 {
        self.offsets[cell]
    }

    pub fn is_settled(&self) -> bool {
        self.offsets.values().all(|o| *o == 0.0)
    }

    /// Move every offset toward zero by `step` pixels, clamping at zero.
    /// Negative or NaN steps leave the offsets where they are.
    pub fn advance(&mut self, step: f32) {
        let step = step.max(0.0);
        for offset in self.offsets.values_mut() {
            if *offset < 0.0 {
                *offset = (*offset + step).min(0.0);
            }
        }
    }
}

/// Sequences cascade steps over time
#[derive(Debug, Clone)]
pub struct CascadeAnimation {
    phase: AnimPhase,
    offsets: FallOffsets,
    /// Settle speed (pixels/second)
    fall_speed: f32,
    /// Row pitch: tile extent + spacing (pixels)
    pitch: f32,
    /// Steps run in the current cascade
    passes: u32,
    /// Tiles cleared in the current cascade
    cleared: usize,
    /// Steps after which a cascade is reported unstable
    max_passes: u32,
}

impl CascadeAnimation {
    pub fn new(rows: usize, cols: usize, fall_speed: f32, pitch: f32, max_passes: u32) -> Self {
        Self {
            phase: AnimPhase::Idle,
            offsets: FallOffsets::settled(rows, cols),
            fall_speed,
            pitch,
            passes: 0,
            cleared: 0,
            max_passes,
        }
    }

    #[inline]
    pub fn phase(&self) -> AnimPhase {
        self.phase
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == AnimPhase::Idle
    }

    /// Visual offset of a cell (read-only accessor for rendering)
    #[inline]
    pub fn fall_offset_at(&self, row: usize, col: usize) -> f32 {
        self.offsets.at(Cell::new(row, col))
    }

    pub fn offsets(&self) -> &FallOffsets {
        &self.offsets
    }

    /// Tiles cleared so far in the current (or last) cascade
    pub fn cleared(&self) -> usize {
        self.cleared
    }

    /// Begin a cascade from a step that already cleared tiles
    pub fn start(&mut self, step: CascadeStep) {
        self.passes = 0;
        self.cleared = 0;
        self.apply(step);
    }

    fn apply(&mut self, step: CascadeStep) {
        self.passes += 1;
        self.cleared += step.cleared;
        self.offsets = FallOffsets::from_drops(&step.drops, self.pitch);
        self.phase = AnimPhase::Resolving;
        if self.passes == self.max_passes {
            log::warn!(
                "Cascade still running after {} passes ({} tiles cleared)",
                self.passes,
                self.cleared
            );
        }
    }

    /// Advance falling tiles by `dt` seconds. Once everything has settled,
    /// run the next detect+collapse step, going idle when it clears nothing.
    pub fn advance<R: Rng + ?Sized>(&mut self, board: &mut Board, dt: f32, rng: &mut R) -> AnimPhase {
        if self.phase == AnimPhase::Idle {
            return self.phase;
        }

        self.offsets.advance(self.fall_speed * dt);
        if !self.offsets.is_settled() {
            return self.phase;
        }

        match resolve_step(board, rng) {
            Some(step) => self.apply(step),
            None => {
                log::info!(
                    "Cascade finished: {} passes, {} tiles cleared",
                    self.passes,
                    self.cleared
                );
                self.phase = AnimPhase::Idle;
            }
        }
        self.phase
    }
}
