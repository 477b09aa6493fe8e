//! Board initialization, cascade resolution and swap validation
//!
//! A single detect+collapse step is the primitive. The synchronous resolver
//! loops it to a fixpoint; the animated path runs one step per settle.

use rand::Rng;

use super::board::{Board, BoardConfig, TileType};
use super::collapse::{Drops, collapse};
use super::grid::{Cell, Grid};
use super::matches::detect;
use crate::error::BoardError;

/// A swap requested by the player: two cells that should trade tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAttempt {
    pub from: Cell,
    pub to: Cell,
}

impl SwapAttempt {
    pub fn new(from: Cell, to: Cell) -> Self {
        Self { from, to }
    }

    /// Both cells on the board and exactly one step apart
    pub fn is_valid_on(&self, board: &Board) -> bool {
        board.contains(self.from) && board.contains(self.to) && self.from.is_adjacent(self.to)
    }
}

/// Outcome of one detect+collapse step
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeStep {
    /// Tiles removed this step
    pub cleared: usize,
    /// Per-cell fall distances for animation
    pub drops: Drops,
}

/// Build a board with no initial runs.
///
/// Each cell is redrawn until it doesn't complete a run with the two cells
/// to its left or the two cells above it. Diagonal and L configurations are
/// not checked.
pub fn init_board<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Board {
    let (rows, cols) = (config.rows(), config.columns());
    let mut tiles = Grid::filled(rows, cols, TileType(0));

    for row in 0..rows {
        for col in 0..cols {
            let tile = loop {
                let t = TileType::random(rng, config.tile_types());
                let left = col >= 2
                    && tiles[Cell::new(row, col - 1)] == t
                    && tiles[Cell::new(row, col - 2)] == t;
                let above = row >= 2
                    && tiles[Cell::new(row - 1, col)] == t
                    && tiles[Cell::new(row - 2, col)] == t;
                if !left && !above {
                    break t;
                }
            };
            tiles[Cell::new(row, col)] = tile;
        }
    }

    log::info!("Initialized {rows}x{cols} board with {} tile types", config.tile_types());
    Board::from_grid(config, tiles)
}

/// Run one detect+collapse step. Returns `None` at a fixpoint.
pub fn resolve_step<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<CascadeStep> {
    let matches = detect(board);
    if matches.is_empty() {
        return None;
    }
    let drops = collapse(board, &matches.marks, rng);
    log::debug!("Cascade step cleared {} tiles", matches.count);
    Some(CascadeStep {
        cleared: matches.count,
        drops,
    })
}

/// Resolve to a fixpoint and return the total tiles cleared.
///
/// # Errors
/// `UnstableBoard` if the board still has matches after `max_passes` steps.
/// The board is valid either way; it just hasn't settled yet.
pub fn resolve<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    max_passes: u32,
) -> Result<usize, BoardError> {
    let mut cleared = 0;
    let mut passes = 0;
    while let Some(step) = resolve_step(board, rng) {
        cleared += step.cleared;
        passes += 1;
        if passes >= max_passes && !detect(board).is_empty() {
            return Err(BoardError::UnstableBoard { passes, cleared });
        }
    }
    if passes > 1 {
        log::debug!("Cascade settled after {passes} passes, {cleared} tiles cleared");
    }
    Ok(cleared)
}

/// Swap two cells, run `resolve` and roll the swap back if it cleared nothing.
///
/// Shared by the synchronous and animated paths. Invalid attempts never
/// touch the board.
pub(crate) fn attempt_swap<T>(
    board: &mut Board,
    swap: SwapAttempt,
    resolve: impl FnOnce(&mut Board) -> Option<T>,
) -> Option<T> {
    if !swap.is_valid_on(board) {
        return None;
    }
    board.swap(swap.from, swap.to);
    let outcome = resolve(board);
    if outcome.is_none() {
        board.swap(swap.from, swap.to);
    }
    outcome
}

/// Try a player swap, resolving the whole cascade immediately.
///
/// Returns `true` if the swap produced matches and was kept. Non-adjacent
/// or off-board cells are a no-op returning `false`.
pub fn try_swap<R: Rng + ?Sized>(
    board: &mut Board,
    from: Cell,
    to: Cell,
    rng: &mut R,
    max_passes: u32,
) -> bool {
    let swap = SwapAttempt::new(from, to);
    attempt_swap(board, swap, |board| match resolve(board, rng, max_passes) {
        Ok(0) => None,
        Ok(cleared) => Some(cleared),
        // Tiles were already cleared, so rolling back would corrupt the board
        Err(BoardError::UnstableBoard { passes, cleared }) => {
            log::warn!("Swap kept with matches left after {passes} passes ({cleared} tiles cleared)");
            Some(cleared)
        }
        Err(err) => {
            log::error!("{err}; keeping swap");
            Some(0)
        }
    })
    .is_some()
}

/// Try a player swap, running only the first cascade step.
///
/// Returns the step for the caller to animate, or `None` if the swap was
/// invalid or rolled back.
pub fn try_swap_step<R: Rng + ?Sized>(
    board: &mut Board,
    swap: SwapAttempt,
    rng: &mut R,
) -> Option<CascadeStep> {
    attempt_swap(board, swap, |board| resolve_step(board, rng))
}
