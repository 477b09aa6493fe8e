//! Game state: the single owner of the board
//!
//! Every core function takes the pieces it needs from here by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::{AnimPhase, CascadeAnimation};
use super::board::{Board, BoardConfig, TileType};
use super::cascade::{SwapAttempt, init_board, try_swap, try_swap_step};
use super::gesture::DragGesture;
use crate::error::BoardError;
use crate::layout::BoardLayout;
use crate::settings::Settings;

/// How cascades are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveMode {
    /// Resolve the whole cascade inside the swap
    Instant,
    /// One detect+collapse step per visual settle
    Animated,
}

/// Outcome of a swap request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Swap matched and was kept
    Kept,
    /// Swap matched nothing and was rolled back (or was not adjacent)
    Rejected,
    /// A cascade is still animating; the request was dropped
    Busy,
}

/// Swap bookkeeping (not a score)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapStats {
    pub kept: u32,
    pub rejected: u32,
    pub dropped_while_busy: u32,
}

/// Complete board-engine state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mode: ResolveMode,
    /// Dimensions are fixed at construction and shared with `animation`
    board: Board,
    pub layout: BoardLayout,
    animation: CascadeAnimation,
    pub gesture: DragGesture,
    /// Viewport size in pixels, used to centre the board
    pub viewport: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub stats: SwapStats,
    max_cascade_passes: u32,
    rng: Pcg32,
}

impl GameState {
    /// Create a new state from validated settings.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the settings are inconsistent.
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, BoardError> {
        settings.validate()?;
        let config = settings.board_config()?;
        let layout = settings.layout();
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = init_board(config, &mut rng);
        let mode = if settings.animated {
            ResolveMode::Animated
        } else {
            ResolveMode::Instant
        };

        Ok(Self {
            seed,
            mode,
            board,
            layout,
            animation: CascadeAnimation::new(
                config.rows(),
                config.columns(),
                settings.fall_speed,
                layout.pitch(),
                settings.max_cascade_passes,
            ),
            gesture: DragGesture::default(),
            viewport: layout.board_size(),
            time_ticks: 0,
            stats: SwapStats::default(),
            max_cascade_passes: settings.max_cascade_passes,
            rng,
        })
    }

    /// Start from a hand-built board instead of a random one
    #[cfg(test)]
    pub(crate) fn with_board(settings: &Settings, seed: u64, board: Board) -> Result<Self, BoardError> {
        let mut state = Self::new(settings, seed)?;
        assert_eq!(
            (board.rows(), board.columns()),
            (state.board.rows(), state.board.columns()),
            "board dimensions must match the settings"
        );
        state.board = board;
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn animation(&self) -> &CascadeAnimation {
        &self.animation
    }

    pub fn config(&self) -> BoardConfig {
        self.board.config()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub fn phase(&self) -> AnimPhase {
        self.animation.phase()
    }

    /// Tile at a cell (rendering accessor)
    pub fn tile_at(&self, row: usize, col: usize) -> TileType {
        self.board.tile_at(row, col)
    }

    /// Visual fall offset at a cell (rendering accessor)
    pub fn fall_offset_at(&self, row: usize, col: usize) -> f32 {
        self.animation.fall_offset_at(row, col)
    }

    /// Apply a swap request. While a cascade is animating, requests are dropped.
    pub fn request_swap(&mut self, swap: SwapAttempt) -> SwapOutcome {
        if !self.animation.is_idle() {
            self.stats.dropped_while_busy += 1;
            log::debug!("Swap {swap:?} dropped: cascade in progress");
            return SwapOutcome::Busy;
        }

        let kept = match self.mode {
            ResolveMode::Instant => try_swap(
                &mut self.board,
                swap.from,
                swap.to,
                &mut self.rng,
                self.max_cascade_passes,
            ),
            ResolveMode::Animated => match try_swap_step(&mut self.board, swap, &mut self.rng) {
                Some(step) => {
                    self.animation.start(step);
                    true
                }
                None => false,
            },
        };

        if kept {
            self.stats.kept += 1;
            log::debug!("Swap {:?} -> {:?} kept", swap.from, swap.to);
            SwapOutcome::Kept
        } else {
            self.stats.rejected += 1;
            log::debug!("Swap {:?} -> {:?} rejected", swap.from, swap.to);
            SwapOutcome::Rejected
        }
    }

    /// Advance the cascade animation by `dt` seconds
    pub fn advance_animation(&mut self, dt: f32) -> AnimPhase {
        self.animation.advance(&mut self.board, dt, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::board_from_strs;
    use crate::sim::grid::Cell;
    use crate::sim::matches::detect;

    fn state_with_board(animated: bool, board: Board) -> GameState {
        let settings = Settings {
            rows: board.rows(),
            columns: board.columns(),
            animated,
            ..Default::default()
        };
        GameState::with_board(&settings, 1, board).unwrap()
    }

    #[test]
    fn test_new_board_has_no_matches() {
        let state = GameState::new(&Settings::default(), 12345).unwrap();
        assert!(detect(state.board()).is_empty());
        assert_eq!(state.phase(), AnimPhase::Idle);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            tile_types: 1,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(&settings, 1),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_instant_swap_settles_immediately() {
        let board = board_from_strs(&["0013", "1203", "2301"], 4);
        let mut state = state_with_board(false, board);
        let swap = SwapAttempt::new(Cell::new(0, 2), Cell::new(1, 2));
        assert_eq!(state.request_swap(swap), SwapOutcome::Kept);
        assert_eq!(state.phase(), AnimPhase::Idle);
        assert!(detect(state.board()).is_empty());
        assert_eq!(state.stats.kept, 1);
    }

    #[test]
    fn test_animated_swap_blocks_until_settled() {
        let board = board_from_strs(&["0013", "1203", "2301"], 4);
        let mut state = state_with_board(true, board);
        let swap = SwapAttempt::new(Cell::new(0, 2), Cell::new(1, 2));
        assert_eq!(state.request_swap(swap), SwapOutcome::Kept);
        assert_eq!(state.phase(), AnimPhase::Resolving);
        assert!(state.fall_offset_at(0, 0) < 0.0);

        let snapshot = state.board().clone();
        let other = SwapAttempt::new(Cell::new(2, 0), Cell::new(2, 1));
        assert_eq!(state.request_swap(other), SwapOutcome::Busy);
        assert_eq!(*state.board(), snapshot);
        assert_eq!(state.stats.dropped_while_busy, 1);

        while state.advance_animation(1.0 / 60.0) == AnimPhase::Resolving {}
        assert!(detect(state.board()).is_empty());
    }

    #[test]
    #[should_panic(expected = "board dimensions must match")]
    fn test_with_board_rejects_other_dimensions() {
        let board = board_from_strs(&["012", "120", "201"], 3);
        let _ = GameState::with_board(&Settings::default(), 1, board);
    }

    #[test]
    fn test_rejected_swap_restores_board() {
        let board = board_from_strs(&["0123", "1230", "2301"], 4);
        for animated in [false, true] {
            let mut state = state_with_board(animated, board.clone());
            let swap = SwapAttempt::new(Cell::new(0, 0), Cell::new(0, 1));
            assert_eq!(state.request_swap(swap), SwapOutcome::Rejected);
            assert_eq!(*state.board(), board);
            assert_eq!(state.phase(), AnimPhase::Idle);
        }
    }
}
