//! Open Match - A match-3 tile puzzle board engine
//!
//! Core modules:
//! - `sim`: Board state, match detection, collapse/refill, cascades, swaps
//! - `layout`: Pixel geometry of the board (tile rects, hit testing)
//! - `settings`: Data-driven board and animation configuration
//! - `error`: Construction and configuration errors

pub mod error;
pub mod layout;
pub mod settings;
pub mod sim;

pub use error::{BoardError, SettingsError};
pub use layout::BoardLayout;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the frame clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Grid dimensions
    pub const GRID_ROWS: usize = 9;
    pub const GRID_COLUMNS: usize = 9;
    /// Number of distinct tile types (red, green, blue, yellow)
    pub const TILE_TYPE_COUNT: u8 = 4;
    /// Fewest tile types that keep the initializer's avoidance rule satisfiable
    pub const MIN_TILE_TYPES: u8 = 3;

    /// Tile geometry (pixels)
    pub const TILE_SIZE: f32 = 64.0;
    pub const TILE_SPACING: f32 = 4.0;
    pub const GRID_MARGIN: f32 = 20.0;

    /// Shortest run that counts as a match
    pub const MIN_RUN: usize = 3;

    /// Falling tiles settle at this speed (pixels/second)
    pub const FALL_SPEED: f32 = 1200.0;

    /// Detect+collapse passes allowed before a cascade is reported unstable
    pub const MAX_CASCADE_PASSES: u32 = 100;
}
