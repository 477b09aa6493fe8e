//! Board simulation module
//!
//! All board logic lives here. This module must stay pure:
//! - Seeded RNG only, passed in by the caller
//! - State owned by `GameState`, never ambient
//! - No rendering or platform dependencies

pub mod animation;
pub mod board;
pub mod cascade;
pub mod collapse;
pub mod gesture;
pub mod grid;
pub mod hint;
pub mod matches;
pub mod state;
pub mod tick;

pub use animation::{AnimPhase, CascadeAnimation, FallOffsets};
pub use board::{Board, BoardConfig, TileType};
pub use cascade::{CascadeStep, SwapAttempt, init_board, resolve, resolve_step, try_swap, try_swap_step};
pub use collapse::{Drops, collapse};
pub use gesture::{DragGesture, PointerSample};
pub use grid::{Cell, Grid};
pub use hint::{find_swap, has_moves};
pub use matches::{MarkSet, Matches, detect};
pub use state::{GameState, ResolveMode, SwapOutcome, SwapStats};
pub use tick::{FrameClock, TickInput, TickReport, tick};
