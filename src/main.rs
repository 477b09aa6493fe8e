//! Open Match headless driver
//!
//! Plays the board by itself: finds a matching swap, performs it as a
//! press/drag/release gesture through the layout, and lets the cascade
//! settle at 60 frames per second.

use glam::Vec2;

use open_match::Settings;
use open_match::sim::{AnimPhase, Cell, FrameClock, GameState, PointerSample, TickInput, find_swap};

/// Frame delta the driver feeds the clock (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Moves to play before stopping
const MAX_MOVES: u32 = 20;
/// Frames to wait for a cascade before giving up
const MAX_SETTLE_FRAMES: u32 = 60 * 60;

fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Open Match (headless) starting with seed {seed}");

    let mut state = match GameState::new(&settings, seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    state.set_viewport(1920.0, 1080.0);
    log::info!("Initial board:\n{}", state.board());

    let mut clock = FrameClock::default();
    for moves in 0..MAX_MOVES {
        let Some(swap) = find_swap(state.board()) else {
            log::info!("No moves left after {moves} moves");
            break;
        };
        log::info!("Move {}: {:?} -> {:?}", moves + 1, swap.from, swap.to);

        drag(&mut state, &mut clock, swap.from, swap.to);
        settle(&mut state, &mut clock);
        log::info!("Board:\n{}", state.board());
    }

    let stats = state.stats;
    log::info!(
        "Done after {} ticks: {} swaps kept, {} rejected, {} dropped while busy",
        state.time_ticks,
        stats.kept,
        stats.rejected,
        stats.dropped_while_busy
    );
}

/// Perform one press/drag/release gesture from `from` to `to`
fn drag(state: &mut GameState, clock: &mut FrameClock, from: Cell, to: Cell) {
    let centre = |state: &GameState, cell: Cell| {
        state.layout.tile_origin(cell, state.viewport) + Vec2::splat(state.layout.tile_size / 2.0)
    };
    let (a, b) = (centre(state, from), centre(state, to));

    let frames = [
        PointerSample { pos: Some(a), pressed: true, down: true, released: false },
        PointerSample { pos: Some(b), pressed: false, down: true, released: false },
        PointerSample { pos: Some(b), pressed: false, down: false, released: true },
    ];
    for pointer in frames {
        clock.advance(state, &TickInput { pointer }, FRAME_DT);
    }
}

/// Feed idle frames until the cascade animation finishes
fn settle(state: &mut GameState, clock: &mut FrameClock) {
    let idle = TickInput::default();
    for _ in 0..MAX_SETTLE_FRAMES {
        if state.phase() == AnimPhase::Idle {
            return;
        }
        clock.advance(state, &idle, FRAME_DT);
    }
    log::warn!("Cascade still animating after {MAX_SETTLE_FRAMES} frames");
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
