//! Per-tick sequencing
//!
//! Within one tick: sample input, apply any swap, then advance the cascade
//! animation (which runs the next detect+collapse step once tiles settle).
//! A swap is therefore never evaluated against a board that is mid-fall.

use super::animation::AnimPhase;
use super::gesture::PointerSample;
use super::state::{GameState, SwapOutcome};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub pointer: PointerSample,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Result of a swap requested this tick, if any
    pub swap: Option<SwapOutcome>,
    /// Animation phase after the tick
    pub phase: AnimPhase,
}

/// Advance the state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickReport {
    state.time_ticks += 1;

    let request = state
        .gesture
        .update(&input.pointer, &state.layout, state.viewport);
    let swap = request.map(|swap| state.request_swap(swap));

    let phase = state.advance_animation(dt);

    TickReport { swap, phase }
}

/// Accumulates variable frame deltas into fixed `SIM_DT` ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    /// Run as many fixed ticks as `frame_dt` covers (capped at `MAX_SUBSTEPS`).
    /// Press and release edges are only delivered to the first tick.
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput, frame_dt: f32) -> Vec<TickReport> {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut input = input.clone();
        let mut reports = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            reports.push(tick(state, &input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.pointer.pressed = false;
            input.pointer.released = false;
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::board::board_from_strs;
    use crate::sim::grid::Cell;
    use crate::sim::matches::detect;
    use glam::Vec2;

    fn small_state(animated: bool) -> GameState {
        let board = board_from_strs(&["0013", "1203", "2301"], 4);
        let settings = Settings {
            rows: 3,
            columns: 4,
            animated,
            seed: Some(3),
            ..Default::default()
        };
        GameState::with_board(&settings, 3, board).unwrap()
    }

    fn at(state: &GameState, cell: Cell) -> Vec2 {
        state.layout.tile_origin(cell, state.viewport) + Vec2::splat(state.layout.tile_size / 2.0)
    }

    fn pointer(pos: Vec2, pressed: bool, down: bool, released: bool) -> TickInput {
        TickInput {
            pointer: PointerSample {
                pos: Some(pos),
                pressed,
                down,
                released,
            },
        }
    }

    fn drag(state: &mut GameState, from: Cell, to: Cell) -> TickReport {
        let (a, b) = (at(state, from), at(state, to));
        tick(state, &pointer(a, true, true, false), SIM_DT);
        tick(state, &pointer(b, false, true, false), SIM_DT);
        tick(state, &pointer(b, false, false, true), SIM_DT)
    }

    #[test]
    fn test_drag_swaps_and_resolves_instantly() {
        let mut state = small_state(false);
        let report = drag(&mut state, Cell::new(0, 2), Cell::new(1, 2));
        assert_eq!(report.swap, Some(SwapOutcome::Kept));
        assert_eq!(report.phase, AnimPhase::Idle);
        assert!(detect(state.board()).is_empty());
        assert_eq!(state.time_ticks, 3);
    }

    #[test]
    fn test_animated_drag_settles_over_ticks() {
        let mut state = small_state(true);
        let report = drag(&mut state, Cell::new(0, 2), Cell::new(1, 2));
        assert_eq!(report.swap, Some(SwapOutcome::Kept));
        assert_eq!(report.phase, AnimPhase::Resolving);

        // Swaps during the cascade are dropped
        let busy = drag(&mut state, Cell::new(2, 0), Cell::new(2, 1));
        assert_eq!(busy.swap, Some(SwapOutcome::Busy));

        let idle = TickInput::default();
        let mut guard = 0;
        while tick(&mut state, &idle, SIM_DT).phase == AnimPhase::Resolving {
            guard += 1;
            assert!(guard < 100_000);
        }
        assert!(detect(state.board()).is_empty());
        assert!(state.animation().offsets().is_settled());
    }

    #[test]
    fn test_rejected_drag_leaves_board() {
        let mut state = small_state(true);
        let before = state.board().clone();
        let report = drag(&mut state, Cell::new(2, 0), Cell::new(2, 1));
        assert_eq!(report.swap, Some(SwapOutcome::Rejected));
        assert_eq!(*state.board(), before);
        assert_eq!(state.stats.rejected, 1);
    }

    #[test]
    fn test_frame_clock_substeps() {
        let mut state = small_state(true);
        let mut clock = FrameClock::default();
        let idle = TickInput::default();

        // Half a tick: nothing runs yet
        assert!(clock.advance(&mut state, &idle, SIM_DT * 0.5).is_empty());
        // 60 Hz frame after the half tick covers two ticks
        assert_eq!(clock.advance(&mut state, &idle, 1.0 / 60.0).len(), 2);
        // A huge hitch is clamped and capped
        assert_eq!(clock.advance(&mut state, &idle, 5.0).len() as u32, MAX_SUBSTEPS);
    }

    #[test]
    fn test_frame_clock_delivers_release_once() {
        let mut state = small_state(false);
        let mut clock = FrameClock::default();
        let (a, b) = (at(&state, Cell::new(0, 2)), at(&state, Cell::new(1, 2)));
        clock.advance(&mut state, &pointer(a, true, true, false), 1.0 / 60.0);
        clock.advance(&mut state, &pointer(b, false, true, false), 1.0 / 60.0);
        let reports = clock.advance(&mut state, &pointer(b, false, false, true), 1.0 / 60.0);
        let swaps: Vec<_> = reports.iter().filter_map(|r| r.swap).collect();
        assert_eq!(swaps, vec![SwapOutcome::Kept]);
    }
}
