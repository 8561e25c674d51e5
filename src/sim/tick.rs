//! Fixed timestep simulation tick.
//!
//! One tick: apply input to the hovering piece, run the drop cooldown,
//! step the physics world, resolve that step's collision batch. Collision
//! batches never overlap; each is fully resolved before the next step.

use super::collision;
use super::input::{MoveDir, TickInput};
use super::spawn;
use super::state::GameState;
use crate::catalog;
use crate::consts::{DROP_COOLDOWN_TICKS, MOVE_STEP, WALL_INNER_LEFT, WALL_INNER_RIGHT};

/// Advance the session by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.is_game_over() {
        run_cooldown(state);
        apply_input(state, input);
    }

    let batch = state.physics.step();
    collision::resolve_batch(state, &batch);

    state.time_ticks += 1;
}

/// Steer and drop. All invalid-state cases are silent no-ops: locked input,
/// no active piece, stale handle.
fn apply_input(state: &mut GameState, input: &TickInput) {
    if state.input_locked() {
        return;
    }

    if let Some(dir) = input.held {
        steer(state, dir);
    }

    if input.drop {
        drop_active(state);
    }
}

/// Move the active piece one step, clamped so its visible edge never
/// crosses the inner wall faces.
fn steer(state: &mut GameState, dir: MoveDir) {
    let Some(active) = state.active else {
        return;
    };
    let Some(pos) = state.physics.translation(active.collider) else {
        return;
    };
    let Some(spec) = catalog::get(active.rank) else {
        return;
    };

    let step = match dir {
        MoveDir::Left => -MOVE_STEP,
        MoveDir::Right => MOVE_STEP,
    };
    let x = (pos.x + step).clamp(
        WALL_INNER_LEFT + spec.radius,
        WALL_INNER_RIGHT - spec.radius,
    );
    state
        .physics
        .set_translation(active.collider, glam::Vec2::new(x, pos.y));
}

/// Release the active piece into free simulation and start the cooldown
/// that gates the next spawn.
fn drop_active(state: &mut GameState) {
    let Some(active) = state.active.take() else {
        return;
    };
    state.physics.wake(active.collider);
    state.drop_cooldown = DROP_COOLDOWN_TICKS;
    log::debug!("dropped rank {} piece", active.rank);
}

fn run_cooldown(state: &mut GameState) {
    if state.drop_cooldown > 0 {
        state.drop_cooldown -= 1;
        if state.drop_cooldown == 0 {
            spawn::spawn_next(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPAWN_X;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    fn held(dir: MoveDir) -> TickInput {
        TickInput {
            held: Some(dir),
            drop: false,
        }
    }

    fn drop_input() -> TickInput {
        TickInput {
            held: None,
            drop: true,
        }
    }

    fn active_x(state: &GameState) -> f32 {
        let active = state.active.unwrap();
        state.physics.translation(active.collider).unwrap().x
    }

    #[test]
    fn test_hold_left_moves_by_step_per_tick() {
        let mut state = GameState::new(3);
        let ticks = 50u32;
        for _ in 0..ticks {
            tick(&mut state, &held(MoveDir::Left));
        }

        let radius = catalog::get(state.active.unwrap().rank).unwrap().radius;
        let expected = (SPAWN_X - MOVE_STEP * ticks as f32).max(WALL_INNER_LEFT + radius);
        assert!((active_x(&state) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_hold_left_clamps_at_wall() {
        let mut state = GameState::new(3);
        for _ in 0..1200 {
            tick(&mut state, &held(MoveDir::Left));
        }

        let radius = catalog::get(state.active.unwrap().rank).unwrap().radius;
        assert!((active_x(&state) - (WALL_INNER_LEFT + radius)).abs() < 1e-3);
    }

    #[test]
    fn test_hold_right_clamps_at_wall() {
        let mut state = GameState::new(3);
        for _ in 0..1200 {
            tick(&mut state, &held(MoveDir::Right));
        }

        let radius = catalog::get(state.active.unwrap().rank).unwrap().radius;
        assert!((active_x(&state) - (WALL_INNER_RIGHT - radius)).abs() < 1e-3);
    }

    #[test]
    fn test_drop_locks_input_then_respawns() {
        let mut state = GameState::new(5);
        let first = state.active.unwrap();

        tick(&mut state, &drop_input());
        assert!(state.active.is_none());
        assert!(state.input_locked());
        assert!(!state.physics.is_asleep(first.collider));

        // Steering and dropping do nothing while locked.
        for _ in 0..(DROP_COOLDOWN_TICKS - 1) {
            tick(&mut state, &held(MoveDir::Left));
        }
        assert!(state.active.is_none());
        assert!(state.input_locked());

        // Cooldown expires: next piece appears, input unlocks.
        tick(&mut state, &TickInput::default());
        let next = state.active.expect("next piece after cooldown");
        assert!(!state.input_locked());
        assert_ne!(next.collider, first.collider);
        assert!(state.physics.is_asleep(next.collider));
    }

    #[test]
    fn test_drop_during_cooldown_does_not_restart_it() {
        let mut state = GameState::new(5);
        tick(&mut state, &drop_input());
        let cooldown = state.drop_cooldown;

        tick(&mut state, &drop_input());
        assert_eq!(state.drop_cooldown, cooldown - 1);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut state = GameState::new(5);
        state.phase = GamePhase::GameOver;
        let x_before = active_x(&state);

        tick(&mut state, &held(MoveDir::Left));
        assert!((active_x(&state) - x_before).abs() < f32::EPSILON);

        tick(&mut state, &drop_input());
        assert!(state.active.is_some(), "drop ignored after game over");
        assert_eq!(state.drop_cooldown, 0);
    }

    #[test]
    fn test_ticks_advance_after_game_over() {
        // The simulation keeps settling after game over; only gameplay stops.
        let mut state = GameState::new(5);
        state.phase = GamePhase::GameOver;
        let before = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, before + 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// The visible edge never crosses the inner wall faces, for any
        /// sequence of hold durations.
        #[test]
        fn prop_edge_stays_inside_walls(
            moves in prop::collection::vec((any::<bool>(), 0u32..200), 1..6),
        ) {
            let mut state = GameState::new(11);
            let radius = catalog::get(state.active.unwrap().rank).unwrap().radius;

            for (go_right, ticks) in moves {
                let dir = if go_right { MoveDir::Right } else { MoveDir::Left };
                for _ in 0..ticks {
                    tick(&mut state, &held(dir));
                    let x = active_x(&state);
                    prop_assert!(x - radius >= WALL_INNER_LEFT - 1e-3);
                    prop_assert!(x + radius <= WALL_INNER_RIGHT + 1e-3);
                }
            }
        }
    }
}
