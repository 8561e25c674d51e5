//! Collision resolver: merges and game-over detection.
//!
//! Consumes one collision-start batch per tick. Merges are gathered into a
//! pending set first and applied at batch end, so a body can never take
//! part in two merges in the same tick, and pairs that reference an
//! already-consumed or stale body are skipped.

use std::collections::HashSet;

use glam::Vec2;
use rapier2d::prelude::ColliderHandle;

use super::state::{GameEvent, GamePhase, GameState};
use crate::catalog;
use crate::physics::Contact;

struct PendingMerge {
    a: ColliderHandle,
    b: ColliderHandle,
    rank: u8,
    contact_point: Vec2,
}

/// Resolve one tick's collision-start batch. Merge processing keeps running
/// after game over (bodies still settle and combine); only input and
/// spawning stop.
pub(crate) fn resolve_batch(state: &mut GameState, batch: &[Contact]) {
    let mut consumed: HashSet<ColliderHandle> = HashSet::new();
    let mut merges: Vec<PendingMerge> = Vec::new();
    let mut game_over = false;

    let active = state.active.map(|p| p.collider);

    for contact in batch {
        // Game-over rule: the only detection-only collider in the world is
        // the line near the top, so a sensor pair means a piece reached it.
        // Tolerated during the post-drop window, where a freshly dropped
        // piece is still expected to pass through.
        if contact.sensor {
            if !state.input_locked() && state.phase != GamePhase::GameOver {
                game_over = true;
            }
            continue;
        }

        // A body consumed earlier in this batch cannot merge again.
        if consumed.contains(&contact.a) || consumed.contains(&contact.b) {
            continue;
        }

        // The hovering pre-drop piece is inert until dropped.
        if active == Some(contact.a) || active == Some(contact.b) {
            continue;
        }

        // Merge rule: two fruits of equal rank. Stale handles decode to
        // None and fall out here.
        let (Some(rank_a), Some(rank_b)) = (
            state.physics.fruit_rank(contact.a),
            state.physics.fruit_rank(contact.b),
        ) else {
            continue;
        };
        if rank_a != rank_b {
            continue;
        }

        let (Some(pos_a), Some(pos_b)) = (
            state.physics.translation(contact.a),
            state.physics.translation(contact.b),
        ) else {
            continue;
        };

        consumed.insert(contact.a);
        consumed.insert(contact.b);
        merges.push(PendingMerge {
            a: contact.a,
            b: contact.b,
            rank: rank_a,
            // Equal radii: the contact point is midway between centers.
            contact_point: pos_a.midpoint(pos_b),
        });
    }

    // Apply removals and additions atomically at batch end.
    for merge in merges {
        state.physics.remove(merge.a);
        state.physics.remove(merge.b);

        if catalog::is_max_rank(merge.rank) {
            log::debug!("two max-rank fruits met, nothing bigger to grow");
            continue;
        }

        if let Some(spec) = catalog::get(merge.rank + 1) {
            state
                .physics
                .add_fruit(spec, merge.contact_point, false);
            state.push_event(GameEvent::Merged {
                rank: spec.rank,
                pos: merge.contact_point,
            });
            log::debug!(
                "merged two rank {} into {} at {:?}",
                merge.rank,
                spec.name,
                merge.contact_point,
            );
        }
    }

    if game_over {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver);
        log::info!("game over after {} ticks", state.time_ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(a: ColliderHandle, b: ColliderHandle, sensor: bool) -> Contact {
        Contact { a, b, sensor }
    }

    /// Awake fruits of a given rank (the hovering active piece is asleep).
    fn awake_of_rank(state: &GameState, rank: u8) -> Vec<Vec2> {
        state
            .physics
            .fruits()
            .filter(|f| !f.asleep && f.rank == rank)
            .map(|f| f.pos)
            .collect()
    }

    #[test]
    fn test_equal_rank_merge_at_contact_point() {
        let mut state = GameState::new(1);
        let spec = catalog::get(2).unwrap();
        let a = state.physics.add_fruit(spec, Vec2::new(145.0, 400.0), false);
        let b = state.physics.add_fruit(spec, Vec2::new(155.0, 400.0), false);

        resolve_batch(&mut state, &[contact(a, b, false)]);

        assert!(awake_of_rank(&state, 2).is_empty());
        assert_eq!(awake_of_rank(&state, 3), vec![Vec2::new(150.0, 400.0)]);
        assert!(!state.physics.contains(a));
        assert!(!state.physics.contains(b));

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Merged {
            rank: 3,
            pos: Vec2::new(150.0, 400.0),
        }));
    }

    #[test]
    fn test_max_rank_merge_does_not_grow() {
        let mut state = GameState::new(1);
        let spec = catalog::get(catalog::max_rank()).unwrap();
        let a = state.physics.add_fruit(spec, Vec2::new(200.0, 600.0), false);
        let b = state.physics.add_fruit(spec, Vec2::new(210.0, 600.0), false);
        let before = state.physics.fruit_count();

        resolve_batch(&mut state, &[contact(a, b, false)]);

        // Both removed, nothing added.
        assert_eq!(state.physics.fruit_count(), before - 2);
        assert!(awake_of_rank(&state, catalog::max_rank()).is_empty());
    }

    #[test]
    fn test_unequal_ranks_do_not_merge() {
        let mut state = GameState::new(1);
        let a = state
            .physics
            .add_fruit(catalog::get(1).unwrap(), Vec2::new(100.0, 400.0), false);
        let b = state
            .physics
            .add_fruit(catalog::get(2).unwrap(), Vec2::new(120.0, 400.0), false);
        let before = state.physics.fruit_count();

        resolve_batch(&mut state, &[contact(a, b, false)]);

        assert_eq!(state.physics.fruit_count(), before);
    }

    #[test]
    fn test_body_cannot_merge_twice_in_one_batch() {
        let mut state = GameState::new(1);
        let spec = catalog::get(0).unwrap();
        let a = state.physics.add_fruit(spec, Vec2::new(100.0, 400.0), false);
        let b = state.physics.add_fruit(spec, Vec2::new(120.0, 400.0), false);
        let c = state.physics.add_fruit(spec, Vec2::new(140.0, 400.0), false);

        resolve_batch(
            &mut state,
            &[contact(a, b, false), contact(b, c, false)],
        );

        // One merge happened; the third piece survives untouched.
        assert!(state.physics.contains(c));
        assert_eq!(awake_of_rank(&state, 0), vec![Vec2::new(140.0, 400.0)]);
        assert_eq!(awake_of_rank(&state, 1).len(), 1);
    }

    #[test]
    fn test_stale_pair_ignored() {
        let mut state = GameState::new(1);
        let spec = catalog::get(0).unwrap();
        let a = state.physics.add_fruit(spec, Vec2::new(100.0, 400.0), false);
        let b = state.physics.add_fruit(spec, Vec2::new(120.0, 400.0), false);
        state.physics.remove(a);

        resolve_batch(&mut state, &[contact(a, b, false)]);

        assert!(state.physics.contains(b));
        assert!(awake_of_rank(&state, 1).is_empty());
    }

    #[test]
    fn test_active_piece_never_merges() {
        let mut state = GameState::new(1);
        let active = state.active.unwrap();
        let other = state.physics.add_fruit(
            catalog::get(active.rank).unwrap(),
            Vec2::new(310.0, 50.0),
            false,
        );

        resolve_batch(&mut state, &[contact(active.collider, other, false)]);

        assert!(state.physics.contains(active.collider));
        assert!(state.physics.contains(other));
    }

    #[test]
    fn test_sensor_contact_ends_game_when_unlocked() {
        let mut state = GameState::new(1);
        let fruit = state
            .physics
            .add_fruit(catalog::get(0).unwrap(), Vec2::new(300.0, 150.0), false);

        let sensor = state.arena.sensor;
        resolve_batch(&mut state, &[contact(sensor, fruit, true)]);

        assert!(state.is_game_over());
        assert!(state.drain_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_sensor_contact_tolerated_during_cooldown() {
        let mut state = GameState::new(1);
        state.drop_cooldown = 30;
        let fruit = state
            .physics
            .add_fruit(catalog::get(0).unwrap(), Vec2::new(300.0, 150.0), false);

        let sensor = state.arena.sensor;
        resolve_batch(&mut state, &[contact(fruit, sensor, true)]);

        assert!(!state.is_game_over());
    }

    #[test]
    fn test_merges_continue_after_game_over() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        let spec = catalog::get(4).unwrap();
        let a = state.physics.add_fruit(spec, Vec2::new(200.0, 500.0), false);
        let b = state.physics.add_fruit(spec, Vec2::new(220.0, 500.0), false);

        resolve_batch(&mut state, &[contact(a, b, false)]);

        assert_eq!(awake_of_rank(&state, 5).len(), 1);
        // No second game-over event.
        assert!(!state.drain_events().contains(&GameEvent::GameOver));
    }
}
