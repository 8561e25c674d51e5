//! Spawn controller: creates the player's next piece.
//!
//! New pieces always start small: ranks are drawn uniformly from the low
//! end of the catalog. The piece spawns asleep at a fixed point above the
//! field and hovers there under player control until dropped.

use glam::Vec2;
use rand::Rng;

use super::state::{ActivePiece, GameEvent, GameState};
use crate::catalog;
use crate::consts::{SPAWN_RANK_COUNT, SPAWN_X, SPAWN_Y};

/// Create the next active piece. No-op if a piece is already active or the
/// session is over; the session enforces the one-active-piece invariant by
/// only calling this after the drop cooldown expires.
pub fn spawn_next(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }
    if state.active.is_some() {
        log::warn!("spawn requested while a piece is active, ignoring");
        return;
    }

    let rank = state.rng.random_range(0..SPAWN_RANK_COUNT);
    let Some(spec) = catalog::get(rank) else {
        log::warn!("spawn rank {rank} outside catalog, ignoring");
        return;
    };

    let collider = state
        .physics
        .add_fruit(spec, Vec2::new(SPAWN_X, SPAWN_Y), true);
    state.active = Some(ActivePiece { collider, rank });
    state.push_event(GameEvent::Spawned { rank });
    log::debug!("spawned {} (rank {rank})", spec.name);
}
