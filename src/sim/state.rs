//! Game session state and core simulation types.
//!
//! The session ties the catalog, arena, spawner, input, and collision
//! resolver together and enforces the drop/spawn lifecycle invariants:
//! exactly one of {active piece present, drop cooldown running} holds while
//! the game is live; while the cooldown runs, input is locked.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use rapier2d::prelude::ColliderHandle;

use super::{arena, spawn};
use crate::physics::PhysicsWorld;

/// Current phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Normal play: steering, dropping, merging.
    Playing,
    /// Terminal. Input and spawning stop; bodies keep settling.
    GameOver,
}

/// Non-owning reference to the hovering pre-drop piece. The physics world
/// owns the body; this only identifies it.
#[derive(Debug, Clone, Copy)]
pub struct ActivePiece {
    pub collider: ColliderHandle,
    pub rank: u8,
}

/// Events surfaced to the presentation layer, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new piece appeared under player control.
    Spawned { rank: u8 },
    /// Two pieces merged into one of the given rank at the contact point.
    Merged { rank: u8, pos: Vec2 },
    /// A piece settled on the game-over line.
    GameOver,
}

/// Complete session state.
pub struct GameState {
    pub physics: PhysicsWorld,
    pub arena: arena::Arena,
    pub phase: GamePhase,
    /// The piece currently under player control, if any.
    pub active: Option<ActivePiece>,
    /// Post-drop cooldown; non-zero means input is locked.
    pub drop_cooldown: u32,
    /// Simulation tick counter.
    pub time_ticks: u64,
    /// Run seed for reproducibility.
    pub seed: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build the arena and hand the player the first piece.
    pub fn new(seed: u64) -> Self {
        let mut physics = PhysicsWorld::new();
        let arena = arena::build(&mut physics);

        let mut state = Self {
            physics,
            arena,
            phase: GamePhase::Playing,
            active: None,
            drop_cooldown: 0,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };

        log::info!("new session, seed {seed}");
        spawn::spawn_next(&mut state);
        state
    }

    /// While locked, no position mutation or new spawn may occur.
    pub fn input_locked(&self) -> bool {
        self.drop_cooldown > 0
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
