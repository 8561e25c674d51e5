//! Fruitfall - a Suika-style falling-fruit merge game core
//!
//! Core modules:
//! - `catalog`: the ordered fruit table (merge-order reference)
//! - `physics`: thin wrapper over the rapier2d rigid-body engine
//! - `sim`: deterministic gameplay (spawn, input, merges, game over)
//!
//! The crate holds the merge/spawn state machine and the input-to-physics
//! interaction layer. Rendering and windowing are left to a presentation
//! layer, which reads piece positions via [`physics::PhysicsWorld::fruits`]
//! and drains [`sim::GameEvent`]s.

pub mod catalog;
pub mod physics;
pub mod sim;

pub use catalog::{FruitSpec, FRUITS};
pub use physics::{BodyTag, Contact, FruitView, PhysicsWorld};
pub use sim::{GameEvent, GamePhase, GameState, InputTracker, Key, TickInput};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the engine's native rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play field dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 620.0;
    pub const FIELD_HEIGHT: f32 = 850.0;

    /// Wall and floor geometry
    pub const WALL_THICKNESS: f32 = 30.0;
    /// Inner faces of the side walls
    pub const WALL_INNER_LEFT: f32 = WALL_THICKNESS;
    pub const WALL_INNER_RIGHT: f32 = FIELD_WIDTH - WALL_THICKNESS;
    pub const FLOOR_THICKNESS: f32 = 60.0;
    pub const FLOOR_CENTER_Y: f32 = 820.0;

    /// Height of the game-over line
    pub const SENSOR_Y: f32 = 150.0;

    /// Where new pieces appear, hovering above the field
    pub const SPAWN_X: f32 = 300.0;
    pub const SPAWN_Y: f32 = 50.0;
    /// New pieces draw from ranks `0..SPAWN_RANK_COUNT`
    pub const SPAWN_RANK_COUNT: u8 = 5;

    /// Horizontal steering, one canonical rate for both directions
    pub const MOVE_STEP: f32 = 1.3;

    /// Ticks between a drop and the next spawn (1 s at 60 Hz)
    pub const DROP_COOLDOWN_TICKS: u32 = 60;

    /// Downward gravity, pixels/s²
    pub const GRAVITY_Y: f32 = 900.0;
    /// Fruit bounciness
    pub const FRUIT_RESTITUTION: f32 = 0.2;
}
