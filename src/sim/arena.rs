//! Static boundary geometry: two walls, a floor, and the game-over line.
//!
//! Built once at session start and never mutated. The sensor line near the
//! top of the field detects stacking past the limit; it never participates
//! in collision response.

use glam::Vec2;
use rapier2d::prelude::ColliderHandle;

use crate::consts::*;
use crate::physics::PhysicsWorld;

/// Handles to the arena's special bodies.
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    /// The detection-only game-over line.
    pub sensor: ColliderHandle,
}

/// Register the arena with the physics world. Called once.
pub fn build(physics: &mut PhysicsWorld) -> Arena {
    let wall_half = Vec2::new(WALL_THICKNESS / 2.0, FIELD_HEIGHT / 2.0);
    let wall_center_y = FIELD_HEIGHT / 2.0 - FLOOR_THICKNESS / 2.0;

    physics.add_boundary(Vec2::new(WALL_THICKNESS / 2.0, wall_center_y), wall_half);
    physics.add_boundary(
        Vec2::new(FIELD_WIDTH - WALL_THICKNESS / 2.0, wall_center_y),
        wall_half,
    );
    physics.add_boundary(
        Vec2::new(FIELD_WIDTH / 2.0, FLOOR_CENTER_Y),
        Vec2::new(FIELD_WIDTH / 2.0, FLOOR_THICKNESS / 2.0),
    );

    let sensor = physics.add_sensor_line(
        Vec2::new(FIELD_WIDTH / 2.0, SENSOR_Y),
        Vec2::new(FIELD_WIDTH / 2.0, 0.5),
    );

    Arena { sensor }
}
