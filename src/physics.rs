//! Thin wrapper over the rapier2d physics engine.
//!
//! Owns the body/collider sets and the stepping pipeline. The game layer
//! talks in `glam::Vec2` and [`BodyTag`]s; everything rapier-specific stays
//! behind this module. Collision-start events are collected per step and
//! handed to the caller as one batch.

use glam::Vec2;
use rapier2d::crossbeam;
use rapier2d::prelude::*;

use crate::catalog::FruitSpec;
use crate::consts::{FRUIT_RESTITUTION, GRAVITY_Y, SIM_DT};

/// Game-level identity of a body, packed into rapier's collider `user_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTag {
    /// Wall or floor: static, physical.
    Boundary,
    /// The game-over line: static, detection only.
    Sensor,
    /// A fruit piece of the given rank.
    Fruit(u8),
}

impl BodyTag {
    fn encode(self) -> u128 {
        match self {
            BodyTag::Boundary => 1,
            BodyTag::Sensor => 2,
            BodyTag::Fruit(rank) => 3 + rank as u128,
        }
    }

    fn decode(data: u128) -> Option<Self> {
        match data {
            0 => None,
            1 => Some(BodyTag::Boundary),
            2 => Some(BodyTag::Sensor),
            n => Some(BodyTag::Fruit((n - 3) as u8)),
        }
    }
}

/// One collision-start pair from a simulation step.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub a: ColliderHandle,
    pub b: ColliderHandle,
    /// At least one side is a detection-only collider.
    pub sensor: bool,
}

/// A fruit body snapshot for the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct FruitView {
    pub rank: u8,
    pub pos: Vec2,
    /// Pre-drop pieces hover asleep until released.
    pub asleep: bool,
}

/// The physics world and everything needed to step it.
pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    params: IntegrationParameters,
    gravity: Vector<Real>,
    events: ChannelEventCollector,
    collision_recv: crossbeam::channel::Receiver<CollisionEvent>,
    force_recv: crossbeam::channel::Receiver<ContactForceEvent>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let (collision_send, collision_recv) = crossbeam::channel::unbounded();
        let (force_send, force_recv) = crossbeam::channel::unbounded();

        let mut params = IntegrationParameters::default();
        params.dt = SIM_DT;

        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            params,
            gravity: vector![0.0, GRAVITY_Y],
            events: ChannelEventCollector::new(collision_send, force_send),
            collision_recv,
            force_recv,
        }
    }

    /// Add a static physical box (wall/floor). `half` is half-extents.
    pub fn add_boundary(&mut self, center: Vec2, half: Vec2) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .user_data(BodyTag::Boundary.encode())
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies)
    }

    /// Add the static detection-only game-over line.
    pub fn add_sensor_line(&mut self, center: Vec2, half: Vec2) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .sensor(true)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .user_data(BodyTag::Sensor.encode())
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies)
    }

    /// Add a fruit piece. Asleep pieces are inert (no gravity, no response)
    /// until woken by [`PhysicsWorld::wake`].
    pub fn add_fruit(&mut self, spec: &FruitSpec, pos: Vec2, asleep: bool) -> ColliderHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![pos.x, pos.y])
            .sleeping(asleep)
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(spec.radius)
            .restitution(FRUIT_RESTITUTION)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .user_data(BodyTag::Fruit(spec.rank).encode())
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies)
    }

    /// Remove a body (and its collider) from the world. Safe on stale
    /// handles; returns whether anything was removed.
    pub fn remove(&mut self, collider: ColliderHandle) -> bool {
        let Some(body) = self.colliders.get(collider).and_then(|c| c.parent()) else {
            return false;
        };
        self.bodies
            .remove(
                body,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Game-level tag of a collider, if it still exists.
    pub fn tag(&self, collider: ColliderHandle) -> Option<BodyTag> {
        self.colliders
            .get(collider)
            .and_then(|c| BodyTag::decode(c.user_data))
    }

    /// Fruit rank of a collider, if it exists and is a fruit.
    pub fn fruit_rank(&self, collider: ColliderHandle) -> Option<u8> {
        match self.tag(collider) {
            Some(BodyTag::Fruit(rank)) => Some(rank),
            _ => None,
        }
    }

    /// Current position of a collider's body, if it still exists.
    pub fn translation(&self, collider: ColliderHandle) -> Option<Vec2> {
        let body = self.colliders.get(collider)?.parent()?;
        let t = self.bodies.get(body)?.translation();
        Some(Vec2::new(t.x, t.y))
    }

    /// Reposition a body without waking it. Used to steer the hovering
    /// pre-drop piece. No-op on stale handles.
    pub fn set_translation(&mut self, collider: ColliderHandle, pos: Vec2) {
        let Some(body) = self.colliders.get(collider).and_then(|c| c.parent()) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.set_translation(vector![pos.x, pos.y], false);
        }
    }

    /// Release a sleeping body into free simulation. No-op on stale handles.
    pub fn wake(&mut self, collider: ColliderHandle) {
        let Some(body) = self.colliders.get(collider).and_then(|c| c.parent()) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.wake_up(true);
        }
    }

    /// Whether a body is currently asleep. Stale handles read as `false`.
    pub fn is_asleep(&self, collider: ColliderHandle) -> bool {
        self.colliders
            .get(collider)
            .and_then(|c| c.parent())
            .and_then(|b| self.bodies.get(b))
            .map(|rb| rb.is_sleeping())
            .unwrap_or(false)
    }

    pub fn contains(&self, collider: ColliderHandle) -> bool {
        self.colliders.get(collider).is_some()
    }

    /// Advance the simulation one fixed step and return this tick's batch
    /// of collision-start pairs.
    pub fn step(&mut self) -> Vec<Contact> {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &self.events,
        );

        // Contact forces are not part of the game model.
        for _ in self.force_recv.try_iter() {}

        self.collision_recv
            .try_iter()
            .filter(|e| e.started())
            .map(|e| Contact {
                a: e.collider1(),
                b: e.collider2(),
                sensor: e.sensor(),
            })
            .collect()
    }

    /// Snapshot of all fruit bodies, for rendering and tests.
    pub fn fruits(&self) -> impl Iterator<Item = FruitView> + '_ {
        self.colliders.iter().filter_map(|(_, c)| {
            let BodyTag::Fruit(rank) = BodyTag::decode(c.user_data)? else {
                return None;
            };
            let rb = self.bodies.get(c.parent()?)?;
            let t = rb.translation();
            Some(FruitView {
                rank,
                pos: Vec2::new(t.x, t.y),
                asleep: rb.is_sleeping(),
            })
        })
    }

    pub fn fruit_count(&self) -> usize {
        self.fruits().count()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
