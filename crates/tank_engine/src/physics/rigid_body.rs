//! Rigid bodies for dynamic agents
//!
//! A `RigidBody` is one moving thing in the simulation: a pose box that
//! places it in the world, a collision box slaved to that pose at a fixed
//! local offset, and the linear state (velocity, acceleration, throttle
//! speed, drag) the integrators advance each tick.
//!
//! The per-tick contract is three calls in order: [`RigidBody::pre_step`],
//! one of the `integrate_*` variants, then
//! [`RigidBody::refresh_collision_shape`]. Status flags (`is_colliding`,
//! `directions`) are only meaningful after the full sequence has run.

use crate::foundation::math::utils::truncate;
use crate::foundation::math::{Mat4, Vec3};
use crate::physics::config::PhysicsConfig;
use crate::physics::obb::OrientedBox;

bitflags::bitflags! {
    /// Which way a body moved during its last integration step.
    ///
    /// Derived from the world-space position delta: right is +X, up is +Y,
    /// forward is -Z. Opposing flags are mutually exclusive; a body at rest
    /// carries none.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MoveDirections: u8 {
        /// Position delta had +Y
        const UP = 1 << 0;
        /// Position delta had -Y
        const DOWN = 1 << 1;
        /// Position delta had -X
        const LEFT = 1 << 2;
        /// Position delta had +X
        const RIGHT = 1 << 3;
        /// Position delta had -Z
        const FORWARD = 1 << 4;
        /// Position delta had +Z
        const BACKWARD = 1 << 5;
    }
}

/// Per-tick throttle command for engine-driven bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrottleIntent {
    /// Ramp the throttle speed up
    Forward,
    /// Ramp the throttle speed down (reverse)
    Reverse,
    /// No input; the throttle speed snaps to zero
    #[default]
    Idle,
}

/// Physical state of one dynamic agent.
///
/// The collision box is never authoritative: `refresh_collision_shape`
/// overwrites its pose from the pose box every tick. Collaborators read
/// `pose` (or the accessor snapshots) and the status flags; they write
/// motion state and the per-tick inputs.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Pose box: world placement of the agent
    pub pose: OrientedBox,
    /// Collision box: the volume the resolver tests, slaved to `pose`
    pub collision: OrientedBox,
    /// Local offset of the collision box, carried through the pose basis
    pub collision_offset: Vec3,
    /// Linear velocity, world units per step after integration
    pub velocity: Vec3,
    /// Accumulated acceleration, consumed by `integrate_acceleration`
    pub acceleration: Vec3,
    /// Scalar throttle speed driving the throttle integrator
    pub speed: f32,
    /// Throttle ramp rate, speed units per second
    pub throttle_rate: f32,
    /// Per-axis multiplicative damping applied once per step
    pub drag: Vec3,
    /// Body mass; scales the speed loss in rear-end collisions
    pub mass: f32,
    /// Hard cap on velocity magnitude
    pub max_velocity: f32,
    /// Whether the body takes part in integration and resolution
    pub active: bool,
    /// Set by the resolver when this body overlapped another this tick
    pub is_colliding: bool,
    /// Movement direction flags from the last integration step
    pub directions: MoveDirections,
    previous_position: Vec3,
    previous_rotation: Vec3,
}

impl RigidBody {
    /// Create a body at `position` whose pose and collision boxes both span
    /// `size`.
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            pose: OrientedBox::new(position, size),
            collision: OrientedBox::new(position, size),
            collision_offset: Vec3::zeros(),
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            speed: 0.0,
            throttle_rate: 0.3,
            drag: Vec3::new(1.0, 1.0, 1.0),
            mass: 1.0,
            max_velocity: 10.0,
            active: true,
            is_colliding: false,
            directions: MoveDirections::empty(),
            previous_position: position,
            previous_rotation: Vec3::zeros(),
        }
    }

    /// Set the per-axis drag factor.
    pub fn with_drag(mut self, drag: Vec3) -> Self {
        self.drag = drag;
        self
    }

    /// Set the body mass.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the velocity magnitude cap.
    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Set the throttle ramp rate.
    pub fn with_throttle_rate(mut self, throttle_rate: f32) -> Self {
        self.throttle_rate = throttle_rate;
        self
    }

    /// Give the collision box its own dimensions and local offset.
    ///
    /// The offset is expressed in the pose basis (right, up, front), so a
    /// hull sitting above and behind the anchor keeps that relation at any
    /// orientation.
    pub fn with_collision_box(mut self, size: Vec3, offset: Vec3) -> Self {
        self.collision.resize(size);
        self.collision_offset = offset;
        self
    }

    /// World position snapshot (from the pose box).
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Rotation snapshot packed as (yaw, pitch, roll).
    pub fn rotation(&self) -> Vec3 {
        self.pose.rotation()
    }

    /// World affine transform of the pose box.
    pub fn world_transform(&self) -> Mat4 {
        self.pose.world_transform()
    }

    /// Position recorded by the last `pre_step`.
    pub fn previous_position(&self) -> Vec3 {
        self.previous_position
    }

    /// Rotation recorded by the last `pre_step`, packed (yaw, pitch, roll).
    pub fn previous_rotation(&self) -> Vec3 {
        self.previous_rotation
    }

    /// Begin a tick: snapshot the pose and clear the collision flag.
    pub fn pre_step(&mut self) {
        self.previous_position = self.pose.position;
        self.previous_rotation = self.pose.rotation();
        self.is_colliding = false;
    }

    /// Ramp or cut the throttle speed from a discrete intent.
    pub fn apply_throttle(&mut self, intent: ThrottleIntent, dt: f32) {
        match intent {
            ThrottleIntent::Forward => self.speed += self.throttle_rate * dt,
            ThrottleIntent::Reverse => self.speed -= self.throttle_rate * dt,
            ThrottleIntent::Idle => self.speed = 0.0,
        }
    }

    /// Throttle integration: the engine pushes along the pose front vector.
    ///
    /// `velocity += front * speed * dt`, then the shared clamp/advance/drag
    /// tail. No gravity term; throttle bodies ride the terrain.
    pub fn integrate_throttle(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.velocity += self.pose.front() * self.speed * dt;
        self.finish_step();
    }

    /// Acceleration integration for ballistic bodies.
    ///
    /// `velocity += (acceleration + gravity) * dt`, then the shared tail.
    /// The accumulated acceleration is consumed: callers supply it fresh
    /// each tick.
    pub fn integrate_acceleration(&mut self, dt: f32, config: &PhysicsConfig) {
        if !self.active {
            return;
        }
        self.velocity += (self.acceleration + config.gravity_vector()) * dt;
        self.acceleration = Vec3::zeros();
        self.finish_step();
    }

    /// Steering integration for autonomous agents.
    ///
    /// `steering` is a force-limited vector from the steering controller;
    /// `velocity += steering * dt`, then the shared tail.
    pub fn integrate_steering(&mut self, dt: f32, steering: Vec3) {
        if !self.active {
            return;
        }
        self.velocity += steering * dt;
        self.finish_step();
    }

    // Shared integrator tail: clamp, advance, drag, refresh direction flags.
    fn finish_step(&mut self) {
        self.velocity = truncate(self.velocity, self.max_velocity);
        self.pose.position += self.velocity;
        self.velocity.component_mul_assign(&self.drag);
        self.update_move_directions();
    }

    fn update_move_directions(&mut self) {
        let delta = self.pose.position - self.previous_position;
        let mut directions = MoveDirections::empty();
        if delta.y > 0.0 {
            directions |= MoveDirections::UP;
        } else if delta.y < 0.0 {
            directions |= MoveDirections::DOWN;
        }
        if delta.x > 0.0 {
            directions |= MoveDirections::RIGHT;
        } else if delta.x < 0.0 {
            directions |= MoveDirections::LEFT;
        }
        if delta.z < 0.0 {
            directions |= MoveDirections::FORWARD;
        } else if delta.z > 0.0 {
            directions |= MoveDirections::BACKWARD;
        }
        self.directions = directions;
    }

    /// Derive the collision box pose from the pose box.
    ///
    /// Carries the local offset through the current basis, then copies the
    /// orientation wholesale so both boxes agree on their frame.
    pub fn refresh_collision_shape(&mut self) {
        let offset = self.pose.right() * self.collision_offset.x
            + self.pose.up() * self.collision_offset.y
            + self.pose.front() * self.collision_offset.z;
        self.collision.position = self.pose.position + offset;
        self.collision.copy_orientation_from(&self.pose);
    }
}
