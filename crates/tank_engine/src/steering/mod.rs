//! Steering behaviors for autonomous agents
//!
//! Produces the steering vectors the steering integrator consumes. Each
//! behavior compares a desired velocity against the body's current velocity
//! and returns the difference, truncated to the controller's force budget,
//! so the integrator can apply it directly: `velocity += steering * dt`.
//!
//! `seek`/`flee` chase or avoid a fixed point; `pursue`/`evade` lead a
//! moving body by predicting where it will be, scaling the prediction by
//! the time needed to cover the current distance.

use crate::foundation::math::utils::{normalize_or, truncate, world_front};
use crate::foundation::math::Vec3;
use crate::physics::rigid_body::RigidBody;

/// Computes force-limited steering vectors for one agent.
///
/// `max_speed` is the cruising speed the behaviors aim for; `max_force`
/// caps how sharply the agent may adjust per second. Both are clamped to
/// be non-negative on construction.
#[derive(Debug, Clone, Copy)]
pub struct SteeringController {
    /// Desired cruising speed
    pub max_speed: f32,
    /// Cap on the returned steering magnitude
    pub max_force: f32,
}

impl SteeringController {
    /// Create a controller with the given speed and force budgets.
    pub fn new(max_speed: f32, max_force: f32) -> Self {
        Self {
            max_speed: max_speed.max(0.0),
            max_force: max_force.max(0.0),
        }
    }

    /// Steer toward a fixed world-space point.
    ///
    /// At the target the desired velocity collapses to zero, so the
    /// returned vector brakes the body instead of jittering around a
    /// degenerate direction.
    pub fn seek(&self, body: &RigidBody, target: Vec3) -> Vec3 {
        let offset = target - body.position();
        let desired = offset
            .try_normalize(f32::EPSILON)
            .map_or_else(Vec3::zeros, |direction| direction * self.max_speed);
        truncate(desired - body.velocity, self.max_force)
    }

    /// Steer directly away from a fixed world-space point.
    ///
    /// Standing exactly on the threat picks the default forward direction
    /// as the escape route.
    pub fn flee(&self, body: &RigidBody, threat: Vec3) -> Vec3 {
        let offset = body.position() - threat;
        let desired = normalize_or(offset, world_front()) * self.max_speed;
        truncate(desired - body.velocity, self.max_force)
    }

    /// Chase a moving body by seeking its predicted position.
    ///
    /// The prediction leads the target by its velocity scaled with the time
    /// to cover the current separation at `max_speed`.
    pub fn pursue(&self, body: &RigidBody, target: &RigidBody) -> Vec3 {
        self.seek(body, self.predict(body, target))
    }

    /// Avoid a moving body by fleeing its predicted position.
    pub fn evade(&self, body: &RigidBody, threat: &RigidBody) -> Vec3 {
        self.flee(body, self.predict(body, threat))
    }

    fn predict(&self, body: &RigidBody, other: &RigidBody) -> Vec3 {
        let distance = (other.position() - body.position()).magnitude();
        let lead_time = if self.max_speed > 0.0 {
            distance / self.max_speed
        } else {
            0.0
        };
        other.position() + other.velocity * lead_time
    }
}
