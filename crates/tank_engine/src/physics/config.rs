//! Physics tuning parameters
//!
//! Everything that used to be a global constant in older engine iterations
//! lives here as plain data: gravity, the number of resolution passes the
//! driver runs per tick, and the epsilon below which a candidate separating
//! axis is considered degenerate. Passed by reference into the integrators
//! and the resolver so there is no process-wide mutable state.

use serde::{Deserialize, Serialize};

/// Tunable constants for integration and collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Downward acceleration applied to ballistic bodies, world units per
    /// second squared along -Y when negative.
    pub gravity: f32,
    /// All-pairs resolution sweeps the driver runs each tick. Two to four
    /// passes settle compound contacts; one pass leaves visible overlap
    /// when three or more bodies stack up.
    pub resolution_passes: u32,
    /// Squared-length threshold below which a candidate separating axis is
    /// skipped as degenerate.
    pub axis_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -2.1,
            resolution_passes: 3,
            axis_epsilon: 1e-6,
        }
    }
}

impl crate::config::Config for PhysicsConfig {}

impl PhysicsConfig {
    /// Set the gravity term.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Gravity as a world-space acceleration vector.
    pub fn gravity_vector(&self) -> crate::foundation::math::Vec3 {
        crate::foundation::math::Vec3::new(0.0, self.gravity, 0.0)
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.resolution_passes == 0 {
            return Err("resolution_passes must be at least 1".to_string());
        }
        if !self.axis_epsilon.is_finite() || self.axis_epsilon <= 0.0 {
            return Err(format!(
                "axis_epsilon must be a small positive value, got {}",
                self.axis_epsilon
            ));
        }
        if !self.gravity.is_finite() {
            return Err("gravity must be finite".to_string());
        }
        Ok(())
    }
}
