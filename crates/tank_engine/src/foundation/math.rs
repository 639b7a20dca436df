//! Math utilities and types
//!
//! Provides fundamental math types for 3D simulation, plus the small set of
//! vector helpers the physics modules lean on: angle conversion, linear
//! interpolation, guarded normalization, and yaw/pitch/roll composition.

pub use nalgebra::{
    Matrix4,
    Quaternion,
    Unit,
    Vector3,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// World-space right direction (+X)
    pub fn world_right() -> Vec3 {
        Vec3::x()
    }

    /// World-space up direction (+Y)
    pub fn world_up() -> Vec3 {
        Vec3::y()
    }

    /// World-space forward direction (-Z)
    pub fn world_front() -> Vec3 {
        -Vec3::z()
    }

    /// Compose a rotation from yaw, pitch, and roll in radians.
    ///
    /// Applied in roll (Z), pitch (X), yaw (Y) order, the Y-up game
    /// convention: yaw turns the body, pitch tips it over its right axis,
    /// roll banks it over its front axis.
    pub fn yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), yaw)
            * Quat::from_axis_angle(&Vec3::x_axis(), pitch)
            * Quat::from_axis_angle(&Vec3::z_axis(), roll)
    }

    /// Normalize `v`, falling back to `fallback` when `v` is too short to
    /// carry a direction.
    ///
    /// Degenerate input is an expected per-frame condition (stationary
    /// bodies, coincident box centers), so the fallback is logged at debug
    /// level rather than treated as an error.
    pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
        v.try_normalize(f32::EPSILON).unwrap_or_else(|| {
            log::debug!(
                "normalize of near-zero vector ({}, {}, {}), using fallback",
                v.x, v.y, v.z
            );
            fallback
        })
    }

    /// Cap the magnitude of `v` at `max_length`, preserving direction.
    pub fn truncate(v: Vec3, max_length: f32) -> Vec3 {
        let mag = v.magnitude();
        if mag > max_length && mag > 0.0 {
            v * (max_length / mag)
        } else {
            v
        }
    }
}
