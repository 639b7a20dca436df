//! Physics module - oriented volumes, rigid bodies, and collision
//!
//! The motion and contact core of the simulation. `obb` defines the
//! oriented volumes, `rigid_body` the dynamic state and integrators,
//! `collision` the separating-axis test and resolution, and `config` the
//! tunable constants threaded through all of them.

pub mod collision;
pub mod config;
pub mod obb;
pub mod rigid_body;

pub use collision::{intersect, intersect_boxes, resolve, Contact};
pub use config::PhysicsConfig;
pub use obb::{Aabb, OrientedBox};
pub use rigid_body::{MoveDirections, RigidBody, ThrottleIntent};
