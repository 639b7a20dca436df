//! # Tank Engine
//!
//! A rigid-body simulation core for vehicles over heightmap terrain.
//!
//! ## Features
//!
//! - **Oriented boxes**: terrain-aligned collision volumes with SAT tests
//! - **Heightfield terrain**: bilinear height and normal sampling
//! - **Rigid bodies**: throttle, ballistic, and steering integrators
//! - **Collision resolution**: minimum-translation separation over several passes
//! - **Steering**: seek, flee, pursuit, and evasion controllers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tank_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let terrain = HeightField::from_fn(100.0, 100.0, 16, 16, |x, z| {
//!         (x * 0.05).sin() + (z * 0.05).cos()
//!     })?;
//!     let mut world = SimWorld::new(terrain, PhysicsConfig::default());
//!
//!     let tank = RigidBody::new(Vec3::zeros(), Vec3::new(2.0, 1.0, 3.0))
//!         .with_max_velocity(0.75)
//!         .with_drag(Vec3::new(0.8, 0.8, 0.8));
//!     let key = world.spawn(tank, DriveMode::Throttle);
//!
//!     for _ in 0..60 {
//!         world.drive(key, ThrottleIntent::Forward, 0.0);
//!         world.step(1.0 / 60.0);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;
pub mod sim;
pub mod steering;
pub mod terrain;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Mat4, Point3, Quat, Vec3},
            time::Stopwatch,
        },
        physics::{
            intersect, resolve, Aabb, Contact, MoveDirections, OrientedBox, PhysicsConfig,
            RigidBody, ThrottleIntent,
        },
        sim::{BodyKey, DriveMode, SimWorld},
        steering::SteeringController,
        terrain::{HeightField, TerrainError, TerrainVertex},
    };
}
