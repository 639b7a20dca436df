//! Simulation driver
//!
//! `SimWorld` owns the terrain and the body population and runs the
//! per-tick sequence the physics core expects: input application and
//! integration per body, orientation and collision-shape refresh from the
//! terrain, a configurable number of all-pairs resolution passes, then the
//! final height snap and lifecycle checks.
//!
//! Bodies are held in a slot map, so callers keep stable generational
//! handles across spawns and despawns and can reference one body from
//! another (steering targets) without borrowing trouble.

use crate::foundation::math::utils::world_up;
use crate::foundation::math::Vec3;
use crate::physics::collision;
use crate::physics::config::PhysicsConfig;
use crate::physics::rigid_body::{RigidBody, ThrottleIntent};
use crate::terrain::HeightField;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable generational handle to a body in a [`SimWorld`].
    pub struct BodyKey;
}

/// How the driver advances a body each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// Engine-driven: consumes throttle/yaw input, rides the terrain
    Throttle,
    /// Free flyer under gravity, facing its travel direction; deactivated
    /// on ground impact or when it leaves the field
    Ballistic,
    /// Autonomous: consumes externally computed steering vectors, rides
    /// the terrain
    Steered,
}

// Per-tick inputs are stored beside the body and consumed by `step`, so a
// caller that goes quiet leaves the body coasting, not replaying stale
// commands.
struct SimBody {
    body: RigidBody,
    mode: DriveMode,
    throttle: ThrottleIntent,
    yaw_input: f32,
    steering: Vec3,
}

/// Owns the bodies and terrain of one running simulation.
pub struct SimWorld {
    terrain: HeightField,
    bodies: SlotMap<BodyKey, SimBody>,
    config: PhysicsConfig,
}

impl SimWorld {
    /// Create a world over `terrain` with the given physics constants.
    pub fn new(terrain: HeightField, config: PhysicsConfig) -> Self {
        Self {
            terrain,
            bodies: SlotMap::with_key(),
            config,
        }
    }

    /// The terrain bodies ride on.
    pub fn terrain(&self) -> &HeightField {
        &self.terrain
    }

    /// The physics constants in effect.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Number of bodies, including inactive ones.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Snapshot of all body handles.
    pub fn keys(&self) -> Vec<BodyKey> {
        self.bodies.keys().collect()
    }

    /// Add a body to the world.
    ///
    /// Surface-riding bodies are seated on the terrain immediately so the
    /// first tick starts from a settled pose.
    pub fn spawn(&mut self, mut body: RigidBody, mode: DriveMode) -> BodyKey {
        if mode != DriveMode::Ballistic {
            let position = body.pose.position;
            body.pose.position = self.terrain.constrain(position);
            body.pose.position.y = self
                .terrain
                .sample_height(body.pose.position.x, body.pose.position.z);
            let normal = self
                .terrain
                .sample_normal(body.pose.position.x, body.pose.position.z);
            body.pose.update_basis(normal);
        }
        body.refresh_collision_shape();
        log::debug!(
            "spawned {:?} body at ({:.2}, {:.2}, {:.2})",
            mode,
            body.pose.position.x,
            body.pose.position.y,
            body.pose.position.z
        );
        self.bodies.insert(SimBody {
            body,
            mode,
            throttle: ThrottleIntent::Idle,
            yaw_input: 0.0,
            steering: Vec3::zeros(),
        })
    }

    /// Remove a body, returning it if the handle was live.
    pub fn despawn(&mut self, key: BodyKey) -> Option<RigidBody> {
        self.bodies.remove(key).map(|entry| entry.body)
    }

    /// Read a body by handle.
    pub fn body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key).map(|entry| &entry.body)
    }

    /// Mutably access a body by handle.
    pub fn body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key).map(|entry| &mut entry.body)
    }

    /// Queue throttle and yaw input for the next step.
    ///
    /// `yaw_delta` is radians, applied once. Ignored (with a warning) for
    /// dead handles.
    pub fn drive(&mut self, key: BodyKey, intent: ThrottleIntent, yaw_delta: f32) {
        if let Some(entry) = self.bodies.get_mut(key) {
            entry.throttle = intent;
            entry.yaw_input = yaw_delta;
        } else {
            log::warn!("drive input for a body that no longer exists");
        }
    }

    /// Queue a steering vector for the next step.
    pub fn steer(&mut self, key: BodyKey, steering: Vec3) {
        if let Some(entry) = self.bodies.get_mut(key) {
            entry.steering = steering;
        } else {
            log::warn!("steering input for a body that no longer exists");
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Returns the number of contacts resolved across all resolution
    /// passes this tick.
    pub fn step(&mut self, dt: f32) -> usize {
        let keys: Vec<BodyKey> = self.bodies.keys().collect();

        // Integration: inputs, motion, terrain orientation, shape refresh
        for &key in &keys {
            let Some(entry) = self.bodies.get_mut(key) else {
                continue;
            };
            if !entry.body.active {
                continue;
            }

            entry.body.pre_step();
            match entry.mode {
                DriveMode::Throttle => {
                    entry.body.apply_throttle(entry.throttle, dt);
                    entry.body.pose.yaw += entry.yaw_input;
                    entry.body.integrate_throttle(dt);
                }
                DriveMode::Ballistic => {
                    entry.body.integrate_acceleration(dt, &self.config);
                }
                DriveMode::Steered => {
                    entry.body.integrate_steering(dt, entry.steering);
                }
            }
            entry.throttle = ThrottleIntent::Idle;
            entry.yaw_input = 0.0;
            entry.steering = Vec3::zeros();

            let position = entry.body.pose.position;
            if entry.mode == DriveMode::Ballistic {
                let velocity = entry.body.velocity;
                entry.body.pose.update_basis_from_velocity(world_up(), velocity);
            } else {
                entry.body.pose.position = self.terrain.constrain(position);
                let normal = self
                    .terrain
                    .sample_normal(entry.body.pose.position.x, entry.body.pose.position.z);
                entry.body.pose.update_basis(normal);
            }
            entry.body.refresh_collision_shape();
        }

        // Resolution: all pairs, several passes so compound contacts settle
        let mut contacts = 0;
        let passes = self.config.resolution_passes.max(1);
        for _ in 0..passes {
            for i in 0..keys.len() {
                for j in (i + 1)..keys.len() {
                    let Some([a, b]) = self.bodies.get_disjoint_mut([keys[i], keys[j]]) else {
                        continue;
                    };
                    if !a.body.active || !b.body.active {
                        continue;
                    }
                    if collision::resolve(&mut a.body, &mut b.body, &self.config).is_some() {
                        contacts += 1;
                    }
                }
            }
        }

        // Settle: snap riders to the surface, retire spent ballistics
        for &key in &keys {
            let Some(entry) = self.bodies.get_mut(key) else {
                continue;
            };
            if !entry.body.active {
                continue;
            }
            let position = entry.body.pose.position;
            let ground = self.terrain.sample_height(position.x, position.z);
            if entry.mode == DriveMode::Ballistic {
                if position.y <= ground || !self.terrain.contains(position.x, position.z) {
                    entry.body.pose.position.y = position.y.max(ground);
                    entry.body.velocity = Vec3::zeros();
                    entry.body.active = false;
                    log::debug!(
                        "ballistic body down at ({:.2}, {:.2})",
                        position.x,
                        position.z
                    );
                }
            } else {
                entry.body.pose.position = self.terrain.constrain(position);
                entry.body.pose.position.y = ground;
                entry.body.refresh_collision_shape();
            }
        }

        contacts
    }
}
