//! Skirmish demo: a platoon of throttle-driven tanks wandering rolling terrain

use rand::Rng;
use tank_engine::foundation::math::utils::deg_to_rad;
use tank_engine::prelude::*;

// Battlefield configuration
const FIELD_SIZE: f32 = 200.0;
const FIELD_SUBDIVISIONS: usize = 32;
const HILL_HEIGHT: f32 = 4.0;
const NUM_TANKS: usize = 12;
const TANK_SIZE: [f32; 3] = [2.0, 1.0, 3.0];
const TANK_MAX_VELOCITY: f32 = 0.75; // Matches the reference tank tuning
const TANK_DRAG: f32 = 0.8;
const SPAWN_SPREAD: f32 = 0.3; // Fraction of the field tanks start within
const TURN_JITTER_DEG: f32 = 45.0; // Max random yaw rate, degrees per second
const SIM_SECONDS: f32 = 30.0;
const STEP: f32 = 1.0 / 60.0;
const REPORT_EVERY_TICKS: usize = 300;

fn rolling_field() -> Result<HeightField, TerrainError> {
    HeightField::from_fn(
        FIELD_SIZE,
        FIELD_SIZE,
        FIELD_SUBDIVISIONS,
        FIELD_SUBDIVISIONS,
        |x, z| HILL_HEIGHT * (x * 0.05).sin() * (z * 0.04).cos(),
    )
}

fn spawn_platoon(world: &mut SimWorld, rng: &mut impl Rng) -> Vec<BodyKey> {
    let spread = FIELD_SIZE * SPAWN_SPREAD;
    (0..NUM_TANKS)
        .map(|index| {
            let x = rng.gen_range(-spread..spread);
            let z = rng.gen_range(-spread..spread);
            let mut tank = RigidBody::new(
                Vec3::new(x, 0.0, z),
                Vec3::new(TANK_SIZE[0], TANK_SIZE[1], TANK_SIZE[2]),
            )
            .with_max_velocity(TANK_MAX_VELOCITY)
            .with_drag(Vec3::new(TANK_DRAG, TANK_DRAG, TANK_DRAG));
            tank.pose.yaw = rng.gen_range(0.0..std::f32::consts::TAU);
            let key = world.spawn(tank, DriveMode::Throttle);
            log::info!("tank {index} reporting at ({x:.1}, {z:.1})");
            key
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Starting skirmish: {} tanks on a {:.0}x{:.0} field",
        NUM_TANKS,
        FIELD_SIZE,
        FIELD_SIZE
    );

    let mut world = SimWorld::new(rolling_field()?, PhysicsConfig::default());
    let mut rng = rand::thread_rng();
    let keys = spawn_platoon(&mut world, &mut rng);

    let timer = Stopwatch::start_new();
    let total_ticks = (SIM_SECONDS / STEP) as usize;
    let mut total_contacts = 0;

    for tick in 0..total_ticks {
        for &key in &keys {
            let yaw_rate = deg_to_rad(rng.gen_range(-TURN_JITTER_DEG..TURN_JITTER_DEG));
            world.drive(key, ThrottleIntent::Forward, yaw_rate * STEP);
        }
        total_contacts += world.step(STEP);

        if tick % REPORT_EVERY_TICKS == 0 {
            let colliding = keys
                .iter()
                .filter_map(|&key| world.body(key))
                .filter(|body| body.is_colliding)
                .count();
            log::info!(
                "t={:5.1}s: {} tanks in contact, {} contacts so far",
                tick as f32 * STEP,
                colliding,
                total_contacts
            );
        }
    }

    for (index, &key) in keys.iter().enumerate() {
        if let Some(body) = world.body(key) {
            let position = body.position();
            log::info!(
                "tank {index} finished at ({:.1}, {:.1}, {:.1})",
                position.x,
                position.y,
                position.z
            );
        }
    }
    log::info!(
        "Simulated {SIM_SECONDS:.0}s ({total_ticks} ticks) in {:.1}ms wall time, {total_contacts} contacts resolved",
        timer.elapsed_millis()
    );
    Ok(())
}
