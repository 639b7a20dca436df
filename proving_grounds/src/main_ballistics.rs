//! Ballistics demo: a mortar volley arcing over wavy terrain

use rand::Rng;
use tank_engine::foundation::math::utils::deg_to_rad;
use tank_engine::prelude::*;

// Volley configuration
const FIELD_SIZE: f32 = 200.0;
const FIELD_SUBDIVISIONS: usize = 32;
const WAVE_HEIGHT: f32 = 3.0;
const NUM_SHELLS: usize = 16;
const SHELL_SIZE: f32 = 0.5;
const MUZZLE_POSITION: [f32; 3] = [-60.0, 4.0, 0.0]; // Clears the tallest wave crest
const GUN_SPACING: f32 = 3.0; // Battery line runs along Z, one gun per shell
const MUZZLE_SPEED: f32 = 1.2; // World units per step at launch
const ELEVATION_RANGE_DEG: [f32; 2] = [30.0, 70.0];
const AZIMUTH_SPREAD_DEG: f32 = 25.0; // Either side of straight downrange (+X)
const TIME_LIMIT_TICKS: usize = 3600;
const STEP: f32 = 1.0 / 60.0;

fn wavy_field() -> Result<HeightField, TerrainError> {
    HeightField::from_fn(
        FIELD_SIZE,
        FIELD_SIZE,
        FIELD_SUBDIVISIONS,
        FIELD_SUBDIVISIONS,
        |x, z| WAVE_HEIGHT * ((x * 0.06).sin() + (z * 0.05).cos()) * 0.5,
    )
}

fn launch_velocity(rng: &mut impl Rng) -> Vec3 {
    let elevation = deg_to_rad(rng.gen_range(ELEVATION_RANGE_DEG[0]..ELEVATION_RANGE_DEG[1]));
    let azimuth = deg_to_rad(rng.gen_range(-AZIMUTH_SPREAD_DEG..AZIMUTH_SPREAD_DEG));
    // Downrange is +X; azimuth swings the shot across Z
    Vec3::new(
        MUZZLE_SPEED * elevation.cos() * azimuth.cos(),
        MUZZLE_SPEED * elevation.sin(),
        MUZZLE_SPEED * elevation.cos() * azimuth.sin(),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut world = SimWorld::new(wavy_field()?, PhysicsConfig::default());
    let mut rng = rand::thread_rng();

    log::info!("Firing {NUM_SHELLS} shells from ({:.0}, {:.0})", MUZZLE_POSITION[0], MUZZLE_POSITION[2]);
    let battery_half_span = GUN_SPACING * (NUM_SHELLS as f32 - 1.0) * 0.5;
    let keys: Vec<BodyKey> = (0..NUM_SHELLS)
        .map(|index| {
            let gun_z = MUZZLE_POSITION[2] - battery_half_span + GUN_SPACING * index as f32;
            let mut shell = RigidBody::new(
                Vec3::new(MUZZLE_POSITION[0], MUZZLE_POSITION[1], gun_z),
                Vec3::new(SHELL_SIZE, SHELL_SIZE, SHELL_SIZE),
            );
            shell.velocity = launch_velocity(&mut rng);
            world.spawn(shell, DriveMode::Ballistic)
        })
        .collect();

    let timer = Stopwatch::start_new();
    let mut flight_ticks = vec![0usize; NUM_SHELLS];
    let mut ticks = 0;
    while ticks < TIME_LIMIT_TICKS {
        world.step(STEP);
        ticks += 1;
        for (index, &key) in keys.iter().enumerate() {
            if world.body(key).is_some_and(|shell| shell.active) {
                flight_ticks[index] = ticks;
            }
        }
        if !keys
            .iter()
            .any(|&key| world.body(key).is_some_and(|shell| shell.active))
        {
            break;
        }
    }

    let mut longest = 0.0_f32;
    for (index, &key) in keys.iter().enumerate() {
        if let Some(shell) = world.body(key) {
            let position = shell.position();
            let range = position.x - MUZZLE_POSITION[0];
            longest = longest.max(range);
            log::info!(
                "shell {index:2}: down at ({:6.1}, {:6.1}), range {range:6.1}, flight {:.1}s",
                position.x,
                position.z,
                flight_ticks[index] as f32 * STEP
            );
        }
    }
    log::info!(
        "Volley complete in {ticks} ticks ({:.1}ms wall time), longest range {longest:.1}",
        timer.elapsed_millis()
    );
    Ok(())
}
