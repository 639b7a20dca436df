//! Pursuit demo: a steered hunter runs down a tank circling the field

use tank_engine::foundation::math::utils::deg_to_rad;
use tank_engine::prelude::*;

// Chase configuration
const FIELD_SIZE: f32 = 150.0;
const FIELD_SUBDIVISIONS: usize = 24;
const RIDGE_HEIGHT: f32 = 2.5;
const RUNNER_MAX_VELOCITY: f32 = 0.3; // Per-step cap; the circle stays on the field
const RUNNER_TURN_DEG: f32 = 40.0; // Constant yaw rate, traces a circle
const HUNTER_MAX_SPEED: f32 = 0.5; // Faster than the runner, or it never closes
const HUNTER_MAX_FORCE: f32 = 2.0; // Velocity change of max_force * dt per step
const CAPTURE_RADIUS: f32 = 3.0;
const TIME_LIMIT_SECONDS: f32 = 120.0;
const STEP: f32 = 1.0 / 60.0;
const REPORT_EVERY_TICKS: usize = 120;

fn ridged_field() -> Result<HeightField, TerrainError> {
    HeightField::from_fn(
        FIELD_SIZE,
        FIELD_SIZE,
        FIELD_SUBDIVISIONS,
        FIELD_SUBDIVISIONS,
        |x, _| RIDGE_HEIGHT * (x * 0.08).sin(),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut world = SimWorld::new(ridged_field()?, PhysicsConfig::default());

    let runner = world.spawn(
        RigidBody::new(Vec3::new(20.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 3.0))
            .with_max_velocity(RUNNER_MAX_VELOCITY)
            .with_drag(Vec3::new(0.8, 0.8, 0.8)),
        DriveMode::Throttle,
    );
    // No drag on the hunter: a steered body's damping is the controller's
    // business, through the desired-minus-current velocity term
    let hunter = world.spawn(
        RigidBody::new(Vec3::new(-40.0, 0.0, -30.0), Vec3::new(2.0, 1.0, 3.0))
            .with_max_velocity(HUNTER_MAX_SPEED),
        DriveMode::Steered,
    );
    let controller = SteeringController::new(HUNTER_MAX_SPEED, HUNTER_MAX_FORCE);

    log::info!(
        "Starting pursuit: hunter at -40,-30 chasing runner circling at {RUNNER_TURN_DEG:.0} deg/s"
    );

    let timer = Stopwatch::start_new();
    let total_ticks = (TIME_LIMIT_SECONDS / STEP) as usize;
    let mut captured_at = None;

    for tick in 0..total_ticks {
        let (Some(runner_body), Some(hunter_body)) = (world.body(runner), world.body(hunter))
        else {
            break;
        };
        let gap = (runner_body.position() - hunter_body.position()).magnitude();
        if gap <= CAPTURE_RADIUS {
            captured_at = Some(tick as f32 * STEP);
            break;
        }
        let steering = controller.pursue(hunter_body, runner_body);

        world.drive(runner, ThrottleIntent::Forward, deg_to_rad(RUNNER_TURN_DEG) * STEP);
        world.steer(hunter, steering);
        world.step(STEP);

        if tick % REPORT_EVERY_TICKS == 0 {
            log::info!("t={:5.1}s: gap {gap:6.2}", tick as f32 * STEP);
        }
    }

    match captured_at {
        Some(time) => log::info!(
            "Runner caught after {time:.1}s ({:.1}ms wall time)",
            timer.elapsed_millis()
        ),
        None => log::info!("Runner escaped the {TIME_LIMIT_SECONDS:.0}s time limit"),
    }
    Ok(())
}
