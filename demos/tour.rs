//! Scripted scrapyard session, run with `RUST_LOG=info cargo run --example tour`.
//!
//! Mounts the magnet, lowers the arm over a car, hauls it to the bin and
//! scraps it, then swaps to the wrecking ball and swings it around.

use log::info;
use rand::Rng;
use scrapyard::prelude::*;

const PI: f32 = std::f32::consts::PI;
const TAU: f32 = std::f32::consts::TAU;

fn horizontal_distance(a: Point3<f32>, b: Point3<f32>) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Steers so the arm (which trails opposite the forward axis) leads toward
/// `target`, reversing once roughly aligned.
fn steer_arm_toward(core: &mut GameCore<SceneWorld>, target: Point3<f32>) {
    let excavator = core.world().excavator();
    let to_target = target - excavator.position;
    let desired_yaw = (-to_target.x).atan2(-to_target.z);
    let mut diff = desired_yaw - excavator.yaw;
    while diff > PI {
        diff -= TAU;
    }
    while diff < -PI {
        diff += TAU;
    }

    let input = core.input_mut();
    input.clear();
    input.turn_left = diff > 0.05;
    input.turn_right = diff < -0.05;
    input.backward = diff.abs() < 0.5;
}

fn main() {
    env_logger::init();

    let mut world = SceneWorld::new();
    let mut rng = rand::rng();
    for _ in 0..3 {
        let x: f32 = rng.random_range(-60.0..60.0);
        let z: f32 = rng.random_range(15.0..60.0);
        world.add_car(x, z);
    }
    // One car parked right under the arm's resting reach
    let target = world.add_car(0.0, -9.0);

    let mut core = GameCore::new(world);
    info!("yard has {} cars", core.world().car_count());

    // Mount the magnet
    core.input_mut().press_cycle_attachment();
    core.tick();

    // Lower the arm over the target car
    {
        let input = core.input_mut();
        input.boom_up = true;
        input.stick_in = true;
    }
    for _ in 0..60 {
        core.tick();
    }
    core.input_mut().clear();

    core.input_mut().press_magnet_action();
    core.tick();
    match core.held_object() {
        Some(id) => info!("holding car {id} (target was {target})"),
        None => {
            info!("nothing in range, giving up");
            return;
        }
    }

    // Haul it over to the bin
    let bin = core.world().container_anchor();
    for _ in 0..3000 {
        steer_arm_toward(&mut core, bin);
        core.tick();
        if horizontal_distance(core.world().magnet_head_world(), bin) < 4.0 {
            break;
        }
    }
    core.input_mut().clear();

    core.input_mut().press_magnet_action();
    core.tick();
    info!("released over the bin; {} cars left", core.world().car_count());

    // Swap to the wrecking ball and swing it while slewing
    core.input_mut().press_cycle_attachment();
    core.tick();
    assert_eq!(core.mode(), AttachmentMode::WreckingBall);

    core.input_mut().turn_left = true;
    for i in 0..240 {
        core.tick();
        if i % 60 == 0 {
            if let Some(ball) = core.world().ball_world_position() {
                info!("ball at ({:.1}, {:.1}, {:.1})", ball.x, ball.y, ball.z);
            }
        }
    }
    info!("tour complete");
}
