//! Shared setup helpers for marble benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench controller
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench controller -- pipeline

use glam::{Quat, Vec3};
use marble::ecs::spawn::{spawn_ball, spawn_static_box};
use marble::physics::{PhysicsConfig, PhysicsWorld};
use marble::{ContactReport, LayerMask, MovementController, ProbeFn, RayHit};

pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Query whose probe always hits flat ground half a unit below.
pub fn flat_probe() -> ProbeFn<impl Fn(Vec3, Vec3, f32, LayerMask) -> Option<RayHit>> {
    ProbeFn::new(GRAVITY, |origin, direction, max_distance, _| {
        (max_distance >= 0.5).then(|| RayHit {
            point: origin + direction * 0.5,
            normal: Vec3::Y,
            layer: 0,
            distance: 0.5,
        })
    })
}

/// `n` single-contact reports spread over ground, steep, and ceiling normals.
pub fn mixed_reports(n: usize) -> Vec<ContactReport> {
    (0..n)
        .map(|i| {
            let angle = (i as f32 * 37.0 % 180.0).to_radians();
            let normal = Vec3::new(angle.sin(), angle.cos(), 0.0);
            ContactReport::single((i % 4) as u32, normal)
        })
        .collect()
}

/// Floor plus `n` controlled balls resting on it in a grid.
pub fn setup_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    let mut world = hecs::World::new();
    let physics = PhysicsWorld::new(PhysicsConfig::default());

    let cols = (n as f32).sqrt().ceil() as usize;
    let extent = cols as f32 * 1.5 + 2.0;
    spawn_static_box(
        &mut world,
        Vec3::new(extent * 0.5, -0.5, extent * 0.5),
        Quat::IDENTITY,
        Vec3::new(extent, 0.5, extent),
        0,
    );

    for i in 0..n {
        let x = (i % cols) as f32 * 1.5;
        let z = (i / cols) as f32 * 1.5;
        let mut controller = MovementController::default();
        controller.set_desired_velocity(Vec3::new(1.0, 0.0, 0.5));
        spawn_ball(&mut world, Vec3::new(x, 0.5, z), 0.5, controller);
    }

    (world, physics)
}

/// Floor plus `n` static obstacles scattered above it, for raycast cost.
pub fn setup_obstacle_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let x = (i % cols) as f32 * 3.0;
        let z = (i / cols) as f32 * 3.0;
        spawn_static_box(
            &mut world,
            Vec3::new(x, 0.0, z),
            Quat::from_rotation_y(i as f32 * 0.3),
            Vec3::new(1.0, 0.5, 1.0),
            (i % 8) as u32,
        );
    }
    world
}

/// Run `steps` fixed steps of the scene.
pub fn run_scene(world: &mut hecs::World, physics: &mut PhysicsWorld, steps: usize) {
    for _ in 0..steps {
        physics.fixed_step::<MovementController>(world, 1.0 / 60.0);
    }
}
