//! Headless demo: a scripted player rolls a ball across flat ground, up a
//! ramp, over a stairs-layer slope and into a V-groove while an orbit camera
//! follows it.
//!
//! Run with `RUST_LOG=info cargo run --manifest-path marble-app/Cargo.toml`
//! (`RUST_LOG=marble=debug` also shows jump decisions from the controller).

use glam::{Quat, Vec3};
use marble::ecs::components::{RigidBody, Transform};
use marble::ecs::spawn::{spawn_ball, spawn_static_box};
use marble::physics::{PhysicsConfig, PhysicsWorld};
use marble::{
    Event, InputState, Key, LayerMask, MovementConfig, MovementController, OrbitCamera,
    OrbitConfig,
};

const GROUND_LAYER: u32 = 0;
const STAIRS_LAYER: u32 = 1;
const FRAME_TIME: f64 = 1.0 / 50.0;

/// Scripted input for one frame.
fn scripted_events(frame: u32) -> Vec<Event> {
    match frame {
        60 => vec![Event::key_press(Key::W)],
        200 => vec![Event::key_press(Key::Space)],
        201 => vec![Event::key_release(Key::Space)],
        215 => vec![Event::key_press(Key::Space)],
        216 => vec![Event::key_release(Key::Space)],
        300..=360 => vec![Event::mouse_motion(4.0, 0.0)],
        420 => vec![Event::key_release(Key::W), Event::key_press(Key::D)],
        520 => vec![Event::key_release(Key::D)],
        600 => vec![Event::key_press(Key::Escape)],
        _ => Vec::new(),
    }
}

struct DemoApp {
    world: hecs::World,
    physics: PhysicsWorld,
    camera: OrbitCamera,
    input: InputState,
    ball: hecs::Entity,
}

impl DemoApp {
    fn init() -> anyhow::Result<Self> {
        let mut world = hecs::World::new();

        // Ground
        spawn_static_box(
            &mut world,
            Vec3::new(0.0, -0.5, 20.0),
            Quat::IDENTITY,
            Vec3::new(20.0, 0.5, 40.0),
            GROUND_LAYER,
        );

        // 20 degree ramp ahead of the start
        spawn_static_box(
            &mut world,
            Vec3::new(0.0, 0.0, 12.0),
            Quat::from_rotation_x(-20f32.to_radians()),
            Vec3::new(3.0, 0.5, 4.0),
            GROUND_LAYER,
        );

        // 40 degree slope that only counts as walkable on the stairs layer
        spawn_static_box(
            &mut world,
            Vec3::new(8.0, 0.0, 4.0),
            Quat::from_rotation_z(40f32.to_radians()),
            Vec3::new(3.0, 0.5, 3.0),
            STAIRS_LAYER,
        );

        // V-groove of two steep walls
        for side in [-1.0f32, 1.0] {
            spawn_static_box(
                &mut world,
                Vec3::new(-8.0 + side * 1.2, 1.0, 6.0),
                Quat::from_rotation_z(side * 60f32.to_radians()),
                Vec3::new(2.0, 0.25, 6.0),
                GROUND_LAYER,
            );
        }

        let mut config = MovementConfig::default().with_max_stairs_angle(50.0);
        config.stairs_mask = LayerMask::from_layer(STAIRS_LAYER);
        config.validate()?;

        let camera_config = OrbitConfig::default();
        camera_config.validate()?;

        let ball = spawn_ball(
            &mut world,
            Vec3::new(0.0, 0.5, 0.0),
            0.5,
            MovementController::new(config),
        );

        Ok(Self {
            world,
            physics: PhysicsWorld::new(PhysicsConfig::default()),
            camera: OrbitCamera::new(camera_config, Vec3::new(0.0, 0.5, 0.0)),
            input: InputState::new(),
            ball,
        })
    }

    /// Ball position extrapolated over the time the last frame left unsimulated.
    fn ball_render_position(&self) -> anyhow::Result<Vec3> {
        let position = self.world.get::<&Transform>(self.ball)?.position;
        let velocity = self.world.get::<&RigidBody>(self.ball)?.velocity;
        let step = self.physics.config().fixed_timestep as f32;
        Ok(position + velocity * self.physics.interpolation_alpha() * step)
    }

    /// Run one render frame. Returns `false` once the player asks to quit.
    fn update(&mut self, frame: u32, mut events: Vec<Event>) -> anyhow::Result<bool> {
        self.input.handle_events(&mut events);
        let quit = events.iter().any(|e| e.is_unhandled_press(Key::Escape));
        let frame_input = self.input.take_frame();

        let pose = self
            .camera
            .update(self.ball_render_position()?, frame_input.pointer_delta, FRAME_TIME as f32);

        {
            let mut controller = self.world.get::<&mut MovementController>(self.ball)?;
            controller.config_mut().input_space = Some(pose.input_space());
            controller.on_frame(&frame_input.movement);
        }

        let steps = self
            .physics
            .step::<MovementController>(&mut self.world, FRAME_TIME);

        if frame % 25 == 0 {
            let controller = self.world.get::<&MovementController>(self.ball)?;
            let rb = self.world.get::<&RigidBody>(self.ball)?;
            let position = self.world.get::<&Transform>(self.ball)?.position;
            log::info!(
                "frame {frame:4} x{steps} pos ({:6.2}, {:6.2}, {:6.2}) v {:5.2} {:?} jumps {}",
                position.x,
                position.y,
                position.z,
                rb.velocity.length(),
                controller.ground_state(),
                controller.jump_count(),
            );
        }

        Ok(!quit)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut app = DemoApp::init()?;

    let mut frame = 0;
    while app.update(frame, scripted_events(frame))? {
        frame += 1;
    }

    let position = app.world.get::<&Transform>(app.ball)?.position;
    log::info!("quit after {frame} frames, ball at {position:?}");
    Ok(())
}
