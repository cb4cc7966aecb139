//! Headless demo: walks a subject through a small scene, turns the camera,
//! locks onto a target, and logs what the rig publishes.
//!
//! ```text
//! RUST_LOG=debug cargo run --features binary -- [options.toml]
//! ```

use std::path::Path;

use followcam::camera::{CameraRig, LockIndicator, SubjectPose};
use followcam::input::{InputEvent, InputProcessor};
use followcam::world::{Collider, EntityId, StaticWorld};
use followcam::{CameraError, Options};
use glam::{Vec2, Vec3};

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 600;
const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

const WALLS: u32 = 0;
const ENEMIES: u32 = 5;

/// Scene with two walls and two lockable targets. Returns the world and the
/// target that moves.
fn build_world() -> (StaticWorld, EntityId) {
    let mut world = StaticWorld::new();
    let _ = world.add_collider(
        Collider::cuboid(Vec3::new(0.0, 2.0, -6.0), Vec3::new(6.0, 3.0, 0.5)),
        WALLS,
    );
    let _ = world.add_collider(
        Collider::sphere(Vec3::new(-8.0, 1.0, 12.0), 2.0),
        WALLS,
    );
    let strafer = world.add_point(Vec3::new(4.0, 0.0, 18.0), ENEMIES);
    let _ = world.add_point(Vec3::new(-12.0, 0.0, 30.0), ENEMIES);
    (world, strafer)
}

/// Scripted input for a frame.
fn events_for(frame: u32) -> Vec<InputEvent> {
    match frame {
        0..=89 | 300..=329 => {
            vec![InputEvent::PointerDelta { dx: 4.0, dy: -1.0 }]
        }
        120 => vec![InputEvent::StickMoved { x: -0.8, y: 0.2 }],
        200 => vec![InputEvent::StickMoved { x: 0.0, y: 0.0 }],
        240 | 420 => vec![InputEvent::KeyPressed("KeyQ".to_owned())],
        _ => Vec::new(),
    }
}

fn main() -> Result<(), CameraError> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };

    let (mut world, strafer) = build_world();
    let mut subject = SubjectPose::new(Vec3::ZERO, 0.0);
    let mut rig = CameraRig::builder(options.camera.clone())
        .subject(subject)
        .aspect(VIEWPORT.x / VIEWPORT.y)
        .build()?;
    let mut input = InputProcessor::with_options(&options.input);
    let mut hud = LockIndicator::new(rig.projection());

    for frame in 0..FRAMES {
        // Pretend a menu is open for half a second.
        match frame {
            300 => input.set_input_enabled(false),
            330 => input.set_input_enabled(true),
            _ => {}
        }
        for event in events_for(frame) {
            if let Some(command) = input.handle_event(event) {
                if let Some(change) = rig.execute(command, &world) {
                    log::info!("frame {frame}: {change:?}");
                    hud.on_lock_change(change);
                }
            }
        }

        // Walk forward relative to the camera heading.
        let step = rig.view().movement_direction(Vec2::new(0.0, 1.0));
        subject.position += step * 3.0 * FRAME_DT;
        subject.yaw = rig.view().yaw();

        // Slide one target sideways so the lock has to track it.
        let _ = world.set_position(
            strafer,
            Vec3::new(4.0 + frame as f32 * 0.05, 0.0, 18.0),
        );

        let turn = input.take_turn_input();
        if let Some(change) =
            rig.advance(subject, turn.vector, &turn, &world, FRAME_DT)
        {
            log::info!("frame {frame}: {change:?}");
            hud.on_lock_change(change);
        }

        let marker = hud.update(&rig.view(), &world, VIEWPORT);
        if frame % 30 == 0 {
            let view = rig.view();
            log::info!(
                "frame {frame}: pos {:.2} pitch {:.1} yaw {:.1} {:?} marker {marker:?} \
                 obstructed by {:?}",
                view.position,
                view.rotation.pitch,
                view.rotation.yaw,
                rig.lock_state(),
                rig.obstruction().map(|hit| hit.entity),
            );
        }
    }

    Ok(())
}
