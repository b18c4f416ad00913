use std::cell::Cell;
use std::rc::Rc;

use follow_camera::camera::{
    tick, CameraConfig, CameraController, CameraState, FrameInput, Lens, ShakeConfig, Side,
};
use follow_camera::camera::PROBE_HEIGHT;
use follow_camera::math::lerp_factor;
use follow_camera::scene::{Obstacle, Scene};
use follow_camera::scenes::create_left_wall_layout;
use follow_camera::traits::{Followable, MotionState, RayHit, SpatialQuery, TargetPose};
use glam::Vec3;

struct OpenField;

impl SpatialQuery for OpenField {
    fn raycast(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<RayHit> {
        None
    }
}

/// Wall beside a target facing +Z, at whatever distance is currently set
struct SideWall {
    /// -1 for a wall on the left (-X), +1 on the right
    toward_x: f32,
    distance: Cell<f32>,
}

impl SideWall {
    fn left(distance: f32) -> Self {
        Self {
            toward_x: -1.0,
            distance: Cell::new(distance),
        }
    }

    fn right(distance: f32) -> Self {
        Self {
            toward_x: 1.0,
            distance: Cell::new(distance),
        }
    }
}

impl SpatialQuery for SideWall {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let distance = self.distance.get();
        if direction.x * self.toward_x > 0.9 && distance <= max_distance {
            Some(RayHit {
                distance,
                point: origin + direction * distance,
            })
        } else {
            None
        }
    }
}

struct Mover {
    position: Cell<Vec3>,
    moving: Cell<bool>,
}

impl Mover {
    fn new(position: Vec3, moving: bool) -> Self {
        Self {
            position: Cell::new(position),
            moving: Cell::new(moving),
        }
    }
}

impl MotionState for Mover {
    fn is_moving(&self) -> bool {
        self.moving.get()
    }
}

impl Followable for Mover {
    fn pose(&self) -> TargetPose {
        TargetPose::new(self.position.get(), Vec3::Z)
    }

    fn motion_state(&self) -> Option<&dyn MotionState> {
        Some(self)
    }
}

fn quiet_config() -> CameraConfig {
    CameraConfig {
        shake: ShakeConfig::disabled(),
        orbit: false,
        ..CameraConfig::default()
    }
}

fn input(is_moving: bool) -> FrameInput {
    FrameInput {
        target: TargetPose::new(Vec3::ZERO, Vec3::Z),
        is_moving,
        fov: Some(60.0),
    }
}

#[cfg(test)]
mod controller_tests {
    use super::*;

    #[test]
    fn test_idle_controller_ignores_any_dt() {
        let mut controller = CameraController::new(CameraConfig::default());
        controller.bind_lens(Lens::new(55.0));
        let before = *controller.state();

        for dt in [0.0, 0.016, 1.0, -3.0, 1.0e6, f32::NAN, f32::INFINITY] {
            assert!(!controller.update(dt, &OpenField), "dt {} should be ignored", dt);
            assert_eq!(*controller.state(), before, "state changed for dt {}", dt);
        }
        assert_eq!(controller.lens(), Some(Lens::new(55.0)));
    }

    #[test]
    fn test_offsets_converge_without_overshoot() {
        let config = quiet_config();
        let mut state = CameraState::initialize(&config);
        let goal_offset = config.stopped.offset;
        let goal_rotation = config.stopped.rotation;

        let mut prev_gap_offset = (state.current_pos_offset - goal_offset).length();
        let mut prev_gap_rotation = (state.current_rot_offset - goal_rotation).length();

        for step in 0..600 {
            state = tick(&state, &input(false), &config, &OpenField, 1.0 / 60.0).state;

            let gap_offset = (state.current_pos_offset - goal_offset).length();
            let gap_rotation = (state.current_rot_offset - goal_rotation).length();
            assert!(gap_offset <= prev_gap_offset + 1e-6, "offset gap grew at step {}", step);
            assert!(gap_rotation <= prev_gap_rotation + 1e-5, "rotation gap grew at step {}", step);
            assert!(state.current_pos_offset.y <= goal_offset.y + 1e-5, "overshot height at step {}", step);
            assert!(state.current_rot_offset.x <= goal_rotation.x + 1e-4, "overshot pitch at step {}", step);
            assert_eq!(state.current_offset, config.horizontal_offset);

            prev_gap_offset = gap_offset;
            prev_gap_rotation = gap_rotation;
        }

        assert!(prev_gap_offset < 1e-3, "offset still {} away", prev_gap_offset);
    }

    #[test]
    fn test_stop_start_changes_are_bounded_by_one_step() {
        let config = CameraConfig::default();
        let dt = 1.0 / 60.0;
        let mut state = CameraState::initialize(&config);
        let mut fov = Some(60.0);

        for _ in 0..1200 {
            let out = tick(&state, &FrameInput { fov, ..input(true) }, &config, &OpenField, dt);
            state = out.state;
            fov = out.fov;
        }

        let max_fov_step = (config.fov.stopped - config.fov.moving).abs() * lerp_factor(config.fov.lerp_speed, dt);
        for (phase, is_moving) in [false, true, false].into_iter().enumerate() {
            for _ in 0..90 {
                let out = tick(&state, &FrameInput { fov, ..input(is_moving) }, &config, &OpenField, dt);

                let moved = (out.state.pose.position - state.pose.position).length();
                let turned = out.state.pose.rotation.angle_between(state.pose.rotation);
                let fov_step = (out.fov.unwrap() - fov.unwrap()).abs();
                assert!(moved < 0.12, "phase {} moved {} in one tick", phase, moved);
                assert!(turned < 0.05, "phase {} turned {} rad in one tick", phase, turned);
                assert!(fov_step <= max_fov_step + 1e-4, "phase {} fov jumped {}", phase, fov_step);

                state = out.state;
                fov = out.fov;
            }
        }
    }

    #[test]
    fn test_open_field_settles_on_stopped_framing() {
        let config = quiet_config();
        let mut state = CameraState::initialize(&config);
        let mut fov = Some(60.0);

        for _ in 0..1500 {
            let out = tick(&state, &FrameInput { fov, ..input(false) }, &config, &OpenField, 1.0 / 60.0);
            assert_eq!(out.side, Side::Right);
            assert_eq!(out.state.wall_effect_blend, 0.0);
            state = out.state;
            fov = out.fov;
        }

        // -forward * 8 + up * 7 + right * 2
        let expected = Vec3::new(2.0, 7.0, -8.0);
        assert!((state.pose.position - expected).length() < 1e-3, "settled at {:?}", state.pose.position);
        assert!((fov.unwrap() - config.fov.stopped).abs() < 1e-3);
        assert!(state.pose.forward().z > 0.0, "camera should face the target's way");
    }

    #[test]
    fn test_left_wall_pushes_shoulder_right() {
        let config = quiet_config();
        let layout = create_left_wall_layout();
        let mut state = CameraState::initialize(&config);
        let mut last_side = None;

        for _ in 0..1500 {
            let out = tick(&state, &input(true), &config, &layout.scene, 1.0 / 60.0);
            assert!(out.probe.left_blocked);
            assert!(!out.probe.right_blocked);
            last_side = Some(out.side);
            state = out.state;
        }

        assert_eq!(last_side, Some(Side::Right));
        assert!((state.wall_effect_blend - 1.0).abs() < 1e-6);
        let pushed = config.horizontal_offset + config.wall.push_distance;
        assert!((state.current_offset - pushed).abs() < 1e-3, "lateral offset {}", state.current_offset);
        assert!((state.current_rot_offset.y - config.wall.rotate_angle).abs() < 1e-2);
    }

    #[test]
    fn test_shoulder_side_wall_in_exit_buffer_pulls_camera_in() {
        let config = quiet_config();
        let blend = 1.0 - (1.2 - config.wall.check_distance) / config.wall.exit_buffer;
        let expected = config.horizontal_offset - config.wall.push_distance * blend;

        for (world, shoulder) in [(SideWall::right(1.2), 2.0), (SideWall::left(1.2), -2.0)] {
            let config = CameraConfig {
                horizontal_offset: shoulder,
                ..config.clone()
            };
            let mut state = CameraState::initialize(&config);
            for _ in 0..2000 {
                let out = tick(&state, &input(true), &config, &world, 1.0 / 60.0);
                assert!(!out.probe.left_blocked && !out.probe.right_blocked);
                assert_eq!(out.side, Side::of_offset(shoulder));
                assert_eq!(out.push, Some(Side::of_offset(shoulder).opposite()));
                state = out.state;
            }

            assert!((state.wall_effect_blend - blend).abs() < 1e-5, "blend {}", state.wall_effect_blend);
            assert!(
                (state.current_offset.abs() - expected).abs() < 1e-3,
                "shoulder {} settled at lateral {}, expected magnitude {}",
                shoulder,
                state.current_offset,
                expected
            );
            assert!(
                state.current_offset.abs() < config.horizontal_offset.abs(),
                "camera moved toward the wall: {}",
                state.current_offset
            );
            // Yaw turns away from the wall as well
            assert!(state.current_rot_offset.y * shoulder < 0.0, "yaw {}", state.current_rot_offset.y);
        }
    }

    #[test]
    fn test_wall_behind_target_holds_camera_in_front_of_it() {
        let config = quiet_config();
        let scene = Scene::new(vec![Obstacle::new(
            Vec3::new(-10.0, -10.0, -5.0),
            Vec3::new(10.0, 10.0, -4.0),
        )]);
        let pivot = Vec3::Y * PROBE_HEIGHT;

        let mut state = CameraState::initialize(&config);
        for _ in 0..2000 {
            let out = tick(&state, &input(true), &config, &scene, 1.0 / 60.0);
            assert!(out.probe.nearest().is_none(), "side probes should clear the wall");
            state = out.state;
        }

        // Unclipped framing: -forward * 8 + up * 3 + right * 2
        let path = Vec3::new(2.0, 3.0, -8.0) - pivot;
        let hit_distance = 4.0 / (-path.normalize().z);
        let settled = state.pose.position - pivot;

        assert!(
            (settled.length() - (hit_distance - 0.2)).abs() < 1e-3,
            "camera sits {} from the pivot, expected {}",
            settled.length(),
            hit_distance - 0.2
        );
        assert!(settled.normalize().dot(path.normalize()) > 0.9999, "camera left the pivot path");
        assert!(!scene.is_solid(state.pose.position));
        assert!(state.pose.position.z > -4.0);
    }

    #[test]
    fn test_wall_blend_stays_bounded_under_noisy_proximity() {
        let config = quiet_config();
        let world = SideWall::left(2.0);
        let mut state = CameraState::initialize(&config);
        let mut seed: u32 = 0x2545_f491;

        for step in 0..500 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            world.distance.set((seed >> 8) as f32 / (1u32 << 24) as f32 * 2.5);
            let dt = 0.005 + (seed & 0xff) as f32 / 255.0 * 0.1;

            let out = tick(&state, &input(true), &config, &world, dt);
            let blend = out.state.wall_effect_blend;
            let delta = (blend - state.wall_effect_blend).abs();

            assert!((0.0..=1.0).contains(&blend), "blend {} out of range at step {}", blend, step);
            assert!(
                delta <= config.wall.blend_speed * dt + 1e-5,
                "blend moved {} with dt {} at step {}",
                delta,
                dt,
                step
            );
            state = out.state;
        }
    }

    #[test]
    fn test_new_target_inherits_smoothing_state() {
        let mut controller = CameraController::new(quiet_config());
        let first = Rc::new(Mover::new(Vec3::ZERO, true));
        controller.follow_target(&first);
        for _ in 0..300 {
            assert!(controller.update(1.0 / 60.0, &OpenField));
        }

        let before = *controller.state();
        let second = Rc::new(Mover::new(Vec3::new(4.0, 0.0, 0.0), true));
        controller.follow_target(&second);
        assert_eq!(*controller.state(), before);

        assert!(controller.update(1.0 / 60.0, &OpenField));
        let moved = (controller.pose().position - before.pose.position).length();
        // One follow step toward a goal 4 units over
        assert!(moved > 0.0 && moved < 4.0 * lerp_factor(5.0, 1.0 / 60.0) + 1e-3, "moved {}", moved);
    }

    #[test]
    fn test_controller_tracks_moving_target() {
        let mut controller = CameraController::new(quiet_config());
        let target = Rc::new(Mover::new(Vec3::ZERO, true));
        controller.follow_target(&target);

        for i in 0..600 {
            target.position.set(Vec3::new(0.0, 0.0, i as f32 * 0.05));
            controller.update(1.0 / 60.0, &OpenField);
        }

        let camera = controller.pose().position;
        let target_z = target.position.get().z;
        assert!(camera.z < target_z, "camera should trail the target");
        assert!(target_z - camera.z < 12.0, "camera fell {} behind", target_z - camera.z);

        target.moving.set(false);
        assert!(controller.update(1.0 / 60.0, &OpenField));
    }
}
