//! Smoothed camera state and the per-tick update.
//!
//! `tick` is a pure function of the previous state, the target's pose and
//! motion flag, the scene, and the frame delta. The caller owns the state
//! and must run the tick after the target has moved for the frame, so the
//! camera always frames the target's post-movement pose.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::clipping::prevent_clipping;
use super::config::CameraConfig;
use super::probe::{step_wall_blend, DirectionFrame, Side, WallProbe};
use super::shake::ShakeSample;
use crate::math::{lerp, lerp_factor, look_rotation, rotation_from_euler_degrees};
use crate::traits::{SpatialQuery, TargetPose};

/// Weight of the direction-to-target in the look direction
pub const LOOK_BLEND: f32 = 0.3;

/// World transform of the camera. Local +Z is the viewing direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Smoothed lateral shoulder offset
    pub current_offset: f32,
    pub current_pos_offset: Vec3,
    /// Euler degrees `(pitch, yaw, roll)`
    pub current_rot_offset: Vec3,
    pub wall_effect_blend: f32,
    pub shake_time: f32,
    pub pose: CameraPose,
}

impl CameraState {
    /// Starts from the moving profile with the camera at the origin
    pub fn initialize(config: &CameraConfig) -> Self {
        Self::with_pose(config, CameraPose::default())
    }

    pub fn with_pose(config: &CameraConfig, pose: CameraPose) -> Self {
        Self {
            current_offset: config.horizontal_offset,
            current_pos_offset: config.moving.offset,
            current_rot_offset: config.moving.rotation,
            wall_effect_blend: 0.0,
            shake_time: 0.0,
            pose,
        }
    }
}

/// Everything the tick reads from the followed target and the lens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub target: TargetPose,
    pub is_moving: bool,
    /// Current lens field of view, `None` when no lens is bound
    pub fov: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub state: CameraState,
    pub fov: Option<f32>,
    pub probe: WallProbe,
    /// Shoulder the camera sits on
    pub side: Side,
    /// Direction the wall framing pushes toward, `None` with no wall in range
    pub push: Option<Side>,
}

/// Goal values the smoothing steps chase this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingTarget {
    pub lateral: f32,
    pub offset: Vec3,
    pub rotation: Vec3,
}

/// Base profile (plus idle sway when stopped) blended toward its
/// wall-adjusted variant by `wall_blend`.
///
/// `side` places the shoulder. `push` is the direction the wall variant
/// moves the shoulder and turns the yaw; with `None` the wall variant is
/// the base framing.
pub fn framing_target(
    config: &CameraConfig,
    is_moving: bool,
    side: Side,
    push: Option<Side>,
    wall_blend: f32,
    shake_time: f32,
) -> FramingTarget {
    let profile = config.profile(is_moving);
    let mut offset = profile.offset;
    let mut rotation = profile.rotation;

    if !is_moving {
        let sway = ShakeSample::at(&config.shake, shake_time);
        offset += sway.offset;
        rotation += sway.rotation;
    }

    let base_lateral = side.sign() * config.horizontal_offset.abs();
    let (wall_lateral, wall_rotation) = match push {
        Some(push) => (
            base_lateral + push.sign() * config.wall.push_distance,
            rotation + Vec3::Y * push.sign() * config.wall.rotate_angle,
        ),
        None => (base_lateral, rotation),
    };

    FramingTarget {
        lateral: lerp(base_lateral, wall_lateral, wall_blend),
        offset,
        rotation: rotation.lerp(wall_rotation, wall_blend),
    }
}

pub fn tick(
    state: &CameraState,
    input: &FrameInput,
    config: &CameraConfig,
    world: &dyn SpatialQuery,
    dt: f32,
) -> TickOutput {
    let frame = DirectionFrame::new(&input.target, state.pose.forward());
    let probe = WallProbe::cast(world, &frame, &config.wall);
    let side = probe.resolve_side(config.horizontal_offset);
    let push = probe.push_side(side);

    if !dt.is_finite() {
        log::warn!("Skipping camera tick with non-finite delta {}", dt);
        return TickOutput {
            state: *state,
            fov: input.fov,
            probe,
            side,
            push,
        };
    }
    let dt = dt.max(0.0);

    let wall_effect_blend = step_wall_blend(
        state.wall_effect_blend,
        probe.target_blend(&config.wall),
        config.wall.blend_speed,
        dt,
    );
    let shake_time = state.shake_time + dt;

    log::trace!(
        "wall probe left={:?} right={:?} side={:?} push={:?} blend={:.3}",
        probe.left_distance,
        probe.right_distance,
        side,
        push,
        wall_effect_blend
    );

    let goal = framing_target(config, input.is_moving, side, push, wall_effect_blend, shake_time);

    let transition = lerp_factor(config.transition_speed, dt);
    let current_pos_offset = state.current_pos_offset.lerp(goal.offset, transition);
    let current_rot_offset = state.current_rot_offset.lerp(goal.rotation, transition);
    let current_offset = lerp(
        state.current_offset,
        goal.lateral,
        lerp_factor(config.offset_lerp_speed, dt),
    );

    let target = input.target.position;
    let pivot = frame.probe_origin;
    let mut desired = target - frame.forward * current_pos_offset.z
        + Vec3::Y * current_pos_offset.y
        + frame.right * current_offset;

    if config.orbit {
        let swing = Quat::from_rotation_y(current_rot_offset.y.to_radians());
        desired = pivot + swing * (desired - pivot);
    }
    let desired = prevent_clipping(world, pivot, desired);

    let follow = lerp_factor(config.follow_speed, dt);
    let position = state.pose.position.lerp(desired, follow);

    let look_at = if config.orbit { pivot } else { target };
    let to_target = (look_at - position).normalize_or_zero();
    let mut look_dir = frame.forward.lerp(to_target, LOOK_BLEND);
    look_dir.y = 0.0;

    // At least 70% of the horizontal frame forward, so never zero here
    let rotation = steer_rotation(state.pose.rotation, look_dir, current_rot_offset, follow);

    let fov = input.fov.map(|current| {
        lerp(
            current,
            config.target_fov(input.is_moving),
            lerp_factor(config.fov.lerp_speed, dt),
        )
    });

    TickOutput {
        state: CameraState {
            current_offset,
            current_pos_offset,
            current_rot_offset,
            wall_effect_blend,
            shake_time,
            pose: CameraPose::new(position, rotation),
        },
        fov,
        probe,
        side,
        push,
    }
}

/// Slerp `current` by `t` toward the look rotation for `look_dir` with the
/// rotation offset applied locally. Keeps `current` when `look_dir` has no
/// horizontal length.
fn steer_rotation(current: Quat, look_dir: Vec3, rot_offset: Vec3, t: f32) -> Quat {
    look_rotation(look_dir).map_or(current, |look| {
        current
            .slerp(look * rotation_from_euler_degrees(rot_offset), t)
            .normalize()
    })
}
