//! Scalar and rotation helpers shared by the camera's smoothing steps.

use glam::{EulerRot, Mat3, Quat, Vec3};

/// Fraction of the remaining distance covered this tick, `rate * dt`
/// clamped to `[0, 1]` so a long frame lands on the target instead of
/// overshooting it.
#[inline]
pub fn lerp_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Steps `current` toward `target` by at most `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let max_delta = max_delta.max(0.0);
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(diff)
    }
}

/// Drops the vertical component; `None` for vectors pointing straight up or down
pub fn flatten(v: Vec3) -> Option<Vec3> {
    Vec3::new(v.x, 0.0, v.z).try_normalize()
}

/// Rotation whose local +Z faces `direction` with +Y kept as up.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    let right = Vec3::Y.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}

/// `(pitch, yaw, roll)` in degrees, applied yaw then pitch then roll
pub fn rotation_from_euler_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}
