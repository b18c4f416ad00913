use glam::Vec3;

use crate::traits::SpatialQuery;

/// Distance kept between the camera and a surface it was pulled in front of
pub const CLIP_MARGIN: f32 = 0.2;

/// Pull `desired` in front of the first surface between `origin` and it.
pub fn prevent_clipping(world: &dyn SpatialQuery, origin: Vec3, desired: Vec3) -> Vec3 {
    let offset = desired - origin;
    let distance = offset.length();
    let Some(direction) = offset.try_normalize() else {
        return desired;
    };

    match world.raycast(origin, direction, distance) {
        Some(hit) if hit.distance < distance => hit.point - direction * CLIP_MARGIN,
        _ => desired,
    }
}
