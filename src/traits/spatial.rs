use glam::Vec3;

/// Nearest surface found by a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to `point`
    pub distance: f32,
    pub point: Vec3,
}

/// Scene collision queries the camera probes with
pub trait SpatialQuery {
    /// Cast a ray and return the nearest hit no farther than `max_distance`.
    ///
    /// `direction` is expected to be unit length.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

impl<T: SpatialQuery + ?Sized> SpatialQuery for &T {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).raycast(origin, direction, max_distance)
    }
}
