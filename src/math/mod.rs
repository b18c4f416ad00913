mod aabb;
mod ray;
mod smoothing;

pub use aabb::AABB;
pub use ray::{intersect_aabb, Ray};
pub use smoothing::{flatten, lerp, lerp_factor, look_rotation, move_towards, rotation_from_euler_degrees};
