use glam::Vec3;

use super::{ground, Layout};
use crate::scene::{Obstacle, Scene};

const WALL_HEIGHT: f32 = 4.0;
const WALL_THICKNESS: f32 = 1.0;

/// Wall parallel to +Z whose inner face sits at `x`, extending away from the walker
fn wall_along_z(inner_x: f32, z_min: f32, z_max: f32) -> Obstacle {
    let outer_x = inner_x + WALL_THICKNESS.copysign(inner_x);
    Obstacle::new(
        Vec3::new(inner_x, 0.0, z_min),
        Vec3::new(outer_x, WALL_HEIGHT, z_max),
    )
}

/// Walker heads down +Z with a wall 0.5 units to its left (-X)
pub fn create_left_wall_layout() -> Layout {
    Layout {
        scene: Scene::new(vec![
            ground(60.0),
            wall_along_z(-0.5, -10.0, 40.0).labeled("left wall"),
        ]),
        spawn: Vec3::ZERO,
        facing: Vec3::Z,
        waypoints: vec![Vec3::new(0.0, 0.0, 25.0)],
    }
}

/// Corridor 1.6 units wide along +Z, opening into a field at z = 20
pub fn create_corridor_layout() -> Layout {
    Layout {
        scene: Scene::new(vec![
            ground(60.0),
            wall_along_z(-0.8, -10.0, 20.0).labeled("corridor west"),
            wall_along_z(0.8, -10.0, 20.0).labeled("corridor east"),
        ]),
        spawn: Vec3::ZERO,
        facing: Vec3::Z,
        waypoints: vec![Vec3::new(0.0, 0.0, 12.0), Vec3::new(0.0, 0.0, 30.0)],
    }
}
