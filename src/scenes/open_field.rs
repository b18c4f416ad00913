use glam::Vec3;

use super::{ground, Layout};
use crate::scene::Scene;

pub fn create_open_field_layout() -> Layout {
    Layout {
        scene: Scene::new(vec![ground(100.0)]),
        spawn: Vec3::ZERO,
        facing: Vec3::Z,
        waypoints: vec![
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::new(15.0, 0.0, 20.0),
            Vec3::new(15.0, 0.0, 0.0),
        ],
    }
}
