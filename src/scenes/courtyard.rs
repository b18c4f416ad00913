use glam::Vec3;

use super::{ground, Layout};
use crate::scene::{Obstacle, Scene};

const YARD_HALF: f32 = 20.0;
const WALL_HEIGHT: f32 = 6.0;
const PILLAR_RING_RADIUS: f32 = 8.0;
const PILLAR_COUNT: usize = 12;

pub fn create_courtyard_layout() -> Layout {
    let mut obstacles = vec![ground(YARD_HALF + 10.0)];

    let t = 1.0;
    obstacles.extend([
        Obstacle::new(
            Vec3::new(-YARD_HALF - t, 0.0, -YARD_HALF - t),
            Vec3::new(YARD_HALF + t, WALL_HEIGHT, -YARD_HALF),
        )
        .labeled("north wall"),
        Obstacle::new(
            Vec3::new(-YARD_HALF - t, 0.0, YARD_HALF),
            Vec3::new(YARD_HALF + t, WALL_HEIGHT, YARD_HALF + t),
        )
        .labeled("south wall"),
        Obstacle::new(
            Vec3::new(-YARD_HALF - t, 0.0, -YARD_HALF),
            Vec3::new(-YARD_HALF, WALL_HEIGHT, YARD_HALF),
        )
        .labeled("west wall"),
        Obstacle::new(
            Vec3::new(YARD_HALF, 0.0, -YARD_HALF),
            Vec3::new(YARD_HALF + t, WALL_HEIGHT, YARD_HALF),
        )
        .labeled("east wall"),
    ]);

    obstacles.extend((0..PILLAR_COUNT).map(|i| {
        let angle = (i as f32 / PILLAR_COUNT as f32) * std::f32::consts::TAU;
        let center = Vec3::new(angle.cos(), 0.0, angle.sin()) * PILLAR_RING_RADIUS;
        Obstacle::new(
            center + Vec3::new(-0.6, 0.0, -0.6),
            center + Vec3::new(0.6, 4.0, 0.6),
        )
        .labeled(format!("pillar {}", i))
    }));

    // Hug the perimeter wall, then cut through the pillar ring
    let inset = YARD_HALF - 1.2;
    Layout {
        scene: Scene::new(obstacles),
        spawn: Vec3::new(-inset, 0.0, -inset + 2.0),
        facing: Vec3::Z,
        waypoints: vec![
            Vec3::new(-inset, 0.0, inset),
            Vec3::new(inset, 0.0, inset),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-inset, 0.0, -inset + 2.0),
        ],
    }
}
