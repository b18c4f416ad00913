mod courtyard;
mod open_field;
mod walls;

use clap::ValueEnum;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{Obstacle, Scene};

pub use courtyard::create_courtyard_layout;
pub use open_field::create_open_field_layout;
pub use walls::{create_corridor_layout, create_left_wall_layout};

/// Scene plus where the walker starts and the route it takes
#[derive(Debug, Clone)]
pub struct Layout {
    pub scene: Scene,
    pub spawn: Vec3,
    pub facing: Vec3,
    pub waypoints: Vec<Vec3>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenePreset {
    /// Flat ground, nothing to collide with
    OpenField,
    /// Long wall half a unit to the walker's left
    LeftWall,
    /// Narrow corridor blocking both sides
    Corridor,
    /// Walled yard with a ring of pillars
    Courtyard,
}

impl ScenePreset {
    pub fn layout(self) -> Layout {
        match self {
            ScenePreset::OpenField => create_open_field_layout(),
            ScenePreset::LeftWall => create_left_wall_layout(),
            ScenePreset::Corridor => create_corridor_layout(),
            ScenePreset::Courtyard => create_courtyard_layout(),
        }
    }
}

/// Thin slab with its top face at y = 0
fn ground(half_extent: f32) -> Obstacle {
    Obstacle::new(
        Vec3::new(-half_extent, -1.0, -half_extent),
        Vec3::new(half_extent, -0.01, half_extent),
    )
    .labeled("ground")
}
