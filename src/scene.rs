use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{BVHNode, BVHPrimitive};
use crate::math::{Ray, AABB};
use crate::traits::{RayHit, SpatialQuery};

/// Solid axis-aligned box the camera must not see through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounds: AABB,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Obstacle {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            bounds: AABB::new(min, max),
            label: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl BVHPrimitive for Obstacle {
    fn bounds(&self) -> AABB {
        self.bounds
    }
}

/// Static collision scene answering ray casts through a BVH
#[derive(Debug, Clone, Default)]
pub struct Scene {
    obstacles: Vec<Obstacle>,
    bvh: Option<BVHNode>,
}

impl Scene {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        let bvh = BVHNode::build(&obstacles);
        if let Some(bvh) = &bvh {
            let stats = bvh.stats();
            log::debug!(
                "Scene BVH: {} obstacles, {} nodes, depth {}",
                obstacles.len(),
                stats.num_nodes,
                stats.max_depth
            );
        }
        Self { obstacles, bvh }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads a JSON array of obstacles
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {:?}", path))?;
        let obstacles: Vec<Obstacle> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse scene file: {:?}", path))?;
        Ok(Self::new(obstacles))
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Whether `point` lies inside any obstacle
    pub fn is_solid(&self, point: Vec3) -> bool {
        self.obstacles.iter().any(|o| o.bounds.contains(point))
    }
}

impl SpatialQuery for Scene {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let bvh = self.bvh.as_ref()?;
        let ray = Ray::new(origin, direction)?;
        let (_, distance) = bvh.raycast(&self.obstacles, &ray, max_distance)?;
        Some(RayHit {
            distance,
            point: ray.at(distance),
        })
    }
}
