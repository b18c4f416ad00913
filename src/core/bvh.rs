use crate::math::{Ray, AABB};
use glam::Vec3;

/// Obstacles per leaf before a node is split
const MAX_LEAF_SIZE: usize = 4;

/// Bounding volume hierarchy over a slice of primitives
#[derive(Clone, Debug)]
pub enum BVHNode {
    Leaf {
        bounds: AABB,
        primitive_indices: Vec<u32>,
    },
    Internal {
        bounds: AABB,
        left: Box<BVHNode>,
        right: Box<BVHNode>,
    },
}

/// Objects that can be inserted into a BVH and hit by rays
pub trait BVHPrimitive {
    fn bounds(&self) -> AABB;

    fn centroid(&self) -> Vec3 {
        self.bounds().center()
    }

    /// Entry distance of `ray` into the primitive
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        ray.intersect(&self.bounds())
    }
}

/// BVH build statistics
#[derive(Debug, Clone, Copy)]
pub struct BVHStats {
    pub num_nodes: usize,
    pub num_leaves: usize,
    pub max_depth: usize,
    pub total_primitives: usize,
    pub avg_leaf_size: f32,
}

impl BVHNode {
    /// Build by halving at the centroid median of the widest axis.
    /// `None` for an empty primitive list.
    pub fn build<P: BVHPrimitive>(primitives: &[P]) -> Option<Self> {
        if primitives.is_empty() {
            return None;
        }
        let indices: Vec<u32> = (0..primitives.len() as u32).collect();
        Some(Self::build_recursive(primitives, indices))
    }

    fn build_recursive<P: BVHPrimitive>(primitives: &[P], mut indices: Vec<u32>) -> Self {
        let bounds = indices.iter().fold(
            primitives[indices[0] as usize].bounds(),
            |acc, &idx| acc.union(&primitives[idx as usize].bounds()),
        );

        if indices.len() <= MAX_LEAF_SIZE {
            return BVHNode::Leaf {
                bounds,
                primitive_indices: indices,
            };
        }

        let axis = widest_centroid_axis(primitives, &indices);
        indices.sort_by(|&a, &b| {
            let ca = primitives[a as usize].centroid()[axis];
            let cb = primitives[b as usize].centroid()[axis];
            ca.total_cmp(&cb)
        });

        let right_indices = indices.split_off(indices.len() / 2);
        BVHNode::Internal {
            bounds,
            left: Box::new(Self::build_recursive(primitives, indices)),
            right: Box::new(Self::build_recursive(primitives, right_indices)),
        }
    }

    pub fn bounds(&self) -> &AABB {
        match self {
            BVHNode::Leaf { bounds, .. } => bounds,
            BVHNode::Internal { bounds, .. } => bounds,
        }
    }

    /// Nearest primitive hit within `max_distance` as `(index, distance)`
    pub fn raycast<P: BVHPrimitive>(
        &self,
        primitives: &[P],
        ray: &Ray,
        max_distance: f32,
    ) -> Option<(u32, f32)> {
        let mut best: Option<(u32, f32)> = None;
        self.raycast_recursive(primitives, ray, max_distance, &mut best);
        best
    }

    fn raycast_recursive<P: BVHPrimitive>(
        &self,
        primitives: &[P],
        ray: &Ray,
        max_distance: f32,
        best: &mut Option<(u32, f32)>,
    ) {
        let limit = best.map_or(max_distance, |(_, d)| d.min(max_distance));
        if !node_reachable(self.bounds(), ray, limit) {
            return;
        }

        match self {
            BVHNode::Leaf {
                primitive_indices, ..
            } => {
                for &idx in primitive_indices {
                    let Some(t) = primitives[idx as usize].intersect(ray) else {
                        continue;
                    };
                    let limit = best.map_or(max_distance, |(_, d)| d.min(max_distance));
                    if t <= limit {
                        *best = Some((idx, t));
                    }
                }
            }
            BVHNode::Internal { left, right, .. } => {
                left.raycast_recursive(primitives, ray, max_distance, best);
                right.raycast_recursive(primitives, ray, max_distance, best);
            }
        }
    }

    pub fn stats(&self) -> BVHStats {
        let mut stats = BVHStats {
            num_nodes: 0,
            num_leaves: 0,
            max_depth: 0,
            total_primitives: 0,
            avg_leaf_size: 0.0,
        };

        self.gather_stats(&mut stats, 0);

        if stats.num_leaves > 0 {
            stats.avg_leaf_size = stats.total_primitives as f32 / stats.num_leaves as f32;
        }

        stats
    }

    fn gather_stats(&self, stats: &mut BVHStats, depth: usize) {
        stats.num_nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);

        match self {
            BVHNode::Leaf {
                primitive_indices, ..
            } => {
                stats.num_leaves += 1;
                stats.total_primitives += primitive_indices.len();
            }
            BVHNode::Internal { left, right, .. } => {
                left.gather_stats(stats, depth + 1);
                right.gather_stats(stats, depth + 1);
            }
        }
    }
}

fn widest_centroid_axis<P: BVHPrimitive>(primitives: &[P], indices: &[u32]) -> usize {
    let (min, max) = indices.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), &idx| {
            let c = primitives[idx as usize].centroid();
            (min.min(c), max.max(c))
        },
    );
    let extent = max - min;
    if extent.x >= extent.y && extent.x >= extent.z {
        0
    } else if extent.y >= extent.z {
        1
    } else {
        2
    }
}

/// Node culling has to accept rays that start inside the node's bounds,
/// since probes usually originate inside the scene's overall box.
fn node_reachable(bounds: &AABB, ray: &Ray, limit: f32) -> bool {
    bounds.contains(ray.origin) || ray.intersect(bounds).is_some_and(|t| t <= limit)
}
