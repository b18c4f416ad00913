//! Wall detection around the followed target.
//!
//! Two horizontal rays leave a point raised above the target along its
//! right and left. Each ray is cast at the check distance plus the exit
//! buffer; a hit inside the check distance marks that side blocked, and a
//! hit inside the buffer produces a partial wall blend so the wall framing
//! fades out instead of snapping off.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::WallConfig;
use crate::math::{flatten, move_towards};
use crate::traits::{SpatialQuery, TargetPose};

/// Height above the target's origin that probes and the clipping ray start from
pub const PROBE_HEIGHT: f32 = 1.5;

/// Horizontal basis around the target for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionFrame {
    pub forward: Vec3,
    pub right: Vec3,
    pub probe_origin: Vec3,
}

impl DirectionFrame {
    /// `fallback_forward` is used when the target faces straight up or down
    pub fn new(target: &TargetPose, fallback_forward: Vec3) -> Self {
        let forward = flatten(target.forward)
            .or_else(|| flatten(fallback_forward))
            .unwrap_or(Vec3::Z);
        let right = Vec3::Y.cross(forward);

        Self {
            forward,
            right,
            probe_origin: target.position + Vec3::Y * PROBE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Side named by the sign of a shoulder offset; zero counts as right
    pub fn of_offset(offset: f32) -> Self {
        if offset < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Result of probing both sides of the target
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WallProbe {
    /// Hit distance along `-right`, within the extended range
    pub left_distance: Option<f32>,
    /// Hit distance along `+right`, within the extended range
    pub right_distance: Option<f32>,
    pub left_blocked: bool,
    pub right_blocked: bool,
}

impl WallProbe {
    pub fn cast(world: &dyn SpatialQuery, frame: &DirectionFrame, wall: &WallConfig) -> Self {
        let reach = wall.check_distance + wall.exit_buffer;
        let left_distance = world
            .raycast(frame.probe_origin, -frame.right, reach)
            .map(|hit| hit.distance);
        let right_distance = world
            .raycast(frame.probe_origin, frame.right, reach)
            .map(|hit| hit.distance);

        Self::from_distances(left_distance, right_distance, wall.check_distance)
    }

    pub fn from_distances(
        left_distance: Option<f32>,
        right_distance: Option<f32>,
        check_distance: f32,
    ) -> Self {
        let blocked = |d: Option<f32>| d.is_some_and(|d| d <= check_distance);
        Self {
            left_distance,
            right_distance,
            left_blocked: blocked(left_distance),
            right_blocked: blocked(right_distance),
        }
    }

    pub fn nearest(&self) -> Option<f32> {
        match (self.left_distance, self.right_distance) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (l, r) => l.or(r),
        }
    }

    /// Side of the nearest hit in the extended range. `None` with no hits
    /// or with both walls at the same distance.
    pub fn wall_side(&self) -> Option<Side> {
        match (self.left_distance, self.right_distance) {
            (Some(_), None) => Some(Side::Left),
            (None, Some(_)) => Some(Side::Right),
            (Some(l), Some(r)) if l < r => Some(Side::Left),
            (Some(l), Some(r)) if r < l => Some(Side::Right),
            _ => None,
        }
    }

    /// Direction the wall framing pushes the shoulder: away from the
    /// nearest wall, or toward `shoulder` when both walls are equally close.
    /// `None` when nothing is in range.
    pub fn push_side(&self, shoulder: Side) -> Option<Side> {
        if self.nearest().is_none() {
            return None;
        }
        Some(self.wall_side().map_or(shoulder, Side::opposite))
    }

    pub fn target_blend(&self, wall: &WallConfig) -> f32 {
        proximity_blend(self.nearest(), wall.check_distance, wall.exit_buffer)
    }

    pub fn resolve_side(&self, horizontal_offset: f32) -> Side {
        resolve_side(self.left_blocked, self.right_blocked, horizontal_offset)
    }
}

/// Side the camera shoulder should sit on.
///
/// A single blocked side pushes the camera to the other one. With both
/// or neither side blocked the configured shoulder wins.
pub fn resolve_side(left_blocked: bool, right_blocked: bool, horizontal_offset: f32) -> Side {
    match (left_blocked, right_blocked) {
        (true, false) => Side::Right,
        (false, true) => Side::Left,
        _ => Side::of_offset(horizontal_offset),
    }
}

/// 1 inside `check_distance`, fading linearly to 0 across `exit_buffer`
pub fn proximity_blend(distance: Option<f32>, check_distance: f32, exit_buffer: f32) -> f32 {
    let Some(distance) = distance else {
        return 0.0;
    };
    if distance <= check_distance {
        1.0
    } else if exit_buffer > 0.0 && distance < check_distance + exit_buffer {
        (1.0 - (distance - check_distance) / exit_buffer).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Rate-limited approach of the wall blend toward `target`, kept in `[0, 1]`
pub fn step_wall_blend(current: f32, target: f32, blend_speed: f32, dt: f32) -> f32 {
    move_towards(current, target.clamp(0.0, 1.0), blend_speed * dt).clamp(0.0, 1.0)
}
