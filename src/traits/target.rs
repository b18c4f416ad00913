use glam::Vec3;

use super::MotionState;

/// World-space pose of a followed entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPose {
    pub position: Vec3,
    /// Facing direction, not necessarily horizontal or unit length
    pub forward: Vec3,
}

impl TargetPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

impl Default for TargetPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}

/// Something the camera can follow
pub trait Followable {
    /// Current pose, read after the entity's own movement for the frame
    fn pose(&self) -> TargetPose;

    /// Motion-state provider, if the entity has one
    fn motion_state(&self) -> Option<&dyn MotionState>;
}
