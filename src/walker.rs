use std::cell::Cell;

use glam::Vec3;

use crate::math::flatten;
use crate::traits::{Followable, MotionState, TargetPose};

/// Remaining distance at which a walker counts as arrived
pub const STOPPING_DISTANCE: f32 = 1.0;

/// Straight-line movement agent standing in for a navigating unit.
///
/// State sits in `Cell`s so a camera can hold the walker through a shared
/// `Rc` while the driver keeps moving it.
#[derive(Debug)]
pub struct Walker {
    position: Cell<Vec3>,
    forward: Cell<Vec3>,
    destination: Cell<Option<Vec3>>,
    speed: f32,
    stopping_distance: f32,
}

impl Walker {
    pub fn new(position: Vec3, forward: Vec3, speed: f32) -> Self {
        Self {
            position: Cell::new(position),
            forward: Cell::new(flatten(forward).unwrap_or(Vec3::Z)),
            destination: Cell::new(None),
            speed: speed.max(0.0),
            stopping_distance: STOPPING_DISTANCE,
        }
    }

    pub fn with_stopping_distance(mut self, stopping_distance: f32) -> Self {
        self.stopping_distance = stopping_distance.max(0.0);
        self
    }

    pub fn move_to(&self, destination: Vec3) {
        log::debug!("Walker heading to {:?}", destination);
        self.destination.set(Some(destination));
    }

    /// Step toward the destination. Returns true on the tick it arrives.
    pub fn advance(&self, dt: f32) -> bool {
        let Some(destination) = self.destination.get() else {
            return false;
        };

        let position = self.position.get();
        let mut to_goal = destination - position;
        to_goal.y = 0.0;
        let remaining = to_goal.length();

        if remaining > self.stopping_distance {
            if let Some(direction) = to_goal.try_normalize() {
                let step = (self.speed * dt.max(0.0)).min(remaining);
                self.position.set(position + direction * step);
                self.forward.set(direction);
            }
        }

        let mut left = destination - self.position.get();
        left.y = 0.0;
        if left.length() <= self.stopping_distance {
            self.destination.set(None);
            return true;
        }
        false
    }

    pub fn position(&self) -> Vec3 {
        self.position.get()
    }

    pub fn forward(&self) -> Vec3 {
        self.forward.get()
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination.get()
    }
}

impl MotionState for Walker {
    fn is_moving(&self) -> bool {
        self.destination.get().is_some()
    }
}

impl Followable for Walker {
    fn pose(&self) -> TargetPose {
        TargetPose::new(self.position.get(), self.forward.get())
    }

    fn motion_state(&self) -> Option<&dyn MotionState> {
        Some(self)
    }
}
