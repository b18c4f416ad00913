/// Locomotion state of a followed entity
pub trait MotionState {
    /// True while the entity is travelling toward a destination
    fn is_moving(&self) -> bool;
}

impl MotionState for bool {
    fn is_moving(&self) -> bool {
        *self
    }
}
