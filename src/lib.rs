pub mod camera;
pub mod cli;
pub mod core;
pub mod math;
pub mod scene;
pub mod scenes;
pub mod sim;
pub mod traits;
pub mod walker;

pub use camera::{CameraConfig, CameraController, CameraPose, CameraState, Lens};
pub use scene::{Obstacle, Scene};
pub use scenes::ScenePreset;
pub use traits::{Followable, MotionState, RayHit, SpatialQuery, TargetPose};
pub use walker::Walker;
