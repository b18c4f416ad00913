//! Shoulder follow camera with moving/stopped framing and wall avoidance.

pub mod clipping;
pub mod config;
pub mod controller;
pub mod probe;
pub mod rig;
pub mod shake;

pub use clipping::{prevent_clipping, CLIP_MARGIN};
pub use config::{CameraConfig, ConfigError, FovConfig, Profile, ShakeConfig, WallConfig};
pub use controller::{CameraController, Lens};
pub use probe::{proximity_blend, resolve_side, step_wall_blend, DirectionFrame, Side, WallProbe, PROBE_HEIGHT};
pub use rig::{framing_target, tick, CameraPose, CameraState, FrameInput, FramingTarget, TickOutput, LOOK_BLEND};
pub use shake::ShakeSample;
