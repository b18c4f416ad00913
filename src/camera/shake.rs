use glam::Vec3;

use super::config::ShakeConfig;

// Per-axis phase multipliers, kept apart so the axes never line up
const HEIGHT_PHASE: f32 = 1.0;
const DEPTH_PHASE: f32 = 0.7;
const YAW_PHASE: f32 = 0.55;
const ROLL_PHASE: f32 = 1.3;

/// Offset and rotation deltas of the idle sway at `time`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShakeSample {
    pub offset: Vec3,
    /// Euler degrees, only yaw (y) and roll (z) are driven
    pub rotation: Vec3,
}

impl ShakeSample {
    pub fn at(config: &ShakeConfig, time: f32) -> Self {
        let phase = time * config.speed;
        Self {
            offset: Vec3::new(
                0.0,
                (phase * HEIGHT_PHASE).sin() * config.position_amplitude.x,
                (phase * DEPTH_PHASE).cos() * config.position_amplitude.y,
            ),
            rotation: Vec3::new(
                0.0,
                (phase * YAW_PHASE).sin() * config.rotation_amplitude.x,
                (phase * ROLL_PHASE).cos() * config.rotation_amplitude.y,
            ),
        }
    }
}
