use std::path::Path;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position offset and rotation offset used together as one framing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// x is unused (lateral comes from the shoulder offset), y is height,
    /// z is distance behind the target
    pub offset: Vec3,
    /// Euler degrees `(pitch, yaw, roll)`
    pub rotation: Vec3,
}

impl Profile {
    pub const fn new(offset: Vec3, rotation: Vec3) -> Self {
        Self { offset, rotation }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Side probe length that counts as "blocked"
    pub check_distance: f32,
    /// Extra probe length over which the wall effect fades out
    pub exit_buffer: f32,
    /// Max change of the wall blend per second
    pub blend_speed: f32,
    /// Lateral push away from the blocked side at full blend
    pub push_distance: f32,
    /// Yaw in degrees applied toward the push direction at full blend
    pub rotate_angle: f32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            check_distance: 1.0,
            exit_buffer: 0.5,
            blend_speed: 4.0,
            push_distance: 0.75,
            rotate_angle: 8.0,
        }
    }
}

/// Idle sway applied while the target stands still
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Peak deviation of the offset's (height, depth)
    pub position_amplitude: Vec2,
    /// Peak deviation in degrees of (yaw, roll)
    pub rotation_amplitude: Vec2,
    /// Oscillator frequency multiplier
    pub speed: f32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            position_amplitude: Vec2::new(0.05, 0.05),
            rotation_amplitude: Vec2::new(0.4, 0.3),
            speed: 1.2,
        }
    }
}

impl ShakeConfig {
    pub const fn disabled() -> Self {
        Self {
            position_amplitude: Vec2::ZERO,
            rotation_amplitude: Vec2::ZERO,
            speed: 0.0,
        }
    }
}

/// Field of view targets in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FovConfig {
    pub moving: f32,
    pub stopped: f32,
    pub lerp_speed: f32,
}

impl Default for FovConfig {
    fn default() -> Self {
        Self {
            moving: 60.0,
            stopped: 70.0,
            lerp_speed: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub moving: Profile,
    pub stopped: Profile,
    /// Signed shoulder offset; positive keeps the camera on the target's right
    pub horizontal_offset: f32,
    pub follow_speed: f32,
    pub offset_lerp_speed: f32,
    pub transition_speed: f32,
    pub wall: WallConfig,
    pub shake: ShakeConfig,
    pub fov: FovConfig,
    /// Swing the camera around the target by the rotation offset's yaw
    pub orbit: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            moving: Profile::new(Vec3::new(0.0, 3.0, 8.0), Vec3::new(10.0, 0.0, 0.0)),
            stopped: Profile::new(Vec3::new(0.0, 7.0, 8.0), Vec3::new(30.0, 0.0, 0.0)),
            horizontal_offset: 2.0,
            follow_speed: 5.0,
            offset_lerp_speed: 5.0,
            transition_speed: 2.0,
            wall: WallConfig::default(),
            shake: ShakeConfig::default(),
            fov: FovConfig::default(),
            orbit: true,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("`{field}` must be between 0 and 180 degrees, got {value}")]
    FieldOfView { field: &'static str, value: f32 },
}

impl CameraConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse camera config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read camera config: {:?}", path))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid camera config: {:?}", path))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize camera config")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let vectors = [
            ("moving.offset", self.moving.offset),
            ("moving.rotation", self.moving.rotation),
            ("stopped.offset", self.stopped.offset),
            ("stopped.rotation", self.stopped.rotation),
        ];
        for (field, v) in vectors {
            if !v.is_finite() {
                let value = [v.x, v.y, v.z].into_iter().find(|c| !c.is_finite()).unwrap_or(f32::NAN);
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let shake_vectors = [
            ("shake.position_amplitude", self.shake.position_amplitude),
            ("shake.rotation_amplitude", self.shake.rotation_amplitude),
        ];
        for (field, v) in shake_vectors {
            finite(field, v.x)?;
            finite(field, v.y)?;
        }

        finite("horizontal_offset", self.horizontal_offset)?;
        finite("wall.rotate_angle", self.wall.rotate_angle)?;

        let non_negative = [
            ("follow_speed", self.follow_speed),
            ("offset_lerp_speed", self.offset_lerp_speed),
            ("transition_speed", self.transition_speed),
            ("wall.check_distance", self.wall.check_distance),
            ("wall.exit_buffer", self.wall.exit_buffer),
            ("wall.blend_speed", self.wall.blend_speed),
            ("wall.push_distance", self.wall.push_distance),
            ("shake.speed", self.shake.speed),
            ("fov.lerp_speed", self.fov.lerp_speed),
        ];
        for (field, value) in non_negative {
            finite(field, value)?;
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [("fov.moving", self.fov.moving), ("fov.stopped", self.fov.stopped)] {
            if !(value > 0.0 && value < 180.0) {
                return Err(ConfigError::FieldOfView { field, value });
            }
        }

        Ok(())
    }

    /// Framing for the current motion state
    pub fn profile(&self, is_moving: bool) -> Profile {
        if is_moving {
            self.moving
        } else {
            self.stopped
        }
    }

    pub fn target_fov(&self, is_moving: bool) -> f32 {
        if is_moving {
            self.fov.moving
        } else {
            self.fov.stopped
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
