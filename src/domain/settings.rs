use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;
pub const DEFAULT_RAY_SPACING: f32 = 0.25;
pub const DEFAULT_MAX_SLOPE_ANGLE: f32 = 80.0;
pub const DEFAULT_FALL_THROUGH_DELAY_MS: f64 = 250.0;
pub const DEFAULT_CELL_SIZE: f32 = 4.0;

/// Engine-wide tuning. Applies to bodies and platforms created afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Inward margin of every ray origin from its box edge
    pub skin_width: f32,
    /// Desired gap between parallel rays
    pub ray_spacing: f32,
    /// Steepest walkable slope, degrees
    pub max_slope_angle: f32,
    /// Real-time window a through platform is ignored after a fall request
    pub fall_through_delay_ms: f64,
    /// Broadphase cell edge length
    pub cell_size: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            skin_width: DEFAULT_SKIN_WIDTH,
            ray_spacing: DEFAULT_RAY_SPACING,
            max_slope_angle: DEFAULT_MAX_SLOPE_ANGLE,
            fall_through_delay_ms: DEFAULT_FALL_THROUGH_DELAY_MS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.skin_width.is_finite() && self.skin_width > 0.0) {
            return Err(invalid(format!("skin_width must be > 0, got {}", self.skin_width)));
        }
        if !(self.ray_spacing.is_finite() && self.ray_spacing > 0.0) {
            return Err(invalid(format!("ray_spacing must be > 0, got {}", self.ray_spacing)));
        }
        if self.ray_spacing < self.skin_width {
            return Err(invalid(format!(
                "ray_spacing {} is below skin_width {}",
                self.ray_spacing, self.skin_width
            )));
        }
        if !(self.max_slope_angle > 0.0 && self.max_slope_angle < 90.0) {
            return Err(invalid(format!(
                "max_slope_angle must be in (0, 90) degrees, got {}",
                self.max_slope_angle
            )));
        }
        if !(self.fall_through_delay_ms.is_finite() && self.fall_through_delay_ms >= 0.0) {
            return Err(invalid(format!(
                "fall_through_delay_ms must be >= 0, got {}",
                self.fall_through_delay_ms
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(invalid(format!("cell_size must be > 0, got {}", self.cell_size)));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> EngineError {
    EngineError::InvalidSettings(msg)
}
