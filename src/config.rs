use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Default trust in the gyro-propagated direction relative to the accelerometer.
pub const DEFAULT_GYRO_WEIGHT: f64 = 10.0;

/// Below this |z| the previous estimate is too close to the XY plane to
/// project gyro angles against.
pub const DEFAULT_DEGENERATE_Z_THRESHOLD: f64 = 0.1;

/// Orientation filter tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub gyro_weight: f64,
    pub degenerate_z_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            gyro_weight: DEFAULT_GYRO_WEIGHT,
            degenerate_z_threshold: DEFAULT_DEGENERATE_Z_THRESHOLD,
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> TrackerResult<()> {
        if !self.gyro_weight.is_finite() || self.gyro_weight < 0.0 {
            return Err(TrackerError::InvalidParameters(format!(
                "gyro_weight must be finite and non-negative, got {}",
                self.gyro_weight
            )));
        }
        if !(0.0..1.0).contains(&self.degenerate_z_threshold) {
            return Err(TrackerError::InvalidParameters(format!(
                "degenerate_z_threshold must be in [0, 1), got {}",
                self.degenerate_z_threshold
            )));
        }
        Ok(())
    }
}
