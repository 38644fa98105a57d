//! Complementary gravity filter for a single controller.
//!
//! Blends the accelerometer direction (absolute, noisy) with the previous
//! estimate propagated by the gyroscope (smooth, drifting) into a unit
//! vector pointing along gravity in the sensor frame.

use serde::{Deserialize, Serialize};

use crate::config::FilterConfig;
use crate::types::{ImuSample, Vector3};
use crate::vector_math;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrientationFilterState {
    pub estimate: Option<Vector3>,
    pub gyro_weight: f64,
    pub updates: u64,
    pub degenerate_updates: u64,
}

/// Per-controller filter. Owned by the task feeding that controller's samples.
#[derive(Clone, Debug)]
pub struct OrientationFilter {
    config: FilterConfig,

    // None until the first sample is consumed
    estimate: Option<Vector3>,

    updates: u64,
    degenerate_updates: u64,
}

impl Default for OrientationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationFilter {
    pub fn new() -> Self {
        Self::with_config(FilterConfig::default())
    }

    pub fn with_config(config: FilterConfig) -> Self {
        Self {
            config,
            estimate: None,
            updates: 0,
            degenerate_updates: 0,
        }
    }

    /// Consume one sensor tick and return the new gravity estimate.
    ///
    /// `gyro` is in degrees per time unit and `dt` in that same unit. `accel`
    /// must be non-zero; validate samples upstream with [`ImuSample::validate`].
    pub fn update(&mut self, gyro: Vector3, accel: Vector3, dt: f64) -> Vector3 {
        debug_assert!(
            accel.magnitude() > 0.0,
            "zero accelerometer vector passed to orientation filter"
        );
        let rw_acc = vector_math::normalize(accel);
        self.updates += 1;

        let previous = match self.estimate {
            Some(previous) => previous,
            None => {
                // Nothing to integrate against yet
                self.estimate = Some(rw_acc);
                return rw_acc;
            }
        };

        let rw_gyro = if previous.z.abs() < self.config.degenerate_z_threshold {
            log::trace!(
                "previous estimate z={:.4} below threshold, skipping gyro",
                previous.z
            );
            self.degenerate_updates += 1;
            previous
        } else {
            gyro_propagate(previous, gyro, dt)
        };

        let w = self.config.gyro_weight;
        let fused = vector_math::scale(
            vector_math::add(rw_acc, vector_math::scale(rw_gyro, w)),
            1.0 / (1.0 + w),
        );
        let estimate = vector_math::normalize(fused);
        self.estimate = Some(estimate);
        estimate
    }

    pub fn update_sample(&mut self, sample: &ImuSample, dt: f64) -> Vector3 {
        self.update(sample.gyro, sample.accel, dt)
    }

    pub fn estimate(&self) -> Option<Vector3> {
        self.estimate
    }

    pub fn is_initialized(&self) -> bool {
        self.estimate.is_some()
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Forget the estimate; the next sample re-seeds from the accelerometer.
    pub fn reset(&mut self) {
        self.estimate = None;
        self.updates = 0;
        self.degenerate_updates = 0;
    }

    pub fn get_state(&self) -> OrientationFilterState {
        OrientationFilterState {
            estimate: self.estimate,
            gyro_weight: self.config.gyro_weight,
            updates: self.updates,
            degenerate_updates: self.degenerate_updates,
        }
    }
}

/// Rotate `previous` by the gyro rates over `dt` using the projected angles
/// of the vector in the XZ and YZ planes.
fn gyro_propagate(previous: Vector3, gyro: Vector3, dt: f64) -> Vector3 {
    let angle_xz = previous.x.atan2(previous.z).to_degrees() + gyro.x * dt;
    let angle_yz = previous.y.atan2(previous.z).to_degrees() + gyro.y * dt;

    let (sin_xz, cos_xz, tan_xz) = trig(angle_xz);
    let (sin_yz, cos_yz, tan_yz) = trig(angle_yz);

    // Z is positive while Axz stays within -90..90 degrees
    let sign_z = if cos_xz >= 0.0 { 1.0 } else { -1.0 };

    let x = sin_xz / (1.0 + cos_xz * cos_xz * tan_yz * tan_yz).sqrt();
    let y = sin_yz / (1.0 + cos_yz * cos_yz * tan_xz * tan_xz).sqrt();
    let z = sign_z * (1.0 - x * x - y * y).max(0.0).sqrt();

    Vector3::new(x, y, z)
}

fn trig(degrees: f64) -> (f64, f64, f64) {
    let radians = degrees.to_radians();
    (radians.sin(), radians.cos(), radians.tan())
}
