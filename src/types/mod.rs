pub mod linalg;

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Three-axis vector, used both for raw sensor axes and unit directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const ONE: Vector3 = Vector3::new(1.0, 1.0, 1.0);
    pub const I: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const J: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const K: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Rotation quaternion in (w, x, y, z) order. Hamilton convention.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion::new(1.0, 0.0, 0.0, 0.0);
    pub const ZERO: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Pure quaternion (0, v) used to rotate a vector.
    pub const fn from_vector(v: Vector3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    pub const fn vector_part(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One tick from a controller's inertial sensors.
///
/// Gyro rates are in degrees per time unit, `timestamp` in the same time unit.
/// Accelerometer units are arbitrary but must be consistent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    pub timestamp: f64,
    pub gyro: Vector3,
    pub accel: Vector3,
}

impl ImuSample {
    pub fn new(timestamp: f64, gyro: Vector3, accel: Vector3) -> Self {
        Self {
            timestamp,
            gyro,
            accel,
        }
    }

    /// Sensor-health check to run before a sample reaches the orientation filter.
    pub fn validate(&self) -> TrackerResult<()> {
        if !self.timestamp.is_finite() {
            return Err(TrackerError::InvalidSample(format!(
                "non-finite timestamp {}",
                self.timestamp
            )));
        }
        let g = self.gyro;
        if !(g.x.is_finite() && g.y.is_finite() && g.z.is_finite()) {
            return Err(TrackerError::InvalidSample(format!(
                "non-finite gyro ({}, {}, {})",
                g.x, g.y, g.z
            )));
        }
        let magnitude = self.accel.magnitude();
        if !magnitude.is_finite() || magnitude < f64::EPSILON {
            return Err(TrackerError::DegenerateAccelerometer(magnitude));
        }
        Ok(())
    }
}
