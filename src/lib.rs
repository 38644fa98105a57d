//! Orientation estimation and camera configuration core for motion controller tracking.
//!
//! - [`vector_math`]: quaternion and vector algebra
//! - [`filters`]: per-controller complementary gravity filter
//! - [`camera`]: camera model identification and capture layout lookup
//! - [`replay`]: offline replay of recorded IMU logs

pub mod camera;
pub mod config;
pub mod error;
pub mod filters;
pub mod replay;
pub mod types;
pub mod vector_math;

pub use camera::{resolve_layout, CameraControlFrameLayout, CameraModel};
pub use config::FilterConfig;
pub use error::{TrackerError, TrackerResult};
pub use filters::OrientationFilter;
pub use types::{ImuSample, Quaternion, Vector3};
