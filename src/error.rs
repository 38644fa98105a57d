use thiserror::Error;

use crate::camera::CameraModel;

/// Move tracker error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    #[error("Unknown camera device: {0}")]
    UnknownCamera(String),

    #[error("Unsupported resolution for {camera}: {width}x{height}")]
    UnsupportedResolution {
        camera: CameraModel,
        width: i32,
        height: i32,
    },

    #[error("Invalid sensor sample: {0}")]
    InvalidSample(String),

    #[error("Degenerate accelerometer reading (magnitude {0})")]
    DegenerateAccelerometer(f64),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_resolution_names_device_and_size() {
        let err = TrackerError::UnsupportedResolution {
            camera: CameraModel::Ps3Eye,
            width: 100,
            height: 100,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported resolution for PS3 Eye: 100x100"
        );
    }

    #[test]
    fn test_unknown_camera_is_distinct_from_unsupported_resolution() {
        let unknown = TrackerError::UnknownCamera("id 7".to_string());
        assert!(matches!(unknown, TrackerError::UnknownCamera(_)));
        assert_eq!(unknown.to_string(), "Unknown camera device: id 7");
    }
}
