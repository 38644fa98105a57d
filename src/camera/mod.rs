//! Camera models and their supported capture geometries.

pub mod identify;
pub mod layouts;

pub use identify::{identify_camera, CameraCapabilities, FrameSize, PixelFormat};
pub use layouts::{
    resolve, resolve_layout, supported_layouts, CameraControlFrameLayout, LayoutRequest,
};

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Optical tracking camera models with a known layout table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraModel {
    /// First-generation 640x480 camera
    Ps3Eye,
    /// Stereo wide camera, frames padded by 48 pixels on the left
    Ps4Camera,
    Ps5Camera,
}

impl CameraModel {
    pub const ALL: [CameraModel; 3] = [
        CameraModel::Ps3Eye,
        CameraModel::Ps4Camera,
        CameraModel::Ps5Camera,
    ];

    /// Numeric device identifier.
    pub fn id(&self) -> i32 {
        match self {
            CameraModel::Ps3Eye => 3,
            CameraModel::Ps4Camera => 4,
            CameraModel::Ps5Camera => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CameraModel::Ps3Eye => "PS3 Eye",
            CameraModel::Ps4Camera => "PS4 Camera",
            CameraModel::Ps5Camera => "PS5 Camera",
        }
    }
}

impl Display for CameraModel {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for CameraModel {
    type Error = TrackerError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        CameraModel::ALL
            .into_iter()
            .find(|model| model.id() == id)
            .ok_or_else(|| TrackerError::UnknownCamera(format!("device id {id}")))
    }
}

impl FromStr for CameraModel {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ps3" | "ps3eye" | "ps3-eye" => Ok(CameraModel::Ps3Eye),
            "ps4" | "ps4camera" | "ps4-camera" => Ok(CameraModel::Ps4Camera),
            "ps5" | "ps5camera" | "ps5-camera" => Ok(CameraModel::Ps5Camera),
            _ => Err(TrackerError::UnknownCamera(s.to_string())),
        }
    }
}
