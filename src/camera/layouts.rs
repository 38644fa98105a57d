//! Fixed per-model table of capture modes and the lookup over it.

use serde::{Deserialize, Serialize};

use super::CameraModel;
use crate::error::{TrackerError, TrackerResult};

/// One operating mode: the frame the driver delivers, and the region of it
/// handed to tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraControlFrameLayout {
    pub capture_width: u32,
    pub capture_height: u32,
    pub crop_x: u32,
    pub crop_y: u32,
    pub crop_width: u32,
    pub crop_height: u32,
}

impl CameraControlFrameLayout {
    pub const fn new(
        capture_width: u32,
        capture_height: u32,
        crop_x: u32,
        crop_y: u32,
        crop_width: u32,
        crop_height: u32,
    ) -> Self {
        Self {
            capture_width,
            capture_height,
            crop_x,
            crop_y,
            crop_width,
            crop_height,
        }
    }

    pub fn is_cropped(&self) -> bool {
        self.crop_x != 0
            || self.crop_y != 0
            || self.crop_width != self.capture_width
            || self.crop_height != self.capture_height
    }

    /// X offset of the second eye in a side-by-side stereo capture, if the
    /// capture buffer is wide enough to hold it.
    pub fn second_frame_crop_x(&self) -> Option<u32> {
        let x = self.crop_x.checked_add(self.crop_width)?;
        let end = x.checked_add(self.crop_width)?;
        (end <= self.capture_width).then_some(x)
    }
}

const PS3_EYE_LAYOUTS: [CameraControlFrameLayout; 2] = [
    CameraControlFrameLayout::new(640, 480, 0, 0, 640, 480),
    CameraControlFrameLayout::new(320, 240, 0, 0, 320, 240),
];

const PS4_CAMERA_LAYOUTS: [CameraControlFrameLayout; 3] = [
    CameraControlFrameLayout::new(3448, 808, 48, 0, 1280, 800),
    CameraControlFrameLayout::new(1748, 408, 48, 0, 640, 400),
    CameraControlFrameLayout::new(898, 200, 48, 0, 320, 192),
];

// 1280x800 and 320x184 are only stable in the stereo modes, so those capture
// at double width and crop the left eye.
const PS5_CAMERA_LAYOUTS: [CameraControlFrameLayout; 5] = [
    CameraControlFrameLayout::new(2560, 800, 0, 0, 1280, 800),
    CameraControlFrameLayout::new(1920, 1080, 0, 0, 1920, 1080),
    CameraControlFrameLayout::new(960, 520, 0, 0, 960, 520),
    CameraControlFrameLayout::new(640, 376, 0, 0, 640, 376),
    CameraControlFrameLayout::new(640, 184, 0, 0, 320, 184),
];

/// Supported layouts for `model`. The first entry is the default mode.
pub fn supported_layouts(model: CameraModel) -> &'static [CameraControlFrameLayout] {
    match model {
        CameraModel::Ps3Eye => &PS3_EYE_LAYOUTS,
        CameraModel::Ps4Camera => &PS4_CAMERA_LAYOUTS,
        CameraModel::Ps5Camera => &PS5_CAMERA_LAYOUTS,
    }
}

/// What the frame-capture side asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutRequest {
    /// No preference; take the model's first layout.
    Default,
    Resolution { width: i32, height: i32 },
}

impl LayoutRequest {
    /// Map the `-1 x -1` "no preference" sentinel onto [`LayoutRequest::Default`].
    pub fn from_dimensions(width: i32, height: i32) -> Self {
        if width == -1 && height == -1 {
            LayoutRequest::Default
        } else {
            LayoutRequest::Resolution { width, height }
        }
    }
}

pub fn resolve(
    model: CameraModel,
    request: LayoutRequest,
) -> TrackerResult<CameraControlFrameLayout> {
    let layouts = supported_layouts(model);

    let (width, height) = match request {
        LayoutRequest::Default => {
            let layout = layouts[0];
            log::debug!("{model}: default layout {layout:?}");
            return Ok(layout);
        }
        LayoutRequest::Resolution { width, height } => (width, height),
    };

    let found = layouts.iter().find(|layout| {
        i64::from(layout.crop_width) == i64::from(width)
            && i64::from(layout.crop_height) == i64::from(height)
    });

    match found {
        Some(layout) => {
            log::debug!("{model}: {width}x{height} -> {layout:?}");
            Ok(*layout)
        }
        None => {
            log::warn!("{model}: unsupported resolution {width}x{height}");
            Err(TrackerError::UnsupportedResolution {
                camera: model,
                width,
                height,
            })
        }
    }
}

/// Resolve a layout for a crop size, or the default with `-1, -1`.
pub fn resolve_layout(
    model: CameraModel,
    width: i32,
    height: i32,
) -> TrackerResult<CameraControlFrameLayout> {
    resolve(model, LayoutRequest::from_dimensions(width, height))
}
