//! Work out which camera model a capture device is from what its driver reports.
//!
//! The query itself (V4L2 ioctls or similar) lives with the capture code;
//! this only interprets the answers.

use serde::{Deserialize, Serialize};

use super::CameraModel;

const PS3_EYE_DRIVER: &str = "ov534";
const OV580_CARD: &str = "USB Camera-OV580: USB Camera-OV";

// Frame sizes only the respective OV580 model advertises
const PS4_SIGNATURE_SIZE: FrameSize = FrameSize::new(3448, 808);
const PS5_SIGNATURE_SIZE: FrameSize = FrameSize::new(5148, 1088);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Yuyv,
    Mjpeg,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Driver-reported description of a capture device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraCapabilities {
    pub driver: String,
    pub card: String,
    /// First advertised pixel format, if any
    pub pixel_format: Option<PixelFormat>,
    pub frame_sizes: Vec<FrameSize>,
}

/// Identify the camera model, or `None` if it is not one we have layouts for.
pub fn identify_camera(caps: &CameraCapabilities) -> Option<CameraModel> {
    if caps.driver == PS3_EYE_DRIVER {
        return Some(CameraModel::Ps3Eye);
    }

    if caps.card != OV580_CARD {
        return None;
    }

    // PS4 and PS5 cameras share the bridge chip; tell them apart by frame sizes
    if caps.pixel_format != Some(PixelFormat::Yuyv) {
        log::warn!(
            "unexpected pixel format for OV580 camera: {:?}",
            caps.pixel_format
        );
        return None;
    }

    let mut result = None;
    for size in &caps.frame_sizes {
        log::debug!("frame size {}x{}", size.width, size.height);
        if *size == PS4_SIGNATURE_SIZE {
            result = Some(CameraModel::Ps4Camera);
        } else if *size == PS5_SIGNATURE_SIZE {
            result = Some(CameraModel::Ps5Camera);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ov580(sizes: &[(u32, u32)]) -> CameraCapabilities {
        CameraCapabilities {
            driver: "uvcvideo".to_string(),
            card: OV580_CARD.to_string(),
            pixel_format: Some(PixelFormat::Yuyv),
            frame_sizes: sizes.iter().map(|&(w, h)| FrameSize::new(w, h)).collect(),
        }
    }

    #[test]
    fn test_ps3_eye_by_driver() {
        let caps = CameraCapabilities {
            driver: "ov534".to_string(),
            ..CameraCapabilities::default()
        };
        assert_eq!(identify_camera(&caps), Some(CameraModel::Ps3Eye));
    }

    #[test]
    fn test_ps4_by_frame_size() {
        let caps = ov580(&[(3448, 808), (1748, 408), (898, 200)]);
        assert_eq!(identify_camera(&caps), Some(CameraModel::Ps4Camera));
    }

    #[test]
    fn test_ps5_by_frame_size() {
        let caps = ov580(&[(5148, 1088), (3840, 1080), (1920, 1080)]);
        assert_eq!(identify_camera(&caps), Some(CameraModel::Ps5Camera));
    }

    #[test]
    fn test_ov580_without_signature_is_unknown() {
        assert_eq!(identify_camera(&ov580(&[(640, 480)])), None);
    }

    #[test]
    fn test_ov580_wrong_pixel_format_is_unknown() {
        let mut caps = ov580(&[(3448, 808)]);
        caps.pixel_format = Some(PixelFormat::Mjpeg);
        assert_eq!(identify_camera(&caps), None);
    }

    #[test]
    fn test_generic_webcam_is_unknown() {
        let caps = CameraCapabilities {
            driver: "uvcvideo".to_string(),
            card: "Integrated Camera".to_string(),
            pixel_format: Some(PixelFormat::Yuyv),
            frame_sizes: vec![FrameSize::new(1280, 720)],
        };
        assert_eq!(identify_camera(&caps), None);
    }
}
