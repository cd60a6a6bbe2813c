//! Shared types for the kasumi anonymization pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference raster data
/// without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of an existing raster.
    #[must_use]
    pub fn of(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Axis-aligned bounding box of a detected face, in pixel coordinates.
///
/// Produced only by a [`FaceDetector`](crate::detector::FaceDetector)
/// implementation, which guarantees `x + width <= image width` and
/// `y + height <= image height`. Read-only downstream: expansion and
/// blurring never add, remove, or modify detected regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRegion {
    /// Horizontal offset of the top-left corner.
    pub x: u32,
    /// Vertical offset of the top-left corner.
    pub y: u32,
    /// Box width in pixels.
    pub width: u32,
    /// Box height in pixels.
    pub height: u32,
}

impl FaceRegion {
    /// Create a new face region.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A face region grown by the blur margin and clamped to the image.
///
/// Exists only between expansion and blur application; never persisted.
/// The distinct type keeps unexpanded detector output from reaching the
/// blur stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedRegion {
    /// Horizontal offset of the top-left corner.
    pub x: u32,
    /// Vertical offset of the top-left corner.
    pub y: u32,
    /// Box width in pixels.
    pub width: u32,
    /// Box height in pixels.
    pub height: u32,
}

/// Configuration for the anonymization pipeline.
///
/// All parameters default to the production values of the complaint
/// wizard this pipeline was built for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fraction of a detected region's width added as margin on every
    /// side, so the blur fully covers facial edges and hair.
    pub margin_factor: f32,

    /// Absolute margin cap in pixels, preventing degenerate
    /// over-expansion on very large detections.
    pub margin_cap: u32,

    /// Box blur radius in pixels. Every blurred pixel is the unweighted
    /// average of the square neighborhood of this radius.
    pub blur_radius: u32,

    /// JPEG quality for the encoded output, in `(0.0, 1.0]`.
    pub jpeg_quality: f32,
}

impl PipelineConfig {
    /// Default margin as a fraction of region width.
    pub const DEFAULT_MARGIN_FACTOR: f32 = 0.15;

    /// Default absolute margin cap in pixels.
    pub const DEFAULT_MARGIN_CAP: u32 = 25;

    /// Default box blur radius in pixels.
    pub const DEFAULT_BLUR_RADIUS: u32 = 20;

    /// Default JPEG output quality.
    pub const DEFAULT_JPEG_QUALITY: f32 = 0.9;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            margin_factor: Self::DEFAULT_MARGIN_FACTOR,
            margin_cap: Self::DEFAULT_MARGIN_CAP,
            blur_radius: Self::DEFAULT_BLUR_RADIUS,
            jpeg_quality: Self::DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Result of blurring every detected face region of one raster.
///
/// Created once per run; a newer run supersedes (never mutates) it.
#[derive(Debug, Clone, PartialEq)]
pub struct RedactionResult {
    /// The raster with every expanded face region blurred in place.
    pub image: RgbaImage,

    /// Number of regions the detector returned for this run.
    ///
    /// Expansion and blurring never change this count; a failed or
    /// degraded detection reports zero.
    pub face_count: usize,
}

/// Errors that can occur while decoding input or encoding output.
///
/// Detection failures are deliberately *not* represented here — they are
/// downgraded to "no faces found" by the orchestration and never abort a
/// run. See [`DetectionError`](crate::detector::DetectionError).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// JPEG encoding of the output raster failed.
    #[error("failed to encode JPEG output: {0}")]
    JpegEncode(String),

    /// The configured JPEG quality is outside `(0.0, 1.0]`.
    #[error("JPEG quality must be in (0.0, 1.0], got {0}")]
    InvalidQuality(f32),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_of_raster() {
        let img = RgbaImage::new(640, 480);
        assert_eq!(
            Dimensions::of(&img),
            Dimensions {
                width: 640,
                height: 480
            },
        );
    }

    #[test]
    fn face_region_new() {
        let r = FaceRegion::new(10, 20, 30, 40);
        assert_eq!(r.x, 10);
        assert_eq!(r.y, 20);
        assert_eq!(r.width, 30);
        assert_eq!(r.height, 40);
    }

    #[test]
    fn config_defaults_match_production_values() {
        let config = PipelineConfig::default();
        assert!((config.margin_factor - 0.15).abs() < f32::EPSILON);
        assert_eq!(config.margin_cap, 25);
        assert_eq!(config.blur_radius, 20);
        assert!((config.jpeg_quality - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn config_serde_round_trip() {
        let config = PipelineConfig {
            margin_factor: 0.2,
            margin_cap: 40,
            blur_radius: 12,
            jpeg_quality: 0.75,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn face_region_serde_round_trip() {
        let r = FaceRegion::new(5, 6, 7, 8);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: FaceRegion = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn error_empty_input_display() {
        let err = PipelineError::EmptyInput;
        assert_eq!(err.to_string(), "input image data is empty");
    }

    #[test]
    fn error_invalid_quality_display() {
        let err = PipelineError::InvalidQuality(1.5);
        assert_eq!(err.to_string(), "JPEG quality must be in (0.0, 1.0], got 1.5");
    }
}
