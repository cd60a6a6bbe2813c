//! Per-run redaction: blur every detected face region of one raster.
//!
//! Each region is expanded, snapshotted from the *original* pixel data,
//! blurred, and written back at the expanded offset. All pixels outside
//! the expanded regions are untouched. Regions are processed
//! independently; they are assumed non-overlapping, so processing order
//! does not affect the final raster.

use crate::blur::box_blur;
use crate::expand::expand_region;
use crate::types::{Dimensions, FaceRegion, PipelineConfig, RedactionResult, RgbaImage};

/// Blur every detected face region and return the redacted raster.
///
/// The returned [`RedactionResult::face_count`] equals `regions.len()`:
/// expansion and blurring never add or remove regions. An empty region
/// set returns a byte-identical copy of the input, which is how the
/// orchestration realizes degraded (zero-detection) mode.
#[must_use = "returns the redacted raster"]
pub fn redact(image: &RgbaImage, regions: &[FaceRegion], config: &PipelineConfig) -> RedactionResult {
    let bounds = Dimensions::of(image);
    let mut output = image.clone();

    for region in regions {
        let expanded = expand_region(*region, bounds, config.margin_factor, config.margin_cap);
        if expanded.width == 0 || expanded.height == 0 {
            continue;
        }

        // Snapshot the expanded rectangle of the pre-blur raster, blur
        // it in isolation, and overwrite that sub-rectangle only.
        let snapshot = image::imageops::crop_imm(
            image,
            expanded.x,
            expanded.y,
            expanded.width,
            expanded.height,
        )
        .to_image();
        let blurred = box_blur(&snapshot, config.blur_radius);
        image::imageops::replace(
            &mut output,
            &blurred,
            i64::from(expanded.x),
            i64::from(expanded.y),
        );
    }

    RedactionResult {
        image: output,
        face_count: regions.len(),
    }
}
