//! Region expansion — grow a detected face box by a margin so the blur
//! fully covers facial edges and hair.
//!
//! The margin is proportional to the detected width with an absolute
//! cap, then the grown box is clamped to the image so the blur stage
//! never touches out-of-range pixels.

use crate::types::{Dimensions, ExpandedRegion, FaceRegion};

/// Grow `region` by the blur margin and clamp it to `bounds`.
///
/// The margin is `min(region.width × margin_factor, margin_cap)`,
/// rounded to whole pixels. The expanded box satisfies
/// `x + width <= bounds.width` and `y + height <= bounds.height` for
/// any in-bounds input region. Pure function; the detected region is
/// not modified.
#[must_use = "returns the expanded region"]
pub fn expand_region(
    region: FaceRegion,
    bounds: Dimensions,
    margin_factor: f32,
    margin_cap: u32,
) -> ExpandedRegion {
    let margin = margin_px(region.width, margin_factor, margin_cap);

    let x = region.x.saturating_sub(margin);
    let y = region.y.saturating_sub(margin);
    let width = region
        .width
        .saturating_add(2 * margin)
        .min(bounds.width.saturating_sub(x));
    let height = region
        .height
        .saturating_add(2 * margin)
        .min(bounds.height.saturating_sub(y));

    ExpandedRegion {
        x,
        y,
        width,
        height,
    }
}

/// Margin in whole pixels for a region of the given width.
fn margin_px(region_width: u32, margin_factor: f32, margin_cap: u32) -> u32 {
    let margin = (f64::from(region_width) * f64::from(margin_factor)).min(f64::from(margin_cap));
    // Negative factors round to zero via the saturating float cast.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let px = margin.round() as u32;
    px
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PipelineConfig;

    const BOUNDS: Dimensions = Dimensions {
        width: 200,
        height: 200,
    };

    fn expand_default(region: FaceRegion, bounds: Dimensions) -> ExpandedRegion {
        expand_region(
            region,
            bounds,
            PipelineConfig::DEFAULT_MARGIN_FACTOR,
            PipelineConfig::DEFAULT_MARGIN_CAP,
        )
    }

    #[test]
    fn interior_region_grows_by_margin_on_all_sides() {
        // width 40 → margin = min(40 × 0.15, 25) = 6.
        let expanded = expand_default(FaceRegion::new(50, 50, 40, 40), BOUNDS);
        assert_eq!(
            expanded,
            ExpandedRegion {
                x: 44,
                y: 44,
                width: 52,
                height: 52,
            },
        );
    }

    #[test]
    fn margin_is_capped_for_large_detections() {
        // width 400 × 0.15 = 60, capped at 25.
        let bounds = Dimensions {
            width: 1000,
            height: 1000,
        };
        let expanded = expand_default(FaceRegion::new(300, 300, 400, 200), bounds);
        assert_eq!(expanded.x, 275);
        assert_eq!(expanded.y, 275);
        assert_eq!(expanded.width, 450);
        assert_eq!(expanded.height, 250);
    }

    #[test]
    fn region_at_origin_clamps_to_zero() {
        let expanded = expand_default(FaceRegion::new(0, 0, 40, 40), BOUNDS);
        assert_eq!(expanded.x, 0);
        assert_eq!(expanded.y, 0);
        // Only the far edge grows: 40 + 2×6 = 52 fits within bounds.
        assert_eq!(expanded.width, 52);
        assert_eq!(expanded.height, 52);
    }

    #[test]
    fn region_at_far_edge_clamps_to_image() {
        // Region touching the bottom-right corner: growth is cut off at
        // the image boundary.
        let expanded = expand_default(FaceRegion::new(160, 160, 40, 40), BOUNDS);
        assert_eq!(expanded.x, 154);
        assert_eq!(expanded.y, 154);
        assert_eq!(expanded.width, 46);
        assert_eq!(expanded.height, 46);
    }

    #[test]
    fn full_image_region_stays_within_bounds() {
        let expanded = expand_default(FaceRegion::new(0, 0, 200, 200), BOUNDS);
        assert_eq!(
            expanded,
            ExpandedRegion {
                x: 0,
                y: 0,
                width: 200,
                height: 200,
            },
        );
    }

    #[test]
    fn zero_margin_factor_is_identity_for_interior_region() {
        let region = FaceRegion::new(50, 50, 40, 40);
        let expanded = expand_region(region, BOUNDS, 0.0, 25);
        assert_eq!(
            expanded,
            ExpandedRegion {
                x: 50,
                y: 50,
                width: 40,
                height: 40,
            },
        );
    }

    #[test]
    fn expanded_region_is_always_in_bounds() {
        // Bounds safety over a sweep of region positions and sizes.
        for x in [0, 1, 50, 150, 199] {
            for y in [0, 1, 50, 150, 199] {
                for w in [1, 10, 40] {
                    for h in [1, 10, 40] {
                        if x + w > BOUNDS.width || y + h > BOUNDS.height {
                            continue;
                        }
                        let expanded = expand_default(FaceRegion::new(x, y, w, h), BOUNDS);
                        assert!(
                            expanded.x + expanded.width <= BOUNDS.width,
                            "x overflow for region ({x},{y},{w},{h}): {expanded:?}",
                        );
                        assert!(
                            expanded.y + expanded.height <= BOUNDS.height,
                            "y overflow for region ({x},{y},{w},{h}): {expanded:?}",
                        );
                        assert!(
                            expanded.width >= w && expanded.height >= h,
                            "expansion shrank region ({x},{y},{w},{h}): {expanded:?}",
                        );
                    }
                }
            }
        }
    }
}
