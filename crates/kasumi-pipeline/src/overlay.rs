//! Diagnostic overlay — draw detected face boxes onto a raster.
//!
//! Not part of the anonymization output; used by the CLI to visualize
//! what the detector found when tuning detection parameters.

use image::Rgba;
use imageproc::rect::Rect;

use crate::types::{FaceRegion, RgbaImage};

/// Default outline color (opaque green).
pub const OUTLINE_COLOR: Rgba<u8> = Rgba([0, 200, 0, 255]);

/// Draw a hollow rectangle over each detected region, in place.
///
/// Zero-sized regions are skipped. Region coordinates are within image
/// bounds per the [`FaceRegion`] contract, so they fit in `i32`.
pub fn draw_face_boxes(image: &mut RgbaImage, regions: &[FaceRegion], color: Rgba<u8>) {
    for region in regions {
        if region.width == 0 || region.height == 0 {
            continue;
        }
        #[expect(clippy::cast_possible_wrap)]
        let rect = Rect::at(region.x as i32, region.y as i32).of_size(region.width, region.height);
        imageproc::drawing::draw_hollow_rect_mut(image, rect, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_marks_the_border_and_leaves_the_interior() {
        let mut img = RgbaImage::from_fn(20, 20, |_, _| image::Rgba([0, 0, 0, 255]));
        let original = img.clone();
        draw_face_boxes(&mut img, &[FaceRegion::new(5, 5, 8, 8)], OUTLINE_COLOR);

        // Corners of the rectangle carry the outline color.
        assert_eq!(*img.get_pixel(5, 5), OUTLINE_COLOR);
        assert_eq!(*img.get_pixel(12, 12), OUTLINE_COLOR);
        // Interior and exterior pixels are untouched.
        assert_eq!(img.get_pixel(9, 9), original.get_pixel(9, 9));
        assert_eq!(img.get_pixel(0, 0), original.get_pixel(0, 0));
    }

    #[test]
    fn zero_sized_region_draws_nothing() {
        let mut img = RgbaImage::from_fn(10, 10, |_, _| image::Rgba([0, 0, 0, 255]));
        let original = img.clone();
        draw_face_boxes(&mut img, &[FaceRegion::new(3, 3, 0, 5)], OUTLINE_COLOR);
        assert_eq!(img, original);
    }
}
