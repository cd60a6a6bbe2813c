//! Output encoding — serialize the redacted raster as JPEG.
//!
//! JPEG has no alpha channel, so the raster is first flattened onto a
//! white background. The encoding is lossy by design (blur plus DCT
//! quantization is not reversible), but the encoded bytes always decode
//! back to a raster of identical dimensions.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, RgbImage};

use crate::types::{PipelineError, RgbaImage};

/// Encode a raster as JPEG at the given quality in `(0.0, 1.0]`.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidQuality`] if `quality` is outside
/// `(0.0, 1.0]`, and [`PipelineError::JpegEncode`] if the encoder
/// fails.
pub fn encode_jpeg(image: &RgbaImage, quality: f32) -> Result<Vec<u8>, PipelineError> {
    if !(quality > 0.0 && quality <= 1.0) {
        return Err(PipelineError::InvalidQuality(quality));
    }

    let rgb = flatten_alpha(image);

    // Quality is validated to (0.0, 1.0], so the percentage fits in u8.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let quality_percent = (quality * 100.0).round() as u8;

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality_percent);
    encoder
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PipelineError::JpegEncode(e.to_string()))?;

    Ok(buffer)
}

/// Flatten the alpha channel by compositing onto a white background.
#[must_use = "returns the flattened RGB raster"]
pub fn flatten_alpha(image: &RgbaImage) -> RgbImage {
    let mut rgb = RgbImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = f32::from(a) / 255.0;
        let inv_alpha = 1.0 - alpha;
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let composite = |channel: u8| (f32::from(channel) * alpha + 255.0 * inv_alpha).round() as u8;
        rgb.put_pixel(x, y, image::Rgb([composite(r), composite(g), composite(b)]));
    }

    rgb
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    fn gradient_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        })
    }

    #[test]
    fn encoded_bytes_start_with_jpeg_magic() {
        let data = encode_jpeg(&gradient_image(48, 64), 0.9).unwrap();
        assert!(!data.is_empty());
        assert_eq!(data[0], 0xFF);
        assert_eq!(data[1], 0xD8);
    }

    #[test]
    fn encoded_bytes_decode_to_identical_dimensions() {
        let data = encode_jpeg(&gradient_image(123, 45), 0.9).unwrap();
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!(decoded.width(), 123);
        assert_eq!(decoded.height(), 45);
    }

    #[test]
    fn zero_quality_is_rejected() {
        let result = encode_jpeg(&gradient_image(4, 4), 0.0);
        assert!(matches!(result, Err(PipelineError::InvalidQuality(_))));
    }

    #[test]
    fn quality_above_one_is_rejected() {
        let result = encode_jpeg(&gradient_image(4, 4), 1.5);
        assert!(matches!(result, Err(PipelineError::InvalidQuality(_))));
    }

    #[test]
    fn flatten_alpha_composites_transparent_to_white() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 0]));
        let rgb = flatten_alpha(&img);
        assert_eq!(rgb.get_pixel(0, 0), &image::Rgb([255, 255, 255]));
    }

    #[test]
    fn flatten_alpha_preserves_opaque_pixels() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([100, 150, 200, 255]));
        let rgb = flatten_alpha(&img);
        assert_eq!(rgb.get_pixel(0, 0), &image::Rgb([100, 150, 200]));
    }

    #[test]
    fn flatten_alpha_blends_semitransparent_pixels() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 128]));
        let rgb = flatten_alpha(&img);
        let pixel = rgb.get_pixel(0, 0);
        assert!((i16::from(pixel.0[0]) - 255).abs() <= 1);
        assert!((i16::from(pixel.0[1]) - 127).abs() <= 2);
        assert!((i16::from(pixel.0[2]) - 127).abs() <= 2);
    }
}
