//! Input image decoding.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the RGBA
//! raster the rest of the pipeline operates on. This is the only
//! user-blocking failure point: with no decodable raster there is no
//! image to anonymize.

use crate::types::{PipelineError, RgbaImage};

/// Decode raw image bytes into an RGBA raster.
///
/// Supports whatever formats the `image` crate can decode (PNG, JPEG,
/// BMP, WebP). The alpha channel is preserved; opaque formats decode
/// with alpha 255.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}
