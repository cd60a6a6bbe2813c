//! Box blur — unweighted neighborhood averaging over a region snapshot.
//!
//! [`box_blur`] replaces every pixel with the mean of all pixels inside
//! a square neighborhood of the given radius, clipped to the snapshot's
//! own bounds. Neighbors outside the snapshot are excluded (not
//! clamped-to-edge), so edge pixels average over fewer samples and the
//! filter never reads outside the snapshot. Averaging values already in
//! `[0, 255]` cannot leave that range, so no clamping is needed.
//!
//! Implemented with per-channel summed-area tables: integer prefix sums
//! make each output pixel an O(1) rectangle query, with results
//! identical to evaluating the naive O(radius²) neighborhood loop.

use image::Rgba;

use crate::types::RgbaImage;

/// Blur a snapshot with an unweighted box filter of the given radius.
///
/// Returns a new raster of the same dimensions; the input is untouched.
/// A radius of zero returns the snapshot unchanged, as does an empty
/// snapshot. Averages are computed per channel (alpha included) in
/// integer arithmetic with half-up rounding.
#[must_use = "returns the blurred snapshot"]
pub fn box_blur(snapshot: &RgbaImage, radius: u32) -> RgbaImage {
    if radius == 0 || snapshot.width() == 0 || snapshot.height() == 0 {
        return snapshot.clone();
    }

    let w = snapshot.width() as usize;
    let h = snapshot.height() as usize;
    let r = radius as usize;
    let tables = summed_area_tables(snapshot);

    RgbaImage::from_fn(snapshot.width(), snapshot.height(), |px, py| {
        let x = px as usize;
        let y = py as usize;

        // Neighborhood clipped to the snapshot (inclusive coordinates).
        let x0 = x.saturating_sub(r);
        let y0 = y.saturating_sub(r);
        let x1 = (x + r).min(w - 1);
        let y1 = (y + r).min(h - 1);
        let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as u64;

        let mean = |channel: usize| {
            let sum = rect_sum(&tables[channel], w, x0, y0, x1, y1);
            // Mean of u8 samples stays within u8 range.
            #[expect(clippy::cast_possible_truncation)]
            let value = ((sum + count / 2) / count) as u8;
            value
        };

        Rgba([mean(0), mean(1), mean(2), mean(3)])
    })
}

/// Per-channel summed-area tables with a zero border row and column.
///
/// `table[(y + 1) * (w + 1) + (x + 1)]` holds the sum of the channel
/// over all pixels `(i, j)` with `i <= x` and `j <= y`.
fn summed_area_tables(snapshot: &RgbaImage) -> [Vec<u64>; 4] {
    let w = snapshot.width() as usize;
    let h = snapshot.height() as usize;
    let stride = w + 1;

    let mut tables: [Vec<u64>; 4] = std::array::from_fn(|_| vec![0u64; stride * (h + 1)]);

    for (y, row) in snapshot.rows().enumerate() {
        for (x, pixel) in row.enumerate() {
            for (channel, table) in tables.iter_mut().enumerate() {
                let above = table[y * stride + (x + 1)];
                let left = table[(y + 1) * stride + x];
                let diagonal = table[y * stride + x];
                table[(y + 1) * stride + (x + 1)] =
                    u64::from(pixel.0[channel]) + above + left - diagonal;
            }
        }
    }

    tables
}

/// Channel sum over the inclusive pixel rectangle `(x0, y0)..=(x1, y1)`.
fn rect_sum(table: &[u64], w: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> u64 {
    let stride = w + 1;
    table[(y1 + 1) * stride + (x1 + 1)] + table[y0 * stride + x0]
        - table[y0 * stride + (x1 + 1)]
        - table[(y1 + 1) * stride + x0]
}
