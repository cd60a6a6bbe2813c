//! Detection tuning parameters.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the SeetaFace sliding-window detector.
///
/// Defaults are the production values used for citizen-report photos:
/// sensitive enough for small background faces, coarse enough to keep a
/// single-image detection interactive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorParams {
    /// Smallest face edge length considered, in pixels.
    pub min_face_size: u32,

    /// Classifier score threshold; lower finds more (and falser) faces.
    pub score_thresh: f64,

    /// Image pyramid scale step, in `(0.01, 0.99)`.
    pub pyramid_scale_factor: f32,

    /// Sliding window step in x and y, in pixels.
    pub slide_window_step: (u32, u32),
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            min_face_size: 20,
            score_thresh: 2.0,
            pyramid_scale_factor: 0.8,
            slide_window_step: (4, 4),
        }
    }
}
