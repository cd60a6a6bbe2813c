//! The detector capability seam.
//!
//! The pipeline is independent of the concrete detection technology:
//! anything that can be prepared once and then asked for face bounding
//! boxes plugs in here. The bundled SeetaFace adapter lives in
//! `kasumi-detect`; tests use scripted stand-ins.

use crate::types::{FaceRegion, RgbaImage};

/// Preparation of the detector (model load) failed.
///
/// Recovered by the orchestration: the pipeline continues in degraded
/// mode, treating every subsequent detection as "zero faces found".
/// Never surfaced as a user-blocking error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("face detection model failed to load: {reason}")]
pub struct ModelLoadError {
    /// Human-readable cause, for logging.
    pub reason: String,
}

impl ModelLoadError {
    /// Create a new model load error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A single detection call failed.
///
/// Recovered per run: the run proceeds as if zero faces were found and
/// still completes. A failure does not disable future runs.
#[derive(Debug, Clone, thiserror::Error)]
#[error("face detection failed: {reason}")]
pub struct DetectionError {
    /// Human-readable cause, for logging.
    pub reason: String,
}

impl DetectionError {
    /// Create a new detection error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A pluggable face detection capability.
///
/// Implementations must uphold:
///
/// - [`prepare`](Self::prepare) is idempotent: repeated calls are safe
///   no-ops that report the outcome of the single underlying load.
/// - [`detect`](Self::detect) may return an empty vec — a valid,
///   non-error outcome meaning no faces were found.
/// - Every returned [`FaceRegion`] lies fully within the given image
///   (implementations clamp raw model output into bounds).
/// - No ordering of returned regions is guaranteed; callers must not
///   assume one.
// Futures are awaited on a single-threaded session, so no Send bound
// is imposed on implementations.
#[allow(async_fn_in_trait)]
pub trait FaceDetector {
    /// Load the detection model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError`] if the model cannot be loaded; the
    /// error is stable across repeated calls.
    async fn prepare(&self) -> Result<(), ModelLoadError>;

    /// Detect face bounding boxes in `image`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionError`] if this detection call failed (e.g.
    /// the model is unavailable or the detector rejected the input).
    async fn detect(&self, image: &RgbaImage) -> Result<Vec<FaceRegion>, DetectionError>;
}
