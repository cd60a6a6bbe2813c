//! SeetaFace detector backed by the `rustface` crate.
//!
//! The model file is loaded lazily on first [`prepare`] and exactly
//! once per detector instance; concurrent callers awaiting an
//! in-flight load are deferred until that single attempt resolves, and
//! a failed load is recorded so later calls report the same outcome
//! instead of retrying.
//!
//! [`prepare`]: kasumi_pipeline::FaceDetector::prepare

use std::io::Cursor;
use std::path::{Path, PathBuf};

use kasumi_pipeline::{
    DetectionError, Dimensions, FaceDetector, FaceRegion, ModelLoadError, RgbaImage,
};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::params::DetectorParams;

/// Face detector using the SeetaFace frontal-face engine.
///
/// The detector itself is cheap; `rustface` keeps its sliding-window
/// state per detection pass, so each [`detect`] call builds a fresh
/// engine from the shared model.
///
/// [`detect`]: kasumi_pipeline::FaceDetector::detect
pub struct SeetaDetector {
    model_path: PathBuf,
    params: DetectorParams,
    model: OnceCell<Result<rustface::Model, ModelLoadError>>,
}

impl SeetaDetector {
    /// Create a detector that loads its model from `model_path` on
    /// first preparation.
    #[must_use]
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self::with_params(model_path, DetectorParams::default())
    }

    /// Create a detector with explicit tuning parameters.
    #[must_use]
    pub fn with_params(model_path: impl Into<PathBuf>, params: DetectorParams) -> Self {
        Self {
            model_path: model_path.into(),
            params,
            model: OnceCell::new(),
        }
    }

    /// The tuning parameters this detector runs with.
    #[must_use]
    pub const fn params(&self) -> DetectorParams {
        self.params
    }

    async fn load_model(path: &Path) -> Result<rustface::Model, ModelLoadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ModelLoadError::new(format!("reading {}: {e}", path.display())))?;
        let model = rustface::read_model(Cursor::new(bytes))
            .map_err(|e| ModelLoadError::new(format!("parsing {}: {e}", path.display())))?;
        info!(path = %path.display(), "face detection model loaded");
        Ok(model)
    }
}

impl FaceDetector for SeetaDetector {
    async fn prepare(&self) -> Result<(), ModelLoadError> {
        self.model
            .get_or_init(|| Self::load_model(&self.model_path))
            .await
            .as_ref()
            .map(|_| ())
            .map_err(Clone::clone)
    }

    async fn detect(&self, image: &RgbaImage) -> Result<Vec<FaceRegion>, DetectionError> {
        let model = match self.model.get() {
            Some(Ok(model)) => model,
            Some(Err(e)) => return Err(DetectionError::new(format!("model unavailable: {e}"))),
            None => return Err(DetectionError::new("detector has not been prepared")),
        };

        let bounds = Dimensions::of(image);
        if bounds.width == 0 || bounds.height == 0 {
            return Err(DetectionError::new("image has zero dimensions"));
        }

        let gray = image::imageops::grayscale(image);

        let mut detector = rustface::create_detector_with_model(model.clone());
        detector.set_min_face_size(self.params.min_face_size);
        detector.set_score_thresh(self.params.score_thresh);
        detector.set_pyramid_scale_factor(self.params.pyramid_scale_factor);
        let (step_x, step_y) = self.params.slide_window_step;
        detector.set_slide_window_step(step_x, step_y);

        let faces = detector.detect(&rustface::ImageData::new(
            gray.as_raw(),
            bounds.width,
            bounds.height,
        ));
        debug!(count = faces.len(), "raw detector output");

        // SeetaFace boxes can poke past the image edge; clamp them so
        // the FaceRegion in-bounds contract holds downstream.
        Ok(faces
            .iter()
            .filter_map(|face| {
                let bbox = face.bbox();
                clamp_bbox(bbox.x(), bbox.y(), bbox.width(), bbox.height(), bounds)
            })
            .collect())
    }
}

/// Clamp a raw detector box into image bounds.
///
/// Returns `None` when nothing of the box remains inside the image.
fn clamp_bbox(x: i32, y: i32, width: u32, height: u32, bounds: Dimensions) -> Option<FaceRegion> {
    let (x, width) = clamp_axis(x, width, bounds.width)?;
    let (y, height) = clamp_axis(y, height, bounds.height)?;
    Some(FaceRegion::new(x, y, width, height))
}

/// Clamp one axis of a box to `0..limit`, shrinking the extent by
/// whatever falls outside.
fn clamp_axis(origin: i32, extent: u32, limit: u32) -> Option<(u32, u32)> {
    let start = i64::from(origin).max(0);
    let end = (i64::from(origin) + i64::from(extent)).min(i64::from(limit));
    if end <= start {
        return None;
    }
    u32::try_from(start).ok().zip(u32::try_from(end - start).ok())
}
