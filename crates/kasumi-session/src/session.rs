//! The anonymization session: one image source, last-image-wins.
//!
//! Every submitted image becomes a run tagged with a generation number
//! from an atomic counter. A run that completes after a newer
//! submission arrived discards its result instead of publishing, so
//! observable state always reflects the most recently *requested*
//! image, never merely the most recently *completed* run.
//!
//! Model preparation happens at most once per session: the first run
//! performs it, concurrent early runs await the same attempt, and the
//! recorded outcome (ready or degraded) applies to every later run.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use kasumi_pipeline::{
    Dimensions, FaceDetector, PipelineConfig, PipelineError, decode, encode, redact,
};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::phase::RunPhase;

/// Whether the detector capability came up ready or degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// The detection model loaded; runs perform real detection.
    Ready,
    /// Model preparation failed; every run reports zero detections.
    Degraded,
}

/// The published result of a completed run.
///
/// Superseded — never mutated — by the next completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizedPhoto {
    /// JPEG-encoded output image.
    pub jpeg: Vec<u8>,

    /// Number of face regions the detector returned for this run.
    /// A lower bound on faces present, not a guarantee of zero
    /// remaining visible faces.
    pub face_count: usize,

    /// Output raster dimensions (identical to the input raster).
    pub dimensions: Dimensions,
}

impl AnonymizedPhoto {
    /// Fixed filename the download action persists the output under.
    pub const DOWNLOAD_FILENAME: &'static str = "blurred-face.jpg";
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// This run's result is now the session's published state.
    Published(AnonymizedPhoto),
    /// A newer image was requested while this run was in flight; its
    /// result was discarded.
    Superseded,
}

type ProcessingHook = Box<dyn Fn(bool) + Send + Sync>;

/// Orchestrates anonymization runs over a single image source.
///
/// The session always tries to finish a run: detection failures of any
/// kind degrade to "zero faces found" and the submitter still receives
/// an output image. Only input decoding and output encoding can fail a
/// submission.
pub struct Session<D> {
    detector: D,
    config: PipelineConfig,
    model_state: OnceCell<ModelState>,
    generation: AtomicU64,
    latest: Mutex<Option<AnonymizedPhoto>>,
    phase: Mutex<RunPhase>,
    processing_hook: Option<ProcessingHook>,
}

impl<D: FaceDetector> Session<D> {
    /// Create a session around a detector capability.
    #[must_use]
    pub fn new(detector: D, config: PipelineConfig) -> Self {
        Self {
            detector,
            config,
            model_state: OnceCell::new(),
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
            phase: Mutex::new(RunPhase::Idle),
            processing_hook: None,
        }
    }

    /// Register the presentation layer's processing-change hook.
    ///
    /// The hook is invoked exactly twice per submission: `true` when
    /// the run begins and `false` when it finishes, on every path
    /// (published, superseded, or errored).
    #[must_use]
    pub fn with_processing_hook(mut self, hook: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.processing_hook = Some(Box::new(hook));
        self
    }

    /// Run the pipeline on a newly submitted image.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] only for undecodable input or a failed
    /// output encode. Detection and model-preparation failures are
    /// recovered internally and still produce a published result.
    pub async fn submit(&self, image_bytes: &[u8]) -> Result<SubmitOutcome, PipelineError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.notify_processing(true);
        let outcome = self.run(image_bytes, generation).await;
        self.notify_processing(false);
        outcome
    }

    async fn run(
        &self,
        image_bytes: &[u8],
        generation: u64,
    ) -> Result<SubmitOutcome, PipelineError> {
        let image = decode::decode_rgba(image_bytes)?;

        if self.model_state.get().is_none() {
            self.set_phase(RunPhase::ModelLoading);
        }
        let model_state = *self
            .model_state
            .get_or_init(|| async {
                match self.detector.prepare().await {
                    Ok(()) => ModelState::Ready,
                    Err(e) => {
                        self.set_phase(RunPhase::Failed);
                        warn!(error = %e, "model preparation failed; continuing in degraded mode");
                        ModelState::Degraded
                    }
                }
            })
            .await;

        self.set_phase(RunPhase::Detecting);
        let regions = match model_state {
            ModelState::Degraded => Vec::new(),
            ModelState::Ready => match self.detector.detect(&image).await {
                Ok(regions) => regions,
                Err(e) => {
                    warn!(error = %e, "face detection failed; treating run as zero faces");
                    Vec::new()
                }
            },
        };

        self.set_phase(RunPhase::Blurring);
        let redacted = redact(&image, &regions, &self.config);
        let jpeg = encode::encode_jpeg(&redacted.image, self.config.jpeg_quality)?;
        let photo = AnonymizedPhoto {
            jpeg,
            face_count: redacted.face_count,
            dimensions: Dimensions::of(&redacted.image),
        };

        // Publish only if no newer image was requested meanwhile.
        if self.generation.load(Ordering::SeqCst) == generation {
            *lock(&self.latest) = Some(photo.clone());
            self.set_phase(RunPhase::Done);
            Ok(SubmitOutcome::Published(photo))
        } else {
            debug!(generation, "stale run completed; result discarded");
            Ok(SubmitOutcome::Superseded)
        }
    }

    /// The most recently published result, if any run has completed.
    #[must_use]
    pub fn latest(&self) -> Option<AnonymizedPhoto> {
        lock(&self.latest).clone()
    }

    /// The current run phase.
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        *lock(&self.phase)
    }

    /// Outcome of model preparation, once the first run has performed it.
    #[must_use]
    pub fn model_state(&self) -> Option<ModelState> {
        self.model_state.get().copied()
    }

    /// The detector this session runs with.
    #[must_use]
    pub const fn detector(&self) -> &D {
        &self.detector
    }

    fn set_phase(&self, phase: RunPhase) {
        debug!(phase = %phase, "pipeline phase");
        *lock(&self.phase) = phase;
    }

    fn notify_processing(&self, processing: bool) {
        if let Some(hook) = &self.processing_hook {
            hook(processing);
        }
    }
}

/// Lock a mutex, recovering the guard from a poisoned lock.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
