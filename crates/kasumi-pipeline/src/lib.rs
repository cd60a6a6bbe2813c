//! kasumi-pipeline: Pure face-anonymization core (sans-IO).
//!
//! Turns a decoded raster and a set of detected face regions into an
//! irreversibly blurred raster and an encoded JPEG:
//! decode -> detect (external capability) -> expand -> box blur -> encode.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and rasters. The concrete detector lives in
//! `kasumi-detect` behind the [`FaceDetector`] trait, and the async
//! orchestration (state machine, last-image-wins publication) lives in
//! `kasumi-session`.
//!
//! The blur is a deliberate one-way street: pixels inside each expanded
//! region are replaced by neighborhood averages, so no downstream
//! consumer can recover the original face. False negatives are possible
//! by design; the face count is a lower bound, not a guarantee.

pub mod blur;
pub mod decode;
pub mod detector;
pub mod encode;
pub mod expand;
pub mod overlay;
pub mod redact;
pub mod types;

pub use decode::decode_rgba;
pub use detector::{DetectionError, FaceDetector, ModelLoadError};
pub use encode::encode_jpeg;
pub use expand::expand_region;
pub use redact::redact;
pub use types::{
    Dimensions, ExpandedRegion, FaceRegion, PipelineConfig, PipelineError, RedactionResult,
    RgbaImage,
};
