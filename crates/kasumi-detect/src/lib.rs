//! kasumi-detect: SeetaFace face detection for the kasumi pipeline.
//!
//! Implements the pipeline's [`FaceDetector`] capability with the
//! `rustface` crate (SeetaFace frontal-face engine). The model file is
//! loaded lazily, asynchronously, and at most once per detector; a
//! failed load is recorded and the pipeline degrades to zero-detection
//! mode rather than blocking the user's workflow.
//!
//! [`FaceDetector`]: kasumi_pipeline::FaceDetector

pub mod params;
pub mod seeta;

pub use params::DetectorParams;
pub use seeta::SeetaDetector;
