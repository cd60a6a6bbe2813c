//! kasumi: anonymize faces in a photo from the command line.
//!
//! Stands in for the presentation adapter of the complaint wizard:
//! reads a photo, runs an anonymization session against the SeetaFace
//! detector, writes the blurred JPEG under the fixed download filename,
//! and reports how many faces were found. A detection or model-load
//! failure never fails the command — the output is then the original
//! image, matching the pipeline's fail-open policy.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin kasumi -- --model seeta_fd_frontal_v1.0.bin photo.jpg
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use kasumi_detect::SeetaDetector;
use kasumi_pipeline::{FaceDetector, PipelineConfig, overlay};
use kasumi_session::{AnonymizedPhoto, ModelState, Session, SubmitOutcome};
use tracing_subscriber::EnvFilter;

/// Blur detected faces in a photo before it enters a report.
#[derive(Parser)]
#[command(name = "kasumi", version)]
struct Cli {
    /// Path to the input photo (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Path to the SeetaFace frontal-face model file.
    #[arg(long)]
    model: PathBuf,

    /// Output path for the anonymized JPEG.
    #[arg(long, short, default_value = AnonymizedPhoto::DOWNLOAD_FILENAME)]
    output: PathBuf,

    /// Box blur radius in pixels.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_BLUR_RADIUS)]
    blur_radius: u32,

    /// Margin around each detected face, as a fraction of its width.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MARGIN_FACTOR)]
    margin_factor: f32,

    /// Absolute margin cap in pixels.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MARGIN_CAP)]
    margin_cap: u32,

    /// JPEG quality of the output, in (0.0, 1.0].
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_JPEG_QUALITY)]
    quality: f32,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, the individual pipeline parameter flags are
    /// ignored. The JSON must be a valid `PipelineConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Also write a copy of the input with detected face boxes outlined.
    #[arg(long)]
    outline: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. "debug", "kasumi_session=debug").
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Build a [`PipelineConfig`] from CLI arguments.
fn config_from_cli(cli: &Cli) -> Result<PipelineConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(PipelineConfig {
        margin_factor: cli.margin_factor,
        margin_cap: cli.margin_cap,
        blur_radius: cli.blur_radius,
        jpeg_quality: cli.quality,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let image_bytes = match std::fs::read(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };

    let session = Session::new(SeetaDetector::new(&cli.model), config)
        .with_processing_hook(|processing| tracing::debug!(processing, "processing state"));

    let photo = match session.submit(&image_bytes).await {
        Ok(SubmitOutcome::Published(photo)) => photo,
        Ok(SubmitOutcome::Superseded) => {
            // A single submission cannot be superseded.
            eprintln!("Run was superseded before completion");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Pipeline error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if session.model_state() == Some(ModelState::Degraded) {
        eprintln!("Warning: detection model unavailable; output is the original image");
    }

    if let Err(e) = std::fs::write(&cli.output, &photo.jpeg) {
        eprintln!("Error writing {}: {e}", cli.output.display());
        return ExitCode::FAILURE;
    }
    println!(
        "{} face(s) blurred -> {} ({} bytes)",
        photo.face_count,
        cli.output.display(),
        photo.jpeg.len(),
    );

    if let Some(ref outline_path) = cli.outline {
        match write_outline(session.detector(), &image_bytes, outline_path).await {
            Ok(count) => println!("{count} box(es) outlined -> {}", outline_path.display()),
            Err(e) => {
                eprintln!("Error writing outline image: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Write a copy of the input with detected face boxes outlined.
///
/// Runs detection directly (outside the session) so the raw boxes can
/// be visualized when tuning detector parameters.
async fn write_outline(
    detector: &SeetaDetector,
    image_bytes: &[u8],
    path: &Path,
) -> Result<usize, String> {
    let mut image = kasumi_pipeline::decode_rgba(image_bytes).map_err(|e| e.to_string())?;
    let regions = detector.detect(&image).await.map_err(|e| e.to_string())?;
    overlay::draw_face_boxes(&mut image, &regions, overlay::OUTLINE_COLOR);
    image.save(path).map_err(|e| e.to_string())?;
    Ok(regions.len())
}
