//! kasumi-session: run orchestration for the anonymization pipeline.
//!
//! Sits between the presentation layer and the pure pipeline core.
//! Owns the run state machine, performs model preparation exactly once
//! per process, and guarantees last-image-wins publication when a new
//! image is submitted while an older run is still in flight.
//!
//! The orchestration is deliberately fail-open: model-load and
//! detection failures degrade to "zero faces found" (logged, never
//! user-blocking), so a citizen filing a report is never stopped by a
//! broken detector. Callers relying on this for compliance must treat
//! the face count as a lower bound.

pub mod phase;
pub mod session;

pub use phase::RunPhase;
pub use session::{AnonymizedPhoto, ModelState, Session, SubmitOutcome};
