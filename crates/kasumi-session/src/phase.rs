//! Run phases of the anonymization pipeline.
//!
//! Owned by the session; the presentation layer reads the current
//! phase for progress display. Transitions follow
//! `Idle → ModelLoading → Detecting → Blurring → Done`, with `Failed`
//! recorded transiently when model preparation fails before the run
//! continues in degraded mode.

use std::fmt;

/// One phase of an anonymization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// No image has been submitted yet.
    Idle,
    /// First run of the process: the detection model is loading.
    ModelLoading,
    /// The detector is searching the submitted image for faces.
    Detecting,
    /// Expanded face regions are being blurred and the output encoded.
    Blurring,
    /// The run completed and its result was published.
    Done,
    /// Model preparation failed; the pipeline continues degraded.
    Failed,
}

impl RunPhase {
    /// All phases, in nominal transition order.
    pub const ALL: [Self; 6] = [
        Self::Idle,
        Self::ModelLoading,
        Self::Detecting,
        Self::Blurring,
        Self::Done,
        Self::Failed,
    ];

    /// Display label for the phase.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::ModelLoading => "Loading model",
            Self::Detecting => "Detecting",
            Self::Blurring => "Blurring",
            Self::Done => "Done",
            Self::Failed => "Model load failed",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant_once() {
        // If you add a variant to RunPhase, update ALL and this count.
        assert_eq!(RunPhase::ALL.len(), 6);
        let mut seen = std::collections::HashSet::new();
        for phase in RunPhase::ALL {
            assert!(seen.insert(phase), "duplicate phase in ALL: {phase}");
        }
    }

    #[test]
    fn display_matches_label() {
        for phase in RunPhase::ALL {
            assert_eq!(phase.to_string(), phase.label());
        }
    }
}
