//! The injected qualitative-confidence capability.
//!
//! An external analysis service judges "does this snapshot look like drift?"
//! and reports a bounded confidence plus a human-readable interpretation.
//! The core consumes that judgment as an opaque scalar through a single
//! trait; live vs. offline, transport, and retry behavior all belong to the
//! implementation, never to the callers here.

use crate::{Error, MetricSnapshot};

/// A provider's judgment of one metrics snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceAssessment {
    /// Qualitative drift confidence, expected in `[0, 1]` (not enforced).
    pub confidence: f64,
    /// Human-readable interpretation of the snapshot.
    pub interpretation: String,
}

/// The single injected capability for qualitative confidence.
///
/// Implementations may call out to an analysis service, replay recorded
/// judgments, or return a constant — callers cannot tell and must not care.
pub trait ConfidenceProvider {
    /// Judge a snapshot of per-metric means for the current window.
    fn analyze(&self, snapshot: &MetricSnapshot) -> Result<ConfidenceAssessment, Error>;
}

/// Deterministic offline provider: a fixed confidence for every snapshot.
///
/// Useful for tests, replays, and environments without the analysis service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticConfidence {
    confidence: f64,
}

impl StaticConfidence {
    /// A provider that always reports `confidence`.
    ///
    /// The value is passed through as-is; out-of-range values propagate the
    /// same way they would from a misbehaving live provider.
    pub const fn new(confidence: f64) -> Self {
        Self { confidence }
    }
}

impl ConfidenceProvider for StaticConfidence {
    fn analyze(&self, _snapshot: &MetricSnapshot) -> Result<ConfidenceAssessment, Error> {
        Ok(ConfidenceAssessment {
            confidence: self.confidence,
            interpretation: format!("static confidence {:.2}", self.confidence),
        })
    }
}

/// Invoke a provider with the documented fallback: on failure, use
/// confidence `0` and continue rather than aborting the evaluation.
///
/// Returns the assessment plus whether the fallback fired.
pub fn analyze_or_default(
    provider: &dyn ConfidenceProvider,
    snapshot: &MetricSnapshot,
) -> (ConfidenceAssessment, bool) {
    match provider.analyze(snapshot) {
        Ok(a) => (a, false),
        Err(e) => (
            ConfidenceAssessment {
                confidence: 0.0,
                interpretation: format!("confidence unavailable ({e}); defaulted to 0"),
            },
            true,
        ),
    }
}
