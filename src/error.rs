//! Structural error taxonomy for the drift engine.
//!
//! Only *structural* problems surface as errors: malformed metric sets, bad
//! sweep ranges, unequal paired sequences.  Value-level degeneracies (missing
//! or unparseable metric fields, empty windows) are normalized to zero and
//! documented on the operations that apply them — they are expected inputs,
//! not faults.

use thiserror::Error;

/// Errors surfaced by drift-scoring and calibration operations.
///
/// A structural error aborts the whole computation that triggered it; no
/// partially accumulated result is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A metric set was structurally malformed (empty or duplicate name).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// No usable (labeled) records were supplied.
    #[error("empty input")]
    EmptyInput,

    /// A threshold sweep range was malformed (`low > high`, non-positive or
    /// non-finite `step`, non-finite bounds).
    #[error("invalid range: low={low}, high={high}, step={step}")]
    InvalidRange { low: f64, high: f64, step: f64 },

    /// Paired sequences had different lengths.
    #[error("length mismatch: {0} vs {1}")]
    LengthMismatch(usize, usize),

    /// The qualitative-confidence provider failed to produce an assessment.
    ///
    /// Callers that prefer the documented fallback (confidence `0`, keep
    /// going) should route through
    /// [`analyze_or_default`](crate::analyze_or_default) instead of
    /// propagating this.
    #[error("confidence provider unavailable: {0}")]
    ConfidenceUnavailable(String),
}
