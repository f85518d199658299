//! `driftgate`: deterministic behavioral-drift scoring and threshold-calibration primitives.
//!
//! Designed for "did user behavior shift?" problems: you have two time-ordered
//! samples of the same numeric user-experience metrics (a *previous* and a
//! *current* window, e.g. before and after a rollout) and you want a single
//! drift score per transition, plus a principled way to pick the alerting
//! threshold from labeled history.
//!
//! **Goals:**
//! - **Deterministic by default**: same windows + config → same score, same
//!   calibration table, bit-for-bit.
//! - **Pure core**: every operation is a pure function of its inputs — no
//!   hidden instance state, no I/O, no clocks.  Caller-owned inputs are never
//!   mutated.
//! - **Auditable**: `*_explain` variants return the per-metric and per-term
//!   breakdowns behind each scalar, so scores can be logged and replayed.
//! - **Degenerate-input friendly**: missing/unparseable metric fields and
//!   empty windows are documented zero-valued cases, not errors.  Structural
//!   problems (malformed metric sets, bad sweep ranges) always error.
//!
//! **Pipeline:**
//! 1. [`estimate_significance`]: reduce two metric windows to one standardized
//!    mean-difference magnitude (effect size, not a p-value).
//! 2. A [`ConfidenceProvider`] supplies a qualitative confidence in `[0, 1]`
//!    for the current window — an injected capability, consumed as an opaque
//!    scalar.
//! 3. [`fuse_drift_score`]: combine significance, confidence, and an
//!    exponential temporal-decay term into the drift score.
//! 4. [`calibrate_thresholds`]: sweep a threshold grid over labeled
//!    [`DriftRecord`]s, compute the confusion matrix and derived rates per
//!    threshold, and pick the best operating point by F1.
//!
//! [`evaluate_transition`] wires steps 1–3 into a single call;
//! [`report`] dumps calibration output for offline tooling.
//!
//! **Sharp edge — the epsilon floor.**  The per-metric significance divides by
//! `sqrt((var_prev + var_curr)/2) + 1e-6`.  When both windows are
//! near-constant but the means differ, the score blows up by design: a
//! constant-valued metric that suddenly shifts is maximally suspicious.  See
//! [`POOLED_SIGMA_EPSILON`].
//!
//! **Non-goals:**
//! - Not an ingestion layer: rows arrive as [`MetricRecord`]s; parsing tabular
//!   text into records is the caller's concern.
//! - Not a confidence model: the qualitative signal is consumed as a scalar;
//!   the provider's reasoning, transport, and retries live behind the trait.
//! - No streaming, no multi-tenancy, no training.

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

mod error;
pub use error::*;

mod stats;
pub use stats::*;

mod significance;
pub use significance::*;

mod fusion;
pub use fusion::*;

mod calibrate;
pub use calibrate::*;

mod confidence;
pub use confidence::*;

mod transition;
pub use transition::*;

pub mod report;

#[cfg(feature = "stochastic")]
mod synthetic;
#[cfg(feature = "stochastic")]
pub use synthetic::*;

pub const DRIFTGATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A raw metric field value as delivered by the ingestion collaborator.
///
/// Tabular sources hand over numbers or numeric-like strings; both are
/// accepted and resolved at extraction time via [`MetricValue::as_number`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum MetricValue {
    /// An already-numeric value.
    Number(f64),
    /// A raw text field, expected (but not required) to parse as a number.
    Text(String),
}

impl MetricValue {
    /// Resolve to a number, or `None` when the text does not parse.
    ///
    /// Extraction helpers map `None` to `0.0` — the documented degenerate
    /// policy for missing/unparseable fields.  A non-finite `Number` is
    /// returned as-is and propagates through downstream arithmetic.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(v) => Some(*v),
            MetricValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

/// One observation row: metric name → raw value.
///
/// Windows are ordered sequences of records (`&[MetricRecord]`), immutable to
/// the engine once handed over.
pub type MetricRecord = BTreeMap<String, MetricValue>;

/// Per-metric means of a window, the payload handed to a
/// [`ConfidenceProvider`].
pub type MetricSnapshot = BTreeMap<String, f64>;

/// Extract a named metric from a record; missing/unparseable → `0.0`.
pub fn metric_or_zero(record: &MetricRecord, name: &str) -> f64 {
    record
        .get(name)
        .and_then(MetricValue::as_number)
        .unwrap_or(0.0)
}

/// Structural validation for a metric set: names must be non-empty and unique.
///
/// A malformed set fails the whole operation rather than silently dropping
/// the offending metric — a partially evaluated metric set would skew the
/// aggregate without any visible signal.
pub(crate) fn validate_metric_set(metrics: &[String]) -> Result<(), Error> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for name in metrics {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("metric names must be non-empty"));
        }
        if !seen.insert(name.as_str()) {
            return Err(Error::InvalidInput("metric names must be unique"));
        }
    }
    Ok(())
}
