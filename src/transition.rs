//! End-to-end evaluation of a window transition into a [`DriftRecord`].
//!
//! This is the glue for the full control flow: two record windows reduce to a
//! significance magnitude, the confidence provider judges the current
//! window's snapshot, fusion combines both with elapsed time, and the result
//! is a flat record ready for threshold calibration.  Each call constructs a
//! fresh result; no evaluation state survives between calls.

use crate::{
    analyze_or_default, estimate_significance, fuse_drift_score_explain, mean, metric_or_zero,
    ConfidenceProvider, DriftRecord, Error, FusionConfig, MetricRecord, MetricSnapshot,
};

/// One window transition to score: previous window, current window, elapsed
/// time between them, and (for calibration runs) the ground-truth label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Caller-assigned identifier.
    pub id: String,
    /// Previous window, oldest observation first.
    pub prev: Vec<MetricRecord>,
    /// Current window, oldest observation first.
    pub curr: Vec<MetricRecord>,
    /// Seconds elapsed between the two windows.
    pub elapsed_secs: f64,
    /// Ground-truth drift label, when known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<bool>,
}

/// Audit envelope for one evaluated transition.
///
/// Carries the flat [`DriftRecord`] for calibration plus every intermediate
/// the fusion consumed, so a score can be explained after the fact.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionEvaluation {
    /// The flat record handed to [`calibrate_thresholds`](crate::calibrate_thresholds).
    pub record: DriftRecord,
    /// Significance magnitude from the two windows.
    pub significance: f64,
    /// Confidence scalar the provider reported (or the `0` fallback).
    pub confidence: f64,
    /// The provider's interpretation string.
    pub interpretation: String,
    /// Temporal weight applied by fusion.
    pub temporal_weight: f64,
    /// Whether the provider failed and the confidence-0 fallback fired.
    pub confidence_fallback: bool,
}

/// Per-metric means of a window — the snapshot payload for a
/// [`ConfidenceProvider`].
///
/// Missing/unparseable fields contribute `0`, matching significance
/// extraction; an empty window yields all-zero means.
pub fn snapshot_means(window: &[MetricRecord], metrics: &[String]) -> MetricSnapshot {
    metrics
        .iter()
        .map(|name| {
            let vals: Vec<f64> = window.iter().map(|r| metric_or_zero(r, name)).collect();
            (name.clone(), mean(&vals))
        })
        .collect()
}

/// Score one transition: significance → confidence → fused drift score.
///
/// Provider failure does not abort the evaluation — the documented fallback
/// (confidence `0`, `confidence_fallback = true`) applies instead.
/// Structural errors from the significance estimate (malformed metric set)
/// do abort.
pub fn evaluate_transition(
    transition: &Transition,
    metrics: &[String],
    provider: &dyn ConfidenceProvider,
    cfg: FusionConfig,
) -> Result<TransitionEvaluation, Error> {
    let significance = estimate_significance(&transition.prev, &transition.curr, metrics)?;

    let snapshot = snapshot_means(&transition.curr, metrics);
    let (assessment, confidence_fallback) = analyze_or_default(provider, &snapshot);

    let fused = fuse_drift_score_explain(
        significance,
        assessment.confidence,
        transition.elapsed_secs,
        cfg,
    );

    Ok(TransitionEvaluation {
        record: DriftRecord {
            transition_id: transition.id.clone(),
            drift_score: fused.score,
            label: transition.label,
        },
        significance,
        confidence: assessment.confidence,
        interpretation: assessment.interpretation,
        temporal_weight: fused.temporal_weight,
        confidence_fallback,
    })
}

/// Score a batch of transitions in order.
///
/// Fails on the first structural error; no partial batch is returned.
pub fn evaluate_batch(
    transitions: &[Transition],
    metrics: &[String],
    provider: &dyn ConfidenceProvider,
    cfg: FusionConfig,
) -> Result<Vec<TransitionEvaluation>, Error> {
    transitions
        .iter()
        .map(|t| evaluate_transition(t, metrics, provider, cfg))
        .collect()
}

/// Strip a batch of evaluations down to the flat records for calibration.
pub fn drift_records(evaluations: &[TransitionEvaluation]) -> Vec<DriftRecord> {
    evaluations.iter().map(|e| e.record.clone()).collect()
}
