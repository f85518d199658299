//! Threshold calibration over labeled drift scores.
//!
//! Given a batch of `(drift_score, label)` pairs and a threshold range, this
//! sweeps the range, accumulates a confusion matrix per threshold, derives
//! precision/recall/F1/FPR/FNR, and selects the best operating point by F1
//! (ties broken toward the lowest threshold, so equal-score sweeps are
//! deterministic).
//!
//! Sweep points are generated from an integer index (`t = low + i*step`),
//! never by accumulating a floating-point loop variable — repeated addition
//! drifts, and the grid must be bit-for-bit reproducible across runs.
//!
//! Each threshold uses its own local accumulators; nothing is shared across
//! sweep points, so a caller may evaluate thresholds concurrently and merge,
//! provided rows are re-sorted by threshold before use.

use crate::Error;

/// One scored transition with optional ground truth.
///
/// Flat and immutable: created once per evaluated transition, then only read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriftRecord {
    /// Caller-assigned identifier for the window transition.
    pub transition_id: String,
    /// Fused drift score for the transition.
    pub drift_score: f64,
    /// Ground-truth drift label, when known.
    ///
    /// Unlabeled records cannot enter a confusion matrix and are skipped by
    /// [`calibrate_thresholds`].
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<bool>,
}

/// Inclusive threshold sweep range with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdRange {
    /// Lowest threshold (inclusive).
    pub low: f64,
    /// Highest threshold (inclusive, within float tolerance of the grid).
    pub high: f64,
    /// Step between consecutive thresholds; must be positive.
    pub step: f64,
}

// Absolute slack when counting grid points, so an endpoint that lands a few
// ulps past `high` (e.g. (0.30-0.02)/0.01 = 28.000000000000004) still counts.
const GRID_TOL: f64 = 1e-9;

impl ThresholdRange {
    /// Construct a validated range.
    pub fn new(low: f64, high: f64, step: f64) -> Result<Self, Error> {
        let r = Self { low, high, step };
        r.validate()?;
        Ok(r)
    }

    /// Check bounds: finite, `low <= high`, `step > 0`.
    pub fn validate(&self) -> Result<(), Error> {
        let bad = !self.low.is_finite()
            || !self.high.is_finite()
            || !self.step.is_finite()
            || self.low > self.high
            || self.step <= 0.0;
        if bad {
            return Err(Error::InvalidRange {
                low: self.low,
                high: self.high,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Number of sweep points in the grid (at least 1 for a valid range).
    pub fn n_points(&self) -> usize {
        ((self.high - self.low) / self.step + GRID_TOL).floor() as usize + 1
    }

    /// The `i`-th sweep point, `low + i*step`.
    pub fn point(&self, i: usize) -> f64 {
        self.low + (i as f64) * self.step
    }

    /// All sweep points in ascending order.
    pub fn points(&self) -> Vec<f64> {
        (0..self.n_points()).map(|i| self.point(i)).collect()
    }
}

/// Confusion matrix and derived rates at one threshold.
///
/// Derived rates with a zero denominator are reported as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdRow {
    /// The threshold this row was evaluated at.
    pub threshold: f64,
    /// Labeled-drift records with `drift_score >= threshold`.
    pub true_positives: u64,
    /// Labeled-stable records with `drift_score >= threshold`.
    pub false_positives: u64,
    /// Labeled-stable records below the threshold.
    pub true_negatives: u64,
    /// Labeled-drift records below the threshold.
    pub false_negatives: u64,
    /// `TP / (TP + FP)`.
    pub precision: f64,
    /// `TP / (TP + FN)`.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// `FP / (FP + TN)`.
    pub fpr: f64,
    /// `FN / (FN + TP)`.
    pub fnr: f64,
}

/// Full calibration table plus the selected operating point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationResult {
    /// One row per swept threshold, ascending by threshold.
    pub rows: Vec<ThresholdRow>,
    /// The row maximizing F1; ties resolve to the lowest threshold.
    pub best: ThresholdRow,
}

fn safe_ratio(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Confusion row for one threshold over pre-extracted `(score, label)` pairs.
fn row_at(labeled: &[(f64, bool)], threshold: f64) -> ThresholdRow {
    let mut tp = 0u64;
    let mut fp = 0u64;
    let mut tn = 0u64;
    let mut fneg = 0u64;
    for &(score, label) in labeled {
        let predicted = score >= threshold;
        match (predicted, label) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, false) => tn += 1,
            (false, true) => fneg += 1,
        }
    }

    let precision = safe_ratio(tp, tp + fp);
    let recall = safe_ratio(tp, tp + fneg);
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    ThresholdRow {
        threshold,
        true_positives: tp,
        false_positives: fp,
        true_negatives: tn,
        false_negatives: fneg,
        precision,
        recall,
        f1,
        fpr: safe_ratio(fp, fp + tn),
        fnr: safe_ratio(fneg, fneg + tp),
    }
}

/// Sweep a threshold grid over labeled drift records and pick the best row.
///
/// Classification rule: predicted-positive iff `drift_score >= t`.
///
/// - Records without a label are excluded (they cannot be scored against
///   ground truth); [`Error::EmptyInput`] if no labeled record remains.
/// - [`Error::InvalidRange`] for malformed sweep bounds.
/// - Returned rows are ordered by ascending threshold; `best` maximizes F1
///   with ties going to the lowest threshold.
///
/// Purely computes and returns; caller inputs are never mutated.
pub fn calibrate_thresholds(
    records: &[DriftRecord],
    range: ThresholdRange,
) -> Result<CalibrationResult, Error> {
    range.validate()?;

    let labeled: Vec<(f64, bool)> = records
        .iter()
        .filter_map(|r| r.label.map(|l| (r.drift_score, l)))
        .collect();
    if labeled.is_empty() {
        return Err(Error::EmptyInput);
    }

    let n = range.n_points();
    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        rows.push(row_at(&labeled, range.point(i)));
    }

    // Rows are generated in ascending threshold order, so a strict `>` scan
    // keeps the first (lowest-threshold) row among F1 ties.
    let mut best = rows[0];
    for row in &rows[1..] {
        if row.f1 > best.f1 {
            best = *row;
        }
    }

    Ok(CalibrationResult { rows, best })
}
