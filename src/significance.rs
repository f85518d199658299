//! Standardized mean-difference significance between two metric windows.
//!
//! For each requested metric this computes an effect-size style score,
//!
//! ```text
//! pooled_sigma = sqrt((var_prev + var_curr) / 2) + POOLED_SIGMA_EPSILON
//! score        = |mean_curr - mean_prev| / pooled_sigma
//! ```
//!
//! and averages across metrics (rather than summing, so adding more stable
//! metrics does not inflate the aggregate).  This is an effect-size measure,
//! not a p-value.
//!
//! The epsilon floor makes the zero-variance case sharp rather than smooth:
//! when both windows are near-constant but the means differ, the score
//! explodes.  A constant-valued metric that suddenly shifts is maximally
//! suspicious, and the blow-up is the intended signal.

use crate::{mean, metric_or_zero, validate_metric_set, variance, Error, MetricRecord};

/// Floor added to the pooled sigma to prevent division by zero.
///
/// Keeps the per-metric score finite while preserving the deliberate blow-up
/// on zero-variance mean shifts (`|Δmean| / 1e-6`).
pub const POOLED_SIGMA_EPSILON: f64 = 1e-6;

/// Per-metric contribution to a significance estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricShift {
    /// Metric name, as requested.
    pub metric: String,
    /// Mean over the previous window (missing fields extracted as `0`).
    pub mean_prev: f64,
    /// Mean over the current window.
    pub mean_curr: f64,
    /// Epsilon-floored pooled standard deviation used as the scale.
    pub pooled_sigma: f64,
    /// Standardized mean difference for this metric.
    pub score: f64,
}

/// Audit envelope for a significance estimate: per-metric rows + aggregate.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignificanceBreakdown {
    /// One row per requested metric, in request order.
    pub per_metric: Vec<MetricShift>,
    /// Arithmetic mean of the per-metric scores; `0.0` for an empty set.
    pub aggregate: f64,
}

/// Reduce two metric windows to a single non-negative divergence magnitude.
///
/// Value-level degeneracies are normalized, not raised: a record missing a
/// requested metric (or carrying an unparseable field) contributes `0` for
/// that field; empty windows have zero mean and variance.  An empty
/// `metrics` set is `Ok(0.0)` by convention.
///
/// Fails with [`Error::InvalidInput`] when the metric set itself is
/// malformed (empty or duplicate name) — the whole estimate fails rather
/// than silently dropping a metric.
pub fn estimate_significance(
    prev: &[MetricRecord],
    curr: &[MetricRecord],
    metrics: &[String],
) -> Result<f64, Error> {
    Ok(estimate_significance_explain(prev, curr, metrics)?.aggregate)
}

/// [`estimate_significance`] with the per-metric breakdown attached.
pub fn estimate_significance_explain(
    prev: &[MetricRecord],
    curr: &[MetricRecord],
    metrics: &[String],
) -> Result<SignificanceBreakdown, Error> {
    validate_metric_set(metrics)?;
    if metrics.is_empty() {
        return Ok(SignificanceBreakdown::default());
    }

    let mut per_metric = Vec::with_capacity(metrics.len());
    let mut total = 0.0_f64;
    for name in metrics {
        let pv: Vec<f64> = prev.iter().map(|r| metric_or_zero(r, name)).collect();
        let cv: Vec<f64> = curr.iter().map(|r| metric_or_zero(r, name)).collect();

        let mean_prev = mean(&pv);
        let mean_curr = mean(&cv);
        let pooled_sigma =
            ((variance(&pv) + variance(&cv)) / 2.0).sqrt() + POOLED_SIGMA_EPSILON;
        let score = (mean_curr - mean_prev).abs() / pooled_sigma;

        total += score;
        per_metric.push(MetricShift {
            metric: name.clone(),
            mean_prev,
            mean_curr,
            pooled_sigma,
            score,
        });
    }

    Ok(SignificanceBreakdown {
        per_metric,
        aggregate: total / metrics.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricValue;

    fn record(pairs: &[(&str, f64)]) -> MetricRecord {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), MetricValue::Number(v)))
            .collect()
    }

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_windows_score_zero() {
        let w = vec![
            record(&[("a", 1.0), ("b", 5.0)]),
            record(&[("a", 2.0), ("b", 7.0)]),
            record(&[("a", 3.0), ("b", 6.0)]),
        ];
        let s = estimate_significance(&w, &w, &names(&["a", "b"])).unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn zero_variance_mean_shift_blows_up() {
        // Both windows constant, means differ by 2: score ≈ 2 / 1e-6.
        let prev = vec![record(&[("m", 1.0)]), record(&[("m", 1.0)])];
        let curr = vec![record(&[("m", 3.0)]), record(&[("m", 3.0)])];
        let s = estimate_significance(&prev, &curr, &names(&["m"])).unwrap();
        assert!(s > 1000.0, "expected blow-up, got {s}");
    }

    #[test]
    fn missing_fields_contribute_zero_not_error() {
        let prev = vec![record(&[("m", 1.0)]), record(&[])];
        let curr = vec![record(&[("m", 1.0)]), record(&[("m", 1.0)])];
        // prev means: (1 + 0)/2 = 0.5; no error for the empty record.
        let b = estimate_significance_explain(&prev, &curr, &names(&["m"])).unwrap();
        assert_eq!(b.per_metric[0].mean_prev, 0.5);
        assert_eq!(b.per_metric[0].mean_curr, 1.0);
    }

    #[test]
    fn empty_metric_set_is_zero_by_convention() {
        let w = vec![record(&[("m", 1.0)])];
        assert_eq!(estimate_significance(&w, &w, &[]).unwrap(), 0.0);
    }

    #[test]
    fn duplicate_metric_name_fails_whole_estimate() {
        let w = vec![record(&[("m", 1.0)])];
        let err = estimate_significance(&w, &w, &names(&["m", "m"])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn aggregate_is_mean_of_per_metric_scores() {
        let prev = vec![record(&[("a", 0.0), ("b", 0.0)]); 4];
        let curr = vec![
            record(&[("a", 1.0), ("b", 0.0)]),
            record(&[("a", 3.0), ("b", 0.0)]),
            record(&[("a", 1.0), ("b", 0.0)]),
            record(&[("a", 3.0), ("b", 0.0)]),
        ];
        let b = estimate_significance_explain(&prev, &curr, &names(&["a", "b"])).unwrap();
        assert_eq!(b.per_metric.len(), 2);
        let expect = (b.per_metric[0].score + b.per_metric[1].score) / 2.0;
        assert!((b.aggregate - expect).abs() < 1e-12);
        // "b" never moved; its score is exactly zero.
        assert_eq!(b.per_metric[1].score, 0.0);
    }

    #[test]
    fn numeric_text_fields_parse_into_the_estimate() {
        let prev = vec![
            MetricRecord::from([("m".to_string(), MetricValue::from("1.0"))]),
            MetricRecord::from([("m".to_string(), MetricValue::from("2.0"))]),
        ];
        let curr = vec![
            MetricRecord::from([("m".to_string(), MetricValue::from("5.0"))]),
            MetricRecord::from([("m".to_string(), MetricValue::from("6.0"))]),
        ];
        let s = estimate_significance(&prev, &curr, &names(&["m"])).unwrap();
        assert!(s > 0.0);
    }
}
