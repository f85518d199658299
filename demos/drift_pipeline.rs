//! End-to-end drift scoring on a hand-built pair of windows.
//!
//! Deterministic and offline: a `StaticConfidence` provider stands in for
//! the live analysis service, so the printed numbers never change.
//!
//! Run: `cargo run --example drift_pipeline`

use driftgate::{
    estimate_significance_explain, evaluate_transition, FusionConfig, MetricRecord, MetricValue,
    StaticConfidence, Transition,
};

fn record(pairs: &[(&str, f64)]) -> MetricRecord {
    pairs
        .iter()
        .map(|&(k, v)| (k.to_string(), MetricValue::Number(v)))
        .collect()
}

fn main() {
    let metrics: Vec<String> = ["engagement_rate", "session_secs", "completion_rate"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    // A week of steady behavior, then a window where sessions shorten and
    // completions sag.
    let prev = vec![
        record(&[("engagement_rate", 0.61), ("session_secs", 312.0), ("completion_rate", 0.83)]),
        record(&[("engagement_rate", 0.64), ("session_secs", 305.0), ("completion_rate", 0.81)]),
        record(&[("engagement_rate", 0.60), ("session_secs", 318.0), ("completion_rate", 0.84)]),
        record(&[("engagement_rate", 0.63), ("session_secs", 309.0), ("completion_rate", 0.82)]),
    ];
    let curr = vec![
        record(&[("engagement_rate", 0.57), ("session_secs", 248.0), ("completion_rate", 0.71)]),
        record(&[("engagement_rate", 0.55), ("session_secs", 255.0), ("completion_rate", 0.69)]),
        record(&[("engagement_rate", 0.58), ("session_secs", 241.0), ("completion_rate", 0.73)]),
        record(&[("engagement_rate", 0.56), ("session_secs", 252.0), ("completion_rate", 0.70)]),
    ];

    let breakdown = estimate_significance_explain(&prev, &curr, &metrics).unwrap();
    println!("Per-metric standardized mean differences:\n");
    println!(
        "{:<18} {:>10} {:>10} {:>12} {:>8}",
        "metric", "mean_prev", "mean_curr", "pooled_sigma", "score"
    );
    for m in &breakdown.per_metric {
        println!(
            "{:<18} {:>10.3} {:>10.3} {:>12.4} {:>8.3}",
            m.metric, m.mean_prev, m.mean_curr, m.pooled_sigma, m.score
        );
    }
    println!("\naggregate significance: {:.4}", breakdown.aggregate);

    let transition = Transition {
        id: "release-42".to_string(),
        prev,
        curr,
        elapsed_secs: 6.0 * 3_600.0,
        label: None,
    };
    let provider = StaticConfidence::new(0.8);
    let eval = evaluate_transition(&transition, &metrics, &provider, FusionConfig::default())
        .unwrap();

    println!("\nTransition {}:", eval.record.transition_id);
    println!("  significance    = {:.4}", eval.significance);
    println!("  confidence      = {:.2} ({})", eval.confidence, eval.interpretation);
    println!("  temporal weight = {:.4}", eval.temporal_weight);
    println!("  drift score     = {:.4}", eval.record.drift_score);
}
