//! Offline threshold tuning on a seeded synthetic scenario.
//!
//! Generates labeled stable/drifted transitions, scores them through the
//! full pipeline, sweeps a threshold grid, and prints the calibration table
//! plus the recommended operating point as CSV-ready output.
//!
//! Run: `cargo run --example calibration_sweep --features stochastic`

#[cfg(not(feature = "stochastic"))]
fn main() {
    eprintln!(
        "This example requires: cargo run --example calibration_sweep --features stochastic"
    );
}

#[cfg(feature = "stochastic")]
fn main() {
    use driftgate::report::{write_calibration_csv, CalibrationSummary};
    use driftgate::{
        calibrate_thresholds, drift_records, evaluate_batch, generate_transitions,
        FusionConfig, ScenarioConfig, StaticConfidence, ThresholdRange,
    };

    let scenario = ScenarioConfig {
        n_stable: 40,
        n_drifted: 20,
        shift_sigmas: 1.5,
        seed: 7,
        ..ScenarioConfig::default()
    };
    let transitions = generate_transitions(&scenario);
    println!(
        "scenario: {} stable + {} drifted transitions, {} metrics, seed {}",
        scenario.n_stable,
        scenario.n_drifted,
        scenario.metrics.len(),
        scenario.seed
    );

    // Offline provider: a flat 0.5 keeps the sweep focused on significance.
    let provider = StaticConfidence::new(0.5);
    let evals = evaluate_batch(
        &transitions,
        &scenario.metrics,
        &provider,
        FusionConfig::default(),
    )
    .expect("metric set is well-formed");

    let records = drift_records(&evals);
    let range = ThresholdRange::new(0.2, 1.4, 0.02).expect("range is valid");
    let result = calibrate_thresholds(&records, range).expect("records are labeled");

    let mut csv = Vec::new();
    write_calibration_csv(&mut csv, &result).expect("write to memory");
    println!("\n{}", String::from_utf8(csv).expect("csv is utf-8"));

    let summary = CalibrationSummary::from_result(&result);
    println!("recommended threshold: {:.3}", summary.best_threshold);
    println!(
        "  precision={:.3} recall={:.3} f1={:.3} fpr={:.3}",
        summary.precision, summary.recall, summary.f1, summary.fpr
    );
}
