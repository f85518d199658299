//! Integration tests for the threshold calibrator.
//!
//! The headline scenario is the five-transition tuning run: sweeping
//! `0.02..=0.30` by `0.01` over the labeled scores must land on `0.29`.

use driftgate::{calibrate_thresholds, DriftRecord, Error, ThresholdRange};

fn rec(id: &str, score: f64, label: bool) -> DriftRecord {
    DriftRecord {
        transition_id: id.to_string(),
        drift_score: score,
        label: Some(label),
    }
}

fn five_transitions() -> Vec<DriftRecord> {
    let scores = [0.287, 0.398, 0.660, 0.920, 1.181];
    let labels = [false, false, true, true, true];
    scores
        .iter()
        .zip(labels.iter())
        .enumerate()
        .map(|(i, (&s, &l))| rec(&format!("t{i}"), s, l))
        .collect()
}

// ---------------------------------------------------------------------------
// End-to-end tuning scenario
// ---------------------------------------------------------------------------

#[test]
fn five_transition_sweep_picks_0_29() {
    let out = calibrate_thresholds(
        &five_transitions(),
        ThresholdRange::new(0.02, 0.30, 0.01).unwrap(),
    )
    .unwrap();

    assert_eq!(out.rows.len(), 29);
    let best = out.best;
    assert!(
        (best.threshold - 0.29).abs() < 1e-9,
        "best threshold = {}",
        best.threshold
    );
    assert_eq!(best.true_positives, 3);
    assert_eq!(best.false_positives, 1);
    assert_eq!(best.true_negatives, 1);
    assert_eq!(best.false_negatives, 0);
    assert!((best.precision - 0.75).abs() < 1e-12);
    assert!((best.recall - 1.0).abs() < 1e-12);
    assert!((best.f1 - 6.0 / 7.0).abs() < 1e-9, "f1 = {}", best.f1);
    assert!((best.fpr - 0.5).abs() < 1e-12);
}

#[test]
fn five_transition_sweep_is_reproducible() {
    let range = ThresholdRange::new(0.02, 0.30, 0.01).unwrap();
    let a = calibrate_thresholds(&five_transitions(), range).unwrap();
    let b = calibrate_thresholds(&five_transitions(), range).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rows_below_every_score_have_perfect_recall() {
    let out = calibrate_thresholds(
        &five_transitions(),
        ThresholdRange::new(0.02, 0.30, 0.01).unwrap(),
    )
    .unwrap();
    // The lowest thresholds sit below every score: everything predicted
    // positive, so recall is 1 and FN is 0.
    let first = out.rows[0];
    assert_eq!(first.false_negatives, 0);
    assert_eq!(first.recall, 1.0);
    assert_eq!(
        first.true_positives + first.false_positives,
        5,
        "all records predicted positive"
    );
}

// ---------------------------------------------------------------------------
// Ordering and tie-breaks
// ---------------------------------------------------------------------------

#[test]
fn rows_are_ordered_by_ascending_threshold() {
    let out = calibrate_thresholds(
        &five_transitions(),
        ThresholdRange::new(0.02, 0.30, 0.01).unwrap(),
    )
    .unwrap();
    assert!(out.rows.windows(2).all(|w| w[0].threshold < w[1].threshold));
}

#[test]
fn equal_f1_rows_resolve_to_the_lowest_threshold() {
    // Scores 0.398 and 0.287 never separate further between 0.29 and 0.30,
    // so those two rows tie on F1; the best row must be 0.29.
    let out = calibrate_thresholds(
        &five_transitions(),
        ThresholdRange::new(0.29, 0.30, 0.01).unwrap(),
    )
    .unwrap();
    assert_eq!(out.rows.len(), 2);
    assert_eq!(out.rows[0].f1, out.rows[1].f1);
    assert!((out.best.threshold - 0.29).abs() < 1e-9);
}

#[test]
fn grid_thresholds_are_exact_index_multiples() {
    let out = calibrate_thresholds(
        &five_transitions(),
        ThresholdRange::new(0.02, 0.30, 0.01).unwrap(),
    )
    .unwrap();
    for (i, row) in out.rows.iter().enumerate() {
        let expect = 0.02 + (i as f64) * 0.01;
        assert_eq!(row.threshold.to_bits(), expect.to_bits());
    }
}

// ---------------------------------------------------------------------------
// Error surface
// ---------------------------------------------------------------------------

#[test]
fn empty_record_set_is_rejected() {
    let range = ThresholdRange::new(0.0, 1.0, 0.1).unwrap();
    assert_eq!(calibrate_thresholds(&[], range), Err(Error::EmptyInput));
}

#[test]
fn inverted_range_is_rejected() {
    assert!(matches!(
        ThresholdRange::new(0.9, 0.1, 0.1),
        Err(Error::InvalidRange { .. })
    ));
}

#[test]
fn literal_range_structs_are_validated_at_sweep_time() {
    // `ThresholdRange` has public fields; a hand-built bad range must still
    // be caught by the sweep itself.
    let bad = ThresholdRange {
        low: 1.0,
        high: 0.0,
        step: 0.1,
    };
    let err = calibrate_thresholds(&five_transitions(), bad).unwrap_err();
    assert!(matches!(err, Error::InvalidRange { .. }));
}

#[test]
fn zero_step_is_rejected() {
    assert!(matches!(
        ThresholdRange::new(0.0, 1.0, 0.0),
        Err(Error::InvalidRange { .. })
    ));
}
