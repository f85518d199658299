//! Calibration reporting: a delimited table dump plus a structured summary.
//!
//! Thin output formatting over [`CalibrationResult`] — the core itself never
//! touches I/O; these helpers write wherever the caller points them
//! (a file, a buffer, stdout).

use std::io;

use crate::{CalibrationResult, ThresholdRow, DRIFTGATE_VERSION};

/// Column order of the CSV dump, matching [`write_calibration_csv`].
pub const CSV_HEADER: &str = "threshold,tp,fp,tn,fn,precision,recall,f1,fpr,fnr";

fn write_row<W: io::Write>(w: &mut W, r: &ThresholdRow) -> io::Result<()> {
    writeln!(
        w,
        "{:.6},{},{},{},{},{:.6},{:.6},{:.6},{:.6},{:.6}",
        r.threshold,
        r.true_positives,
        r.false_positives,
        r.true_negatives,
        r.false_negatives,
        r.precision,
        r.recall,
        r.f1,
        r.fpr,
        r.fnr
    )
}

/// Dump the full calibration table as CSV (header + one row per threshold).
pub fn write_calibration_csv<W: io::Write>(
    w: &mut W,
    result: &CalibrationResult,
) -> io::Result<()> {
    writeln!(w, "{CSV_HEADER}")?;
    for row in &result.rows {
        write_row(w, row)?;
    }
    Ok(())
}

/// Best-row summary plus run metadata, ready for structured logging.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationSummary {
    /// Recommended operating threshold.
    pub best_threshold: f64,
    /// Precision at the recommended threshold.
    pub precision: f64,
    /// Recall at the recommended threshold.
    pub recall: f64,
    /// F1 at the recommended threshold.
    pub f1: f64,
    /// False-positive rate at the recommended threshold.
    pub fpr: f64,
    /// False-negative rate at the recommended threshold.
    pub fnr: f64,
    /// Number of thresholds swept.
    pub swept_points: usize,
    /// Number of labeled records behind the confusion matrices.
    pub labeled_records: u64,
    /// Engine version that produced the table.
    pub engine_version: String,
}

impl CalibrationSummary {
    /// Summarize a calibration result.
    pub fn from_result(result: &CalibrationResult) -> Self {
        let b = result.best;
        let labeled =
            b.true_positives + b.false_positives + b.true_negatives + b.false_negatives;
        Self {
            best_threshold: b.threshold,
            precision: b.precision,
            recall: b.recall,
            f1: b.f1,
            fpr: b.fpr,
            fnr: b.fnr,
            swept_points: result.rows.len(),
            labeled_records: labeled,
            engine_version: DRIFTGATE_VERSION.to_string(),
        }
    }

    /// Pretty-printed JSON rendering of the summary.
    #[cfg(feature = "serde")]
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
