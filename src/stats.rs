//! Window statistics: mean, population variance, paired correlation.
//!
//! These are the scalar reductions everything upstream is built from.  Empty
//! input is a defined degenerate case (zero), never a fault.

use crate::Error;

/// Arithmetic mean of a sequence; `0.0` for an empty sequence.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divide by `n`, not `n-1`).
///
/// `0.0` for empty or single-element sequences — a lone observation carries
/// no spread information.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values
        .iter()
        .map(|v| {
            let d = v - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64
}

/// Pearson correlation between paired sequences (e.g. personalization scores
/// vs. experience ratings).
///
/// - [`Error::LengthMismatch`] when the sequences differ in length.
/// - [`Error::EmptyInput`] when both are empty.
/// - `0.0` when either side has zero variance (correlation is undefined
///   there; zero is the neutral report).
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Result<f64, Error> {
    if xs.len() != ys.len() {
        return Err(Error::LengthMismatch(xs.len(), ys.len()));
    }
    if xs.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mx = mean(xs);
    let my = mean(ys);
    let mut cov = 0.0_f64;
    let mut vx = 0.0_f64;
    let mut vy = 0.0_f64;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return Ok(0.0);
    }
    Ok(cov / (vx.sqrt() * vy.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_is_arithmetic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn variance_of_empty_and_singleton_is_zero() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[7.0]), 0.0);
    }

    #[test]
    fn variance_is_population_not_sample() {
        // [1, 3]: mean 2, squared deviations 1+1, population variance 2/2 = 1.
        // The sample (n-1) variance would be 2.
        assert_eq!(variance(&[1.0, 3.0]), 1.0);
    }

    #[test]
    fn variance_of_constant_sequence_is_zero() {
        assert_eq!(variance(&[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn correlation_rejects_mismatched_lengths() {
        let err = pearson_correlation(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err, Error::LengthMismatch(2, 1));
    }

    #[test]
    fn correlation_rejects_empty_pairs() {
        assert_eq!(pearson_correlation(&[], &[]), Err(Error::EmptyInput));
    }

    #[test]
    fn correlation_of_perfectly_linear_pairs_is_one() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let r = pearson_correlation(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12, "r={r}");
    }

    #[test]
    fn correlation_with_constant_side_is_zero() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [4.0, 4.0, 4.0];
        assert_eq!(pearson_correlation(&xs, &ys).unwrap(), 0.0);
    }
}
