//! Fuse statistical significance, qualitative confidence, and temporal decay
//! into a single drift score.
//!
//! ```text
//! temporal_weight = exp(-decay_rate * elapsed_secs)
//! drift_score     = alpha*significance + beta*confidence + gamma*temporal_weight
//! ```
//!
//! The three weights are independent tunable contributions and are *not*
//! required to sum to 1: "how large is the effect", "am I confident this is
//! drift", and "how fresh is this observation" are kept separate rather than
//! folded into one normalized composite.  Consequently the result is not
//! guaranteed to lie in `[0, 1]`; callers needing a bounded score must clamp
//! or pick weights that sum to 1 with bounded inputs.
//!
//! NaN inputs propagate as NaN; validate upstream if that matters.

/// Weights and decay rate for drift-score fusion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FusionConfig {
    /// Weight on the significance magnitude.
    pub alpha: f64,
    /// Weight on the external confidence scalar.
    pub beta: f64,
    /// Weight on the temporal-decay term.
    pub gamma: f64,
    /// Exponential decay rate per second.
    ///
    /// The default, `1/86_400`, decays the temporal weight to `1/e` after
    /// one day.
    pub decay_rate: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            alpha: 0.4,
            beta: 0.5,
            gamma: 0.1,
            decay_rate: 1.0 / 86_400.0,
        }
    }
}

/// Per-term breakdown of a fused drift score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FusionBreakdown {
    /// `alpha * significance`.
    pub significance_term: f64,
    /// `beta * confidence`.
    pub confidence_term: f64,
    /// `gamma * temporal_weight`.
    pub temporal_term: f64,
    /// `exp(-decay_rate * elapsed_secs)`, in `(0, 1]` for non-negative elapsed time.
    pub temporal_weight: f64,
    /// Sum of the three terms.
    pub score: f64,
}

/// Exponential temporal decay: `exp(-decay_rate * elapsed_secs)`.
///
/// `1.0` at zero elapsed time, decaying toward `0` as elapsed time grows.
#[must_use]
pub fn temporal_weight(elapsed_secs: f64, decay_rate: f64) -> f64 {
    (-decay_rate * elapsed_secs).exp()
}

/// Combine significance, confidence, and elapsed time into a drift score.
///
/// Monotonically non-decreasing in `significance` and `confidence`, and
/// monotonically non-increasing in `elapsed_secs` (for non-negative weights
/// and decay rate).
#[must_use]
pub fn fuse_drift_score(
    significance: f64,
    confidence: f64,
    elapsed_secs: f64,
    cfg: FusionConfig,
) -> f64 {
    fuse_drift_score_explain(significance, confidence, elapsed_secs, cfg).score
}

/// [`fuse_drift_score`] with the per-term breakdown attached.
#[must_use]
pub fn fuse_drift_score_explain(
    significance: f64,
    confidence: f64,
    elapsed_secs: f64,
    cfg: FusionConfig,
) -> FusionBreakdown {
    let tw = temporal_weight(elapsed_secs, cfg.decay_rate);
    let significance_term = cfg.alpha * significance;
    let confidence_term = cfg.beta * confidence;
    let temporal_term = cfg.gamma * tw;
    FusionBreakdown {
        significance_term,
        confidence_term,
        temporal_term,
        temporal_weight: tw,
        score: significance_term + confidence_term + temporal_term,
    }
}
