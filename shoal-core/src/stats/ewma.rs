//! Exponentially weighted estimators.
//!
//! Two dispersion flavors are carried: squared-deviation EWMA (variance)
//! for single-instrument z-scores, and absolute-deviation EWMA for spread
//! series where a cheaper, more outlier-tolerant scale works better.

use serde::{Deserialize, Serialize};

/// Dispersion floor applied when standardizing a single-instrument series.
/// Keeps the z-score of a flat series at exactly 0 instead of dividing by
/// a vanishing variance.
pub const DISPERSION_FLOOR: f64 = 1.0;

/// One EWMA step: `alpha * x + (1 - alpha) * prev`.
pub fn ewma(alpha: f64, prev: f64, x: f64) -> f64 {
    alpha * x + (1.0 - alpha) * prev
}

/// EWMA mean plus EWMA of squared deviation.
///
/// The variance update uses the freshly updated mean:
/// `var' = alpha * (x - mean')^2 + (1 - alpha) * var`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EwmaVariance {
    pub mean: f64,
    pub variance: f64,
}

impl EwmaVariance {
    /// Seed from the first observation: mean at the observation, variance 0.
    pub fn seeded(x: f64) -> Self {
        Self { mean: x, variance: 0.0 }
    }

    pub fn update(&mut self, alpha: f64, x: f64) {
        self.mean = ewma(alpha, self.mean, x);
        let deviation = x - self.mean;
        self.variance = alpha * deviation * deviation + (1.0 - alpha) * self.variance;
    }

    pub fn dispersion(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Standardized deviation of `x` with the dispersion floor active.
    pub fn z_score(&self, x: f64) -> f64 {
        (x - self.mean) / self.dispersion().max(DISPERSION_FLOOR)
    }
}

/// EWMA mean plus EWMA of absolute deviation, for spread series.
///
/// The deviation term uses the prior mean, then the mean advances — the
/// same ordering the estimator has always had, kept so re-runs over old
/// data reproduce old traces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadStats {
    pub mean: f64,
    pub dispersion: f64,
}

impl SpreadStats {
    /// Seed from the first spread observation with unit dispersion.
    pub fn seeded(spread: f64) -> Self {
        Self { mean: spread, dispersion: 1.0 }
    }

    pub fn update(&mut self, alpha: f64, spread: f64) {
        let prior_mean = self.mean;
        self.mean = ewma(alpha, prior_mean, spread);
        self.dispersion = alpha * (spread - prior_mean).abs() + (1.0 - alpha) * self.dispersion;
    }

    pub fn z_score(&self, spread: f64) -> f64 {
        (spread - self.mean) / (self.dispersion + 1e-5)
    }
}
