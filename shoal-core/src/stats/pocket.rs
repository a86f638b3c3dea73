//! Stable-pocket regime model.
//!
//! A "pocket" is a stretch of range-bound but still-active price behavior:
//! the trailing window shows real movement (rolling std above an activity
//! threshold) while the latest price stays within one rolling std of the
//! rolling mean. Pocket lifetimes are modeled as Normal(mean_duration,
//! std_duration); as a pocket ages toward its expected end, order sizing
//! scales down with the probability of transition over a forward horizon.

use super::normal::normal_cdf;
use super::rolling::RollingWindow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PocketParams {
    /// Trailing window length for the stability classification.
    pub window: usize,
    /// Minimum rolling std for the window to count as "active".
    pub std_threshold: f64,
    /// Mean pocket lifetime in ticks, from offline analysis.
    pub mean_duration: f64,
    /// Std of pocket lifetime in ticks.
    pub std_duration: f64,
    /// Forward horizon (ticks) over which transition risk is measured.
    pub horizon: u32,
}

impl Default for PocketParams {
    fn default() -> Self {
        Self {
            window: 30,
            std_threshold: 1.0,
            mean_duration: 100.0,
            std_duration: 30.0,
            horizon: 10,
        }
    }
}

impl PocketParams {
    /// Whether the latest observation sits in a stable pocket.
    ///
    /// False until the window has filled.
    pub fn is_stable(&self, prices: &RollingWindow) -> bool {
        let (Some(mean), Some(std), Some(last)) = (
            prices.tail_mean(self.window),
            prices.tail_std(self.window),
            prices.last(),
        ) else {
            return false;
        };
        std > self.std_threshold && (last - mean).abs() < std
    }

    /// Probability the pocket ends within the next `horizon` ticks, given
    /// it has lasted `age` ticks.
    pub fn transition_risk(&self, age: u32) -> f64 {
        let now = normal_cdf(age as f64, self.mean_duration, self.std_duration);
        let later = normal_cdf(
            (age + self.horizon) as f64,
            self.mean_duration,
            self.std_duration,
        );
        later - now
    }

    /// Sizing multiplier: `max(0, 1 - transition_risk(age))`.
    pub fn size_scale(&self, age: u32) -> f64 {
        (1.0 - self.transition_risk(age)).max(0.0)
    }
}
