//! Bounded rolling window over a price series.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fixed-capacity observation window; pushing past capacity evicts the
/// oldest value. Serializable so it can live inside persisted strategy
/// memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingWindow {
    cap: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    pub fn new(cap: usize) -> Self {
        Self { cap, values: VecDeque::with_capacity(cap.min(256)) }
    }

    pub fn push(&mut self, x: f64) {
        if self.cap > 0 && self.values.len() == self.cap {
            self.values.pop_front();
        }
        self.values.push_back(x);
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent observation.
    pub fn last(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Observation before the most recent one.
    pub fn prev(&self) -> Option<f64> {
        let n = self.values.len();
        if n < 2 {
            return None;
        }
        self.values.get(n - 2).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Mean of the trailing `n` observations; `None` until `n` are present.
    pub fn tail_mean(&self, n: usize) -> Option<f64> {
        if n == 0 || self.values.len() < n {
            return None;
        }
        let skip = self.values.len() - n;
        Some(self.values.iter().skip(skip).sum::<f64>() / n as f64)
    }

    /// Population standard deviation of the trailing `n` observations.
    pub fn tail_std(&self, n: usize) -> Option<f64> {
        let mean = self.tail_mean(n)?;
        let skip = self.values.len() - n;
        let sum_sq: f64 = self
            .values
            .iter()
            .skip(skip)
            .map(|x| (x - mean) * (x - mean))
            .sum();
        Some((sum_sq / n as f64).sqrt())
    }
}

/// Pearson correlation over the paired tails of two windows.
///
/// Uses the last `min(len_a, len_b)` observations of each; `None` with
/// fewer than two pairs or a degenerate (zero-variance) series.
pub fn correlation(a: &RollingWindow, b: &RollingWindow) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 2 {
        return None;
    }
    let xs: Vec<f64> = a.iter().skip(a.len() - n).collect();
    let ys: Vec<f64> = b.iter().skip(b.len() - n).collect();

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}
