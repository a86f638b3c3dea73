//! Opaque cross-tick strategy memory.
//!
//! The simulator round-trips this as a serialized string each tick and
//! never interprets its contents. Internally it is a tagged variant per
//! strategy family rather than an untyped document, so the engine gets
//! compile-time guarantees while the round-trip contract stays the same:
//! absent or malformed input yields a fresh empty memory, never an error.

use crate::stats::rolling::RollingWindow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-instrument (or per-pair) persisted sub-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductMemory {
    /// Mean-reversion scalar state.
    MeanLevel { mean: f64, variance: f64 },
    /// Dual moving-average state.
    DualMa { short_ma: f64, long_ma: f64 },
    /// Pocket-regime record.
    Pocket {
        prices: RollingWindow,
        age: u32,
        in_pocket: bool,
    },
    /// Spread statistics for a pair, keyed by the pair key.
    Spread { mean: f64, dispersion: f64 },
}

/// Rolling state for a correlation-gated momentum pair, keyed by follower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumState {
    pub leader: RollingWindow,
    pub follower: RollingWindow,
    pub correlation: Vec<f64>,
}

impl MomentumState {
    pub fn new(window: usize) -> Self {
        Self {
            leader: RollingWindow::new(window),
            follower: RollingWindow::new(window),
            correlation: Vec::new(),
        }
    }
}

/// The whole persisted blob: created empty on the first tick, updated every
/// tick, discarded at process end (the caller owns durability).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyMemory {
    #[serde(default)]
    pub products: HashMap<String, ProductMemory>,
    #[serde(default)]
    pub momentum: HashMap<String, MomentumState>,
}

impl StrategyMemory {
    /// Deserialize a persisted-state string. An empty or malformed blob is
    /// a normal first-tick condition and yields a fresh memory.
    pub fn from_blob(blob: &str) -> Self {
        if blob.is_empty() {
            return Self::default();
        }
        match serde_json::from_str(blob) {
            Ok(memory) => memory,
            Err(err) => {
                log::warn!("discarding malformed strategy memory: {err}");
                Self::default()
            }
        }
    }

    pub fn to_blob(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::warn!("failed to serialize strategy memory: {err}");
            String::from("{}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_blob_yields_default() {
        let memory = StrategyMemory::from_blob("");
        assert!(memory.products.is_empty());
        assert!(memory.momentum.is_empty());
    }

    #[test]
    fn malformed_blob_yields_default_not_error() {
        let memory = StrategyMemory::from_blob("{not json");
        assert_eq!(memory, StrategyMemory::default());
    }

    #[test]
    fn every_variant_round_trips() {
        let mut prices = RollingWindow::new(200);
        prices.push(100.0);
        prices.push(101.5);

        let mut memory = StrategyMemory::default();
        memory.products.insert(
            "RAINFOREST_RESIN".into(),
            ProductMemory::MeanLevel { mean: 10_000.0, variance: 2.5 },
        );
        memory.products.insert(
            "KELP".into(),
            ProductMemory::DualMa { short_ma: 2_030.0, long_ma: 2_028.5 },
        );
        memory.products.insert(
            "SQUID_INK".into(),
            ProductMemory::Pocket { prices, age: 17, in_pocket: true },
        );
        memory.products.insert(
            "SQUID_INK|KELP".into(),
            ProductMemory::Spread { mean: 12.0, dispersion: 3.0 },
        );
        memory.momentum.insert("KELP".into(), MomentumState::new(20));

        let round_tripped = StrategyMemory::from_blob(&memory.to_blob());
        assert_eq!(round_tripped, memory);
    }

    #[test]
    fn blob_with_unknown_top_level_shape_is_discarded() {
        // A plain array is valid JSON but not a memory object.
        let memory = StrategyMemory::from_blob("[1, 2, 3]");
        assert_eq!(memory, StrategyMemory::default());
    }
}
