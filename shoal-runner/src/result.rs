//! Scored outcome of one replay within a sweep.

use serde::{Deserialize, Serialize};
use shoal_core::strategy::StrategyConfig;

/// Stable identifier for a configuration: blake3 over its canonical JSON.
/// Two sweeps agree on run ids for the same config regardless of ordering.
pub fn run_id(config: &StrategyConfig) -> String {
    let bytes = serde_json::to_vec(&canonical(config)).unwrap_or_default();
    blake3::hash(&bytes).to_hex().to_string()
}

// HashMap key order is unstable, so hash a sorted rendering.
fn canonical(config: &StrategyConfig) -> serde_json::Value {
    let value = serde_json::to_value(config).unwrap_or(serde_json::Value::Null);
    sort_value(value)
}

fn sort_value(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let sorted: std::collections::BTreeMap<String, serde_json::Value> =
                map.into_iter().map(|(k, v)| (k, sort_value(v))).collect();
            serde_json::to_value(sorted).unwrap_or(serde_json::Value::Null)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(sort_value).collect())
        }
        other => other,
    }
}

/// One row of a sweep leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunScore {
    pub run_id: String,
    pub final_equity: f64,
    pub realized_pnl: f64,
    pub trades: usize,
    /// Trade-log fingerprint of the underlying replay.
    pub fingerprint: String,
    pub config: StrategyConfig,
}
