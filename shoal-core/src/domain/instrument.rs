//! Instrument identity and the static position-limit table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A tradeable instrument: symbol plus its signed position bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub position_limit: i64,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, position_limit: i64) -> Self {
        Self { symbol: symbol.into(), position_limit }
    }
}

/// Static instrument → position-limit table, supplied at startup.
///
/// Limits are never enforced at runtime by the simulator; sizing logic must
/// self-clamp. An unknown instrument maps to limit 0, which makes every
/// capacity computation non-positive — it can never be traded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionLimits {
    inner: HashMap<String, i64>,
}

impl PositionLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, limit: i64) {
        self.inner.insert(symbol.into(), limit);
    }

    pub fn limit(&self, symbol: &str) -> i64 {
        self.inner.get(symbol).copied().unwrap_or(0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.inner.contains_key(symbol)
    }
}

impl From<HashMap<String, i64>> for PositionLimits {
    fn from(inner: HashMap<String, i64>) -> Self {
        Self { inner }
    }
}

impl FromIterator<Instrument> for PositionLimits {
    fn from_iter<I: IntoIterator<Item = Instrument>>(iter: I) -> Self {
        let mut limits = Self::new();
        for instrument in iter {
            limits.insert(instrument.symbol, instrument.position_limit);
        }
        limits
    }
}
