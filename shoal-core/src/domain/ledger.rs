//! Ledger — cash plus per-instrument signed positions.

use super::order::Order;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate cash + position state, owned and mutated only by the simulator.
///
/// Positions are signed integers; the configured limits bound them via the
/// sizing logic, not here. The accounting identity per fill is
/// `position += quantity; cash -= price * quantity`, applied atomically per
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub cash: f64,
    positions: HashMap<String, i64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self, symbol: &str) -> i64 {
        self.positions.get(symbol).copied().unwrap_or(0)
    }

    pub fn positions(&self) -> &HashMap<String, i64> {
        &self.positions
    }

    /// Apply one fill; returns the resulting position.
    pub fn apply_fill(&mut self, order: &Order) -> i64 {
        let position = self.positions.entry(order.symbol.clone()).or_insert(0);
        *position += order.quantity;
        self.cash -= order.price * order.quantity as f64;
        *position
    }

    /// Cash plus open positions marked at the given prices. Positions with
    /// no known price contribute nothing.
    pub fn mark_to_market(&self, prices: &HashMap<String, f64>) -> f64 {
        let position_value: f64 = self
            .positions
            .iter()
            .filter(|(_, &position)| position != 0)
            .filter_map(|(symbol, &position)| {
                prices.get(symbol).map(|price| position as f64 * price)
            })
            .sum();
        self.cash + position_value
    }
}
