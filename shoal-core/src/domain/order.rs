//! Orders: ephemeral, produced each tick, never persisted.

use serde::{Deserialize, Serialize};

/// An order emitted by a strategy for one tick.
///
/// Quantity is signed: positive buys, negative sells. The simulator treats
/// every order as immediately and fully fillable at its stated price — the
/// strategy is responsible for capping size at capacity and counterparty
/// volume before emitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: String,
    pub price: f64,
    pub quantity: i64,
}

impl Order {
    /// Buy order for `quantity` units (passed as a positive magnitude).
    pub fn buy(symbol: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self { symbol: symbol.into(), price, quantity }
    }

    /// Sell order for `quantity` units (passed as a positive magnitude).
    pub fn sell(symbol: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self { symbol: symbol.into(), price, quantity: -quantity }
    }

    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }
}
