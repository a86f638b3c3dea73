//! Executed-fill records, appended by the simulator.

use serde::{Deserialize, Serialize};

/// One executed fill.
///
/// `realized_pnl` is the per-trade edge against the tick's mid-price
/// reference: `(market_price - price) * quantity` (the sign of `quantity`
/// mirrors it for sells). The log is append-only and owned exclusively by
/// the simulator; its serialized form is the input to the run fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub day: i64,
    pub timestamp: i64,
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
    pub cash_delta: f64,
    pub position_after: i64,
    pub market_price: f64,
    pub realized_pnl: f64,
}
