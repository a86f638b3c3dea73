//! Tick-by-tick replay against the matching model.
//!
//! Matching is deliberately simple: every order a strategy returns fills
//! fully at its stated price. Strategies bound their own sizes at capacity
//! and shown volume, so the fill model's job is pure accounting. A failed
//! tick is logged and skipped with all state carried over.

use crate::domain::{Ledger, TradeRecord};
use crate::sim::feed::MarketTick;
use crate::strategy::{Strategy, TickState};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Per-product aggregates over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductTotals {
    pub trades: usize,
    pub volume: i64,
    pub realized_pnl: f64,
}

/// Everything a caller needs to judge one replay.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub final_cash: f64,
    pub final_positions: BTreeMap<String, i64>,
    pub realized_pnl: f64,
    /// Cash plus open positions marked at the last tick's mids.
    pub equity: f64,
    pub trades: usize,
    pub per_product: BTreeMap<String, ProductTotals>,
    /// blake3 of the serialized trade log; byte-identical runs match.
    pub fingerprint: String,
}

/// One replay: owns the ledger, the trade log, the equity curve, and the
/// strategy's opaque memory blob.
#[derive(Debug, Default)]
pub struct Replay {
    ledger: Ledger,
    trades: Vec<TradeRecord>,
    equity_curve: Vec<f64>,
    memory_blob: String,
    last_mids: HashMap<String, f64>,
}

impl Replay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Tick-indexed mark-to-market equity.
    pub fn equity_curve(&self) -> &[f64] {
        &self.equity_curve
    }

    /// Advance one tick: hand the strategy a position snapshot, then apply
    /// its orders as immediate full fills.
    pub fn step<S: Strategy>(&mut self, strategy: &S, tick: &MarketTick) {
        let state = TickState {
            day: tick.day,
            timestamp: tick.timestamp,
            depths: tick.depths.clone(),
            positions: self.ledger.positions().clone(),
            memory_blob: self.memory_blob.clone(),
        };
        match strategy.on_tick(&state) {
            Ok(response) => {
                self.memory_blob = response.memory_blob;
                for (symbol, orders) in &response.orders {
                    // No mid reference this tick means no sane fill mark.
                    let Some(&mid) = tick.mids.get(symbol) else {
                        log::warn!(
                            "skipping {} orders at t={}: no mid reference",
                            symbol,
                            tick.timestamp
                        );
                        continue;
                    };
                    for order in orders {
                        if order.quantity == 0 {
                            continue;
                        }
                        let position_after = self.ledger.apply_fill(order);
                        self.trades.push(TradeRecord {
                            day: tick.day,
                            timestamp: tick.timestamp,
                            symbol: symbol.clone(),
                            quantity: order.quantity,
                            price: order.price,
                            cash_delta: -order.price * order.quantity as f64,
                            position_after,
                            market_price: mid,
                            realized_pnl: (mid - order.price) * order.quantity as f64,
                        });
                    }
                }
            }
            Err(err) => {
                log::warn!("strategy failed at t={}, carrying state: {err}", tick.timestamp);
            }
        }
        self.last_mids = tick.mids.clone();
        self.equity_curve.push(self.ledger.mark_to_market(&self.last_mids));
    }

    /// Run the whole feed and summarize.
    pub fn run<S: Strategy>(&mut self, strategy: &S, ticks: &[MarketTick]) -> RunSummary {
        for tick in ticks {
            self.step(strategy, tick);
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        let mut per_product: BTreeMap<String, ProductTotals> = BTreeMap::new();
        let mut realized_pnl = 0.0;
        for trade in &self.trades {
            let totals = per_product.entry(trade.symbol.clone()).or_default();
            totals.trades += 1;
            totals.volume += trade.quantity.abs();
            totals.realized_pnl += trade.realized_pnl;
            realized_pnl += trade.realized_pnl;
        }
        RunSummary {
            final_cash: self.ledger.cash,
            final_positions: self
                .ledger
                .positions()
                .iter()
                .filter(|(_, &position)| position != 0)
                .map(|(symbol, &position)| (symbol.clone(), position))
                .collect(),
            realized_pnl,
            equity: self.ledger.mark_to_market(&self.last_mids),
            trades: self.trades.len(),
            per_product,
            fingerprint: self.fingerprint(),
        }
    }

    /// blake3 hex digest of the serialized trade log. Two runs over the
    /// same feed with the same configuration produce the same digest.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for trade in &self.trades {
            match serde_json::to_vec(trade) {
                Ok(bytes) => {
                    hasher.update(&bytes);
                }
                Err(err) => {
                    log::warn!("unserializable trade record skipped in fingerprint: {err}");
                }
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}
