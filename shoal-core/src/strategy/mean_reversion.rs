//! EWMA mean reversion on a single instrument.
//!
//! Decisions are taken against the mean as it stood before this tick, then
//! the statistics advance with the new mid-price. That keeps the signal
//! from chasing the very observation it is reacting to.

use crate::domain::{Depth, Order, Side};
use crate::stats::EwmaVariance;
use crate::strategy::sizing::{bounded, capacity};

/// Outcome of one mean-reversion evaluation.
pub struct MeanRevOutcome {
    pub orders: Vec<Order>,
    /// The mean the orders were priced against (pre-update).
    pub decision_mean: f64,
    /// Advanced statistics to persist for the next tick.
    pub stats: EwmaVariance,
}

pub struct MeanReversion {
    pub alpha: f64,
}

impl MeanReversion {
    pub fn evaluate(
        &self,
        symbol: &str,
        depth: &Depth,
        mid: f64,
        position: i64,
        limit: i64,
        prior: Option<EwmaVariance>,
    ) -> MeanRevOutcome {
        let mut stats = match prior {
            Some(stats) => stats,
            None => {
                // First observation seeds the mean; no decision yet.
                return MeanRevOutcome {
                    orders: Vec::new(),
                    decision_mean: mid,
                    stats: EwmaVariance::seeded(mid),
                };
            }
        };
        let decision_mean = stats.mean;

        let mut orders = Vec::new();
        if let Some(ask) = depth.best_ask() {
            if ask.price < decision_mean {
                let cap = capacity(Side::Bid, position, limit);
                let qty = bounded(cap, cap, ask.size);
                if qty > 0 {
                    orders.push(Order::buy(symbol, ask.price, qty));
                }
            }
        }
        if let Some(bid) = depth.best_bid() {
            if bid.price > decision_mean {
                let cap = capacity(Side::Ask, position, limit);
                let qty = bounded(cap, cap, bid.size);
                if qty > 0 {
                    orders.push(Order::sell(symbol, bid.price, qty));
                }
            }
        }

        stats.update(self.alpha, mid);
        MeanRevOutcome { orders, decision_mean, stats }
    }
}
