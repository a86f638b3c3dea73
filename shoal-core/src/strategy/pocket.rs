//! Pocket-regime mean reversion.
//!
//! Trades only while the price sits in a stable "pocket": volatile enough
//! to revert, yet still hugging its rolling mean. Inside a pocket, size
//! decays with the pocket's age via the survival scale; once the pocket
//! breaks, the rule flattens at the touch and waits for the next one.

use crate::domain::{Depth, Order, Side};
use crate::stats::{PocketParams, RollingWindow};
use crate::strategy::sizing::{bounded, capacity};
use serde::{Deserialize, Serialize};

/// Retained price history, bounded so memory blobs stay small.
pub const HISTORY_CAP: usize = 200;

/// Persistent state for one pocket-reversion instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PocketState {
    pub prices: RollingWindow,
    pub age: u32,
    pub in_pocket: bool,
}

pub struct PocketReversion {
    pub params: PocketParams,
    pub base_size: i64,
}

impl PocketReversion {
    pub fn evaluate(
        &self,
        symbol: &str,
        depth: &Depth,
        mid: f64,
        position: i64,
        limit: i64,
        mut state: PocketState,
    ) -> (Vec<Order>, PocketState) {
        if state.prices.capacity() == 0 {
            state.prices = RollingWindow::new(HISTORY_CAP);
        }
        state.prices.push(mid);

        let mut orders = Vec::new();
        if self.params.is_stable(&state.prices) {
            state.in_pocket = true;
            state.age += 1;

            let scale = self.params.size_scale(state.age);
            let size = (scale * self.base_size as f64).floor() as i64;
            // Window is full here or is_stable would have been false.
            let mean = state.prices.tail_mean(self.params.window).unwrap_or(mid);
            let std = state.prices.tail_std(self.params.window).unwrap_or(0.0);

            if size > 0 {
                if mid < mean - std {
                    if let Some(ask) = depth.best_ask() {
                        let cap = capacity(Side::Bid, position, limit);
                        let qty = bounded(size, cap, ask.size);
                        if qty > 0 {
                            orders.push(Order::buy(symbol, ask.price, qty));
                        }
                    }
                } else if mid > mean + std {
                    if let Some(bid) = depth.best_bid() {
                        let cap = capacity(Side::Ask, position, limit);
                        let qty = bounded(size, cap, bid.size);
                        if qty > 0 {
                            orders.push(Order::sell(symbol, bid.price, qty));
                        }
                    }
                }
            }
        } else {
            state.in_pocket = false;
            state.age = 0;

            // Outside a pocket the only action is unwinding leftovers.
            // The offset is sent in full; fills are not limited by the
            // shown size at the touch.
            if position > 0 {
                if let Some(bid) = depth.best_bid() {
                    orders.push(Order::sell(symbol, bid.price, position));
                }
            } else if position < 0 {
                if let Some(ask) = depth.best_ask() {
                    orders.push(Order::buy(symbol, ask.price, -position));
                }
            }
        }

        (orders, state)
    }
}
