//! Inventory-aware quoting around a fair value.
//!
//! Inventory skews both the quoted spread and the per-side size: a long
//! book widens the spread, shrinks further buying, and grows the offer.
//! Quotes only improve the touch; joining or crossing the existing best
//! is left to the taking rules.

use crate::domain::{Depth, Order, Side};
use crate::strategy::sizing::capacity;

pub struct MarketMaker {
    pub base_spread: f64,
    pub base_size: i64,
}

impl MarketMaker {
    pub fn quotes(
        &self,
        symbol: &str,
        depth: &Depth,
        fair: f64,
        position: i64,
        limit: i64,
    ) -> Vec<Order> {
        if limit <= 0 {
            return Vec::new();
        }
        // Quoting needs a two-sided book to price against.
        let (Some(best_bid), Some(best_ask)) = (depth.best_bid(), depth.best_ask()) else {
            return Vec::new();
        };
        let pressure = position as f64 / limit as f64;
        let half_spread = self.base_spread * (1.0 + 0.5 * pressure.abs()) / 2.0;
        let our_bid = fair - half_spread;
        let our_ask = fair + half_spread;

        let buy_size = (self.base_size as f64 * (1.0 - 0.5 * pressure)) as i64;
        let sell_size = (self.base_size as f64 * (1.0 + 0.5 * pressure)) as i64;

        let mut orders = Vec::new();
        if our_bid > best_bid.price {
            let qty = buy_size.min(capacity(Side::Bid, position, limit));
            if qty > 0 {
                orders.push(Order::buy(symbol, our_bid, qty));
            }
        }
        if our_ask < best_ask.price {
            let qty = sell_size.min(capacity(Side::Ask, position, limit));
            if qty > 0 {
                orders.push(Order::sell(symbol, our_ask, qty));
            }
        }
        orders
    }
}
