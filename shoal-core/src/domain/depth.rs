//! Order-book snapshot: per-instrument bid/ask price levels for one tick.

use serde::{Deserialize, Serialize};

/// Book side selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

/// A single price level: resting volume at a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    pub size: i64,
}

/// Snapshot of one instrument's visible book at a single tick.
///
/// Bids are kept sorted descending, asks ascending, so the best level on
/// either side is always the first element. Prices within a side are
/// unique; re-adding a price replaces the resting size. Levels with
/// non-positive size are never stored — a level present in a snapshot has
/// at least one unit available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Depth {
    bids: Vec<Level>,
    asks: Vec<Level>,
}

impl Depth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_level(&mut self, level: Level, side: Side) {
        if level.size <= 0 {
            return;
        }
        let book = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        match book.iter_mut().find(|l| l.price == level.price) {
            Some(existing) => existing.size = level.size,
            None => {
                book.push(level);
                match side {
                    Side::Bid => book.sort_by(|a, b| b.price.total_cmp(&a.price)),
                    Side::Ask => book.sort_by(|a, b| a.price.total_cmp(&b.price)),
                }
            }
        }
    }

    /// Highest buy interest, if any.
    pub fn best_bid(&self) -> Option<&Level> {
        self.bids.first()
    }

    /// Lowest sell interest, if any.
    pub fn best_ask(&self) -> Option<&Level> {
        self.asks.first()
    }

    pub fn bids(&self) -> &[Level] {
        &self.bids
    }

    pub fn asks(&self) -> &[Level] {
        &self.asks
    }

    /// Resting volume at an exact price on one side, 0 if the level is absent.
    pub fn volume_at(&self, side: Side, price: f64) -> i64 {
        let book = match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        };
        book.iter()
            .find(|l| l.price == price)
            .map(|l| l.size)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Estimated fair price for this snapshot.
    ///
    /// Both sides present: midpoint of the touch. One side only: the
    /// available touch nudged 1% toward where the absent side would sit.
    /// No liquidity at all: `None` — the instrument is skipped this tick.
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.price + ask.price) / 2.0),
            (None, Some(ask)) => Some(ask.price * 0.99),
            (Some(bid), None) => Some(bid.price * 1.01),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sided() -> Depth {
        let mut depth = Depth::new();
        depth.add_level(Level { price: 99.0, size: 10 }, Side::Bid);
        depth.add_level(Level { price: 98.0, size: 20 }, Side::Bid);
        depth.add_level(Level { price: 101.0, size: 5 }, Side::Ask);
        depth.add_level(Level { price: 102.0, size: 15 }, Side::Ask);
        depth
    }

    #[test]
    fn best_levels_are_touch() {
        let depth = two_sided();
        assert_eq!(depth.best_bid().unwrap().price, 99.0);
        assert_eq!(depth.best_ask().unwrap().price, 101.0);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut depth = Depth::new();
        depth.add_level(Level { price: 98.0, size: 20 }, Side::Bid);
        depth.add_level(Level { price: 99.0, size: 10 }, Side::Bid);
        assert_eq!(depth.best_bid().unwrap().price, 99.0);
    }

    #[test]
    fn readding_a_price_replaces_size() {
        let mut depth = two_sided();
        depth.add_level(Level { price: 99.0, size: 7 }, Side::Bid);
        assert_eq!(depth.volume_at(Side::Bid, 99.0), 7);
        assert_eq!(depth.bids().len(), 2);
    }

    #[test]
    fn non_positive_sizes_are_dropped() {
        let mut depth = Depth::new();
        depth.add_level(Level { price: 100.0, size: 0 }, Side::Bid);
        depth.add_level(Level { price: 100.0, size: -3 }, Side::Ask);
        assert!(depth.is_empty());
    }

    #[test]
    fn mid_price_is_midpoint_when_two_sided() {
        let depth = two_sided();
        assert_eq!(depth.mid_price(), Some(100.0));
        // Idempotent for the same book state.
        assert_eq!(depth.mid_price(), Some(100.0));
    }

    #[test]
    fn mid_price_within_touch_when_two_sided() {
        let depth = two_sided();
        let mid = depth.mid_price().unwrap();
        assert!(mid >= depth.best_bid().unwrap().price);
        assert!(mid <= depth.best_ask().unwrap().price);
    }

    #[test]
    fn mid_price_ask_only_is_below_best_ask() {
        let mut depth = Depth::new();
        depth.add_level(Level { price: 101.0, size: 5 }, Side::Ask);
        let mid = depth.mid_price().unwrap();
        assert!(mid < 101.0);
        assert_eq!(mid, 101.0 * 0.99);
    }

    #[test]
    fn mid_price_bid_only_is_above_best_bid() {
        let mut depth = Depth::new();
        depth.add_level(Level { price: 99.0, size: 5 }, Side::Bid);
        let mid = depth.mid_price().unwrap();
        assert!(mid > 99.0);
        assert_eq!(mid, 99.0 * 1.01);
    }

    #[test]
    fn mid_price_empty_book_is_none() {
        assert_eq!(Depth::new().mid_price(), None);
    }

    #[test]
    fn volume_at_missing_level_is_zero() {
        let depth = two_sided();
        assert_eq!(depth.volume_at(Side::Ask, 105.0), 0);
    }
}
