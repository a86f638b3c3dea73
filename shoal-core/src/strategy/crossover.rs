//! Dual-EWMA crossover.
//!
//! A fast average above the slow one marks an uptrend; the rule then lifts
//! asks priced below the fast average. Downtrends mirror. Unlike the
//! reversion rule, decisions here use the averages after this tick's
//! update, so a fresh cross acts immediately.

use crate::domain::{Depth, Order, Side};
use crate::stats::ewma;
use crate::strategy::sizing::{bounded, capacity};

pub struct CrossoverOutcome {
    pub orders: Vec<Order>,
    pub short_ma: f64,
    pub long_ma: f64,
}

pub struct MaCrossover {
    pub alpha_short: f64,
    pub alpha_long: f64,
}

impl MaCrossover {
    pub fn evaluate(
        &self,
        symbol: &str,
        depth: &Depth,
        mid: f64,
        position: i64,
        limit: i64,
        prior: Option<(f64, f64)>,
    ) -> CrossoverOutcome {
        let (short_ma, long_ma) = match prior {
            Some((short_prev, long_prev)) => (
                ewma(self.alpha_short, short_prev, mid),
                ewma(self.alpha_long, long_prev, mid),
            ),
            None => {
                return CrossoverOutcome { orders: Vec::new(), short_ma: mid, long_ma: mid };
            }
        };

        let mut orders = Vec::new();
        if short_ma > long_ma {
            if let Some(ask) = depth.best_ask() {
                if ask.price < short_ma {
                    let cap = capacity(Side::Bid, position, limit);
                    let qty = bounded(cap, cap, ask.size);
                    if qty > 0 {
                        orders.push(Order::buy(symbol, ask.price, qty));
                    }
                }
            }
        } else if short_ma < long_ma {
            if let Some(bid) = depth.best_bid() {
                if bid.price > short_ma {
                    let cap = capacity(Side::Ask, position, limit);
                    let qty = bounded(cap, cap, bid.size);
                    if qty > 0 {
                        orders.push(Order::sell(symbol, bid.price, qty));
                    }
                }
            }
        }

        CrossoverOutcome { orders, short_ma, long_ma }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Level;

    fn depth(bid: (f64, i64), ask: (f64, i64)) -> Depth {
        let mut depth = Depth::default();
        depth.add_level(Level { price: bid.0, size: bid.1 }, Side::Bid);
        depth.add_level(Level { price: ask.0, size: ask.1 }, Side::Ask);
        depth
    }

    #[test]
    fn first_tick_seeds_both_averages_to_mid() {
        let rule = MaCrossover { alpha_short: 0.3, alpha_long: 0.1 };
        let outcome = rule.evaluate("JAMS", &depth((99.0, 5), (101.0, 5)), 100.0, 0, 50, None);
        assert!(outcome.orders.is_empty());
        assert_eq!(outcome.short_ma, 100.0);
        assert_eq!(outcome.long_ma, 100.0);
    }

    #[test]
    fn uptrend_buys_ask_below_fast_average() {
        let rule = MaCrossover { alpha_short: 0.5, alpha_long: 0.1 };
        // Prior averages equal at 100; mid 110 drags the fast one to 105
        // and the slow one to 101, so the 103 ask is below the fast line
        // only after the update lands.
        let outcome = rule.evaluate(
            "JAMS",
            &depth((102.0, 5), (103.0, 8)),
            110.0,
            0,
            50,
            Some((100.0, 100.0)),
        );
        assert!((outcome.short_ma - 105.0).abs() < 1e-12);
        assert!((outcome.long_ma - 101.0).abs() < 1e-12);
        assert_eq!(outcome.orders.len(), 1);
        assert_eq!(outcome.orders[0].quantity, 8);
        assert_eq!(outcome.orders[0].price, 103.0);
    }

    #[test]
    fn downtrend_sells_bid_above_fast_average() {
        let rule = MaCrossover { alpha_short: 0.5, alpha_long: 0.1 };
        let outcome = rule.evaluate(
            "JAMS",
            &depth((97.0, 6), (98.0, 5)),
            90.0,
            0,
            50,
            Some((100.0, 100.0)),
        );
        // Fast drops to 95, slow to 99; 97 bid sits above the fast line.
        assert_eq!(outcome.orders.len(), 1);
        assert_eq!(outcome.orders[0].quantity, -6);
    }

    #[test]
    fn equal_averages_are_quiet() {
        let rule = MaCrossover { alpha_short: 0.3, alpha_long: 0.1 };
        let outcome = rule.evaluate(
            "JAMS",
            &depth((99.0, 5), (101.0, 5)),
            100.0,
            0,
            50,
            Some((100.0, 100.0)),
        );
        assert!(outcome.orders.is_empty());
    }
}
