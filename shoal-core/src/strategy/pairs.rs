//! Spread trading between two correlated legs.
//!
//! The spread `mid(left) - mid(right)` is tracked with an EWMA of its mean
//! and absolute deviation. A z-score beyond the entry threshold sells the
//! expensive leg and buys the cheap one, both at the touch. Legs are
//! sized independently, so one leg can fill short of the other; the
//! statistics converge either way.

use crate::domain::{Depth, Order, Side};
use crate::stats::SpreadStats;
use crate::strategy::config::SpreadPair;
use crate::strategy::sizing::{bounded, capacity};

#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    pair: &SpreadPair,
    left: &Depth,
    right: &Depth,
    mid_left: f64,
    mid_right: f64,
    position_left: i64,
    limit_left: i64,
    position_right: i64,
    limit_right: i64,
    prior: Option<SpreadStats>,
) -> (Vec<Order>, SpreadStats) {
    let spread = mid_left - mid_right;
    let mut stats = match prior {
        Some(stats) => stats,
        None => return (Vec::new(), SpreadStats::seeded(spread)),
    };
    stats.update(pair.alpha, spread);
    let z = stats.z_score(spread);

    let mut orders = Vec::new();
    if z > pair.entry_z {
        // Left rich: sell left at its bid, buy right at its ask.
        if let Some(bid) = left.best_bid() {
            let cap = capacity(Side::Ask, position_left, limit_left);
            let qty = bounded(cap, cap, bid.size);
            if qty > 0 {
                orders.push(Order::sell(&pair.left, bid.price, qty));
            }
        }
        if let Some(ask) = right.best_ask() {
            let cap = capacity(Side::Bid, position_right, limit_right);
            let qty = bounded(cap, cap, ask.size);
            if qty > 0 {
                orders.push(Order::buy(&pair.right, ask.price, qty));
            }
        }
    } else if z < -pair.entry_z {
        if let Some(ask) = left.best_ask() {
            let cap = capacity(Side::Bid, position_left, limit_left);
            let qty = bounded(cap, cap, ask.size);
            if qty > 0 {
                orders.push(Order::buy(&pair.left, ask.price, qty));
            }
        }
        if let Some(bid) = right.best_bid() {
            let cap = capacity(Side::Ask, position_right, limit_right);
            let qty = bounded(cap, cap, bid.size);
            if qty > 0 {
                orders.push(Order::sell(&pair.right, bid.price, qty));
            }
        }
    }

    (orders, stats)
}
