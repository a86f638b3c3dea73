//! Correlation-gated momentum.
//!
//! The follower is traded in the direction suggested by the leader's last
//! move, but only while the rolling correlation between the two series is
//! strong. Size grows with the strength of the gate, capped at a fraction
//! of the limit.

use crate::domain::{Order, Side};
use crate::domain::Depth;
use crate::memory::MomentumState;
use crate::stats::correlation;
use crate::strategy::config::CorrelationMomentum;
use crate::strategy::sizing::{bounded, capacity};

/// Observations required on both legs before any correlation is trusted.
pub const MIN_OBSERVATIONS: usize = 5;

pub fn evaluate(
    cfg: &CorrelationMomentum,
    follower_depth: &Depth,
    mid_leader: f64,
    mid_follower: f64,
    position: i64,
    limit: i64,
    prior: Option<MomentumState>,
) -> (Vec<Order>, MomentumState) {
    let mut state = prior.unwrap_or_else(|| MomentumState::new(cfg.window));
    let leader_prev = state.leader.last();
    state.leader.push(mid_leader);
    state.follower.push(mid_follower);

    if state.leader.len() < MIN_OBSERVATIONS {
        return (Vec::new(), state);
    }
    let Some(sample) = correlation(&state.leader, &state.follower) else {
        return (Vec::new(), state);
    };
    // Retained history feeds regime diagnostics; the gate itself is the
    // current sample.
    state.correlation.push(sample);
    if state.correlation.len() > cfg.short_window {
        state.correlation.remove(0);
    }
    if sample.abs() <= cfg.threshold {
        return (Vec::new(), state);
    }

    let trend = match leader_prev {
        Some(prev) => mid_leader - prev,
        None => return (Vec::new(), state),
    };
    if trend == 0.0 {
        return (Vec::new(), state);
    }

    let max_trade = (limit as f64 * sample.abs().min(1.0) * cfg.scale) as i64;
    let go_long = (sample > 0.0) == (trend > 0.0);

    let mut orders = Vec::new();
    if go_long {
        if let Some(ask) = follower_depth.best_ask() {
            let cap = capacity(Side::Bid, position, limit);
            let qty = bounded(max_trade, cap, ask.size);
            if qty > 0 {
                orders.push(Order::buy(&cfg.follower, ask.price, qty));
            }
        }
    } else if let Some(bid) = follower_depth.best_bid() {
        let cap = capacity(Side::Ask, position, limit);
        let qty = bounded(max_trade, cap, bid.size);
        if qty > 0 {
            orders.push(Order::sell(&cfg.follower, bid.price, qty));
        }
    }

    (orders, state)
}
