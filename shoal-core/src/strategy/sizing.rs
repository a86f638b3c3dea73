//! Position-limit arithmetic shared by every component.
//!
//! All sizing flows through [`bounded`], so the limit invariant has exactly
//! one place to be right: no emitted order can push a position past its
//! configured bound, and no order exceeds the visible counterparty volume.

use crate::domain::Side;

/// Remaining room on one side of the book given the current signed position.
///
/// Buys are capped by `limit - position`, sells by `limit + position`. Both
/// are clamped at zero so an already-breached position yields no capacity
/// rather than a negative one.
pub fn capacity(side: Side, position: i64, limit: i64) -> i64 {
    let room = match side {
        Side::Bid => limit - position,
        Side::Ask => limit + position,
    };
    room.max(0)
}

/// Final order size: the smallest of what the component wants, what the
/// limit allows, and what the counterparty shows.
pub fn bounded(requested: i64, capacity: i64, counterparty: i64) -> i64 {
    requested.min(capacity).min(counterparty).max(0)
}
