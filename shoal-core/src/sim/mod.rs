//! Replay/matching simulator and its market-data feed.

pub mod feed;
pub mod replay;

pub use feed::{load_ticks, read_ticks, FeedError, MarketRow, MarketTick};
pub use replay::{ProductTotals, Replay, RunSummary};
