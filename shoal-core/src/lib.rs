//! Shoal Core — statistical strategy engine and replay matching simulator.
//!
//! This crate contains the heart of the trading lab:
//! - Domain types (order-book snapshots, orders, ledger, trade records)
//! - Online statistics (EWMA mean/variance, rolling windows, pocket regimes)
//! - Parameterized strategy components (mean reversion, crossover, market
//!   making, pair spreads, basket arbitrage, correlation momentum)
//! - A tick-driven strategy engine with opaque cross-tick memory
//! - A deterministic replay simulator that matches emitted orders against
//!   historical order-book snapshots and tracks cash/positions/PnL

pub mod domain;
pub mod memory;
pub mod sim;
pub mod stats;
pub mod strategy;
