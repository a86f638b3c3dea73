//! Domain types: instruments, order-book snapshots, orders, ledger, trades.

pub mod depth;
pub mod instrument;
pub mod ledger;
pub mod order;
pub mod trade;

pub use depth::{Depth, Level, Side};
pub use instrument::{Instrument, PositionLimits};
pub use ledger::Ledger;
pub use order::Order;
pub use trade::TradeRecord;
