//! Shoal Runner — replay orchestration and parameter search.
//!
//! This crate builds on `shoal-core` to provide:
//! - Parameter grids over the strategy configuration surface
//! - Parallel sweeps over independent replays (one ledger per worker)
//! - Scored, sorted sweep results keyed by a configuration hash

pub mod grid;
pub mod result;
pub mod sweep;

pub use grid::ParamGrid;
pub use result::{run_id, RunScore};
pub use sweep::{Sweep, SweepResults};
