//! Online statistics: EWMA estimators, rolling windows, normal CDF, pocket
//! regime model.

pub mod ewma;
pub mod normal;
pub mod pocket;
pub mod rolling;

pub use ewma::{ewma, EwmaVariance, SpreadStats, DISPERSION_FLOOR};
pub use normal::{erf, normal_cdf};
pub use pocket::PocketParams;
pub use rolling::{correlation, RollingWindow};
