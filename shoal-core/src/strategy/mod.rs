//! Strategy components and the tick-driven engine.
//!
//! Each component is a small parameterized unit: the same mechanics serve
//! every instrument, and a "strategy variant" is a configuration, not a
//! code fork. Components never mutate the ledger — they read a position
//! view and emit bounded orders; only the simulator applies fills.

pub mod basket;
pub mod config;
pub mod crossover;
pub mod engine;
pub mod market_maker;
pub mod mean_reversion;
pub mod momentum;
pub mod pairs;
pub mod pocket;
pub mod sizing;

pub use config::{
    Basket, BasketLeg, ConfigError, CorrelationMomentum, ProductRule, QuoteParams, SpreadPair,
    StrategyConfig,
};
pub use engine::{Strategy, StrategyEngine, StrategyError, TickResponse, TickState};
