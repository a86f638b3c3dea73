//! The tick-driven strategy engine.
//!
//! One engine drives every configured component against a single tick
//! snapshot. Ordering is fixed: per-product rules in symbol order, then
//! pairs, baskets, and momentum in configuration order. A shared working
//! position map advances as each batch is emitted, so stacked components
//! draw from the same capacity and the limit invariant holds across the
//! whole response, not just per component.

use crate::domain::{Depth, Order, PositionLimits};
use crate::memory::{ProductMemory, StrategyMemory};
use crate::stats::{EwmaVariance, SpreadStats};
use crate::strategy::config::{ConfigError, ProductRule, StrategyConfig};
use crate::strategy::pocket::PocketState;
use crate::strategy::{basket, market_maker::MarketMaker, mean_reversion::MeanReversion};
use crate::strategy::{crossover::MaCrossover, momentum, pairs, pocket::PocketReversion};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// One tick's market snapshot as handed to a strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickState {
    pub day: i64,
    pub timestamp: i64,
    pub depths: HashMap<String, Depth>,
    pub positions: HashMap<String, i64>,
    /// Opaque memory from the previous tick; empty on the first.
    pub memory_blob: String,
}

/// A strategy's full answer for one tick. Orders are keyed by symbol in a
/// sorted map so iteration over the response is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickResponse {
    pub orders: BTreeMap<String, Vec<Order>>,
    /// Reserved for venues with a conversion mechanism; always 0 here.
    pub conversions: i64,
    pub memory_blob: String,
}

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("invalid strategy configuration: {0}")]
    Config(#[from] ConfigError),
}

/// The per-tick contract between a strategy and the simulator.
pub trait Strategy {
    fn on_tick(&self, state: &TickState) -> Result<TickResponse, StrategyError>;
}

pub struct StrategyEngine {
    config: StrategyConfig,
    limits: PositionLimits,
}

impl StrategyEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: StrategyConfig) -> Result<Self, StrategyError> {
        config.validate()?;
        let limits: PositionLimits = config.limits.clone().into();
        Ok(Self { config, limits })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn limits(&self) -> &PositionLimits {
        &self.limits
    }
}

/// Record a batch: the working position advances with every emitted order
/// so later components see capacity already spoken for.
fn take(
    orders: &mut BTreeMap<String, Vec<Order>>,
    working: &mut HashMap<String, i64>,
    batch: Vec<Order>,
) {
    for order in batch {
        *working.entry(order.symbol.clone()).or_insert(0) += order.quantity;
        orders.entry(order.symbol.clone()).or_default().push(order);
    }
}

impl Strategy for StrategyEngine {
    fn on_tick(&self, state: &TickState) -> Result<TickResponse, StrategyError> {
        let mut memory = StrategyMemory::from_blob(&state.memory_blob);
        let mut orders: BTreeMap<String, Vec<Order>> = BTreeMap::new();
        let mut working = state.positions.clone();

        let mids: HashMap<String, f64> = state
            .depths
            .iter()
            .filter_map(|(symbol, depth)| depth.mid_price().map(|mid| (symbol.clone(), mid)))
            .collect();

        let mut rule_symbols: Vec<&String> = self.config.rules.keys().collect();
        rule_symbols.sort();
        for symbol in rule_symbols {
            // A product with no book at all this tick is skipped whole:
            // no orders and no statistics update.
            let Some(depth) = state.depths.get(symbol) else {
                continue;
            };
            let Some(&mid) = mids.get(symbol) else {
                continue;
            };
            let position = working.get(symbol).copied().unwrap_or(0);
            let limit = self.limits.limit(symbol);

            match &self.config.rules[symbol] {
                ProductRule::MeanReversion { alpha, market_make } => {
                    let prior = match memory.products.get(symbol) {
                        Some(ProductMemory::MeanLevel { mean, variance }) => {
                            Some(EwmaVariance { mean: *mean, variance: *variance })
                        }
                        _ => None,
                    };
                    let rule = MeanReversion { alpha: *alpha };
                    let outcome = rule.evaluate(symbol, depth, mid, position, limit, prior);
                    memory.products.insert(
                        symbol.clone(),
                        ProductMemory::MeanLevel {
                            mean: outcome.stats.mean,
                            variance: outcome.stats.variance,
                        },
                    );
                    let fair = outcome.decision_mean;
                    take(&mut orders, &mut working, outcome.orders);
                    if let Some(quote) = market_make {
                        let maker = MarketMaker {
                            base_spread: quote.base_spread,
                            base_size: quote.base_size,
                        };
                        let taken = working.get(symbol).copied().unwrap_or(0);
                        let quotes = maker.quotes(symbol, depth, fair, taken, limit);
                        take(&mut orders, &mut working, quotes);
                    }
                }
                ProductRule::MaCrossover { alpha_short, alpha_long } => {
                    let prior = match memory.products.get(symbol) {
                        Some(ProductMemory::DualMa { short_ma, long_ma }) => {
                            Some((*short_ma, *long_ma))
                        }
                        _ => None,
                    };
                    let rule =
                        MaCrossover { alpha_short: *alpha_short, alpha_long: *alpha_long };
                    let outcome = rule.evaluate(symbol, depth, mid, position, limit, prior);
                    memory.products.insert(
                        symbol.clone(),
                        ProductMemory::DualMa {
                            short_ma: outcome.short_ma,
                            long_ma: outcome.long_ma,
                        },
                    );
                    take(&mut orders, &mut working, outcome.orders);
                }
                ProductRule::PocketReversion { params, base_size } => {
                    let prior = match memory.products.remove(symbol) {
                        Some(ProductMemory::Pocket { prices, age, in_pocket }) => {
                            PocketState { prices, age, in_pocket }
                        }
                        _ => PocketState::default(),
                    };
                    let rule = PocketReversion { params: *params, base_size: *base_size };
                    let (batch, next) = rule.evaluate(symbol, depth, mid, position, limit, prior);
                    memory.products.insert(
                        symbol.clone(),
                        ProductMemory::Pocket {
                            prices: next.prices,
                            age: next.age,
                            in_pocket: next.in_pocket,
                        },
                    );
                    take(&mut orders, &mut working, batch);
                }
            }
        }

        for pair in &self.config.pairs {
            let (Some(left), Some(right)) =
                (state.depths.get(&pair.left), state.depths.get(&pair.right))
            else {
                continue;
            };
            let (Some(&mid_left), Some(&mid_right)) =
                (mids.get(&pair.left), mids.get(&pair.right))
            else {
                continue;
            };
            let key = pair.key();
            let prior = match memory.products.get(&key) {
                Some(ProductMemory::Spread { mean, dispersion }) => {
                    Some(SpreadStats { mean: *mean, dispersion: *dispersion })
                }
                _ => None,
            };
            let (batch, stats) = pairs::evaluate(
                pair,
                left,
                right,
                mid_left,
                mid_right,
                working.get(&pair.left).copied().unwrap_or(0),
                self.limits.limit(&pair.left),
                working.get(&pair.right).copied().unwrap_or(0),
                self.limits.limit(&pair.right),
                prior,
            );
            memory.products.insert(
                key,
                ProductMemory::Spread { mean: stats.mean, dispersion: stats.dispersion },
            );
            take(&mut orders, &mut working, batch);
        }

        for cfg in &self.config.baskets {
            let batch = basket::evaluate(cfg, &state.depths, &mids, &working, &self.limits);
            take(&mut orders, &mut working, batch);
        }

        for cfg in &self.config.momentum {
            let Some(follower_depth) = state.depths.get(&cfg.follower) else {
                continue;
            };
            let (Some(&mid_leader), Some(&mid_follower)) =
                (mids.get(&cfg.leader), mids.get(&cfg.follower))
            else {
                continue;
            };
            let prior = memory.momentum.remove(&cfg.follower);
            let (batch, next) = momentum::evaluate(
                cfg,
                follower_depth,
                mid_leader,
                mid_follower,
                working.get(&cfg.follower).copied().unwrap_or(0),
                self.limits.limit(&cfg.follower),
                prior,
            );
            memory.momentum.insert(cfg.follower.clone(), next);
            take(&mut orders, &mut working, batch);
        }

        Ok(TickResponse { orders, conversions: 0, memory_blob: memory.to_blob() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Level, Side};
    use crate::strategy::config::QuoteParams;

    fn depth(bid: (f64, i64), ask: (f64, i64)) -> Depth {
        let mut depth = Depth::default();
        depth.add_level(Level { price: bid.0, size: bid.1 }, Side::Bid);
        depth.add_level(Level { price: ask.0, size: ask.1 }, Side::Ask);
        depth
    }

    fn resin_config() -> StrategyConfig {
        let mut config = StrategyConfig::default();
        config.limits.insert("RAINFOREST_RESIN".into(), 50);
        config.rules.insert(
            "RAINFOREST_RESIN".into(),
            ProductRule::MeanReversion { alpha: 0.1, market_make: None },
        );
        config
    }

    fn tick(
        depths: Vec<(&str, Depth)>,
        positions: Vec<(&str, i64)>,
        memory_blob: String,
    ) -> TickState {
        TickState {
            day: 0,
            timestamp: 0,
            depths: depths.into_iter().map(|(s, d)| (s.to_string(), d)).collect(),
            positions: positions.into_iter().map(|(s, p)| (s.to_string(), p)).collect(),
            memory_blob,
        }
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = resin_config();
        config.limits.insert("RAINFOREST_RESIN".into(), 0);
        assert!(matches!(
            StrategyEngine::new(config),
            Err(StrategyError::Config(_))
        ));
    }

    #[test]
    fn first_tick_seeds_second_tick_takes_the_cheap_ask() {
        let engine = StrategyEngine::new(resin_config()).unwrap();

        let first = tick(
            vec![("RAINFOREST_RESIN", depth((9998.0, 10), (10002.0, 10)))],
            vec![],
            String::new(),
        );
        let response = engine.on_tick(&first).unwrap();
        assert!(response.orders.is_empty());
        assert!(!response.memory_blob.is_empty());

        // Mean sits at 10000; an ask at 9995 is cheap. With 45 already
        // held only 5 of capacity remain.
        let second = tick(
            vec![("RAINFOREST_RESIN", depth((9990.0, 10), (9995.0, 5)))],
            vec![("RAINFOREST_RESIN", 45)],
            response.memory_blob,
        );
        let response = engine.on_tick(&second).unwrap();
        let batch = &response.orders["RAINFOREST_RESIN"];
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].price, 9995.0);
        assert_eq!(batch[0].quantity, 5);
        assert_eq!(response.conversions, 0);
    }

    #[test]
    fn product_without_a_book_is_skipped_entirely() {
        let engine = StrategyEngine::new(resin_config()).unwrap();
        let state = tick(vec![], vec![], String::new());
        let response = engine.on_tick(&state).unwrap();
        assert!(response.orders.is_empty());
        // No book means no statistics either.
        let memory = StrategyMemory::from_blob(&response.memory_blob);
        assert!(memory.products.is_empty());
    }

    #[test]
    fn stacked_quoting_shares_capacity_with_the_taker() {
        let mut config = StrategyConfig::default();
        config.limits.insert("KELP".into(), 10);
        config.rules.insert(
            "KELP".into(),
            ProductRule::MeanReversion {
                alpha: 0.1,
                market_make: Some(QuoteParams { base_spread: 2.0, base_size: 20 }),
            },
        );
        let engine = StrategyEngine::new(config).unwrap();

        let first = tick(vec![("KELP", depth((95.0, 50), (105.0, 50)))], vec![], String::new());
        let response = engine.on_tick(&first).unwrap();

        let second = tick(
            vec![("KELP", depth((90.0, 50), (98.0, 50)))],
            vec![("KELP", 8)],
            response.memory_blob,
        );
        let response = engine.on_tick(&second).unwrap();
        let batch = &response.orders["KELP"];

        let bought: i64 = batch.iter().filter(|o| o.is_buy()).map(|o| o.quantity).sum();
        let sold: i64 = batch.iter().filter(|o| !o.is_buy()).map(|o| o.quantity).sum();
        assert!(bought > 0);
        // Neither full-fill extreme can breach the limit.
        assert!(8 + bought <= 10);
        assert!(8 + sold >= -10);
    }

    #[test]
    fn identical_tick_streams_produce_identical_orders() {
        let run = || {
            let engine = StrategyEngine::new(resin_config()).unwrap();
            let mut blob = String::new();
            let mut all_orders = Vec::new();
            let books = [
                depth((9998.0, 10), (10002.0, 10)),
                depth((9990.0, 10), (9995.0, 5)),
                depth((10003.0, 7), (10006.0, 4)),
            ];
            for book in books {
                let state = tick(vec![("RAINFOREST_RESIN", book)], vec![], blob.clone());
                let response = engine.on_tick(&state).unwrap();
                blob = response.memory_blob;
                all_orders.push(response.orders);
            }
            all_orders
        };
        assert_eq!(run(), run());
    }
}
