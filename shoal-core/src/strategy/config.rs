//! One explicit, validated strategy configuration.
//!
//! Everything that used to live as scattered per-file constants — position
//! limits, smoothing alphas, window sizes, thresholds — is a named field
//! here, validated once at engine construction.

use crate::stats::pocket::PocketParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Full configuration for one strategy engine instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Instrument → signed position bound.
    #[serde(default)]
    pub limits: HashMap<String, i64>,

    /// Per-instrument single-product rule.
    #[serde(default)]
    pub rules: HashMap<String, ProductRule>,

    /// Two-leg spread pairs.
    #[serde(default)]
    pub pairs: Vec<SpreadPair>,

    /// Basket-versus-components arbitrage.
    #[serde(default)]
    pub baskets: Vec<Basket>,

    /// Correlation-gated momentum pairs.
    #[serde(default)]
    pub momentum: Vec<CorrelationMomentum>,
}

/// Single-instrument rule selection (serializable enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductRule {
    /// Buy below / sell above an EWMA of the mid-price, optionally with an
    /// inventory-aware quote stacked on top.
    MeanReversion {
        alpha: f64,
        #[serde(default)]
        market_make: Option<QuoteParams>,
    },

    /// Dual-EWMA crossover: trade with the fast average when it leads the
    /// slow one.
    MaCrossover { alpha_short: f64, alpha_long: f64 },

    /// Pocket-regime mean reversion with survival-scaled sizing and a
    /// flatten-on-exit gate.
    PocketReversion { params: PocketParams, base_size: i64 },
}

/// Inventory-aware quoting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteParams {
    /// Quoted spread at flat inventory, in price units.
    pub base_spread: f64,
    /// Quote size at flat inventory.
    pub base_size: i64,
}

/// Two correlated legs traded against their spread z-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadPair {
    pub left: String,
    pub right: String,
    pub alpha: f64,
    pub entry_z: f64,
}

impl SpreadPair {
    /// Memory key for this pair's spread statistics.
    pub fn key(&self) -> String {
        format!("{}|{}", self.left, self.right)
    }
}

/// A composite instrument priced as a weighted sum of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub symbol: String,
    pub components: Vec<BasketLeg>,
    /// Minimum mispricing before legs are emitted.
    pub edge: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketLeg {
    pub symbol: String,
    pub weight: i64,
}

/// Momentum on `follower`, gated by its rolling correlation with `leader`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMomentum {
    pub leader: String,
    pub follower: String,
    /// Rolling window for prices and correlation.
    pub window: usize,
    /// Cap on the retained correlation history.
    pub short_window: usize,
    /// Minimum |correlation| before any trade.
    pub threshold: f64,
    /// Fraction of the limit used at full correlation.
    pub scale: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{context}: alpha {alpha} must lie in (0, 1)")]
    AlphaOutOfRange { context: String, alpha: f64 },

    #[error("{context}: window {window} must be at least 2")]
    WindowTooSmall { context: String, window: usize },

    #[error("{context}: {field} must be positive, got {value}")]
    NonPositiveValue {
        context: String,
        field: &'static str,
        value: f64,
    },

    #[error("{context}: threshold {value} must be non-negative")]
    NegativeThreshold { context: String, value: f64 },

    #[error("{context}: legs must name two distinct products")]
    DegeneratePair { context: String },

    #[error("crossover for {context}: alpha_short {alpha_short} must exceed alpha_long {alpha_long}")]
    CrossoverOrder {
        context: String,
        alpha_short: f64,
        alpha_long: f64,
    },

    #[error("basket {symbol} has no components")]
    EmptyBasket { symbol: String },

    #[error("no position limit configured for {symbol}")]
    MissingLimit { symbol: String },

    #[error("position limit for {symbol} must be positive, got {limit}")]
    NonPositiveLimit { symbol: String, limit: i64 },
}

fn check_alpha(context: &str, alpha: f64) -> Result<(), ConfigError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ConfigError::AlphaOutOfRange { context: context.to_string(), alpha });
    }
    Ok(())
}

impl StrategyConfig {
    /// Validate every field and every cross-reference. An engine is only
    /// ever constructed from a config that passed this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (symbol, &limit) in &self.limits {
            if limit <= 0 {
                return Err(ConfigError::NonPositiveLimit { symbol: symbol.clone(), limit });
            }
        }

        for (symbol, rule) in &self.rules {
            self.require_limit(symbol)?;
            match rule {
                ProductRule::MeanReversion { alpha, market_make } => {
                    check_alpha(symbol, *alpha)?;
                    if let Some(quote) = market_make {
                        if quote.base_spread <= 0.0 {
                            return Err(ConfigError::NonPositiveValue {
                                context: symbol.clone(),
                                field: "base_spread",
                                value: quote.base_spread,
                            });
                        }
                        if quote.base_size <= 0 {
                            return Err(ConfigError::NonPositiveValue {
                                context: symbol.clone(),
                                field: "base_size",
                                value: quote.base_size as f64,
                            });
                        }
                    }
                }
                ProductRule::MaCrossover { alpha_short, alpha_long } => {
                    check_alpha(symbol, *alpha_short)?;
                    check_alpha(symbol, *alpha_long)?;
                    if alpha_short <= alpha_long {
                        return Err(ConfigError::CrossoverOrder {
                            context: symbol.clone(),
                            alpha_short: *alpha_short,
                            alpha_long: *alpha_long,
                        });
                    }
                }
                ProductRule::PocketReversion { params, base_size } => {
                    if params.window < 2 {
                        return Err(ConfigError::WindowTooSmall {
                            context: symbol.clone(),
                            window: params.window,
                        });
                    }
                    if params.std_duration <= 0.0 {
                        return Err(ConfigError::NonPositiveValue {
                            context: symbol.clone(),
                            field: "std_duration",
                            value: params.std_duration,
                        });
                    }
                    if *base_size <= 0 {
                        return Err(ConfigError::NonPositiveValue {
                            context: symbol.clone(),
                            field: "base_size",
                            value: *base_size as f64,
                        });
                    }
                }
            }
        }

        for pair in &self.pairs {
            let context = pair.key();
            if pair.left == pair.right {
                return Err(ConfigError::DegeneratePair { context });
            }
            check_alpha(&context, pair.alpha)?;
            if pair.entry_z <= 0.0 {
                return Err(ConfigError::NonPositiveValue {
                    context,
                    field: "entry_z",
                    value: pair.entry_z,
                });
            }
            self.require_limit(&pair.left)?;
            self.require_limit(&pair.right)?;
        }

        for basket in &self.baskets {
            if basket.components.is_empty() {
                return Err(ConfigError::EmptyBasket { symbol: basket.symbol.clone() });
            }
            if basket.edge < 0.0 {
                return Err(ConfigError::NegativeThreshold {
                    context: basket.symbol.clone(),
                    value: basket.edge,
                });
            }
            self.require_limit(&basket.symbol)?;
            for leg in &basket.components {
                if leg.weight <= 0 {
                    return Err(ConfigError::NonPositiveValue {
                        context: basket.symbol.clone(),
                        field: "weight",
                        value: leg.weight as f64,
                    });
                }
                self.require_limit(&leg.symbol)?;
            }
        }

        for momentum in &self.momentum {
            let context = format!("{}->{}", momentum.leader, momentum.follower);
            if momentum.leader == momentum.follower {
                return Err(ConfigError::DegeneratePair { context });
            }
            if momentum.window < 2 {
                return Err(ConfigError::WindowTooSmall { context, window: momentum.window });
            }
            if momentum.short_window < 2 {
                return Err(ConfigError::WindowTooSmall {
                    context,
                    window: momentum.short_window,
                });
            }
            if momentum.threshold < 0.0 {
                return Err(ConfigError::NegativeThreshold {
                    context,
                    value: momentum.threshold,
                });
            }
            if !(momentum.scale > 0.0 && momentum.scale <= 1.0) {
                return Err(ConfigError::NonPositiveValue {
                    context,
                    field: "scale",
                    value: momentum.scale,
                });
            }
            self.require_limit(&momentum.follower)?;
        }

        Ok(())
    }

    fn require_limit(&self, symbol: &str) -> Result<(), ConfigError> {
        if !self.limits.contains_key(symbol) {
            return Err(ConfigError::MissingLimit { symbol: symbol.to_string() });
        }
        Ok(())
    }
}
