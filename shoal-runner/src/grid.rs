//! Parameter grid over the strategy configuration surface.

use shoal_core::strategy::{ProductRule, StrategyConfig};

/// Ranges to sweep. Each axis rewrites one family of parameters across the
/// whole base configuration; axes without a matching component in the base
/// config simply collapse.
#[derive(Debug, Clone)]
pub struct ParamGrid {
    /// Mean-reversion smoothing alphas to test.
    pub alphas: Vec<f64>,

    /// Pocket window lengths to test.
    pub pocket_windows: Vec<usize>,

    /// Pair entry z-score thresholds to test.
    pub entry_zs: Vec<f64>,

    /// Market-making base spreads to test.
    pub base_spreads: Vec<f64>,
}

impl ParamGrid {
    /// A modest default grid centered on the production parameters.
    pub fn standard() -> Self {
        Self {
            alphas: vec![0.05, 0.1, 0.2, 0.3],
            pocket_windows: vec![20, 30, 50],
            entry_zs: vec![1.5, 2.0, 2.5],
            base_spreads: vec![2.0, 4.0],
        }
    }

    /// Total number of configurations before validity filtering.
    pub fn size(&self) -> usize {
        self.alphas.len().max(1)
            * self.pocket_windows.len().max(1)
            * self.entry_zs.len().max(1)
            * self.base_spreads.len().max(1)
    }

    /// All valid configurations in the grid. Combinations that fail
    /// validation (e.g. a crossover ordering broken by an alpha rewrite)
    /// are skipped rather than reported.
    pub fn generate_configs(&self, base: &StrategyConfig) -> Vec<StrategyConfig> {
        let one = |values: &[f64]| if values.is_empty() { vec![f64::NAN] } else { values.to_vec() };
        let alphas = one(&self.alphas);
        let entry_zs = one(&self.entry_zs);
        let base_spreads = one(&self.base_spreads);
        let windows: Vec<Option<usize>> = if self.pocket_windows.is_empty() {
            vec![None]
        } else {
            self.pocket_windows.iter().copied().map(Some).collect()
        };

        let mut configs = Vec::new();
        for &alpha in &alphas {
            for &window in &windows {
                for &entry_z in &entry_zs {
                    for &base_spread in &base_spreads {
                        let mut config = base.clone();
                        apply(&mut config, alpha, window, entry_z, base_spread);
                        if config.validate().is_ok() {
                            configs.push(config);
                        }
                    }
                }
            }
        }
        configs
    }
}

fn apply(
    config: &mut StrategyConfig,
    alpha: f64,
    window: Option<usize>,
    entry_z: f64,
    base_spread: f64,
) {
    for rule in config.rules.values_mut() {
        match rule {
            ProductRule::MeanReversion { alpha: a, market_make } => {
                if !alpha.is_nan() {
                    *a = alpha;
                }
                if let Some(quote) = market_make {
                    if !base_spread.is_nan() {
                        quote.base_spread = base_spread;
                    }
                }
            }
            ProductRule::PocketReversion { params, .. } => {
                if let Some(window) = window {
                    params.window = window;
                }
            }
            ProductRule::MaCrossover { .. } => {}
        }
    }
    if !entry_z.is_nan() {
        for pair in &mut config.pairs {
            pair.entry_z = entry_z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_core::strategy::{QuoteParams, SpreadPair};

    fn base() -> StrategyConfig {
        let mut config = StrategyConfig::default();
        config.limits.insert("RAINFOREST_RESIN".into(), 50);
        config.limits.insert("CROISSANTS".into(), 250);
        config.limits.insert("JAMS".into(), 350);
        config.rules.insert(
            "RAINFOREST_RESIN".into(),
            ProductRule::MeanReversion {
                alpha: 0.1,
                market_make: Some(QuoteParams { base_spread: 4.0, base_size: 10 }),
            },
        );
        config.pairs.push(SpreadPair {
            left: "CROISSANTS".into(),
            right: "JAMS".into(),
            alpha: 0.05,
            entry_z: 2.0,
        });
        config
    }

    #[test]
    fn grid_size_counts_all_axes() {
        let grid = ParamGrid::standard();
        assert_eq!(grid.size(), 4 * 3 * 3 * 2);
    }

    #[test]
    fn every_generated_config_validates() {
        let configs = ParamGrid::standard().generate_configs(&base());
        assert!(!configs.is_empty());
        for config in &configs {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn alpha_axis_rewrites_the_reversion_rule() {
        let grid = ParamGrid {
            alphas: vec![0.25],
            pocket_windows: vec![],
            entry_zs: vec![],
            base_spreads: vec![],
        };
        let configs = grid.generate_configs(&base());
        assert_eq!(configs.len(), 1);
        match &configs[0].rules["RAINFOREST_RESIN"] {
            ProductRule::MeanReversion { alpha, .. } => assert_eq!(*alpha, 0.25),
            other => panic!("unexpected rule {other:?}"),
        }
        // Untouched axes keep the base values.
        assert_eq!(configs[0].pairs[0].entry_z, 2.0);
    }

    #[test]
    fn empty_axes_still_yield_the_base_config() {
        let grid = ParamGrid {
            alphas: vec![],
            pocket_windows: vec![],
            entry_zs: vec![],
            base_spreads: vec![],
        };
        let configs = grid.generate_configs(&base());
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0], base());
    }
}
