//! Parameter sweep executor.
//!
//! Every configuration gets its own engine, ledger, memory blob, and trade
//! log, so workers share nothing mutable and rayon can fan the grid out
//! without coordination.

use rayon::prelude::*;

use shoal_core::sim::{MarketTick, Replay};
use shoal_core::strategy::{StrategyConfig, StrategyEngine};

use crate::grid::ParamGrid;
use crate::result::{run_id, RunScore};

pub struct Sweep {
    parallel: bool,
}

impl Default for Sweep {
    fn default() -> Self {
        Self::new()
    }
}

impl Sweep {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replay every grid configuration over the same feed and collect the
    /// scored results, best first.
    pub fn run(
        &self,
        grid: &ParamGrid,
        base: &StrategyConfig,
        ticks: &[MarketTick],
    ) -> SweepResults {
        let configs = grid.generate_configs(base);
        let scores: Vec<RunScore> = if self.parallel {
            configs.par_iter().filter_map(|config| score(config, ticks)).collect()
        } else {
            configs.iter().filter_map(|config| score(config, ticks)).collect()
        };
        SweepResults::new(scores)
    }
}

fn score(config: &StrategyConfig, ticks: &[MarketTick]) -> Option<RunScore> {
    let engine = match StrategyEngine::new(config.clone()) {
        Ok(engine) => engine,
        Err(err) => {
            // generate_configs validates, so this only fires for
            // hand-built grids with broken combinations.
            log::warn!("skipping unrunnable config: {err}");
            return None;
        }
    };
    let mut replay = Replay::new();
    let summary = replay.run(&engine, ticks);
    Some(RunScore {
        run_id: run_id(config),
        final_equity: summary.equity,
        realized_pnl: summary.realized_pnl,
        trades: summary.trades,
        fingerprint: summary.fingerprint,
        config: config.clone(),
    })
}

/// Results from a parameter sweep, sorted by final equity descending.
#[derive(Debug)]
pub struct SweepResults {
    scores: Vec<RunScore>,
}

impl SweepResults {
    fn new(mut scores: Vec<RunScore>) -> Self {
        scores.sort_by(|a, b| {
            b.final_equity
                .total_cmp(&a.final_equity)
                .then_with(|| a.run_id.cmp(&b.run_id))
        });
        Self { scores }
    }

    pub fn best(&self) -> Option<&RunScore> {
        self.scores.first()
    }

    /// The full leaderboard, best first.
    pub fn scores(&self) -> &[RunScore] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
