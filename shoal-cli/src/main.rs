//! Shoal CLI — replay and sweep commands.
//!
//! Commands:
//! - `run` — replay one strategy configuration over a historical feed
//! - `sweep` — grid-search around a base configuration, print a leaderboard

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use shoal_core::sim::{load_ticks, Replay, RunSummary};
use shoal_core::strategy::{StrategyConfig, StrategyEngine};
use shoal_runner::{ParamGrid, Sweep};

#[derive(Parser)]
#[command(name = "shoal", about = "Shoal CLI — statistical replay engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay one configuration over a feed and print the run summary.
    Run {
        /// Path to a TOML strategy configuration.
        #[arg(long)]
        config: PathBuf,

        /// Path to a semicolon-delimited market data CSV.
        #[arg(long)]
        data: PathBuf,
    },
    /// Sweep the standard grid around a base configuration.
    Sweep {
        /// Path to the base TOML strategy configuration.
        #[arg(long)]
        config: PathBuf,

        /// Path to a semicolon-delimited market data CSV.
        #[arg(long)]
        data: PathBuf,

        /// Run configurations one at a time instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Leaderboard rows to print.
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, data } => run_replay(&config, &data),
        Commands::Sweep { config, data, sequential, top } => {
            run_sweep(&config, &data, sequential, top)
        }
    }
}

fn load_config(path: &Path) -> Result<StrategyConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: StrategyConfig =
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn run_replay(config_path: &Path, data_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let engine = StrategyEngine::new(config)?;
    let ticks = load_ticks(data_path)
        .with_context(|| format!("loading feed {}", data_path.display()))?;
    log::info!("loaded {} ticks from {}", ticks.len(), data_path.display());

    let mut replay = Replay::new();
    let summary = replay.run(&engine, &ticks);
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("trades        {}", summary.trades);
    println!("realized pnl  {:.2}", summary.realized_pnl);
    println!("final cash    {:.2}", summary.final_cash);
    println!("equity        {:.2}", summary.equity);
    println!("fingerprint   {}", summary.fingerprint);
    if !summary.final_positions.is_empty() {
        println!("open positions:");
        for (symbol, position) in &summary.final_positions {
            println!("  {symbol:<20} {position:>8}");
        }
    }
    if !summary.per_product.is_empty() {
        println!("per product:");
        println!("  {:<20} {:>7} {:>9} {:>12}", "symbol", "trades", "volume", "pnl");
        for (symbol, totals) in &summary.per_product {
            println!(
                "  {symbol:<20} {:>7} {:>9} {:>12.2}",
                totals.trades, totals.volume, totals.realized_pnl
            );
        }
    }
}

fn run_sweep(config_path: &Path, data_path: &Path, sequential: bool, top: usize) -> Result<()> {
    let base = load_config(config_path)?;
    base.validate()?;
    let ticks = load_ticks(data_path)
        .with_context(|| format!("loading feed {}", data_path.display()))?;

    let grid = ParamGrid::standard();
    log::info!("sweeping up to {} configurations over {} ticks", grid.size(), ticks.len());
    let results = Sweep::new().with_parallelism(!sequential).run(&grid, &base, &ticks);

    println!("{:<16} {:>12} {:>12} {:>7}", "run id", "equity", "pnl", "trades");
    for score in results.scores().iter().take(top) {
        println!(
            "{:<16} {:>12.2} {:>12.2} {:>7}",
            &score.run_id[..16],
            score.final_equity,
            score.realized_pnl,
            score.trades
        );
    }
    if let Some(best) = results.best() {
        println!();
        println!("best run {} (equity {:.2})", best.run_id, best.final_equity);
    }
    Ok(())
}
