//! Options shared by every command
//!
//! Command-line flags override values from the `--config` file, which in turn
//! override the built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use bsquare_core::{SolverConfig, StrategyKind};

/// Evaluation strategy as named on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Tally,
    Minimax,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Tally => StrategyKind::Tally,
            StrategyArg::Minimax => StrategyKind::Minimax,
        }
    }
}

/// Transposition table sizing
#[derive(Args, Clone, Debug, Default)]
pub struct TableArgs {
    /// Slots to allocate up front
    #[arg(long, value_name = "SLOTS")]
    pub capacity: Option<usize>,

    /// Abort once the table holds this many entries
    #[arg(long, value_name = "ENTRIES")]
    pub max_entries: Option<usize>,
}

/// Build the solver configuration for a command
pub fn resolve(config: Option<&Path>, table: &TableArgs, strategy: Option<StrategyArg>) -> Result<SolverConfig> {
    let mut resolved = match config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SolverConfig::default(),
    };

    if let Some(capacity) = table.capacity {
        resolved = resolved.with_initial_capacity(capacity);
    }
    if table.max_entries.is_some() {
        resolved = resolved.with_max_entries(table.max_entries);
    }
    if let Some(strategy) = strategy {
        resolved = resolved.with_strategy(strategy.into());
    }

    tracing::debug!(?resolved, "solver configuration");
    Ok(resolved)
}
