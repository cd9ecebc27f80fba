//! Solver configuration
//!
//! Loaded from JSON; every field is optional and falls back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Which evaluation strategy a solve runs with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Count wins, losses and ties over every line of play
    Tally,
    /// Perfect play
    #[default]
    Minimax,
}

/// Transposition table sizing and strategy selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub strategy: StrategyKind,
    /// Slots allocated up front (rounded up to a power of two)
    pub initial_capacity: usize,
    /// Hard limit on stored entries; `None` lets the table grow freely
    pub max_entries: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Minimax,
            // Room for the ~8.7M canonical positions of a full solve.
            initial_capacity: 1 << 24,
            max_entries: None,
        }
    }
}

impl SolverConfig {
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
