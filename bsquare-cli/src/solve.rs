//! Solve command - evaluate the whole game from the empty board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: solve_tally(), solve_minimax(), report_results()
//! - Level 3: build_report()
//! - Level 4: formatting utilities

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use bsquare_core::{GameState, Minimax, Outcomes, Solver, SolverConfig, Strategy, StrategyKind, Tally};

use crate::options::{self, StrategyArg, TableArgs};
use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    /// Evaluation strategy (defaults to the config file, then minimax)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    #[command(flatten)]
    pub table: TableArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything a solve reports
#[derive(Clone, Debug, Serialize)]
pub struct SolveReport {
    pub strategy: &'static str,
    pub entries: usize,
    pub table_mb: f64,
    pub seconds: f64,
    /// Tally: every line of play. Minimax: finished games stored in the table.
    pub outcomes: Outcomes,
    /// Perfect-play score of the empty board (minimax only)
    pub score: Option<i32>,
    /// Co-optimal opening cells, 0-indexed (minimax only)
    pub best_openings: Option<Vec<usize>>,
    #[serde(skip)]
    pub summary: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
///
/// 1. Resolve the solver configuration
/// 2. Solve with the chosen strategy
/// 3. Report the results
pub fn run(args: SolveArgs, config: Option<&Path>) -> Result<()> {
    let config = options::resolve(config, &args.table, args.strategy)?;
    tracing::info!("Solving with {:?} strategy", config.strategy);

    let report = match config.strategy {
        StrategyKind::Tally => solve_tally(&config)?,
        StrategyKind::Minimax => solve_minimax(&config)?,
    };

    report_results(&report, args.json);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Solve counting every ending
pub fn solve_tally(config: &SolverConfig) -> Result<SolveReport> {
    let start = Instant::now();
    let mut solver = Solver::with_config(Tally, config);
    let root = solver.solve()?;
    Ok(build_report(&solver, &root, start, root.outcomes, None, None))
}

/// Solve for perfect play
pub fn solve_minimax(config: &SolverConfig) -> Result<SolveReport> {
    let start = Instant::now();
    let mut solver = Solver::with_config(Minimax, config);
    let root = solver.solve()?;
    let openings = solver.suggest(GameState::new())?;
    let outcomes = solver.terminal_outcomes();
    Ok(build_report(&solver, &root, start, outcomes, Some(root.score()), Some(openings)))
}

fn report_results(report: &SolveReport, json: bool) {
    if json {
        print_json_report(report);
    } else {
        print_text_report(report);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn build_report<S: Strategy>(
    solver: &Solver<S>,
    root: &S::Slot,
    start: Instant,
    outcomes: Outcomes,
    score: Option<i32>,
    best_openings: Option<Vec<usize>>,
) -> SolveReport {
    let seconds = start.elapsed().as_secs_f64();
    let entries = solver.table().len();
    tracing::info!("Solved {} positions in {:.1}s", entries, seconds);

    SolveReport {
        strategy: solver.strategy().name(),
        entries,
        table_mb: megabytes(solver.table().entry_bytes()),
        seconds,
        outcomes,
        score,
        best_openings,
        summary: solver.strategy().display(root),
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn megabytes(bytes: usize) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

fn print_json_report(report: &SolveReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize report: {}", e),
    }
}

fn print_text_report(report: &SolveReport) {
    println!("=== BSQUARE Solve ({}) ===", report.strategy);
    println!("{}", report.summary);
    println!("Table entries: {} ({:.3} MB)", report.entries, report.table_mb);

    if let Some(openings) = &report.best_openings {
        let o = &report.outcomes;
        println!("Total endings: {}", o.total());
        println!("Player 1 wins: {}", o.first_wins);
        println!("Player 2 wins: {}", o.second_wins);
        println!("Ties: {}", o.ties);
        println!("Best openings: {}", render::move_list(openings));
    }
    println!("Elapsed: {:.2}s", report.seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_megabytes() {
        assert_eq!(megabytes(1024 * 1024), 1.0);
        assert_eq!(megabytes(0), 0.0);
    }

    #[test]
    fn test_limit_surfaces_as_error() {
        let config = SolverConfig::default()
            .with_initial_capacity(1 << 10)
            .with_max_entries(Some(500));
        let err = solve_minimax(&config).unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
