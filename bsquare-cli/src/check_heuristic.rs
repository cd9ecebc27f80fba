//! Check-heuristic command - measure the claim-space rule against perfect play
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: solve_game(), report_results()
//! - Level 3: format_deviation()
//! - Level 4: formatting utilities

use std::path::Path;

use anyhow::Result;
use clap::Args;

use bsquare_core::{check_heuristic, claim_space, Deviation, GameState, HeuristicReport, Minimax, Solver, SolverConfig};

use crate::options::{self, TableArgs};
use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct CheckHeuristicArgs {
    /// Print at most this many deviating positions
    #[arg(long, default_value = "10")]
    pub show: usize,

    #[command(flatten)]
    pub table: TableArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run check-heuristic command
///
/// 1. Solve the whole game with minimax
/// 2. Compare the heuristic against every stored position
/// 3. Report deviations
pub fn run(args: CheckHeuristicArgs, config: Option<&Path>) -> Result<()> {
    let config = options::resolve(config, &args.table, None)?;
    let mut solver = solve_game(&config)?;

    let report = check_heuristic(&mut solver, claim_space)?;
    tracing::info!(
        "Checked {} positions, {} deviations",
        report.checked,
        report.failures()
    );

    report_results(&report, args.show, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Minimax solve from the empty board
pub fn solve_game(config: &SolverConfig) -> Result<Solver<Minimax>> {
    let mut solver = Solver::with_config(Minimax, config);
    let root = solver.solve()?;
    tracing::info!("Game value {:+} over {} positions", root.score(), solver.table().len());
    Ok(solver)
}

fn report_results(report: &HeuristicReport, show: usize, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for deviation in report.deviations.iter().take(show) {
        println!("{}", format_deviation(deviation));
    }
    if report.failures() > show {
        println!("... {} more", report.failures() - show);
    }
    println!("heuristic fails in {} cases", report.failures());
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn format_deviation(deviation: &Deviation) -> String {
    let state = GameState::from_position(deviation.position);
    format!(
        "{}perfect:   {}\nheuristic: {}\n",
        render::board(&state, false),
        render::move_list(&deviation.perfect),
        render::move_list(&deviation.heuristic),
    )
}
