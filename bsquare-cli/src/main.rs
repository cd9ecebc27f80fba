//! BSQUARE CLI - Command-line interface
//!
//! Commands:
//! - solve: Evaluate the whole game (outcome tally or perfect play)
//! - suggest: Best moves for a position
//! - play: Interactive game with hints
//! - check-heuristic: Compare the claim-space rule against perfect play

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod check_heuristic;
mod options;
mod play;
mod render;
mod solve;
mod suggest;

#[derive(Parser)]
#[command(name = "bsquare")]
#[command(about = "Exhaustive solver for the 5x5 BSQUARE placement game")]
struct Cli {
    /// Solver configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the game from the empty board
    Solve(solve::SolveArgs),
    /// Suggest the best moves after a sequence of moves
    Suggest(suggest::SuggestArgs),
    /// Play interactively with perfect-play hints
    Play(play::PlayArgs),
    /// Count positions where the claim-space heuristic misplays
    CheckHeuristic(check_heuristic::CheckHeuristicArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so reports on stdout stay parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Solve(args) => solve::run(args, config),
        Commands::Suggest(args) => suggest::run(args, config),
        Commands::Play(args) => play::run(args, config),
        Commands::CheckHeuristic(args) => check_heuristic::run(args, config),
    }
}
