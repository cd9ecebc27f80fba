//! Suggest command - perfect-play advice for a position
//!
//! Only the subtree below the given position is solved, so positions deep in a
//! game answer almost instantly.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use bsquare_core::{GameState, Minimax, Solver};

use crate::options::{self, TableArgs};
use crate::render;

#[derive(Args)]
pub struct SuggestArgs {
    /// Moves played so far, 1-25 to place and 0 to pass (e.g. "7,19,0")
    #[arg(default_value = "")]
    pub moves: String,

    #[command(flatten)]
    pub table: TableArgs,

    /// Colour the board with ANSI escapes
    #[arg(long)]
    pub color: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Advice for one position
#[derive(Clone, Debug, Serialize)]
pub struct Advice {
    pub state: GameState,
    /// Perfect-play score, positive when the first player wins
    pub score: i32,
    pub complete: bool,
    /// Co-optimal cells, 0-indexed; empty when the player must pass
    pub moves: Vec<usize>,
    /// Score after placing on each cell, `None` where illegal
    pub values: Vec<Option<i32>>,
}

pub fn run(args: SuggestArgs, config: Option<&Path>) -> Result<()> {
    let state = GameState::from_moves(&args.moves)
        .with_context(|| format!("Invalid move list: {:?}", args.moves))?;
    let config = options::resolve(config, &args.table, None)?;

    let mut solver = Solver::with_config(Minimax, &config);
    let advice = advise(&mut solver, state)?;
    tracing::info!("Evaluated {} positions", solver.table().len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&advice)?);
    } else {
        print!("{}", describe(&advice, args.color));
    }
    Ok(())
}

/// Evaluate a position and its moves
pub fn advise(solver: &mut Solver<Minimax>, state: GameState) -> Result<Advice> {
    let score = solver.evaluate(state)?.score();
    let moves = solver.suggest(state)?;
    let values = solver.move_values(state)?.to_vec();
    Ok(Advice {
        state,
        score,
        complete: state.is_complete(),
        moves,
        values,
    })
}

/// Human-readable rendering: value grid, board, verdict
pub fn describe(advice: &Advice, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&render::values(&advice.values, color));
    out.push('\n');
    out.push_str(&render::board(&advice.state, color));
    out.push('\n');
    out.push_str(&format!("Score: {:+}\n", advice.score));
    if advice.complete {
        out.push_str(&format!("Game over! Score: {}\n", advice.state.position.score()));
    } else if advice.moves.is_empty() {
        out.push_str("Suggestion: 0 (pass)\n");
    } else {
        let plural = if advice.moves.len() == 1 { "" } else { "s" };
        out.push_str(&format!("Suggestion{}: {}\n", plural, render::move_list(&advice.moves)));
    }
    out
}
