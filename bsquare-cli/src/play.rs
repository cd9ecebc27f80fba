//! Play command - interactive game with perfect-play hints
//!
//! Each turn shows the value of every move, the board and the suggested
//! moves, then reads the next move: 1-25 to place, 0 to pass (only when no
//! placement is legal), -1 to restart. End of input quits.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use bsquare_core::{GameState, Minimax, Move, Solver};

use crate::options::{self, TableArgs};
use crate::suggest;

const HELP: &str = "(Positions are 1-25, 0 passes, -1 restarts.)";

#[derive(Args)]
pub struct PlayArgs {
    /// Start from this move list instead of the empty board
    #[arg(long, default_value = "")]
    pub from: String,

    #[command(flatten)]
    pub table: TableArgs,

    /// Colour the board with ANSI escapes
    #[arg(long)]
    pub color: bool,
}

/// A line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Restart,
    Play(Move),
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "-1" => Some(Command::Restart),
        text => text.parse().ok().map(Command::Play),
    }
}

pub fn run(args: PlayArgs, config: Option<&Path>) -> Result<()> {
    let start = GameState::from_moves(&args.from)
        .with_context(|| format!("Invalid starting moves: {:?}", args.from))?;
    let config = options::resolve(config, &args.table, None)?;
    let mut solver = Solver::with_config(Minimax, &config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    play(&mut solver, start, stdin.lock(), stdout.lock(), args.color)
}

/// Drive a game from `start`, reading moves from `input` until it runs dry.
pub fn play<R: BufRead, W: Write>(
    solver: &mut Solver<Minimax>,
    start: GameState,
    mut input: R,
    mut output: W,
    color: bool,
) -> Result<()> {
    let mut state = start;
    let mut show_help = true;

    loop {
        let advice = suggest::advise(solver, state)?;
        write!(output, "{}", suggest::describe(&advice, color))?;
        if show_help {
            writeln!(output, "{}", HELP)?;
            show_help = false;
        }

        state = loop {
            write!(output, ">>> ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            match parse_command(&line) {
                Some(Command::Restart) => {
                    show_help = true;
                    break start;
                }
                Some(Command::Play(mv)) => match state.apply(mv) {
                    Ok(next) => break next,
                    Err(e) => tracing::debug!("Rejected move {}: {}", mv, e),
                },
                None => {}
            }
            writeln!(output, "INVALID")?;
        };
    }
}
