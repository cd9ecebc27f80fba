//! BSQUARE Core - Exhaustive solver for a 5x5 placement game
//!
//! Two players alternate placing pieces on a 5x5 grid. A placement denies the
//! opponent the cell and its orthogonal neighbours; the opening move may not
//! take the center. A player without a legal cell passes, and when neither
//! can move the player with more pieces wins.
//!
//! This crate provides:
//! - Bitboard encoding of positions and forbidden-cell masks
//! - Move legality and termination rules
//! - Symmetry canonicalization over the 8 board symmetries
//! - A transposition table keyed on canonical positions
//! - Pluggable evaluation strategies (outcome tally, perfect-play minimax)
//! - The memoizing solver and best-move suggestions

pub mod board;
pub mod rules;
pub mod symmetry;
pub mod game;
pub mod table;
pub mod strategy;
pub mod solver;
pub mod heuristic;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Mask, Player, Position, CELLS, CENTER, SIZE};
pub use rules::{derive, is_complete, legal_moves, no_moves, valid};
pub use game::{GameState, Move};
pub use table::{Probe, TranspositionTable};
pub use strategy::{Minimax, MinimaxSlot, Outcomes, Slot, Strategy, Tally, TallySlot, MAX_SCORE};
pub use solver::Solver;
pub use heuristic::{check_heuristic, claim_space, Deviation, HeuristicReport};
pub use config::{SolverConfig, StrategyKind};
pub use error::{MoveError, TableError};
