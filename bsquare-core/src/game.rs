//! Game state and checked play
//!
//! [`GameState`] carries a position together with its mask, the pair every
//! rule and the solver work on. Moves written for people number the cells
//! 1-25 and use 0 for a pass.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Mask, Player, Position, CELLS};
use crate::error::MoveError;
use crate::rules;

// ============================================================================
// MOVE
// ============================================================================

/// A single ply
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Place on a 0-indexed cell
    Place(usize),
    Pass,
}

impl FromStr for Move {
    type Err = MoveError;

    /// Parse the 1-based notation: `1`-`25` place, `0` passes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: usize = s.trim().parse().map_err(|_| MoveError::Parse(s.to_string()))?;
        match n {
            0 => Ok(Move::Pass),
            n if n <= CELLS => Ok(Move::Place(n - 1)),
            n => Err(MoveError::OutOfRange(n - 1)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(cell) => write!(f, "{}", cell + 1),
            Move::Pass => write!(f, "0"),
        }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub position: Position,
    pub mask: Mask,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The empty board before the opening move
    pub fn new() -> Self {
        Self {
            position: Position::EMPTY,
            mask: Mask::EMPTY,
        }
    }

    /// Rebuild the state for a bare position, see [`rules::derive`]
    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            mask: rules::derive(position),
        }
    }

    /// Replay a comma or whitespace separated list of 1-based moves from the
    /// empty board.
    pub fn from_moves(moves: &str) -> Result<Self, MoveError> {
        moves
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .try_fold(Self::new(), |state, token| state.apply(token.parse()?))
    }

    pub fn turn(&self) -> u32 {
        self.position.turn()
    }

    pub fn mover(&self) -> Player {
        self.position.mover()
    }

    pub fn is_valid(&self, cell: usize) -> bool {
        rules::valid(self.mask, cell)
    }

    /// The player to move has no legal cell
    pub fn must_pass(&self) -> bool {
        rules::no_moves(self.position, self.mask)
    }

    pub fn is_complete(&self) -> bool {
        rules::is_complete(self.position, self.mask)
    }

    pub fn legal_moves(&self) -> impl Iterator<Item = usize> {
        rules::legal_moves(self.mask)
    }

    /// Place without checking legality
    pub fn place(self, cell: usize) -> Self {
        Self {
            position: self.position.place(cell),
            mask: self.mask.place(cell),
        }
    }

    /// Pass without checking that no move exists
    pub fn pass(self) -> Self {
        Self {
            position: self.position.pass(),
            mask: self.mask.pass(),
        }
    }

    /// Apply a move after checking it against the rules. Passing is only
    /// allowed when no placement is.
    pub fn apply(self, mv: Move) -> Result<Self, MoveError> {
        match mv {
            Move::Place(cell) if cell >= CELLS => Err(MoveError::OutOfRange(cell)),
            Move::Place(cell) if !self.is_valid(cell) => Err(MoveError::Illegal(cell)),
            Move::Place(cell) => Ok(self.place(cell)),
            Move::Pass if !self.must_pass() => Err(MoveError::PassWithMoves),
            Move::Pass => Ok(self.pass()),
        }
    }
}
