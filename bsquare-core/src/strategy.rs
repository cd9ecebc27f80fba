//! Evaluation strategies
//!
//! A strategy decides what the solver stores per canonical position: how a
//! finished game is scored, what a node starts from before its children are
//! known, and how sibling results fold into the parent. Two are provided:
//!
//! - [`Tally`] counts every game ending reachable below a node
//! - [`Minimax`] propagates the perfect-play piece difference

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::board::{Player, Position, CELLS};

// ============================================================================
// TRAITS
// ============================================================================

/// A memoized result, tagged with the canonical position it belongs to.
///
/// `Default` must produce a slot whose position is [`Position::NULL`]; the
/// transposition table treats such slots as vacant.
pub trait Slot: Copy + Default + fmt::Debug {
    fn position(&self) -> Position;
}

/// Scoring and combination policy for the solver
pub trait Strategy {
    type Slot: Slot;

    /// Short name for reports and logs
    fn name(&self) -> &'static str;

    /// Starting value for a node whose children are not yet folded in
    fn init(&self, position: Position) -> Self::Slot;

    /// Result for a finished game
    fn score(&self, terminal: Position) -> Self::Slot;

    /// Fold two results belonging to the same parent position
    fn combine(&self, a: Self::Slot, b: Self::Slot) -> Self::Slot;

    /// Preference of the player to move at `a`'s position: `Greater` when `a`
    /// is the better outcome. Strategies without an ordering return `Equal`.
    fn compare(&self, a: &Self::Slot, b: &Self::Slot) -> Ordering;

    /// Attach a cached result to another position
    fn relabel(&self, slot: Self::Slot, position: Position) -> Self::Slot;

    /// Human-readable rendering of a result
    fn display(&self, slot: &Self::Slot) -> String;
}

// ============================================================================
// TALLY
// ============================================================================

/// Game endings classified by winner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcomes {
    pub first_wins: u64,
    pub second_wins: u64,
    pub ties: u64,
}

impl Outcomes {
    /// A single ending with the given piece difference
    pub fn classify(score: i32) -> Self {
        match score.cmp(&0) {
            Ordering::Greater => Outcomes { first_wins: 1, ..Default::default() },
            Ordering::Less => Outcomes { second_wins: 1, ..Default::default() },
            Ordering::Equal => Outcomes { ties: 1, ..Default::default() },
        }
    }

    pub fn total(&self) -> u64 {
        self.first_wins + self.second_wins + self.ties
    }

    pub fn wins(&self, player: Player) -> u64 {
        match player {
            Player::First => self.first_wins,
            Player::Second => self.second_wins,
        }
    }
}

impl Add for Outcomes {
    type Output = Outcomes;

    fn add(self, rhs: Outcomes) -> Outcomes {
        Outcomes {
            first_wins: self.first_wins + rhs.first_wins,
            second_wins: self.second_wins + rhs.second_wins,
            ties: self.ties + rhs.ties,
        }
    }
}

impl AddAssign for Outcomes {
    fn add_assign(&mut self, rhs: Outcomes) {
        *self = *self + rhs;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TallySlot {
    pub position: Position,
    pub outcomes: Outcomes,
}

impl Slot for TallySlot {
    fn position(&self) -> Position {
        self.position
    }
}

/// Counts wins, losses and ties over every line of play. Useless for picking
/// moves, since every move compares equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tally;

impl Strategy for Tally {
    type Slot = TallySlot;

    fn name(&self) -> &'static str {
        "tally"
    }

    fn init(&self, position: Position) -> TallySlot {
        TallySlot { position, outcomes: Outcomes::default() }
    }

    fn score(&self, terminal: Position) -> TallySlot {
        TallySlot { position: terminal, outcomes: Outcomes::classify(terminal.score()) }
    }

    fn combine(&self, a: TallySlot, b: TallySlot) -> TallySlot {
        TallySlot { position: a.position, outcomes: a.outcomes + b.outcomes }
    }

    fn compare(&self, _a: &TallySlot, _b: &TallySlot) -> Ordering {
        Ordering::Equal
    }

    fn relabel(&self, slot: TallySlot, position: Position) -> TallySlot {
        TallySlot { position, ..slot }
    }

    fn display(&self, slot: &TallySlot) -> String {
        let o = slot.outcomes;
        let total = o.total().max(1) as f64;
        let line = |label: &str, n: u64| {
            format!("  {:<4}= {:>17} ({:.12} %)", label, n, n as f64 * 100.0 / total)
        };
        [line("P1", o.first_wins), line("P2", o.second_wins), line("TIE", o.ties)].join("\n")
    }
}

// ============================================================================
// MINIMAX
// ============================================================================

/// Largest possible piece difference
pub const MAX_SCORE: i32 = CELLS as i32;

/// Perfect-play score and canonical position packed into one word.
///
/// ```text
/// ..SSSSSS PPPPPPPP...  (score biased by MAX_SCORE above the 56-bit position)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MinimaxSlot(u64);

impl MinimaxSlot {
    const SCORE_SHIFT: u32 = 56;
    const POSITION_BITS: u64 = (1 << Self::SCORE_SHIFT) - 1;

    pub fn new(position: Position, score: i32) -> Self {
        debug_assert!(score.abs() <= MAX_SCORE, "score {} out of range", score);
        debug_assert!(position.raw() <= Self::POSITION_BITS);
        MinimaxSlot(((score + MAX_SCORE) as u64) << Self::SCORE_SHIFT | position.raw())
    }

    pub fn from_raw(raw: u64) -> Self {
        MinimaxSlot(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    /// Piece difference under perfect play, positive when the first player wins
    pub fn score(self) -> i32 {
        (self.0 >> Self::SCORE_SHIFT) as i32 - MAX_SCORE
    }

    pub fn with_position(self, position: Position) -> Self {
        MinimaxSlot(self.0 & !Self::POSITION_BITS | position.raw())
    }
}

impl Slot for MinimaxSlot {
    fn position(&self) -> Position {
        Position::from_raw(self.0 & Self::POSITION_BITS)
    }
}

/// Perfect play: the first player maximizes the final piece difference, the
/// second minimizes it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Minimax;

impl Strategy for Minimax {
    type Slot = MinimaxSlot;

    fn name(&self) -> &'static str {
        "minimax"
    }

    /// The worst result for the player to move, so any real child replaces it.
    fn init(&self, position: Position) -> MinimaxSlot {
        let score = match position.mover() {
            Player::First => -MAX_SCORE,
            Player::Second => MAX_SCORE,
        };
        MinimaxSlot::new(position, score)
    }

    fn score(&self, terminal: Position) -> MinimaxSlot {
        MinimaxSlot::new(terminal, terminal.score())
    }

    fn combine(&self, a: MinimaxSlot, b: MinimaxSlot) -> MinimaxSlot {
        match self.compare(&a, &b) {
            Ordering::Greater => a,
            _ => b,
        }
    }

    fn compare(&self, a: &MinimaxSlot, b: &MinimaxSlot) -> Ordering {
        match a.position().mover() {
            Player::First => a.score().cmp(&b.score()),
            Player::Second => b.score().cmp(&a.score()),
        }
    }

    fn relabel(&self, slot: MinimaxSlot, position: Position) -> MinimaxSlot {
        slot.with_position(position)
    }

    fn display(&self, slot: &MinimaxSlot) -> String {
        format!("  SCORE = {:+}", slot.score())
    }
}
