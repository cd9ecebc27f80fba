//! Bitboard encoding of positions and masks
//!
//! Both types pack into one `u64` (bit 0 on the right):
//!
//! ```text
//! ........TTTTTTBBBBBBBBBBBBBBBBBBBBBBBBBAAAAAAAAAAAAAAAAAAAAAAAAA
//! ```
//!
//! - `A`: 25 cells of the first player's plane
//! - `B`: 25 cells of the second player's plane
//! - `T`: the 1-indexed turn number
//!
//! Cells are numbered row-major, 0 in the top-left corner and 24 in the
//! bottom-right. The raw value zero is never a valid position; it marks an
//! empty transposition table slot.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Width and height of the grid
pub const SIZE: usize = 5;

/// Number of cells on the grid
pub const CELLS: usize = SIZE * SIZE;

/// The center cell, forbidden as an opening move
pub const CENTER: usize = CELLS / 2;

/// One player's plane, right-aligned
pub(crate) const PLANE: u64 = (1 << CELLS) - 1;

/// Both planes
pub(crate) const PLANES: u64 = (1 << (2 * CELLS)) - 1;

pub(crate) const TURN_SHIFT: u32 = 2 * CELLS as u32;

/// Cells denied to the opponent by a placement: the cell itself and its
/// orthogonal neighbours, clipped at the grid edges.
pub const NEIGHBORHOODS: [u64; CELLS] = neighborhoods();

const fn neighborhoods() -> [u64; CELLS] {
    let mut table = [0u64; CELLS];
    let mut cell = 0;
    while cell < CELLS {
        let (row, col) = (cell / SIZE, cell % SIZE);
        let mut bits = 1u64 << cell;
        if row > 0 {
            bits |= 1 << (cell - SIZE);
        }
        if row + 1 < SIZE {
            bits |= 1 << (cell + SIZE);
        }
        if col > 0 {
            bits |= 1 << (cell - 1);
        }
        if col + 1 < SIZE {
            bits |= 1 << (cell + 1);
        }
        table[cell] = bits;
        cell += 1;
    }
    table
}

// ============================================================================
// PLAYER
// ============================================================================

/// Player color, decided by turn parity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First = 0,
    Second = 1,
}

impl Player {
    /// The player to move on a 0-indexed turn
    pub fn from_turn(turn: u32) -> Self {
        if turn % 2 == 0 {
            Player::First
        } else {
            Player::Second
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Bit offset of this player's plane
    pub(crate) fn shift(self) -> u32 {
        self as u32 * CELLS as u32
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "first"),
            Player::Second => write!(f, "second"),
        }
    }
}

// ============================================================================
// POSITION
// ============================================================================

/// Occupancy of both players plus the turn counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u64);

impl Position {
    /// Empty board, first turn
    pub const EMPTY: Position = Position(1 << TURN_SHIFT);

    /// The reserved "no entry" value
    pub const NULL: Position = Position(0);

    pub const fn from_raw(raw: u64) -> Self {
        Position(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// 0-indexed ply number. A raw value with a zero turn field (such as
    /// [`Position::NULL`]) reads as turn 0.
    pub fn turn(self) -> u32 {
        ((self.0 >> TURN_SHIFT) as u32).saturating_sub(1)
    }

    /// Player whose turn it is
    pub fn mover(self) -> Player {
        Player::from_turn(self.turn())
    }

    /// Place a piece for the mover and advance the turn.
    ///
    /// No legality check is made; callers consult [`crate::rules::valid`] first.
    pub fn place(self, cell: usize) -> Self {
        debug_assert!(cell < CELLS, "cell {} out of range", cell);
        let bit = 1u64 << (self.mover().shift() + cell as u32);
        Position(advance(self.0) | bit)
    }

    /// Advance the turn without placing anything
    pub fn pass(self) -> Self {
        Position(advance(self.0))
    }

    /// Occupied cells of one player, right-aligned
    pub fn plane(self, player: Player) -> u32 {
        ((self.0 >> player.shift()) & PLANE) as u32
    }

    pub fn owner(self, cell: usize) -> Option<Player> {
        if self.plane(Player::First) >> cell & 1 == 1 {
            Some(Player::First)
        } else if self.plane(Player::Second) >> cell & 1 == 1 {
            Some(Player::Second)
        } else {
            None
        }
    }

    pub fn pieces(self, player: Player) -> u32 {
        self.plane(player).count_ones()
    }

    /// Piece difference, positive when the first player is ahead
    pub fn score(self) -> i32 {
        self.pieces(Player::First) as i32 - self.pieces(Player::Second) as i32
    }
}

impl fmt::LowerHex for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

// ============================================================================
// MASK
// ============================================================================

/// Cells forbidden to each player, with the same layout and turn counter as
/// [`Position`]. Redundant with the move history but cheaper than rederiving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mask(u64);

impl Mask {
    /// Nothing forbidden, first turn
    pub const EMPTY: Mask = Mask(1 << TURN_SHIFT);

    pub const fn from_raw(raw: u64) -> Self {
        Mask(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub fn turn(self) -> u32 {
        ((self.0 >> TURN_SHIFT) as u32).saturating_sub(1)
    }

    pub fn mover(self) -> Player {
        Player::from_turn(self.turn())
    }

    /// Record a placement at `cell`: the mover may never reuse it, and the
    /// opponent loses the cell's whole neighbourhood.
    pub fn place(self, cell: usize) -> Self {
        debug_assert!(cell < CELLS, "cell {} out of range", cell);
        let who = self.mover();
        let own = 1u64 << (who.shift() + cell as u32);
        let other = NEIGHBORHOODS[cell] << who.opponent().shift();
        Mask(advance(self.0) | own | other)
    }

    pub fn pass(self) -> Self {
        Mask(advance(self.0))
    }

    /// Forbidden cells of one player, right-aligned
    pub fn forbidden(self, player: Player) -> u32 {
        ((self.0 >> player.shift()) & PLANE) as u32
    }

    pub fn is_forbidden(self, player: Player, cell: usize) -> bool {
        self.forbidden(player) >> cell & 1 == 1
    }
}

/// Bump the turn field, keeping both planes
fn advance(raw: u64) -> u64 {
    let turn = raw >> TURN_SHIFT;
    (turn + 1) << TURN_SHIFT | (raw & PLANES)
}
