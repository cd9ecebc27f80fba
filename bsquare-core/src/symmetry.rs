//! Board symmetries
//!
//! The square grid has eight symmetries (rotations and reflections). They are
//! generated by two bit permutations, a transpose about the 0-6-12-18-24
//! diagonal and a vertical flip. Alternating the two walks the whole group and
//! lands back on the identity after eight steps. Bits above the planes (the
//! turn counter) pass through untouched.

use crate::board::Position;

/// Number of elements in the symmetry group
pub const ORDER: usize = 8;

/// Reflect across the main diagonal: cell (row, col) moves to (col, row).
pub fn transpose(raw: u64) -> u64 {
    ((raw >> 16) & 0x00000020000010)
        | ((raw >> 12) & 0x00000410000208)
        | ((raw >> 8) & 0x00008208004104)
        | ((raw >> 4) & 0x00104104082082)
        | (raw & 0xfe082083041041)
        | ((raw << 4) & 0x01041040820820)
        | ((raw << 8) & 0x00820800410400)
        | ((raw << 12) & 0x00410000208000)
        | ((raw << 16) & 0x00200000100000)
}

/// Reflect top to bottom: cell (row, col) moves to (4 - row, col).
pub fn flip(raw: u64) -> u64 {
    ((raw >> 20) & 0x0000003e00001f)
        | ((raw >> 10) & 0x000007c00003e0)
        | (raw & 0xfc00f800007c00)
        | ((raw << 10) & 0x001f00000f8000)
        | ((raw << 20) & 0x03e00001f00000)
}

/// Every image of `raw` under the group, starting with `raw` itself.
///
/// Images are produced by applying transpose, flip, transpose, ... in turn,
/// so element `k` is the composition of the first `k` generator steps.
pub fn orbit(raw: u64) -> [u64; ORDER] {
    let mut images = [raw; ORDER];
    for k in 1..ORDER {
        let prev = images[k - 1];
        images[k] = if k % 2 == 1 { transpose(prev) } else { flip(prev) };
    }
    images
}

impl Position {
    pub fn transpose(self) -> Self {
        Position::from_raw(transpose(self.raw()))
    }

    pub fn flip(self) -> Self {
        Position::from_raw(flip(self.raw()))
    }

    /// The numerically smallest member of this position's symmetry orbit.
    ///
    /// Positions that differ only by a rotation or reflection of the board
    /// share one canonical form, which is what the transposition table keys on.
    pub fn canonicalize(self) -> Self {
        let mut b = self.raw();
        let mut c = b;
        for k in 1..ORDER {
            b = if k % 2 == 1 { transpose(b) } else { flip(b) };
            c = c.min(b);
        }
        Position::from_raw(c)
    }

    pub fn orbit(self) -> [Position; ORDER] {
        orbit(self.raw()).map(Position::from_raw)
    }
}
