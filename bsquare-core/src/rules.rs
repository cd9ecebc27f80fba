//! Move legality and game termination
//!
//! A player may place on any cell that is not forbidden to them by the mask.
//! The opening move may go anywhere except the center. A player with no legal
//! cell must pass, and the game ends once neither player can ever move again.

use crate::board::{Mask, Player, Position, CELLS, CENTER, PLANE};

/// Is `cell` a legal placement for the player to move?
pub fn valid(mask: Mask, cell: usize) -> bool {
    if mask.turn() == 0 {
        cell != CENTER
    } else {
        !mask.is_forbidden(mask.mover(), cell)
    }
}

/// Legal cells for the player to move, in ascending order
pub fn legal_moves(mask: Mask) -> impl Iterator<Item = usize> {
    (0..CELLS).filter(move |&cell| valid(mask, cell))
}

/// Every cell of `player` is either occupied or forbidden
fn exhausted(position: Position, mask: Mask, player: Player) -> bool {
    (position.plane(player) | mask.forbidden(player)) as u64 == PLANE
}

/// True when the player to move has nowhere to place and must pass
pub fn no_moves(position: Position, mask: Mask) -> bool {
    exhausted(position, mask, position.mover())
}

/// True when neither player can move again
pub fn is_complete(position: Position, mask: Mask) -> bool {
    exhausted(position, mask, Player::First) && exhausted(position, mask, Player::Second)
}

/// Rebuild the mask for `position` from its occupancy alone.
///
/// Each player's placements are replayed in ascending cell order, alternating
/// players, until the replay reaches the position's turn. A player whose
/// placements have run out is replayed as a pass.
///
/// Forbidden sets are unions and do not depend on placement order, so the
/// replay is exact for any position reached by alternating play. It silently
/// drops placements when a player holds more pieces than their share of the
/// turns (a raw value no game can produce).
pub fn derive(position: Position) -> Mask {
    let cells = |player: Player| -> Vec<usize> {
        let plane = position.plane(player);
        (0..CELLS).filter(|&cell| plane >> cell & 1 == 1).collect()
    };
    let moves = [cells(Player::First), cells(Player::Second)];

    let mut mask = Mask::EMPTY;
    let mut ply = 0;
    while mask.turn() < position.turn() {
        let replayed = &moves[ply % 2];
        mask = match replayed.get(ply / 2) {
            Some(&cell) => mask.place(cell),
            None => mask.pass(),
        };
        ply += 1;
    }
    mask
}
