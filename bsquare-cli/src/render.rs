//! Text rendering of boards and per-move values
//!
//! Plain output uses letters; `color` switches to ANSI escapes with blue for
//! the first player and red for the second.

use bsquare_core::{GameState, Player, CELLS, SIZE};

const BLUE: &str = "\x1b[94m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const RESET: &str = "\x1b[0m";

fn paint(text: &str, ansi: &str) -> String {
    format!("{}{}{}", ansi, text, RESET)
}

/// One character per cell.
///
/// Plain legend: `X`/`O` pieces of the first/second player, `x` a cell denied
/// to the second player, `o` a cell denied to the first, `#` denied to both.
pub fn board(state: &GameState, color: bool) -> String {
    let mut out = String::new();
    for cell in 0..CELLS {
        let denied_first = state.mask.is_forbidden(Player::First, cell);
        let denied_second = state.mask.is_forbidden(Player::Second, cell);
        let (plain, fancy, ansi) = match state.position.owner(cell) {
            Some(Player::First) => ("X", "X", BLUE),
            Some(Player::Second) => ("O", "X", RED),
            None if denied_first && denied_second => ("#", "~", YELLOW),
            None if denied_second => ("x", "~", BLUE),
            None if denied_first => ("o", "~", RED),
            None => (".", ".", ""),
        };
        let glyph = if color && !ansi.is_empty() {
            paint(fancy, ansi)
        } else {
            plain.to_string()
        };
        out.push_str(&glyph);
        if cell % SIZE == SIZE - 1 {
            out.push('\n');
        }
    }
    out
}

/// Perfect-play score of each cell: `-` where illegal, `0` for an even game,
/// otherwise the margin in hex, signed in plain output and coloured by the
/// winning side otherwise.
pub fn values(values: &[Option<i32>], color: bool) -> String {
    let mut out = String::new();
    for (cell, value) in values.iter().enumerate() {
        let text = match (*value, color) {
            (None, true) => "-".to_string(),
            (None, false) => "  -".to_string(),
            (Some(0), true) => "0".to_string(),
            (Some(0), false) => "  0".to_string(),
            (Some(v), true) => paint(&format!("{:x}", v.abs()), if v > 0 { BLUE } else { RED }),
            (Some(v), false) => {
                let sign = if v > 0 { '+' } else { '-' };
                format!("{:>3}", format!("{}{:x}", sign, v.abs()))
            }
        };
        out.push_str(&text);
        if cell % SIZE == SIZE - 1 {
            out.push('\n');
        }
    }
    out
}

/// Cells as the 1-based numbers players type
pub fn move_list(moves: &[usize]) -> String {
    moves
        .iter()
        .map(|cell| (cell + 1).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
