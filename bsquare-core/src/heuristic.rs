//! Heuristic move selection and its check against perfect play

use serde::Serialize;

use crate::board::Position;
use crate::error::TableError;
use crate::game::GameState;
use crate::solver::Solver;
use crate::strategy::Strategy;

/// Moves that deny the opponent the most new cells, ties included.
///
/// Moves that deny nothing new are only kept when nothing better exists. This
/// is a cheap rule of thumb and is known to misplay.
pub fn claim_space(state: GameState) -> Vec<usize> {
    let opponent = state.mover().opponent();
    let before = state.mask.forbidden(opponent).count_ones();

    let mut best = 0;
    let mut moves = Vec::new();
    for cell in state.legal_moves() {
        let gained = state.mask.place(cell).forbidden(opponent).count_ones() - before;
        if gained > best {
            best = gained;
            moves.clear();
            moves.push(cell);
        } else if gained == best {
            moves.push(cell);
        }
    }
    moves
}

/// Move list as a cell bitset
pub fn move_bits(moves: &[usize]) -> u32 {
    moves.iter().fold(0, |bits, &cell| bits | 1 << cell)
}

/// A position where the heuristic picks a move perfect play would not
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Deviation {
    pub position: Position,
    pub perfect: Vec<usize>,
    pub heuristic: Vec<usize>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct HeuristicReport {
    /// Positions compared
    pub checked: usize,
    pub deviations: Vec<Deviation>,
}

impl HeuristicReport {
    pub fn failures(&self) -> usize {
        self.deviations.len()
    }
}

/// Compare `heuristic` against the solver's suggestions at every stored
/// position where the player to move has a choice. Positions must already be
/// in the table, so run a solve first.
pub fn check_heuristic<S, H>(solver: &mut Solver<S>, heuristic: H) -> Result<HeuristicReport, TableError>
where
    S: Strategy,
    H: Fn(GameState) -> Vec<usize>,
{
    let mut report = HeuristicReport::default();
    for position in solver.positions() {
        let state = GameState::from_position(position);
        if state.must_pass() {
            continue;
        }

        let perfect = solver.suggest(state)?;
        let guessed = heuristic(state);
        report.checked += 1;

        let goal = move_bits(&perfect);
        if goal | move_bits(&guessed) != goal {
            tracing::debug!("heuristic deviates at {:#x}", position);
            report.deviations.push(Deviation { position, perfect, heuristic: guessed });
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CENTER;
    use crate::config::SolverConfig;
    use crate::strategy::{Minimax, Tally};

    #[test]
    fn test_claim_space_opening() {
        // Interior cells deny five cells, the most available.
        let moves = claim_space(GameState::new());
        assert_eq!(moves, vec![6, 7, 8, 11, 13, 16, 17, 18]);
        assert!(!moves.contains(&CENTER));
    }

    #[test]
    fn test_move_bits() {
        assert_eq!(move_bits(&[]), 0);
        assert_eq!(move_bits(&[0, 3, 24]), 1 | 1 << 3 | 1 << 24);
    }

    #[test]
    fn test_perfect_play_never_deviates() {
        let state = GameState::from_moves("1,3,5,11,15,21,23,25").unwrap();
        let config = SolverConfig::default().with_initial_capacity(1 << 12);
        let mut solver = Solver::with_config(Minimax, &config);
        solver.evaluate(state).unwrap();

        let positions = solver.table().len();
        let report = check_heuristic(&mut solver, |s| {
            let mut oracle = Solver::with_config(Minimax, &config);
            oracle.suggest(s).unwrap()
        })
        .unwrap();
        assert_eq!(report.failures(), 0);
        assert!(report.checked > 0 && report.checked <= positions);
    }

    #[test]
    fn test_claim_space_deviations_are_counted() {
        let state = GameState::from_moves("1,3,5,11,15,21,23,25").unwrap();
        let config = SolverConfig::default().with_initial_capacity(1 << 12);
        let mut solver = Solver::with_config(Minimax, &config);
        solver.evaluate(state).unwrap();

        let report = check_heuristic(&mut solver, claim_space).unwrap();
        for deviation in &report.deviations {
            let goal = move_bits(&deviation.perfect);
            assert_ne!(goal | move_bits(&deviation.heuristic), goal);
        }
        assert!(report.failures() <= report.checked);
    }

    #[test]
    fn test_tally_accepts_any_heuristic() {
        let state = GameState::from_moves("1,3,5,11,15,21,23,25").unwrap();
        let config = SolverConfig::default().with_initial_capacity(1 << 12);
        let mut solver = Solver::with_config(Tally, &config);
        solver.evaluate(state).unwrap();
        let report = check_heuristic(&mut solver, claim_space).unwrap();
        assert_eq!(report.failures(), 0);
    }
}
