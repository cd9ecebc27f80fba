//! Exhaustive game-tree solver
//!
//! Walks every position reachable from a state, memoizing one slot per
//! canonical position in a transposition table. The game is finite and every
//! ply advances the turn counter, so the recursion always terminates and its
//! depth is bounded by the number of plies in a game.

use std::cmp::Ordering;

use crate::board::{Position, CELLS};
use crate::config::SolverConfig;
use crate::error::TableError;
use crate::game::GameState;
use crate::rules;
use crate::strategy::{Minimax, Outcomes, Slot, Strategy};
use crate::table::{Probe, TranspositionTable};

/// Memoizing evaluator over a pluggable [`Strategy`]
pub struct Solver<S: Strategy> {
    strategy: S,
    table: TranspositionTable<S::Slot>,
}

impl<S: Strategy> Solver<S> {
    pub fn new(strategy: S) -> Self {
        Self::with_config(strategy, &SolverConfig::default())
    }

    pub fn with_config(strategy: S, config: &SolverConfig) -> Self {
        Self {
            strategy,
            table: TranspositionTable::with_capacity(config.initial_capacity)
                .with_limit(config.max_entries),
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn table(&self) -> &TranspositionTable<S::Slot> {
        &self.table
    }

    /// Evaluate the whole game from the empty board
    pub fn solve(&mut self) -> Result<S::Slot, TableError> {
        tracing::debug!(strategy = self.strategy.name(), "solving from the empty board");
        let slot = self.evaluate(GameState::new())?;
        tracing::debug!(entries = self.table.len(), "solve finished");
        Ok(slot)
    }

    /// Evaluate `state`, returning a slot labelled with its canonical position.
    pub fn evaluate(&mut self, state: GameState) -> Result<S::Slot, TableError> {
        let canonical = state.position.canonicalize();

        // The placeholder goes in before recursing so a full table is
        // reported before descending any further.
        if let Probe::Found(slot) = self.table.insert(self.strategy.init(canonical))? {
            return Ok(slot);
        }

        let slot = if state.is_complete() {
            self.strategy.score(canonical)
        } else if state.must_pass() {
            let child = self.evaluate(state.pass())?;
            self.strategy.relabel(child, canonical)
        } else {
            let mut folded = self.strategy.init(canonical);
            for cell in state.legal_moves() {
                let child = self.evaluate(state.place(cell))?;
                let child = self.strategy.relabel(child, canonical);
                folded = self.strategy.combine(folded, child);
            }
            folded
        };

        self.table.store(slot);
        Ok(slot)
    }

    /// The legal cells tied for best under the strategy's ordering.
    ///
    /// Empty when the player to move must pass. Every legal cell ties under a
    /// strategy without an ordering.
    pub fn suggest(&mut self, state: GameState) -> Result<Vec<usize>, TableError> {
        let mut best = self.strategy.init(state.position);
        let mut moves = Vec::new();
        for cell in state.legal_moves() {
            let slot = self.evaluate(state.place(cell))?;
            let slot = self.strategy.relabel(slot, state.position);
            match self.strategy.compare(&slot, &best) {
                Ordering::Greater => {
                    best = slot;
                    moves.clear();
                    moves.push(cell);
                }
                Ordering::Equal => moves.push(cell),
                Ordering::Less => {}
            }
        }
        Ok(moves)
    }

    /// Child results for every cell, `None` where the cell is illegal
    pub fn move_slots(&mut self, state: GameState) -> Result<[Option<S::Slot>; CELLS], TableError> {
        let mut slots = [None; CELLS];
        for cell in state.legal_moves() {
            slots[cell] = Some(self.evaluate(state.place(cell))?);
        }
        Ok(slots)
    }

    /// Canonical positions currently in the table
    pub fn positions(&self) -> Vec<Position> {
        self.table.iter().map(Slot::position).collect()
    }
}

impl Solver<Minimax> {
    /// Perfect-play score for each cell, `None` where the cell is illegal
    pub fn move_values(&mut self, state: GameState) -> Result<[Option<i32>; CELLS], TableError> {
        Ok(self.move_slots(state)?.map(|slot| slot.map(|s| s.score())))
    }

    /// Classify every finished game stored in the table by its winner
    pub fn terminal_outcomes(&self) -> Outcomes {
        self.table
            .iter()
            .filter(|slot| {
                let position = slot.position();
                rules::is_complete(position, rules::derive(position))
            })
            .map(|slot| Outcomes::classify(slot.score()))
            .fold(Outcomes::default(), |acc, o| acc + o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mask;
    use crate::strategy::Tally;

    /// Eight plies in, with 711 canonical positions below.
    fn endgame() -> GameState {
        GameState::from_moves("1,3,5,11,15,21,23,25").unwrap()
    }

    fn small_config() -> SolverConfig {
        SolverConfig::default().with_initial_capacity(1 << 12)
    }

    #[test]
    fn test_endgame_minimax() {
        let state = endgame();
        assert_eq!(state.position.raw(), 0x26200808404011);
        assert_eq!(state.mask, Mask::from_raw(0x27f4cc7ff8ccbf));

        let mut solver = Solver::with_config(Minimax, &small_config());
        let slot = solver.evaluate(state).unwrap();
        assert_eq!(slot.score(), 1);
        assert_eq!(slot.position().raw(), 0x2420800b400410);
        assert_eq!(solver.table().len(), 711);
        assert_eq!(solver.suggest(state).unwrap(), vec![6, 8, 12, 16]);
    }

    #[test]
    fn test_endgame_tally() {
        let state = endgame();
        let mut solver = Solver::with_config(Tally, &small_config());
        let slot = solver.evaluate(state).unwrap();
        assert_eq!(
            slot.outcomes,
            Outcomes { first_wins: 2028, second_wins: 848, ties: 1332 }
        );
        assert_eq!(solver.table().len(), 711);
        // Without an ordering every legal move is suggested.
        assert_eq!(
            solver.suggest(state).unwrap(),
            state.legal_moves().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_cached_evaluation_is_stable() {
        let state = endgame();
        let mut solver = Solver::with_config(Minimax, &small_config());
        let first = solver.evaluate(state).unwrap();
        let entries = solver.table().len();
        let again = solver.evaluate(state).unwrap();
        assert_eq!(first, again);
        assert_eq!(solver.table().len(), entries);
    }

    #[test]
    fn test_symmetric_states_share_entries() {
        let state = endgame();
        let mut solver = Solver::with_config(Minimax, &small_config());
        let slot = solver.evaluate(state).unwrap();
        let entries = solver.table().len();

        for image in state.position.orbit() {
            let mirrored = GameState::from_position(image);
            assert_eq!(solver.evaluate(mirrored).unwrap(), slot);
        }
        assert_eq!(solver.table().len(), entries);
    }

    #[test]
    fn test_minimax_soundness() {
        let state = endgame();
        let mut solver = Solver::with_config(Minimax, &small_config());
        let slot = solver.evaluate(state).unwrap();

        let canonical = state.position.canonicalize();
        let mut folded = Minimax.init(canonical);
        for cell in state.legal_moves() {
            let child = solver.evaluate(state.place(cell)).unwrap();
            folded = Minimax.combine(folded, Minimax.relabel(child, canonical));
        }
        assert_eq!(folded, slot);
    }

    #[test]
    fn test_forced_pass_is_relabelled() {
        let state = GameState::from_moves("3,13,9,20,22,1,11,5,23,15,17,19,21,25,7").unwrap();
        assert!(state.must_pass());

        let mut solver = Solver::with_config(Minimax, &small_config());
        let slot = solver.evaluate(state).unwrap();
        assert_eq!(slot.score(), 2);
        assert_eq!(slot.position(), state.position.canonicalize());
        assert_eq!(solver.table().len(), 3);
        assert!(solver.suggest(state).unwrap().is_empty());
    }

    #[test]
    fn test_terminal_state() {
        let state = GameState::from_moves("23,13,10,25,6,14,11,3,17,4,1,19,22,8,21,20,16").unwrap();
        assert!(state.is_complete());

        let mut solver = Solver::with_config(Tally, &small_config());
        let slot = solver.evaluate(state).unwrap();
        assert_eq!(slot.outcomes, Outcomes { first_wins: 1, second_wins: 0, ties: 0 });
        assert_eq!(solver.table().len(), 1);
    }

    #[test]
    fn test_terminal_outcomes_cover_endings() {
        let state = endgame();
        let mut solver = Solver::with_config(Minimax, &small_config());
        solver.evaluate(state).unwrap();
        let outcomes = solver.terminal_outcomes();
        assert!(outcomes.total() > 0);
        assert!(outcomes.total() < solver.table().len() as u64);
    }

    #[test]
    fn test_move_values() {
        let state = endgame();
        let mut solver = Solver::with_config(Minimax, &small_config());
        let values = solver.move_values(state).unwrap();
        let best = values.iter().flatten().max().copied();
        assert_eq!(best, Some(1));
        for cell in 0..CELLS {
            assert_eq!(values[cell].is_some(), state.is_valid(cell));
        }
        for cell in [6, 8, 12, 16] {
            assert_eq!(values[cell], Some(1));
        }
    }

    #[test]
    fn test_limit_aborts_solve() {
        let config = small_config().with_max_entries(Some(100));
        let mut solver = Solver::with_config(Minimax, &config);
        assert_eq!(
            solver.evaluate(endgame()),
            Err(TableError::CapacityExceeded { limit: 100 })
        );
    }
}
