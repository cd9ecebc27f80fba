//! Integration tests for the BSQUARE solver
//!
//! Tests the full stack: move parsing, rules, canonicalization, the
//! transposition table and both strategies. Whole-game solves are marked
//! `#[ignore]`; run them with `cargo test --release -- --ignored`.

use bsquare_core::{
    check_heuristic, claim_space, derive,
    GameState, Minimax, Outcomes, Player, Position, Slot, Solver, SolverConfig, Strategy, Tally,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Six plies in, corners and diagonals taken
fn midgame() -> GameState {
    GameState::from_moves("1,25,7,19,3,23").unwrap()
}

/// All four corners taken; the center is the only optimal reply
fn corners() -> GameState {
    GameState::from_moves("5,21,1,25").unwrap()
}

fn test_config() -> SolverConfig {
    SolverConfig::default().with_initial_capacity(1 << 16)
}

fn full_config() -> SolverConfig {
    SolverConfig::default().with_initial_capacity(1 << 24)
}

/// Play `plies` random moves, passing when forced, stopping at a finished game
fn random_state(rng: &mut ChaCha8Rng, plies: usize) -> GameState {
    let mut state = GameState::new();
    for _ in 0..plies {
        if state.is_complete() {
            break;
        }
        let moves: Vec<usize> = state.legal_moves().collect();
        state = if moves.is_empty() {
            state.pass()
        } else {
            state.place(moves[rng.gen_range(0..moves.len())])
        };
    }
    state
}

// ============================================================================
// SOLVER TESTS
// ============================================================================

#[test]
fn test_midgame_minimax() {
    let mut solver = Solver::with_config(Minimax, &test_config());
    let slot = solver.evaluate(midgame()).unwrap();

    assert_eq!(slot.score(), 2);
    assert_eq!(solver.table().len(), 125_342);
    assert_eq!(solver.suggest(midgame()).unwrap(), vec![9, 12, 15]);
}

#[test]
fn test_midgame_tally() {
    let mut solver = Solver::with_config(Tally, &test_config());
    let slot = solver.evaluate(midgame()).unwrap();

    assert_eq!(
        slot.outcomes,
        Outcomes { first_wins: 601_262_496, second_wins: 304_471_872, ties: 361_886_400 }
    );
    assert_eq!(solver.table().len(), 125_342);
}

#[test]
fn test_corners_center_reply() {
    let mut solver = Solver::with_config(Minimax, &test_config());
    assert_eq!(solver.evaluate(corners()).unwrap().score(), 2);
    assert_eq!(solver.table().len(), 268_682);
    assert_eq!(solver.suggest(corners()).unwrap(), vec![12]);
}

#[test]
fn test_solves_are_deterministic() {
    let mut first = Solver::with_config(Minimax, &test_config());
    let mut second = Solver::with_config(Minimax, &SolverConfig::default().with_initial_capacity(16));

    let a = first.evaluate(midgame()).unwrap();
    let b = second.evaluate(midgame()).unwrap();

    // Growth from a tiny table must not change the result
    assert_eq!(a, b);
    assert_eq!(first.table().len(), second.table().len());
    assert!(second.table().capacity() > 16);
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

#[test]
fn test_symmetric_positions_agree() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut solver = Solver::with_config(Minimax, &test_config());

    for _ in 0..20 {
        let state = random_state(&mut rng, 10);
        let score = solver.evaluate(state).unwrap().score();
        let entries = solver.table().len();

        for image in state.position.orbit() {
            assert_eq!(image.canonicalize(), state.position.canonicalize());
            let mirrored = GameState::from_position(image);
            assert_eq!(solver.evaluate(mirrored).unwrap().score(), score);
        }
        assert_eq!(solver.table().len(), entries, "mirrors must hit the cache");
    }
}

#[test]
fn test_minimax_matches_children() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut solver = Solver::with_config(Minimax, &test_config());

    for _ in 0..20 {
        let state = random_state(&mut rng, 9);
        let score = solver.evaluate(state).unwrap().score();

        if state.is_complete() {
            assert_eq!(score, state.position.score());
            continue;
        }
        if state.must_pass() {
            assert_eq!(solver.evaluate(state.pass()).unwrap().score(), score);
            continue;
        }

        let values = solver.move_values(state).unwrap();
        let scores = values.iter().flatten().copied();
        let best = match state.mover() {
            Player::First => scores.max(),
            Player::Second => scores.min(),
        };
        assert_eq!(best, Some(score));

        for cell in solver.suggest(state).unwrap() {
            assert_eq!(values[cell], Some(score));
        }
    }
}

#[test]
fn test_derive_recovers_masks() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for plies in 0..20 {
        let state = random_state(&mut rng, plies);
        assert_eq!(derive(state.position), state.mask);
        assert_eq!(GameState::from_position(state.position), state);
    }
}

#[test]
fn test_stored_positions_are_canonical() {
    let mut solver = Solver::with_config(Tally, &test_config());
    solver.evaluate(midgame()).unwrap();

    for position in solver.positions() {
        assert_eq!(position.canonicalize(), position);
        assert!(!position.is_null());
    }
}

// ============================================================================
// FULL SOLVE TESTS (slow)
// ============================================================================

#[test]
#[ignore]
fn test_full_minimax_solve() {
    let start = Instant::now();
    let mut solver = Solver::with_config(Minimax, &full_config());
    let root = solver.solve().unwrap();

    println!("Minimax solve: {} entries in {:?}", solver.table().len(), start.elapsed());
    assert_eq!(root.score(), 2);
    assert_eq!(root.position(), Position::EMPTY);
    assert_eq!(solver.table().len(), 8_659_987);
    assert_eq!(solver.suggest(GameState::new()).unwrap(), vec![6, 8, 16, 18]);

    let endings = solver.terminal_outcomes();
    assert_eq!(endings, Outcomes { first_wins: 3599, second_wins: 2506, ties: 850 });
    assert_eq!(endings.total(), 6955);
}

#[test]
#[ignore]
fn test_full_tally_solve() {
    let mut solver = Solver::with_config(Tally, &full_config());
    let root = solver.solve().unwrap();

    assert_eq!(solver.table().len(), 8_659_987);
    assert_eq!(
        root.outcomes,
        Outcomes {
            first_wins: 2_179_847_574_830_592,
            second_wins: 1_174_071_341_606_400,
            ties: 879_870_726_489_600,
        }
    );
    println!("{}", Tally.display(&root));
}

#[test]
#[ignore]
fn test_claim_space_misplays() {
    let mut solver = Solver::with_config(Minimax, &full_config());
    solver.solve().unwrap();

    let report = check_heuristic(&mut solver, claim_space).unwrap();
    println!("heuristic fails in {} of {} cases", report.failures(), report.checked);
    assert_eq!(report.checked, 8_405_376);
    assert_eq!(report.failures(), 1_905_936);
    assert!(report.checked < solver.table().len());
}
