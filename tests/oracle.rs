use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gemhunter::analysis::{Verdict, deduce, disagreements};
use gemhunter::cnf::{Cnf, Lit};
use gemhunter::grid::generate::{conceal, random_board};
use gemhunter::pipeline::{Outcome, Solution, solve_board};
use gemhunter::sat::{SatResult, StopFlag, brute, dpll};
use gemhunter::solver::Backend;

fn clause_strategy() -> impl Strategy<Value = Vec<Lit>> {
    prop::collection::vec((1u32..=8, any::<bool>()), 1..=3)
        .prop_map(|lits| lits.into_iter().map(|(v, s)| Lit::new(v, s)).collect())
}

proptest! {
    #[test]
    fn dpll_and_brute_force_agree(clauses in prop::collection::vec(clause_strategy(), 0..24)) {
        let cnf = Cnf::from_clauses(8, clauses);
        let fast = dpll::solve(&cnf);
        let slow = brute::solve(&cnf);
        match (&fast, &slow) {
            (SatResult::Sat(a), SatResult::Sat(b)) => {
                prop_assert!(cnf.is_satisfied_by(a));
                prop_assert!(cnf.is_satisfied_by(b));
                prop_assert_eq!(a.len(), 9);
                prop_assert_eq!(b.len(), 9);
            }
            (SatResult::Unsat, SatResult::Unsat) => {}
            _ => prop_assert!(false, "dpll={:?} brute={:?}", fast, slow),
        }
    }
}

#[test]
fn empty_formula_is_satisfied() {
    let cnf = Cnf::new(3);
    assert_eq!(dpll::solve(&cnf), SatResult::Sat(vec![false; 4]));
    assert!(brute::is_sat(&cnf));
}

#[test]
fn empty_clause_is_unsatisfiable() {
    let cnf = Cnf::from_clauses(2, vec![vec![Lit::pos(1)], Vec::new()]);
    assert_eq!(dpll::solve(&cnf), SatResult::Unsat);
    assert_eq!(brute::solve(&cnf), SatResult::Unsat);
}

#[test]
fn dpll_needs_backtracking_on_parity() {
    // x1 xor x2 xor x3 = 1, plus x1 = x2
    let cnf = Cnf::from_clauses(
        3,
        vec![
            vec![Lit::pos(1), Lit::pos(2), Lit::pos(3)],
            vec![Lit::pos(1), Lit::neg_of(2), Lit::neg_of(3)],
            vec![Lit::neg_of(1), Lit::pos(2), Lit::neg_of(3)],
            vec![Lit::neg_of(1), Lit::neg_of(2), Lit::pos(3)],
            vec![Lit::neg_of(1), Lit::pos(2)],
            vec![Lit::pos(1), Lit::neg_of(2)],
        ],
    );
    let (res, stats) = dpll::solve_with_stats(&cnf);
    let SatResult::Sat(model) = res else {
        panic!("parity formula reported unsat");
    };
    assert!(cnf.is_satisfied_by(&model));
    assert!(model[3]);
    assert_eq!(model[1], model[2]);
    assert!(stats.decisions >= 1);
}

#[test]
fn pure_literals_are_forced_without_branching() {
    let cnf = Cnf::from_clauses(
        3,
        vec![
            vec![Lit::pos(1), Lit::neg_of(2)],
            vec![Lit::pos(1), Lit::pos(3)],
            vec![Lit::neg_of(2), Lit::pos(3)],
        ],
    );
    let (res, stats) = dpll::solve_with_stats(&cnf);
    assert!(matches!(res, SatResult::Sat(_)));
    assert_eq!(stats.decisions, 0);
    assert!(stats.pure_literals >= 1);
}

#[test]
fn unit_clauses_propagate_without_branching() {
    // x1; x1 -> x2; x2 -> x3 | x4; x3 -> x4
    let cnf = Cnf::from_clauses(
        4,
        vec![
            vec![Lit::pos(1)],
            vec![Lit::neg_of(1), Lit::pos(2)],
            vec![Lit::neg_of(2), Lit::pos(3), Lit::pos(4)],
            vec![Lit::neg_of(3), Lit::pos(4)],
        ],
    );
    let (res, stats) = dpll::solve_with_stats(&cnf);
    let SatResult::Sat(model) = res else {
        panic!("implication chain reported unsat");
    };
    assert!(cnf.is_satisfied_by(&model));
    assert!(model[1] && model[2]);
    assert!(stats.propagations >= 2);
    assert_eq!(stats.decisions, 0);
}

#[test]
fn raised_stop_flag_interrupts_both_engines() {
    let cnf = Cnf::from_clauses(
        3,
        vec![
            vec![Lit::pos(1), Lit::pos(2)],
            vec![Lit::neg_of(1), Lit::pos(3)],
        ],
    );
    let stop = StopFlag::new();
    stop.raise();
    assert_eq!(dpll::solve_until(&cnf, &stop).0, SatResult::Interrupted);
    assert_eq!(brute::solve_until(&cnf, &stop).0, SatResult::Interrupted);

    let idle = StopFlag::new();
    assert!(matches!(dpll::solve_until(&cnf, &idle).0, SatResult::Sat(_)));
    assert!(matches!(brute::solve_until(&cnf, &idle).0, SatResult::Sat(_)));
}

#[test]
fn generated_boards_solve_consistently() {
    for seed in 0..24u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let truth = random_board(5, 5, 5, 5, &mut rng).expect("generate");
        let puzzle = conceal(&truth);

        let dpll_sol = solved(&puzzle, Backend::Dpll, seed);
        let brute_sol = solved(&puzzle, Backend::BruteForce, seed);
        let ref_sol = solved(&puzzle, Backend::Varisat, seed);

        for sol in [&dpll_sol, &brute_sol, &ref_sol] {
            assert!(sol.board.violated_clues().is_empty(), "seed {}", seed);
            assert!(sol.board.fuzzy_matches(&truth), "seed {}", seed);
            assert!(sol.board.is_fully_resolved());
        }

        let diff = disagreements(&dpll_sol.lits, &brute_sol.lits);
        if diff.is_empty() {
            continue;
        }
        let ded = deduce(&puzzle, Backend::Varisat)
            .expect("deduce")
            .expect("sat");
        for var in diff {
            let p = puzzle.point_of(var).expect("cell");
            assert_eq!(ded.get(&p), Some(&Verdict::Ambiguous), "seed {} cell {:?}", seed, p);
        }
    }
}

#[test]
fn larger_generated_boards_agree_with_reference() {
    for seed in 100..106u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let truth = random_board(9, 9, 15, 12, &mut rng).expect("generate");
        let puzzle = conceal(&truth);
        let fast = solved(&puzzle, Backend::Dpll, seed);
        let reference = solved(&puzzle, Backend::Varisat, seed);
        assert!(fast.board.violated_clues().is_empty());
        assert!(reference.board.violated_clues().is_empty());
        assert!(fast.board.fuzzy_matches(&reference.board));
    }
}

fn solved(board: &gemhunter::grid::Board, backend: Backend, seed: u64) -> Solution {
    let report = solve_board(board, backend).expect("solve");
    match report.outcome {
        Outcome::Solved(sol) => sol,
        other => panic!("seed {}: {} returned {:?}", seed, backend, other),
    }
}
