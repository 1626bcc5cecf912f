use gemhunter::analysis::{Verdict, deduce};
use gemhunter::cnf::dimacs::to_dimacs;
use gemhunter::encode::dnf::clue_constraints;
use gemhunter::encode::encode_board;
use gemhunter::grid::text::parse_board_str;
use gemhunter::grid::{Cell, Point};
use gemhunter::pipeline::{Outcome, dense_formula, solve_board};
use gemhunter::solver::Backend;

const STRIPE: &str = "\
1,1,1
_,_,_
1,1,1
";

#[test]
fn stripe_has_a_single_trap_in_the_middle() {
    let board = parse_board_str(STRIPE).expect("parse");
    for backend in Backend::ALL {
        let report = solve_board(&board, backend).expect("solve");
        let Outcome::Solved(sol) = report.outcome else {
            panic!("{} found no solution", backend);
        };
        assert_eq!(report.hidden, 3);
        assert!(sol.board.is_fully_resolved());
        assert!(sol.board.violated_clues().is_empty());
        assert_eq!(sol.board.at(0, 1), Ok(Cell::Gem));
        assert_eq!(sol.board.at(1, 1), Ok(Cell::Trap));
        assert_eq!(sol.board.at(2, 1), Ok(Cell::Gem));
        assert_eq!(sol.lits.iter().map(|l| l.to_dimacs()).collect::<Vec<_>>(), vec![-4, 5, -6]);
    }
}

#[test]
fn stripe_rejects_uniform_middle_rows() {
    let board = parse_board_str(STRIPE).expect("parse");
    let formula = dense_formula(&board).expect("encode");
    assert_eq!(formula.map.sparse_ids(), &[4, 5, 6]);
    assert!(!formula.cnf.is_satisfied_by(&[false, true, true, true]));
    assert!(!formula.cnf.is_satisfied_by(&[false, false, false, false]));
    assert!(formula.cnf.is_satisfied_by(&[false, false, true, false]));
}

#[test]
fn clue_scan_is_row_major() {
    let board = parse_board_str(STRIPE).expect("parse");
    let cells = clue_constraints(&board)
        .into_iter()
        .map(|c| c.cell)
        .collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(2, 2),
        ]
    );
    assert_eq!(clue_constraints(&board)[1].vars, vec![4, 5, 6]);
    assert_eq!(encode_board(&board), encode_board(&board));
}

#[test]
fn clue_larger_than_its_neighbourhood_is_unsatisfiable() {
    let board = parse_board_str("3,_\n_,1\n").expect("parse");
    for backend in Backend::ALL {
        let report = solve_board(&board, backend).expect("solve");
        assert_eq!(report.outcome, Outcome::Unsatisfiable, "{}", backend);
    }
    assert_eq!(deduce(&board, Backend::Dpll).expect("deduce"), None);
}

#[test]
fn board_without_hidden_cells_solves_to_itself() {
    let board = parse_board_str("0,0\n0,0\n").expect("parse");
    let report = solve_board(&board, Backend::Dpll).expect("solve");
    let Outcome::Solved(sol) = report.outcome else {
        panic!("trivial board reported as {:?}", report.outcome);
    };
    assert!(sol.lits.is_empty());
    assert_eq!(sol.board, board);
    assert_eq!(report.clauses, 0);
}

#[test]
fn deduce_marks_forced_and_ambiguous_cells() {
    let board = parse_board_str(STRIPE).expect("parse");
    let ded = deduce(&board, Backend::Dpll).expect("deduce").expect("sat");
    let verdicts = ded.values().copied().collect::<Vec<_>>();
    assert_eq!(
        verdicts,
        vec![Verdict::ForcedGem, Verdict::ForcedTrap, Verdict::ForcedGem]
    );

    let open = parse_board_str("1,_\n_,_\n").expect("parse");
    let ded = deduce(&open, Backend::Varisat).expect("deduce").expect("sat");
    assert_eq!(ded.len(), 3);
    assert!(ded.values().all(|&v| v == Verdict::Ambiguous));
    assert_eq!(ded.keys().next(), Some(&Point::new(1, 0)));
}

#[test]
fn dense_formula_exports_as_dimacs() {
    let board = parse_board_str(STRIPE).expect("parse");
    let formula = dense_formula(&board).expect("encode");
    let text = to_dimacs(&formula.cnf);
    let header = text.lines().next().unwrap_or("");
    assert_eq!(header, format!("p cnf 3 {}", formula.cnf.clauses.len()));
    assert!(text.lines().skip(1).all(|l| l.ends_with(" 0")));
}
