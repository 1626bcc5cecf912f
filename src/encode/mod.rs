pub mod distribute;
pub mod dnf;

use log::debug;

use crate::cnf::{Clause, Cnf};
use crate::grid::Board;

use self::distribute::dnf_to_cnf;
use self::dnf::{ClueConstraint, clue_constraints, exactly_k};

/// Clauses for a single clue cell.
pub fn encode_constraint(c: &ClueConstraint) -> Vec<Clause> {
    dnf_to_cnf(&exactly_k(&c.vars, c.count))
}

/// Formula over sparse variable ids (`num_vars` = cell count) for every clue
/// cell, in row-major order.
pub fn encode_board(board: &Board) -> Cnf {
    let (width, height) = board.dims();
    let mut cnf = Cnf::new((width * height) as u32);
    for c in clue_constraints(board) {
        let clauses = encode_constraint(&c);
        debug!(
            "clue ({}, {})={} over {} hidden cells -> {} clauses",
            c.cell.x,
            c.cell.y,
            c.count,
            c.vars.len(),
            clauses.len()
        );
        cnf.extend_clauses(clauses);
    }
    cnf
}
