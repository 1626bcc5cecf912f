use crate::cnf::{Cnf, Lit};

use super::{SatResult, SearchStats, StopFlag, fill_model};

pub fn solve(cnf: &Cnf) -> SatResult {
    solve_with_stats(cnf).0
}

pub fn is_sat(cnf: &Cnf) -> bool {
    matches!(solve(cnf), SatResult::Sat(_))
}

/// DPLL with unit propagation and pure-literal elimination.
///
/// Depth-first over an explicit stack of owned partial assignments, so a
/// branch never observes its sibling's writes and deep formulas do not grow
/// the call stack. The true branch of every decision is explored first.
pub fn solve_with_stats(cnf: &Cnf) -> (SatResult, SearchStats) {
    solve_until(cnf, &StopFlag::new())
}

/// [`solve_with_stats`] that returns [`SatResult::Interrupted`] once `stop`
/// is raised. The flag is polled before every node.
pub fn solve_until(cnf: &Cnf, stop: &StopFlag) -> (SatResult, SearchStats) {
    let mut stats = SearchStats::default();
    let mut stack = vec![vec![None; cnf.max_var() as usize + 1]];

    while let Some(mut assignment) = stack.pop() {
        if stop.is_raised() {
            return (SatResult::Interrupted, stats);
        }
        if !simplify(cnf, &mut assignment, &mut stats) {
            stats.conflicts += 1;
            continue;
        }
        match cnf.eval_formula_partial(&assignment) {
            Some(true) => return (SatResult::Sat(fill_model(&assignment)), stats),
            Some(false) => {
                stats.conflicts += 1;
                continue;
            }
            None => {}
        }

        let Some(var) = branch_var(cnf, &assignment) else {
            continue;
        };
        stats.decisions += 1;

        let mut try_false = assignment.clone();
        try_false[var] = Some(false);
        assignment[var] = Some(true);
        stack.push(try_false);
        stack.push(assignment);
    }

    (SatResult::Unsat, stats)
}

/// Runs unit propagation and pure-literal elimination to a fixpoint.
/// Returns false on a violated clause.
fn simplify(cnf: &Cnf, assignment: &mut [Option<bool>], stats: &mut SearchStats) -> bool {
    loop {
        match unit_propagate(cnf, assignment, stats) {
            None => return false,
            Some(true) => continue,
            Some(false) => {}
        }
        if !eliminate_pure(cnf, assignment, stats) {
            return true;
        }
    }
}

/// `None` on conflict, otherwise whether anything was assigned.
fn unit_propagate(
    cnf: &Cnf,
    assignment: &mut [Option<bool>],
    stats: &mut SearchStats,
) -> Option<bool> {
    let mut any = false;
    loop {
        let mut changed = false;

        for clause in &cnf.clauses {
            let mut open_count = 0usize;
            let mut last_open = Lit::new(0, true);
            let mut has_true = false;

            for &lit in clause {
                match Cnf::eval_lit_partial(lit, assignment) {
                    Some(true) => {
                        has_true = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        open_count += 1;
                        last_open = lit;
                    }
                }
            }

            if has_true {
                continue;
            }
            if open_count == 0 {
                return None;
            }
            if open_count == 1 {
                let var = last_open.var as usize;
                match assignment[var] {
                    Some(v) if v != last_open.sign => return None,
                    Some(_) => {}
                    None => {
                        assignment[var] = Some(last_open.sign);
                        stats.propagations += 1;
                        changed = true;
                    }
                }
            }
        }

        if !changed {
            return Some(any);
        }
        any = true;
    }
}

/// Assigns every unassigned variable that occurs with a single polarity across
/// the clauses not yet satisfied. Returns whether anything was assigned.
fn eliminate_pure(cnf: &Cnf, assignment: &mut [Option<bool>], stats: &mut SearchStats) -> bool {
    let mut seen_pos = vec![false; assignment.len()];
    let mut seen_neg = vec![false; assignment.len()];

    for clause in &cnf.clauses {
        if Cnf::eval_clause_partial(clause, assignment) == Some(true) {
            continue;
        }
        for &lit in clause {
            let var = lit.var as usize;
            if assignment[var].is_some() {
                continue;
            }
            if lit.sign {
                seen_pos[var] = true;
            } else {
                seen_neg[var] = true;
            }
        }
    }

    let mut changed = false;
    for var in 1..assignment.len() {
        if seen_pos[var] != seen_neg[var] {
            assignment[var] = Some(seen_pos[var]);
            stats.pure_literals += 1;
            changed = true;
        }
    }
    changed
}

/// First unassigned variable of the first clause that is still open.
fn branch_var(cnf: &Cnf, assignment: &[Option<bool>]) -> Option<usize> {
    cnf.clauses
        .iter()
        .filter(|c| Cnf::eval_clause_partial(c, assignment).is_none())
        .flat_map(|c| c.iter())
        .map(|l| l.var as usize)
        .find(|&v| assignment[v].is_none())
}
