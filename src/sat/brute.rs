use crate::cnf::Cnf;

use super::{SatResult, SearchStats, StopFlag, fill_model};

pub fn solve(cnf: &Cnf) -> SatResult {
    solve_with_stats(cnf).0
}

pub fn is_sat(cnf: &Cnf) -> bool {
    matches!(solve(cnf), SatResult::Sat(_))
}

/// Exhaustive search: variables `1..=max_var` in order, true before false,
/// abandoning a branch only once some clause is fully assigned and false.
/// No propagation of any kind.
pub fn solve_with_stats(cnf: &Cnf) -> (SatResult, SearchStats) {
    solve_until(cnf, &StopFlag::new())
}

/// [`solve_with_stats`] that unwinds with [`SatResult::Interrupted`] once
/// `stop` is raised.
pub fn solve_until(cnf: &Cnf, stop: &StopFlag) -> (SatResult, SearchStats) {
    let mut stats = SearchStats::default();
    let num_vars = cnf.max_var() as usize;
    let mut assignment = vec![None; num_vars + 1];
    let found = search(cnf, &mut assignment, 1, &mut stats, stop);
    let result = if found {
        SatResult::Sat(fill_model(&assignment))
    } else if stop.is_raised() {
        SatResult::Interrupted
    } else {
        SatResult::Unsat
    };
    (result, stats)
}

// A raised flag fails every open branch, so the recursion unwinds as "no model".
fn search(
    cnf: &Cnf,
    assignment: &mut [Option<bool>],
    next: usize,
    stats: &mut SearchStats,
    stop: &StopFlag,
) -> bool {
    if stop.is_raised() {
        return false;
    }
    if cnf.has_violated_clause(assignment) {
        stats.conflicts += 1;
        return false;
    }
    if next >= assignment.len() {
        return true;
    }

    stats.decisions += 1;
    for value in [true, false] {
        let mut branch = assignment.to_vec();
        branch[next] = Some(value);
        if search(cnf, &mut branch, next + 1, stats, stop) {
            assignment.copy_from_slice(&branch);
            return true;
        }
    }
    false
}
