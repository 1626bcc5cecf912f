use crate::cnf::{Cnf, Lit};
use crate::sat::{SatResult, SearchFn, StopFlag, brute, dpll};
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

/// Session over one of the hand-written engines. The formula is kept and the
/// search reruns from scratch on every call, with assumptions added as unit
/// clauses to a copy.
#[derive(Debug, Clone)]
pub struct SearchBackend {
    search: SearchFn,
    stop: StopFlag,
    cnf: Cnf,
    last_model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl SearchBackend {
    pub fn new(search: SearchFn, stop: StopFlag) -> Self {
        Self {
            search,
            stop,
            cnf: Cnf::new(0),
            last_model: None,
            stats: SolverStats::default(),
        }
    }

    pub fn dpll(stop: StopFlag) -> Self {
        Self::new(dpll::solve_until, stop)
    }

    pub fn brute_force(stop: StopFlag) -> Self {
        Self::new(brute::solve_until, stop)
    }
}

impl IncrementalSolver for SearchBackend {
    fn new_var(&mut self) -> u32 {
        self.cnf.fresh_var()
    }

    fn add_clause(&mut self, clause: Vec<Lit>) {
        self.cnf.add_clause(clause);
    }

    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        self.stats.solve_calls += 1;
        let mut work = self.cnf.clone();
        work.extend_clauses(assumptions.iter().map(|&a| vec![a]));

        let (result, search) = (self.search)(&work, &self.stop);
        self.stats.absorb(search);
        self.last_model = None;
        match result {
            SatResult::Sat(m) => {
                self.last_model = Some(m);
                SolveResult::Sat
            }
            SatResult::Unsat => SolveResult::Unsat,
            SatResult::Interrupted => {
                self.stats.unanswered += 1;
                SolveResult::Unknown
            }
        }
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        self.last_model.as_ref()?.get(var as usize).copied()
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }
}
