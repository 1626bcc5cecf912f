pub mod search_backend;
pub mod varisat;

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::cnf::Lit;
use crate::sat::{SearchStats, StopFlag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// The backend gave up or failed; says nothing about satisfiability.
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    /// Calls that ended in [`SolveResult::Unknown`].
    pub unanswered: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
}

impl SolverStats {
    pub(crate) fn absorb(&mut self, s: SearchStats) {
        self.decisions += s.decisions;
        self.propagations += s.propagations;
        self.pure_literals += s.pure_literals;
        self.conflicts += s.conflicts;
    }
}

pub trait IncrementalSolver {
    fn new_var(&mut self) -> u32;
    fn add_clause(&mut self, clause: Vec<Lit>);
    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult;
    fn model_value(&self, var: u32) -> Option<bool>;
    fn stats(&self) -> SolverStats;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Dpll,
    BruteForce,
    Varisat,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Dpll, Backend::BruteForce, Backend::Varisat];

    pub fn name(self) -> &'static str {
        match self {
            Backend::Dpll => "dpll",
            Backend::BruteForce => "brute",
            Backend::Varisat => "varisat",
        }
    }

    /// Fresh solver whose searches give up with [`SolveResult::Unknown`] once
    /// `stop` is raised. Varisat ignores the flag.
    pub fn make_solver(self, stop: StopFlag) -> Box<dyn IncrementalSolver> {
        match self {
            Backend::Dpll => Box::new(search_backend::SearchBackend::dpll(stop)),
            Backend::BruteForce => Box::new(search_backend::SearchBackend::brute_force(stop)),
            Backend::Varisat => Box::new(varisat::VarisatSolver::new()),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "dpll" => Ok(Backend::Dpll),
            "brute" => Ok(Backend::BruteForce),
            "varisat" => Ok(Backend::Varisat),
            _ => bail!("unknown backend '{}', expected dpll|brute|varisat", s),
        }
    }
}
