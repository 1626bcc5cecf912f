use log::warn;
use varisat::ExtendFormula;

use crate::cnf::Lit;
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

/// Off-the-shelf CDCL solver used to cross-check the hand-written engines.
///
/// Cell variables are 1-based here and 0-based inside varisat: `cells[i]`
/// stands for cell variable `i + 1`. Variables are created on first mention,
/// so a clause over a cell the caller never announced still lands on its own
/// variable. Varisat has no interrupt hook, so a [`crate::sat::StopFlag`]
/// does not reach it.
pub struct VarisatSolver {
    inner: varisat::Solver<'static>,
    cells: Vec<varisat::Var>,
    clauses: usize,
    /// Trap/gem value per cell variable from the last satisfiable call; slot 0 unused.
    traps: Option<Vec<bool>>,
    stats: SolverStats,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            inner: varisat::Solver::new(),
            cells: Vec::new(),
            clauses: 0,
            traps: None,
            stats: SolverStats::default(),
        }
    }

    fn translate(&mut self, lit: Lit) -> Option<varisat::Lit> {
        let idx = (lit.var as usize).checked_sub(1)?;
        while self.cells.len() <= idx {
            self.new_var();
        }
        Some(self.cells[idx].lit(lit.sign))
    }

    fn translate_all(&mut self, lits: &[Lit]) -> Vec<varisat::Lit> {
        lits.iter().filter_map(|&l| self.translate(l)).collect()
    }

    fn read_traps(&self) -> Option<Vec<bool>> {
        let model = self.inner.model()?;
        let mut traps = vec![false; self.cells.len() + 1];
        for lit in model {
            if let Some(slot) = traps.get_mut(lit.var().index() + 1) {
                *slot = lit.is_positive();
            }
        }
        Some(traps)
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalSolver for VarisatSolver {
    fn new_var(&mut self) -> u32 {
        self.cells.push(self.inner.new_var());
        self.cells.len() as u32
    }

    fn add_clause(&mut self, clause: Vec<Lit>) {
        let lits = self.translate_all(&clause);
        self.inner.add_clause(&lits);
        self.clauses += 1;
    }

    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        self.stats.solve_calls += 1;
        self.traps = None;
        let assumed = self.translate_all(assumptions);
        self.inner.assume(&assumed);

        let result = match self.inner.solve() {
            Ok(true) => match self.read_traps() {
                Some(traps) => {
                    self.traps = Some(traps);
                    SolveResult::Sat
                }
                None => {
                    warn!("varisat reported sat without a model");
                    SolveResult::Unknown
                }
            },
            Ok(false) => SolveResult::Unsat,
            Err(err) => {
                warn!(
                    "varisat gave no answer on {} cells, {} clauses, {} assumptions: {}",
                    self.cells.len(),
                    self.clauses,
                    assumed.len(),
                    err
                );
                SolveResult::Unknown
            }
        };
        if result == SolveResult::Unknown {
            self.stats.unanswered += 1;
        }
        result
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        if var == 0 {
            return None;
        }
        self.traps.as_ref()?.get(var as usize).copied()
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }
}
