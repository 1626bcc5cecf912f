pub mod brute;
pub mod dpll;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::cnf::Cnf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    /// Total model indexed by variable; slot 0 is unused.
    Sat(Vec<bool>),
    Unsat,
    /// The search saw its [`StopFlag`] raised before it finished.
    Interrupted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
}

/// Cooperative cancellation for a running search. Clones share one flag.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Entry point shared by the hand-written engines.
pub type SearchFn = fn(&Cnf, &StopFlag) -> (SatResult, SearchStats);

// free vars become gems
pub(crate) fn fill_model(assignment: &[Option<bool>]) -> Vec<bool> {
    assignment.iter().map(|v| v.unwrap_or(false)).collect()
}
