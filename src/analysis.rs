use anyhow::{Result, bail};
use indexmap::IndexMap;

use crate::cnf::Lit;
use crate::grid::{Board, Point};
use crate::pipeline::{dense_formula, load_solver, read_model};
use crate::solver::{Backend, SolveResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    ForcedTrap,
    ForcedGem,
    /// Some solution has a trap here and another has a gem.
    Ambiguous,
}

/// Verdict per hidden cell, in grid scan order.
pub type Deductions = IndexMap<Point, Verdict>;

/// Classifies every hidden cell. `Ok(None)` when the puzzle has no solution.
pub fn deduce(board: &Board, backend: Backend) -> Result<Option<Deductions>> {
    let formula = dense_formula(board)?;
    let mut solver = load_solver(&formula, backend);
    match solver.solve(&[]) {
        SolveResult::Sat => {}
        SolveResult::Unsat => return Ok(None),
        SolveResult::Unknown => bail!("{} backend gave no answer", backend),
    }
    let first = read_model(solver.as_ref(), &formula.map)?;

    let mut out = Deductions::with_capacity(first.len());
    for lit in first {
        let dense = formula.map.lit_to_dense(lit)?;
        let verdict = match solver.solve(&[dense.neg()]) {
            SolveResult::Unsat if lit.sign => Verdict::ForcedTrap,
            SolveResult::Unsat => Verdict::ForcedGem,
            SolveResult::Sat => Verdict::Ambiguous,
            SolveResult::Unknown => bail!("{} backend gave no answer", backend),
        };
        let point = board
            .point_of(lit.var)
            .ok_or_else(|| anyhow::anyhow!("variable {} is not a cell", lit.var))?;
        out.insert(point, verdict);
    }
    Ok(Some(out))
}

/// Cells on which two models of the same board disagree.
pub fn disagreements(a: &[Lit], b: &[Lit]) -> Vec<u32> {
    a.iter()
        .zip(b)
        .filter(|(x, y)| x.var == y.var && x.sign != y.sign)
        .map(|(x, _)| x.var)
        .collect()
}
