use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use log::{debug, info};

use crate::cnf::{Cnf, Lit};
use crate::encode::encode_board;
use crate::grid::Board;
use crate::remap::VarMap;
use crate::sat::StopFlag;
use crate::solver::{Backend, IncrementalSolver, SolveResult, SolverStats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// One literal per hidden cell over sparse ids, ascending by cell.
    pub lits: Vec<Lit>,
    /// The input board with every hidden cell painted as trap or gem.
    pub board: Board,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    Unsatisfiable,
    /// No answer within the time bound, or the backend failed.
    Inconclusive,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Solved(_) => "sat",
            Outcome::Unsatisfiable => "unsat",
            Outcome::Inconclusive => "inconclusive",
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub backend: Backend,
    pub hidden: usize,
    pub clauses: usize,
    pub outcome: Outcome,
    pub stats: SolverStats,
    pub elapsed: Duration,
}

/// Formula for a board in the dense numbering, plus the map back to cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseFormula {
    pub cnf: Cnf,
    pub map: VarMap,
}

pub fn dense_formula(board: &Board) -> Result<DenseFormula> {
    let sparse = encode_board(board);
    let map = VarMap::from_board(board);
    let cnf = map
        .to_dense(&sparse)
        .map_err(|e| anyhow!("encoder produced a clause outside the hidden cells: {}", e))?;
    debug!(
        "remapped {} hidden cells, {} clauses",
        map.len(),
        cnf.clauses.len()
    );
    Ok(DenseFormula { cnf, map })
}

/// Loads a dense formula into a fresh solver of the given kind.
pub fn load_solver(formula: &DenseFormula, backend: Backend) -> Box<dyn IncrementalSolver> {
    load_solver_until(formula, backend, StopFlag::new())
}

pub fn load_solver_until(
    formula: &DenseFormula,
    backend: Backend,
    stop: StopFlag,
) -> Box<dyn IncrementalSolver> {
    let mut solver = backend.make_solver(stop);
    for _ in 0..formula.map.len() {
        solver.new_var();
    }
    for clause in &formula.cnf.clauses {
        solver.add_clause(clause.clone());
    }
    solver
}

/// Reads the solver's current model back into sparse literals.
pub fn read_model<S: IncrementalSolver + ?Sized>(solver: &S, map: &VarMap) -> Result<Vec<Lit>> {
    let dense = (1..=map.len() as u32)
        .map(|v| Lit::new(v, solver.model_value(v).unwrap_or(false)))
        .collect::<Vec<_>>();
    Ok(map.from_dense(&dense)?)
}

pub fn solve_board(board: &Board, backend: Backend) -> Result<SolveReport> {
    solve_board_until(board, backend, &StopFlag::new())
}

/// [`solve_board`] that ends in [`Outcome::Inconclusive`] once `stop` is raised.
pub fn solve_board_until(board: &Board, backend: Backend, stop: &StopFlag) -> Result<SolveReport> {
    let start = Instant::now();
    let formula = dense_formula(board)?;
    let mut solver = load_solver_until(&formula, backend, stop.clone());

    let outcome = match solver.solve(&[]) {
        SolveResult::Sat => {
            let lits = read_model(solver.as_ref(), &formula.map)?;
            let mut painted = board.clone();
            painted.apply_model(&lits)?;
            Outcome::Solved(Solution {
                lits,
                board: painted,
            })
        }
        SolveResult::Unsat => Outcome::Unsatisfiable,
        SolveResult::Unknown => Outcome::Inconclusive,
    };

    let report = SolveReport {
        backend,
        hidden: formula.map.len(),
        clauses: formula.cnf.clauses.len(),
        outcome,
        stats: solver.stats(),
        elapsed: start.elapsed(),
    };
    info!(
        "{}: {} in {:?} ({} hidden, {} clauses, {} decisions)",
        backend,
        report.outcome.label(),
        report.elapsed,
        report.hidden,
        report.clauses,
        report.stats.decisions
    );
    Ok(report)
}

/// Like [`solve_board`] but gives up after `timeout`, reporting
/// [`Outcome::Inconclusive`]. On timeout the worker's stop flag is raised, so
/// the hand-written engines quit at their next search node; a varisat worker
/// runs to completion in the background.
pub fn solve_board_with_timeout(
    board: &Board,
    backend: Backend,
    timeout: Duration,
) -> Result<SolveReport> {
    let start = Instant::now();
    let work = board.clone();
    let stop = StopFlag::new();
    let worker_stop = stop.clone();
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let report = solve_board_until(&work, backend, &worker_stop);
        let _ = tx.send(report);
    });

    match rx.recv_timeout(timeout) {
        Ok(report) => report,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            stop.raise();
            info!("{}: gave up after {:?}", backend, timeout);
            Ok(SolveReport {
                backend,
                hidden: board.cells().filter(|(_, c)| c.is_hidden()).count(),
                clauses: 0,
                outcome: Outcome::Inconclusive,
                stats: SolverStats::default(),
                elapsed: start.elapsed(),
            })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(anyhow!("{} solver thread exited without a result", backend))
        }
    }
}
