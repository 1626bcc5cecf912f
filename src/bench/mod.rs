use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::info;

use crate::grid::text::load_board;
use crate::pipeline::{Outcome, solve_board_with_timeout};
use crate::solver::Backend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchRow {
    pub path: String,
    pub status: String,
    pub backend: String,
    pub wall_ms: Option<u128>,
    pub hidden: Option<usize>,
    pub clauses: Option<usize>,
    pub decisions: Option<usize>,
    pub conflicts: Option<usize>,
}

impl BenchRow {
    pub fn csv_header() -> &'static str {
        "path,status,backend,wall_ms,hidden,clauses,decisions,conflicts"
    }

    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            esc_csv(&self.path),
            self.status,
            self.backend,
            opt_u128(self.wall_ms),
            opt_usize(self.hidden),
            opt_usize(self.clauses),
            opt_usize(self.decisions),
            opt_usize(self.conflicts),
        )
    }
}

pub fn run_one(path: &Path, backend: Backend, timeout: Duration) -> BenchRow {
    let start = Instant::now();
    let mut row = BenchRow {
        path: path.to_string_lossy().to_string(),
        status: String::new(),
        backend: backend.name().to_string(),
        wall_ms: None,
        hidden: None,
        clauses: None,
        decisions: None,
        conflicts: None,
    };

    let board = match load_board(path) {
        Ok(v) => v,
        Err(_) => {
            row.status = "parse_error".to_string();
            return row;
        }
    };

    let report = match solve_board_with_timeout(&board, backend, timeout) {
        Ok(v) => v,
        Err(_) => {
            row.status = "internal_error".to_string();
            row.wall_ms = Some(start.elapsed().as_millis());
            return row;
        }
    };

    row.wall_ms = Some(start.elapsed().as_millis());
    row.hidden = Some(report.hidden);
    row.status = match report.outcome {
        Outcome::Solved(_) => "sat",
        Outcome::Unsatisfiable => "unsat",
        Outcome::Inconclusive => "timeout",
    }
    .to_string();
    if report.outcome != Outcome::Inconclusive {
        row.clauses = Some(report.clauses);
        row.decisions = Some(report.stats.decisions);
        row.conflicts = Some(report.stats.conflicts);
    }
    row
}

pub fn run_dataset(
    dir: &Path,
    backends: &[Backend],
    timeout: Duration,
    csv_path: &Path,
    progress: bool,
) -> std::io::Result<Vec<BenchRow>> {
    let paths = discover_paths(dir)?;
    let mut csv = File::create(csv_path)?;
    writeln!(csv, "{}", BenchRow::csv_header())?;
    csv.flush()?;

    let mut rows = Vec::new();
    for path in paths {
        for &backend in backends {
            let row = run_one(&path, backend, timeout);
            if progress {
                info!(
                    "path={} backend={} status={} wall_ms={}",
                    row.path,
                    row.backend,
                    row.status,
                    row.wall_ms.unwrap_or_default()
                );
            }
            writeln!(csv, "{}", row.to_csv_line())?;
            csv.flush()?;
            rows.push(row);
        }
    }

    Ok(rows)
}

fn discover_paths(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::<PathBuf>::new();
    collect_paths(dir, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_paths(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let p = entry.path();
        if p.is_dir() {
            collect_paths(&p, out)?;
            continue;
        }
        if p.extension().and_then(|x| x.to_str()) == Some("txt") {
            out.push(p);
        }
    }
    Ok(())
}

fn opt_usize(v: Option<usize>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn opt_u128(v: Option<u128>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn esc_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
