use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gemhunter::analysis::{Verdict, deduce};
use gemhunter::cnf::dimacs::to_dimacs;
use gemhunter::grid::generate::{conceal, random_board};
use gemhunter::grid::text::{load_board, save_board, to_text};
use gemhunter::pipeline::{
    Outcome, SolveReport, dense_formula, solve_board, solve_board_with_timeout,
};
use gemhunter::solver::Backend;

#[derive(Debug, Parser)]
#[command(name = "gemhunter")]
#[command(about = "Find the traps and gems behind a numbered grid")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    Solve {
        path: PathBuf,
        #[arg(long, default_value = "dpll")]
        backend: Backend,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long = "timeout-ms")]
        timeout_ms: Option<u64>,
    },
    Compare {
        path: PathBuf,
        #[arg(long = "timeout-ms", default_value_t = 30_000)]
        timeout_ms: u64,
    },
    Generate {
        #[arg(long)]
        height: usize,
        #[arg(long)]
        width: usize,
        #[arg(long)]
        traps: usize,
        #[arg(long)]
        gems: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        solution: Option<PathBuf>,
    },
    Cnf {
        path: PathBuf,
        #[arg(long)]
        emit: PathBuf,
    },
    Deduce {
        path: PathBuf,
        #[arg(long, default_value = "varisat")]
        backend: Backend,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    debug!("args = {:?}", cli);
    match cli.command {
        Cmd::Solve {
            path,
            backend,
            out,
            timeout_ms,
        } => solve_cmd(&path, backend, out.as_deref(), timeout_ms)?,
        Cmd::Compare { path, timeout_ms } => compare_cmd(&path, timeout_ms)?,
        Cmd::Generate {
            height,
            width,
            traps,
            gems,
            seed,
            out,
            solution,
        } => generate_cmd(height, width, traps, gems, seed, &out, solution.as_deref())?,
        Cmd::Cnf { path, emit } => cnf_cmd(&path, &emit)?,
        Cmd::Deduce { path, backend } => deduce_cmd(&path, backend)?,
    }
    Ok(())
}

fn solve_cmd(
    path: &Path,
    backend: Backend,
    out: Option<&Path>,
    timeout_ms: Option<u64>,
) -> Result<()> {
    let board = load_board(path)?;
    let report = match timeout_ms {
        Some(ms) => solve_board_with_timeout(&board, backend, Duration::from_millis(ms))?,
        None => solve_board(&board, backend)?,
    };
    print_report(&report);
    match &report.outcome {
        Outcome::Solved(sol) => {
            print!("{}", to_text(&sol.board));
            if let Some(out) = out {
                save_board(out, &sol.board)?;
                info!("wrote {}", out.display());
            }
        }
        Outcome::Unsatisfiable => bail!("puzzle has no consistent assignment"),
        Outcome::Inconclusive => bail!("no answer within the time bound"),
    }
    Ok(())
}

fn compare_cmd(path: &Path, timeout_ms: u64) -> Result<()> {
    let board = load_board(path)?;
    let timeout = Duration::from_millis(timeout_ms);
    let mut verdicts = Vec::new();
    for backend in Backend::ALL {
        let report = solve_board_with_timeout(&board, backend, timeout)?;
        print_report(&report);
        if report.outcome != Outcome::Inconclusive {
            verdicts.push((backend, report.outcome.solution().is_some()));
        }
    }
    if let Some(&(first, sat)) = verdicts.first() {
        for &(other, other_sat) in &verdicts[1..] {
            if other_sat != sat {
                bail!("{} and {} disagree on satisfiability", first, other);
            }
        }
    } else {
        warn!("every backend timed out");
    }
    Ok(())
}

fn generate_cmd(
    height: usize,
    width: usize,
    traps: usize,
    gems: usize,
    seed: u64,
    out: &Path,
    solution: Option<&Path>,
) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let full = random_board(height, width, traps, gems, &mut rng)?;
    save_board(out, &conceal(&full))?;
    if let Some(solution) = solution {
        save_board(solution, &full)?;
    }
    println!(
        "GEN: wrote {} | {}x{} traps={} gems={} seed={}",
        out.display(),
        height,
        width,
        traps,
        gems,
        seed
    );
    Ok(())
}

fn cnf_cmd(path: &Path, emit: &Path) -> Result<()> {
    let board = load_board(path)?;
    let formula = dense_formula(&board)?;
    std::fs::write(emit, to_dimacs(&formula.cnf))?;
    println!(
        "vars={} clauses={} vars_in_use={}",
        formula.cnf.num_vars,
        formula.cnf.clauses.len(),
        formula.cnf.vars_in_use().len()
    );
    Ok(())
}

fn deduce_cmd(path: &Path, backend: Backend) -> Result<()> {
    let board = load_board(path)?;
    let Some(deductions) = deduce(&board, backend)? else {
        bail!("puzzle has no consistent assignment");
    };
    for (p, verdict) in &deductions {
        let label = match verdict {
            Verdict::ForcedTrap => "trap",
            Verdict::ForcedGem => "gem",
            Verdict::Ambiguous => "ambiguous",
        };
        println!("({}, {}) {}", p.x, p.y, label);
    }
    Ok(())
}

fn print_report(report: &SolveReport) {
    println!(
        "{}: {} | hidden={} clauses={} decisions={} propagations={} pure={} time={:?}",
        report.backend,
        report.outcome.label(),
        report.hidden,
        report.clauses,
        report.stats.decisions,
        report.stats.propagations,
        report.stats.pure_literals,
        report.elapsed
    );
    if let Some(sol) = report.outcome.solution() {
        let model = sol.lits.iter().map(|l| l.to_dimacs()).collect::<Vec<_>>();
        println!("model: {:?}", model);
    }
}
