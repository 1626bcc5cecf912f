use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use gemhunter::bench::run_dataset;
use gemhunter::solver::Backend;

#[derive(Debug, Parser)]
#[command(name = "bench_dataset")]
struct Cli {
    #[arg(long)]
    dir: String,
    #[arg(long, value_delimiter = ',', default_value = "dpll,varisat")]
    backends: Vec<Backend>,
    #[arg(long = "timeout_ms", default_value_t = 30000)]
    timeout_ms: u64,
    #[arg(long)]
    csv: String,
    #[arg(long, default_value_t = false)]
    progress: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run_from_args(&cli)
}

fn run_from_args(cli: &Cli) -> Result<()> {
    let rows = run_dataset(
        &PathBuf::from(&cli.dir),
        &cli.backends,
        Duration::from_millis(cli.timeout_ms),
        &PathBuf::from(&cli.csv),
        cli.progress,
    )?;
    println!("rows={}", rows.len());
    Ok(())
}
