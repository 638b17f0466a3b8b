use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use sumsq::{Config, Coordinator};

#[derive(Parser)]
#[command(name = "sumsq")]
#[command(about = "Drain a task file through a worker pool and report aggregate square statistics")]
#[command(version)]
struct Cli {
    /// Task file, one `<action> <value>` record per line (`p` = compute, `w` = wait)
    infile: PathBuf,

    /// Number of worker threads (0 runs without workers)
    workers: usize,
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::builder().workers(cli.workers).build()?;

    let file = File::open(&cli.infile)
        .with_context(|| format!("cannot open {}", cli.infile.display()))?;

    let coord = Coordinator::new(config)?;
    coord
        .load(BufReader::new(file))
        .with_context(|| format!("loading {}", cli.infile.display()))?;

    let report = coord.run()?;
    println!("{}", report);

    if report.all_workers_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("sumsq: {} worker(s) failed to join cleanly", report.workers_failed);
        Ok(ExitCode::FAILURE)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("sumsq: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
