//! Solve every machine in an input file.
//!
//! Usage:
//!   run <FILE> [--max-nodes N] [--timeout SECS] [--max-states N]
//!              [--skip-failures] [--threads N]
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use machine_solver::{
    parse_machines, part_one, part_two, FailurePolicy, Options, Report, SearchLimits,
    SolverConfig,
};

#[derive(Parser)]
#[command(name = "run")]
#[command(about = "Fewest button presses to start each machine")]
#[command(version)]
struct Cli {
    /// Path to the machine descriptions, one per line
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Maximum branch-and-bound nodes per machine
    #[arg(long, default_value = "1000000")]
    max_nodes: u64,

    /// Maximum joltage search time per machine, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum light patterns visited per machine
    #[arg(long)]
    max_states: Option<usize>,

    /// Leave unsolvable machines out of the totals instead of failing
    #[arg(long)]
    skip_failures: bool,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
}

fn print_report(part: u32, report: &Report) {
    println!("Part {}: {}", part, report.total);
    for gap in report.gaps.iter() {
        println!("  machine {} skipped: {}", gap.index, gap.error);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let options = Options {
        limits: SearchLimits {
            max_states: cli.max_states,
        },
        solver: SolverConfig {
            max_nodes: cli.max_nodes,
            timeout: cli.timeout.map(Duration::from_secs),
        },
        policy: if cli.skip_failures {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        },
    };

    let input = fs::read_to_string(&cli.file)?;
    let machines = parse_machines(&input)?;
    info!(machines = machines.len(), file = %cli.file.display(), "parsed input");

    print_report(1, &part_one(&machines, &options)?);
    print_report(2, &part_two(&machines, &options)?);

    Ok(())
}
