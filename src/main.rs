use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use sumbench::config::{self, Overrides};
use sumbench::logging;
use sumbench::report;
use sumbench::toolchain;
use sumbench::types::InputSpec;

#[derive(Parser)]
#[command(
    name = "sumbench",
    version,
    about = "Compare the throughput of command-line checksum utilities"
)]
struct Cli {
    /// Data file fed to every target on stdin
    input: PathBuf,

    /// Trials per target, including the ignored warm-up trial
    #[arg(short = 'n', long)]
    trials: Option<usize>,

    /// TOML config file (default: <config dir>/sumbench/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip building the binary under test
    #[arg(long)]
    no_build: bool,

    /// Report best and average only, without standard deviations
    #[arg(long)]
    no_stdev: bool,

    /// Abort when a target exits with a non-zero status
    #[arg(long)]
    strict_exit: bool,

    /// Debug-level diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let input = InputSpec::from_path(&cli.input)?;

    let file = config::load(cli.config.as_deref())?;
    let overrides = Overrides {
        trials: cli.trials,
        no_build: cli.no_build,
        no_stdev: cli.no_stdev,
        strict_exit: cli.strict_exit,
    };
    let settings = config::resolve(file, &overrides);
    settings.validate()?;

    if settings.build.enabled {
        toolchain::build(&settings.build)?;
    }

    let results = sumbench::run_benchmark(&settings, &input, |line| println!("{}", line))?;
    print!("{}", report::format_summary(&results, input.size));

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
