//! trialtab CLI - Tabulate a behavioral-experiment log into CSV tables
//!
//! Takes one positional argument: the path to an NDJSON experiment log. The
//! assembled tables are printed for inspection, then written alongside the
//! input as `<stem>_performance.csv`, `<stem>_effort_slider.csv`, and
//! `<stem>_effort_dial.csv`.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use trialtab::{output_paths, tabulate_ndjson, write_tables, TabulateError, TRIALTAB_VERSION};

/// trialtab - Tabulate behavioral-experiment logs into per-trial CSV tables
#[derive(Parser)]
#[command(name = "trialtab")]
#[command(version = TRIALTAB_VERSION)]
#[command(about = "Tabulate behavioral-experiment logs into per-trial CSV tables", long_about = None)]
struct Cli {
    /// Path to the experiment log (newline-delimited JSON, one subject per line)
    dataset: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), TabulateError> {
    let raw = fs::read_to_string(&cli.dataset)?;
    let tables = tabulate_ndjson(&raw)?;

    // dropout diagnostics are emitted by the timeline parser as warnings
    println!("{tables}");

    let paths = output_paths(&cli.dataset);
    write_tables(&tables, &paths)?;
    Ok(())
}
