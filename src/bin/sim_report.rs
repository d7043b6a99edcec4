//! Sim Report - summarize a store-sim result file
//!
//! Usage:
//!   sim-report testdata/output.json
//!   sim-report --log out/result.json   # emit the summary as log events instead

use anyhow::Context;
use clap::Parser;
use std::fs;

use store_sim::domain::OutputData;
use store_sim::infra::{logging, LogFormat, Summary};

/// Sim Report - derived ratios of a finished simulation
#[derive(Parser, Debug)]
#[command(name = "sim-report", version, about, long_about = None)]
struct Args {
    /// Result JSON written by store-sim
    #[arg(default_value = "testdata/output.json")]
    file: String,

    /// Emit the summary as structured log events
    #[arg(long)]
    log: bool,

    /// Log format when --log is given
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let content =
        fs::read_to_string(&args.file).with_context(|| format!("Failed to read result file {}", args.file))?;
    let output =
        OutputData::from_json(&content).with_context(|| format!("Failed to parse result file {}", args.file))?;
    let summary = Summary::from_output(&output);

    if args.log {
        logging::init(args.log_format);
        summary.log();
    } else {
        print!("{}", summary);
    }

    Ok(())
}
