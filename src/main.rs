//! Store simulator - discrete-time retail store simulation
//!
//! Simulates customer arrivals, shopping, checkout queueing and reneging
//! minute by minute and writes the aggregated result as JSON.
//!
//! Module structure:
//! - `domain/` - Core types (input, catalog, customer, output)
//! - `services/` - Simulation logic (customer types, shopping, checkouts, engine)
//! - `io/` - Input loading and result egress
//! - `infra/` - Infrastructure (config, logging, summary)
//!
//! Usage:
//!   store-sim                          # testdata/input.json -> testdata/output.json
//!   store-sim '<input json>'           # result printed to stdout
//!   store-sim --input store.json --output out/result.json --seed 42

use anyhow::Context;
use clap::Parser;
use tracing::info;

use store_sim::infra::{logging, Config, Summary};
use store_sim::io::{Egress, EgressTarget, InputSource};
use store_sim::services::{Engine, EngineSettings, Scenario};

/// Store simulator - retail arrivals, shopping and checkout queues
#[derive(Parser, Debug)]
#[command(name = "store-sim", version, about)]
struct Args {
    /// Simulation input as a JSON string; the result is printed to stdout
    input_json: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,

    /// Input file (overrides input.file)
    #[arg(short, long)]
    input: Option<String>,

    /// Output file (overrides output.file)
    #[arg(short, long)]
    output: Option<String>,

    /// Random seed (overrides simulation.seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Indent the result JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load_from_path(&args.config)
        .with_seed(args.seed)
        .with_input_file(args.input)
        .with_output_file(args.output)
        .with_pretty(args.pretty);

    logging::init(config.log_format());

    info!(version = env!("CARGO_PKG_VERSION"), git_hash = env!("GIT_HASH"), "store-sim starting");
    info!(
        config_file = %config.config_file(),
        operating_hours_per_day = %config.operating_hours_per_day(),
        pick_cooldown_minutes = %config.pick_cooldown_minutes(),
        log_format = %config.log_format().as_str(),
        "config_loaded"
    );

    let seed = match config.seed() {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            info!(seed = %seed, "seed_drawn");
            seed
        }
    };

    let source = InputSource::resolve(args.input_json, config.input_file());
    let input = source.load()?;
    let scenario = Scenario::from_input(&input).context("Invalid simulation input")?;

    let settings = EngineSettings {
        seed,
        operating_hours_per_day: config.operating_hours_per_day(),
        pick_cooldown_minutes: config.pick_cooldown_minutes(),
    };
    let output = Engine::new(scenario, settings).run();

    Summary::from_output(&output).log();

    let target = if source.is_inline() {
        EgressTarget::Stdout
    } else {
        EgressTarget::File(config.output_file().into())
    };
    Egress::new(target, config.pretty()).write_output(&output)?;

    Ok(())
}
