use clap::{ArgAction, Parser};
use runway_sim::config::Config;
use runway_sim::report::Report;
use runway_sim::simulation::run_replications;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Hour-of-day runway congestion for a single airport")]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Seed of the first replication
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent runs to pool
    #[arg(short, long, default_value_t = 1)]
    replications: u32,

    /// Simulation horizon in seconds
    #[arg(long, value_name = "SECONDS")]
    sim_time: Option<f64>,

    /// Only generate the arrival stream, no runway contention
    #[arg(long)]
    arrivals_only: bool,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Report hours without samples as 0 instead of leaving them empty
    #[arg(long)]
    zero_fill: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load_from_file(&args.scenario)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(sim_time) = args.sim_time {
        config.sim_time = sim_time;
    }
    config.arrivals_only |= args.arrivals_only;
    config.validate()?;
    tracing::info!(scenario = %args.scenario.display(), ?config, "scenario loaded");

    let runs = run_replications(&config, args.replications)?;
    let report = Report::new(&config, &runs, args.zero_fill);

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.headline());
        println!("{}", report.table());
    }
    Ok(())
}
