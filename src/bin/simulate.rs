//! Game balance simulator CLI.
//!
//! Plays many sessions with a simple HP-threshold policy to analyze balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # Default: 1000 runs
//!   cargo run --bin simulate -- -n 100 --seed 42     # Reproducible run
//!   cargo run --bin simulate -- --potion-below 0     # Never drink

use clap::Parser;
use dungeon_runner::simulator::{run_simulation, SimConfig};
use dungeon_runner::utils::logging::{init_logging, LogTarget};
use dungeon_runner::AppError;

/// Monte Carlo balance simulator for Dungeon Runner.
#[derive(Parser, Debug)]
#[command(name = "simulate", version = dungeon_runner::build_info::VERSION_LINE)]
struct Args {
    /// Number of sessions to play
    #[arg(short = 'n', long, default_value_t = 1000)]
    runs: u32,

    /// Base seed; run i uses seed + i
    #[arg(short, long)]
    seed: Option<u64>,

    /// Drink a potion below this HP percent
    #[arg(long, default_value_t = 40)]
    potion_below: u32,

    /// Try to flee below this HP percent (0 = never)
    #[arg(long, default_value_t = 0)]
    flee_below: u32,

    /// Also write the report as JSON
    #[arg(long)]
    json: bool,

    /// Print one line per run
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Print nothing but the JSON file name
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let _log_guard = init_logging(LogTarget::Stderr, "warn")?;

    let config = SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        potion_below_percent: args.potion_below,
        flee_below_percent: args.flee_below,
        verbosity: match (args.quiet, args.verbose) {
            (true, _) => 0,
            (false, true) => 2,
            (false, false) => 1,
        },
        ..SimConfig::default()
    };

    if config.prints_summary() {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              DUNGEON RUNNER BALANCE SIMULATOR                 ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Potion below:   {}% HP", config.potion_below_percent);
        if config.flee_below_percent > 0 {
            println!("  Flee below:     {}% HP", config.flee_below_percent);
        } else {
            println!("  Flee below:     never");
        }
        println!("  Max Commands:   {}", config.max_actions_per_run);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    if config.prints_summary() {
        println!("{}", report.to_text());
    }

    if args.json {
        let json = report.to_json()?;
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json)?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}
