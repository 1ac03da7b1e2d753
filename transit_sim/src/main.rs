//! Transit Simulator CLI
//!
//! Run the built-in delivery scenarios headless.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use transit_sim::scenarios::ScenarioId;
use transit_sim::{ScenarioResult, ScenarioRunner, SimError};

/// Transit delivery simulation CLI
#[derive(Parser, Debug)]
#[command(name = "transit-sim")]
#[command(about = "Run headless drone delivery scenarios", long_about = None)]
struct Args {
    /// Master seed for determinism
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Scenario to run (courier, heavy_haul, recharge, city, all)
    #[arg(short = 'S', long, default_value = "all")]
    scenario: String,

    /// Maximum simulation duration in seconds
    #[arg(short, long, default_value = "120")]
    duration: f64,

    /// Tick rate in Hz
    #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..))]
    tick_rate: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Export frames of a single scenario to a JSON file
    #[arg(long)]
    export: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected scenarios; returns whether all of them passed.
fn run(args: &Args) -> Result<bool, SimError> {
    if !args.json {
        info!("Transit Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let scenarios: Vec<ScenarioId> = if args.scenario == "all" {
        ScenarioId::all()
    } else {
        vec![args.scenario.parse()?]
    };

    let runner = ScenarioRunner::new(args.seed)
        .with_tick_rate(args.tick_rate)
        .with_duration(args.duration);

    if let Some(export_path) = &args.export {
        let [scenario] = scenarios.as_slice() else {
            error!("--export only supports a single scenario, not 'all'");
            return Ok(false);
        };

        let (result, export) = runner.run_with_export(*scenario)?;
        export.write_to_file(export_path)?;
        info!("Exported {} frames to {}", export.frames.len(), export_path);
        report(&result);
        return Ok(result.passed);
    }

    let mut results: Vec<ScenarioResult> = Vec::new();
    for scenario in &scenarios {
        let result = runner.run(*scenario)?;
        if !args.json {
            report(&result);
        }
        results.push(result);
    }

    let total = results.len();
    let failed = results.iter().filter(|r| !r.passed).count();

    if args.json {
        let summary = serde_json::json!({
            "total": total,
            "passed": total - failed,
            "failed": failed,
            "results": results.iter().map(|r| {
                serde_json::json!({
                    "scenario": r.scenario.name(),
                    "seed": r.seed,
                    "passed": r.passed,
                    "ticks": r.total_ticks,
                    "time_secs": r.final_time_secs,
                    "scheduled": r.scheduled,
                    "delivered": r.delivered,
                    "failure_reason": r.failure_reason,
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if failed == 0 {
            info!("✅ All {} scenario runs passed!", total);
        } else {
            error!("❌ {}/{} scenario runs failed!", failed, total);
        }
    }

    Ok(failed == 0)
}

fn report(result: &ScenarioResult) {
    if result.passed {
        info!(
            "✓ {} (seed={}) PASSED - {} deliveries in {:.1}s",
            result.scenario.name(),
            result.seed,
            result.delivered,
            result.final_time_secs
        );
    } else {
        error!(
            "✗ {} (seed={}) FAILED: {}",
            result.scenario.name(),
            result.seed,
            result.failure_reason.as_deref().unwrap_or("unknown")
        );
    }
}
