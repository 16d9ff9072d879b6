//! poolsim command-line runner
//!
//! Runs a batch of queueing scenarios and prints one summary row per scenario.

use clap::Parser;
use poolsim::{run_batch, BatchConfig, ScenarioReport};

#[derive(Parser, Debug)]
#[command(name = "poolsim")]
#[command(about = "Simulate tasks competing for a bounded thread pool", long_about = None)]
struct Args {
    /// Batch configuration file (JSON); built-in scenarios are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Override the batch random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the simulated horizon
    #[arg(long)]
    horizon: Option<f64>,

    /// Print full reports as JSON instead of the summary table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let mut batch = match &args.config {
        Some(path) => BatchConfig::from_json_file(path)?,
        None => BatchConfig::default(),
    };
    if let Some(seed) = args.seed {
        batch = batch.with_random_seed(seed);
    }
    if let Some(horizon) = args.horizon {
        batch = batch.with_horizon(horizon);
    }

    let reports = run_batch(&batch)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_summary(&reports);
    }
    Ok(())
}

fn print_summary(reports: &[ScenarioReport]) {
    println!(
        "{:<20} {:>10} {:>16} {:>14} {:>16} {:>10}",
        "Scenario", "Avg Wait", "Avg Turnaround", "Avg Queue", "Utilization (%)", "Completed"
    );
    for report in reports {
        let s = &report.summary;
        println!(
            "{:<20} {:>10.2} {:>16.2} {:>14.2} {:>16.1} {:>10}",
            report.name, s.avg_wait, s.avg_turnaround, s.avg_queue, s.utilization, s.tasks_completed
        );
    }
}
