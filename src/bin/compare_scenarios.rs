//! Compare several scenario files and report which one goes negative first
//!
//! Usage: cargo run --bin compare_scenarios -- data/scenarios/*.json

use anyhow::{Context, Result};
use clap::Parser;
use household_planner::{load_scenarios, ProjectionConfig, ScenarioRunner};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "compare_scenarios", about = "Project several scenarios and compare them")]
struct Args {
    /// Scenario JSON files
    #[arg(required = true)]
    scenarios: Vec<PathBuf>,

    /// Number of years to simulate for every scenario
    #[arg(long)]
    horizon: Option<u32>,

    /// Stop vehicle costs after disposal and realize disposal proceeds
    #[arg(long)]
    realize_vehicle_disposal: bool,

    /// Write the full comparison as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let scenarios = load_scenarios(&args.scenarios).context("loading scenarios")?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::new(ProjectionConfig {
        horizon_years: args.horizon,
        realize_vehicle_disposal: args.realize_vehicle_disposal,
    });
    let comparison = runner.compare(&scenarios);

    match runner.config().horizon_years {
        Some(years) => println!("Horizon: {} years for every scenario", years),
        None => println!("Horizon: per scenario"),
    }

    println!(
        "\n{:<24} {:>6} {:>16} {:>16} {:>12}",
        "Scenario", "Years", "FinalNetWorth", "PeakNetWorth", "FirstNeg"
    );
    println!("{}", "-".repeat(78));
    for projection in &comparison.projections {
        let summary = &projection.summary;
        println!(
            "{:<24} {:>6} {:>16.0} {:>16.0} {:>12}",
            projection.scenario_name,
            summary.years,
            summary.final_net_worth,
            summary.peak_net_worth,
            summary
                .first_negative_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    match &comparison.earliest_negative {
        Some(hit) => println!(
            "\nEarliest negative net worth: {} ({}) in {}",
            hit.scenario_name, hit.scenario_id, hit.year
        ),
        None => println!("\nNo scenario goes negative within the horizon"),
    }

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &comparison)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Comparison written to: {}", path.display());
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
