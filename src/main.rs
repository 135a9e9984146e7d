//! Household Planner CLI
//!
//! Projects a single scenario file and prints the yearly table

use anyhow::{Context, Result};
use clap::Parser;
use household_planner::projection::{write_csv_file, ProjectionConfig, ProjectionEngine};
use household_planner::load_scenario;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "household_planner", version, about = "Project a household scenario year by year")]
struct Args {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Projection config JSON file (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of years to simulate
    #[arg(long)]
    horizon: Option<u32>,

    /// Stop vehicle costs after disposal and realize disposal proceeds
    #[arg(long)]
    realize_vehicle_disposal: bool,

    /// Write yearly rows to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the full projection as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ProjectionConfig> {
    let mut config: ProjectionConfig = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ProjectionConfig::default(),
    };

    if args.horizon.is_some() {
        config.horizon_years = args.horizon;
    }
    if args.realize_vehicle_disposal {
        config.realize_vehicle_disposal = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let scenario = load_scenario(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;

    let engine = ProjectionEngine::new(config);
    let projection = engine.project_scenario(&scenario);

    println!("Scenario: {} ({})", projection.scenario_name, projection.scenario_id);
    if engine.config().realize_vehicle_disposal {
        println!("Vehicle disposal: realized");
    }
    println!();
    println!(
        "{:>6} {:>14} {:>14} {:>14} {:>14} {:>14}  {}",
        "Year", "Income", "Expenses", "NetCashFlow", "Cash", "NetWorth", "Events"
    );
    println!("{}", "-".repeat(100));

    for row in &projection.years {
        println!(
            "{:>6} {:>14.0} {:>14.0} {:>14.0} {:>14.0} {:>14.0}  {}",
            row.year,
            row.income,
            row.total_expenses,
            row.net_cash_flow,
            row.cash,
            row.net_worth,
            row.events.join("; "),
        );
    }

    let summary = &projection.summary;
    println!("\nSummary:");
    println!("  Years: {}", summary.years);
    println!("  Total Income: {:.0}", summary.total_income);
    println!("  Total Expenses: {:.0}", summary.total_expenses);
    println!("  Final Net Worth: {:.0}", summary.final_net_worth);
    println!("  Peak Net Worth: {:.0}", summary.peak_net_worth);
    match summary.first_negative_year {
        Some(year) => println!(
            "  First Negative Year: {} ({} negative years)",
            year,
            summary.negative_years.len()
        ),
        None => println!("  First Negative Year: none"),
    }

    if let Some(path) = &args.csv {
        write_csv_file(&projection, path).with_context(|| format!("writing {}", path.display()))?;
        println!("\nYearly rows written to: {}", path.display());
    }

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &projection)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Projection written to: {}", path.display());
    }

    Ok(())
}
