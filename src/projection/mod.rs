//! Projection engine for yearly household cash flow and net worth

mod cashflows;
mod costs;
mod engine;
pub mod export;
mod ledger;
mod state;

pub use cashflows::{Projection, ProjectionSummary, YearlyBreakdown};
pub use costs::{amortize, housing_cost, living_cost, vehicle_cost, CostOutcome};
pub use engine::{simulate_scenario, ProjectionConfig, ProjectionEngine};
pub use export::{write_csv, write_csv_file};
pub use ledger::{SavingsLedger, Withdrawal};
pub use state::ProjectionState;
