//! Household Planner - deterministic cash-flow and net-worth projection engine
//!
//! This library provides:
//! - Scenario data model for residents, housing, vehicles, living costs and savings
//! - Time-series expansion of income events and expense bands
//! - Year-by-year projection with loan amortization and a savings deficit waterfall
//! - Multi-scenario comparison to find the earliest insolvency

pub mod error;
pub mod household;
pub mod projection;
pub mod scenario;
pub mod timeline;

// Re-export commonly used types
pub use error::ScenarioError;
pub use household::{load_scenario, load_scenarios, Scenario};
pub use projection::{
    simulate_scenario, Projection, ProjectionConfig, ProjectionEngine, ProjectionSummary,
    YearlyBreakdown,
};
pub use scenario::{compare_scenarios, EarliestNegative, ScenarioComparison, ScenarioRunner};
