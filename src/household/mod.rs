//! Household scenario data structures and scenario loading

mod data;
pub mod loader;

pub use data::{
    AccountKind, AccountRole, ContributionPolicy, ExpenseBand, ExpenseCategory, HousingPlan,
    IncomeEvent, IncomeEventKind, LivingCosts, LivingPlan, OwnTerms, RentTerms, Resident,
    SavingsAccount, Scenario, Tenure, VehicleProfile, DEFAULT_HORIZON_YEARS,
};
pub use loader::{load_scenario, load_scenario_from_reader, load_scenarios, normalize};
