//! Scenario data structures matching the planner's JSON scenario format

use serde::{Deserialize, Serialize};

/// Horizon used when neither the scenario nor the run config sets one
pub const DEFAULT_HORIZON_YEARS: u32 = 60;

fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

/// Root input: one household's full planning scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Unique scenario identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Calendar year of year index 0
    #[serde(default = "current_year")]
    pub start_year: i32,

    /// Explicit horizon in years (60 when absent)
    #[serde(default)]
    pub horizon_years: Option<u32>,

    /// Cash on hand at the start of year 0
    #[serde(default)]
    pub initial_cash: Option<f64>,

    #[serde(default)]
    pub residents: Vec<Resident>,

    /// Time-bounded housing plans
    #[serde(default)]
    pub housing_plans: Vec<HousingPlan>,

    /// Legacy single housing profile, folded into `housing_plans` on normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housing: Option<Tenure>,

    #[serde(default)]
    pub vehicles: Vec<VehicleProfile>,

    /// Time-bounded living-cost plans
    #[serde(default)]
    pub living_plans: Vec<LivingPlan>,

    /// Legacy single living-cost profile, folded into `living_plans` on normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living: Option<LivingCosts>,

    #[serde(default)]
    pub savings_accounts: Vec<SavingsAccount>,

    /// Scenario-anchored expense bands (bounds are year offsets)
    #[serde(default)]
    pub expense_bands: Vec<ExpenseBand>,

    /// Scenario-level income events (year-offset triggers only)
    #[serde(default)]
    pub custom_income_events: Vec<IncomeEvent>,
}

impl Scenario {
    /// Create an empty scenario starting in `start_year`
    pub fn new(id: impl Into<String>, name: impl Into<String>, start_year: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_year,
            horizon_years: None,
            initial_cash: None,
            residents: Vec::new(),
            housing_plans: Vec::new(),
            housing: None,
            vehicles: Vec::new(),
            living_plans: Vec::new(),
            living: None,
            savings_accounts: Vec::new(),
            expense_bands: Vec::new(),
            custom_income_events: Vec::new(),
        }
    }

    /// Resolve the number of simulated years, preferring an explicit override
    pub fn horizon(&self, override_years: Option<u32>) -> u32 {
        override_years
            .or(self.horizon_years)
            .unwrap_or(DEFAULT_HORIZON_YEARS)
    }

    /// Calendar year for a zero-based year index
    pub fn calendar_year(&self, year_index: u32) -> i32 {
        self.start_year + year_index as i32
    }
}

/// A household member whose income and age-anchored expenses are projected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Age at year index 0
    pub current_age: u32,

    /// Last age at which base income is earned
    pub retirement_age: u32,

    /// Annual net income at year index 0
    #[serde(default)]
    pub base_net_income: f64,

    /// Compounded yearly while working
    #[serde(default)]
    pub annual_income_growth_rate: f64,

    #[serde(default)]
    pub income_events: Vec<IncomeEvent>,

    /// Bands whose bounds are this resident's ages
    #[serde(default)]
    pub expense_bands: Vec<ExpenseBand>,
}

impl Resident {
    /// Age in the given year index
    pub fn age_at(&self, year_index: u32) -> u32 {
        self.current_age + year_index
    }

    /// Still earning base income in the given year index (retirement year inclusive)
    pub fn is_working(&self, year_index: u32) -> bool {
        self.age_at(year_index) <= self.retirement_age
    }
}

/// Informational classification of an income event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeEventKind {
    Bonus,
    Reduction,
    Raise,
    Retirement,
    #[default]
    Custom,
}

/// A one-time, repeating or durational income adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEvent {
    pub id: String,

    #[serde(default)]
    pub label: String,

    /// Signed; negative values are temporary reductions
    pub amount: f64,

    #[serde(rename = "type", default)]
    pub kind: IncomeEventKind,

    /// Fires relative to the owning resident's age
    #[serde(default)]
    pub trigger_age: Option<u32>,

    /// Fires relative to the scenario's year index
    #[serde(default)]
    pub trigger_year_offset: Option<u32>,

    #[serde(default)]
    pub repeat_every_years: Option<u32>,

    /// Contributes every year for this many years, overriding repeat
    #[serde(default)]
    pub duration_years: Option<u32>,
}

/// Category of a declared expense band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Education,
    Housing,
    Vehicle,
    Living,
    Lessons,
    Event,
    Other,
}

/// A recurring annual expense between two (inclusive) bounds
///
/// For resident bands the bounds are ages; for scenario bands the same fields
/// hold year offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBand {
    pub id: String,

    #[serde(default)]
    pub label: String,

    pub start_age: u32,

    pub end_age: u32,

    pub annual_amount: f64,

    pub category: ExpenseCategory,
}

/// Terms of owning a home
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnTerms {
    #[serde(default)]
    pub built_year: Option<i32>,

    /// Outstanding principal at year index 0 (copied into run state)
    #[serde(default)]
    pub mortgage_remaining: f64,

    #[serde(default)]
    pub monthly_mortgage: f64,

    #[serde(default)]
    pub management_fee_monthly: f64,

    #[serde(default)]
    pub maintenance_reserve_monthly: f64,

    #[serde(default)]
    pub extra_annual_costs: Option<f64>,

    /// Charged once in the plan's start year
    #[serde(default)]
    pub purchase_cost: Option<f64>,

    /// Realized in the plan's end year
    #[serde(default)]
    pub sale_value: Option<f64>,
}

/// Terms of renting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentTerms {
    #[serde(default)]
    pub monthly_rent: f64,

    #[serde(default)]
    pub monthly_fees: Option<f64>,

    #[serde(default)]
    pub extra_annual_costs: Option<f64>,

    #[serde(default)]
    pub move_in_cost: Option<f64>,

    #[serde(default)]
    pub move_out_cost: Option<f64>,
}

/// Own-versus-rent variant of a housing plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tenure {
    Own(OwnTerms),
    Rent(RentTerms),
}

/// A housing arrangement active over a window of year offsets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingPlan {
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub start_year_offset: u32,

    /// Inclusive; open-ended when absent
    #[serde(default)]
    pub end_year_offset: Option<u32>,

    #[serde(flatten)]
    pub tenure: Tenure,
}

/// A car or other vehicle with loan and running costs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProfile {
    pub id: String,

    #[serde(default)]
    pub label: String,

    /// Calendar year of acquisition
    #[serde(default)]
    pub purchase_year: Option<i32>,

    /// Calendar year of disposal
    #[serde(default)]
    pub disposal_year: Option<i32>,

    #[serde(default)]
    pub purchase_price: f64,

    #[serde(default)]
    pub disposal_value: f64,

    /// Outstanding loan at year index 0 (copied into run state)
    #[serde(default)]
    pub loan_remaining: f64,

    #[serde(default)]
    pub monthly_loan: f64,

    /// Zero disables inspections
    #[serde(default)]
    pub inspection_cycle_years: u32,

    #[serde(default)]
    pub inspection_cost: f64,

    #[serde(default)]
    pub maintenance_annual: f64,

    #[serde(default)]
    pub parking_monthly: f64,

    #[serde(default)]
    pub insurance_annual: Option<f64>,
}

/// Annual living costs and their inflation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivingCosts {
    #[serde(default)]
    pub base_annual: f64,

    #[serde(default)]
    pub insurance_annual: Option<f64>,

    #[serde(default)]
    pub utilities_annual: Option<f64>,

    #[serde(default)]
    pub discretionary_annual: Option<f64>,

    #[serde(default)]
    pub healthcare_annual: Option<f64>,

    /// Compounded from the owning plan's start year
    #[serde(default)]
    pub inflation_rate: Option<f64>,
}

impl LivingCosts {
    /// Base plus every add-on, before inflation
    pub fn annual_total(&self) -> f64 {
        self.base_annual
            + self.insurance_annual.unwrap_or(0.0)
            + self.utilities_annual.unwrap_or(0.0)
            + self.discretionary_annual.unwrap_or(0.0)
            + self.healthcare_annual.unwrap_or(0.0)
    }
}

/// A living-cost arrangement active over a window of year offsets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivingPlan {
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub start_year_offset: u32,

    #[serde(default)]
    pub end_year_offset: Option<u32>,

    #[serde(flatten)]
    pub costs: LivingCosts,
}

/// Savings account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Deposit,
    Investment,
}

/// Purpose of a savings account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Emergency,
    ShortTerm,
    GoalEducation,
    GoalHouse,
    GoalOther,
    LongTerm,
}

/// How contributions should react to shortfalls
///
/// Carried for editors and exports; the projection always contributes the
/// fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionPolicy {
    Fixed,
    SurplusOnly,
}

/// A deposit or investment account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAccount {
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(rename = "type")]
    pub kind: AccountKind,

    #[serde(default)]
    pub role: Option<AccountRole>,

    /// Opening balance (copied into run state)
    #[serde(default)]
    pub balance: f64,

    #[serde(default)]
    pub annual_contribution: f64,

    #[serde(default)]
    pub annual_interest_rate: f64,

    #[serde(default)]
    pub adjustable: bool,

    /// Lower values are drawn first when covering a deficit
    #[serde(default)]
    pub withdraw_priority: Option<u32>,

    #[serde(default)]
    pub contribution_policy: Option<ContributionPolicy>,
}

impl SavingsAccount {
    /// Priority used by the deficit waterfall
    ///
    /// Deposits sort ahead of investments when unset; the role orders accounts
    /// within a type.
    pub fn effective_withdraw_priority(&self) -> u32 {
        if let Some(priority) = self.withdraw_priority {
            return priority;
        }

        let type_base = match self.kind {
            AccountKind::Deposit => 100,
            AccountKind::Investment => 200,
        };
        let role_rank = match self.role {
            Some(AccountRole::ShortTerm) => 1,
            Some(AccountRole::Emergency) => 2,
            Some(AccountRole::GoalOther) => 3,
            Some(AccountRole::GoalEducation) => 4,
            Some(AccountRole::GoalHouse) => 5,
            Some(AccountRole::LongTerm) => 6,
            None => 0,
        };

        type_base + role_rank
    }
}
