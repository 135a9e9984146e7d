//! Core year-step driver for household cash-flow projections

use super::cashflows::{Projection, YearlyBreakdown};
use super::costs::{housing_cost, living_cost, vehicle_cost, CostOutcome};
use super::state::ProjectionState;
use crate::household::{normalize, Scenario};
use crate::timeline::{household_income, select_active, BandSchedule, ExpenseBucket};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Configuration for a projection run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionConfig {
    /// Overrides the scenario's own horizon when set
    pub horizon_years: Option<u32>,

    /// Stop vehicle costs outside purchase/disposal years and realize disposal proceeds
    pub realize_vehicle_disposal: bool,
}

impl ProjectionConfig {
    pub fn with_horizon(horizon_years: u32) -> Self {
        Self {
            horizon_years: Some(horizon_years),
            ..Default::default()
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection for a single scenario
    ///
    /// The scenario is read only; legacy profiles are normalized on a copy and
    /// all balances live in a fresh [`ProjectionState`].
    pub fn project_scenario(&self, scenario: &Scenario) -> Projection {
        let scenario = normalize(scenario);
        let horizon = scenario.horizon(self.config.horizon_years);
        let bands = BandSchedule::build(&scenario, horizon);
        let mut state = ProjectionState::from_scenario(&scenario);

        info!(
            "Projecting scenario '{}' from {} over {} years",
            scenario.id, scenario.start_year, horizon
        );

        let mut projection = Projection::new(
            scenario.id.clone(),
            scenario.name.clone(),
            scenario.start_year,
            state.net_worth(),
        );

        for year_index in 0..horizon {
            state.year_index = year_index;
            let row = self.simulate_year(&scenario, &bands, &mut state);
            projection.add_year(row);
        }

        info!(
            "Scenario '{}' done: final net worth {:.0}, first negative year {:?}",
            scenario.id, projection.summary.final_net_worth, projection.summary.first_negative_year
        );

        projection
    }

    /// Simulate one year and advance the state
    fn simulate_year(&self, scenario: &Scenario, bands: &BandSchedule, state: &mut ProjectionState) -> YearlyBreakdown {
        let year_index = state.year_index;
        let year = scenario.calendar_year(year_index);

        let ages = scenario
            .residents
            .iter()
            .map(|r| (r.id.clone(), r.age_at(year_index)))
            .collect();

        // Income
        let income = household_income(&scenario.residents, &scenario.custom_income_events, year_index);
        let mut total_income = income.total;
        let mut events = income.events;

        // Banded expenses, then plan and vehicle costs on top
        let mut expenses = bands.breakdown(year_index);

        if let Some(plan) = select_active(&scenario.living_plans, year_index) {
            expenses.add(ExpenseBucket::Living, living_cost(plan, year_index));
        }

        if let Some(plan) = select_active(&scenario.housing_plans, year_index) {
            let outcome = housing_cost(plan, year_index, state.mortgage_mut(&plan.id));
            expenses.add(ExpenseBucket::Housing, outcome.cost);
            total_income += outcome.proceeds;
            events.extend(outcome.events);
        }

        let mut vehicles = CostOutcome::default();
        for vehicle in &scenario.vehicles {
            vehicles.merge(vehicle_cost(
                vehicle,
                year_index,
                year,
                state.vehicle_loan_mut(&vehicle.id),
                self.config.realize_vehicle_disposal,
            ));
        }
        expenses.add(ExpenseBucket::Vehicle, vehicles.cost);
        total_income += vehicles.proceeds;
        events.extend(vehicles.events);

        // Savings: contributions are unconditional, then the deficit waterfall
        let contributions = state.savings.contribute();
        let total_expenses = expenses.total();
        let net_cash_flow = total_income - total_expenses - contributions;
        state.cash += net_cash_flow;

        let mut withdrawals = 0.0;
        if state.cash < 0.0 {
            let withdrawal = state.savings.cover_deficit(-state.cash);
            withdrawals = withdrawal.withdrawn;
            state.cash += withdrawal.withdrawn;
            if withdrawal.unrecovered > 0.0 {
                warn!(
                    "Scenario '{}' {}: deficit exceeds savings by {:.0}",
                    scenario.id, year, withdrawal.unrecovered
                );
                events.push("Deficit exceeds savings".to_string());
            }
        }

        state.savings.apply_interest();
        let net_worth = state.net_worth();

        debug!(
            "{} [{}]: income={:.0} expenses={:.0} contributions={:.0} cash={:.0} net_worth={:.0}",
            year, year_index, total_income, total_expenses, contributions, state.cash, net_worth
        );

        YearlyBreakdown {
            year,
            year_index,
            ages,
            income: total_income,
            expenses,
            total_expenses,
            savings_contributions: contributions,
            savings_withdrawals: withdrawals,
            net_cash_flow,
            cash: state.cash,
            net_worth,
            savings_balances: state.savings.balances(),
            events,
        }
    }
}

/// Project one scenario with the given options
pub fn simulate_scenario(scenario: &Scenario, config: &ProjectionConfig) -> Projection {
    ProjectionEngine::new(config.clone()).project_scenario(scenario)
}
