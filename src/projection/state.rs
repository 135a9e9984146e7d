//! Run-local projection state for a single scenario

use super::ledger::SavingsLedger;
use crate::household::{Scenario, Tenure};
use std::collections::HashMap;

/// Mutable state carried from one simulated year to the next
///
/// Loan balances are keyed by entity id and copied out of the scenario when
/// the run starts.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Zero-based index of the year being simulated
    pub year_index: u32,

    /// Cash on hand; negative once savings can no longer cover a shortfall
    pub cash: f64,

    /// Outstanding mortgage per own-type housing plan
    pub mortgages: HashMap<String, f64>,

    /// Outstanding loan per vehicle
    pub vehicle_loans: HashMap<String, f64>,

    pub savings: SavingsLedger,
}

impl ProjectionState {
    /// Initialize state from a normalized scenario at projection start
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mortgages = scenario
            .housing_plans
            .iter()
            .filter_map(|plan| match &plan.tenure {
                Tenure::Own(terms) => Some((plan.id.clone(), terms.mortgage_remaining)),
                Tenure::Rent(_) => None,
            })
            .collect();

        let vehicle_loans = scenario
            .vehicles
            .iter()
            .map(|v| (v.id.clone(), v.loan_remaining))
            .collect();

        Self {
            year_index: 0,
            cash: scenario.initial_cash.unwrap_or(0.0),
            mortgages,
            vehicle_loans,
            savings: SavingsLedger::from_accounts(&scenario.savings_accounts),
        }
    }

    /// Cash plus every savings balance
    pub fn net_worth(&self) -> f64 {
        self.cash + self.savings.total()
    }

    /// Mutable mortgage balance for a housing plan (zero if untracked)
    pub fn mortgage_mut(&mut self, plan_id: &str) -> &mut f64 {
        self.mortgages.entry(plan_id.to_string()).or_insert(0.0)
    }

    /// Mutable loan balance for a vehicle (zero if untracked)
    pub fn vehicle_loan_mut(&mut self, vehicle_id: &str) -> &mut f64 {
        self.vehicle_loans.entry(vehicle_id.to_string()).or_insert(0.0)
    }
}
