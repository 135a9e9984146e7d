//! Yearly output structures for projections

use crate::timeline::ExpenseBreakdown;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyBreakdown {
    // Timing
    pub year: i32,
    pub year_index: u32,

    /// Resident id -> age in this year
    pub ages: BTreeMap<String, u32>,

    // Flows
    pub income: f64,
    pub expenses: ExpenseBreakdown,
    pub total_expenses: f64,
    pub savings_contributions: f64,
    pub savings_withdrawals: f64,

    /// Income minus expenses minus savings contributions, before any withdrawal
    pub net_cash_flow: f64,

    // End-of-year positions
    pub cash: f64,
    pub net_worth: f64,
    pub savings_balances: BTreeMap<String, f64>,

    pub events: Vec<String>,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub scenario_id: String,
    pub scenario_name: String,
    pub start_year: i32,

    /// One entry per simulated year, in order
    pub years: Vec<YearlyBreakdown>,

    pub summary: ProjectionSummary,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_savings_contributions: f64,
    pub final_net_worth: f64,
    pub first_negative_year: Option<i32>,
    pub negative_years: Vec<i32>,
    pub peak_net_worth: f64,
}

impl ProjectionSummary {
    /// Empty summary seeded with the opening net worth
    ///
    /// Final and peak net worth start at the opening balance, so a projection
    /// with no simulated years reports the opening position rather than zero.
    pub fn opening(net_worth: f64) -> Self {
        Self {
            years: 0,
            total_income: 0.0,
            total_expenses: 0.0,
            total_savings_contributions: 0.0,
            final_net_worth: net_worth,
            first_negative_year: None,
            negative_years: Vec::new(),
            peak_net_worth: net_worth,
        }
    }

    /// Fold one emitted year into the running totals
    pub fn record(&mut self, row: &YearlyBreakdown) {
        self.years += 1;
        self.total_income += row.income;
        self.total_expenses += row.total_expenses;
        self.total_savings_contributions += row.savings_contributions;
        self.final_net_worth = row.net_worth;

        if row.net_worth > self.peak_net_worth {
            self.peak_net_worth = row.net_worth;
        }

        if row.net_worth < 0.0 {
            self.negative_years.push(row.year);
            if self.first_negative_year.is_none() {
                self.first_negative_year = Some(row.year);
            }
        }
    }
}

impl Projection {
    pub fn new(scenario_id: String, scenario_name: String, start_year: i32, opening_net_worth: f64) -> Self {
        Self {
            scenario_id,
            scenario_name,
            start_year,
            years: Vec::new(),
            summary: ProjectionSummary::opening(opening_net_worth),
        }
    }

    /// Add a year and update the summary
    pub fn add_year(&mut self, row: YearlyBreakdown) {
        self.summary.record(&row);
        self.years.push(row);
    }

    /// Breakdown for a calendar year, if simulated
    pub fn year(&self, year: i32) -> Option<&YearlyBreakdown> {
        self.years.iter().find(|row| row.year == year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, net_worth: f64) -> YearlyBreakdown {
        YearlyBreakdown {
            year,
            year_index: (year - 2025) as u32,
            ages: BTreeMap::new(),
            income: 100.0,
            expenses: ExpenseBreakdown::default(),
            total_expenses: 40.0,
            savings_contributions: 10.0,
            savings_withdrawals: 0.0,
            net_cash_flow: 50.0,
            cash: net_worth,
            net_worth,
            savings_balances: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    #[test]
    fn test_summary_tracks_negative_years_and_peak() {
        let mut projection = Projection::new("s".into(), "S".into(), 2025, 50.0);
        for (year, nw) in [(2025, 80.0), (2026, -5.0), (2027, 10.0), (2028, -20.0)] {
            projection.add_year(row(year, nw));
        }

        let summary = &projection.summary;
        assert_eq!(summary.years, 4);
        assert_eq!(summary.total_income, 400.0);
        assert_eq!(summary.total_expenses, 160.0);
        assert_eq!(summary.total_savings_contributions, 40.0);
        assert_eq!(summary.first_negative_year, Some(2026));
        assert_eq!(summary.negative_years, vec![2026, 2028]);
        assert_eq!(summary.peak_net_worth, 80.0);
        assert_eq!(summary.final_net_worth, -20.0);
        assert_eq!(projection.year(2027).map(|r| r.net_worth), Some(10.0));
    }

    #[test]
    fn test_empty_projection_keeps_opening_values() {
        let projection = Projection::new("s".into(), "S".into(), 2025, 1_000.0);
        assert_eq!(projection.summary.final_net_worth, 1_000.0);
        assert_eq!(projection.summary.peak_net_worth, 1_000.0);
        assert!(projection.summary.first_negative_year.is_none());
    }
}
