//! Expense band expansion and category aggregation

use crate::household::{ExpenseBand, ExpenseCategory, Resident, Scenario};
use serde::{Deserialize, Serialize};

/// Output bucket for categorized expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseBucket {
    Education,
    Housing,
    Vehicle,
    Living,
    Other,
}

impl From<ExpenseCategory> for ExpenseBucket {
    fn from(category: ExpenseCategory) -> Self {
        match category {
            ExpenseCategory::Education | ExpenseCategory::Lessons => ExpenseBucket::Education,
            ExpenseCategory::Housing => ExpenseBucket::Housing,
            ExpenseCategory::Vehicle => ExpenseBucket::Vehicle,
            ExpenseCategory::Living => ExpenseBucket::Living,
            ExpenseCategory::Event | ExpenseCategory::Other => ExpenseBucket::Other,
        }
    }
}

/// One band's contribution to a single year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEntry {
    pub category: ExpenseCategory,
    pub amount: f64,
}

/// Categorized expense totals for one year
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub education: f64,
    pub housing: f64,
    pub vehicle: f64,
    pub living: f64,
    pub other: f64,
}

impl ExpenseBreakdown {
    pub fn add(&mut self, bucket: ExpenseBucket, amount: f64) {
        match bucket {
            ExpenseBucket::Education => self.education += amount,
            ExpenseBucket::Housing => self.housing += amount,
            ExpenseBucket::Vehicle => self.vehicle += amount,
            ExpenseBucket::Living => self.living += amount,
            ExpenseBucket::Other => self.other += amount,
        }
    }

    /// Bucket a year's merged band entries
    pub fn from_entries(entries: &[BandEntry]) -> Self {
        let mut breakdown = Self::default();
        for entry in entries {
            breakdown.add(entry.category.into(), entry.amount);
        }
        breakdown
    }

    pub fn total(&self) -> f64 {
        self.education + self.housing + self.vehicle + self.living + self.other
    }
}

/// Band entries indexed by year, built once per projection
#[derive(Debug, Clone, Default)]
pub struct BandSchedule {
    years: Vec<Vec<BandEntry>>,
}

impl BandSchedule {
    /// Expand every resident and scenario band over the horizon
    pub fn build(scenario: &Scenario, horizon: u32) -> Self {
        let mut schedule = Self {
            years: vec![Vec::new(); horizon as usize],
        };

        for resident in &scenario.residents {
            for band in &resident.expense_bands {
                schedule.add_band(band, resident_anchor(resident));
            }
        }
        for band in &scenario.expense_bands {
            schedule.add_band(band, 0);
        }

        schedule
    }

    /// Entries for a year; empty outside the horizon
    pub fn entries(&self, year_index: u32) -> &[BandEntry] {
        self.years
            .get(year_index as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Categorized totals for a year
    pub fn breakdown(&self, year_index: u32) -> ExpenseBreakdown {
        ExpenseBreakdown::from_entries(self.entries(year_index))
    }

    fn add_band(&mut self, band: &ExpenseBand, anchor: i64) {
        if let Some(range) = band_year_range(band, anchor, self.years.len() as u32) {
            for index in range {
                self.years[index as usize].push(BandEntry {
                    category: band.category,
                    amount: band.annual_amount,
                });
            }
        }
    }
}

fn resident_anchor(resident: &Resident) -> i64 {
    resident.current_age as i64
}

/// Year indices covered by a band, clipped to `[0, horizon - 1]`
///
/// `anchor` is subtracted from the band bounds: the resident's current age for
/// age-anchored bands, zero for scenario bands.
pub fn band_year_range(
    band: &ExpenseBand,
    anchor: i64,
    horizon: u32,
) -> Option<std::ops::RangeInclusive<u32>> {
    if horizon == 0 {
        return None;
    }
    let start = (band.start_age as i64 - anchor).max(0);
    let end = (band.end_age as i64 - anchor).min(horizon as i64 - 1);
    if start > end {
        return None;
    }
    Some(start as u32..=end as u32)
}
