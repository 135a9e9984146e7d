//! CSV export of yearly breakdowns

use super::cashflows::{Projection, YearlyBreakdown};
use crate::error::{Result, ScenarioError};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Flat CSV row; nested maps are summarized or joined
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow<'a> {
    year: i32,
    year_index: u32,
    income: f64,
    education: f64,
    housing: f64,
    vehicle: f64,
    living: f64,
    other: f64,
    total_expenses: f64,
    savings_contributions: f64,
    savings_withdrawals: f64,
    net_cash_flow: f64,
    cash: f64,
    savings_total: f64,
    net_worth: f64,
    events: &'a str,
}

/// Write one row per simulated year to any writer
pub fn write_csv<W: Write>(projection: &Projection, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in &projection.years {
        let events = row.events.join("; ");
        csv_writer.serialize(to_csv_row(row, &events))?;
    }

    csv_writer.flush().map_err(|e| ScenarioError::Csv(e.into()))?;
    Ok(())
}

/// Write the projection CSV to a file
pub fn write_csv_file<P: AsRef<Path>>(projection: &Projection, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(projection, file)
}

fn to_csv_row<'a>(row: &YearlyBreakdown, events: &'a str) -> CsvRow<'a> {
    CsvRow {
        year: row.year,
        year_index: row.year_index,
        income: row.income,
        education: row.expenses.education,
        housing: row.expenses.housing,
        vehicle: row.expenses.vehicle,
        living: row.expenses.living,
        other: row.expenses.other,
        total_expenses: row.total_expenses,
        savings_contributions: row.savings_contributions,
        savings_withdrawals: row.savings_withdrawals,
        net_cash_flow: row.net_cash_flow,
        cash: row.cash,
        savings_total: row.savings_balances.values().sum(),
        net_worth: row.net_worth,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{IncomeEvent, IncomeEventKind, Scenario};
    use crate::projection::{simulate_scenario, ProjectionConfig};

    #[test]
    fn test_csv_has_header_and_one_row_per_year() {
        let mut scenario = Scenario::new("csv", "CSV", 2030);
        scenario.initial_cash = Some(1_000.0);
        scenario.custom_income_events.push(IncomeEvent {
            id: "gift".into(),
            label: "Gift".into(),
            amount: 500.0,
            kind: IncomeEventKind::Bonus,
            trigger_age: None,
            trigger_year_offset: Some(1),
            repeat_every_years: None,
            duration_years: None,
        });
        let projection = simulate_scenario(&scenario, &ProjectionConfig::with_horizon(3));

        let mut buffer = Vec::new();
        write_csv(&projection, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Year,YearIndex,Income,Education"));
        assert!(lines[0].ends_with("NetWorth,Events"));
        assert!(lines[1].starts_with("2030,0,"));
        assert!(lines[2].ends_with(",Gift"));
    }
}
