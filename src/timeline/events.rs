//! Income event timing and per-year income expansion

use crate::household::{IncomeEvent, Resident};

/// What the timing rule needs to know about the year being evaluated
#[derive(Debug, Clone, Copy)]
pub struct TriggerContext {
    /// Zero-based year index
    pub year_index: u32,

    /// Owning resident's age; `None` for scenario-level events
    pub age: Option<u32>,
}

impl TriggerContext {
    pub fn for_resident(resident: &Resident, year_index: u32) -> Self {
        Self {
            year_index,
            age: Some(resident.age_at(year_index)),
        }
    }

    pub fn for_scenario(year_index: u32) -> Self {
        Self { year_index, age: None }
    }
}

/// Decide whether an income event contributes in the given year
///
/// Age triggers are evaluated only when the context carries an age; otherwise
/// the year-offset trigger is used. Events with no usable trigger never fire.
pub fn event_fires(event: &IncomeEvent, ctx: &TriggerContext) -> bool {
    let (current, trigger) = match (event.trigger_age, ctx.age, event.trigger_year_offset) {
        (Some(trigger_age), Some(age), _) => (age as i64, trigger_age as i64),
        (_, _, Some(offset)) => (ctx.year_index as i64, offset as i64),
        _ => return false,
    };

    let diff = current - trigger;
    if diff < 0 {
        return false;
    }

    if let Some(duration) = event.duration_years.filter(|&d| d > 0) {
        return diff < duration as i64;
    }

    match event.repeat_every_years.filter(|&n| n > 0) {
        Some(every) => diff % every as i64 == 0,
        None => diff == 0,
    }
}

/// Income contributed in one year, with the labels of the events that fired
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearIncome {
    pub total: f64,
    pub events: Vec<String>,
}

impl YearIncome {
    fn add_events(&mut self, events: &[IncomeEvent], ctx: &TriggerContext, owner: Option<&str>) {
        for event in events.iter().filter(|e| event_fires(e, ctx)) {
            self.total += event.amount;
            self.events.push(match owner {
                Some(name) if !name.is_empty() => format!("{}: {}", name, event_label(event)),
                _ => event_label(event).to_string(),
            });
        }
    }
}

fn event_label(event: &IncomeEvent) -> &str {
    if event.label.is_empty() {
        &event.id
    } else {
        &event.label
    }
}

/// Base income for a resident: grows while working, zero after retirement age
pub fn base_income(resident: &Resident, year_index: u32) -> f64 {
    if resident.is_working(year_index) {
        resident.base_net_income * (1.0 + resident.annual_income_growth_rate).powi(year_index as i32)
    } else {
        0.0
    }
}

/// Base income plus fired events for one resident
pub fn resident_income(resident: &Resident, year_index: u32) -> YearIncome {
    let mut income = YearIncome {
        total: base_income(resident, year_index),
        events: Vec::new(),
    };
    let ctx = TriggerContext::for_resident(resident, year_index);
    income.add_events(&resident.income_events, &ctx, Some(resident.name.as_str()));
    income
}

/// Scenario-level custom income for one year
pub fn custom_income(events: &[IncomeEvent], year_index: u32) -> YearIncome {
    let mut income = YearIncome::default();
    income.add_events(events, &TriggerContext::for_scenario(year_index), None);
    income
}

/// Total household income for one year across residents and custom events
pub fn household_income(residents: &[Resident], custom: &[IncomeEvent], year_index: u32) -> YearIncome {
    let mut total = YearIncome::default();
    for resident in residents {
        let income = resident_income(resident, year_index);
        total.total += income.total;
        total.events.extend(income.events);
    }
    let custom = custom_income(custom, year_index);
    total.total += custom.total;
    total.events.extend(custom.events);
    total
}
