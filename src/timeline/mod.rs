//! Time-series expanders: income events, expense bands and plan selection

mod bands;
mod events;
mod plans;

pub use bands::{band_year_range, BandEntry, BandSchedule, ExpenseBreakdown, ExpenseBucket};
pub use events::{
    base_income, custom_income, event_fires, household_income, resident_income, TriggerContext,
    YearIncome,
};
pub use plans::{select_active, TimeBounded};
