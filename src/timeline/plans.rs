//! Active plan selection among time-bounded housing and living plans

use crate::household::{HousingPlan, LivingPlan};

/// A plan active over an inclusive window of year offsets
pub trait TimeBounded {
    fn start_year_offset(&self) -> u32;
    fn end_year_offset(&self) -> Option<u32>;

    fn is_active(&self, year_index: u32) -> bool {
        year_index >= self.start_year_offset()
            && self.end_year_offset().map_or(true, |end| year_index <= end)
    }
}

impl TimeBounded for HousingPlan {
    fn start_year_offset(&self) -> u32 {
        self.start_year_offset
    }

    fn end_year_offset(&self) -> Option<u32> {
        self.end_year_offset
    }
}

impl TimeBounded for LivingPlan {
    fn start_year_offset(&self) -> u32 {
        self.start_year_offset
    }

    fn end_year_offset(&self) -> Option<u32> {
        self.end_year_offset
    }
}

/// Pick the active plan for a year: the most recently started one wins
///
/// On equal start offsets the plan listed first is kept.
pub fn select_active<T: TimeBounded>(plans: &[T], year_index: u32) -> Option<&T> {
    plans
        .iter()
        .filter(|plan| plan.is_active(year_index))
        .fold(None, |best: Option<&T>, plan| match best {
            Some(current) if current.start_year_offset() >= plan.start_year_offset() => Some(current),
            _ => Some(plan),
        })
}
