//! Housing, vehicle and living cost calculation with loan amortization

use crate::household::{HousingPlan, LivingPlan, OwnTerms, RentTerms, Tenure, VehicleProfile};

/// Costs, proceeds and event labels produced by one entity in one year
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostOutcome {
    /// Annual outflow
    pub cost: f64,

    /// One-time inflow (sale or disposal proceeds), counted as income
    pub proceeds: f64,

    pub events: Vec<String>,
}

impl CostOutcome {
    pub fn merge(&mut self, other: CostOutcome) {
        self.cost += other.cost;
        self.proceeds += other.proceeds;
        self.events.extend(other.events);
    }
}

fn display_label<'a>(label: &'a str, id: &'a str) -> &'a str {
    if label.is_empty() {
        id
    } else {
        label
    }
}

/// Pay down a loan by up to one year of installments
///
/// Returns the payment and whether this payment cleared the balance.
pub fn amortize(remaining: &mut f64, annual_installment: f64) -> (f64, bool) {
    if *remaining <= 0.0 || annual_installment <= 0.0 {
        return (0.0, false);
    }
    let payment = remaining.min(annual_installment);
    *remaining -= payment;
    if *remaining <= 0.0 {
        *remaining = 0.0;
        (payment, true)
    } else {
        (payment, false)
    }
}

/// Annual cost of the active housing plan
///
/// `mortgage_remaining` is the plan's run-local balance and is amortized in place.
pub fn housing_cost(plan: &HousingPlan, year_index: u32, mortgage_remaining: &mut f64) -> CostOutcome {
    let label = display_label(&plan.label, &plan.id);
    let is_start = year_index == plan.start_year_offset;
    let is_end = plan.end_year_offset == Some(year_index);

    match &plan.tenure {
        Tenure::Own(terms) => own_cost(terms, label, is_start, is_end, mortgage_remaining),
        Tenure::Rent(terms) => rent_cost(terms, label, is_start, is_end),
    }
}

fn own_cost(
    terms: &OwnTerms,
    label: &str,
    is_start: bool,
    is_end: bool,
    mortgage_remaining: &mut f64,
) -> CostOutcome {
    let mut outcome = CostOutcome::default();

    let (payment, paid_off) = amortize(mortgage_remaining, terms.monthly_mortgage * 12.0);
    if paid_off {
        outcome.events.push(format!("{}: mortgage paid off", label));
    }

    outcome.cost = payment
        + terms.management_fee_monthly * 12.0
        + terms.maintenance_reserve_monthly * 12.0
        + terms.extra_annual_costs.unwrap_or(0.0);

    if is_start {
        let purchase = terms.purchase_cost.unwrap_or(0.0);
        if purchase != 0.0 {
            outcome.cost += purchase;
            outcome.events.push(format!("{}: purchased", label));
        }
    }

    if is_end {
        let sale_value = terms.sale_value.unwrap_or(0.0);
        let outstanding = *mortgage_remaining;
        outcome.proceeds += sale_value - outstanding;
        *mortgage_remaining = 0.0;
        if sale_value != 0.0 || outstanding != 0.0 {
            outcome.events.push(format!("{}: sold", label));
        }
    }

    outcome
}

fn rent_cost(terms: &RentTerms, label: &str, is_start: bool, is_end: bool) -> CostOutcome {
    let mut outcome = CostOutcome {
        cost: terms.monthly_rent * 12.0
            + terms.monthly_fees.unwrap_or(0.0) * 12.0
            + terms.extra_annual_costs.unwrap_or(0.0),
        ..Default::default()
    };

    if is_start {
        let move_in = terms.move_in_cost.unwrap_or(0.0);
        if move_in != 0.0 {
            outcome.cost += move_in;
            outcome.events.push(format!("{}: move-in", label));
        }
    }

    if is_end {
        let move_out = terms.move_out_cost.unwrap_or(0.0);
        if move_out != 0.0 {
            outcome.cost += move_out;
            outcome.events.push(format!("{}: move-out", label));
        }
    }

    outcome
}

/// Annual cost of one vehicle
///
/// With `realize_disposal` off every vehicle is costed every year and its
/// purchase/disposal fields are ignored. With it on, the vehicle only costs
/// money between its purchase and disposal calendar years (inclusive), the
/// purchase price is charged in the purchase year, and the disposal year
/// realizes `disposal_value - loan_remaining`.
pub fn vehicle_cost(
    vehicle: &VehicleProfile,
    year_index: u32,
    calendar_year: i32,
    loan_remaining: &mut f64,
    realize_disposal: bool,
) -> CostOutcome {
    let label = display_label(&vehicle.label, &vehicle.id);
    let mut outcome = CostOutcome::default();

    if realize_disposal {
        let owned = vehicle.purchase_year.map_or(true, |y| calendar_year >= y)
            && vehicle.disposal_year.map_or(true, |y| calendar_year <= y);
        if !owned {
            return outcome;
        }
        if vehicle.purchase_year == Some(calendar_year) && vehicle.purchase_price != 0.0 {
            outcome.cost += vehicle.purchase_price;
            outcome.events.push(format!("{}: purchased", label));
        }
    }

    let (payment, paid_off) = amortize(loan_remaining, vehicle.monthly_loan * 12.0);
    outcome.cost += payment;
    if paid_off {
        outcome.events.push(format!("{}: loan paid off", label));
    }

    // Phase follows the scenario's year index, not the purchase year
    if vehicle.inspection_cycle_years > 0 && year_index % vehicle.inspection_cycle_years == 0 {
        outcome.cost += vehicle.inspection_cost;
        outcome.events.push(format!("{}: inspection", label));
    }

    outcome.cost += vehicle.maintenance_annual
        + vehicle.parking_monthly * 12.0
        + vehicle.insurance_annual.unwrap_or(0.0);

    if realize_disposal && vehicle.disposal_year == Some(calendar_year) {
        let outstanding = *loan_remaining;
        outcome.proceeds += vehicle.disposal_value - outstanding;
        *loan_remaining = 0.0;
        if vehicle.disposal_value != 0.0 || outstanding != 0.0 {
            outcome.events.push(format!("{}: sold", label));
        }
    }

    outcome
}

/// Living cost of the active plan, inflated from the plan's own start year
pub fn living_cost(plan: &LivingPlan, year_index: u32) -> f64 {
    let years_inflated = year_index.saturating_sub(plan.start_year_offset);
    let inflation = plan.costs.inflation_rate.unwrap_or(0.0);
    plan.costs.annual_total() * (1.0 + inflation).powi(years_inflated as i32)
}
