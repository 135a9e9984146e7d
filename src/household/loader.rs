//! Load scenarios from JSON and fold legacy single-profile forms into plan lists

use super::{HousingPlan, LivingPlan, Scenario};
use crate::error::{Result, ScenarioError};
use log::{debug, info};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Id given to a housing plan created from the legacy `housing` profile
pub const LEGACY_HOUSING_PLAN_ID: &str = "legacy-housing";

/// Id given to a living plan created from the legacy `living` profile
pub const LEGACY_LIVING_PLAN_ID: &str = "legacy-living";

/// Return a copy of the scenario with legacy profiles folded into plan lists
///
/// A legacy profile becomes a single open-ended plan starting at offset 0, and
/// only when the corresponding plan list is empty. The input is left untouched.
pub fn normalize(scenario: &Scenario) -> Scenario {
    let mut normalized = scenario.clone();

    if let Some(tenure) = normalized.housing.take() {
        if normalized.housing_plans.is_empty() {
            normalized.housing_plans.push(HousingPlan {
                id: LEGACY_HOUSING_PLAN_ID.to_string(),
                label: "Housing".to_string(),
                start_year_offset: 0,
                end_year_offset: None,
                tenure,
            });
        }
    }

    if let Some(costs) = normalized.living.take() {
        if normalized.living_plans.is_empty() {
            normalized.living_plans.push(LivingPlan {
                id: LEGACY_LIVING_PLAN_ID.to_string(),
                label: "Living".to_string(),
                start_year_offset: 0,
                end_year_offset: None,
                costs,
            });
        }
    }

    normalized
}

/// Check that every nested entity id is unique within its collection
pub fn validate_ids(scenario: &Scenario) -> Result<()> {
    fn unique<'a>(
        scenario: &Scenario,
        entity: &'static str,
        ids: impl Iterator<Item = &'a str>,
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(ScenarioError::DuplicateId {
                    scenario: scenario.id.clone(),
                    entity,
                    id: id.to_string(),
                });
            }
        }
        Ok(())
    }

    unique(scenario, "resident", scenario.residents.iter().map(|r| r.id.as_str()))?;
    unique(scenario, "housing plan", scenario.housing_plans.iter().map(|p| p.id.as_str()))?;
    unique(scenario, "vehicle", scenario.vehicles.iter().map(|v| v.id.as_str()))?;
    unique(scenario, "living plan", scenario.living_plans.iter().map(|p| p.id.as_str()))?;
    unique(scenario, "savings account", scenario.savings_accounts.iter().map(|a| a.id.as_str()))?;
    Ok(())
}

/// Load, normalize and validate a scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let scenario = parse_scenario(BufReader::new(file), &path.display().to_string())?;
    info!(
        "Loaded scenario '{}' from {} ({} residents, {} accounts)",
        scenario.id,
        path.display(),
        scenario.residents.len(),
        scenario.savings_accounts.len()
    );
    Ok(scenario)
}

/// Load a scenario from any reader (e.g., string buffer, network stream)
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<Scenario> {
    parse_scenario(reader, "<reader>")
}

/// Load several scenario files, preserving their order
pub fn load_scenarios<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Scenario>> {
    paths.iter().map(load_scenario).collect()
}

fn parse_scenario<R: Read>(reader: R, origin: &str) -> Result<Scenario> {
    let raw: Scenario = serde_json::from_reader(reader).map_err(|source| ScenarioError::Json {
        origin: origin.to_string(),
        source,
    })?;

    let scenario = normalize(&raw);
    validate_ids(&scenario)?;
    debug!(
        "Normalized scenario '{}': {} housing plans, {} living plans",
        scenario.id,
        scenario.housing_plans.len(),
        scenario.living_plans.len()
    );
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{LivingCosts, RentTerms, Tenure};

    #[test]
    fn test_normalize_folds_legacy_profiles() {
        let mut scenario = Scenario::new("s", "Legacy", 2025);
        scenario.housing = Some(Tenure::Rent(RentTerms {
            monthly_rent: 120_000.0,
            ..Default::default()
        }));
        scenario.living = Some(LivingCosts {
            base_annual: 3_000_000.0,
            ..Default::default()
        });

        let normalized = normalize(&scenario);

        assert!(normalized.housing.is_none());
        assert!(normalized.living.is_none());
        assert_eq!(normalized.housing_plans.len(), 1);
        assert_eq!(normalized.housing_plans[0].id, LEGACY_HOUSING_PLAN_ID);
        assert_eq!(normalized.housing_plans[0].start_year_offset, 0);
        assert!(normalized.housing_plans[0].end_year_offset.is_none());
        assert_eq!(normalized.living_plans.len(), 1);
        assert_eq!(normalized.living_plans[0].costs.base_annual, 3_000_000.0);

        // Caller's scenario is untouched
        assert!(scenario.housing.is_some());
        assert!(scenario.housing_plans.is_empty());
    }

    #[test]
    fn test_normalize_keeps_existing_plans() {
        let mut scenario = Scenario::new("s", "Mixed", 2025);
        scenario.living_plans.push(LivingPlan {
            id: "lp".into(),
            label: "Plan".into(),
            start_year_offset: 0,
            end_year_offset: Some(9),
            costs: LivingCosts { base_annual: 1.0, ..Default::default() },
        });
        scenario.living = Some(LivingCosts { base_annual: 2.0, ..Default::default() });

        let normalized = normalize(&scenario);
        assert_eq!(normalized.living_plans.len(), 1);
        assert_eq!(normalized.living_plans[0].id, "lp");
    }

    #[test]
    fn test_load_from_reader() {
        let json = r#"{
            "id": "couple",
            "name": "Renting couple",
            "startYear": 2025,
            "horizonYears": 20,
            "residents": [
                {"id": "r1", "currentAge": 32, "retirementAge": 65, "baseNetIncome": 4000000,
                 "annualIncomeGrowthRate": 0.02,
                 "incomeEvents": [{"id": "e1", "label": "Bonus", "amount": 500000,
                                   "type": "bonus", "triggerYearOffset": 1, "repeatEveryYears": 2}]}
            ],
            "housing": {"type": "rent", "monthlyRent": 110000},
            "living": {"baseAnnual": 2400000, "inflationRate": 0.01},
            "savingsAccounts": [
                {"id": "dep", "type": "deposit", "balance": 2000000, "annualContribution": 300000}
            ]
        }"#;

        let scenario = load_scenario_from_reader(json.as_bytes()).unwrap();
        assert_eq!(scenario.start_year, 2025);
        assert_eq!(scenario.horizon(None), 20);
        assert_eq!(scenario.housing_plans.len(), 1);
        assert_eq!(scenario.living_plans.len(), 1);
        assert_eq!(scenario.residents[0].income_events[0].repeat_every_years, Some(2));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{
            "id": "dup",
            "startYear": 2025,
            "savingsAccounts": [
                {"id": "a", "type": "deposit"},
                {"id": "a", "type": "investment"}
            ]
        }"#;

        let err = load_scenario_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::DuplicateId { entity: "savings account", .. }
        ));
    }

    #[test]
    fn test_invalid_json_reports_origin() {
        let err = load_scenario_from_reader("{ not json".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("<reader>"));
    }

    #[test]
    fn test_load_bundled_scenarios() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/scenarios");
        let scenarios = load_scenarios(&[
            dir.join("family_homeowners.json"),
            dir.join("renting_couple.json"),
        ])
        .expect("bundled scenarios should load");

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].id, "family-homeowners");
        assert!(!scenarios[0].housing_plans.is_empty());
        assert!(!scenarios[1].living_plans.is_empty());
    }
}
