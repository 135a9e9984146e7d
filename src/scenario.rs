//! Scenario runner for batch projections and insolvency comparison
//!
//! Projections share no mutable state, so batches run in parallel while the
//! results keep the input order.

use crate::household::Scenario;
use crate::projection::{Projection, ProjectionConfig, ProjectionEngine};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The scenario that goes insolvent first across a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarliestNegative {
    pub scenario_id: String,
    pub scenario_name: String,
    pub year: i32,
}

/// Projections for a set of scenarios plus the earliest negative year among them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub projections: Vec<Projection>,
    pub earliest_negative: Option<EarliestNegative>,
}

impl ScenarioComparison {
    /// Build a comparison from finished projections
    pub fn from_projections(projections: Vec<Projection>) -> Self {
        let earliest_negative = find_earliest_negative(&projections);
        Self {
            projections,
            earliest_negative,
        }
    }

    pub fn earliest_negative_year(&self) -> Option<i32> {
        self.earliest_negative.as_ref().map(|e| e.year)
    }
}

/// Scan summaries for the smallest first-negative year
///
/// Ties go to the scenario listed first.
pub fn find_earliest_negative(projections: &[Projection]) -> Option<EarliestNegative> {
    let mut earliest: Option<(&Projection, i32)> = None;

    for projection in projections {
        if let Some(year) = projection.summary.first_negative_year {
            match earliest {
                Some((_, best)) if best <= year => {}
                _ => earliest = Some((projection, year)),
            }
        }
    }

    earliest.map(|(projection, year)| EarliestNegative {
        scenario_id: projection.scenario_id.clone(),
        scenario_name: projection.scenario_name.clone(),
        year,
    })
}

/// Runs many scenarios with one shared configuration
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, scenario: &Scenario) -> Projection {
        self.engine.project_scenario(scenario)
    }

    /// Run projections for multiple scenarios in parallel, preserving order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<Projection> {
        scenarios
            .par_iter()
            .map(|scenario| self.engine.project_scenario(scenario))
            .collect()
    }

    /// Project every scenario and find which one turns negative first
    pub fn compare(&self, scenarios: &[Scenario]) -> ScenarioComparison {
        info!("Comparing {} scenarios", scenarios.len());
        let comparison = ScenarioComparison::from_projections(self.run_batch(scenarios));

        match &comparison.earliest_negative {
            Some(hit) => info!(
                "Earliest negative net worth: '{}' in {}",
                hit.scenario_id, hit.year
            ),
            None => info!("No scenario goes negative"),
        }

        comparison
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }
}

/// Compare scenarios under the same options
pub fn compare_scenarios(scenarios: &[Scenario], config: &ProjectionConfig) -> ScenarioComparison {
    ScenarioRunner::new(config.clone()).compare(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{LivingCosts, Resident};

    /// No income, 1,000,000/yr living costs, 6,500,000 cash: negative in year index 6
    fn drawdown(id: &str, start_year: i32) -> Scenario {
        let mut scenario = Scenario::new(id, format!("Drawdown {}", id), start_year);
        scenario.initial_cash = Some(6_500_000.0);
        scenario.living = Some(LivingCosts {
            base_annual: 1_000_000.0,
            ..Default::default()
        });
        scenario
    }

    fn solvent(id: &str) -> Scenario {
        let mut scenario = drawdown(id, 2025);
        scenario.residents.push(Resident {
            id: "earner".into(),
            name: "Earner".into(),
            current_age: 30,
            retirement_age: 90,
            base_net_income: 2_000_000.0,
            annual_income_growth_rate: 0.0,
            income_events: Vec::new(),
            expense_bands: Vec::new(),
        });
        scenario
    }

    #[test]
    fn test_compare_picks_only_negative_scenario() {
        let scenarios = vec![solvent("ok"), drawdown("tight", 2025)];
        let comparison = compare_scenarios(&scenarios, &ProjectionConfig::with_horizon(20));

        assert_eq!(comparison.projections.len(), 2);
        assert_eq!(comparison.projections[0].scenario_id, "ok");
        assert!(comparison.projections[0].summary.first_negative_year.is_none());
        assert_eq!(comparison.projections[1].summary.first_negative_year, Some(2031));

        assert_eq!(comparison.earliest_negative_year(), Some(2031));
        let hit = comparison.earliest_negative.as_ref().expect("one scenario goes negative");
        assert_eq!(hit.scenario_id, "tight");
        assert_eq!(hit.year, 2031);
    }

    #[test]
    fn test_compare_picks_smallest_year_and_first_on_tie() {
        let scenarios = vec![
            drawdown("late", 2030),
            drawdown("early-a", 2026),
            drawdown("early-b", 2026),
        ];
        let comparison = compare_scenarios(&scenarios, &ProjectionConfig::with_horizon(10));

        let hit = comparison.earliest_negative.unwrap();
        assert_eq!(hit.scenario_id, "early-a");
        assert_eq!(hit.year, 2032);
    }

    #[test]
    fn test_compare_none_negative() {
        let comparison = compare_scenarios(&[solvent("a"), solvent("b")], &ProjectionConfig::with_horizon(15));
        assert!(comparison.earliest_negative.is_none());
    }

    #[test]
    fn test_compare_empty_input() {
        let comparison = compare_scenarios(&[], &ProjectionConfig::default());
        assert!(comparison.projections.is_empty());
        assert!(comparison.earliest_negative.is_none());
    }

    #[test]
    fn test_compare_bundled_scenarios_uses_their_horizons() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/scenarios");
        let scenarios = crate::household::load_scenarios(&[
            dir.join("family_homeowners.json"),
            dir.join("renting_couple.json"),
        ])
        .unwrap();

        let comparison = compare_scenarios(&scenarios, &ProjectionConfig::default());
        assert_eq!(comparison.projections[0].years.len(), 50);
        assert_eq!(comparison.projections[1].years.len(), 45);
        for projection in &comparison.projections {
            assert_eq!(projection.years[0].year, 2025);
            assert!(projection.summary.total_income > 0.0);
        }
    }

    #[test]
    fn test_runner_keeps_its_config() {
        let config = ProjectionConfig {
            horizon_years: Some(7),
            realize_vehicle_disposal: true,
        };
        let runner = ScenarioRunner::new(config.clone());
        assert_eq!(runner.config(), &config);
        assert_eq!(runner.run(&drawdown("a", 2025)).years.len(), 7);
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::new(ProjectionConfig::with_horizon(12));
        let scenarios = vec![drawdown("a", 2025), solvent("b"), drawdown("c", 2040)];

        let batch = runner.run_batch(&scenarios);
        for (scenario, projection) in scenarios.iter().zip(&batch) {
            assert_eq!(&runner.run(scenario), projection);
        }
    }
}
