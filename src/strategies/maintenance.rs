use super::{CostCategory, CostStrategy};
use crate::error::TcoError;
use crate::scenario::ScenarioInput;

/// 고정분: 하한/상한 중간값에 (1+물가)^year를 곱한다.
fn fixed_component(scenario: &ScenarioInput, year: u32) -> f64 {
    scenario.vehicle.maintenance().fixed_midpoint() * scenario.economic.inflation_factor(year)
}

/// 주행거리 비례 정비비 (기본 방식).
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceBasedMaintenance;

impl CostStrategy for DistanceBasedMaintenance {
    fn category(&self) -> CostCategory {
        CostCategory::Maintenance
    }

    fn name(&self) -> &'static str {
        "distance-based"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let variable = scenario.vehicle.maintenance().cost_per_km * scenario.distance_for_year(year);
        Ok(fixed_component(scenario, year) + variable)
    }
}

/// 차령이 늘수록 변동 정비비가 선형으로 증가하는 방식.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeBasedMaintenance;

impl CostStrategy for AgeBasedMaintenance {
    fn category(&self) -> CostCategory {
        CostCategory::Maintenance
    }

    fn name(&self) -> &'static str {
        "age-based"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let params = scenario.vehicle.maintenance();
        let age = f64::from(year.saturating_sub(1));
        let escalation = 1.0 + params.age_escalation_rate * age;
        let variable = params.cost_per_km * scenario.distance_for_year(year) * escalation;
        Ok(fixed_component(scenario, year) + variable)
    }
}
