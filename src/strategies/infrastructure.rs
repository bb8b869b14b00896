use super::{CostCategory, CostStrategy};
use crate::error::TcoError;
use crate::scenario::{RefuellingInfrastructure, ScenarioInput};

/// 수명 경과로 설비를 재설치하는 연차인지 판단한다. 최초 설치는 0년차다.
fn is_renewal_year(year: u32, lifespan_years: Option<u32>) -> bool {
    match lifespan_years {
        Some(life) if life > 0 => year >= 1 && year % life == 0,
        _ => false,
    }
}

/// 전기차 충전 설비. 설비비는 공유 대수로 나눠 0년차에 부담하고 매년 유지비를 더한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargingInfrastructure;

impl CostStrategy for ChargingInfrastructure {
    fn category(&self) -> CostCategory {
        CostCategory::Infrastructure
    }

    fn name(&self) -> &'static str {
        "depot-charging"
    }

    fn upfront_cost(&self, scenario: &ScenarioInput) -> Result<f64, TcoError> {
        Ok(scenario
            .infrastructure
            .as_ref()
            .map_or(0.0, |infra| infra.charger_capital_per_truck()))
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let Some(infra) = &scenario.infrastructure else {
            return Ok(0.0);
        };
        let capital = infra.charger_capital_per_truck();
        let renewal = if is_renewal_year(year, infra.charger_lifespan_years) {
            capital
        } else {
            0.0
        };
        Ok(renewal + capital * infra.annual_maintenance_fraction)
    }
}

fn refuelling_site(scenario: &ScenarioInput) -> Option<&RefuellingInfrastructure> {
    scenario
        .infrastructure
        .as_ref()
        .and_then(|infra| infra.diesel_refuelling.as_ref())
}

/// 디젤 주유 설비. 별도로 모델링한 경우에만 비용이 발생한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefuellingInfrastructureCost;

impl CostStrategy for RefuellingInfrastructureCost {
    fn category(&self) -> CostCategory {
        CostCategory::Infrastructure
    }

    fn name(&self) -> &'static str {
        "diesel-refuelling"
    }

    fn upfront_cost(&self, scenario: &ScenarioInput) -> Result<f64, TcoError> {
        Ok(refuelling_site(scenario).map_or(0.0, |site| site.capital_cost / site.trucks_per_site))
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, _year: u32) -> Result<f64, TcoError> {
        let Some(site) = refuelling_site(scenario) else {
            return Ok(0.0);
        };
        let capital = site.capital_cost / site.trucks_per_site;
        Ok(capital * site.annual_maintenance_fraction)
    }
}
