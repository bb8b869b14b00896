use super::{CostCategory, CostStrategy};
use crate::error::TcoError;
use crate::scenario::ScenarioInput;

/// 해당 연차 시작 시점의 감가된 차량 가치.
pub fn vehicle_value_at_start_of_year(scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
    let fraction = scenario
        .vehicle
        .residual_value()
        .fraction_at(year.saturating_sub(1))?;
    Ok(scenario.purchase_price() * fraction)
}

/// 차량 가치 비례 보험료.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueBasedInsurance;

impl CostStrategy for ValueBasedInsurance {
    fn category(&self) -> CostCategory {
        CostCategory::Insurance
    }

    fn name(&self) -> &'static str {
        "value-based"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let value = vehicle_value_at_start_of_year(scenario, year)?;
        Ok(value * scenario.insurance.insurance_rate * scenario.economic.inflation_factor(year))
    }
}

/// 정액 등록비.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRegistration;

impl CostStrategy for FlatRegistration {
    fn category(&self) -> CostCategory {
        CostCategory::Registration
    }

    fn name(&self) -> &'static str {
        "flat"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        Ok(scenario.insurance.registration_annual * scenario.economic.inflation_factor(year))
    }
}

/// 등록비에 km당 대형차 도로이용부담금을 더하는 방식.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoadUserChargeRegistration;

impl CostStrategy for RoadUserChargeRegistration {
    fn category(&self) -> CostCategory {
        CostCategory::Registration
    }

    fn name(&self) -> &'static str {
        "road-user-charge-adjusted"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let params = &scenario.insurance;
        let charge = params.heavy_vehicle_charge_per_km * scenario.distance_for_year(year);
        Ok((params.registration_annual + charge) * scenario.economic.inflation_factor(year))
    }
}
