use super::energy::diesel_litres;
use super::{CostCategory, CostStrategy};
use crate::error::TcoError;
use crate::scenario::ScenarioInput;

/// 디젤 탄소세: 연료 사용량 기반 tCO2e × 해당 연도 탄소 가격.
#[derive(Debug, Clone, Copy, Default)]
pub struct DieselCarbonTax;

impl CostStrategy for DieselCarbonTax {
    fn category(&self) -> CostCategory {
        CostCategory::CarbonTax
    }

    fn name(&self) -> &'static str {
        "diesel-carbon"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let vehicle = scenario
            .vehicle
            .as_diesel()
            .ok_or_else(|| TcoError::configuration("탄소세 전략은 디젤차에만 적용할 수 있습니다."))?;
        let tonnes = diesel_litres(scenario, vehicle, year) * vehicle.co2_kg_per_litre / 1000.0;
        let calendar_year = scenario.economic.calendar_year(year);
        Ok(tonnes * scenario.economic.carbon_price_at(calendar_year))
    }
}

/// 전기차 km당 도로이용부담금. 설정이 없으면 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElectricRoadUserCharge;

impl CostStrategy for ElectricRoadUserCharge {
    fn category(&self) -> CostCategory {
        CostCategory::OtherTaxes
    }

    fn name(&self) -> &'static str {
        "electric-road-user-charge"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        Ok(scenario.taxes.electric_road_user_charge_per_km * scenario.distance_for_year(year))
    }
}

/// 디젤 L당 기타 세금. 설정이 없으면 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DieselFuelLevy;

impl CostStrategy for DieselFuelLevy {
    fn category(&self) -> CostCategory {
        CostCategory::OtherTaxes
    }

    fn name(&self) -> &'static str {
        "diesel-fuel-levy"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let vehicle = scenario
            .vehicle
            .as_diesel()
            .ok_or_else(|| TcoError::configuration("연료 부담금 전략은 디젤차에만 적용할 수 있습니다."))?;
        Ok(diesel_litres(scenario, vehicle, year) * scenario.taxes.diesel_other_tax_per_litre)
    }
}
