use super::{CostCategory, CostStrategy};
use crate::error::TcoError;
use crate::scenario::{
    BatteryElectricParameters, DieselParameters, DutyCycle, ScenarioInput, VehicleParameters,
};

/// 보정이 반영된 전력 소비율 [kWh/km]. 회생제동 절감은 도심 운행에서만 적용한다.
pub fn electricity_kwh_per_km(vehicle: &BatteryElectricParameters, duty: DutyCycle) -> f64 {
    vehicle.consumption_kwh_per_km * vehicle.adjustments.net_factor(duty == DutyCycle::Urban)
}

/// 보정이 반영된 연료 소비율 [L/km].
pub fn diesel_litres_per_km(vehicle: &DieselParameters) -> f64 {
    vehicle.fuel_consumption_l_per_km * vehicle.adjustments.net_factor(false)
}

/// 충전기 입력 기준(충전 손실 포함) 연간 전력량 [kWh].
pub fn grid_energy_kwh(scenario: &ScenarioInput, vehicle: &BatteryElectricParameters, year: u32) -> f64 {
    let rate = electricity_kwh_per_km(vehicle, scenario.operational.duty_cycle);
    rate * scenario.distance_for_year(year) / vehicle.charging_efficiency
}

/// 연간 연료 사용량 [L].
pub fn diesel_litres(scenario: &ScenarioInput, vehicle: &DieselParameters, year: u32) -> f64 {
    diesel_litres_per_km(vehicle) * scenario.distance_for_year(year)
}

/// 연간 운행 배출량 [tCO2e]. 전기차는 전력망 배출계수를 사용한다.
pub fn annual_emissions_tonnes(scenario: &ScenarioInput, year: u32) -> f64 {
    match &scenario.vehicle {
        VehicleParameters::BatteryElectric(v) => {
            grid_energy_kwh(scenario, v, year) * scenario.economic.grid_emission_factor_kg_per_kwh
                / 1000.0
        }
        VehicleParameters::Diesel(v) => diesel_litres(scenario, v, year) * v.co2_kg_per_litre / 1000.0,
    }
}

/// 차고지/공용 충전 혼합 요금 [통화/kWh].
fn blended_electricity_price(scenario: &ScenarioInput, calendar_year: i32) -> Result<f64, TcoError> {
    let charging = &scenario.operational.charging;
    let economic = &scenario.economic;
    let depot = economic.electricity_price(&charging.plan, calendar_year)?;
    if charging.public_share <= 0.0 {
        return Ok(depot);
    }
    let public_plan = charging.public_plan.as_deref().ok_or_else(|| {
        TcoError::configuration("공용 충전 비중이 있으나 공용 요금제가 지정되지 않았습니다.")
    })?;
    let public = economic.electricity_price(public_plan, calendar_year)?;
    Ok(depot * (1.0 - charging.public_share) + public * charging.public_share)
}

/// 전기차 충전 비용.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElectricityCost;

impl CostStrategy for ElectricityCost {
    fn category(&self) -> CostCategory {
        CostCategory::Energy
    }

    fn name(&self) -> &'static str {
        "electricity"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let vehicle = scenario.vehicle.as_battery_electric().ok_or_else(|| {
            TcoError::configuration("전기요금 전략은 전기차에만 적용할 수 있습니다.")
        })?;
        let calendar_year = scenario.economic.calendar_year(year);
        let price = blended_electricity_price(scenario, calendar_year)?;
        Ok(grid_energy_kwh(scenario, vehicle, year) * price)
    }
}

/// 디젤 연료 + 요소수 비용.
#[derive(Debug, Clone, Copy, Default)]
pub struct DieselFuelCost;

impl CostStrategy for DieselFuelCost {
    fn category(&self) -> CostCategory {
        CostCategory::Energy
    }

    fn name(&self) -> &'static str {
        "diesel-fuel"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let vehicle = scenario.vehicle.as_diesel().ok_or_else(|| {
            TcoError::configuration("연료비 전략은 디젤차에만 적용할 수 있습니다.")
        })?;
        let economic = &scenario.economic;
        let calendar_year = economic.calendar_year(year);
        let price = economic.diesel_price(&scenario.operational.refuelling.price_scenario, calendar_year)?;
        let litres = diesel_litres(scenario, vehicle, year);
        let adblue = litres * vehicle.adblue_fraction * economic.adblue_price_per_litre;
        Ok(litres * price + adblue)
    }
}
