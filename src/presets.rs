//! 기본 제공 예시 시나리오(대형 전기 트럭 vs 디젤 트럭).
//! 값은 참고용이며 실제 검토 시 최신 견적/요금으로 바꿔야 한다.

use std::collections::BTreeMap;

use crate::error::TcoError;
use crate::scenario::*;
use crate::timeseries::{SeriesValue, TimeSeries};

fn series(points: &[(i32, SeriesValue)]) -> Result<TimeSeries, TcoError> {
    TimeSeries::new(points.iter().copied())
}

/// 두 예시 시나리오가 공유하는 경제 조건.
pub fn sample_economics() -> Result<EconomicParameters, TcoError> {
    use SeriesValue::{Range, Scalar};

    let mut electricity_prices = BTreeMap::new();
    electricity_prices.insert(
        "depot".to_string(),
        series(&[
            (2025, Range(0.18, 0.26)),
            (2030, Range(0.16, 0.24)),
            (2040, Range(0.15, 0.22)),
        ])?,
    );
    electricity_prices.insert(
        "public".to_string(),
        series(&[(2025, Scalar(0.45)), (2035, Scalar(0.40))])?,
    );

    let mut diesel_prices = BTreeMap::new();
    diesel_prices.insert(
        "central".to_string(),
        series(&[(2025, Scalar(1.85)), (2030, Scalar(1.95)), (2040, Scalar(2.10))])?,
    );
    diesel_prices.insert(
        "low".to_string(),
        series(&[(2025, Scalar(1.70)), (2040, Scalar(1.75))])?,
    );
    diesel_prices.insert(
        "high".to_string(),
        series(&[(2025, Scalar(2.00)), (2040, Scalar(2.60))])?,
    );

    Ok(EconomicParameters {
        start_year: 2025,
        discount_rate_real: 0.07,
        inflation_rate: 0.025,
        discount_timing: DiscountTiming::EndOfYear,
        carbon_price: 30.0,
        carbon_price_growth: 0.05,
        carbon_price_base_year: Some(2025),
        price_band: Default::default(),
        electricity_prices,
        diesel_prices,
        adblue_price_per_litre: 1.0,
        grid_emission_factor_kg_per_kwh: 0.6,
    })
}

/// 연 10만 km, 15년 분석 운행 조건.
pub fn sample_operations() -> OperationalParameters {
    OperationalParameters {
        annual_distance_km: 100_000.0,
        operating_days_per_year: 250,
        analysis_period_years: 15,
        daily_distance_km: 400.0,
        duty_cycle: DutyCycle::Regional,
        charging: ChargingStrategy::default(),
        refuelling: RefuellingStrategy::default(),
        annual_distance_profile: None,
        charging_window_hours: 10.0,
    }
}

/// 구매가 40만의 대형 전기 트럭.
pub fn sample_battery_electric() -> Result<ScenarioInput, TcoError> {
    let vehicle = BatteryElectricParameters {
        name: "BEV Prime Mover".to_string(),
        purchase_price: 400_000.0,
        annual_price_decline: 0.0,
        price_reference_year: None,
        battery: BatteryParameters {
            capacity_kwh: 624.0,
            usable_capacity_fraction: 0.95,
            degradation_rate_annual: 0.03,
            replacement_threshold: 0.7,
            replacement_cost_factor: 1.2,
            projected_cost_per_kwh: series(&[
                (2025, SeriesValue::Scalar(180.0)),
                (2030, SeriesValue::Scalar(120.0)),
                (2040, SeriesValue::Scalar(90.0)),
            ])?,
            replacement_interval_years: Some(8),
        },
        consumption_kwh_per_km: 1.3,
        adjustments: ConsumptionAdjustments {
            load_factor: 0.05,
            hot_weather_increase: 0.05,
            cold_weather_increase: 0.10,
            hot_season_share: 0.25,
            cold_season_share: 0.25,
            regen_braking_offset: 0.05,
        },
        charging_efficiency: 0.9,
        max_charging_power_kw: 150.0,
        maintenance: MaintenanceParameters {
            cost_per_km: 0.08,
            annual_fixed_min: 3_000.0,
            annual_fixed_max: 5_000.0,
            age_escalation_rate: 0.03,
        },
        residual_value: ResidualCurve {
            year_5: 0.45,
            year_10: 0.25,
            year_15: 0.10,
        },
    };
    Ok(ScenarioInput {
        vehicle: VehicleParameters::BatteryElectric(vehicle),
        operational: sample_operations(),
        economic: sample_economics()?,
        financing: FinancingParameters::default(),
        infrastructure: Some(InfrastructureParameters {
            charger_hardware_cost: 100_000.0,
            installation_cost: 30_000.0,
            grid_upgrade_cost: 70_000.0,
            trucks_per_charger: 4.0,
            annual_maintenance_fraction: 0.02,
            charger_lifespan_years: None,
            diesel_refuelling: None,
        }),
        insurance: InsuranceParameters {
            insurance_rate: 0.03,
            registration_annual: 4_000.0,
            heavy_vehicle_charge_per_km: 0.03,
        },
        taxes: TaxParameters::default(),
        methods: MethodSelection::default(),
    })
}

/// 구매가 20만의 대형 디젤 트럭.
pub fn sample_diesel() -> Result<ScenarioInput, TcoError> {
    let vehicle = DieselParameters {
        name: "Diesel Prime Mover".to_string(),
        purchase_price: 200_000.0,
        engine_power_kw: 400.0,
        engine_displacement_l: 13.0,
        fuel_consumption_l_per_km: 0.45,
        adjustments: ConsumptionAdjustments {
            load_factor: 0.05,
            hot_weather_increase: 0.02,
            cold_weather_increase: 0.03,
            hot_season_share: 0.25,
            cold_season_share: 0.25,
            regen_braking_offset: 0.0,
        },
        adblue_fraction: 0.05,
        co2_kg_per_litre: 2.68,
        maintenance: MaintenanceParameters {
            cost_per_km: 0.15,
            annual_fixed_min: 5_000.0,
            annual_fixed_max: 8_000.0,
            age_escalation_rate: 0.04,
        },
        residual_value: ResidualCurve {
            year_5: 0.40,
            year_10: 0.20,
            year_15: 0.08,
        },
    };
    Ok(ScenarioInput {
        vehicle: VehicleParameters::Diesel(vehicle),
        operational: sample_operations(),
        economic: sample_economics()?,
        financing: FinancingParameters::default(),
        infrastructure: None,
        insurance: InsuranceParameters {
            insurance_rate: 0.03,
            registration_annual: 5_000.0,
            heavy_vehicle_charge_per_km: 0.03,
        },
        taxes: TaxParameters::default(),
        methods: MethodSelection::default(),
    })
}
