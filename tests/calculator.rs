//! 시나리오 단위 TCO 계산 검증.
use std::sync::Arc;

use chrono::NaiveDate;
use truck_tco_toolbox::presets::{sample_battery_electric, sample_diesel};
use truck_tco_toolbox::scenario::{
    DiscountTiming, FinancingMethod, ScenarioInput, VehicleParameters, VehicleType,
};
use truck_tco_toolbox::strategies::{CostCategory, CostStrategy, StrategyMethod};
use truck_tco_toolbox::{component_value, component_value_for_year, TcoCalculator, TcoError};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn calculator() -> TcoCalculator {
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
    TcoCalculator::new().with_calculation_date(date)
}

#[test]
fn npv_components_sum_to_total() {
    let calc = calculator();
    for scenario in [sample_battery_electric().expect("preset"), sample_diesel().expect("preset")] {
        let out = calc.calculate(&scenario).expect("calculate");
        let sum: f64 = CostCategory::ALL.iter().map(|c| out.npv_costs.get(*c)).sum();
        assert_close("npv sum", sum, out.total_tco, 1e-9);
        assert_close("lcod", out.lcod, out.total_tco / out.total_distance_km, 1e-12);
        assert_close("distance", out.total_distance_km, 1_500_000.0, 1e-12);
        assert_eq!(out.annual_costs.len(), 15);
        assert_eq!(out.metadata.strategies.len(), CostCategory::ALL.len());
    }
}

#[test]
fn annual_rows_are_discounted_into_npv() {
    let scenario = sample_diesel().expect("preset");
    let out = calculator().calculate(&scenario).expect("calculate");
    let expected: f64 = out
        .annual_costs
        .iter()
        .map(|row| row.energy / 1.07_f64.powi(row.year as i32))
        .sum();
    assert_close("energy npv", out.npv_costs.energy, expected, 1e-9);
    assert_eq!(out.annual_costs[0].calendar_year, 2025);
    assert_eq!(out.annual_costs[14].calendar_year, 2039);
}

#[test]
fn residual_value_only_in_last_year() {
    let scenario = sample_battery_electric().expect("preset");
    let out = calculator().calculate(&scenario).expect("calculate");
    let (last, rest) = out.annual_costs.split_last().expect("rows");
    assert!(rest.iter().all(|row| row.residual_value == 0.0));
    assert_close("residual", last.residual_value, -40_000.0, 1e-9);
    assert!(out.npv_costs.residual_value <= 0.0);
}

#[test]
fn diesel_has_no_battery_or_bev_only_costs() {
    let scenario = sample_diesel().expect("preset");
    let out = calculator().calculate(&scenario).expect("calculate");
    assert_eq!(out.npv_costs.battery_replacement, 0.0);
    assert_eq!(out.npv_costs.infrastructure, 0.0);
    assert!(out.npv_costs.carbon_tax > 0.0);
    assert_eq!(out.metadata.vehicle_type, VehicleType::Diesel);

    let bev = sample_battery_electric().expect("preset");
    let out = calculator().calculate(&bev).expect("calculate");
    assert_eq!(out.npv_costs.carbon_tax, 0.0);
    assert_close("battery year12", out.annual_costs[11].battery_replacement, 76_377.6, 1e-9);
}

#[test]
fn repeated_calculation_is_identical() {
    let scenario = sample_battery_electric().expect("preset");
    let calc = calculator();
    let a = calc.calculate(&scenario).expect("calculate");
    let b = calc.calculate(&scenario).expect("calculate");
    assert_eq!(a.total_tco.to_bits(), b.total_tco.to_bits());
    assert_eq!(a.annual_costs, b.annual_costs);
    assert_eq!(a.npv_costs, b.npv_costs);
    assert_eq!(a.metadata, b.metadata);
}

#[test]
fn single_year_period() {
    let mut scenario = sample_battery_electric().expect("preset");
    scenario.operational.analysis_period_years = 1;
    let out = calculator().calculate(&scenario).expect("calculate");
    assert_eq!(out.annual_costs.len(), 1);
    let row = &out.annual_costs[0];
    assert_eq!(row.acquisition, 0.0);
    assert_eq!(out.upfront_costs.acquisition, 400_000.0);
    // 0년 1.0, 5년 0.45 사이 보간 → 0.89
    assert_close("residual", row.residual_value, -356_000.0, 1e-9);
    assert_close(
        "npv",
        out.total_tco,
        out.upfront_costs.total() + row.total() / 1.07,
        1e-9,
    );
}

#[test]
fn invalid_inputs_are_rejected() {
    let calc = calculator();

    let mut zero_distance = sample_diesel().expect("preset");
    zero_distance.operational.annual_distance_km = 0.0;
    assert!(matches!(calc.calculate(&zero_distance), Err(TcoError::Validation(_))));

    let mut zero_period = sample_diesel().expect("preset");
    zero_period.operational.analysis_period_years = 0;
    assert!(matches!(calc.calculate(&zero_period), Err(TcoError::Validation(_))));

    let mut bad_profile = sample_diesel().expect("preset");
    bad_profile.operational.annual_distance_profile = Some(vec![100_000.0; 3]);
    assert!(matches!(calc.calculate(&bad_profile), Err(TcoError::Validation(_))));

    let mut nan_daily = sample_diesel().expect("preset");
    nan_daily.operational.daily_distance_km = f64::NAN;
    assert!(matches!(calc.calculate(&nan_daily), Err(TcoError::Validation(_))));

    let mut bad_residual = sample_diesel().expect("preset");
    if let VehicleParameters::Diesel(v) = &mut bad_residual.vehicle {
        v.residual_value.year_10 = 1.5;
    }
    assert!(matches!(calc.calculate(&bad_residual), Err(TcoError::Validation(_))));
}

#[test]
fn missing_tariff_is_configuration_error() {
    let mut scenario = sample_battery_electric().expect("preset");
    scenario.operational.charging.plan = "overnight".to_string();
    assert!(matches!(
        calculator().calculate(&scenario),
        Err(TcoError::Configuration(_))
    ));
}

#[derive(Debug)]
struct BrokenEnergy;

impl CostStrategy for BrokenEnergy {
    fn category(&self) -> CostCategory {
        CostCategory::Energy
    }

    fn name(&self) -> &'static str {
        "broken"
    }

    fn compute_for_year(&self, _scenario: &ScenarioInput, _year: u32) -> Result<f64, TcoError> {
        Ok(f64::NAN)
    }
}

#[test]
fn non_finite_strategy_output_is_calculation_error() {
    let mut calc = calculator();
    calc.factory_mut()
        .register(VehicleType::BatteryElectric, StrategyMethod::Standard, Arc::new(BrokenEnergy));
    let scenario = sample_battery_electric().expect("preset");
    assert!(matches!(calc.calculate(&scenario), Err(TcoError::Calculation(_))));
}

#[test]
fn component_accessors() {
    let scenario = sample_battery_electric().expect("preset");
    let out = calculator().calculate(&scenario).expect("calculate");

    assert_eq!(component_value(&out, "energy").expect("energy"), out.npv_costs.energy);
    assert_eq!(
        component_value(&out, "insurance_registration").expect("combined"),
        out.npv_costs.insurance + out.npv_costs.registration
    );
    assert_close(
        "taxes",
        component_value(&out, "taxes_levies").expect("combined"),
        out.npv_costs.carbon_tax + out.npv_costs.other_taxes,
        1e-12,
    );
    assert_close("total", component_value(&out, "total").expect("total"), out.total_tco, 1e-12);

    assert_eq!(component_value_for_year(&out, "acquisition", 0).expect("year 0"), 400_000.0);
    assert_eq!(component_value_for_year(&out, "acquisition", 1).expect("year 1"), 0.0);
    assert_close(
        "insurance y1",
        component_value_for_year(&out, "insurance_registration", 1).expect("year 1"),
        12_300.0 + 4_100.0,
        1e-9,
    );

    assert!(matches!(component_value(&out, "fuel_tax"), Err(TcoError::Validation(_))));
    assert_eq!(component_value_for_year(&out, "energy", 0).expect("year 0"), 0.0);
    assert!(matches!(
        component_value_for_year(&out, "energy", 16),
        Err(TcoError::Validation(_))
    ));
}

#[test]
fn upfront_capital_is_not_discounted() {
    let scenario = sample_battery_electric().expect("preset");
    let out = calculator().calculate(&scenario).expect("calculate");
    assert_eq!(out.npv_costs.acquisition, 400_000.0);
    assert_eq!(out.upfront_costs.acquisition, 400_000.0);
    assert_close("charger", out.upfront_costs.infrastructure, 50_000.0, 1e-12);
    assert_eq!(out.upfront_costs.energy, 0.0);
    assert_eq!(out.upfront_costs.year, 0);
    assert!(out.annual_costs.iter().all(|row| row.acquisition == 0.0));

    let expected_infra: f64 = 50_000.0
        + out
            .annual_costs
            .iter()
            .map(|row| row.infrastructure / 1.07_f64.powi(row.year as i32))
            .sum::<f64>();
    assert_close("infrastructure npv", out.npv_costs.infrastructure, expected_infra, 1e-9);
}

#[test]
fn discount_timing_shifts_running_costs_only() {
    let mut scenario = sample_battery_electric().expect("preset");
    let end = calculator().calculate(&scenario).expect("calculate");
    assert_close(
        "energy end of year",
        end.npv_costs.energy,
        end.annual_costs.iter().map(|r| r.energy / 1.07_f64.powi(r.year as i32)).sum(),
        1e-9,
    );

    let mut scenario = scenario.clone();
    scenario.economic.discount_timing = DiscountTiming::StartOfYear;
    let start = calculator().calculate(&scenario).expect("calculate");
    assert_eq!(start.npv_costs.acquisition, 400_000.0);
    assert_close("energy start of year", start.npv_costs.energy, end.npv_costs.energy * 1.07, 1e-9);
}

#[test]
fn distance_profile_drives_distance_costs() {
    let mut scenario = sample_diesel().expect("preset");
    let mut profile = vec![100_000.0; 15];
    profile[1] = 50_000.0;
    scenario.operational.annual_distance_profile = Some(profile);
    let out = calculator().calculate(&scenario).expect("calculate");
    assert_close("distance", out.total_distance_km, 1_450_000.0, 1e-12);

    let flat = sample_diesel().expect("preset");
    let flat_out = calculator().calculate(&flat).expect("calculate");
    assert_close(
        "year2 carbon",
        out.annual_costs[1].carbon_tax,
        flat_out.annual_costs[1].carbon_tax / 2.0,
        1e-9,
    );
    assert_close(
        "year3 unchanged",
        out.annual_costs[2].energy,
        flat_out.annual_costs[2].energy,
        1e-12,
    );
}

#[test]
fn loan_longer_than_period_warns() {
    let mut scenario = sample_battery_electric().expect("preset");
    assert!(calculator().calculate(&scenario).expect("calculate").warnings.is_empty());

    scenario.financing.method = FinancingMethod::Loan;
    scenario.financing.loan_term_years = 20;
    scenario.financing.loan_interest_rate = 0.05;
    scenario.financing.down_payment_fraction = 0.1;
    let out = calculator().calculate(&scenario).expect("calculate");
    assert_eq!(out.metadata.strategies.get(&CostCategory::Acquisition).map(String::as_str), Some("loan"));
    assert_eq!(out.warnings.len(), 1);
    assert!(out.annual_costs.iter().all(|row| row.acquisition > 0.0));
}

#[test]
fn emissions_follow_energy_use() {
    let diesel = sample_diesel().expect("preset");
    let out = calculator().calculate(&diesel).expect("calculate");
    let litres = 0.45 * 1.0625 * 100_000.0;
    assert_close("diesel y1", out.annual_emissions_tonnes[0], litres * 2.68 / 1000.0, 1e-9);
    assert_close(
        "total",
        out.total_emissions_tonnes,
        out.annual_emissions_tonnes.iter().sum(),
        1e-12,
    );

    let bev = sample_battery_electric().expect("preset");
    let bev_out = calculator().calculate(&bev).expect("calculate");
    assert!(bev_out.total_emissions_tonnes < out.total_emissions_tonnes);
}

#[test]
fn cumulative_costs_end_at_nominal_sum() {
    let scenario = sample_diesel().expect("preset");
    let out = calculator().calculate(&scenario).expect("calculate");
    let cumulative = out.cumulative_nominal_costs();
    let nominal: f64 = out.upfront_costs.total() + out.annual_costs.iter().map(|r| r.total()).sum::<f64>();
    assert_eq!(cumulative.len(), 16);
    assert_eq!(cumulative[0], 200_000.0);
    assert_close("cumulative", cumulative[15], nominal, 1e-12);
}
