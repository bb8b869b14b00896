//! 비용 항목별 전략 회귀 테스트. 기본 예시 시나리오 값 기준.
use truck_tco_toolbox::factory::StrategyFactory;
use truck_tco_toolbox::presets::{sample_battery_electric, sample_diesel};
use truck_tco_toolbox::scenario::{
    DutyCycle, FinancingMethod, InfrastructureParameters, RefuellingInfrastructure, ScenarioInput,
    VehicleParameters, VehicleType,
};
use truck_tco_toolbox::strategies::battery::{
    degradation_trace, DegradationState, FixedScheduleReplacement, ThresholdTriggeredReplacement,
};
use truck_tco_toolbox::strategies::energy::{DieselFuelCost, ElectricityCost};
use truck_tco_toolbox::strategies::financing::{CashPurchase, LoanPurchase};
use truck_tco_toolbox::strategies::infrastructure::{ChargingInfrastructure, RefuellingInfrastructureCost};
use truck_tco_toolbox::strategies::insurance::{FlatRegistration, RoadUserChargeRegistration, ValueBasedInsurance};
use truck_tco_toolbox::strategies::maintenance::{AgeBasedMaintenance, DistanceBasedMaintenance};
use truck_tco_toolbox::strategies::residual::ResidualValueCredit;
use truck_tco_toolbox::strategies::taxes::DieselCarbonTax;
use truck_tco_toolbox::strategies::{CostCategory, CostStrategy, StrategyMethod};
use truck_tco_toolbox::TcoError;

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn bev_mut(s: &mut ScenarioInput) -> &mut truck_tco_toolbox::scenario::BatteryElectricParameters {
    match &mut s.vehicle {
        VehicleParameters::BatteryElectric(v) => v,
        VehicleParameters::Diesel(_) => panic!("expected battery-electric"),
    }
}

#[test]
fn electricity_cost_applies_adjustments_and_efficiency() {
    let s = sample_battery_electric().expect("preset");
    // 1.3 kWh/km × (1 + 0.05 + 0.05×0.25 + 0.10×0.25) / 0.9 × 100,000 km × 0.22
    let y1 = ElectricityCost.compute_for_year(&s, 1).expect("energy");
    assert_close("year1", y1, 1.41375 / 0.9 * 100_000.0 * 0.22, 1e-9);
    // 2027: 0.22 → 0.20 구간 보간 = 0.212
    let y3 = ElectricityCost.compute_for_year(&s, 3).expect("energy");
    assert_close("year3", y3, 1.41375 / 0.9 * 100_000.0 * 0.212, 1e-9);
}

#[test]
fn regen_offset_only_for_urban_operation() {
    let mut s = sample_battery_electric().expect("preset");
    let regional = ElectricityCost.compute_for_year(&s, 1).expect("energy");
    s.operational.duty_cycle = DutyCycle::Urban;
    let urban = ElectricityCost.compute_for_year(&s, 1).expect("energy");
    assert_close("urban", urban, regional * 1.0375 / 1.0875, 1e-9);
}

#[test]
fn public_charging_blends_prices() {
    let mut s = sample_battery_electric().expect("preset");
    s.operational.charging.public_share = 0.5;
    let err = ElectricityCost.compute_for_year(&s, 1).unwrap_err();
    assert!(matches!(err, TcoError::Configuration(_)));

    s.operational.charging.public_plan = Some("public".to_string());
    let blended = ElectricityCost.compute_for_year(&s, 1).expect("energy");
    assert_close("blended", blended, 1.41375 / 0.9 * 100_000.0 * (0.22 + 0.45) / 2.0, 1e-9);
}

#[test]
fn missing_price_table_is_configuration_error() {
    let mut s = sample_diesel().expect("preset");
    s.operational.refuelling.price_scenario = "nonexistent".to_string();
    let err = DieselFuelCost.compute_for_year(&s, 1).unwrap_err();
    assert!(matches!(err, TcoError::Configuration(_)));
}

#[test]
fn diesel_fuel_includes_adblue() {
    let s = sample_diesel().expect("preset");
    let litres = 0.45 * 1.0625 * 100_000.0;
    let expected = litres * 1.85 + litres * 0.05 * 1.0;
    let y1 = DieselFuelCost.compute_for_year(&s, 1).expect("fuel");
    assert_close("diesel year1", y1, expected, 1e-9);
}

#[test]
fn carbon_tax_grows_from_base_year() {
    let s = sample_diesel().expect("preset");
    let tonnes = 0.45 * 1.0625 * 100_000.0 * 2.68 / 1000.0;
    let y1 = DieselCarbonTax.compute_for_year(&s, 1).expect("carbon");
    let y3 = DieselCarbonTax.compute_for_year(&s, 3).expect("carbon");
    assert_close("carbon y1", y1, tonnes * 30.0, 1e-9);
    assert_close("carbon y3", y3, tonnes * 30.0 * 1.05 * 1.05, 1e-9);
}

#[test]
fn maintenance_fixed_and_variable_parts() {
    let s = sample_battery_electric().expect("preset");
    let y1 = DistanceBasedMaintenance.compute_for_year(&s, 1).expect("maint");
    assert_close("distance y1", y1, 4_000.0 * 1.025 + 8_000.0, 1e-9);
    let y3 = AgeBasedMaintenance.compute_for_year(&s, 3).expect("maint");
    assert_close("age y3", y3, 4_000.0 * 1.025_f64.powi(3) + 8_000.0 * 1.06, 1e-9);
}

#[test]
fn diesel_maintenance_costs_more_per_km() {
    let bev = DistanceBasedMaintenance.compute_for_year(&sample_battery_electric().expect("preset"), 1).expect("bev");
    let diesel = DistanceBasedMaintenance.compute_for_year(&sample_diesel().expect("preset"), 1).expect("diesel");
    assert!(diesel > bev);
}

#[test]
fn degradation_state_resets_after_replacement() {
    let mut state = DegradationState::default();
    let mut replaced_years = Vec::new();
    for year in 1..=30 {
        let (next, replaced) = state.advance(0.03, 0.7);
        if replaced {
            replaced_years.push(year);
            assert_eq!(next.capacity_fraction, 1.0);
        }
        state = next;
    }
    // 0.97^12 < 0.7 <= 0.97^11
    assert_eq!(replaced_years, vec![12, 24]);
    assert_eq!(state.replacements, 2);
}

#[test]
fn threshold_replacement_charges_projected_pack_cost() {
    let s = sample_battery_electric().expect("preset");
    let series = ThresholdTriggeredReplacement.compute_series(&s).expect("battery");
    assert_eq!(series.len(), 15);
    for (i, cost) in series.iter().enumerate() {
        if i == 11 {
            // 2036년 kWh 단가: 120 → 90 구간 보간 = 102
            assert_close("year12", *cost, 102.0 * 624.0 * 1.2, 1e-9);
        } else {
            assert_eq!(*cost, 0.0, "year {}", i + 1);
        }
    }
    let single = ThresholdTriggeredReplacement.compute_for_year(&s, 12).expect("battery");
    assert_eq!(single, series[11]);
}

#[test]
fn zero_degradation_never_replaces() {
    let mut s = sample_battery_electric().expect("preset");
    bev_mut(&mut s).battery.degradation_rate_annual = 0.0;
    s.operational.analysis_period_years = 40;
    let series = ThresholdTriggeredReplacement.compute_series(&s).expect("battery");
    assert!(series.iter().all(|c| *c == 0.0));
    let trace = degradation_trace(&s, 40).expect("trace");
    assert!(trace.iter().all(|y| !y.replaced && y.capacity_fraction == 1.0));
}

#[test]
fn fixed_schedule_replacement() {
    let s = sample_battery_electric().expect("preset");
    let y8 = FixedScheduleReplacement.compute_for_year(&s, 8).expect("battery");
    assert_close("year8", y8, 114.0 * 624.0 * 1.2, 1e-9);
    assert_eq!(FixedScheduleReplacement.compute_for_year(&s, 7).expect("battery"), 0.0);

    let mut no_interval = s.clone();
    bev_mut(&mut no_interval).battery.replacement_interval_years = None;
    let err = FixedScheduleReplacement.compute_for_year(&no_interval, 8).unwrap_err();
    assert!(matches!(err, TcoError::Configuration(_)));
}

#[test]
fn charging_infrastructure_shared_capital() {
    let mut s = sample_battery_electric().expect("preset");
    assert_close("year0", ChargingInfrastructure.upfront_cost(&s).expect("infra"), 50_000.0, 1e-12);
    assert_close("y1", ChargingInfrastructure.compute_for_year(&s, 1).expect("infra"), 1_000.0, 1e-12);
    assert_close("y10", ChargingInfrastructure.compute_for_year(&s, 10).expect("infra"), 1_000.0, 1e-12);

    if let Some(infra) = s.infrastructure.as_mut() {
        infra.charger_lifespan_years = Some(10);
    }
    assert_close("y10 renewed", ChargingInfrastructure.compute_for_year(&s, 10).expect("infra"), 51_000.0, 1e-12);
    assert_close("y11", ChargingInfrastructure.compute_for_year(&s, 11).expect("infra"), 1_000.0, 1e-12);

    s.infrastructure = None;
    assert_eq!(ChargingInfrastructure.upfront_cost(&s).expect("infra"), 0.0);
    assert_eq!(ChargingInfrastructure.compute_for_year(&s, 1).expect("infra"), 0.0);
}

#[test]
fn diesel_refuelling_site_is_optional() {
    let mut s = sample_diesel().expect("preset");
    assert_eq!(RefuellingInfrastructureCost.upfront_cost(&s).expect("site"), 0.0);
    s.infrastructure = Some(InfrastructureParameters {
        charger_hardware_cost: 0.0,
        installation_cost: 0.0,
        grid_upgrade_cost: 0.0,
        trucks_per_charger: 1.0,
        annual_maintenance_fraction: 0.0,
        charger_lifespan_years: None,
        diesel_refuelling: Some(RefuellingInfrastructure {
            capital_cost: 120_000.0,
            trucks_per_site: 6.0,
            annual_maintenance_fraction: 0.05,
        }),
    });
    assert_close("year0", RefuellingInfrastructureCost.upfront_cost(&s).expect("site"), 20_000.0, 1e-12);
    assert_close("y3", RefuellingInfrastructureCost.compute_for_year(&s, 3).expect("site"), 1_000.0, 1e-12);
}

#[test]
fn cash_purchase_charged_at_year_zero() {
    let mut s = sample_battery_electric().expect("preset");
    s.financing.purchase_subsidy = 50_000.0;
    assert_eq!(CashPurchase.upfront_cost(&s).expect("cash"), 350_000.0);
    assert_eq!(CashPurchase.compute_for_year(&s, 1).expect("cash"), 0.0);
    assert_eq!(CashPurchase.compute_series(&s).expect("cash"), vec![0.0; 15]);
}

#[test]
fn loan_amortizes_within_term() {
    let mut s = sample_battery_electric().expect("preset");
    s.financing.method = FinancingMethod::Loan;
    s.financing.loan_term_years = 5;
    s.financing.loan_interest_rate = 0.06;
    s.financing.down_payment_fraction = 0.2;

    let principal = 320_000.0;
    let payment = principal * 0.06 / (1.0 - 1.06_f64.powi(-5));
    assert_close("down payment", LoanPurchase.upfront_cost(&s).expect("loan"), 80_000.0, 1e-12);
    assert_close("year1", LoanPurchase.compute_for_year(&s, 1).expect("loan"), payment, 1e-9);
    assert_close("year5", LoanPurchase.compute_for_year(&s, 5).expect("loan"), payment, 1e-9);
    assert_eq!(LoanPurchase.compute_for_year(&s, 6).expect("loan"), 0.0);

    // 무이자: 원금 균등 분할
    s.financing.loan_interest_rate = 0.0;
    assert_close("zero rate", LoanPurchase.compute_for_year(&s, 2).expect("loan"), 64_000.0, 1e-9);
}

#[test]
fn running_costs_have_no_upfront_part() {
    let s = sample_diesel().expect("preset");
    assert_eq!(DieselFuelCost.upfront_cost(&s).expect("fuel"), 0.0);
    assert_eq!(DistanceBasedMaintenance.upfront_cost(&s).expect("maint"), 0.0);
    assert_eq!(ResidualValueCredit.upfront_cost(&s).expect("residual"), 0.0);
}

#[test]
fn carbon_price_far_from_base_year() {
    let mut s = sample_diesel().expect("preset");
    s.economic.carbon_price_growth = 0.0;
    s.economic.carbon_price_base_year = Some(i32::MIN);
    assert_eq!(s.economic.carbon_price_at(i32::MAX), 30.0);
    s.economic.carbon_price_base_year = Some(i32::MAX);
    assert_eq!(s.economic.carbon_price_at(i32::MIN), 30.0);
}

#[test]
fn residual_only_in_final_year() {
    let s = sample_battery_electric().expect("preset");
    for year in 1..15 {
        assert_eq!(ResidualValueCredit.compute_for_year(&s, year).expect("residual"), 0.0);
    }
    assert_close("year15", ResidualValueCredit.compute_for_year(&s, 15).expect("residual"), -40_000.0, 1e-9);

    let mut short = s.clone();
    short.operational.analysis_period_years = 12;
    // 10년 0.25, 15년 0.10 사이 보간 → 0.19
    assert_close("year12", ResidualValueCredit.compute_for_year(&short, 12).expect("residual"), -76_000.0, 1e-9);
}

#[test]
fn insurance_follows_depreciated_value() {
    let s = sample_battery_electric().expect("preset");
    assert_close("y1", ValueBasedInsurance.compute_for_year(&s, 1).expect("ins"), 400_000.0 * 0.03 * 1.025, 1e-9);
    let y6 = ValueBasedInsurance.compute_for_year(&s, 6).expect("ins");
    assert_close("y6", y6, 400_000.0 * 0.45 * 0.03 * 1.025_f64.powi(6), 1e-9);
}

#[test]
fn registration_variants() {
    let s = sample_battery_electric().expect("preset");
    assert_close("flat", FlatRegistration.compute_for_year(&s, 1).expect("reg"), 4_100.0, 1e-9);
    assert_close(
        "ruc",
        RoadUserChargeRegistration.compute_for_year(&s, 1).expect("reg"),
        (4_000.0 + 3_000.0) * 1.025,
        1e-9,
    );
}

#[test]
fn factory_resolves_one_strategy_per_category() {
    let factory = StrategyFactory::with_defaults();
    for scenario in [sample_battery_electric().expect("preset"), sample_diesel().expect("preset")] {
        let set = factory.resolve_for(&scenario).expect("strategies");
        let categories: Vec<CostCategory> = set.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, CostCategory::ALL.to_vec());
        for (category, strategy) in set.iter() {
            assert_eq!(strategy.category(), category);
        }
    }
}

#[test]
fn factory_rejects_unregistered_combination() {
    let factory = StrategyFactory::with_defaults();
    let err = factory
        .resolve(CostCategory::Maintenance, VehicleType::Diesel, StrategyMethod::Loan)
        .unwrap_err();
    assert!(matches!(err, TcoError::Configuration(_)));

    let err = StrategyFactory::empty()
        .resolve(CostCategory::Energy, VehicleType::BatteryElectric, StrategyMethod::Standard)
        .unwrap_err();
    assert!(matches!(err, TcoError::Configuration(_)));
}

#[test]
fn factory_uses_scenario_method_selection() {
    let factory = StrategyFactory::with_defaults();
    let mut s = sample_battery_electric().expect("preset");
    s.methods.maintenance = StrategyMethod::AgeBased;
    s.methods.battery_replacement = StrategyMethod::FixedSchedule;
    let set = factory.resolve_for(&s).expect("strategies");
    assert_eq!(set.get(CostCategory::Maintenance).map(|st| st.name()), Some("age-based"));
    assert_eq!(set.get(CostCategory::BatteryReplacement).map(|st| st.name()), Some("fixed-schedule"));
}
