//! TOML 시나리오 파일 입출력 검증.
use truck_tco_toolbox::config::{self, Config, ConfigError};
use truck_tco_toolbox::presets::{sample_battery_electric, sample_diesel};
use truck_tco_toolbox::scenario::{DutyCycle, VehicleType};
use truck_tco_toolbox::strategies::StrategyMethod;
use truck_tco_toolbox::{PriceBand, TcoCalculator};

const DIESEL_TOML: &str = r#"
[vehicle]
type = "Diesel"
name = "Linehaul Diesel"
purchase_price = 180000.0
engine_power_kw = 350.0
engine_displacement_l = 12.8
fuel_consumption_l_per_km = 0.40
co2_kg_per_litre = 2.68

[vehicle.maintenance]
cost_per_km = 0.12
annual_fixed_min = 4000.0
annual_fixed_max = 6000.0

[vehicle.residual_value]
year_5 = 0.4
year_10 = 0.2
year_15 = 0.1

[operational]
annual_distance_km = 90000.0
operating_days_per_year = 300
analysis_period_years = 10
daily_distance_km = 300.0
duty_cycle = "Linehaul"

[economic]
start_year = 2026
discount_rate_real = 0.05
inflation_rate = 0.02
carbon_price = 25.0

[[economic.diesel_prices.central]]
year = 2025
value = [1.80, 2.00]

[[economic.diesel_prices.central]]
year = 2035
value = 2.10
"#;

#[test]
fn hand_written_diesel_scenario() {
    let scenario = config::parse_scenario(DIESEL_TOML).expect("parse");
    assert_eq!(scenario.vehicle_type(), VehicleType::Diesel);
    assert_eq!(scenario.vehicle.name(), "Linehaul Diesel");
    assert_eq!(scenario.operational.duty_cycle, DutyCycle::Linehaul);
    assert_eq!(scenario.operational.refuelling.price_scenario, "central");
    assert_eq!(scenario.operational.charging_window_hours, 10.0);
    assert_eq!(scenario.methods.maintenance, StrategyMethod::DistanceBased);
    assert!(scenario.infrastructure.is_none());

    let mid = scenario.economic.diesel_price("central", 2030).expect("price");
    assert!((mid - 2.0).abs() < 1e-12, "mid={mid}");

    let mut low = scenario.clone();
    low.economic.price_band = PriceBand::Low;
    let low_price = low.economic.diesel_price("central", 2030).expect("price");
    assert!((low_price - 1.95).abs() < 1e-12, "low={low_price}");

    let out = TcoCalculator::new().calculate(&scenario).expect("calculate");
    assert_eq!(out.annual_costs.len(), 10);
    assert_eq!(out.annual_costs[0].calendar_year, 2026);
    assert_eq!(out.npv_costs.insurance, 0.0);
    assert!(out.total_tco > 0.0);
}

#[test]
fn presets_survive_toml_round_trip() {
    for preset in [sample_battery_electric().expect("preset"), sample_diesel().expect("preset")] {
        let text = config::scenario_to_toml(&preset).expect("serialize");
        let parsed = config::parse_scenario(&text).expect("parse");
        assert_eq!(parsed, preset);
    }
}

#[test]
fn malformed_scenarios_are_rejected() {
    let unknown_type = DIESEL_TOML.replace("type = \"Diesel\"", "type = \"Hydrogen\"");
    assert!(matches!(
        config::parse_scenario(&unknown_type),
        Err(ConfigError::Serde(_))
    ));

    let duplicate_year = DIESEL_TOML.replace("year = 2035", "year = 2025");
    assert!(matches!(
        config::parse_scenario(&duplicate_year),
        Err(ConfigError::Serde(_))
    ));

    let missing_field = DIESEL_TOML.replace("start_year = 2026", "");
    assert!(config::parse_scenario(&missing_field).is_err());
}

#[test]
fn config_price_band_overrides_scenario() {
    let cfg: Config = toml::from_str("price_band = \"High\"").expect("config");
    assert_eq!(cfg.currency_symbol, "$");
    let mut scenario = sample_battery_electric().expect("preset");
    cfg.apply_to(&mut scenario);
    assert_eq!(scenario.economic.price_band, PriceBand::High);

    let mut untouched = sample_battery_electric().expect("preset");
    Config::default().apply_to(&mut untouched);
    assert_eq!(untouched.economic.price_band, PriceBand::Mid);
}
