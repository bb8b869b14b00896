//! 연차별 비용 계산, 할인, 집계를 수행해 `TcoOutput`을 만든다.

pub mod results;

pub use results::*;

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use log::{debug, trace};

use crate::error::{ensure_finite, TcoError};
use crate::factory::StrategyFactory;
use crate::scenario::{FinancingMethod, ScenarioInput, VehicleParameters};
use crate::strategies::energy::{electricity_kwh_per_km, annual_emissions_tonnes};
use crate::strategies::CostCategory;

/// TCO 계산기. 계산마다 누적 상태를 새로 만들며 호출 간 공유 상태가 없다.
#[derive(Debug, Clone)]
pub struct TcoCalculator {
    factory: StrategyFactory,
    calculation_date: NaiveDate,
}

impl Default for TcoCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TcoCalculator {
    /// 기본 전략과 오늘 날짜로 계산기를 만든다.
    pub fn new() -> Self {
        Self {
            factory: StrategyFactory::with_defaults(),
            calculation_date: Local::now().date_naive(),
        }
    }

    pub fn with_factory(factory: StrategyFactory) -> Self {
        Self {
            factory,
            ..Self::new()
        }
    }

    /// 결과 메타데이터에 기록할 계산 일자를 고정한다.
    pub fn with_calculation_date(mut self, date: NaiveDate) -> Self {
        self.calculation_date = date;
        self
    }

    pub fn factory(&self) -> &StrategyFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut StrategyFactory {
        &mut self.factory
    }

    /// 시나리오 하나의 TCO를 계산한다.
    pub fn calculate<'s>(&self, scenario: &'s ScenarioInput) -> Result<TcoOutput<'s>, TcoError> {
        scenario.validate()?;
        let strategies = self.factory.resolve_for(scenario)?;
        let period = scenario.analysis_period_years();
        let economic = &scenario.economic;
        debug!(
            "TCO 계산 시작: {} ({}), {}년",
            scenario.vehicle.name(),
            scenario.vehicle_type(),
            period
        );

        // 0년차: 구매가, 계약금, 설비비 같은 초기 투자. 할인계수는 항상 1이다.
        let mut upfront_costs = AnnualCosts::new(0, economic.start_year);
        let mut annual_costs: Vec<AnnualCosts> = (1..=period)
            .map(|year| AnnualCosts::new(year, economic.calendar_year(year)))
            .collect();
        let mut strategy_names = BTreeMap::new();

        for (category, strategy) in strategies.iter() {
            let upfront = strategy.upfront_cost(scenario)?;
            upfront_costs.set(category, ensure_finite(upfront, &format!("0년차 {category}"))?);
            let series = strategy.compute_series(scenario)?;
            if series.len() != annual_costs.len() {
                return Err(TcoError::calculation(format!(
                    "{category} 전략이 {}개 연차 대신 {}개 값을 반환했습니다.",
                    annual_costs.len(),
                    series.len()
                )));
            }
            for (row, value) in annual_costs.iter_mut().zip(series) {
                let what = format!("{}년차 {category}", row.year);
                row.set(category, ensure_finite(value, &what)?);
            }
            strategy_names.insert(category, strategy.name().to_string());
        }

        let mut npv_costs = NpvCosts::default();
        for category in CostCategory::ALL {
            npv_costs.add(category, upfront_costs.get(category) * economic.discount_factor(0));
        }
        trace!("0년차 초기 투자: {:.2}", upfront_costs.total());
        for row in &annual_costs {
            let factor = economic.discount_factor(row.year);
            for category in CostCategory::ALL {
                npv_costs.add(category, row.get(category) * factor);
            }
            trace!(
                "{}년차({}): 명목 {:.2}, 할인계수 {:.6}",
                row.year,
                row.calendar_year,
                row.total(),
                factor
            );
        }

        let total_tco = ensure_finite(npv_costs.total(), "총 TCO")?;
        let total_distance_km = scenario.total_distance_km();
        if !(total_distance_km > 0.0) {
            return Err(TcoError::validation("총 주행거리는 0보다 커야 합니다."));
        }
        let lcod = ensure_finite(total_tco / total_distance_km, "LCOD")?;

        let annual_emissions_tonnes: Vec<f64> = (1..=period)
            .map(|year| annual_emissions_tonnes(scenario, year))
            .collect();
        let total_emissions_tonnes = annual_emissions_tonnes.iter().sum();

        debug!(
            "TCO 계산 완료: {} 총 {:.2}, LCOD {:.4}/km",
            scenario.vehicle.name(),
            total_tco,
            lcod
        );

        Ok(TcoOutput {
            total_tco,
            lcod,
            total_distance_km,
            upfront_costs,
            annual_costs,
            npv_costs,
            annual_emissions_tonnes,
            total_emissions_tonnes,
            metadata: TcoMetadata {
                vehicle_name: scenario.vehicle.name().to_string(),
                vehicle_type: scenario.vehicle_type(),
                analysis_period_years: period,
                calculation_date: self.calculation_date,
                strategies: strategy_names,
            },
            warnings: collect_warnings(scenario),
            scenario,
        })
    }
}

/// 계산은 진행하되 사용자가 확인해야 할 입력 조건을 모은다.
fn collect_warnings(scenario: &ScenarioInput) -> Vec<String> {
    let mut warnings = Vec::new();
    let op = &scenario.operational;
    let period = scenario.analysis_period_years();

    let financing = &scenario.financing;
    if financing.method == FinancingMethod::Loan && financing.loan_term_years > period {
        warnings.push(format!(
            "대출 기간({}년)이 분석 기간({}년)보다 길어 이후 납입분은 포함되지 않았습니다.",
            financing.loan_term_years, period
        ));
    }

    if op.annual_distance_profile.is_none() && op.operating_days_per_year > 0 && op.daily_distance_km > 0.0 {
        let implied = op.daily_distance_km * f64::from(op.operating_days_per_year);
        let gap = (implied - op.annual_distance_km).abs() / op.annual_distance_km;
        if gap > 0.1 {
            warnings.push(format!(
                "일일 주행거리 × 운행일수({implied:.0} km)가 연간 주행거리({:.0} km)와 10% 이상 차이납니다.",
                op.annual_distance_km
            ));
        }
    }

    let economic = &scenario.economic;
    let first = economic.calendar_year(1);
    let last = economic.calendar_year(period);
    match &scenario.vehicle {
        VehicleParameters::BatteryElectric(v) => {
            let daily_kwh = electricity_kwh_per_km(v, op.duty_cycle) * op.daily_distance_km;
            if daily_kwh > v.battery.usable_capacity_kwh() {
                warnings.push(format!(
                    "일일 소요 전력({daily_kwh:.0} kWh)이 사용 가능 배터리 용량({:.0} kWh)을 넘어 운행 중 충전이 필요합니다.",
                    v.battery.usable_capacity_kwh()
                ));
            }
            if v.max_charging_power_kw > 0.0 {
                let hours = daily_kwh / v.charging_efficiency / v.max_charging_power_kw;
                if hours > op.charging_window_hours {
                    warnings.push(format!(
                        "필요 충전 시간({hours:.1} h)이 충전 가능 시간({:.1} h)을 초과합니다.",
                        op.charging_window_hours
                    ));
                }
            }
            if let Some(series) = economic.electricity_prices.get(&op.charging.plan) {
                if series.is_clamped(first) || series.is_clamped(last) {
                    warnings.push(format!(
                        "전기요금제 '{}' 범위({}~{}) 밖 연도는 가장자리 값으로 고정했습니다.",
                        op.charging.plan,
                        series.first_year(),
                        series.last_year()
                    ));
                }
            }
        }
        VehicleParameters::Diesel(_) => {
            let name = &op.refuelling.price_scenario;
            if let Some(series) = economic.diesel_prices.get(name) {
                if series.is_clamped(first) || series.is_clamped(last) {
                    warnings.push(format!(
                        "경유가 시나리오 '{name}' 범위({}~{}) 밖 연도는 가장자리 값으로 고정했습니다.",
                        series.first_year(),
                        series.last_year()
                    ));
                }
            }
        }
    }
    warnings
}
