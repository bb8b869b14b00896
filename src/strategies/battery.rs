//! 배터리 열화와 교체 비용.
//!
//! 용량은 매년 `capacity(year) = capacity(year-1) * (1 - 열화율)`로 줄어든다.
//! 연차 간 상태가 이어지므로 반드시 1년차부터 순서대로 계산해야 한다.

use super::{CostCategory, CostStrategy};
use crate::error::TcoError;
use crate::scenario::{BatteryElectricParameters, ScenarioInput};

/// 열화 누적 상태. 0년차(신품)는 용량 1.0에서 시작한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegradationState {
    /// 최초 용량 대비 현재 용량 비율
    pub capacity_fraction: f64,
    /// 지금까지의 교체 횟수
    pub replacements: u32,
}

impl Default for DegradationState {
    fn default() -> Self {
        Self {
            capacity_fraction: 1.0,
            replacements: 0,
        }
    }
}

impl DegradationState {
    /// 1년치 열화를 적용한다. 기준 미만으로 떨어지면 교체하고 용량을 1.0으로 되돌린다.
    pub fn advance(self, degradation_rate: f64, threshold: f64) -> (Self, bool) {
        let degraded = self.capacity_fraction * (1.0 - degradation_rate);
        if degraded < threshold {
            let next = Self {
                capacity_fraction: 1.0,
                replacements: self.replacements + 1,
            };
            (next, true)
        } else {
            let next = Self {
                capacity_fraction: degraded,
                ..self
            };
            (next, false)
        }
    }
}

/// 연차별 배터리 상태 기록.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryYear {
    pub year: u32,
    /// 연말 용량 비율(교체 시 1.0)
    pub capacity_fraction: f64,
    pub replaced: bool,
    pub cost: f64,
}

fn battery_vehicle(scenario: &ScenarioInput) -> Result<&BatteryElectricParameters, TcoError> {
    scenario
        .vehicle
        .as_battery_electric()
        .ok_or_else(|| TcoError::configuration("배터리 교체 전략은 전기차에만 적용할 수 있습니다."))
}

/// 해당 연차에 교체할 경우의 비용: kWh 단가 전망 × 용량 × 교체 비용 계수.
pub fn replacement_cost(scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
    let vehicle = battery_vehicle(scenario)?;
    let battery = &vehicle.battery;
    let calendar_year = scenario.economic.calendar_year(year);
    let per_kwh = battery
        .projected_cost_per_kwh
        .value_at_band(calendar_year, scenario.economic.price_band);
    Ok(per_kwh * battery.capacity_kwh * battery.replacement_cost_factor)
}

/// 1..=last_year까지 열화를 순차 누적한 기록.
pub fn degradation_trace(scenario: &ScenarioInput, last_year: u32) -> Result<Vec<BatteryYear>, TcoError> {
    let battery = &battery_vehicle(scenario)?.battery;
    let mut state = DegradationState::default();
    let mut trace = Vec::with_capacity(last_year as usize);
    for year in 1..=last_year {
        let (next, replaced) = state.advance(battery.degradation_rate_annual, battery.replacement_threshold);
        let cost = if replaced {
            replacement_cost(scenario, year)?
        } else {
            0.0
        };
        trace.push(BatteryYear {
            year,
            capacity_fraction: next.capacity_fraction,
            replaced,
            cost,
        });
        state = next;
    }
    Ok(trace)
}

/// 열화 기준 도달 시 교체 (기본 방식).
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdTriggeredReplacement;

impl CostStrategy for ThresholdTriggeredReplacement {
    fn category(&self) -> CostCategory {
        CostCategory::BatteryReplacement
    }

    fn name(&self) -> &'static str {
        "threshold-triggered"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        // 단일 연차 요청도 1년차부터 다시 누적해야 같은 결과가 나온다.
        let trace = degradation_trace(scenario, year)?;
        Ok(trace.last().map(|y| y.cost).unwrap_or(0.0))
    }

    fn compute_series(&self, scenario: &ScenarioInput) -> Result<Vec<f64>, TcoError> {
        let trace = degradation_trace(scenario, scenario.analysis_period_years())?;
        Ok(trace.into_iter().map(|y| y.cost).collect())
    }
}

/// 고정 주기 교체. `replacement_interval_years`의 배수 연차에 교체한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScheduleReplacement;

impl CostStrategy for FixedScheduleReplacement {
    fn category(&self) -> CostCategory {
        CostCategory::BatteryReplacement
    }

    fn name(&self) -> &'static str {
        "fixed-schedule"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let battery = &battery_vehicle(scenario)?.battery;
        let interval = battery.replacement_interval_years.ok_or_else(|| {
            TcoError::configuration("고정 주기 교체 방식에는 교체 주기가 필요합니다.")
        })?;
        if interval > 0 && year > 0 && year % interval == 0 {
            replacement_cost(scenario, year)
        } else {
            Ok(0.0)
        }
    }
}
