use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TcoError;
use crate::strategies::StrategyMethod;
use crate::timeseries::{PriceBand, TimeSeries};

/// 운행 패턴. 회생제동 보정 적용 여부를 결정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DutyCycle {
    Urban,
    #[default]
    Regional,
    Linehaul,
}

/// 전기차 충전 요금제 선택.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargingStrategy {
    /// 차고지 충전 요금제 이름
    pub plan: String,
    /// 공용 충전 비중(0~1)
    pub public_share: f64,
    /// 공용 충전 요금제 이름
    pub public_plan: Option<String>,
}

impl Default for ChargingStrategy {
    fn default() -> Self {
        Self {
            plan: "depot".to_string(),
            public_share: 0.0,
            public_plan: None,
        }
    }
}

/// 디젤 주유 가격 시나리오 선택.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefuellingStrategy {
    pub price_scenario: String,
}

impl Default for RefuellingStrategy {
    fn default() -> Self {
        Self {
            price_scenario: "central".to_string(),
        }
    }
}

fn default_charging_window() -> f64 {
    10.0
}

/// 운행 조건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalParameters {
    /// 연간 주행거리 [km]
    pub annual_distance_km: f64,
    /// 연간 운행일수
    pub operating_days_per_year: u32,
    /// 분석 기간 [년]
    pub analysis_period_years: u32,
    /// 일일 주행거리 [km]
    pub daily_distance_km: f64,
    #[serde(default)]
    pub duty_cycle: DutyCycle,
    #[serde(default)]
    pub charging: ChargingStrategy,
    #[serde(default)]
    pub refuelling: RefuellingStrategy,
    /// 연차별 주행거리. 지정 시 분석 기간과 길이가 같아야 한다.
    #[serde(default)]
    pub annual_distance_profile: Option<Vec<f64>>,
    /// 차고지 충전 가능 시간 [h/일]
    #[serde(default = "default_charging_window")]
    pub charging_window_hours: f64,
}

/// 할인 시점 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiscountTiming {
    /// 연말 발생: 1/(1+r)^year
    #[default]
    EndOfYear,
    /// 연초 발생: 1/(1+r)^(year-1)
    StartOfYear,
}

/// 경제 조건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicParameters {
    /// 분석 1년차의 달력 연도
    pub start_year: i32,
    /// 실질 할인율
    pub discount_rate_real: f64,
    /// 물가상승률
    pub inflation_rate: f64,
    #[serde(default)]
    pub discount_timing: DiscountTiming,
    /// 탄소 가격 [통화/tCO2e]
    #[serde(default)]
    pub carbon_price: f64,
    /// 탄소 가격 연간 상승률
    #[serde(default)]
    pub carbon_price_growth: f64,
    /// 탄소 가격 기준 연도. 없으면 시작 연도
    #[serde(default)]
    pub carbon_price_base_year: Option<i32>,
    #[serde(default)]
    pub price_band: PriceBand,
    /// 요금제별 전기요금 [통화/kWh]
    #[serde(default)]
    pub electricity_prices: BTreeMap<String, TimeSeries>,
    /// 가격 시나리오별 경유가 [통화/L]
    #[serde(default)]
    pub diesel_prices: BTreeMap<String, TimeSeries>,
    /// 요소수 단가 [통화/L]
    #[serde(default)]
    pub adblue_price_per_litre: f64,
    /// 전력망 배출계수 [kgCO2e/kWh]
    #[serde(default)]
    pub grid_emission_factor_kg_per_kwh: f64,
}

impl EconomicParameters {
    /// 분석 연차(1부터)를 달력 연도로 바꾼다.
    pub fn calendar_year(&self, year: u32) -> i32 {
        let offset = i32::try_from(year).unwrap_or(i32::MAX).saturating_sub(1);
        self.start_year.saturating_add(offset)
    }

    pub fn discount_factor(&self, year: u32) -> f64 {
        let exponent = match self.discount_timing {
            DiscountTiming::EndOfYear => year,
            DiscountTiming::StartOfYear => year.saturating_sub(1),
        };
        1.0 / (1.0 + self.discount_rate_real).powi(exponent as i32)
    }

    /// 연차별 물가 보정 배수 (1+inflation)^year.
    pub fn inflation_factor(&self, year: u32) -> f64 {
        (1.0 + self.inflation_rate).powi(year as i32)
    }

    /// 기준 연도부터 복리로 상승한 탄소 가격. 기준 연도 이전은 기준 가격을 쓴다.
    pub fn carbon_price_at(&self, calendar_year: i32) -> f64 {
        let base = self.carbon_price_base_year.unwrap_or(self.start_year);
        let years = (i64::from(calendar_year) - i64::from(base)).clamp(0, i64::from(i32::MAX));
        self.carbon_price * (1.0 + self.carbon_price_growth).powi(years as i32)
    }

    pub fn electricity_price(&self, plan: &str, calendar_year: i32) -> Result<f64, TcoError> {
        let series = self.electricity_prices.get(plan).ok_or_else(|| {
            TcoError::configuration(format!("전기요금제 '{plan}'의 요금표가 없습니다."))
        })?;
        Ok(series.value_at_band(calendar_year, self.price_band))
    }

    pub fn diesel_price(&self, scenario: &str, calendar_year: i32) -> Result<f64, TcoError> {
        let series = self.diesel_prices.get(scenario).ok_or_else(|| {
            TcoError::configuration(format!("경유가 시나리오 '{scenario}'의 가격표가 없습니다."))
        })?;
        Ok(series.value_at_band(calendar_year, self.price_band))
    }
}

/// 구매 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FinancingMethod {
    #[default]
    Cash,
    Loan,
}

/// 구매/금융 조건.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingParameters {
    pub method: FinancingMethod,
    /// 대출 기간 [년]
    pub loan_term_years: u32,
    /// 대출 연이율
    pub loan_interest_rate: f64,
    /// 계약금 비율(0~1)
    pub down_payment_fraction: f64,
    /// 구매 보조금 [통화]
    pub purchase_subsidy: f64,
}

impl FinancingParameters {
    /// 원리금 균등상환 연간 납입액. 이자율 0이면 원금을 기간으로 나눈다.
    pub fn annual_loan_payment(&self, principal: f64) -> f64 {
        if self.loan_term_years == 0 {
            return 0.0;
        }
        let n = self.loan_term_years as i32;
        let r = self.loan_interest_rate;
        if r.abs() < 1e-12 {
            principal / f64::from(self.loan_term_years)
        } else {
            principal * r / (1.0 - (1.0 + r).powi(-n))
        }
    }
}

/// 디젤 주유 설비(선택).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefuellingInfrastructure {
    pub capital_cost: f64,
    pub trucks_per_site: f64,
    #[serde(default)]
    pub annual_maintenance_fraction: f64,
}

/// 충전 인프라 조건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureParameters {
    pub charger_hardware_cost: f64,
    pub installation_cost: f64,
    pub grid_upgrade_cost: f64,
    /// 충전기 1기를 공유하는 트럭 수
    pub trucks_per_charger: f64,
    /// 연간 유지비(설비비 대비 비율)
    #[serde(default)]
    pub annual_maintenance_fraction: f64,
    /// 충전기 수명 [년]. 지정 시 수명마다 설비비를 다시 부담한다.
    #[serde(default)]
    pub charger_lifespan_years: Option<u32>,
    #[serde(default)]
    pub diesel_refuelling: Option<RefuellingInfrastructure>,
}

impl InfrastructureParameters {
    /// 트럭 1대가 부담하는 충전 설비비.
    pub fn charger_capital_per_truck(&self) -> f64 {
        (self.charger_hardware_cost + self.installation_cost + self.grid_upgrade_cost)
            / self.trucks_per_charger
    }
}

/// 보험/등록 조건.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceParameters {
    /// 연간 보험료율(차량 잔존가치 대비)
    pub insurance_rate: f64,
    /// 연간 등록비 [통화]
    pub registration_annual: f64,
    /// 도로이용부담금 가산 방식에서 쓰는 km당 부담금
    pub heavy_vehicle_charge_per_km: f64,
}

/// 세금/부담금 조건. 설정하지 않으면 0으로 본다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxParameters {
    /// 전기차 도로이용부담금 [통화/km]
    pub electric_road_user_charge_per_km: f64,
    /// 디젤 기타 세금 [통화/L]
    pub diesel_other_tax_per_litre: f64,
}

/// 비용 항목별 계산 방식 선택.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodSelection {
    pub maintenance: StrategyMethod,
    pub battery_replacement: StrategyMethod,
    pub registration: StrategyMethod,
}

impl Default for MethodSelection {
    fn default() -> Self {
        Self {
            maintenance: StrategyMethod::DistanceBased,
            battery_replacement: StrategyMethod::ThresholdTriggered,
            registration: StrategyMethod::Flat,
        }
    }
}
