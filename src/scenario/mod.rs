//! 차량 1대의 TCO 계산 입력(시나리오)을 정의한다.

pub mod parameters;
pub mod vehicle;

pub use parameters::*;
pub use vehicle::*;

use serde::{Deserialize, Serialize};

use crate::error::TcoError;
use crate::strategies::{CostCategory, StrategyMethod};

/// 차량, 운행, 경제, 금융, 인프라 조건을 묶은 불변 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub vehicle: VehicleParameters,
    pub operational: OperationalParameters,
    pub economic: EconomicParameters,
    #[serde(default)]
    pub financing: FinancingParameters,
    #[serde(default)]
    pub infrastructure: Option<InfrastructureParameters>,
    #[serde(default)]
    pub insurance: InsuranceParameters,
    #[serde(default)]
    pub taxes: TaxParameters,
    #[serde(default)]
    pub methods: MethodSelection,
}

impl ScenarioInput {
    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle.vehicle_type()
    }

    pub fn analysis_period_years(&self) -> u32 {
        self.operational.analysis_period_years
    }

    /// 해당 연차 주행거리. 연차별 프로파일이 있으면 그것을 쓴다.
    pub fn distance_for_year(&self, year: u32) -> f64 {
        match &self.operational.annual_distance_profile {
            Some(profile) => year
                .checked_sub(1)
                .and_then(|i| profile.get(i as usize))
                .copied()
                .unwrap_or(self.operational.annual_distance_km),
            None => self.operational.annual_distance_km,
        }
    }

    /// 분석 기간 총 주행거리.
    pub fn total_distance_km(&self) -> f64 {
        (1..=self.analysis_period_years())
            .map(|y| self.distance_for_year(y))
            .sum()
    }

    /// 분석 시작 연도 기준 구매가.
    pub fn purchase_price(&self) -> f64 {
        self.vehicle.effective_purchase_price(self.economic.start_year)
    }

    /// 비용 항목에 사용할 계산 방식.
    pub fn method_for(&self, category: CostCategory) -> StrategyMethod {
        match category {
            CostCategory::Maintenance => self.methods.maintenance,
            CostCategory::BatteryReplacement => match self.vehicle_type() {
                VehicleType::BatteryElectric => self.methods.battery_replacement,
                VehicleType::Diesel => StrategyMethod::Standard,
            },
            CostCategory::Registration => self.methods.registration,
            CostCategory::Acquisition => match self.financing.method {
                FinancingMethod::Cash => StrategyMethod::Cash,
                FinancingMethod::Loan => StrategyMethod::Loan,
            },
            _ => StrategyMethod::Standard,
        }
    }

    /// 계산 전에 시나리오 불변식을 확인한다.
    pub fn validate(&self) -> Result<(), TcoError> {
        let op = &self.operational;
        if op.analysis_period_years < 1 {
            return Err(TcoError::validation("분석 기간은 1년 이상이어야 합니다."));
        }
        if !(op.annual_distance_km.is_finite() && op.annual_distance_km > 0.0) {
            return Err(TcoError::validation("연간 주행거리는 0보다 커야 합니다."));
        }
        if !(op.daily_distance_km >= 0.0) {
            return Err(TcoError::validation("일일 주행거리는 음수일 수 없습니다."));
        }
        if let Some(profile) = &op.annual_distance_profile {
            if profile.len() != op.analysis_period_years as usize {
                return Err(TcoError::validation(format!(
                    "연차별 주행거리 개수({})가 분석 기간({}년)과 다릅니다.",
                    profile.len(),
                    op.analysis_period_years
                )));
            }
            if profile.iter().any(|d| !(d.is_finite() && *d > 0.0)) {
                return Err(TcoError::validation("연차별 주행거리는 모두 0보다 커야 합니다."));
            }
        }
        if !(0.0..=1.0).contains(&op.charging.public_share) {
            return Err(TcoError::validation("공용 충전 비중은 0~1 범위여야 합니다."));
        }

        let eco = &self.economic;
        if !(eco.discount_rate_real > -1.0) {
            return Err(TcoError::validation("할인율은 -100%보다 커야 합니다."));
        }
        if !(eco.inflation_rate > -1.0) {
            return Err(TcoError::validation("물가상승률은 -100%보다 커야 합니다."));
        }

        let fin = &self.financing;
        if !(0.0..=1.0).contains(&fin.down_payment_fraction) {
            return Err(TcoError::validation("계약금 비율은 0~1 범위여야 합니다."));
        }
        if fin.method == FinancingMethod::Loan && fin.loan_term_years == 0 {
            return Err(TcoError::validation("대출 구매 시 대출 기간은 1년 이상이어야 합니다."));
        }
        if fin.purchase_subsidy < 0.0 {
            return Err(TcoError::validation("보조금은 음수일 수 없습니다."));
        }

        if let Some(infra) = &self.infrastructure {
            if !(infra.trucks_per_charger > 0.0) {
                return Err(TcoError::validation("충전기 공유 대수는 0보다 커야 합니다."));
            }
            if infra.charger_lifespan_years == Some(0) {
                return Err(TcoError::validation("충전기 수명은 1년 이상이어야 합니다."));
            }
            if let Some(site) = &infra.diesel_refuelling {
                if !(site.trucks_per_site > 0.0) {
                    return Err(TcoError::validation("주유 설비 공유 대수는 0보다 커야 합니다."));
                }
            }
        }

        self.validate_vehicle()
    }

    fn validate_vehicle(&self) -> Result<(), TcoError> {
        let maintenance = self.vehicle.maintenance();
        if maintenance.annual_fixed_min > maintenance.annual_fixed_max {
            return Err(TcoError::validation("고정 정비비 하한이 상한보다 큽니다."));
        }
        let residual = self.vehicle.residual_value();
        for fraction in [residual.year_5, residual.year_10, residual.year_15] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(TcoError::validation("잔존가치 비율은 0~1 범위여야 합니다."));
            }
        }

        match &self.vehicle {
            VehicleParameters::BatteryElectric(v) => {
                if !(v.purchase_price >= 0.0) {
                    return Err(TcoError::validation("구매가는 음수일 수 없습니다."));
                }
                let b = &v.battery;
                if !(b.capacity_kwh > 0.0) {
                    return Err(TcoError::validation("배터리 용량은 0보다 커야 합니다."));
                }
                if !(b.usable_capacity_fraction > 0.0 && b.usable_capacity_fraction <= 1.0) {
                    return Err(TcoError::validation("사용 가능 용량 비율은 0 초과 1 이하여야 합니다."));
                }
                if !(0.0..1.0).contains(&b.degradation_rate_annual) {
                    return Err(TcoError::validation("배터리 열화율은 0 이상 1 미만이어야 합니다."));
                }
                if !(b.replacement_threshold > 0.0 && b.replacement_threshold < 1.0) {
                    return Err(TcoError::validation("배터리 교체 기준은 0과 1 사이여야 합니다."));
                }
                if b.replacement_interval_years == Some(0) {
                    return Err(TcoError::validation("배터리 교체 주기는 1년 이상이어야 합니다."));
                }
                if !(v.charging_efficiency > 0.0 && v.charging_efficiency <= 1.0) {
                    return Err(TcoError::validation("충전 효율은 0 초과 1 이하여야 합니다."));
                }
                if !(v.consumption_kwh_per_km > 0.0) {
                    return Err(TcoError::validation("전력 소비율은 0보다 커야 합니다."));
                }
                if !(0.0..1.0).contains(&v.annual_price_decline) {
                    return Err(TcoError::validation("가격 하락률은 0 이상 1 미만이어야 합니다."));
                }
            }
            VehicleParameters::Diesel(v) => {
                if !(v.purchase_price >= 0.0) {
                    return Err(TcoError::validation("구매가는 음수일 수 없습니다."));
                }
                if !(v.fuel_consumption_l_per_km > 0.0) {
                    return Err(TcoError::validation("연료 소비율은 0보다 커야 합니다."));
                }
                if v.adblue_fraction < 0.0 || v.co2_kg_per_litre < 0.0 {
                    return Err(TcoError::validation("요소수 비율과 CO2 계수는 음수일 수 없습니다."));
                }
            }
        }
        let factor = self.vehicle.adjustments().net_factor(true);
        if factor <= 0.0 {
            return Err(TcoError::validation("소비율 보정 결과가 0 이하입니다."));
        }
        Ok(())
    }
}
