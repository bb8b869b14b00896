//! 비용 항목별 계산 전략 모음.
//! 에너지, 정비, 배터리 교체, 인프라, 보험/등록, 세금, 구매/금융, 잔존가치로 구성한다.

pub mod battery;
pub mod energy;
pub mod financing;
pub mod infrastructure;
pub mod insurance;
pub mod maintenance;
pub mod residual;
pub mod taxes;

use serde::{Deserialize, Serialize};

use crate::error::TcoError;
use crate::scenario::ScenarioInput;

/// 연간 비용 구성 항목. `AnnualCosts`의 필드와 1:1로 대응한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Acquisition,
    Energy,
    Maintenance,
    Infrastructure,
    BatteryReplacement,
    Insurance,
    Registration,
    CarbonTax,
    OtherTaxes,
    ResidualValue,
}

impl CostCategory {
    pub const ALL: [CostCategory; 10] = [
        CostCategory::Acquisition,
        CostCategory::Energy,
        CostCategory::Maintenance,
        CostCategory::Infrastructure,
        CostCategory::BatteryReplacement,
        CostCategory::Insurance,
        CostCategory::Registration,
        CostCategory::CarbonTax,
        CostCategory::OtherTaxes,
        CostCategory::ResidualValue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CostCategory::Acquisition => "acquisition",
            CostCategory::Energy => "energy",
            CostCategory::Maintenance => "maintenance",
            CostCategory::Infrastructure => "infrastructure",
            CostCategory::BatteryReplacement => "battery_replacement",
            CostCategory::Insurance => "insurance",
            CostCategory::Registration => "registration",
            CostCategory::CarbonTax => "carbon_tax",
            CostCategory::OtherTaxes => "other_taxes",
            CostCategory::ResidualValue => "residual_value",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 같은 비용 항목 안에서의 계산 방식 변형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyMethod {
    /// 항목별 표준 방식
    #[default]
    Standard,
    /// 주행거리 기반 정비비
    DistanceBased,
    /// 차령 기반 정비비
    AgeBased,
    /// 열화 기준 도달 시 배터리 교체
    ThresholdTriggered,
    /// 고정 주기 배터리 교체
    FixedSchedule,
    /// 일시불 구매
    Cash,
    /// 대출 구매
    Loan,
    /// 정액 등록비
    Flat,
    /// 도로이용부담금 가산 등록비
    RoadUserChargeAdjusted,
}

/// 비용 항목 하나를 연차별로 계산하는 전략.
///
/// 구매가, 계약금, 설비비 같은 초기 투자는 0년차(`upfront_cost`, 할인 없음)에,
/// 운영 비용은 1..=N 연차(`compute_for_year`)에 계상한다. 두 함수 모두 시나리오와
/// 연차만으로 결정되는 순수 함수여야 한다.
pub trait CostStrategy: Send + Sync + std::fmt::Debug {
    fn category(&self) -> CostCategory;

    fn name(&self) -> &'static str;

    /// 0년차(분석 시작 시점) 일회성 비용. 기본값은 0.
    fn upfront_cost(&self, _scenario: &ScenarioInput) -> Result<f64, TcoError> {
        Ok(0.0)
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError>;

    /// 분석 기간 전체(1..=N) 비용. 연차 간 상태가 있는 전략은 이 함수를 재정의해
    /// 한 번의 순차 계산으로 처리한다.
    fn compute_series(&self, scenario: &ScenarioInput) -> Result<Vec<f64>, TcoError> {
        (1..=scenario.analysis_period_years())
            .map(|year| self.compute_for_year(scenario, year))
            .collect()
    }
}

/// 해당 차종에 적용되지 않는 항목. 항상 0을 반환한다.
#[derive(Debug, Clone, Copy)]
pub struct NotApplicable {
    pub category: CostCategory,
}

impl CostStrategy for NotApplicable {
    fn category(&self) -> CostCategory {
        self.category
    }

    fn name(&self) -> &'static str {
        "not-applicable"
    }

    fn compute_for_year(&self, _scenario: &ScenarioInput, _year: u32) -> Result<f64, TcoError> {
        Ok(0.0)
    }
}
