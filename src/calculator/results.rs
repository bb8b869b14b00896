use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::TcoError;
use crate::scenario::{ScenarioInput, VehicleType};
use crate::strategies::CostCategory;

/// 분석 연차 하나의 항목별 비용. 잔존가치는 음수(수입)로 기록한다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AnnualCosts {
    /// 분석 연차. 0은 초기 투자 시점
    pub year: u32,
    pub calendar_year: i32,
    pub acquisition: f64,
    pub energy: f64,
    pub maintenance: f64,
    pub infrastructure: f64,
    pub battery_replacement: f64,
    pub insurance: f64,
    pub registration: f64,
    pub carbon_tax: f64,
    pub other_taxes: f64,
    pub residual_value: f64,
}

impl AnnualCosts {
    pub fn new(year: u32, calendar_year: i32) -> Self {
        Self {
            year,
            calendar_year,
            ..Self::default()
        }
    }

    pub fn get(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Acquisition => self.acquisition,
            CostCategory::Energy => self.energy,
            CostCategory::Maintenance => self.maintenance,
            CostCategory::Infrastructure => self.infrastructure,
            CostCategory::BatteryReplacement => self.battery_replacement,
            CostCategory::Insurance => self.insurance,
            CostCategory::Registration => self.registration,
            CostCategory::CarbonTax => self.carbon_tax,
            CostCategory::OtherTaxes => self.other_taxes,
            CostCategory::ResidualValue => self.residual_value,
        }
    }

    pub fn set(&mut self, category: CostCategory, value: f64) {
        let slot = match category {
            CostCategory::Acquisition => &mut self.acquisition,
            CostCategory::Energy => &mut self.energy,
            CostCategory::Maintenance => &mut self.maintenance,
            CostCategory::Infrastructure => &mut self.infrastructure,
            CostCategory::BatteryReplacement => &mut self.battery_replacement,
            CostCategory::Insurance => &mut self.insurance,
            CostCategory::Registration => &mut self.registration,
            CostCategory::CarbonTax => &mut self.carbon_tax,
            CostCategory::OtherTaxes => &mut self.other_taxes,
            CostCategory::ResidualValue => &mut self.residual_value,
        };
        *slot = value;
    }

    /// 항목 합계(명목).
    pub fn total(&self) -> f64 {
        CostCategory::ALL.iter().map(|&c| self.get(c)).sum()
    }

    pub fn insurance_registration(&self) -> f64 {
        self.insurance + self.registration
    }

    pub fn taxes_levies(&self) -> f64 {
        self.carbon_tax + self.other_taxes
    }
}

/// 분석 기간 전체를 현재가치로 할인해 합산한 항목별 비용.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NpvCosts {
    pub acquisition: f64,
    pub energy: f64,
    pub maintenance: f64,
    pub infrastructure: f64,
    pub battery_replacement: f64,
    pub insurance: f64,
    pub registration: f64,
    pub carbon_tax: f64,
    pub other_taxes: f64,
    pub residual_value: f64,
}

impl NpvCosts {
    pub fn get(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Acquisition => self.acquisition,
            CostCategory::Energy => self.energy,
            CostCategory::Maintenance => self.maintenance,
            CostCategory::Infrastructure => self.infrastructure,
            CostCategory::BatteryReplacement => self.battery_replacement,
            CostCategory::Insurance => self.insurance,
            CostCategory::Registration => self.registration,
            CostCategory::CarbonTax => self.carbon_tax,
            CostCategory::OtherTaxes => self.other_taxes,
            CostCategory::ResidualValue => self.residual_value,
        }
    }

    pub(crate) fn add(&mut self, category: CostCategory, value: f64) {
        let slot = match category {
            CostCategory::Acquisition => &mut self.acquisition,
            CostCategory::Energy => &mut self.energy,
            CostCategory::Maintenance => &mut self.maintenance,
            CostCategory::Infrastructure => &mut self.infrastructure,
            CostCategory::BatteryReplacement => &mut self.battery_replacement,
            CostCategory::Insurance => &mut self.insurance,
            CostCategory::Registration => &mut self.registration,
            CostCategory::CarbonTax => &mut self.carbon_tax,
            CostCategory::OtherTaxes => &mut self.other_taxes,
            CostCategory::ResidualValue => &mut self.residual_value,
        };
        *slot += value;
    }

    pub fn insurance_registration(&self) -> f64 {
        self.insurance + self.registration
    }

    pub fn taxes_levies(&self) -> f64 {
        self.carbon_tax + self.other_taxes
    }

    pub fn total(&self) -> f64 {
        CostCategory::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// 이름으로 조회 가능한 비용 뷰. 개별 항목 외에 합성 항목도 포함한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentView {
    Single(CostCategory),
    InsuranceRegistration,
    TaxesLevies,
    Total,
}

impl ComponentView {
    pub fn parse(name: &str) -> Result<Self, TcoError> {
        if let Some(category) = CostCategory::from_name(name) {
            return Ok(ComponentView::Single(category));
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "insurance_registration" => Ok(ComponentView::InsuranceRegistration),
            "taxes_levies" => Ok(ComponentView::TaxesLevies),
            "total" | "total_tco" => Ok(ComponentView::Total),
            _ => Err(TcoError::validation(format!("알 수 없는 비용 항목: {name}"))),
        }
    }

    fn of_npv(self, npv: &NpvCosts) -> f64 {
        match self {
            ComponentView::Single(c) => npv.get(c),
            ComponentView::InsuranceRegistration => npv.insurance_registration(),
            ComponentView::TaxesLevies => npv.taxes_levies(),
            ComponentView::Total => npv.total(),
        }
    }

    fn of_annual(self, row: &AnnualCosts) -> f64 {
        match self {
            ComponentView::Single(c) => row.get(c),
            ComponentView::InsuranceRegistration => row.insurance_registration(),
            ComponentView::TaxesLevies => row.taxes_levies(),
            ComponentView::Total => row.total(),
        }
    }
}

/// 계산 결과 메타데이터.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TcoMetadata {
    pub vehicle_name: String,
    pub vehicle_type: VehicleType,
    pub analysis_period_years: u32,
    pub calculation_date: NaiveDate,
    /// 항목별로 사용된 전략 이름
    pub strategies: BTreeMap<CostCategory, String>,
}

/// 시나리오 하나의 TCO 계산 결과.
#[derive(Debug, Clone, Serialize)]
pub struct TcoOutput<'s> {
    /// 전체 항목 NPV 합계
    pub total_tco: f64,
    /// 주행거리당 비용 = total_tco / total_distance_km
    pub lcod: f64,
    pub total_distance_km: f64,
    /// 0년차 초기 투자(할인 없음)
    pub upfront_costs: AnnualCosts,
    /// 1..=N 연차 순서
    pub annual_costs: Vec<AnnualCosts>,
    pub npv_costs: NpvCosts,
    /// 연차별 운행 배출량 [tCO2e]
    pub annual_emissions_tonnes: Vec<f64>,
    pub total_emissions_tonnes: f64,
    pub metadata: TcoMetadata,
    /// 계산은 가능하지만 확인이 필요한 사항
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub scenario: &'s ScenarioInput,
}

impl<'s> TcoOutput<'s> {
    /// 연차의 비용 행. 0은 초기 투자, 1..=N은 운영 연차.
    pub fn annual(&self, year: u32) -> Option<&AnnualCosts> {
        match year {
            0 => Some(&self.upfront_costs),
            _ => self.annual_costs.get(year as usize - 1),
        }
    }

    pub fn component_value(&self, name: &str) -> Result<f64, TcoError> {
        Ok(ComponentView::parse(name)?.of_npv(&self.npv_costs))
    }

    pub fn component_value_for_year(&self, name: &str, year: u32) -> Result<f64, TcoError> {
        let view = ComponentView::parse(name)?;
        let row = self.annual(year).ok_or_else(|| {
            TcoError::validation(format!(
                "{year}년차는 분석 기간(0~{}년) 밖입니다.",
                self.annual_costs.len()
            ))
        })?;
        Ok(view.of_annual(row))
    }

    /// 0년차부터의 명목 비용 합계(인덱스 = 연차).
    pub fn nominal_totals(&self) -> Vec<f64> {
        std::iter::once(&self.upfront_costs)
            .chain(&self.annual_costs)
            .map(AnnualCosts::total)
            .collect()
    }

    /// 명목 기준 누적 비용 곡선. 인덱스 0이 초기 투자 시점이다.
    pub fn cumulative_nominal_costs(&self) -> Vec<f64> {
        std::iter::once(&self.upfront_costs)
            .chain(&self.annual_costs)
            .scan(0.0, |acc, row| {
                *acc += row.total();
                Some(*acc)
            })
            .collect()
    }
}

/// 항목 이름으로 NPV 값을 조회한다.
pub fn component_value(output: &TcoOutput<'_>, name: &str) -> Result<f64, TcoError> {
    output.component_value(name)
}

/// 항목 이름과 연차로 명목 연간 값을 조회한다.
pub fn component_value_for_year(output: &TcoOutput<'_>, name: &str, year: u32) -> Result<f64, TcoError> {
    output.component_value_for_year(name, year)
}
