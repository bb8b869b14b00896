//! 두 TCO 결과를 비교해 차이와 투자 지표를 도출한다.

pub mod investment;

pub use investment::*;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::calculator::TcoOutput;
use crate::error::{ensure_finite, TcoError};
use crate::strategies::CostCategory;

/// 비교 결과. 모든 차이는 `second - first` 기준이다.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult<'a> {
    pub tco_difference: f64,
    /// `first.total_tco` 대비 [%]. 기준값이 0이면 0
    pub tco_percentage: f64,
    pub lcod_difference: f64,
    pub lcod_difference_percentage: f64,
    pub component_differences: BTreeMap<CostCategory, f64>,
    /// 총 TCO가 더 낮은 쪽(1 또는 2)
    pub cheaper_option: u8,
    pub emissions_difference_tonnes: f64,
    pub investment: InvestmentAnalysis,
    #[serde(skip)]
    pub first: &'a TcoOutput<'a>,
    #[serde(skip)]
    pub second: &'a TcoOutput<'a>,
}

impl<'a> ComparisonResult<'a> {
    /// 이름으로 항목 NPV 차이를 조회한다. 합성 항목도 지원한다.
    pub fn component_difference(&self, name: &str) -> Result<f64, TcoError> {
        Ok(self.second.component_value(name)? - self.first.component_value(name)?)
    }

    pub fn cheaper(&self) -> &TcoOutput<'a> {
        if self.cheaper_option == 1 {
            self.first
        } else {
            self.second
        }
    }
}

fn percentage(difference: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        difference / base * 100.0
    }
}

/// 두 결과를 비교한다.
pub fn compare<'a>(first: &'a TcoOutput<'a>, second: &'a TcoOutput<'a>) -> Result<ComparisonResult<'a>, TcoError> {
    let tco_difference = ensure_finite(second.total_tco - first.total_tco, "TCO 차이")?;
    let tco_percentage = ensure_finite(percentage(tco_difference, first.total_tco), "TCO 차이율")?;
    let lcod_difference = ensure_finite(second.lcod - first.lcod, "LCOD 차이")?;
    let lcod_difference_percentage =
        ensure_finite(percentage(lcod_difference, first.lcod), "LCOD 차이율")?;

    let component_differences = CostCategory::ALL
        .into_iter()
        .map(|c| (c, second.npv_costs.get(c) - first.npv_costs.get(c)))
        .collect();

    let cheaper_option = if first.total_tco < second.total_tco { 1 } else { 2 };

    Ok(ComparisonResult {
        tco_difference,
        tco_percentage,
        lcod_difference,
        lcod_difference_percentage,
        component_differences,
        cheaper_option,
        emissions_difference_tonnes: second.total_emissions_tonnes - first.total_emissions_tonnes,
        investment: investment::analyze(first, second),
        first,
        second,
    })
}
