use super::{CostCategory, CostStrategy};
use crate::error::TcoError;
use crate::scenario::ScenarioInput;

/// 잔존가치. 마지막 분석 연차에만 음수(수입)로 계상한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidualValueCredit;

impl CostStrategy for ResidualValueCredit {
    fn category(&self) -> CostCategory {
        CostCategory::ResidualValue
    }

    fn name(&self) -> &'static str {
        "residual-curve"
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let period = scenario.analysis_period_years();
        if year != period {
            return Ok(0.0);
        }
        let fraction = scenario.vehicle.residual_value().fraction_at(period)?;
        Ok(-(scenario.purchase_price() * fraction))
    }
}
