use super::{CostCategory, CostStrategy};
use crate::error::TcoError;
use crate::scenario::ScenarioInput;

/// 보조금 차감 후 실구매가.
pub fn net_purchase_price(scenario: &ScenarioInput) -> f64 {
    (scenario.purchase_price() - scenario.financing.purchase_subsidy).max(0.0)
}

/// 일시불 구매: 0년차에 실구매가 전액.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashPurchase;

impl CostStrategy for CashPurchase {
    fn category(&self) -> CostCategory {
        CostCategory::Acquisition
    }

    fn name(&self) -> &'static str {
        "cash"
    }

    fn upfront_cost(&self, scenario: &ScenarioInput) -> Result<f64, TcoError> {
        Ok(net_purchase_price(scenario))
    }

    fn compute_for_year(&self, _scenario: &ScenarioInput, _year: u32) -> Result<f64, TcoError> {
        Ok(0.0)
    }
}

/// 대출 구매: 0년차 계약금 + 1년차부터 대출 기간 동안 원리금 균등상환.
/// 대출 기간이 분석 기간보다 길면 기간 밖 납입분은 포함하지 않는다.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanPurchase;

impl LoanPurchase {
    pub fn principal(scenario: &ScenarioInput) -> f64 {
        net_purchase_price(scenario) * (1.0 - scenario.financing.down_payment_fraction)
    }

    pub fn annual_payment(scenario: &ScenarioInput) -> f64 {
        scenario.financing.annual_loan_payment(Self::principal(scenario))
    }
}

impl CostStrategy for LoanPurchase {
    fn category(&self) -> CostCategory {
        CostCategory::Acquisition
    }

    fn name(&self) -> &'static str {
        "loan"
    }

    fn upfront_cost(&self, scenario: &ScenarioInput) -> Result<f64, TcoError> {
        Ok(net_purchase_price(scenario) * scenario.financing.down_payment_fraction)
    }

    fn compute_for_year(&self, scenario: &ScenarioInput, year: u32) -> Result<f64, TcoError> {
        let financing = &scenario.financing;
        if financing.loan_term_years == 0 {
            return Err(TcoError::configuration("대출 기간이 0년입니다."));
        }
        Ok(if year >= 1 && year <= financing.loan_term_years {
            Self::annual_payment(scenario)
        } else {
            0.0
        })
    }
}
