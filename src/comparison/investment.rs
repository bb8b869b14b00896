//! 두 시나리오의 연간 비용 차이로 회수기간, ROI, IRR을 구한다.
//!
//! 0년차 초기 투자가 더 큰 쪽을 투자안, 다른 쪽을 기준안으로 본다. 현금흐름의 0번 항은
//! 초기 투자 차이의 음수이고, k번 항은 k년차 절감액(기준안 - 투자안)이다.

use serde::Serialize;

use crate::calculator::TcoOutput;

const IRR_LOWER_BOUND: f64 = -0.99;
const IRR_MAX_UPPER_BOUND: f64 = 1.0e6;
const IRR_TOLERANCE: f64 = 1.0e-10;
const IRR_MAX_ITERATIONS: usize = 300;

/// 투자 분석 결과. 정의되지 않는 지표는 `None`으로 표시한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentAnalysis {
    /// 투자안 번호(1 또는 2). 초기 투자가 같으면 `None`
    pub investment_option: Option<u8>,
    /// 추가 투자액(0년차 비용 차이, 0 이상)
    pub incremental_investment: f64,
    pub has_payback: bool,
    /// 0년차(투자 시점)부터 회수까지의 기간 [년]
    pub payback_years: Option<f64>,
    /// 투자 대비 누적 절감액 [%]
    pub roi: Option<f64>,
    /// 내부수익률(소수). 부호 변화가 없으면 `None`
    pub irr: Option<f64>,
    /// 기준안 TCO - 투자안 TCO. 양수면 투자안이 현재가치 기준으로 유리
    pub npv_difference: f64,
    /// 1..=N년차 명목 절감액 합계
    pub total_savings: f64,
    /// IRR 계산에 사용한 현금흐름
    pub cash_flows: Vec<f64>,
    /// 0년차부터의 누적 명목 비용 차이(투자안 - 기준안)
    pub cumulative_difference: Vec<f64>,
}

/// 할인율 `rate`에서 현금흐름의 현재가치. `cash_flows[k]`는 k 시점 값이다.
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(k, cf)| cf / (1.0 + rate).powi(k as i32))
        .sum()
}

/// 이분법으로 NPV = 0 인 할인율을 찾는다. 부호 변화가 없거나 구간을 못 찾으면 `None`.
pub fn irr(cash_flows: &[f64]) -> Option<f64> {
    let has_positive = cash_flows.iter().any(|&cf| cf > 0.0);
    let has_negative = cash_flows.iter().any(|&cf| cf < 0.0);
    if !(has_positive && has_negative) {
        return None;
    }

    let mut lo = IRR_LOWER_BOUND;
    let mut f_lo = npv(lo, cash_flows);
    if !f_lo.is_finite() {
        lo = -0.9;
        f_lo = npv(lo, cash_flows);
    }
    if f_lo == 0.0 {
        return Some(lo);
    }
    let mut hi = 1.0;
    let mut f_hi = npv(hi, cash_flows);
    while f_lo * f_hi > 0.0 && hi < IRR_MAX_UPPER_BOUND {
        hi *= 2.0;
        f_hi = npv(hi, cash_flows);
    }
    if !(f_lo * f_hi <= 0.0) {
        return None;
    }

    for _ in 0..IRR_MAX_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let f_mid = npv(mid, cash_flows);
        if f_mid == 0.0 || (hi - lo) / 2.0 < IRR_TOLERANCE {
            return Some(mid).filter(|r| r.is_finite());
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }
    let mid = (lo + hi) / 2.0;
    Some(mid).filter(|r| r.is_finite())
}

/// 누적 명목 비용 곡선이 처음 교차하는 시점. 연차 사이는 선형 보간한다.
///
/// 입력의 인덱스 0은 0년차(초기 투자)이며 결과는 0년차 이후 경과 년수다. 투자안의
/// 초기 비용이 더 크지 않거나 기간 안에 교차하지 않으면 `None`.
pub fn payback_period(investing: &[f64], baseline: &[f64]) -> Option<f64> {
    let n = investing.len().min(baseline.len());
    if n == 0 {
        return None;
    }
    let mut prev = investing[0] - baseline[0];
    if prev <= 0.0 {
        return None;
    }
    for t in 1..n {
        let current = prev + investing[t] - baseline[t];
        if current <= 0.0 {
            let frac = prev / (prev - current);
            return Some((t - 1) as f64 + frac);
        }
        prev = current;
    }
    None
}

/// ROI [%] = 누적 절감액 / 추가 투자액 × 100. 투자액이 0 이하이면 정의하지 않는다.
pub fn roi_percent(total_savings: f64, incremental_investment: f64) -> Option<f64> {
    if incremental_investment > 0.0 {
        Some(total_savings / incremental_investment * 100.0).filter(|v| v.is_finite())
    } else {
        None
    }
}

fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// 두 결과의 투자 지표를 계산한다. 공통 분석 연차만 사용한다.
pub fn analyze(first: &TcoOutput<'_>, second: &TcoOutput<'_>) -> InvestmentAnalysis {
    // 인덱스 = 연차(0은 초기 투자)
    let totals_a = first.nominal_totals();
    let totals_b = second.nominal_totals();
    let n = totals_a.len().min(totals_b.len());
    let (totals_a, totals_b) = (&totals_a[..n], &totals_b[..n]);

    let upfront_gap = first.upfront_costs.total() - second.upfront_costs.total();
    let investment_option = if upfront_gap > 0.0 {
        Some(1)
    } else if upfront_gap < 0.0 {
        Some(2)
    } else {
        None
    };
    let (investing, baseline, investing_tco, baseline_tco) = match investment_option {
        Some(2) => (totals_b, totals_a, second.total_tco, first.total_tco),
        _ => (totals_a, totals_b, first.total_tco, second.total_tco),
    };

    let incremental_investment = upfront_gap.abs();
    let savings: Vec<f64> = investing
        .iter()
        .zip(baseline)
        .skip(1)
        .map(|(inv, base)| base - inv)
        .collect();
    let total_savings: f64 = savings.iter().sum();

    let mut cash_flows = Vec::with_capacity(n);
    cash_flows.push(-incremental_investment);
    cash_flows.extend(savings.iter().copied());

    let cumulative_difference: Vec<f64> = cumulative(investing)
        .into_iter()
        .zip(cumulative(baseline))
        .map(|(inv, base)| inv - base)
        .collect();

    let (payback_years, roi, irr_value) = if investment_option.is_some() {
        (
            payback_period(investing, baseline),
            roi_percent(total_savings, incremental_investment),
            irr(&cash_flows),
        )
    } else {
        (None, None, None)
    };

    InvestmentAnalysis {
        investment_option,
        incremental_investment,
        has_payback: payback_years.is_some(),
        payback_years,
        roi,
        irr: irr_value,
        npv_difference: baseline_tco - investing_tco,
        total_savings,
        cash_flows,
        cumulative_difference,
    }
}
