use log::warn;

use crate::calculator::TcoOutput;
use crate::comparison::ComparisonResult;
use crate::config::Config;
use crate::strategies::CostCategory;

/// 금액을 천 단위 구분 기호와 함께 표시한다.
pub fn format_money(value: f64, symbol: &str) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{symbol}{grouped}")
}

fn optional(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{suffix}"),
        None => "정의되지 않음".to_string(),
    }
}

/// TCO 계산 결과를 출력한다.
pub fn print_output(output: &TcoOutput<'_>, cfg: &Config, annual: bool) {
    let sym = cfg.currency_symbol.as_str();
    let meta = &output.metadata;
    println!(
        "\n=== {} ({}) / {}년 / 계산일 {} ===",
        meta.vehicle_name, meta.vehicle_type, meta.analysis_period_years, meta.calculation_date
    );
    for category in CostCategory::ALL {
        println!(
            "{:<22} {:>16}",
            category.name(),
            format_money(output.npv_costs.get(category), sym)
        );
    }
    println!(
        "{:<22} {:>16}",
        "insurance_registration",
        format_money(output.npv_costs.insurance_registration(), sym)
    );
    println!(
        "{:<22} {:>16}",
        "taxes_levies",
        format_money(output.npv_costs.taxes_levies(), sym)
    );
    println!("총 TCO(NPV): {}", format_money(output.total_tco, sym));
    println!(
        "LCOD: {sym}{:.4}/km (총 {:.0} km)",
        output.lcod, output.total_distance_km
    );
    println!("운행 배출량: {:.1} tCO2e", output.total_emissions_tonnes);

    if annual {
        println!("\n연차  연도   합계(명목)");
        for row in std::iter::once(&output.upfront_costs).chain(&output.annual_costs) {
            println!(
                "{:>4}  {}  {:>16}",
                row.year,
                row.calendar_year,
                format_money(row.total(), sym)
            );
        }
    }
    for w in &output.warnings {
        warn!("{}: {w}", meta.vehicle_name);
    }
}

/// 비교 결과를 출력한다.
pub fn print_comparison(result: &ComparisonResult<'_>, cfg: &Config) {
    let sym = cfg.currency_symbol.as_str();
    println!(
        "\n=== 비교: {} vs {} ===",
        result.first.metadata.vehicle_name, result.second.metadata.vehicle_name
    );
    println!(
        "TCO 차이(2-1): {} ({:.2}%)",
        format_money(result.tco_difference, sym),
        result.tco_percentage
    );
    println!(
        "LCOD 차이: {sym}{:.4}/km ({:.2}%)",
        result.lcod_difference, result.lcod_difference_percentage
    );
    for (category, diff) in &result.component_differences {
        println!("  {:<20} {:>16}", category.name(), format_money(*diff, sym));
    }
    println!(
        "더 저렴한 쪽: {}번 ({})",
        result.cheaper_option,
        result.cheaper().metadata.vehicle_name
    );
    println!("배출량 차이: {:.1} tCO2e", result.emissions_difference_tonnes);

    let inv = &result.investment;
    match inv.investment_option {
        Some(option) => {
            println!(
                "투자안: {option}번, 추가 투자액 {}",
                format_money(inv.incremental_investment, sym)
            );
            println!("회수기간: {}", optional(inv.payback_years, "년"));
            println!("ROI: {}", optional(inv.roi, "%"));
            println!("IRR: {}", optional(inv.irr.map(|r| r * 100.0), "%"));
            println!("NPV 차이(기준안-투자안): {}", format_money(inv.npv_difference, sym));
        }
        None => println!("초기 투자액이 같아 투자 지표를 정의하지 않습니다."),
    }
}
