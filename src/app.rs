use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;

use crate::calculator::TcoCalculator;
use crate::comparison;
use crate::config::{self, Config};
use crate::error::TcoError;
use crate::presets;
use crate::ui_cli;

/// 명령행 인자.
#[derive(Debug, Parser)]
#[command(name = "truck_tco_toolbox", version, about = "대형 트럭 TCO 계산/비교 도구")]
pub struct Cli {
    /// 결과에 기록할 계산 일자(YYYY-MM-DD). 없으면 오늘
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 시나리오 하나의 TCO를 계산한다.
    Calculate {
        scenario: PathBuf,
        /// 연차별 비용 표를 함께 출력한다.
        #[arg(long)]
        annual: bool,
    },
    /// 두 시나리오를 계산해 비교한다.
    Compare { first: PathBuf, second: PathBuf },
    /// 예시 시나리오 파일(bev.toml, diesel.toml)을 만든다.
    Init {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정/시나리오 파일 오류
    Config(config::ConfigError),
    /// TCO 계산 오류
    Tco(TcoError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Tco(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<TcoError> for AppError {
    fn from(value: TcoError) -> Self {
        AppError::Tco(value)
    }
}

fn calculator(cli_date: Option<NaiveDate>) -> TcoCalculator {
    let calc = TcoCalculator::new();
    match cli_date {
        Some(date) => calc.with_calculation_date(date),
        None => calc,
    }
}

/// 명령을 실행한다.
pub fn run(cli: Cli, cfg: &Config) -> Result<(), AppError> {
    let calc = calculator(cli.date);
    match cli.command {
        Command::Calculate { scenario, annual } => {
            let mut input = config::load_scenario(&scenario)?;
            cfg.apply_to(&mut input);
            let output = calc.calculate(&input)?;
            ui_cli::print_output(&output, cfg, annual || cfg.show_annual_breakdown);
        }
        Command::Compare { first, second } => {
            let mut a = config::load_scenario(&first)?;
            let mut b = config::load_scenario(&second)?;
            cfg.apply_to(&mut a);
            cfg.apply_to(&mut b);
            let out_a = calc.calculate(&a)?;
            let out_b = calc.calculate(&b)?;
            let result = comparison::compare(&out_a, &out_b)?;
            ui_cli::print_output(&out_a, cfg, cfg.show_annual_breakdown);
            ui_cli::print_output(&out_b, cfg, cfg.show_annual_breakdown);
            ui_cli::print_comparison(&result, cfg);
        }
        Command::Init { dir } => {
            std::fs::create_dir_all(&dir)?;
            let bev = dir.join("bev.toml");
            let diesel = dir.join("diesel.toml");
            config::save_scenario(&bev, &presets::sample_battery_electric()?)?;
            config::save_scenario(&diesel, &presets::sample_diesel()?)?;
            info!("예시 시나리오 생성: {}, {}", bev.display(), diesel.display());
        }
    }
    Ok(())
}
