//! 대형 트럭 TCO(총소유비용) 계산 엔진을 라이브러리로 분리하여 CLI 외의 화면/내보내기에서도 재사용한다.

pub mod app;
pub mod calculator;
pub mod comparison;
pub mod config;
pub mod error;
pub mod factory;
pub mod presets;
pub mod scenario;
pub mod strategies;
pub mod timeseries;
pub mod ui_cli;

pub use calculator::{component_value, component_value_for_year, TcoCalculator, TcoOutput};
pub use comparison::{compare, ComparisonResult, InvestmentAnalysis};
pub use error::TcoError;
pub use factory::StrategyFactory;
pub use scenario::ScenarioInput;
pub use timeseries::{PriceBand, TimeSeries};
