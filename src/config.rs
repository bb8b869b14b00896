use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::scenario::ScenarioInput;
use crate::timeseries::PriceBand;

const CONFIG_FILE: &str = "tco_config.toml";

/// 보고서 출력 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 금액 앞에 붙일 통화 기호
    pub currency_symbol: String,
    /// 연차별 비용 표 출력 여부
    pub show_annual_breakdown: bool,
    /// 지정 시 시나리오의 가격 밴드를 덮어쓴다.
    pub price_band: Option<PriceBand>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            show_annual_breakdown: false,
            price_band: None,
        }
    }
}

/// 설정/시나리오 로드·저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "TOML 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "TOML 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// tco_config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save()?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 tco_config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(CONFIG_FILE, content)?;
        Ok(())
    }

    /// 설정의 가격 밴드 덮어쓰기를 시나리오에 적용한다.
    pub fn apply_to(&self, scenario: &mut ScenarioInput) {
        if let Some(band) = self.price_band {
            scenario.economic.price_band = band;
        }
    }
}

/// TOML 시나리오 파일을 읽는다.
pub fn load_scenario(path: &Path) -> Result<ScenarioInput, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_scenario(&content)
}

/// TOML 문자열을 시나리오로 변환한다.
pub fn parse_scenario(content: &str) -> Result<ScenarioInput, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// 시나리오를 TOML 문자열로 변환한다.
pub fn scenario_to_toml(scenario: &ScenarioInput) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(scenario)?)
}

/// 시나리오를 TOML 파일로 저장한다.
pub fn save_scenario(path: &Path, scenario: &ScenarioInput) -> Result<(), ConfigError> {
    fs::write(path, scenario_to_toml(scenario)?)?;
    Ok(())
}
