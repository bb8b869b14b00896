/// TCO 계산 엔진에서 발생 가능한 오류.
///
/// 세 종류 모두 해당 `calculate()`/`compare()` 호출에 치명적이며 부분 결과는 반환하지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub enum TcoError {
    /// 시나리오 값이 범위를 벗어나거나 서로 모순됨
    Validation(String),
    /// 전략 등록 누락, 요금표 누락 등 구성 오류
    Configuration(String),
    /// 계산 도중 유한하지 않은 값이 발생
    Calculation(String),
}

impl std::fmt::Display for TcoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TcoError::Validation(msg) => write!(f, "입력 검증 오류: {msg}"),
            TcoError::Configuration(msg) => write!(f, "구성 오류: {msg}"),
            TcoError::Calculation(msg) => write!(f, "계산 오류: {msg}"),
        }
    }
}

impl std::error::Error for TcoError {}

impl TcoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TcoError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        TcoError::Configuration(msg.into())
    }

    pub fn calculation(msg: impl Into<String>) -> Self {
        TcoError::Calculation(msg.into())
    }
}

/// 값이 유한한지 확인하고, 아니면 계산 오류로 변환한다.
pub fn ensure_finite(value: f64, what: &str) -> Result<f64, TcoError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TcoError::calculation(format!("{what} 값이 유한하지 않음 ({value})")))
    }
}
