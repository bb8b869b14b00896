//! 연도별로 변하는 파라미터(전기요금, 경유가, 배터리 kWh 단가 등)를 표현한다.
//!
//! 몇 개의 기준 연도(anchor) 값만 저장하고, 그 사이는 선형 보간, 범위 밖은
//! 가장자리 값으로 클램프한다. 모든 정수 연도에 대해 값이 정의된다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TcoError;

/// 범위형 값에서 어느 쪽을 사용할지 선택한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceBand {
    /// 최솟값
    Low,
    /// 중간값(기본)
    #[default]
    Mid,
    /// 최댓값
    High,
}

/// 기준 연도 하나에 대응하는 값. 단일 값 또는 [min, max] 범위.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValue {
    Scalar(f64),
    Range(f64, f64),
}

impl SeriesValue {
    /// 선택된 밴드에 맞춰 단일 값으로 환산한다.
    pub fn resolve(self, band: PriceBand) -> f64 {
        match self {
            SeriesValue::Scalar(v) => v,
            SeriesValue::Range(a, b) => match band {
                PriceBand::Low => a.min(b),
                PriceBand::Mid => (a + b) / 2.0,
                PriceBand::High => a.max(b),
            },
        }
    }

    fn is_finite(self) -> bool {
        match self {
            SeriesValue::Scalar(v) => v.is_finite(),
            SeriesValue::Range(a, b) => a.is_finite() && b.is_finite(),
        }
    }
}

/// 파일 입출력용 기준점 표현.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub year: i32,
    pub value: SeriesValue,
}

/// 희소한 기준 연도 값으로부터 임의 연도 값을 구하는 시계열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Anchor>", into = "Vec<Anchor>")]
pub struct TimeSeries {
    anchors: BTreeMap<i32, SeriesValue>,
}

impl TimeSeries {
    /// 기준점 목록으로 시계열을 만든다. 기준점이 없거나 연도가 중복되면 실패한다.
    pub fn new<I>(anchors: I) -> Result<Self, TcoError>
    where
        I: IntoIterator<Item = (i32, SeriesValue)>,
    {
        let mut map = BTreeMap::new();
        for (year, value) in anchors {
            if !value.is_finite() {
                return Err(TcoError::validation(format!(
                    "{year}년 기준값이 유한하지 않습니다."
                )));
            }
            if map.insert(year, value).is_some() {
                return Err(TcoError::configuration(format!(
                    "{year}년 기준값이 중복되었습니다."
                )));
            }
        }
        if map.is_empty() {
            return Err(TcoError::configuration("시계열에 기준점이 하나도 없습니다."));
        }
        Ok(Self { anchors: map })
    }

    /// (연도, 값) 쌍의 단일 값 기준점으로 만든다.
    pub fn from_points(points: &[(i32, f64)]) -> Result<Self, TcoError> {
        Self::new(points.iter().map(|&(y, v)| (y, SeriesValue::Scalar(v))))
    }

    /// 모든 연도에서 같은 값을 갖는 시계열.
    pub fn constant(value: f64) -> Self {
        let mut anchors = BTreeMap::new();
        anchors.insert(0, SeriesValue::Scalar(value));
        Self { anchors }
    }

    pub fn first_year(&self) -> i32 {
        self.anchors.keys().next().copied().unwrap_or_default()
    }

    pub fn last_year(&self) -> i32 {
        self.anchors.keys().next_back().copied().unwrap_or_default()
    }

    pub fn anchors(&self) -> impl Iterator<Item = (i32, SeriesValue)> + '_ {
        self.anchors.iter().map(|(&y, &v)| (y, v))
    }

    /// 범위형 기준값은 중간값을 사용해 해당 연도 값을 구한다.
    pub fn value_at(&self, year: i32) -> f64 {
        self.value_at_band(year, PriceBand::Mid)
    }

    /// 선택된 밴드로 해당 연도 값을 구한다.
    pub fn value_at_band(&self, year: i32, band: PriceBand) -> f64 {
        let below = self.anchors.range(..=year).next_back();
        let above = self.anchors.range(year..).next();
        match (below, above) {
            (Some((&y0, &v0)), Some((&y1, &v1))) => {
                if y0 == y1 {
                    return v0.resolve(band);
                }
                let a = v0.resolve(band);
                let b = v1.resolve(band);
                // i32 양 끝 연도끼리의 차이도 넘치지 않도록 i64로 계산한다.
                let span = i64::from(y1) - i64::from(y0);
                let frac = (i64::from(year) - i64::from(y0)) as f64 / span as f64;
                a + frac * (b - a)
            }
            // 범위 밖: 가장 가까운 기준값으로 클램프
            (Some((_, &v)), None) | (None, Some((_, &v))) => v.resolve(band),
            (None, None) => 0.0,
        }
    }

    /// 요청 연도가 기준점 범위 밖이라 클램프되는지 여부.
    pub fn is_clamped(&self, year: i32) -> bool {
        year < self.first_year() || year > self.last_year()
    }
}

impl TryFrom<Vec<Anchor>> for TimeSeries {
    type Error = TcoError;

    fn try_from(value: Vec<Anchor>) -> Result<Self, Self::Error> {
        TimeSeries::new(value.into_iter().map(|a| (a.year, a.value)))
    }
}

impl From<TimeSeries> for Vec<Anchor> {
    fn from(series: TimeSeries) -> Self {
        series
            .anchors
            .into_iter()
            .map(|(year, value)| Anchor { year, value })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_is_rejected() {
        let err = TimeSeries::new(Vec::new()).unwrap_err();
        assert!(matches!(err, TcoError::Configuration(_)));
    }

    #[test]
    fn duplicate_year_is_rejected() {
        let err = TimeSeries::from_points(&[(2025, 1.0), (2025, 2.0)]).unwrap_err();
        assert!(matches!(err, TcoError::Configuration(_)));
    }

    #[test]
    fn single_anchor_clamps_everywhere() {
        let s = TimeSeries::from_points(&[(2030, 0.25)]).unwrap();
        assert_eq!(s.value_at(i32::MIN), 0.25);
        assert_eq!(s.value_at(2030), 0.25);
        assert_eq!(s.value_at(i32::MAX), 0.25);
    }

    #[test]
    fn range_band_selection() {
        let s = TimeSeries::new([(2025, SeriesValue::Range(0.2, 0.4))]).unwrap();
        assert_eq!(s.value_at_band(2025, PriceBand::Low), 0.2);
        assert!((s.value_at_band(2025, PriceBand::Mid) - 0.3).abs() < 1e-12);
        assert_eq!(s.value_at_band(2025, PriceBand::High), 0.4);
    }
}
