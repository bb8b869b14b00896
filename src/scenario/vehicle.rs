use serde::{Deserialize, Serialize};

use crate::error::TcoError;
use crate::timeseries::TimeSeries;

/// 차량 동력원 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleType {
    BatteryElectric,
    Diesel,
}

impl VehicleType {
    pub fn label(self) -> &'static str {
        match self {
            VehicleType::BatteryElectric => "battery-electric",
            VehicleType::Diesel => "diesel",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 적재/기온/회생제동에 따른 소비율 보정. 모두 기본 소비율 대비 비율(0.1 = 10%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionAdjustments {
    /// 적재 보정(가산)
    pub load_factor: f64,
    /// 혹서기 소비 증가율
    pub hot_weather_increase: f64,
    /// 혹한기 소비 증가율
    pub cold_weather_increase: f64,
    /// 연중 혹서기 비중(0~1)
    pub hot_season_share: f64,
    /// 연중 혹한기 비중(0~1)
    pub cold_season_share: f64,
    /// 회생제동 절감율. 전기차 도심 운행에서만 적용
    pub regen_braking_offset: f64,
}

impl ConsumptionAdjustments {
    /// 연평균 계절 보정(가산 비율).
    pub fn seasonal_increase(&self) -> f64 {
        self.hot_weather_increase * self.hot_season_share
            + self.cold_weather_increase * self.cold_season_share
    }

    /// 기본 소비율에 곱할 최종 배수.
    pub fn net_factor(&self, apply_regen: bool) -> f64 {
        let regen = if apply_regen {
            self.regen_braking_offset
        } else {
            0.0
        };
        1.0 + self.load_factor + self.seasonal_increase() - regen
    }
}

/// 정비비 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceParameters {
    /// 주행거리당 정비비 [통화/km]
    pub cost_per_km: f64,
    /// 연간 고정 정비비 하한 [통화/년]
    pub annual_fixed_min: f64,
    /// 연간 고정 정비비 상한 [통화/년]
    pub annual_fixed_max: f64,
    /// 연식 기반 방식에서 차령 1년당 변동비 증가율
    #[serde(default)]
    pub age_escalation_rate: f64,
}

impl MaintenanceParameters {
    pub fn fixed_midpoint(&self) -> f64 {
        (self.annual_fixed_min + self.annual_fixed_max) / 2.0
    }
}

/// 5/10/15년차 잔존가치 비율 곡선. 0년차는 항상 1.0(신차 가격)으로 본다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualCurve {
    pub year_5: f64,
    pub year_10: f64,
    pub year_15: f64,
}

impl ResidualCurve {
    pub fn as_series(&self) -> Result<TimeSeries, TcoError> {
        TimeSeries::from_points(&[
            (0, 1.0),
            (5, self.year_5),
            (10, self.year_10),
            (15, self.year_15),
        ])
    }

    /// 차령(년)에 해당하는 잔존가치 비율. 15년 이후는 15년 값으로 클램프한다.
    pub fn fraction_at(&self, age_years: u32) -> Result<f64, TcoError> {
        let age = i32::try_from(age_years).unwrap_or(i32::MAX);
        Ok(self.as_series()?.value_at(age))
    }
}

/// 구동 배터리 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryParameters {
    /// 정격 용량 [kWh]
    pub capacity_kwh: f64,
    /// 사용 가능 용량 비율(0~1)
    pub usable_capacity_fraction: f64,
    /// 연간 용량 열화율(0~1)
    pub degradation_rate_annual: f64,
    /// 교체 기준(최초 용량 대비 비율)
    pub replacement_threshold: f64,
    /// 교체 비용 계수(팩 단가 대비 인건비 등 포함 배수)
    pub replacement_cost_factor: f64,
    /// 연도별 배터리 단가 전망 [통화/kWh]
    pub projected_cost_per_kwh: TimeSeries,
    /// 고정 주기 교체 방식에서 사용하는 교체 주기 [년]
    #[serde(default)]
    pub replacement_interval_years: Option<u32>,
}

impl BatteryParameters {
    pub fn usable_capacity_kwh(&self) -> f64 {
        self.capacity_kwh * self.usable_capacity_fraction
    }
}

/// 배터리 전기 트럭 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryElectricParameters {
    pub name: String,
    /// 기준 연도 구매가 [통화]
    pub purchase_price: f64,
    /// 연간 실질 가격 하락률
    #[serde(default)]
    pub annual_price_decline: f64,
    /// 구매가의 기준 연도. 없으면 가격 하락을 적용하지 않는다.
    #[serde(default)]
    pub price_reference_year: Option<i32>,
    pub battery: BatteryParameters,
    /// 기본 전력 소비율 [kWh/km]
    pub consumption_kwh_per_km: f64,
    #[serde(default)]
    pub adjustments: ConsumptionAdjustments,
    /// 충전 효율(0~1)
    pub charging_efficiency: f64,
    /// 최대 충전 전력 [kW]
    pub max_charging_power_kw: f64,
    pub maintenance: MaintenanceParameters,
    pub residual_value: ResidualCurve,
}

/// 디젤 트럭 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieselParameters {
    pub name: String,
    pub purchase_price: f64,
    /// 엔진 출력 [kW]
    pub engine_power_kw: f64,
    /// 배기량 [L]
    pub engine_displacement_l: f64,
    /// 기본 연료 소비율 [L/km]
    pub fuel_consumption_l_per_km: f64,
    #[serde(default)]
    pub adjustments: ConsumptionAdjustments,
    /// 요소수 소비량(연료 대비 비율)
    #[serde(default)]
    pub adblue_fraction: f64,
    /// 연료 1L당 CO2 배출량 [kg]
    pub co2_kg_per_litre: f64,
    pub maintenance: MaintenanceParameters,
    pub residual_value: ResidualCurve,
}

/// 차량 입력. 동력원별로 필요한 항목이 다르다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VehicleParameters {
    BatteryElectric(BatteryElectricParameters),
    Diesel(DieselParameters),
}

impl VehicleParameters {
    pub fn vehicle_type(&self) -> VehicleType {
        match self {
            VehicleParameters::BatteryElectric(_) => VehicleType::BatteryElectric,
            VehicleParameters::Diesel(_) => VehicleType::Diesel,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VehicleParameters::BatteryElectric(v) => &v.name,
            VehicleParameters::Diesel(v) => &v.name,
        }
    }

    pub fn maintenance(&self) -> &MaintenanceParameters {
        match self {
            VehicleParameters::BatteryElectric(v) => &v.maintenance,
            VehicleParameters::Diesel(v) => &v.maintenance,
        }
    }

    pub fn residual_value(&self) -> &ResidualCurve {
        match self {
            VehicleParameters::BatteryElectric(v) => &v.residual_value,
            VehicleParameters::Diesel(v) => &v.residual_value,
        }
    }

    pub fn adjustments(&self) -> &ConsumptionAdjustments {
        match self {
            VehicleParameters::BatteryElectric(v) => &v.adjustments,
            VehicleParameters::Diesel(v) => &v.adjustments,
        }
    }

    pub fn as_battery_electric(&self) -> Option<&BatteryElectricParameters> {
        match self {
            VehicleParameters::BatteryElectric(v) => Some(v),
            VehicleParameters::Diesel(_) => None,
        }
    }

    pub fn as_diesel(&self) -> Option<&DieselParameters> {
        match self {
            VehicleParameters::Diesel(v) => Some(v),
            VehicleParameters::BatteryElectric(_) => None,
        }
    }

    /// 분석 시작 연도 기준 구매가. 전기차는 기준 연도 이후 실질 가격 하락을 반영한다.
    pub fn effective_purchase_price(&self, start_year: i32) -> f64 {
        match self {
            VehicleParameters::BatteryElectric(v) => match v.price_reference_year {
                Some(reference) if start_year > reference => {
                    let years = start_year - reference;
                    v.purchase_price * (1.0 - v.annual_price_decline).powi(years)
                }
                _ => v.purchase_price,
            },
            VehicleParameters::Diesel(v) => v.purchase_price,
        }
    }
}
