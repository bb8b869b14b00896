//! (비용 항목, 차종, 계산 방식) 조합으로 전략을 찾아주는 레지스트리.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::TcoError;
use crate::scenario::{ScenarioInput, VehicleType};
use crate::strategies::battery::{FixedScheduleReplacement, ThresholdTriggeredReplacement};
use crate::strategies::energy::{DieselFuelCost, ElectricityCost};
use crate::strategies::financing::{CashPurchase, LoanPurchase};
use crate::strategies::infrastructure::{ChargingInfrastructure, RefuellingInfrastructureCost};
use crate::strategies::insurance::{FlatRegistration, RoadUserChargeRegistration, ValueBasedInsurance};
use crate::strategies::maintenance::{AgeBasedMaintenance, DistanceBasedMaintenance};
use crate::strategies::residual::ResidualValueCredit;
use crate::strategies::taxes::{DieselCarbonTax, DieselFuelLevy, ElectricRoadUserCharge};
use crate::strategies::{CostCategory, CostStrategy, NotApplicable, StrategyMethod};

/// 레지스트리 키.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrategyKey {
    pub category: CostCategory,
    pub vehicle_type: VehicleType,
    pub method: StrategyMethod,
}

/// 전략 레지스트리.
#[derive(Debug, Clone, Default)]
pub struct StrategyFactory {
    registry: HashMap<StrategyKey, Arc<dyn CostStrategy>>,
}

impl StrategyFactory {
    /// 아무 전략도 등록되지 않은 레지스트리.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 기본 제공 전략을 모두 등록한다.
    pub fn with_defaults() -> Self {
        use StrategyMethod::*;
        use VehicleType::*;

        let mut factory = Self::empty();
        let mut add = |category, vehicle_type, method, strategy: Arc<dyn CostStrategy>| {
            factory.registry.insert(
                StrategyKey {
                    category,
                    vehicle_type,
                    method,
                },
                strategy,
            );
        };

        for vt in [BatteryElectric, Diesel] {
            add(CostCategory::Acquisition, vt, Cash, Arc::new(CashPurchase));
            add(CostCategory::Acquisition, vt, Loan, Arc::new(LoanPurchase));
            add(CostCategory::Maintenance, vt, DistanceBased, Arc::new(DistanceBasedMaintenance));
            add(CostCategory::Maintenance, vt, AgeBased, Arc::new(AgeBasedMaintenance));
            add(CostCategory::Insurance, vt, Standard, Arc::new(ValueBasedInsurance));
            add(CostCategory::Registration, vt, Flat, Arc::new(FlatRegistration));
            add(
                CostCategory::Registration,
                vt,
                RoadUserChargeAdjusted,
                Arc::new(RoadUserChargeRegistration),
            );
            add(CostCategory::ResidualValue, vt, Standard, Arc::new(ResidualValueCredit));
        }

        add(CostCategory::Energy, BatteryElectric, Standard, Arc::new(ElectricityCost));
        add(
            CostCategory::BatteryReplacement,
            BatteryElectric,
            ThresholdTriggered,
            Arc::new(ThresholdTriggeredReplacement),
        );
        add(
            CostCategory::BatteryReplacement,
            BatteryElectric,
            FixedSchedule,
            Arc::new(FixedScheduleReplacement),
        );
        add(CostCategory::Infrastructure, BatteryElectric, Standard, Arc::new(ChargingInfrastructure));
        add(
            CostCategory::CarbonTax,
            BatteryElectric,
            Standard,
            Arc::new(NotApplicable {
                category: CostCategory::CarbonTax,
            }),
        );
        add(CostCategory::OtherTaxes, BatteryElectric, Standard, Arc::new(ElectricRoadUserCharge));

        add(CostCategory::Energy, Diesel, Standard, Arc::new(DieselFuelCost));
        add(
            CostCategory::BatteryReplacement,
            Diesel,
            Standard,
            Arc::new(NotApplicable {
                category: CostCategory::BatteryReplacement,
            }),
        );
        add(CostCategory::Infrastructure, Diesel, Standard, Arc::new(RefuellingInfrastructureCost));
        add(CostCategory::CarbonTax, Diesel, Standard, Arc::new(DieselCarbonTax));
        add(CostCategory::OtherTaxes, Diesel, Standard, Arc::new(DieselFuelLevy));

        factory
    }

    /// 전략을 등록한다. 같은 키가 있으면 교체한다.
    pub fn register(
        &mut self,
        vehicle_type: VehicleType,
        method: StrategyMethod,
        strategy: Arc<dyn CostStrategy>,
    ) -> Option<Arc<dyn CostStrategy>> {
        let key = StrategyKey {
            category: strategy.category(),
            vehicle_type,
            method,
        };
        self.registry.insert(key, strategy)
    }

    /// 조합에 맞는 전략을 찾는다. 없으면 구성 오류.
    pub fn resolve(
        &self,
        category: CostCategory,
        vehicle_type: VehicleType,
        method: StrategyMethod,
    ) -> Result<Arc<dyn CostStrategy>, TcoError> {
        let key = StrategyKey {
            category,
            vehicle_type,
            method,
        };
        self.registry.get(&key).cloned().ok_or_else(|| {
            TcoError::configuration(format!(
                "등록된 전략이 없습니다: {category} / {vehicle_type} / {method:?}"
            ))
        })
    }

    /// 시나리오에 필요한 모든 항목의 전략을 한 번에 찾는다.
    pub fn resolve_for(&self, scenario: &ScenarioInput) -> Result<StrategySet, TcoError> {
        let vehicle_type = scenario.vehicle_type();
        let entries = CostCategory::ALL
            .into_iter()
            .map(|category| {
                let strategy = self.resolve(category, vehicle_type, scenario.method_for(category))?;
                Ok((category, strategy))
            })
            .collect::<Result<Vec<_>, TcoError>>()?;
        Ok(StrategySet { entries })
    }
}

/// 계산 1회에 사용하는 항목별 전략. 항목마다 정확히 하나씩 존재한다.
#[derive(Debug, Clone)]
pub struct StrategySet {
    entries: Vec<(CostCategory, Arc<dyn CostStrategy>)>,
}

impl StrategySet {
    pub fn iter(&self) -> impl Iterator<Item = (CostCategory, &dyn CostStrategy)> + '_ {
        self.entries.iter().map(|(c, s)| (*c, s.as_ref()))
    }

    pub fn get(&self, category: CostCategory) -> Option<&dyn CostStrategy> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| s.as_ref())
    }
}
