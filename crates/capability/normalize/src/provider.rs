use crate::NormalizeError;
use async_trait::async_trait;
use domain::{AggregatedReadings, SpaceId};
use std::collections::{BTreeSet, HashMap};

/// 聚合读数来源（外部遥测/聚合方）。
///
/// 实时数据与演示数据都通过注入不同的实现切换，而不是全局开关。
#[async_trait]
pub trait ReadingsProvider: Send + Sync {
    /// 返回覆盖 `spaces` 全部空间的聚合读数。
    async fn aggregated(
        &self,
        spaces: &BTreeSet<SpaceId>,
    ) -> Result<AggregatedReadings, NormalizeError>;
}

/// 固定读数来源（测试与演示）。
///
/// 多个空间合并时：`*_min` 取最小、`*_max` 取最大，空值不参与。
#[derive(Debug, Clone, Default)]
pub struct StaticReadingsProvider {
    readings: HashMap<SpaceId, AggregatedReadings>,
}

impl StaticReadingsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_space(mut self, id: impl Into<SpaceId>, readings: AggregatedReadings) -> Self {
        self.readings.insert(id.into(), readings);
        self
    }
}

#[async_trait]
impl ReadingsProvider for StaticReadingsProvider {
    async fn aggregated(
        &self,
        spaces: &BTreeSet<SpaceId>,
    ) -> Result<AggregatedReadings, NormalizeError> {
        let mut merged: HashMap<String, Option<f64>> = HashMap::new();
        for readings in spaces.iter().filter_map(|id| self.readings.get(id)) {
            for (key, value) in readings.iter() {
                let slot = merged.entry(key.to_string()).or_insert(None);
                *slot = match (*slot, value) {
                    (current, None) => current,
                    (None, Some(value)) => Some(value),
                    (Some(current), Some(value)) if key.ends_with("_min") => Some(current.min(value)),
                    (Some(current), Some(value)) => Some(current.max(value)),
                };
            }
        }
        Ok(merged.into_iter().collect())
    }
}
