//! 聚合读数：`{key}_min` / `{key}_max` → 数值或空。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 某个指标的有效最小/最大值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

/// 单个空间（含其后代）的聚合读数。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedReadings {
    values: HashMap<String, Option<f64>>,
}

impl AggregatedReadings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<f64>) {
        self.values.insert(key.into(), value);
    }

    /// 链式写入一对 `{key}_min` / `{key}_max`。
    pub fn with_range(mut self, aggregation_key: &str, min: Option<f64>, max: Option<f64>) -> Self {
        self.insert(format!("{}_min", aggregation_key), min);
        self.insert(format!("{}_max", aggregation_key), max);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied().flatten()
    }

    pub fn max_of(&self, aggregation_key: &str) -> Option<f64> {
        self.get(&format!("{}_max", aggregation_key))
    }

    /// 返回有效区间；任一端缺失或两端都为 0（无数据哨兵）时返回 `None`。
    pub fn range(&self, aggregation_key: &str) -> Option<MetricRange> {
        let min = self.get(&format!("{}_min", aggregation_key))?;
        let max = self.max_of(aggregation_key)?;
        if min == 0.0 && max == 0.0 {
            return None;
        }
        Some(MetricRange { min, max })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, Option<f64>)> for AggregatedReadings {
    fn from_iter<T: IntoIterator<Item = (String, Option<f64>)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
