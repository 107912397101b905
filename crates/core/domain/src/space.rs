//! 空间层级（楼宇 → 楼层 → 房间 → 子区域）的节点模型。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// 空间 ID。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(String);

impl SpaceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpaceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SpaceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 单个指标的安全区间。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ThresholdEntry {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            source: None,
        }
    }
}

/// 阈值配置：展示键（如 `CO2cal`）→ 安全区间。
pub type ThresholdConfig = BTreeMap<String, ThresholdEntry>;

/// 空间节点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    /// `None` 表示根节点。
    pub parent_id: Option<SpaceId>,
    pub child_ids: BTreeSet<SpaceId>,
    pub threshold_config: ThresholdConfig,
}

impl Space {
    pub fn new(id: impl Into<SpaceId>, parent_id: Option<SpaceId>) -> Self {
        Self {
            id: id.into(),
            parent_id,
            child_ids: BTreeSet::new(),
            threshold_config: ThresholdConfig::new(),
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SpaceId>,
    {
        self.child_ids.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn with_threshold(mut self, display_key: impl Into<String>, entry: ThresholdEntry) -> Self {
        self.threshold_config.insert(display_key.into(), entry);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn has_own_thresholds(&self) -> bool {
        !self.threshold_config.is_empty()
    }
}
