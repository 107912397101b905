use crate::{HierarchyError, SpaceTree};
use domain::{MetricKey, SpaceId, ThresholdConfig, ThresholdEntry};
use std::collections::HashSet;
use tracing::{debug, warn};

/// 某空间实际生效的阈值集合。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveConfig {
    /// 提供阈值的空间（自身或最近的已配置祖先）；都未配置时为 `None`。
    pub origin: Option<SpaceId>,
    pub thresholds: ThresholdConfig,
}

impl EffectiveConfig {
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn get(&self, display_key: &str) -> Option<&ThresholdEntry> {
        self.thresholds.get(display_key)
    }

    pub fn for_metric(&self, metric: MetricKey) -> Option<&ThresholdEntry> {
        self.get(metric.display_key())
    }
}

/// 阈值继承解析：最近的非空配置整体生效，不跨层合并。
#[derive(Debug, Clone, Copy)]
pub struct ThresholdResolver<'a> {
    tree: &'a SpaceTree,
}

impl<'a> ThresholdResolver<'a> {
    pub fn new(tree: &'a SpaceTree) -> Self {
        Self { tree }
    }

    /// 逐级向上查找，遇到第一个已配置的祖先即返回；只有真正重复访问节点时才报错。
    pub fn effective_config(&self, id: &SpaceId) -> Result<EffectiveConfig, HierarchyError> {
        let space = self.tree.require(id)?;
        if space.has_own_thresholds() {
            return Ok(EffectiveConfig {
                origin: Some(space.id.clone()),
                thresholds: space.threshold_config.clone(),
            });
        }
        let mut seen = HashSet::from([&space.id]);
        let mut parent = space.parent_id.as_ref();
        while let Some(parent_id) = parent {
            let Some(ancestor) = self.tree.get(parent_id) else {
                break;
            };
            if !seen.insert(&ancestor.id) {
                warn!(
                    target: "envwatch.hierarchy",
                    space_id = %id,
                    revisited = %ancestor.id,
                    "thresholds_cycle"
                );
                return Err(HierarchyError::MalformedHierarchy {
                    space_id: ancestor.id.clone(),
                });
            }
            if ancestor.has_own_thresholds() {
                debug!(
                    target: "envwatch.hierarchy",
                    space_id = %id,
                    origin = %ancestor.id,
                    "thresholds_inherited"
                );
                return Ok(EffectiveConfig {
                    origin: Some(ancestor.id.clone()),
                    thresholds: ancestor.threshold_config.clone(),
                });
            }
            parent = ancestor.parent_id.as_ref();
        }
        Ok(EffectiveConfig::default())
    }
}

impl SpaceTree {
    pub fn resolver(&self) -> ThresholdResolver<'_> {
        ThresholdResolver::new(self)
    }
}
