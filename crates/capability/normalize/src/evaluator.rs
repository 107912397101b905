use crate::{MetricNormalizer, NormalizeError, ProcessedMetric, ReadingsProvider};
use domain::{EventKey, SpaceId};
use envwatch_classify::{EventStatus, StatusClass, detect_events};
use envwatch_hierarchy::SpaceTree;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// 某空间（含后代）一次刷新的结果。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSnapshot {
    pub space_id: SpaceId,
    /// 提供阈值的空间；为空时所有指标都使用宽松默认区间。
    pub threshold_origin: Option<SpaceId>,
    pub metrics: Vec<ProcessedMetric>,
    pub events: Vec<EventStatus>,
}

impl SpaceSnapshot {
    pub fn has_thresholds(&self) -> bool {
        self.threshold_origin.is_some()
    }

    /// 最严重的指标类别；没有指标时为 `None`。
    pub fn worst_class(&self) -> Option<StatusClass> {
        self.metrics.iter().map(|metric| metric.status_class).max()
    }

    pub fn triggered_events(&self) -> impl Iterator<Item = EventKey> + '_ {
        self.events
            .iter()
            .filter(|event| event.triggered)
            .map(|event| event.key)
    }

    pub fn mismatched(&self) -> impl Iterator<Item = &ProcessedMetric> {
        self.metrics.iter().filter(|metric| metric.is_scale_mismatch)
    }
}

/// 空间评估：阈值解析 → 拉取后代聚合读数 → 标准化 + 事件检测。
#[derive(Clone)]
pub struct SpaceEvaluator {
    tree: Arc<SpaceTree>,
    provider: Arc<dyn ReadingsProvider>,
    normalizer: MetricNormalizer,
}

impl SpaceEvaluator {
    pub fn new(
        tree: Arc<SpaceTree>,
        provider: Arc<dyn ReadingsProvider>,
        normalizer: MetricNormalizer,
    ) -> Self {
        Self {
            tree,
            provider,
            normalizer,
        }
    }

    pub fn tree(&self) -> &SpaceTree {
        &self.tree
    }

    pub async fn evaluate(&self, space_id: &SpaceId) -> Result<SpaceSnapshot, NormalizeError> {
        let effective = self.tree.resolver().effective_config(space_id)?;
        let scope = self.tree.descendants(space_id)?;
        let readings = self.provider.aggregated(&scope).await?;
        let metrics = self
            .normalizer
            .process(&readings, &effective.thresholds, None);
        let events = detect_events(&readings);
        let snapshot = SpaceSnapshot {
            space_id: space_id.clone(),
            threshold_origin: effective.origin,
            metrics,
            events,
        };
        info!(
            target: "envwatch.normalize",
            space_id = %space_id,
            scope_size = scope.len(),
            metrics = snapshot.metrics.len(),
            events = snapshot.events.len(),
            worst = snapshot.worst_class().map(StatusClass::as_str).unwrap_or("none"),
            "space_evaluated"
        );
        Ok(snapshot)
    }
}
