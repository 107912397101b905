//! 指标标准化：原始 min/max 读数 → 距阈值百分比与严重度。

mod evaluator;
mod normalizer;
mod provider;

pub use evaluator::{SpaceEvaluator, SpaceSnapshot};
pub use normalizer::{
    INHG_TO_HPA, MetricNormalizer, NormalizerOptions, ProcessedMetric, normalize_metric,
};
pub use provider::{ReadingsProvider, StaticReadingsProvider};

use envwatch_hierarchy::HierarchyError;

/// 标准化错误。
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error("readings provider error: {0}")]
    Provider(String),
}
