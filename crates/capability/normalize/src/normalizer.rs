use domain::{AggregatedReadings, EventKey, MetricKey, MetricRange, ThresholdConfig, ThresholdEntry};
use envwatch_classify::{StatusClass, StatusColor, classify};
use envwatch_telemetry::{
    record_auto_conversion, record_metric_processed, record_metric_skipped, record_scale_mismatch,
};
use serde::Serialize;
use tracing::{debug, warn};

/// 英寸汞柱 → 百帕。
pub const INHG_TO_HPA: f64 = 33.8639;

// 经验阈值，保持不变以兼容既有告警行为。
const MISMATCH_ABOVE: f64 = 400.0;
const MISMATCH_BELOW: f64 = -200.0;
const CONVERT_THRESHOLD_MAX_BELOW: f64 = 100.0;
const CONVERT_RAW_MAX_ABOVE: f64 = 400.0;

/// 标准化选项。
#[derive(Debug, Clone, Copy)]
pub struct NormalizerOptions {
    /// 是否启用气压阈值 inHg → hPa 自动换算。
    pub pressure_auto_convert: bool,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            pressure_auto_convert: true,
        }
    }
}

/// 单个指标的标准化结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedMetric {
    pub key: MetricKey,
    pub label: &'static str,
    pub unit: &'static str,
    pub raw_min: f64,
    pub raw_max: f64,
    pub threshold_min: f64,
    pub threshold_max: f64,
    /// 截断到 0–100，仅用于仪表盘展示。
    pub normalized_value: f64,
    /// 未截断值，分级和不匹配检测都基于它。
    pub raw_normalized: f64,
    pub status_color: StatusColor,
    pub status_class: StatusClass,
    pub has_threshold: bool,
    pub is_scale_mismatch: bool,
    pub is_auto_converted: bool,
}

/// 对单个有效读数做标准化。
pub fn normalize_metric(
    key: MetricKey,
    range: MetricRange,
    entry: Option<&ThresholdEntry>,
    options: NormalizerOptions,
) -> ProcessedMetric {
    let has_threshold = entry.is_some();
    let (mut threshold_min, mut threshold_max) = match entry {
        Some(entry) => (entry.min, entry.max),
        None => (0.0, range.max * 2.0),
    };

    let is_auto_converted = options.pressure_auto_convert
        && key == MetricKey::Pressure
        && has_threshold
        && threshold_max < CONVERT_THRESHOLD_MAX_BELOW
        && range.max > CONVERT_RAW_MAX_ABOVE;
    if is_auto_converted {
        threshold_min *= INHG_TO_HPA;
        threshold_max *= INHG_TO_HPA;
    }

    let raw_normalized = if threshold_max == threshold_min {
        if range.max > threshold_max { 100.0 } else { 0.0 }
    } else {
        (range.max - threshold_min) / (threshold_max - threshold_min) * 100.0
    };

    let is_scale_mismatch = has_threshold
        && !is_auto_converted
        && (raw_normalized > MISMATCH_ABOVE || raw_normalized < MISMATCH_BELOW);

    let verdict = classify(raw_normalized, is_scale_mismatch);
    let spec = key.spec();
    ProcessedMetric {
        key,
        label: spec.label,
        unit: spec.unit,
        raw_min: range.min,
        raw_max: range.max,
        threshold_min,
        threshold_max,
        normalized_value: raw_normalized.clamp(0.0, 100.0),
        raw_normalized,
        status_color: verdict.color,
        status_class: verdict.class,
        has_threshold,
        is_scale_mismatch,
        is_auto_converted,
    }
}

/// 指标标准化器（无状态，可并发复用）。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricNormalizer {
    options: NormalizerOptions,
}

impl MetricNormalizer {
    pub fn new(options: NormalizerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> NormalizerOptions {
        self.options
    }

    /// 按 `keys` 顺序输出；`None` 时按映射表顺序遍历全部指标。
    pub fn process(
        &self,
        readings: &AggregatedReadings,
        thresholds: &ThresholdConfig,
        keys: Option<&[MetricKey]>,
    ) -> Vec<ProcessedMetric> {
        let keys = keys.unwrap_or(&MetricKey::ALL);
        keys.iter()
            .filter_map(|&key| self.process_one(readings, thresholds, key))
            .collect()
    }

    /// 字符串键子集；事件键与未知键被跳过。
    pub fn process_named(
        &self,
        readings: &AggregatedReadings,
        thresholds: &ThresholdConfig,
        names: &[&str],
    ) -> Vec<ProcessedMetric> {
        names
            .iter()
            .filter_map(|name| match MetricKey::parse(name) {
                Some(key) => Some(key),
                None => {
                    if EventKey::parse(name).is_none() {
                        debug!(target: "envwatch.normalize", key = %name, "unknown_metric_key");
                    }
                    None
                }
            })
            .filter_map(|key| self.process_one(readings, thresholds, key))
            .collect()
    }

    fn process_one(
        &self,
        readings: &AggregatedReadings,
        thresholds: &ThresholdConfig,
        key: MetricKey,
    ) -> Option<ProcessedMetric> {
        let range = readings
            .range(key.aggregation_key())
            .filter(|range| range.min.is_finite() && range.max.is_finite());
        let Some(range) = range else {
            record_metric_skipped();
            return None;
        };
        let processed = normalize_metric(key, range, thresholds.get(key.display_key()), self.options);
        record_metric_processed();
        if processed.is_auto_converted {
            record_auto_conversion();
            debug!(
                target: "envwatch.normalize",
                metric = key.spec().key,
                threshold_min = processed.threshold_min,
                threshold_max = processed.threshold_max,
                "pressure_threshold_auto_converted"
            );
        }
        if processed.is_scale_mismatch {
            record_scale_mismatch();
            warn!(
                target: "envwatch.normalize",
                metric = key.spec().key,
                raw_max = processed.raw_max,
                threshold_min = processed.threshold_min,
                threshold_max = processed.threshold_max,
                raw_normalized = processed.raw_normalized,
                "threshold_scale_mismatch"
            );
        }
        Some(processed)
    }
}
