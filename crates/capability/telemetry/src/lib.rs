//! 追踪初始化与进程级计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 计数指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub metrics_processed: u64,
    pub metrics_skipped: u64,
    pub scale_mismatches: u64,
    pub auto_conversions: u64,
    pub events_triggered: u64,
    pub transitions_committed: u64,
    pub transitions_rejected: u64,
    pub transitions_rolled_back: u64,
    pub rechecks_reactivated: u64,
    pub rechecks_auto_cleared: u64,
}

/// 计数指标。
pub struct TelemetryMetrics {
    metrics_processed: AtomicU64,
    metrics_skipped: AtomicU64,
    scale_mismatches: AtomicU64,
    auto_conversions: AtomicU64,
    events_triggered: AtomicU64,
    transitions_committed: AtomicU64,
    transitions_rejected: AtomicU64,
    transitions_rolled_back: AtomicU64,
    rechecks_reactivated: AtomicU64,
    rechecks_auto_cleared: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            metrics_processed: AtomicU64::new(0),
            metrics_skipped: AtomicU64::new(0),
            scale_mismatches: AtomicU64::new(0),
            auto_conversions: AtomicU64::new(0),
            events_triggered: AtomicU64::new(0),
            transitions_committed: AtomicU64::new(0),
            transitions_rejected: AtomicU64::new(0),
            transitions_rolled_back: AtomicU64::new(0),
            rechecks_reactivated: AtomicU64::new(0),
            rechecks_auto_cleared: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            metrics_processed: self.metrics_processed.load(Ordering::Relaxed),
            metrics_skipped: self.metrics_skipped.load(Ordering::Relaxed),
            scale_mismatches: self.scale_mismatches.load(Ordering::Relaxed),
            auto_conversions: self.auto_conversions.load(Ordering::Relaxed),
            events_triggered: self.events_triggered.load(Ordering::Relaxed),
            transitions_committed: self.transitions_committed.load(Ordering::Relaxed),
            transitions_rejected: self.transitions_rejected.load(Ordering::Relaxed),
            transitions_rolled_back: self.transitions_rolled_back.load(Ordering::Relaxed),
            rechecks_reactivated: self.rechecks_reactivated.load(Ordering::Relaxed),
            rechecks_auto_cleared: self.rechecks_auto_cleared.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing；`RUST_LOG` 优先，否则使用传入的过滤表达式。
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 记录标准化输出的指标数。
pub fn record_metric_processed() {
    metrics().metrics_processed.fetch_add(1, Ordering::Relaxed);
}

/// 记录因数据缺失被跳过的指标数。
pub fn record_metric_skipped() {
    metrics().metrics_skipped.fetch_add(1, Ordering::Relaxed);
}

/// 记录量纲不匹配次数。
pub fn record_scale_mismatch() {
    metrics().scale_mismatches.fetch_add(1, Ordering::Relaxed);
}

/// 记录气压阈值自动换算次数。
pub fn record_auto_conversion() {
    metrics().auto_conversions.fetch_add(1, Ordering::Relaxed);
}

/// 记录触发中的事件数。
pub fn record_event_triggered() {
    metrics().events_triggered.fetch_add(1, Ordering::Relaxed);
}

/// 记录告警状态流转提交成功次数。
pub fn record_transition_committed() {
    metrics()
        .transitions_committed
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录告警状态流转被拒绝次数（非法流转、缺少备注、并发冲突）。
pub fn record_transition_rejected() {
    metrics()
        .transitions_rejected
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录提交失败后回滚次数。
pub fn record_transition_rolled_back() {
    metrics()
        .transitions_rolled_back
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录挂起到期后重新激活次数。
pub fn record_recheck_reactivated() {
    metrics()
        .rechecks_reactivated
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录挂起到期复核后自动清除次数。
pub fn record_recheck_auto_cleared() {
    metrics()
        .rechecks_auto_cleared
        .fetch_add(1, Ordering::Relaxed);
}
