use domain::{AggregatedReadings, EventKey};
use envwatch_telemetry::record_event_triggered;
use serde::Serialize;

/// 单个事件键的触发状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventStatus {
    pub key: EventKey,
    pub label: &'static str,
    pub triggered: bool,
}

/// 按固定事件表检测触发状态；`{key}_max` 缺失的事件不输出（未上报，而非未触发）。
pub fn detect_events(readings: &AggregatedReadings) -> Vec<EventStatus> {
    EventKey::ALL
        .into_iter()
        .filter_map(|key| {
            let max = readings.max_of(key.aggregation_key())?;
            let triggered = max > 0.0;
            if triggered {
                record_event_triggered();
            }
            Some(EventStatus {
                key,
                label: key.label(),
                triggered,
            })
        })
        .collect()
}
