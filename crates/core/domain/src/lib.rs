//! 环境/安防遥测的核心领域模型。

pub mod alert;
pub mod event;
pub mod metric;
pub mod reading;
pub mod space;

pub use alert::{AlertAction, AlertRecord, AlertStatus};
pub use event::EventKey;
pub use metric::{MetricKey, MetricSpec};
pub use reading::{AggregatedReadings, MetricRange};
pub use space::{Space, SpaceId, ThresholdConfig, ThresholdEntry};
