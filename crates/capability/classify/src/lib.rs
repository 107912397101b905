//! 严重度分级与事件检测（纯函数，无共享状态）。

mod events;
mod status;

pub use events::{EventStatus, detect_events};
pub use status::{CRITICAL_AT, StatusClass, StatusColor, Verdict, WARNING_AT, classify};
