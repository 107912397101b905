//! 告警生命周期：状态机、挂起复核与带回滚的提交。

mod lifecycle;
mod recheck;
mod service;

pub use lifecycle::{PlannedTransition, TransitionRequest, allowed_targets, can_transition, plan_transition};
pub use recheck::{SuspensionOutcome, evaluate_suspension, plan_recheck};
pub use service::{AlertService, AlertServiceConfig, now_epoch_ms};

use domain::AlertStatus;

/// 系统动作使用的 actor。
pub const SYSTEM_ACTOR: &str = "system";

/// 告警生命周期错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AlertError {
    #[error("transition not permitted from {from} to {to}")]
    InvalidTransition { from: AlertStatus, to: AlertStatus },
    #[error("remarks are required")]
    MissingRemarks,
    #[error("alert {0} already has a transition in flight")]
    InFlight(String),
    #[error("alert not found: {0}")]
    NotFound(String),
    #[error("alert {0} is not suspended")]
    NotSuspended(String),
    #[error("storage error: {0}")]
    Storage(String),
}
