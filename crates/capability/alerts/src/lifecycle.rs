//! 告警状态机。
//!
//! ```text
//! active       → acknowledged | dismissed | suspended
//! acknowledged → resolved | dismissed
//! suspended    → active | dismissed
//! resolved, dismissed: 终态
//! ```

use crate::{AlertError, SYSTEM_ACTOR};
use api_contract::AlertUpdateRequest;
use domain::{AlertAction, AlertRecord, AlertStatus};

/// `from` 允许流转到的状态。
pub fn allowed_targets(from: AlertStatus) -> &'static [AlertStatus] {
    match from {
        AlertStatus::Active => &[
            AlertStatus::Acknowledged,
            AlertStatus::Dismissed,
            AlertStatus::Suspended,
        ],
        AlertStatus::Acknowledged => &[AlertStatus::Resolved, AlertStatus::Dismissed],
        AlertStatus::Suspended => &[AlertStatus::Active, AlertStatus::Dismissed],
        AlertStatus::Resolved | AlertStatus::Dismissed => &[],
    }
}

pub fn can_transition(from: AlertStatus, to: AlertStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// 一次用户发起的流转请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    pub target: AlertStatus,
    pub remarks: String,
    pub actor: String,
    /// 仅对 `suspended` 有意义；`None` 表示只能手动恢复。
    pub next_trigger_time: Option<i64>,
    /// 仅对 `suspended` 有意义；`None` 时使用服务配置的默认值。
    pub recheck_on_trigger: Option<bool>,
}

impl TransitionRequest {
    pub fn new(target: AlertStatus, remarks: impl Into<String>) -> Self {
        Self {
            target,
            remarks: remarks.into(),
            actor: SYSTEM_ACTOR.to_string(),
            next_trigger_time: None,
            recheck_on_trigger: None,
        }
    }

    pub fn acknowledge(remarks: impl Into<String>) -> Self {
        Self::new(AlertStatus::Acknowledged, remarks)
    }

    pub fn resolve(remarks: impl Into<String>) -> Self {
        Self::new(AlertStatus::Resolved, remarks)
    }

    pub fn dismiss(remarks: impl Into<String>) -> Self {
        Self::new(AlertStatus::Dismissed, remarks)
    }

    /// 手动恢复被挂起的告警。
    pub fn reactivate(remarks: impl Into<String>) -> Self {
        Self::new(AlertStatus::Active, remarks)
    }

    pub fn suspend(
        remarks: impl Into<String>,
        next_trigger_time: Option<i64>,
        recheck_on_trigger: bool,
    ) -> Self {
        Self {
            next_trigger_time,
            recheck_on_trigger: Some(recheck_on_trigger),
            ..Self::new(AlertStatus::Suspended, remarks)
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }
}

/// 已校验的流转：新的记录状态 + 要提交给协作方的 PATCH 体。
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTransition {
    pub record: AlertRecord,
    pub update: AlertUpdateRequest,
}

/// 校验并计算一次流转，不产生任何副作用。
pub fn plan_transition(
    current: &AlertRecord,
    request: &TransitionRequest,
    now_ms: i64,
    default_recheck: bool,
) -> Result<PlannedTransition, AlertError> {
    if !can_transition(current.status, request.target) {
        return Err(AlertError::InvalidTransition {
            from: current.status,
            to: request.target,
        });
    }
    let remarks = request.remarks.trim();
    if remarks.is_empty() {
        return Err(AlertError::MissingRemarks);
    }

    let mut record = current.clone();
    let mut update = AlertUpdateRequest::new(request.target, remarks);
    record.status = request.target;
    record.remarks = Some(remarks.to_string());

    match request.target {
        AlertStatus::Acknowledged => {
            record.user_acknowledged = true;
            record.acknowledged_at = Some(now_ms);
            update.user_acknowledged = Some(true);
        }
        AlertStatus::Suspended => {
            let recheck = request.recheck_on_trigger.unwrap_or(default_recheck);
            record.next_trigger_time = request.next_trigger_time;
            record.recheck_on_trigger = recheck;
            update.next_trigger_time = Some(request.next_trigger_time);
            update.recheck_next_trigger = Some(recheck);
        }
        AlertStatus::Resolved => {
            record.resolved_at = Some(now_ms);
        }
        AlertStatus::Active => {
            record.next_trigger_time = None;
            record.recheck_on_trigger = false;
            update.next_trigger_time = Some(None);
            update.recheck_next_trigger = Some(false);
        }
        AlertStatus::Dismissed => {}
    }

    record.actions.push(new_action(request.target, remarks, &request.actor, now_ms));
    Ok(PlannedTransition { record, update })
}

pub(crate) fn new_action(status: AlertStatus, remarks: &str, actor: &str, at_ms: i64) -> AlertAction {
    AlertAction {
        action_id: uuid::Uuid::new_v4().to_string(),
        status,
        remarks: remarks.to_string(),
        actor: actor.to_string(),
        at_ms,
    }
}
