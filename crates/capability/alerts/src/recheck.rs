//! 挂起到期后的处理决策。
//!
//! 定时任务本身属于外部协作方；这里只根据记录上的 `next_trigger_time` /
//! `recheck_on_trigger` 与外部给出的实时判断，决定告警的去向。

use crate::lifecycle::new_action;
use crate::{AlertError, PlannedTransition, SYSTEM_ACTOR};
use api_contract::AlertUpdateRequest;
use domain::{AlertRecord, AlertStatus};

const REACTIVATED_REMARKS: &str = "reactivated after suspension";
const AUTO_CLEARED_REMARKS: &str = "condition cleared at recheck";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionOutcome {
    /// 未到期、仅可手动恢复，或需要复核但实时值尚不可用。
    StillSuspended,
    Reactivate,
    /// 复核时条件已不成立，告警视为已解决。
    AutoClear,
}

/// `condition_still_holds`：实时值是否仍越过原阈值；`None` 表示暂无实时值。
pub fn evaluate_suspension(
    record: &AlertRecord,
    now_ms: i64,
    condition_still_holds: Option<bool>,
) -> Result<SuspensionOutcome, AlertError> {
    if record.status != AlertStatus::Suspended {
        return Err(AlertError::NotSuspended(record.id.clone()));
    }
    let Some(next_trigger_time) = record.next_trigger_time else {
        return Ok(SuspensionOutcome::StillSuspended);
    };
    if now_ms < next_trigger_time {
        return Ok(SuspensionOutcome::StillSuspended);
    }
    if !record.recheck_on_trigger {
        return Ok(SuspensionOutcome::Reactivate);
    }
    Ok(match condition_still_holds {
        Some(true) => SuspensionOutcome::Reactivate,
        Some(false) => SuspensionOutcome::AutoClear,
        None => SuspensionOutcome::StillSuspended,
    })
}

/// 将决策转换为系统发起的流转；`StillSuspended` 返回 `None`。
pub fn plan_recheck(
    record: &AlertRecord,
    outcome: SuspensionOutcome,
    now_ms: i64,
) -> Option<PlannedTransition> {
    let mut next = record.clone();
    let (status, remarks) = match outcome {
        SuspensionOutcome::StillSuspended => return None,
        SuspensionOutcome::Reactivate => (AlertStatus::Active, REACTIVATED_REMARKS),
        SuspensionOutcome::AutoClear => {
            next.resolved_at = Some(now_ms);
            next.value_reset_time = Some(now_ms);
            (AlertStatus::Resolved, AUTO_CLEARED_REMARKS)
        }
    };
    next.status = status;
    next.remarks = Some(remarks.to_string());
    next.next_trigger_time = None;
    next.actions
        .push(new_action(status, remarks, SYSTEM_ACTOR, now_ms));
    let update = AlertUpdateRequest {
        next_trigger_time: Some(None),
        ..AlertUpdateRequest::new(status, remarks)
    };
    Some(PlannedTransition {
        record: next,
        update,
    })
}
