//! 告警记录与状态。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 告警状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
    Dismissed,
    Suspended,
}

impl AlertStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Dismissed => "dismissed",
            AlertStatus::Suspended => "suspended",
        }
    }

    pub fn parse(value: &str) -> Option<AlertStatus> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(AlertStatus::Active),
            "acknowledged" => Some(AlertStatus::Acknowledged),
            "resolved" => Some(AlertStatus::Resolved),
            "dismissed" => Some(AlertStatus::Dismissed),
            "suspended" => Some(AlertStatus::Suspended),
            _ => None,
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 告警处理动作（审计轨迹）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertAction {
    pub action_id: String,
    pub status: AlertStatus,
    pub remarks: String,
    /// 用户 ID，系统触发时为 `system`。
    pub actor: String,
    pub at_ms: i64,
}

/// 告警记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub status: AlertStatus,
    pub remarks: Option<String>,
    /// 挂起后重新触发的时间；`None` 表示只能手动恢复。
    pub next_trigger_time: Option<i64>,
    #[serde(default)]
    pub recheck_on_trigger: bool,
    /// 后端记录可能不带确认字段，缺省为未确认。
    #[serde(default)]
    pub user_acknowledged: bool,
    #[serde(default)]
    pub acknowledged_at: Option<i64>,
    pub resolved_at: Option<i64>,
    pub value_reset_time: Option<i64>,
    #[serde(default)]
    pub actions: Vec<AlertAction>,
}

impl AlertRecord {
    /// 外部检测方新建的告警（初始为 `active`）。
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: AlertStatus::Active,
            remarks: None,
            next_trigger_time: None,
            recheck_on_trigger: false,
            user_acknowledged: false,
            acknowledged_at: None,
            resolved_at: None,
            value_reset_time: None,
            actions: Vec::new(),
        }
    }
}
