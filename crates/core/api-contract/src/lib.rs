//! 与外部协作方交换的稳定 DTO。
//!
//! - 空间记录批量拉取（`SpaceDto`，camelCase）
//! - 告警分页拉取（`AlertPage`）
//! - 告警 PATCH 更新体（`AlertUpdateRequest`，snake_case）

use domain::{AlertStatus, Space, SpaceId, ThresholdConfig};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// 空间记录（批量拉取）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDto {
    pub id: String,
    #[serde(default, alias = "parent_id")]
    pub parent_id: Option<String>,
    #[serde(default, alias = "child_ids")]
    pub child_ids: Vec<String>,
    /// 后端对未配置的空间可能返回 `null`。
    #[serde(default, alias = "threshold_config", deserialize_with = "null_as_empty")]
    pub threshold_config: ThresholdConfig,
}

impl From<SpaceDto> for Space {
    fn from(dto: SpaceDto) -> Self {
        Space {
            id: SpaceId::from(dto.id),
            parent_id: dto
                .parent_id
                .filter(|value| !value.is_empty())
                .map(SpaceId::from),
            child_ids: dto
                .child_ids
                .into_iter()
                .map(SpaceId::from)
                .collect::<BTreeSet<_>>(),
            threshold_config: dto.threshold_config,
        }
    }
}

/// 告警分页结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// 告警状态流转的 PATCH 请求体。
///
/// `next_trigger_time` 为双层 Option：外层 `None` 表示不携带该字段，
/// `Some(None)` 序列化为 `null`（挂起后仅允许手动恢复）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertUpdateRequest {
    pub status: AlertStatus,
    pub remarks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_acknowledged: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub next_trigger_time: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recheck_next_trigger: Option<bool>,
}

impl AlertUpdateRequest {
    pub fn new(status: AlertStatus, remarks: impl Into<String>) -> Self {
        Self {
            status,
            remarks: remarks.into(),
            user_acknowledged: None,
            next_trigger_time: None,
            recheck_next_trigger: None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<ThresholdConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ThresholdConfig>::deserialize(deserializer)?.unwrap_or_default())
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<i64>::deserialize(deserializer)?))
}
