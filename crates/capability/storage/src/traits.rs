//! 存储协作方接口
//!
//! - SpaceStore：空间记录批量拉取
//! - AlertStore：告警分页拉取与 PATCH 式更新
//!
//! 设计原则：
//! - 核心逻辑只依赖这些接口，不关心 REST/缓存细节
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use api_contract::{AlertPage, AlertUpdateRequest};
use async_trait::async_trait;
use domain::{AlertRecord, Space};

/// 空间存储接口
#[async_trait]
pub trait SpaceStore: Send + Sync {
    /// 拉取全部空间记录
    async fn list_spaces(&self) -> Result<Vec<Space>, StorageError>;
}

/// 告警存储接口
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// 分页拉取告警（`page` 从 1 开始）
    async fn list_alerts(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<AlertPage<AlertRecord>, StorageError>;

    /// 查找指定告警
    async fn find_alert(&self, alert_id: &str) -> Result<Option<AlertRecord>, StorageError>;

    /// 提交状态流转；告警不存在时返回 `None`
    async fn update_alert(
        &self,
        alert_id: &str,
        update: &AlertUpdateRequest,
    ) -> Result<Option<AlertRecord>, StorageError>;
}
