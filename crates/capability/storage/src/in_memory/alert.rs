//! 告警内存存储实现
//!
//! 模拟后端的 PATCH 语义：只写入请求体携带的字段，时间戳由调用方维护。

use crate::error::StorageError;
use crate::traits::AlertStore;
use api_contract::{AlertPage, AlertUpdateRequest};
use domain::AlertRecord;
use std::sync::RwLock;

/// 告警内存存储（按插入顺序分页）
pub struct InMemoryAlertStore {
    alerts: RwLock<Vec<AlertRecord>>,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self {
            alerts: RwLock::new(Vec::new()),
        }
    }

    pub fn with_alerts(alerts: Vec<AlertRecord>) -> Self {
        Self {
            alerts: RwLock::new(alerts),
        }
    }

    /// 外部检测方写入新告警
    pub fn insert_alert(&self, record: AlertRecord) -> Result<(), StorageError> {
        let mut alerts = self
            .alerts
            .write()
            .map_err(|_| StorageError::lock("insert_alert"))?;
        if alerts.iter().any(|item| item.id == record.id) {
            return Err(StorageError::new("alert already exists")
                .with_context(format!("insert_alert {}", record.id)));
        }
        alerts.push(record);
        Ok(())
    }
}

impl Default for InMemoryAlertStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn list_alerts(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<AlertPage<AlertRecord>, StorageError> {
        if page == 0 || page_size == 0 {
            return Err(StorageError::new("page and page_size must be positive")
                .with_context(format!("list_alerts page={page} page_size={page_size}")));
        }
        let alerts = self
            .alerts
            .read()
            .map_err(|_| StorageError::lock("list_alerts"))?;
        let offset = (page as usize - 1).saturating_mul(page_size as usize);
        let items = alerts
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok(AlertPage {
            items,
            total: alerts.len() as u64,
            page,
            page_size,
        })
    }

    async fn find_alert(&self, alert_id: &str) -> Result<Option<AlertRecord>, StorageError> {
        let alerts = self
            .alerts
            .read()
            .map_err(|_| StorageError::lock("find_alert"))?;
        Ok(alerts.iter().find(|item| item.id == alert_id).cloned())
    }

    async fn update_alert(
        &self,
        alert_id: &str,
        update: &AlertUpdateRequest,
    ) -> Result<Option<AlertRecord>, StorageError> {
        let mut alerts = self
            .alerts
            .write()
            .map_err(|_| StorageError::lock("update_alert"))?;
        let Some(alert) = alerts.iter_mut().find(|item| item.id == alert_id) else {
            return Ok(None);
        };
        alert.status = update.status;
        alert.remarks = Some(update.remarks.clone());
        if let Some(acknowledged) = update.user_acknowledged {
            alert.user_acknowledged = acknowledged;
        }
        if let Some(next_trigger_time) = update.next_trigger_time {
            alert.next_trigger_time = next_trigger_time;
        }
        if let Some(recheck) = update.recheck_next_trigger {
            alert.recheck_on_trigger = recheck;
        }
        Ok(Some(alert.clone()))
    }
}
