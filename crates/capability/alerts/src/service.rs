use crate::{
    AlertError, PlannedTransition, SuspensionOutcome, TransitionRequest, evaluate_suspension,
    plan_recheck, plan_transition,
};
use api_contract::AlertPage;
use domain::{AlertRecord, AlertStatus};
use envwatch_storage::AlertStore;
use envwatch_telemetry::{
    record_recheck_auto_cleared, record_recheck_reactivated, record_transition_committed,
    record_transition_rejected, record_transition_rolled_back,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AlertServiceConfig {
    pub page_size: u32,
    /// 挂起请求未携带 `recheck_on_trigger` 时的默认值。
    pub default_recheck_on_trigger: bool,
}

impl Default for AlertServiceConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            default_recheck_on_trigger: false,
        }
    }
}

#[derive(Default)]
struct AlertState {
    records: HashMap<String, AlertRecord>,
    in_flight: HashSet<String>,
}

struct AlertServiceInner {
    store: Arc<dyn AlertStore>,
    config: AlertServiceConfig,
    state: Mutex<AlertState>,
}

/// 告警服务：校验流转 → 乐观更新本地状态 → 提交协作方，失败回滚。
///
/// 同一告警同一时刻最多一个进行中的流转，第二个请求直接返回 `InFlight`；
/// 不同告警之间互不影响。
#[derive(Clone)]
pub struct AlertService {
    inner: Arc<AlertServiceInner>,
}

impl AlertService {
    pub fn new(store: Arc<dyn AlertStore>) -> Self {
        Self::with_config(store, AlertServiceConfig::default())
    }

    pub fn with_config(store: Arc<dyn AlertStore>, config: AlertServiceConfig) -> Self {
        Self {
            inner: Arc::new(AlertServiceInner {
                store,
                config,
                state: Mutex::new(AlertState::default()),
            }),
        }
    }

    /// 拉取一页告警并刷新本地缓存（进行中的告警保留本地状态）。
    pub async fn list(&self, page: u32) -> Result<AlertPage<AlertRecord>, AlertError> {
        let AlertPage {
            items,
            total,
            page,
            page_size,
        } = self
            .inner
            .store
            .list_alerts(page.max(1), self.inner.config.page_size.max(1))
            .await
            .map_err(|err| AlertError::Storage(err.to_string()))?;
        let mut state = self.inner.state.lock().await;
        let AlertState {
            records,
            in_flight,
        } = &mut *state;
        let items = items
            .into_iter()
            .map(|record| {
                if in_flight.contains(&record.id) {
                    if let Some(local) = records.get(&record.id) {
                        return local.clone();
                    }
                }
                records.insert(record.id.clone(), record.clone());
                record
            })
            .collect();
        Ok(AlertPage {
            items,
            total,
            page,
            page_size,
        })
    }

    pub async fn get(&self, alert_id: &str) -> Result<AlertRecord, AlertError> {
        if let Some(record) = self.inner.state.lock().await.records.get(alert_id) {
            return Ok(record.clone());
        }
        let record = self
            .inner
            .store
            .find_alert(alert_id)
            .await
            .map_err(|err| AlertError::Storage(err.to_string()))?
            .ok_or_else(|| AlertError::NotFound(alert_id.to_string()))?;
        let mut state = self.inner.state.lock().await;
        Ok(state
            .records
            .entry(alert_id.to_string())
            .or_insert(record)
            .clone())
    }

    pub async fn is_in_flight(&self, alert_id: &str) -> bool {
        self.inner.state.lock().await.in_flight.contains(alert_id)
    }

    /// 用户发起的状态流转。
    pub async fn transition(
        &self,
        alert_id: &str,
        request: TransitionRequest,
        now_ms: i64,
    ) -> Result<AlertRecord, AlertError> {
        let default_recheck = self.inner.config.default_recheck_on_trigger;
        let committed = self
            .commit(alert_id, |current| {
                plan_transition(current, &request, now_ms, default_recheck).map(Some)
            })
            .await?;
        committed.ok_or_else(|| AlertError::NotFound(alert_id.to_string()))
    }

    /// 挂起到期后的复核；仍保持挂起时返回 `Ok(None)`。
    pub async fn apply_recheck(
        &self,
        alert_id: &str,
        now_ms: i64,
        condition_still_holds: Option<bool>,
    ) -> Result<Option<AlertRecord>, AlertError> {
        let mut outcome = SuspensionOutcome::StillSuspended;
        let committed = self
            .commit(alert_id, |current| {
                outcome = evaluate_suspension(current, now_ms, condition_still_holds)?;
                Ok(plan_recheck(current, outcome, now_ms))
            })
            .await?;
        if committed.is_some() {
            match outcome {
                SuspensionOutcome::Reactivate => record_recheck_reactivated(),
                SuspensionOutcome::AutoClear => record_recheck_auto_cleared(),
                SuspensionOutcome::StillSuspended => {}
            }
        }
        Ok(committed)
    }

    /// 本地缓存中已到重新触发时间的挂起告警。
    pub async fn due_for_recheck(&self, now_ms: i64) -> Vec<AlertRecord> {
        let state = self.inner.state.lock().await;
        let mut due: Vec<AlertRecord> = state
            .records
            .values()
            .filter(|record| record.status == AlertStatus::Suspended)
            .filter(|record| {
                record
                    .next_trigger_time
                    .is_some_and(|next_trigger_time| next_trigger_time <= now_ms)
            })
            .cloned()
            .collect();
        due.sort_by(|a, b| a.next_trigger_time.cmp(&b.next_trigger_time));
        due
    }

    async fn commit<F>(&self, alert_id: &str, plan: F) -> Result<Option<AlertRecord>, AlertError>
    where
        F: FnOnce(&AlertRecord) -> Result<Option<PlannedTransition>, AlertError>,
    {
        self.get(alert_id).await?;

        let (previous, planned) = {
            let mut state = self.inner.state.lock().await;
            if state.in_flight.contains(alert_id) {
                record_transition_rejected();
                warn!(target: "envwatch.alerts", alert_id = %alert_id, "alert_transition_in_flight");
                return Err(AlertError::InFlight(alert_id.to_string()));
            }
            let current = state
                .records
                .get(alert_id)
                .cloned()
                .ok_or_else(|| AlertError::NotFound(alert_id.to_string()))?;
            let planned = match plan(&current) {
                Ok(Some(planned)) => planned,
                Ok(None) => return Ok(None),
                Err(err) => {
                    record_transition_rejected();
                    warn!(
                        target: "envwatch.alerts",
                        alert_id = %alert_id,
                        status = %current.status,
                        error = %err,
                        "alert_transition_rejected"
                    );
                    return Err(err);
                }
            };
            state
                .records
                .insert(alert_id.to_string(), planned.record.clone());
            state.in_flight.insert(alert_id.to_string());
            (current, planned)
        };

        // 提交一旦发出即不可取消：放到独立任务中完成，调用方丢弃 future 也会清理 in-flight。
        let task = tokio::spawn(finish_commit(
            self.inner.clone(),
            alert_id.to_string(),
            previous,
            planned,
        ));
        match task.await {
            Ok(result) => result.map(Some),
            Err(err) => Err(AlertError::Storage(err.to_string())),
        }
    }
}

async fn finish_commit(
    inner: Arc<AlertServiceInner>,
    alert_id: String,
    previous: AlertRecord,
    planned: PlannedTransition,
) -> Result<AlertRecord, AlertError> {
    let result = inner.store.update_alert(&alert_id, &planned.update).await;

    let mut state = inner.state.lock().await;
    state.in_flight.remove(&alert_id);
    let err = match result {
        Ok(Some(_)) => {
            record_transition_committed();
            info!(
                target: "envwatch.alerts",
                alert_id = %alert_id,
                from = %previous.status,
                to = %planned.record.status,
                "alert_transition_committed"
            );
            return Ok(planned.record);
        }
        Ok(None) => AlertError::NotFound(alert_id.clone()),
        Err(err) => AlertError::Storage(err.to_string()),
    };
    record_transition_rolled_back();
    warn!(
        target: "envwatch.alerts",
        alert_id = %alert_id,
        from = %previous.status,
        to = %planned.record.status,
        error = %err,
        "alert_transition_rolled_back"
    );
    state.records.insert(alert_id, previous);
    Err(err)
}

/// 当前 epoch 毫秒。
pub fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
