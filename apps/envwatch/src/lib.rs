//! 装配入口：配置 → 存储 → 空间树 → 评估/告警服务。
//!
//! HTTP 层与定时任务由部署方实现，这里只负责把各能力模块接起来。

use domain::{AlertRecord, SpaceId};
use envwatch_alerts::{AlertError, AlertService, AlertServiceConfig};
use envwatch_config::{AppConfig, ConfigError, load_dotenv};
use envwatch_hierarchy::{HierarchyError, SpaceTree};
use envwatch_normalize::{
    MetricNormalizer, NormalizeError, NormalizerOptions, ReadingsProvider, SpaceEvaluator,
    SpaceSnapshot,
};
use envwatch_storage::{AlertStore, SpaceStore};
use envwatch_telemetry::init_tracing;
use std::sync::Arc;
use tracing::{info, warn};

/// 装配错误。
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}

/// 加载 .env 与环境变量配置，并初始化日志。
pub fn init() -> Result<AppConfig, BootstrapError> {
    load_dotenv();
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_filter);
    Ok(config)
}

#[derive(Clone)]
pub struct Envwatch {
    config: AppConfig,
    tree: Arc<SpaceTree>,
    evaluator: SpaceEvaluator,
    alerts: AlertService,
}

impl Envwatch {
    /// 拉取全部空间、建树，并构造评估与告警服务。
    pub async fn bootstrap(
        config: AppConfig,
        space_store: Arc<dyn SpaceStore>,
        alert_store: Arc<dyn AlertStore>,
        provider: Arc<dyn ReadingsProvider>,
    ) -> Result<Self, BootstrapError> {
        let spaces = space_store
            .list_spaces()
            .await
            .map_err(|err| BootstrapError::Storage(err.to_string()))?;
        let tree = Arc::new(SpaceTree::from_spaces(spaces)?);

        let normalizer = MetricNormalizer::new(NormalizerOptions {
            pressure_auto_convert: config.pressure_auto_convert,
        });
        let evaluator = SpaceEvaluator::new(tree.clone(), provider, normalizer);
        let alerts = AlertService::with_config(
            alert_store,
            AlertServiceConfig {
                page_size: config.alert_page_size,
                default_recheck_on_trigger: config.default_recheck_on_trigger,
            },
        );

        info!(
            target: "envwatch.bootstrap",
            spaces = tree.len(),
            roots = tree.roots().count(),
            page_size = config.alert_page_size,
            pressure_auto_convert = config.pressure_auto_convert,
            "envwatch_bootstrapped"
        );
        Ok(Self {
            config,
            tree,
            evaluator,
            alerts,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn tree(&self) -> &SpaceTree {
        &self.tree
    }

    pub fn evaluator(&self) -> &SpaceEvaluator {
        &self.evaluator
    }

    pub fn alerts(&self) -> &AlertService {
        &self.alerts
    }

    pub async fn evaluate(&self, space_id: &SpaceId) -> Result<SpaceSnapshot, BootstrapError> {
        Ok(self.evaluator.evaluate(space_id).await?)
    }

    /// 对已到期的挂起告警逐个复核，返回状态发生变化的记录。
    ///
    /// `condition` 给出实时值是否仍越过阈值；单个告警失败只记录日志，不中断本轮。
    pub async fn recheck_due<F>(&self, now_ms: i64, condition: F) -> Vec<AlertRecord>
    where
        F: Fn(&AlertRecord) -> Option<bool>,
    {
        let mut changed = Vec::new();
        for record in self.alerts.due_for_recheck(now_ms).await {
            match self
                .alerts
                .apply_recheck(&record.id, now_ms, condition(&record))
                .await
            {
                Ok(Some(updated)) => changed.push(updated),
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        target: "envwatch.bootstrap",
                        alert_id = %record.id,
                        error = %err,
                        "alert_recheck_failed"
                    );
                }
            }
        }
        changed
    }
}
