use domain::{AggregatedReadings, AlertRecord, AlertStatus, EventKey, MetricKey, SpaceId};
use envwatch::{BootstrapError, Envwatch};
use envwatch_alerts::TransitionRequest;
use envwatch_classify::{StatusClass, StatusColor};
use envwatch_config::AppConfig;
use envwatch_hierarchy::HierarchyError;
use envwatch_normalize::StaticReadingsProvider;
use envwatch_storage::{InMemoryAlertStore, InMemorySpaceStore};
use std::sync::Arc;

const NOW: i64 = 1_700_000_000_000;

const SPACES: &str = r#"[
  {"id": "hq", "parentId": null, "childIds": ["floor-1"],
   "thresholdConfig": {
     "CO2cal": {"min": 0, "max": 1000},
     "Pressure": {"min": 29.5, "max": 30.5},
     "Temp C": {"min": 18, "max": 26}
   }},
  {"id": "floor-1", "parentId": "hq", "childIds": ["room-a", "room-b"], "thresholdConfig": null},
  {"id": "room-a", "parentId": "floor-1", "childIds": [],
   "thresholdConfig": {"Temp C": {"min": 20, "max": 24}}},
  {"id": "room-b", "parentId": "floor-1", "childIds": []}
]"#;

fn provider() -> Arc<StaticReadingsProvider> {
    let mut room_a = AggregatedReadings::new()
        .with_range("temp_c", Some(21.0), Some(25.0))
        .with_range("co2", Some(400.0), Some(600.0));
    room_a.insert("vape_max", Some(1.0));
    let room_b = AggregatedReadings::new()
        .with_range("co2", Some(450.0), Some(1200.0))
        .with_range("pressure", Some(1010.0), Some(1015.0));
    Arc::new(
        StaticReadingsProvider::new()
            .with_space("room-a", room_a)
            .with_space("room-b", room_b),
    )
}

async fn bootstrap(config: AppConfig, alerts: Vec<AlertRecord>) -> Envwatch {
    Envwatch::bootstrap(
        config,
        Arc::new(InMemorySpaceStore::from_json(SPACES).expect("spaces")),
        Arc::new(InMemoryAlertStore::with_alerts(alerts)),
        provider(),
    )
    .await
    .expect("bootstrap")
}

#[tokio::test]
async fn floor_inherits_building_thresholds_and_aggregates_rooms() {
    let app = bootstrap(AppConfig::default(), Vec::new()).await;
    assert_eq!(app.tree().len(), 4);

    let snapshot = app.evaluate(&SpaceId::from("floor-1")).await.expect("snapshot");
    assert_eq!(snapshot.threshold_origin, Some(SpaceId::from("hq")));

    let co2 = snapshot
        .metrics
        .iter()
        .find(|metric| metric.key == MetricKey::Co2)
        .expect("co2");
    assert_eq!(co2.status_color, StatusColor::Red);
    assert_eq!(co2.normalized_value, 100.0);

    let pressure = snapshot
        .metrics
        .iter()
        .find(|metric| metric.key == MetricKey::Pressure)
        .expect("pressure");
    assert!(pressure.is_auto_converted);
    assert!(!pressure.is_scale_mismatch);

    assert_eq!(snapshot.worst_class(), Some(StatusClass::Danger));
    assert_eq!(snapshot.triggered_events().collect::<Vec<_>>(), vec![EventKey::Vape]);
}

#[tokio::test]
async fn room_with_own_config_ignores_ancestor() {
    let app = bootstrap(AppConfig::default(), Vec::new()).await;
    let snapshot = app.evaluate(&SpaceId::from("room-a")).await.expect("snapshot");
    assert_eq!(snapshot.threshold_origin, Some(SpaceId::from("room-a")));
    // 自有配置只有温度，co2 按缺省区间处理
    let co2 = snapshot
        .metrics
        .iter()
        .find(|metric| metric.key == MetricKey::Co2)
        .expect("co2");
    assert!(!co2.has_threshold);
}

#[tokio::test]
async fn pressure_stays_mismatched_when_auto_convert_is_off() {
    let config = AppConfig {
        pressure_auto_convert: false,
        ..AppConfig::default()
    };
    let app = bootstrap(config, Vec::new()).await;
    let snapshot = app.evaluate(&SpaceId::from("room-b")).await.expect("snapshot");
    let pressure = snapshot
        .metrics
        .iter()
        .find(|metric| metric.key == MetricKey::Pressure)
        .expect("pressure");
    assert!(!pressure.is_auto_converted);
    assert!(pressure.is_scale_mismatch);
    assert_eq!(pressure.status_color, StatusColor::Gray);
}

#[tokio::test]
async fn unknown_space_is_reported() {
    let app = bootstrap(AppConfig::default(), Vec::new()).await;
    let err = app
        .evaluate(&SpaceId::from("nowhere"))
        .await
        .expect_err("unknown");
    assert!(matches!(
        err,
        BootstrapError::Normalize(envwatch_normalize::NormalizeError::Hierarchy(
            HierarchyError::UnknownSpace(_)
        ))
    ));
}

#[tokio::test]
async fn duplicate_spaces_fail_bootstrap() {
    let payload = r#"[{"id": "a"}, {"id": "a"}]"#;
    let result = Envwatch::bootstrap(
        AppConfig::default(),
        Arc::new(InMemorySpaceStore::from_json(payload).expect("spaces")),
        Arc::new(InMemoryAlertStore::new()),
        provider(),
    )
    .await;
    assert!(matches!(
        result,
        Err(BootstrapError::Hierarchy(HierarchyError::DuplicateSpace(_)))
    ));
}

#[tokio::test]
async fn suspend_with_default_recheck_then_sweep() {
    let config = AppConfig {
        default_recheck_on_trigger: true,
        ..AppConfig::default()
    };
    let app = bootstrap(
        config,
        vec![AlertRecord::new("co2-high"), AlertRecord::new("noise-high")],
    )
    .await;
    for id in ["co2-high", "noise-high"] {
        let request = TransitionRequest {
            recheck_on_trigger: None,
            ..TransitionRequest::suspend("maintenance", Some(NOW), false)
        };
        let record = app
            .alerts()
            .transition(id, request, NOW - 1_000)
            .await
            .expect("suspended");
        assert!(record.recheck_on_trigger);
    }

    let changed = app
        .recheck_due(NOW, |record| Some(record.id == "co2-high"))
        .await;
    let mut outcomes: Vec<(String, AlertStatus)> = changed
        .into_iter()
        .map(|record| (record.id, record.status))
        .collect();
    outcomes.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        outcomes,
        vec![
            ("co2-high".to_string(), AlertStatus::Active),
            ("noise-high".to_string(), AlertStatus::Resolved),
        ]
    );
    assert!(app.alerts().due_for_recheck(NOW).await.is_empty());
}

#[test]
fn init_loads_config_and_installs_tracing() {
    let config = envwatch::init().expect("config");
    assert!(config.alert_page_size >= 1);
    // 重复初始化不报错
    envwatch::init().expect("config");
}
