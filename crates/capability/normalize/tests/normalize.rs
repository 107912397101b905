use domain::{AggregatedReadings, MetricKey, ThresholdConfig, ThresholdEntry};
use envwatch_classify::{StatusClass, StatusColor};
use envwatch_normalize::{INHG_TO_HPA, MetricNormalizer};

fn config(entries: &[(&str, f64, f64)]) -> ThresholdConfig {
    entries
        .iter()
        .map(|(key, min, max)| (key.to_string(), ThresholdEntry::new(*min, *max)))
        .collect()
}

#[test]
fn co2_over_threshold_is_critical_but_not_mismatched() {
    let readings = AggregatedReadings::new().with_range("co2", Some(410.0), Some(1340.0));
    let thresholds = config(&[("CO2cal", 0.0, 1000.0)]);

    let metrics = MetricNormalizer::default().process(&readings, &thresholds, None);
    assert_eq!(metrics.len(), 1);
    let co2 = &metrics[0];
    assert_eq!(co2.key, MetricKey::Co2);
    assert!((co2.raw_normalized - 134.0).abs() < 1e-9);
    assert_eq!(co2.normalized_value, 100.0);
    assert!(co2.has_threshold);
    assert!(!co2.is_scale_mismatch);
    assert_eq!(co2.status_color, StatusColor::Red);
    assert_eq!(co2.status_class, StatusClass::Danger);
    assert_eq!(co2.raw_min, 410.0);
    assert_eq!(co2.unit, "ppm");
}

#[test]
fn pressure_in_inches_of_mercury_is_auto_converted() {
    let readings = AggregatedReadings::new().with_range("pressure", Some(1005.0), Some(1013.0));
    let thresholds = config(&[("Pressure", 29.0, 31.0)]);

    let metrics = MetricNormalizer::default().process(&readings, &thresholds, None);
    let pressure = &metrics[0];
    assert!(pressure.is_auto_converted);
    assert!(!pressure.is_scale_mismatch);
    assert!((pressure.threshold_min - 29.0 * INHG_TO_HPA).abs() < 1e-9);
    assert!((pressure.threshold_max - 31.0 * INHG_TO_HPA).abs() < 1e-9);
    assert!((pressure.threshold_min - 982.0).abs() < 1.0);
    assert!((pressure.threshold_max - 1050.0).abs() < 1.0);

    // Recomputed from the converted bounds, not the inHg ones.
    let expected = (1013.0 - pressure.threshold_min) / (pressure.threshold_max - pressure.threshold_min) * 100.0;
    assert!((pressure.raw_normalized - expected).abs() < 1e-9);
    assert!(pressure.raw_normalized > 30.0 && pressure.raw_normalized < 60.0);
    assert_eq!(pressure.status_class, StatusClass::Success);
}

#[test]
fn pressure_already_in_hpa_is_left_alone() {
    let readings = AggregatedReadings::new().with_range("pressure", Some(1005.0), Some(1013.0));
    let thresholds = config(&[("Pressure", 950.0, 1050.0)]);
    let pressure = &MetricNormalizer::default().process(&readings, &thresholds, None)[0];
    assert!(!pressure.is_auto_converted);
    assert!((pressure.raw_normalized - 63.0).abs() < 1e-9);
}

#[test]
fn wildly_out_of_scale_threshold_is_flagged_as_mismatch() {
    let readings = AggregatedReadings::new()
        .with_range("tvoc", Some(100.0), Some(900.0))
        .with_range("noise", Some(30.0), Some(-500.0));
    let thresholds = config(&[("TVOC", 0.0, 1.0), ("Noise", 0.0, 100.0)]);

    let metrics = MetricNormalizer::default().process(&readings, &thresholds, None);
    let tvoc = metrics.iter().find(|metric| metric.key == MetricKey::Tvoc).expect("tvoc");
    assert!(tvoc.is_scale_mismatch);
    assert_eq!(tvoc.status_color, StatusColor::Gray);
    assert_eq!(tvoc.normalized_value, 100.0);
    assert!(tvoc.raw_normalized > 400.0);

    let noise = metrics.iter().find(|metric| metric.key == MetricKey::Noise).expect("noise");
    assert!(noise.raw_normalized < -200.0);
    assert!(noise.is_scale_mismatch);
    assert_eq!(noise.normalized_value, 0.0);
}

#[test]
fn mismatch_band_edges_are_exclusive() {
    // raw_normalized exactly 400 and exactly -200 are not mismatches.
    let readings = AggregatedReadings::new()
        .with_range("pm10", Some(1.0), Some(400.0))
        .with_range("pm25", Some(1.0), Some(-200.0));
    let thresholds = config(&[("PM10", 0.0, 100.0), ("PM2.5", 0.0, 100.0)]);
    let metrics = MetricNormalizer::default().process(&readings, &thresholds, None);
    assert!(metrics.iter().all(|metric| !metric.is_scale_mismatch));
}

#[test]
fn no_threshold_never_reports_mismatch() {
    let readings = AggregatedReadings::new().with_range("light", Some(1.0), Some(90_000.0));
    let metric = &MetricNormalizer::default().process(&readings, &ThresholdConfig::new(), None)[0];
    assert!(!metric.has_threshold);
    assert!(!metric.is_scale_mismatch);
    assert_eq!(metric.threshold_max, 180_000.0);
    assert_eq!(metric.raw_normalized, 50.0);
    assert_eq!(metric.status_class, StatusClass::Success);
}

#[test]
fn linear_formula_and_clamp_hold_across_values() {
    let thresholds = config(&[("Noise", 20.0, 120.0)]);
    for raw_max in [-50.0, 0.0, 20.0, 55.5, 89.0, 120.0, 300.0] {
        let readings = AggregatedReadings::new().with_range("noise", Some(1.0), Some(raw_max));
        let metric = &MetricNormalizer::default().process(&readings, &thresholds, None)[0];
        let expected = (raw_max - 20.0) / (120.0 - 20.0) * 100.0;
        assert!((metric.raw_normalized - expected).abs() < 1e-9);
        assert_eq!(metric.normalized_value, expected.clamp(0.0, 100.0));
    }
}

#[test]
fn invalid_readings_are_silently_excluded() {
    let readings = AggregatedReadings::new()
        .with_range("co2", Some(0.0), Some(0.0))
        .with_range("humidity", None, Some(40.0))
        .with_range("temp_c", Some(19.5), Some(23.0));
    let metrics = MetricNormalizer::default().process(&readings, &ThresholdConfig::new(), None);
    let keys: Vec<MetricKey> = metrics.iter().map(|metric| metric.key).collect();
    assert_eq!(keys, vec![MetricKey::Temperature]);
}

#[test]
fn output_follows_requested_key_order() {
    let readings = AggregatedReadings::new()
        .with_range("co2", Some(400.0), Some(600.0))
        .with_range("noise", Some(30.0), Some(50.0))
        .with_range("temp_c", Some(19.0), Some(22.0));
    let normalizer = MetricNormalizer::default();

    let all = normalizer.process(&readings, &ThresholdConfig::new(), None);
    let default_order: Vec<MetricKey> = all.iter().map(|metric| metric.key).collect();
    assert_eq!(
        default_order,
        vec![MetricKey::Temperature, MetricKey::Co2, MetricKey::Noise]
    );

    let subset = normalizer.process(
        &readings,
        &ThresholdConfig::new(),
        Some(&[MetricKey::Noise, MetricKey::Temperature][..]),
    );
    let subset_order: Vec<MetricKey> = subset.iter().map(|metric| metric.key).collect();
    assert_eq!(subset_order, vec![MetricKey::Noise, MetricKey::Temperature]);
}

#[test]
fn named_subset_skips_event_and_unknown_keys() {
    let mut readings = AggregatedReadings::new().with_range("co2", Some(400.0), Some(600.0));
    readings.insert("panic_min", Some(0.0));
    readings.insert("panic_max", Some(1.0));
    let metrics = MetricNormalizer::default().process_named(
        &readings,
        &ThresholdConfig::new(),
        &["panic", "co2", "bogus"],
    );
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].key, MetricKey::Co2);
}

#[test]
fn processed_metric_serializes_camel_case() {
    let readings = AggregatedReadings::new().with_range("co2", Some(410.0), Some(1340.0));
    let thresholds = config(&[("CO2cal", 0.0, 1000.0)]);
    let metric = &MetricNormalizer::default().process(&readings, &thresholds, None)[0];
    let value = serde_json::to_value(metric).expect("json");
    assert_eq!(value["key"], "co2");
    assert_eq!(value["statusColor"], "red");
    assert_eq!(value["statusClass"], "danger");
    assert_eq!(value["isScaleMismatch"], false);
    assert!(value.get("rawNormalized").is_some());
}
