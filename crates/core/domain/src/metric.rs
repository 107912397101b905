//! 连续型指标的封闭枚举与映射表。
//!
//! 每个指标都有四个固定属性：
//! - 展示/配置键：阈值配置（`thresholdConfig`）使用的键，例如 `CO2cal`
//! - 聚合键：聚合读数 `{key}_min` / `{key}_max` 的前缀
//! - 物理单位
//! - 人类可读标签
//!
//! 映射表是穷举 `match`，新增变体而不补映射会在编译期报错。

use serde::{Deserialize, Serialize};

/// 连续型指标键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Temperature,
    Humidity,
    Co2,
    Tvoc,
    Pm1,
    Pm25,
    Pm10,
    Noise,
    Light,
    Nh3,
    No2,
    Co,
    Pressure,
    Aqi,
    HealthIndex,
}

/// 单个指标的映射信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub key: &'static str,
    pub display_key: &'static str,
    pub aggregation_key: &'static str,
    pub unit: &'static str,
    pub label: &'static str,
}

impl MetricKey {
    /// 映射表的既定顺序（未指定子集时按此顺序输出）。
    pub const ALL: [MetricKey; 15] = [
        MetricKey::Temperature,
        MetricKey::Humidity,
        MetricKey::Co2,
        MetricKey::Tvoc,
        MetricKey::Pm1,
        MetricKey::Pm25,
        MetricKey::Pm10,
        MetricKey::Noise,
        MetricKey::Light,
        MetricKey::Nh3,
        MetricKey::No2,
        MetricKey::Co,
        MetricKey::Pressure,
        MetricKey::Aqi,
        MetricKey::HealthIndex,
    ];

    pub const fn spec(self) -> MetricSpec {
        match self {
            MetricKey::Temperature => MetricSpec {
                key: "temperature",
                display_key: "Temp C",
                aggregation_key: "temp_c",
                unit: "°C",
                label: "Temperature",
            },
            MetricKey::Humidity => MetricSpec {
                key: "humidity",
                display_key: "Humidity",
                aggregation_key: "humidity",
                unit: "%RH",
                label: "Humidity",
            },
            MetricKey::Co2 => MetricSpec {
                key: "co2",
                display_key: "CO2cal",
                aggregation_key: "co2",
                unit: "ppm",
                label: "CO₂",
            },
            MetricKey::Tvoc => MetricSpec {
                key: "tvoc",
                display_key: "TVOC",
                aggregation_key: "tvoc",
                unit: "ppb",
                label: "TVOC",
            },
            MetricKey::Pm1 => MetricSpec {
                key: "pm1",
                display_key: "PM1",
                aggregation_key: "pm1",
                unit: "µg/m³",
                label: "PM1",
            },
            MetricKey::Pm25 => MetricSpec {
                key: "pm25",
                display_key: "PM2.5",
                aggregation_key: "pm25",
                unit: "µg/m³",
                label: "PM2.5",
            },
            MetricKey::Pm10 => MetricSpec {
                key: "pm10",
                display_key: "PM10",
                aggregation_key: "pm10",
                unit: "µg/m³",
                label: "PM10",
            },
            MetricKey::Noise => MetricSpec {
                key: "noise",
                display_key: "Noise",
                aggregation_key: "noise",
                unit: "dB",
                label: "Noise",
            },
            MetricKey::Light => MetricSpec {
                key: "light",
                display_key: "Light",
                aggregation_key: "light",
                unit: "lux",
                label: "Light",
            },
            MetricKey::Nh3 => MetricSpec {
                key: "nh3",
                display_key: "NH3",
                aggregation_key: "nh3",
                unit: "ppm",
                label: "Ammonia",
            },
            MetricKey::No2 => MetricSpec {
                key: "no2",
                display_key: "NO2",
                aggregation_key: "no2",
                unit: "ppb",
                label: "Nitrogen Dioxide",
            },
            MetricKey::Co => MetricSpec {
                key: "co",
                display_key: "CO",
                aggregation_key: "co",
                unit: "ppm",
                label: "Carbon Monoxide",
            },
            MetricKey::Pressure => MetricSpec {
                key: "pressure",
                display_key: "Pressure",
                aggregation_key: "pressure",
                unit: "hPa",
                label: "Pressure",
            },
            MetricKey::Aqi => MetricSpec {
                key: "aqi",
                display_key: "AQI",
                aggregation_key: "aqi",
                unit: "",
                label: "Air Quality Index",
            },
            MetricKey::HealthIndex => MetricSpec {
                key: "health_index",
                display_key: "Health Index",
                aggregation_key: "health_index",
                unit: "",
                label: "Health Index",
            },
        }
    }

    /// 按指标键或聚合键解析；事件键和未知键返回 `None`。
    pub fn parse(value: &str) -> Option<MetricKey> {
        let value = value.trim();
        MetricKey::ALL.into_iter().find(|key| {
            let spec = key.spec();
            spec.key == value || spec.aggregation_key == value
        })
    }

    pub fn display_key(self) -> &'static str {
        self.spec().display_key
    }

    pub fn aggregation_key(self) -> &'static str {
        self.spec().aggregation_key
    }
}
