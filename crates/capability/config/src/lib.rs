//! 运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 运行配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// tracing 过滤表达式（`RUST_LOG` 优先）
    pub log_filter: String,
    /// 告警列表每页条数
    pub alert_page_size: u32,
    /// 气压阈值为 inHg、读数为 hPa 时是否自动换算
    pub pressure_auto_convert: bool,
    /// 挂起请求未指定时的 recheck 默认值
    pub default_recheck_on_trigger: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            alert_page_size: 20,
            pressure_auto_convert: true,
            default_recheck_on_trigger: false,
        }
    }
}

impl AppConfig {
    /// 从环境变量读取配置，未设置的项使用默认值。
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let log_filter = read_optional("ENVWATCH_LOG").unwrap_or(defaults.log_filter);
        let alert_page_size =
            read_u32_with_default("ENVWATCH_ALERT_PAGE_SIZE", defaults.alert_page_size)?;
        if alert_page_size == 0 {
            return Err(ConfigError::Invalid(
                "ENVWATCH_ALERT_PAGE_SIZE".to_string(),
                alert_page_size.to_string(),
            ));
        }
        let pressure_auto_convert = read_bool_with_default(
            "ENVWATCH_PRESSURE_AUTO_CONVERT",
            defaults.pressure_auto_convert,
        )?;
        let default_recheck_on_trigger = read_bool_with_default(
            "ENVWATCH_RECHECK_DEFAULT",
            defaults.default_recheck_on_trigger,
        )?;

        Ok(Self {
            log_filter,
            alert_page_size,
            pressure_auto_convert,
            default_recheck_on_trigger,
        })
    }
}

/// 加载本地 .env（如存在）。
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(default),
    };
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> Result<bool, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(default),
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}
