//! 二值/计数型事件键。

use serde::{Deserialize, Serialize};

/// 事件类（非连续指标）键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKey {
    Panic,
    Gunshot,
    Help,
    Aggression,
    Tamper,
    Masking,
    Vape,
    Smoking,
    Thc,
    Motion,
}

impl EventKey {
    pub const ALL: [EventKey; 10] = [
        EventKey::Panic,
        EventKey::Gunshot,
        EventKey::Help,
        EventKey::Aggression,
        EventKey::Tamper,
        EventKey::Masking,
        EventKey::Vape,
        EventKey::Smoking,
        EventKey::Thc,
        EventKey::Motion,
    ];

    /// 聚合读数使用的键前缀。
    pub const fn aggregation_key(self) -> &'static str {
        match self {
            EventKey::Panic => "panic",
            EventKey::Gunshot => "gunshot",
            EventKey::Help => "help",
            EventKey::Aggression => "aggression",
            EventKey::Tamper => "tamper",
            EventKey::Masking => "masking",
            EventKey::Vape => "vape",
            EventKey::Smoking => "smoking",
            EventKey::Thc => "thc",
            EventKey::Motion => "motion",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EventKey::Panic => "Panic Button",
            EventKey::Gunshot => "Gunshot",
            EventKey::Help => "Help Keyword",
            EventKey::Aggression => "Aggression",
            EventKey::Tamper => "Tamper",
            EventKey::Masking => "Masking",
            EventKey::Vape => "Vape",
            EventKey::Smoking => "Smoking",
            EventKey::Thc => "THC",
            EventKey::Motion => "Motion",
        }
    }

    pub fn parse(value: &str) -> Option<EventKey> {
        let value = value.trim();
        EventKey::ALL
            .into_iter()
            .find(|key| key.aggregation_key() == value)
    }
}
