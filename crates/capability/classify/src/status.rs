use serde::Serialize;

/// 进入 warning 区间的下边界（含）。
pub const WARNING_AT: f64 = 70.0;
/// 进入 critical 区间的下边界（含）。
pub const CRITICAL_AT: f64 = 90.0;

/// 展示色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Amber,
    Red,
    Gray,
}

/// 严重度类别（与前端 class 名一致）。
///
/// 声明顺序即严重程度：`Success < Warning < Danger`；`Secondary` 表示“需要配置”，
/// 排在最前。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Secondary,
    Success,
    Warning,
    Danger,
}

impl StatusClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusClass::Secondary => "secondary",
            StatusClass::Success => "success",
            StatusClass::Warning => "warning",
            StatusClass::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub color: StatusColor,
    pub class: StatusClass,
}

/// 将未截断的标准化值映射为严重度。
pub fn classify(raw_normalized: f64, is_mismatch: bool) -> Verdict {
    let (color, class) = if is_mismatch {
        (StatusColor::Gray, StatusClass::Secondary)
    } else if raw_normalized >= CRITICAL_AT {
        (StatusColor::Red, StatusClass::Danger)
    } else if raw_normalized >= WARNING_AT {
        (StatusColor::Amber, StatusClass::Warning)
    } else {
        (StatusColor::Green, StatusClass::Success)
    };
    Verdict { color, class }
}
