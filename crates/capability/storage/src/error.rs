//! 存储层错误类型
//!
//! 外部协作方（REST 后端、内存实现）的失败统一封装为消息，
//! 由能力层映射为各自的错误枚举。可附带出错的操作与对象（如 `update_alert alert-1`），
//! 便于在告警服务的回滚日志中定位。

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    message: String,
    context: Option<String>,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
        }
    }

    /// 附加操作上下文；重复调用时外层上下文在前。
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = Some(match self.context.take() {
            Some(inner) => format!("{context}: {inner}"),
            None => context,
        });
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// 锁中毒（内存实现）。
    pub(crate) fn lock(operation: &str) -> Self {
        Self::new("lock failed").with_context(operation)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{context}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string()).with_context("decode payload")
    }
}
