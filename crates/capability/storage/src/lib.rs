//! # Envwatch Storage 模块
//!
//! 核心逻辑与外部持久化/传输协作方之间的接口层。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：空间批量拉取、告警分页拉取与 PATCH 更新
//! 2. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 3. **实现层** (`in_memory/`)：内存实现，用于测试、演示与离线回放
//!
//! 真实的 REST 客户端不在本 workspace 内，由部署方实现 [`SpaceStore`] / [`AlertStore`]
//! 后注入。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use envwatch_storage::{AlertStore, InMemoryAlertStore};
//! use domain::AlertRecord;
//!
//! let store = InMemoryAlertStore::with_alerts(vec![AlertRecord::new("alert-1")]);
//! let page = store.list_alerts(1, 20).await?;
//! assert_eq!(page.total, 1);
//! ```

pub mod error;
pub mod in_memory;
pub mod traits;

pub use error::*;
pub use traits::*;

pub use in_memory::{InMemoryAlertStore, InMemorySpaceStore};
