//! 内存存储实现模块
//!
//! 用于测试、演示与离线回放。
//!
//! 包含以下实现：
//! - SpaceStore: InMemorySpaceStore
//! - AlertStore: InMemoryAlertStore

pub mod alert;
pub mod space;

pub use alert::*;
pub use space::*;
