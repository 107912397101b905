//! 空间层级能力：后代集合查询与阈值继承解析。

mod resolver;
mod tree;

pub use resolver::{EffectiveConfig, ThresholdResolver};
pub use tree::SpaceTree;

use domain::SpaceId;

/// 空间层级错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("unknown space: {0}")]
    UnknownSpace(SpaceId),
    #[error("duplicate space: {0}")]
    DuplicateSpace(SpaceId),
    #[error("malformed hierarchy: space {space_id} revisited")]
    MalformedHierarchy { space_id: SpaceId },
}
