//! 空间内存存储实现

use crate::error::StorageError;
use crate::traits::SpaceStore;
use api_contract::SpaceDto;
use domain::Space;
use std::sync::RwLock;

/// 空间内存存储
pub struct InMemorySpaceStore {
    spaces: RwLock<Vec<Space>>,
}

impl InMemorySpaceStore {
    pub fn new(spaces: Vec<Space>) -> Self {
        Self {
            spaces: RwLock::new(spaces),
        }
    }

    /// 从批量拉取接口的 JSON 数组（`SpaceDto`）构造。
    pub fn from_json(payload: &str) -> Result<Self, StorageError> {
        let dtos: Vec<SpaceDto> = serde_json::from_str(payload)?;
        Ok(Self::new(dtos.into_iter().map(Space::from).collect()))
    }
}

#[async_trait::async_trait]
impl SpaceStore for InMemorySpaceStore {
    async fn list_spaces(&self) -> Result<Vec<Space>, StorageError> {
        let spaces = self
            .spaces
            .read()
            .map_err(|_| StorageError::lock("list_spaces"))?;
        Ok(spaces.clone())
    }
}
