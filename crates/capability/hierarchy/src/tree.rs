use crate::HierarchyError;
use domain::{Space, SpaceId};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::warn;

/// 内存中的空间层级（arena + 索引）。
///
/// 子节点边来自 `child_ids`，父节点边来自 `parent_id`；两者由外部批量提供，
/// 不保证一致或无环，所有遍历都带访问集合。
#[derive(Debug, Clone, Default)]
pub struct SpaceTree {
    nodes: Vec<Space>,
    index: HashMap<SpaceId, usize>,
}

impl SpaceTree {
    pub fn from_spaces<I>(spaces: I) -> Result<Self, HierarchyError>
    where
        I: IntoIterator<Item = Space>,
    {
        let mut tree = SpaceTree::default();
        for space in spaces {
            if tree.index.contains_key(&space.id) {
                return Err(HierarchyError::DuplicateSpace(space.id));
            }
            tree.index.insert(space.id.clone(), tree.nodes.len());
            tree.nodes.push(space);
        }
        Ok(tree)
    }

    pub fn get(&self, id: &SpaceId) -> Option<&Space> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    pub fn contains(&self, id: &SpaceId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Space> {
        self.nodes.iter().filter(|space| space.is_root())
    }

    pub(crate) fn require(&self, id: &SpaceId) -> Result<&Space, HierarchyError> {
        self.get(id)
            .ok_or_else(|| HierarchyError::UnknownSpace(id.clone()))
    }

    /// `{id}` 加上经由 `child_ids` 可达的全部后代。
    ///
    /// 引用了未知子节点时，该子节点 ID 仍计入结果但不再下探；
    /// 同一节点被访问两次（环或多父）返回 `MalformedHierarchy`。
    pub fn descendants(&self, id: &SpaceId) -> Result<BTreeSet<SpaceId>, HierarchyError> {
        self.require(id)?;
        let mut visited = BTreeSet::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                warn!(
                    target: "envwatch.hierarchy",
                    root = %id,
                    space_id = %current,
                    "descendants_revisit"
                );
                return Err(HierarchyError::MalformedHierarchy { space_id: current });
            }
            match self.get(&current) {
                Some(space) => stack.extend(space.child_ids.iter().cloned()),
                None => warn!(
                    target: "envwatch.hierarchy",
                    root = %id,
                    space_id = %current,
                    "descendants_unknown_child"
                ),
            }
        }
        Ok(visited)
    }

    /// 祖先链（最近的父节点在前，不含自身）。父节点缺失时视为到达根。
    pub fn ancestors(&self, id: &SpaceId) -> Result<Vec<&Space>, HierarchyError> {
        let start = self.require(id)?;
        let mut seen = HashSet::from([&start.id]);
        let mut chain = Vec::new();
        let mut parent = start.parent_id.as_ref();
        while let Some(parent_id) = parent {
            let Some(space) = self.get(parent_id) else {
                break;
            };
            if !seen.insert(&space.id) {
                warn!(
                    target: "envwatch.hierarchy",
                    space_id = %id,
                    revisited = %space.id,
                    "ancestors_cycle"
                );
                return Err(HierarchyError::MalformedHierarchy {
                    space_id: space.id.clone(),
                });
            }
            chain.push(space);
            parent = space.parent_id.as_ref();
        }
        Ok(chain)
    }
}
