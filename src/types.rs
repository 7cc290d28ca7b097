use serde::{Deserialize, Serialize};

/// A flat filesystem entry record as supplied by the caller.
///
/// Identifiers are not required to be unique, and `parent_id` may name a record
/// that never appears. A record whose `id` equals its `parent_id` is a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsData {
    pub id: u64,
    pub parent_id: u64,
    pub name: String,
    pub is_dir: bool,
}

impl FsData {
    pub fn new(id: u64, parent_id: u64, name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            is_dir,
        }
    }
}

/// A second or later occurrence of an identifier, kept out of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsDuplicateDataNode {
    pub id: u64,
    /// Parent id after root normalization (0 for self-referential records).
    pub parent_id: u64,
    pub name: String,
    pub is_dir: bool,
    /// Level of the one materialized node carrying the same id.
    ///
    /// Stays 0 if that node never surfaces in the forest.
    pub level_found: usize,
}

impl FsDuplicateDataNode {
    pub(crate) fn from_record(record: &FsData) -> Self {
        Self {
            id: record.id,
            parent_id: record.parent_id,
            name: record.name.clone(),
            is_dir: record.is_dir,
            level_found: 0,
        }
    }
}

/// A node of the marshaled forest. Roots have `level` 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsTree {
    pub id: u64,
    pub name: String,
    pub is_dir: bool,
    pub level: usize,
    /// Children in input order.
    pub nodes: Vec<FsTree>,
}

impl FsTree {
    /// Number of nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.nodes);
        }
        count
    }
}

// Flattens the subtree before dropping so deep chains do not recurse.
impl Drop for FsTree {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.nodes);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.nodes);
        }
    }
}

/// The complete result of marshaling a record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarshalResult {
    /// Root-level trees, each with nested children.
    pub forest: Vec<FsTree>,
    /// Duplicate occurrences in the order they were found. Empty when there are none.
    pub duplicates: Vec<FsDuplicateDataNode>,
}

impl MarshalResult {
    /// Total number of nodes across the forest.
    pub fn node_count(&self) -> usize {
        self.forest.iter().map(FsTree::count).sum()
    }
}
