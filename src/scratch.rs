//! Scratch storage used while marshaling: an id-indexed tree with an implicit super-root.

use std::collections::HashMap;
use std::fmt;

/// Identifier of the implicit super-root. Forest roots hang directly from it.
pub(crate) const ROOT_ID: u64 = 0;

#[derive(Debug)]
pub(crate) struct ScratchNode<P> {
    id: u64,
    parent: u64,
    payload: Option<P>,
    children: Vec<u64>,
}

impl<P> ScratchNode<P> {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }
    pub(crate) fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }
    /// A node without payload is a placeholder hosting children of an unseen record.
    pub(crate) fn is_materialized(&self) -> bool {
        self.payload.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddOutcome {
    Added,
    AlreadyExists,
    MissingParent,
    NotFound,
    Reserved,
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AddOutcome::Added => "added",
            AddOutcome::AlreadyExists => "already exists",
            AddOutcome::MissingParent => "parent does not exist",
            AddOutcome::NotFound => "no placeholder to materialize",
            AddOutcome::Reserved => "identifier is reserved for the forest root",
        };
        f.write_str(msg)
    }
}

#[derive(Debug)]
pub(crate) struct ScratchTree<P> {
    nodes: HashMap<u64, ScratchNode<P>>,
}

impl<P> ScratchTree<P> {
    pub(crate) fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            ROOT_ID,
            ScratchNode {
                id: ROOT_ID,
                parent: ROOT_ID,
                payload: None,
                children: Vec::new(),
            },
        );
        Self { nodes }
    }

    pub(crate) fn root(&self) -> &ScratchNode<P> {
        &self.nodes[&ROOT_ID]
    }

    pub(crate) fn find(&self, id: u64) -> Option<&ScratchNode<P>> {
        self.nodes.get(&id)
    }

    /// Inserts a new node as the last child of `parent`.
    pub(crate) fn add(&mut self, id: u64, parent: u64, payload: Option<P>) -> AddOutcome {
        if id == ROOT_ID {
            return AddOutcome::Reserved;
        }
        if self.nodes.contains_key(&id) {
            return AddOutcome::AlreadyExists;
        }
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return AddOutcome::MissingParent;
        };
        parent_node.children.push(id);
        self.nodes.insert(
            id,
            ScratchNode {
                id,
                parent,
                payload,
                children: Vec::new(),
            },
        );
        AddOutcome::Added
    }

    /// Fills a placeholder with its payload and moves it to the end of `parent`'s children.
    ///
    /// The placeholder keeps the children it already hosts.
    pub(crate) fn materialize(&mut self, id: u64, parent: u64, payload: P) -> AddOutcome {
        if id == ROOT_ID {
            return AddOutcome::Reserved;
        }
        let old_parent = match self.nodes.get(&id) {
            None => return AddOutcome::NotFound,
            Some(node) if node.is_materialized() => return AddOutcome::AlreadyExists,
            Some(node) => node.parent,
        };
        if !self.nodes.contains_key(&parent) {
            return AddOutcome::MissingParent;
        }
        if let Some(old) = self.nodes.get_mut(&old_parent) {
            old.children.retain(|child| *child != id);
        }
        if let Some(new) = self.nodes.get_mut(&parent) {
            new.children.push(id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
            node.payload = Some(payload);
        }
        AddOutcome::Added
    }

    /// Children of `id` in insertion order.
    pub(crate) fn children(&self, id: u64) -> impl Iterator<Item = &ScratchNode<P>> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(move |node| node.children.iter().filter_map(move |c| self.nodes.get(c)))
    }

    pub(crate) fn materialized_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_materialized()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_ids(tree: &ScratchTree<&str>, id: u64) -> Vec<u64> {
        tree.children(id).map(ScratchNode::id).collect()
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut tree = ScratchTree::new();
        assert_eq!(tree.add(3, ROOT_ID, Some("c")), AddOutcome::Added);
        assert_eq!(tree.add(1, ROOT_ID, Some("a")), AddOutcome::Added);
        assert_eq!(tree.add(2, 3, Some("b")), AddOutcome::Added);
        assert_eq!(child_ids(&tree, ROOT_ID), vec![3, 1]);
        assert_eq!(child_ids(&tree, 3), vec![2]);
        assert_eq!(tree.find(2).and_then(ScratchNode::payload), Some(&"b"));
        assert_eq!(tree.find(2).map(|n| n.parent), Some(3));
    }

    #[test]
    fn add_rejects_existing_missing_and_reserved() {
        let mut tree = ScratchTree::new();
        assert_eq!(tree.add(1, ROOT_ID, Some("a")), AddOutcome::Added);
        assert_eq!(tree.add(1, ROOT_ID, Some("a")), AddOutcome::AlreadyExists);
        assert_eq!(tree.add(2, 9, Some("b")), AddOutcome::MissingParent);
        assert_eq!(tree.add(ROOT_ID, 1, Some("r")), AddOutcome::Reserved);
        assert_eq!(tree.materialized_count(), 1);
    }

    #[test]
    fn materialize_moves_placeholder_with_its_children() {
        let mut tree = ScratchTree::new();
        tree.add(5, ROOT_ID, None);
        tree.add(6, 5, Some("child"));
        tree.add(1, ROOT_ID, Some("root"));
        assert!(!tree.root().is_materialized());
        assert!(!tree.find(5).is_some_and(ScratchNode::is_materialized));

        assert_eq!(tree.materialize(5, 1, "dir"), AddOutcome::Added);
        assert_eq!(child_ids(&tree, ROOT_ID), vec![1]);
        assert_eq!(child_ids(&tree, 1), vec![5]);
        assert_eq!(child_ids(&tree, 5), vec![6]);
        assert_eq!(tree.materialize(5, 1, "dir"), AddOutcome::AlreadyExists);
        assert_eq!(tree.materialize(8, 1, "none"), AddOutcome::NotFound);
    }
}
