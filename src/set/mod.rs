//! # Identity-keyed node sets
//!
//! Collections over already-indexed nodes of any class, keyed by the
//! `(NodeClass, type, id)` triple. A bare set never assigns identity.
//!
//! | Type | Duplicates | Assigns identity |
//! |------|------------|------------------|
//! | `Set` | rejected (returns false) | no, unindexed input is an error |
//! | `Multiset` | counted | no, unindexed input is an error |
//! | `GraphSet` | rejected | yes, through its bound `Graph` |
//! | `GraphMultiset` | counted | yes, through its bound `Graph` |
//!
//! Members are held by handle, so removing a node from its Index does not
//! remove it from a set: the entry still counts toward `len()` and is still
//! returned by `find`, `get` and `iter`.

pub mod multiset;
pub mod graph_set;

use crate::model::node::KeyRef;
use crate::model::{Node, NodeClass, NodeId, NodeKey};
use crate::storage::dense::DenseMap;
use crate::{Error, Result};

pub use multiset::Multiset;
pub use graph_set::{GraphSet, GraphMultiset};

/// Fail with [`Error::Identity`] unless `node` already has an id.
pub(crate) fn require_indexed(node: &Node) -> Result<()> {
    if node.is_indexed() {
        Ok(())
    } else {
        Err(Error::Identity(format!(
            "{} {:?} has not been indexed",
            node.class(),
            node.node_type()
        )))
    }
}

// ============================================================================
// Set
// ============================================================================

/// At most one entry per identity, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Set {
    members: DenseMap<NodeKey, Node>,
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: DenseMap::with_capacity(capacity),
        }
    }

    /// Build from nodes known to be indexed, keeping the first of any
    /// repeated identity.
    pub(crate) fn from_indexed(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut set = Self::new();
        for node in nodes {
            set.members.insert(node.key(), node);
        }
        set
    }

    /// Add `node`. Returns false, leaving the set untouched, if its identity
    /// is already present. Fails with [`Error::Identity`] if it is unindexed.
    pub fn insert(&mut self, node: &Node) -> Result<bool> {
        require_indexed(node)?;
        if self.members.contains_key(&node.key_ref()) {
            return Ok(false);
        }
        Ok(self.members.insert(node.key(), node.clone()))
    }

    pub fn remove(&mut self, node: &Node) -> bool {
        self.members.remove(&node.key_ref()).is_some()
    }

    pub fn remove_by(&mut self, class: NodeClass, node_type: &str, id: NodeId) -> bool {
        self.members
            .remove(&KeyRef { class, node_type, id })
            .is_some()
    }

    pub fn find(&self, class: NodeClass, node_type: &str, id: NodeId) -> Option<&Node> {
        self.members.get(&KeyRef { class, node_type, id })
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.members.contains_key(&node.key_ref())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Member at dense position `pos` in insertion order.
    pub fn get(&self, pos: usize) -> Option<&Node> {
        self.members.get_index(pos).map(|(_, n)| n)
    }

    pub fn keys(&self) -> impl Iterator<Item = &NodeKey> {
        self.members.keys()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.members.values()
    }
}
