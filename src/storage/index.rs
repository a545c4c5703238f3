//! Index: the identity-assigning, owning collection for one
//! `(NodeClass, type)` pair.
//!
//! Ids start at 1 and increase by one per accepted node. Removed ids are
//! never handed out again, including after `clear()`. Positional access is
//! dense and zero-based in insertion order, independent of id values.
//! Lookup and removal by id are O(1); positional access is O(log n) while
//! removed slots are pending compaction.

use std::ops;
use std::sync::Arc;

use tracing::trace;

use super::dense::DenseMap;
use crate::model::{Node, NodeClass, NodeId};
use crate::{Error, Result};

#[derive(Debug)]
pub struct Index {
    class: NodeClass,
    node_type: Arc<str>,
    members: DenseMap<NodeId, Node>,
    /// Highest id ever assigned by this index.
    last_id: u64,
}

impl Index {
    pub fn new(class: NodeClass, node_type: &str) -> Result<Self> {
        Self::with_capacity(class, node_type, 0)
    }

    pub fn with_capacity(class: NodeClass, node_type: &str, capacity: usize) -> Result<Self> {
        if node_type.trim().is_empty() {
            return Err(Error::Construction(format!(
                "{class} index requires a non-empty type"
            )));
        }
        Ok(Self::build(class, Arc::from(node_type), capacity))
    }

    /// Build from an already-validated type string shared with the node.
    pub(crate) fn build(class: NodeClass, node_type: Arc<str>, capacity: usize) -> Self {
        Self {
            class,
            node_type,
            members: DenseMap::with_capacity(capacity),
            last_id: 0,
        }
    }

    pub fn node_class(&self) -> NodeClass {
        self.class
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Highest id ever assigned, 0 if none.
    pub fn last_id(&self) -> NodeId {
        NodeId(self.last_id)
    }

    /// Index `node`, assigning it the next id.
    ///
    /// Fails with [`Error::TypeMismatch`] if the node's class or type differ
    /// from this index. Returns `Ok(false)` if the node already has an id.
    pub fn insert(&mut self, node: &Node) -> Result<bool> {
        self.check(node)?;
        if node.is_indexed() {
            return Ok(false);
        }
        let id = NodeId(self.last_id + 1);
        if !node.assign_id(id) {
            return Ok(false);
        }
        self.last_id = id.0;
        self.members.insert(id, node.clone());
        Ok(true)
    }

    /// Evict the member with this id. Later members shift down one position.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let removed = self.members.remove(&id).is_some();
        if removed {
            trace!(class = %self.class, node_type = %self.node_type, %id, "index member removed");
        }
        removed
    }

    /// Evict `node` if it is a member of this index.
    pub fn remove_node(&mut self, node: &Node) -> bool {
        if !self.holds(node) {
            return false;
        }
        self.remove(node.id())
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.members.get(&id)
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.holds(node)
    }

    /// Member at dense position `pos`.
    pub fn get(&self, pos: usize) -> Option<&Node> {
        self.members.get_index(pos).map(|(_, n)| n)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Drop every member. The id counter keeps its high-water mark.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.members.values()
    }

    fn check(&self, node: &Node) -> Result<()> {
        if node.class() != self.class {
            return Err(Error::TypeMismatch {
                expected: self.class.to_string(),
                got: node.class().to_string(),
            });
        }
        if node.node_type() != &*self.node_type {
            return Err(Error::TypeMismatch {
                expected: self.node_type.to_string(),
                got: node.node_type().to_string(),
            });
        }
        Ok(())
    }

    fn holds(&self, node: &Node) -> bool {
        node.class() == self.class
            && node.node_type() == &*self.node_type
            && self.members.get(&node.id()).is_some_and(|m| m.ptr_eq(node))
    }
}

impl ops::Index<usize> for Index {
    type Output = Node;

    fn index(&self, pos: usize) -> &Node {
        match self.get(pos) {
            Some(node) => node,
            None => panic!("index position {pos} out of range (len {})", self.len()),
        }
    }
}
