//! Cluster: the Indexes of one node class, keyed by type.
//!
//! An Index is registered the first time a node of that type is inserted and
//! stays registered afterwards so its id counter survives. `len()` and
//! positional access only see types that currently hold members.

use std::ops;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use super::Index;
use crate::model::{Node, NodeClass, NodeId};
use crate::{Error, Result};

#[derive(Debug)]
pub struct Cluster {
    class: NodeClass,
    indexes: IndexMap<Arc<str>, Index>,
    index_capacity: usize,
}

impl Cluster {
    pub fn new(class: NodeClass) -> Self {
        Self::with_index_capacity(class, 0)
    }

    /// Cluster whose lazily created Indexes pre-allocate `capacity` slots.
    pub fn with_index_capacity(class: NodeClass, capacity: usize) -> Self {
        Self {
            class,
            indexes: IndexMap::new(),
            index_capacity: capacity,
        }
    }

    pub fn node_class(&self) -> NodeClass {
        self.class
    }

    /// Index `node` under its type, registering that type on first use.
    pub fn insert(&mut self, node: &Node) -> Result<bool> {
        if node.class() != self.class {
            return Err(Error::TypeMismatch {
                expected: self.class.to_string(),
                got: node.class().to_string(),
            });
        }
        if node.is_indexed() {
            return Ok(false);
        }
        if !self.indexes.contains_key(node.node_type()) {
            debug!(class = %self.class, node_type = node.node_type(), "registering index");
            let key = Arc::clone(node.type_arc());
            let index = Index::build(self.class, Arc::clone(&key), self.index_capacity);
            self.indexes.insert(key, index);
        }
        match self.indexes.get_mut(node.node_type()) {
            Some(index) => index.insert(node),
            None => Ok(false),
        }
    }

    pub fn remove(&mut self, node_type: &str, id: NodeId) -> bool {
        self.indexes
            .get_mut(node_type)
            .is_some_and(|index| index.remove(id))
    }

    pub fn remove_node(&mut self, node: &Node) -> bool {
        if node.class() != self.class {
            return false;
        }
        self.indexes
            .get_mut(node.node_type())
            .is_some_and(|index| index.remove_node(node))
    }

    pub fn find(&self, node_type: &str, id: NodeId) -> Option<&Node> {
        self.indexes.get(node_type)?.find(id)
    }

    /// The Index registered for `node_type`, empty or not.
    pub fn index(&self, node_type: &str) -> Option<&Index> {
        self.indexes.get(node_type)
    }

    /// Number of types that currently hold at least one member.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.values().all(Index::is_empty)
    }

    /// The `pos`-th non-empty Index in registration order.
    pub fn get(&self, pos: usize) -> Option<&Index> {
        self.iter().nth(pos)
    }

    /// Non-empty Indexes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Index> {
        self.indexes.values().filter(|index| !index.is_empty())
    }

    /// Members across every type.
    pub fn node_count(&self) -> usize {
        self.indexes.values().map(Index::len).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.indexes.values().flat_map(Index::iter)
    }

    /// Empty every Index. Registrations and id counters are kept.
    pub fn clear(&mut self) {
        for index in self.indexes.values_mut() {
            index.clear();
        }
    }
}

impl ops::Index<usize> for Cluster {
    type Output = Index;

    fn index(&self, pos: usize) -> &Index {
        match self.get(pos) {
            Some(index) => index,
            None => panic!("cluster position {pos} out of range (len {})", self.len()),
        }
    }
}

impl ops::Index<&str> for Cluster {
    type Output = Index;

    fn index(&self, node_type: &str) -> &Index {
        match self.indexes.get(node_type) {
            Some(index) => index,
            None => panic!("no {} index for type {node_type:?}", self.class),
        }
    }
}
