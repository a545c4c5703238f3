//! Sets bound to a Graph: unindexed input is written through to the Graph
//! first, which assigns its identity, then the usual set rules apply.

use std::ops::Deref;

use super::{Multiset, Set};
use crate::model::{Node, NodeClass, NodeId};
use crate::storage::SharedGraph;
use crate::Result;

/// Insert `node` into `graph` if it has no identity yet.
fn write_through(graph: &SharedGraph, node: &Node) -> Result<()> {
    if !node.is_indexed() {
        graph.write().insert(node)?;
    }
    Ok(())
}

// ============================================================================
// GraphSet
// ============================================================================

/// A [`Set`] that indexes unindexed members in its bound Graph.
///
/// Read access goes through `Deref<Target = Set>`.
#[derive(Debug)]
pub struct GraphSet {
    graph: SharedGraph,
    set: Set,
}

impl GraphSet {
    pub fn new(graph: SharedGraph) -> Self {
        Self { graph, set: Set::new() }
    }

    pub fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    pub fn insert(&mut self, node: &Node) -> Result<bool> {
        write_through(&self.graph, node)?;
        self.set.insert(node)
    }

    pub fn remove(&mut self, node: &Node) -> bool {
        self.set.remove(node)
    }

    pub fn remove_by(&mut self, class: NodeClass, node_type: &str, id: NodeId) -> bool {
        self.set.remove_by(class, node_type, id)
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }
}

impl Deref for GraphSet {
    type Target = Set;

    fn deref(&self) -> &Set {
        &self.set
    }
}

// ============================================================================
// GraphMultiset
// ============================================================================

/// A [`Multiset`] that indexes unindexed members in its bound Graph.
#[derive(Debug)]
pub struct GraphMultiset {
    graph: SharedGraph,
    set: Multiset,
}

impl GraphMultiset {
    pub fn new(graph: SharedGraph) -> Self {
        Self { graph, set: Multiset::new() }
    }

    pub fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    pub fn insert(&mut self, node: &Node) -> Result<bool> {
        write_through(&self.graph, node)?;
        self.set.insert(node)
    }

    pub fn remove(&mut self, node: &Node) -> bool {
        self.set.remove(node)
    }

    pub fn remove_by(&mut self, class: NodeClass, node_type: &str, id: NodeId) -> bool {
        self.set.remove_by(class, node_type, id)
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }
}

impl Deref for GraphMultiset {
    type Target = Multiset;

    fn deref(&self) -> &Multiset {
        &self.set
    }
}
