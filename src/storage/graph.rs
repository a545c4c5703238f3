//! Graph: the top-level store, one Cluster per node class.

use std::ops;
use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::debug;

use super::{Cluster, GraphConfig};
use crate::model::{Action, Bond, Entity, Node, NodeClass, NodeId};
use crate::Result;

/// A Graph shared with write-through collections such as `GraphSet`.
pub type SharedGraph = Arc<RwLock<Graph>>;

/// In-memory store of entities, actions and bonds.
///
/// Clusters are registered on the first insert of their class and kept, so
/// identities are never reissued. `len()` and positional access only see
/// classes that currently hold nodes.
#[derive(Debug, Default)]
pub struct Graph {
    clusters: SmallVec<[Cluster; 3]>,
    config: GraphConfig,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            clusters: SmallVec::new(),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Wrap into a handle for `GraphSet` / `GraphMultiset`.
    pub fn into_shared(self) -> SharedGraph {
        Arc::new(RwLock::new(self))
    }

    // ========================================================================
    // Factories
    // ========================================================================

    pub fn create_entity(&mut self, node_type: &str) -> Result<Entity> {
        let entity = Entity::new(node_type)?;
        self.insert(&entity)?;
        Ok(entity)
    }

    pub fn create_action(&mut self, node_type: &str) -> Result<Action> {
        let action = Action::new(node_type)?;
        self.insert(&action)?;
        Ok(action)
    }

    pub fn create_bond(&mut self, node_type: &str) -> Result<Bond> {
        let bond = Bond::new(node_type)?;
        self.insert(&bond)?;
        Ok(bond)
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Index `node` in the Cluster for its class. `Ok(false)` if it already
    /// has an id.
    pub fn insert(&mut self, node: &Node) -> Result<bool> {
        if node.is_indexed() {
            return Ok(false);
        }
        let class = node.class();
        let pos = match self.position(class) {
            Some(pos) => pos,
            None => {
                debug!(%class, "registering cluster");
                self.clusters.push(Cluster::with_index_capacity(
                    class,
                    self.config.index_capacity,
                ));
                self.clusters.len() - 1
            }
        };
        self.clusters[pos].insert(node)
    }

    pub fn find(&self, class: NodeClass, node_type: &str, id: NodeId) -> Option<&Node> {
        self.cluster(class)?.find(node_type, id)
    }

    pub fn remove(&mut self, class: NodeClass, node_type: &str, id: NodeId) -> bool {
        self.cluster_mut(class)
            .is_some_and(|c| c.remove(node_type, id))
    }

    pub fn remove_node(&mut self, node: &Node) -> bool {
        self.cluster_mut(node.class())
            .is_some_and(|c| c.remove_node(node))
    }

    /// The Cluster registered for `class`, empty or not.
    pub fn cluster(&self, class: NodeClass) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.node_class() == class)
    }

    fn cluster_mut(&mut self, class: NodeClass) -> Option<&mut Cluster> {
        self.clusters.iter_mut().find(|c| c.node_class() == class)
    }

    fn position(&self, class: NodeClass) -> Option<usize> {
        self.clusters.iter().position(|c| c.node_class() == class)
    }

    /// Number of node classes that currently hold at least one node (0..=3).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.iter().all(Cluster::is_empty)
    }

    /// The `pos`-th non-empty Cluster in registration order.
    pub fn get(&self, pos: usize) -> Option<&Cluster> {
        self.iter().nth(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|c| !c.is_empty())
    }

    /// Total number of contained nodes.
    pub fn node_count(&self) -> usize {
        self.clusters.iter().map(Cluster::node_count).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.clusters.iter().flat_map(Cluster::nodes)
    }

    /// Every contained node tagged with `tag`.
    ///
    /// Computed over current members: a node removed from the graph is left
    /// out even if it still carries the tag.
    pub fn group(&self, tag: &str) -> Vec<Node> {
        self.nodes().filter(|n| n.has_group(tag)).cloned().collect()
    }

    /// Empty every Cluster. Id counters are kept.
    pub fn clear(&mut self) {
        debug!(nodes = self.node_count(), "clearing graph");
        for cluster in &mut self.clusters {
            cluster.clear();
        }
    }
}

impl ops::Index<usize> for Graph {
    type Output = Cluster;

    fn index(&self, pos: usize) -> &Cluster {
        match self.get(pos) {
            Some(cluster) => cluster,
            None => panic!("graph position {pos} out of range (len {})", self.len()),
        }
    }
}

impl ops::Index<NodeClass> for Graph {
    type Output = Cluster;

    fn index(&self, class: NodeClass) -> &Cluster {
        match self.cluster(class) {
            Some(cluster) => cluster,
            None => panic!("no {class} cluster registered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_factories_assign_ids() {
        let mut g = Graph::new();
        let e1 = g.create_entity("User").unwrap();
        let e2 = g.create_entity("User").unwrap();
        let b = g.create_bond("Friend").unwrap();
        let a = g.create_action("Read").unwrap();

        assert_eq!(e1.id(), NodeId(1));
        assert_eq!(e2.id(), NodeId(2));
        assert_eq!(b.id(), NodeId(1));
        assert_eq!(a.id(), NodeId(1));
        assert_eq!(g.len(), 3);
        assert_eq!(g.node_count(), 4);
    }

    #[test]
    fn test_factory_construction_error() {
        let mut g = Graph::new();
        assert!(matches!(g.create_entity(""), Err(Error::Construction(_))));
        assert_eq!(g.len(), 0);
    }

    #[test]
    fn test_insert_routes_by_class() {
        let mut g = Graph::new();
        let e = Entity::new("User").unwrap();
        assert!(g.insert(&e).unwrap());
        assert!(!g.insert(&e).unwrap());
        assert_eq!(g.find(NodeClass::Entity, "User", NodeId(1)), Some(e.node()));
        assert!(g.find(NodeClass::Action, "User", NodeId(1)).is_none());
    }

    #[test]
    fn test_breadth_and_nested_positions() {
        let mut g = Graph::new();
        g.create_entity("Book").unwrap();
        g.create_entity("Book").unwrap();
        g.create_entity("User").unwrap();
        g.create_action("Read").unwrap();

        assert_eq!(g.len(), 2);
        assert_eq!(g[0].node_class(), NodeClass::Entity);
        assert_eq!(g[0][0].len(), 2);
        assert_eq!(g[0][1].len(), 1);
        assert_eq!(g[1][0].node_type(), "Read");
        assert_eq!(g[NodeClass::Entity]["User"].len(), 1);
    }

    #[test]
    fn test_remove_overloads() {
        let mut g = Graph::new();
        let e1 = g.create_entity("User").unwrap();
        let e2 = g.create_entity("User").unwrap();

        assert!(g.remove_node(&e1));
        assert!(!g.remove_node(&e1));
        assert!(g.remove(NodeClass::Entity, "User", e2.id()));
        assert!(!g.remove(NodeClass::Bond, "User", e2.id()));
        assert_eq!(g.len(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn test_group_filters_by_containment() {
        let mut g = Graph::new();
        let user = g.create_entity("User").unwrap();
        let book = g.create_entity("Book").unwrap();
        let read = g.create_action("Read").unwrap();

        user.add_group("test");
        book.add_group("test");
        read.add_group("other");
        g.remove_node(&book);

        let tagged = g.group("test");
        assert_eq!(tagged, vec![user.node().clone()]);
        assert!(book.has_group("test"));
        assert!(g.group("missing").is_empty());
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut g = Graph::new();
        g.create_entity("User").unwrap();
        g.clear();
        assert_eq!(g.len(), 0);
        assert_eq!(g.create_entity("User").unwrap().id(), NodeId(2));
    }

    #[test]
    fn test_config_capacity_applied() {
        let mut g = Graph::with_config(GraphConfig { index_capacity: 64 });
        g.create_entity("User").unwrap();
        assert_eq!(g.config().index_capacity, 64);
        assert_eq!(g[NodeClass::Entity]["User"].len(), 1);
    }
}
