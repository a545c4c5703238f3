//! Entity: a plain data node.

use std::ops::Deref;

use super::{Node, NodeClass};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity(Node);

impl Entity {
    pub fn new(node_type: &str) -> Result<Self> {
        Node::new(NodeClass::Entity, node_type).map(Self)
    }

    pub(crate) fn from_node(node: Node) -> Self {
        Self(node)
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    pub fn into_node(self) -> Node {
        self.0
    }
}

impl Deref for Entity {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.0
    }
}

impl AsRef<Node> for Entity {
    fn as_ref(&self) -> &Node {
        &self.0
    }
}

impl From<Entity> for Node {
    fn from(e: Entity) -> Node {
        e.0
    }
}
