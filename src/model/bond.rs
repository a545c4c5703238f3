//! Bond: a directed edge with exactly one subject and one object.
//!
//! Ends are plain reassignable references that keep their nodes alive. No
//! back-references are kept on the endpoints, so a ring of bonds whose ends
//! lead back to the first one stays alive until one of its ends is cleared.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Node, NodeClass};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct Bond {
    node: Node,
    ends: Arc<BondEnds>,
}

#[derive(Debug, Default)]
pub(crate) struct BondEnds {
    subject: RwLock<Option<Node>>,
    object: RwLock<Option<Node>>,
}

impl Bond {
    pub fn new(node_type: &str) -> Result<Self> {
        let node = Node::new(NodeClass::Bond, node_type)?;
        node.as_bond()
            .ok_or_else(|| Error::Construction(format!("{node:?} is not a bond")))
    }

    pub(crate) fn from_parts(node: Node, ends: Arc<BondEnds>) -> Self {
        Self { node, ends }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn into_node(self) -> Node {
        self.node
    }

    /// The subject, if one has been set.
    pub fn subject(&self) -> Option<Node> {
        self.ends.subject.read().clone()
    }

    pub fn object(&self) -> Option<Node> {
        self.ends.object.read().clone()
    }

    /// Point the subject at `node`, returning the previous subject.
    pub fn set_subject(&self, node: &Node) -> Option<Node> {
        self.ends.subject.write().replace(node.clone())
    }

    pub fn set_object(&self, node: &Node) -> Option<Node> {
        self.ends.object.write().replace(node.clone())
    }

    pub fn clear_subject(&self) -> Option<Node> {
        self.ends.subject.write().take()
    }

    pub fn clear_object(&self) -> Option<Node> {
        self.ends.object.write().take()
    }
}

impl Deref for Bond {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl AsRef<Node> for Bond {
    fn as_ref(&self) -> &Node {
        &self.node
    }
}

impl From<Bond> for Node {
    fn from(b: Bond) -> Node {
        b.node
    }
}

impl PartialEq for Bond {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Bond {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;

    #[test]
    fn test_ends_reassignable() {
        let a = Entity::new("User").unwrap();
        let b = Entity::new("User").unwrap();
        let friend = Bond::new("Friend").unwrap();

        assert!(friend.subject().is_none());
        friend.set_subject(&a);
        friend.set_object(&b);
        assert_eq!(friend.subject(), Some(a.node().clone()));
        assert_eq!(friend.object(), Some(b.node().clone()));

        friend.set_subject(&b);
        assert_eq!(friend.subject(), Some(b.node().clone()));
        assert_eq!(friend.clear_object(), Some(b.node().clone()));
        assert!(friend.object().is_none());
    }

    #[test]
    fn test_no_back_reference() {
        let a = Entity::new("User").unwrap();
        let friend = Bond::new("Friend").unwrap();
        friend.set_subject(&a);
        assert!(a.actions().is_empty());
    }

    #[test]
    fn test_standalone_end_kept() {
        let friend = Bond::new("Friend").unwrap();
        friend.set_object(&Entity::new("User").unwrap());
        assert_eq!(friend.object().map(|n| n.node_type().to_string()), Some("User".into()));
        assert!(!friend.object().is_some_and(|n| n.is_indexed()));
    }

    #[test]
    fn test_set_returns_previous_end() {
        let a = Entity::new("User").unwrap();
        let b = Entity::new("User").unwrap();
        let friend = Bond::new("Friend").unwrap();

        assert_eq!(friend.set_subject(&a), None);
        assert_eq!(friend.set_subject(&b), Some(a.node().clone()));
        assert_eq!(friend.subject(), Some(b.node().clone()));
    }
}
