//! Action: an interaction event with many subjects and many objects.
//!
//! Adding a participant on either end also records the action in the
//! participant's own `actions` set, so the relation can be walked from
//! both sides. Both sides hold weak handles; the owning `Index` keeps the
//! nodes alive. Reads return a [`Set`] of the members still alive.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;

use super::node::WeakNode;
use super::{Node, NodeClass, NodeKey};
use crate::set::{require_indexed, Set};
use crate::storage::dense::DenseMap;
use crate::{Error, Result};

/// Entries below which dropped members are never swept.
const SWEEP_FLOOR: usize = 32;

#[derive(Debug, Clone)]
pub struct Action {
    node: Node,
    ends: Arc<ActionEnds>,
}

#[derive(Debug, Default)]
pub(crate) struct ActionEnds {
    subjects: RwLock<WeakSet>,
    objects: RwLock<WeakSet>,
}

/// Identity-keyed weak handles in insertion order.
///
/// Used for both action ends and the `actions` back-references on every
/// node, which would otherwise form reference cycles. Entries whose node
/// has been dropped are swept once the set doubles since the last sweep.
#[derive(Debug)]
pub(crate) struct WeakSet {
    members: DenseMap<NodeKey, WeakNode>,
    sweep_at: usize,
}

impl Default for WeakSet {
    fn default() -> Self {
        Self {
            members: DenseMap::default(),
            sweep_at: SWEEP_FLOOR,
        }
    }
}

impl WeakSet {
    /// Returns false if a live node with the same identity is present.
    pub fn insert(&mut self, node: &Node) -> bool {
        let key = node.key_ref();
        if let Some(existing) = self.members.get(&key) {
            if existing.is_alive() {
                return false;
            }
            self.members.remove(&key);
        }
        if self.members.len() >= self.sweep_at {
            self.members.retain(|_, w| w.is_alive());
            self.sweep_at = (self.members.len() * 2).max(SWEEP_FLOOR);
        }
        self.members.insert(node.key(), node.downgrade())
    }

    pub fn remove(&mut self, node: &Node) -> bool {
        self.members.remove(&node.key_ref()).is_some()
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.members
            .get(&node.key_ref())
            .is_some_and(WeakNode::is_alive)
    }

    /// Members still alive, in insertion order.
    pub fn live(&self) -> Set {
        Set::from_indexed(self.members.values().filter_map(WeakNode::upgrade))
    }
}

impl Action {
    pub fn new(node_type: &str) -> Result<Self> {
        let node = Node::new(NodeClass::Action, node_type)?;
        // Node::new always attaches action ends for this class.
        node.as_action()
            .ok_or_else(|| Error::Construction(format!("{node:?} is not an action")))
    }

    pub(crate) fn from_parts(node: Node, ends: Arc<ActionEnds>) -> Self {
        Self { node, ends }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn into_node(self) -> Node {
        self.node
    }

    /// Add `node` as a subject. Returns false if it already was one.
    ///
    /// Both this action and `node` must be indexed.
    pub fn add_subject(&self, node: &Node) -> Result<bool> {
        self.attach(&self.ends.subjects, node)
    }

    /// Add `node` as an object. Returns false if it already was one.
    pub fn add_object(&self, node: &Node) -> Result<bool> {
        self.attach(&self.ends.objects, node)
    }

    /// Drop `node` from the subjects. The back-reference is kept while
    /// `node` is still an object of this action.
    pub fn remove_subject(&self, node: &Node) -> bool {
        self.detach(&self.ends.subjects, &self.ends.objects, node)
    }

    pub fn remove_object(&self, node: &Node) -> bool {
        self.detach(&self.ends.objects, &self.ends.subjects, node)
    }

    /// Subjects still alive, in the order they were added.
    pub fn subjects(&self) -> Set {
        self.ends.subjects.read().live()
    }

    pub fn objects(&self) -> Set {
        self.ends.objects.read().live()
    }

    fn attach(&self, end: &RwLock<WeakSet>, node: &Node) -> Result<bool> {
        if !self.node.is_indexed() {
            return Err(Error::Identity(format!(
                "{:?} must be indexed before it can relate nodes",
                self.node
            )));
        }
        require_indexed(node)?;
        if !end.write().insert(node) {
            return Ok(false);
        }
        node.actions_lock().write().insert(&self.node);
        Ok(true)
    }

    fn detach(&self, end: &RwLock<WeakSet>, other: &RwLock<WeakSet>, node: &Node) -> bool {
        if !end.write().remove(node) {
            return false;
        }
        if !other.read().contains(node) {
            node.actions_lock().write().remove(&self.node);
        }
        true
    }
}

impl Deref for Action {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl AsRef<Node> for Action {
    fn as_ref(&self) -> &Node {
        &self.node
    }
}

impl From<Action> for Node {
    fn from(a: Action) -> Node {
        a.node
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Action {}
