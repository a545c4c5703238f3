//! Node in the graph: identity, tags and properties shared by every class.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::{Equivalent, IndexSet};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};

use super::action::{ActionEnds, WeakSet};
use super::bond::BondEnds;
use super::{Action, Bond, Entity, NodeClass, PropertyMap, Value};
use crate::set::Set;
use crate::{Error, Result};

/// Per-`(NodeClass, type)` identity. `0` means "not yet indexed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub const UNINDEXED: NodeId = NodeId(0);

    pub fn is_indexed(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(v: u64) -> Self {
        NodeId(v)
    }
}

// ============================================================================
// NodeKey
// ============================================================================

/// The `(NodeClass, type, id)` triple that names a node across collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub class: NodeClass,
    pub node_type: Arc<str>,
    pub id: NodeId,
}

impl NodeKey {
    pub fn is_indexed(&self) -> bool {
        self.id.is_indexed()
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.class, self.node_type, self.id)
    }
}

/// Borrowed form of [`NodeKey`] so lookups by triple don't allocate.
/// Field order and types must hash identically to `NodeKey`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyRef<'a> {
    pub class: NodeClass,
    pub node_type: &'a str,
    pub id: NodeId,
}

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.node_type.hash(state);
        self.id.hash(state);
    }
}

impl Equivalent<NodeKey> for KeyRef<'_> {
    fn equivalent(&self, key: &NodeKey) -> bool {
        self.class == key.class && self.id == key.id && self.node_type == &*key.node_type
    }
}

// ============================================================================
// Node
// ============================================================================

/// Shared handle to a node.
///
/// Cloning is cheap and yields another handle to the same node; equality is
/// handle identity. Class and type are fixed at construction. The id is
/// assigned once by the first identity-assigning collection that accepts the
/// node and never changes afterwards.
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
}

pub(crate) struct NodeInner {
    class: NodeClass,
    node_type: Arc<str>,
    id: AtomicU64,
    state: RwLock<NodeState>,
    /// Actions this node participates in, as subject or object.
    actions: RwLock<WeakSet>,
    links: Links,
}

#[derive(Default)]
struct NodeState {
    groups: IndexSet<String>,
    properties: PropertyMap,
}

/// Class-specific relationship storage.
pub(crate) enum Links {
    Entity,
    Action(Arc<ActionEnds>),
    Bond(Arc<BondEnds>),
}

impl Node {
    /// Construct an unindexed node of the given class.
    ///
    /// Fails with [`Error::Construction`] when `node_type` is empty or blank.
    pub fn new(class: NodeClass, node_type: &str) -> Result<Self> {
        if node_type.trim().is_empty() {
            return Err(Error::Construction(format!(
                "{class} requires a non-empty type"
            )));
        }
        let links = match class {
            NodeClass::Entity => Links::Entity,
            NodeClass::Action => Links::Action(Arc::new(ActionEnds::default())),
            NodeClass::Bond => Links::Bond(Arc::new(BondEnds::default())),
        };
        Ok(Self {
            inner: Arc::new(NodeInner {
                class,
                node_type: Arc::from(node_type),
                id: AtomicU64::new(0),
                state: RwLock::new(NodeState::default()),
                actions: RwLock::new(WeakSet::default()),
                links,
            }),
        })
    }

    pub fn class(&self) -> NodeClass {
        self.inner.class
    }

    pub fn node_type(&self) -> &str {
        &self.inner.node_type
    }

    pub fn id(&self) -> NodeId {
        NodeId(self.inner.id.load(Ordering::Acquire))
    }

    pub fn is_indexed(&self) -> bool {
        self.id().is_indexed()
    }

    pub fn key(&self) -> NodeKey {
        NodeKey {
            class: self.inner.class,
            node_type: Arc::clone(&self.inner.node_type),
            id: self.id(),
        }
    }

    pub(crate) fn key_ref(&self) -> KeyRef<'_> {
        KeyRef {
            class: self.inner.class,
            node_type: &self.inner.node_type,
            id: self.id(),
        }
    }

    /// Shared type string, so collections can key on it without copying.
    pub(crate) fn type_arc(&self) -> &Arc<str> {
        &self.inner.node_type
    }

    /// Set the identity if none has been assigned yet.
    pub(crate) fn assign_id(&self, id: NodeId) -> bool {
        self.inner
            .id
            .compare_exchange(0, id.0, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// True if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Arc::downgrade(&self.inner))
    }

    // ========================================================================
    // Groups
    // ========================================================================

    /// Returns true if the tag was not already present.
    pub fn add_group(&self, tag: impl Into<String>) -> bool {
        self.inner.state.write().groups.insert(tag.into())
    }

    /// Returns true if the tag was present and has been removed.
    pub fn remove_group(&self, tag: &str) -> bool {
        self.inner.state.write().groups.shift_remove(tag)
    }

    pub fn has_group(&self, tag: &str) -> bool {
        self.inner.state.read().groups.contains(tag)
    }

    pub fn group_len(&self) -> usize {
        self.inner.state.read().groups.len()
    }

    /// Tags in the order they were added.
    pub fn groups(&self) -> Vec<String> {
        self.inner.state.read().groups.iter().cloned().collect()
    }

    // ========================================================================
    // Properties
    // ========================================================================

    pub fn property(&self, key: &str) -> Option<Value> {
        self.inner.state.read().properties.get(key).cloned()
    }

    /// Set a property, returning the previous value if there was one.
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner
            .state
            .write()
            .properties
            .insert(key.into(), value.into())
    }

    pub fn remove_property(&self, key: &str) -> Option<Value> {
        self.inner.state.write().properties.remove(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.inner.state.read().properties.contains_key(key)
    }

    pub fn property_len(&self) -> usize {
        self.inner.state.read().properties.len()
    }

    pub fn property_keys(&self) -> Vec<String> {
        self.inner.state.read().properties.keys().cloned().collect()
    }

    /// Read guard over the whole property map.
    pub fn properties(&self) -> MappedRwLockReadGuard<'_, PropertyMap> {
        RwLockReadGuard::map(self.inner.state.read(), |s| &s.properties)
    }

    // ========================================================================
    // Relationships
    // ========================================================================

    /// Actions this node takes part in as a subject or object.
    pub fn actions(&self) -> Set {
        self.inner.actions.read().live()
    }

    pub(crate) fn actions_lock(&self) -> &RwLock<WeakSet> {
        &self.inner.actions
    }

    // ========================================================================
    // Class views
    // ========================================================================

    pub fn as_entity(&self) -> Option<Entity> {
        match self.inner.links {
            Links::Entity => Some(Entity::from_node(self.clone())),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<Action> {
        match &self.inner.links {
            Links::Action(ends) => Some(Action::from_parts(self.clone(), Arc::clone(ends))),
            _ => None,
        }
    }

    pub fn as_bond(&self) -> Option<Bond> {
        match &self.inner.links {
            Links::Bond(ends) => Some(Bond::from_parts(self.clone(), Arc::clone(ends))),
            _ => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("class", &self.inner.class)
            .field("type", &&*self.inner.node_type)
            .field("id", &self.id())
            .finish()
    }
}

impl AsRef<Node> for Node {
    fn as_ref(&self) -> &Node {
        self
    }
}

// ============================================================================
// WeakNode
// ============================================================================

/// Non-owning handle. Upgrades to a [`Node`] while any owner keeps it alive.
#[derive(Clone)]
pub struct WeakNode(Weak<NodeInner>);

impl WeakNode {
    pub fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(|inner| Node { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for WeakNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(node) => write!(f, "Weak({node:?})"),
            None => f.write_str("Weak(<dropped>)"),
        }
    }
}
