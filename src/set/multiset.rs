//! Multiset: identity-keyed collection that counts repeated inserts.

use super::require_indexed;
use crate::model::node::KeyRef;
use crate::model::{Node, NodeClass, NodeId, NodeKey};
use crate::storage::dense::DenseMap;
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct Multiset {
    members: DenseMap<NodeKey, Occurrence>,
    /// Sum of every member's count.
    occurrences: usize,
}

#[derive(Debug, Clone)]
struct Occurrence {
    node: Node,
    count: usize,
}

impl Multiset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `node`. Always `Ok(true)` for indexed input.
    pub fn insert(&mut self, node: &Node) -> Result<bool> {
        require_indexed(node)?;
        match self.members.get_mut(&node.key_ref()) {
            Some(occ) => occ.count += 1,
            None => {
                self.members.insert(
                    node.key(),
                    Occurrence { node: node.clone(), count: 1 },
                );
            }
        }
        self.occurrences += 1;
        Ok(true)
    }

    /// Drop one occurrence of `node`, evicting it when none remain.
    pub fn remove(&mut self, node: &Node) -> bool {
        self.decrement(node.key_ref())
    }

    pub fn remove_by(&mut self, class: NodeClass, node_type: &str, id: NodeId) -> bool {
        self.decrement(KeyRef { class, node_type, id })
    }

    pub fn find(&self, class: NodeClass, node_type: &str, id: NodeId) -> Option<&Node> {
        self.members
            .get(&KeyRef { class, node_type, id })
            .map(|occ| &occ.node)
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.members.contains_key(&node.key_ref())
    }

    /// Occurrences of `node`, 0 if absent.
    pub fn count(&self, node: &Node) -> usize {
        self.members
            .get(&node.key_ref())
            .map_or(0, |occ| occ.count)
    }

    /// Total occurrences.
    pub fn len(&self) -> usize {
        self.occurrences
    }

    /// Number of distinct identities.
    pub fn distinct_len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.occurrences = 0;
    }

    /// Distinct member at position `pos` in first-insertion order.
    pub fn get(&self, pos: usize) -> Option<&Node> {
        self.members.get_index(pos).map(|(_, occ)| &occ.node)
    }

    /// Distinct members with their occurrence counts.
    pub fn iter(&self) -> impl Iterator<Item = (&Node, usize)> {
        self.members.values().map(|occ| (&occ.node, occ.count))
    }

    fn decrement(&mut self, key: KeyRef<'_>) -> bool {
        let evict = match self.members.get_mut(&key) {
            Some(occ) => {
                occ.count -= 1;
                occ.count == 0
            }
            None => return false,
        };
        if evict {
            self.members.remove(&key);
        }
        self.occurrences -= 1;
        true
    }
}
