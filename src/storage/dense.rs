//! Insertion-ordered map with O(1) keyed removal and dense positions.
//!
//! Entries live in a slot arena in insertion order. Removing one empties its
//! slot instead of shifting the tail; a Fenwick tree over slot liveness maps
//! a dense position to its slot in O(log n). Empty slots are compacted away
//! once they outnumber live entries.

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap};

/// Empty slots tolerated before compaction is considered.
const COMPACT_SLACK: usize = 64;

#[derive(Debug, Clone)]
pub(crate) struct DenseMap<K, V> {
    /// Key to slot. Its own order is meaningless.
    lookup: IndexMap<K, usize>,
    slots: Vec<Option<(K, V)>>,
    live: Fenwick,
}

impl<K, V> Default for DenseMap<K, V> {
    fn default() -> Self {
        Self {
            lookup: IndexMap::default(),
            slots: Vec::new(),
            live: Fenwick::default(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> DenseMap<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lookup: IndexMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            live: Fenwick::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.lookup.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let slot = *self.lookup.get(key)?;
        self.slots[slot].as_ref().map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let slot = *self.lookup.get(key)?;
        self.slots[slot].as_mut().map(|(_, v)| v)
    }

    /// Append `value` under `key`. Returns false, leaving the map untouched,
    /// if `key` is already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.lookup.contains_key(&key) {
            return false;
        }
        self.lookup.insert(key.clone(), self.slots.len());
        self.slots.push(Some((key, value)));
        self.live.push();
        true
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let slot = self.lookup.swap_remove(key)?;
        let (_, value) = self.slots[slot].take()?;
        self.live.clear_slot(slot);
        let empty = self.slots.len() - self.lookup.len();
        if empty > COMPACT_SLACK && empty > self.lookup.len() {
            self.compact();
        }
        Some(value)
    }

    /// Entry at dense position `pos` in insertion order.
    pub fn get_index(&self, pos: usize) -> Option<(&K, &V)> {
        if pos >= self.len() {
            return None;
        }
        let slot = if self.slots.len() == self.lookup.len() {
            pos
        } else {
            self.live.select(pos)
        };
        self.slots.get(slot)?.as_ref().map(|(k, v)| (k, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().flatten().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        for slot in &mut self.slots {
            let drop = matches!(slot, Some((k, v)) if !keep(&*k, &*v));
            if drop {
                if let Some((k, _)) = slot.take() {
                    self.lookup.swap_remove(&k);
                }
            }
        }
        self.compact();
    }

    pub fn clear(&mut self) {
        self.lookup.clear();
        self.slots.clear();
        self.live.reset(0);
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (pos, entry) in self.slots.iter().enumerate() {
            if let Some((key, _)) = entry {
                if let Some(slot) = self.lookup.get_mut(key) {
                    *slot = pos;
                }
            }
        }
        self.live.reset(self.slots.len());
    }
}

// ============================================================================
// Fenwick tree over slot liveness
// ============================================================================

/// Binary indexed tree where every slot counts 1 while live and 0 once
/// emptied. `tree[i]` holds the 1-based node `i + 1`.
#[derive(Debug, Clone, Default)]
struct Fenwick {
    tree: Vec<usize>,
}

fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl Fenwick {
    fn with_capacity(capacity: usize) -> Self {
        Self { tree: Vec::with_capacity(capacity) }
    }

    /// Live slots among the first `n`.
    fn prefix(&self, mut n: usize) -> usize {
        let mut sum = 0;
        while n > 0 {
            sum += self.tree[n - 1];
            n -= lowbit(n);
        }
        sum
    }

    /// Append a live slot.
    fn push(&mut self) {
        let i = self.tree.len() + 1;
        let covered = self.prefix(i - 1) - self.prefix(i - lowbit(i));
        self.tree.push(covered + 1);
    }

    fn clear_slot(&mut self, slot: usize) {
        let mut i = slot + 1;
        while i <= self.tree.len() {
            self.tree[i - 1] -= 1;
            i += lowbit(i);
        }
    }

    /// Slot holding the `k`-th live entry, counting from 0. `k` must be
    /// below the live count.
    fn select(&self, k: usize) -> usize {
        let n = self.tree.len();
        if n == 0 {
            return 0;
        }
        let mut pos = 0;
        let mut rem = k + 1;
        let mut step = 1usize << (usize::BITS - 1 - n.leading_zeros());
        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next - 1] < rem {
                pos = next;
                rem -= self.tree[next - 1];
            }
            step >>= 1;
        }
        pos
    }

    /// Reset to `n` live slots.
    fn reset(&mut self, n: usize) {
        self.tree.clear();
        self.tree.extend((1..=n).map(lowbit));
    }
}
