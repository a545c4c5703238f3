//! # Storage
//!
//! The identity-assigning containment hierarchy.
//!
//! | Level | Type | Keyed by | Owns |
//! |-------|------|----------|------|
//! | 1 | `Graph` | `NodeClass` | Clusters |
//! | 2 | `Cluster` | type string | Indexes |
//! | 3 | `Index` | `NodeId` | Nodes |
//!
//! Inserting an unindexed node at any level routes it down to the Index for
//! its `(NodeClass, type)`, which assigns the next id. Already-indexed nodes
//! are never re-keyed.

pub mod index;
pub mod cluster;
pub mod graph;
pub(crate) mod dense;

use serde::{Deserialize, Serialize};
use crate::Result;

pub use index::Index;
pub use cluster::Cluster;
pub use graph::{Graph, SharedGraph};

// ============================================================================
// Graph Configuration
// ============================================================================

/// Tuning knobs for a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Slots pre-allocated by each lazily created Index. Raise it for bulk
    /// loads of a known size to avoid rehashing.
    pub index_capacity: usize,
}

impl GraphConfig {
    /// Parse a JSON document such as `{"index_capacity": 100000}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
