//! # graphkit: Embeddable In-Memory Graph Store
//!
//! An entity/relationship graph kept entirely in memory, built for dense
//! object graphs (recommendation engines and the like) with heavy
//! insert/lookup traffic.
//!
//! ## Design Principles
//!
//! 1. **Three node classes**: `Entity` (data), `Action` (interaction event with
//!    many subjects and objects), `Bond` (directed edge with one subject and
//!    one object)
//! 2. **Containment hierarchy**: `Graph` → `Cluster` (per node class) →
//!    `Index` (per type string) → nodes keyed by identity
//! 3. **Identity from one place**: a node's id comes from the first `Index`
//!    that accepts it. Sets and Bond ends hold handles; Action ends and the
//!    `actions` back-references hold weak ones so relationships never cycle
//! 4. **Not found is not an error**: lookups return `Option`, removals `bool`
//!
//! ## Quick Start
//!
//! ```rust
//! use graphkit::{Graph, NodeClass, NodeId};
//!
//! # fn example() -> graphkit::Result<()> {
//! let mut graph = Graph::new();
//!
//! let ada = graph.create_entity("User")?;
//! let book = graph.create_entity("Book")?;
//! let read = graph.create_action("Read")?;
//!
//! read.add_subject(&ada)?;
//! read.add_object(&book)?;
//!
//! assert_eq!(ada.id(), NodeId(1));
//! assert!(graph.find(NodeClass::Action, "Read", read.id()).is_some());
//! assert_eq!(ada.actions().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Collections
//!
//! | Type | Assigns identity | Membership |
//! |------|------------------|------------|
//! | `Index` | yes | one `(NodeClass, type)` pair, owning |
//! | `Cluster` | yes (delegates) | one `NodeClass`, Index per type |
//! | `Graph` | yes (delegates) | Cluster per `NodeClass` |
//! | `Set` / `Multiset` | no | any indexed node |
//! | `GraphSet` / `GraphMultiset` | via bound `Graph` | any node |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod set;
pub mod hub;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Node, NodeClass, NodeId, NodeKey, WeakNode,
    Entity, Action, Bond,
    Value, PropertyMap,
};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{Index, Cluster, Graph, GraphConfig, SharedGraph};

// ============================================================================
// Re-exports: Sets
// ============================================================================

pub use set::{Set, Multiset, GraphSet, GraphMultiset};

pub use hub::Hub;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Construction error: {0}")]
    Construction(String),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
