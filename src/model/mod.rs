//! # Node Model
//!
//! The three node classes and the identity, tag and property behavior they
//! share. A `Node` is a cheap shared handle; `Entity`, `Action` and `Bond`
//! are typed views over it that add class-specific relationship ends.
//!
//! Design rule: no storage here. Collections live in `storage` and `set`.

pub mod node_class;
pub mod node;
pub mod entity;
pub mod action;
pub mod bond;
pub mod value;

pub use node_class::NodeClass;
pub use node::{Node, NodeId, NodeKey, WeakNode};
pub use entity::Entity;
pub use action::Action;
pub use bond::Bond;
pub use value::{PropertyMap, Value};
