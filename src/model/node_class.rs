//! The closed set of node classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Category of a node. Every concrete node is exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeClass {
    Entity,
    Action,
    Bond,
}

impl NodeClass {
    pub const ALL: [NodeClass; 3] = [NodeClass::Entity, NodeClass::Action, NodeClass::Bond];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeClass::Entity => "Entity",
            NodeClass::Action => "Action",
            NodeClass::Bond => "Bond",
        }
    }

    /// Stable integer code: Entity = 1, Action = 2, Bond = 3.
    /// Zero is reserved for the abstract node marker and never produced.
    pub fn code(&self) -> u8 {
        match self {
            NodeClass::Entity => 1,
            NodeClass::Action => 2,
            NodeClass::Bond => 3,
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Entity" => Ok(NodeClass::Entity),
            "Action" => Ok(NodeClass::Action),
            "Bond" => Ok(NodeClass::Bond),
            other => Err(Error::TypeMismatch {
                expected: "Entity, Action or Bond".into(),
                got: other.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for NodeClass {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(NodeClass::Entity),
            2 => Ok(NodeClass::Action),
            3 => Ok(NodeClass::Bond),
            other => Err(Error::TypeMismatch {
                expected: "node class code 1..=3".into(),
                got: other.to_string(),
            }),
        }
    }
}
