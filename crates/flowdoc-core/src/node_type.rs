//! The closed set of node types a process-flow step can carry.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type tag of a flow node, controlling its shape and fill color.
///
/// The variant order is the canonical order used by legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    Process,
    Decision,
    Action,
    End,
}

impl NodeType {
    /// All node types in canonical order.
    pub const ALL: [NodeType; 5] = [
        NodeType::Start,
        NodeType::Process,
        NodeType::Decision,
        NodeType::Action,
        NodeType::End,
    ];

    /// Returns the lowercase name used in definitions and configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Process => "process",
            Self::Decision => "decision",
            Self::Action => "action",
            Self::End => "end",
        }
    }
}

/// Error returned when parsing an unknown node type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node type `{0}`, valid values: start, process, decision, action, end")]
pub struct UnknownNodeType(pub String);

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|node_type| node_type.name() == s)
            .ok_or_else(|| UnknownNodeType(s.to_string()))
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
