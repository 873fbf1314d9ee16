// src/graph/types.rs
//! Core value types shared by every pipeline stage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node. Edge-list inputs produce integers, indented inputs
/// produce names.
///
/// Ordering puts every integer before every name; integers compare
/// numerically and names byte-wise, which is the order trees and tables use
/// to break ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Name(String),
}

impl NodeId {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Name(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

/// Per-node attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeAttrs {
    /// Depth in the hierarchy, 0 for roots.
    pub level: usize,
    pub label: Option<String>,
    pub likes: Option<f64>,
}

impl NodeAttrs {
    #[must_use]
    pub fn at_level(level: usize) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeClass {
    Hierarchy,
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub weight: f64,
    pub class: EdgeClass,
}

impl Edge {
    #[must_use]
    pub fn hierarchy(weight: f64) -> Self {
        Self { weight, class: EdgeClass::Hierarchy }
    }

    #[must_use]
    pub fn reference(weight: f64) -> Self {
        Self { weight, class: EdgeClass::Reference }
    }
}

/// How a hierarchy graph stores its parent links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Edge-list input with direction flag 0: `child -> parent`.
    #[default]
    ChildToParent,
    /// Edge-list input with direction flag 1: `parent -> child`.
    ParentToChild,
    /// Indented input: both directions, parent is the shallower endpoint.
    Bidirectional,
}

/// Which nodes count as leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafRule {
    /// No incoming link in the child->parent view, i.e. no children.
    #[default]
    InDegreeZero,
    /// Nodes sitting on the deepest level of the hierarchy.
    MaxLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_ints_before_names() {
        let mut ids = vec![
            NodeId::from("beta"),
            NodeId::Int(10),
            NodeId::from("Alpha"),
            NodeId::Int(2),
        ];
        ids.sort();
        let shown: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["2", "10", "Alpha", "beta"]);
    }

    #[test]
    fn test_untagged_serde() {
        let ids: Vec<NodeId> = serde_json::from_str(r#"[3, "Noir crime"]"#).unwrap();
        assert_eq!(ids, vec![NodeId::Int(3), NodeId::from("Noir crime")]);
    }
}
