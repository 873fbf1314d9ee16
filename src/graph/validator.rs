// src/graph/validator.rs
//! Structural check run on the parsed hierarchy before any ranking.
//!
//! A valid hierarchy is a forest: its child->parent links are acyclic and
//! no node has more than one parent. References are never part of this
//! check.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, error};

use super::cycles::find_cycle;
use super::{Graph, NodeId};

/// The invariant a hierarchy broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    /// Parent links loop back on themselves. The path repeats its first node.
    Cycle { path: Vec<NodeId> },
    /// A node has more than one parent.
    MultipleParents { node: NodeId, parents: Vec<NodeId> },
}

impl fmt::Display for StructuralViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { path } => {
                let shown: Vec<String> = path.iter().map(ToString::to_string).collect();
                write!(f, "hierarchy contains a cycle ({})", shown.join(" -> "))
            }
            Self::MultipleParents { node, parents } => {
                let shown: Vec<String> = parents.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "node {node} has {} parents ({}), expected at most one",
                    parents.len(),
                    shown.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for StructuralViolation {}

/// Checks the forest invariants, reporting the first violation found.
/// Cycles are reported before multiple parents.
///
/// # Errors
/// Returns the violated invariant with the offending node(s).
pub fn check(graph: &Graph) -> Result<(), StructuralViolation> {
    let links = graph.parent_links();

    if let Some(path) = find_cycle(&links) {
        return Err(StructuralViolation::Cycle { path });
    }

    let mut parents: BTreeMap<&NodeId, Vec<NodeId>> = BTreeMap::new();
    for (child, parent) in &links {
        parents.entry(child).or_default().push(parent.clone());
    }
    if let Some((node, parents)) = parents.into_iter().find(|(_, p)| p.len() > 1) {
        return Err(StructuralViolation::MultipleParents {
            node: node.clone(),
            parents,
        });
    }

    debug!(nodes = graph.node_count(), links = links.len(), "hierarchy is a forest");
    Ok(())
}

/// Boolean form of [`check`]; violations are logged.
#[must_use]
pub fn is_valid(graph: &Graph) -> bool {
    match check(graph) {
        Ok(()) => true,
        Err(violation) => {
            error!(%violation, "hierarchy failed validation");
            false
        }
    }
}
