// src/graph/augment.rs
//! Builds the ranking graph: hierarchy links plus references, weighted per a
//! [`WeightPolicy`].
//!
//! The validated hierarchy is never mutated; a new graph is returned.
//! Links are read through [`Graph::parent_links`] and references are
//! deduplicated into ordered sets, so the output does not depend on the
//! order edges were supplied in.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Edge, Graph, LeafRule, NodeId, Orientation};
use crate::error::{RankError, Result};

/// Whether reference edges keep their own weight and class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMode {
    #[default]
    Distinct,
    /// References are weighted and classed exactly like hierarchy links.
    #[serde(alias = "as_hierarchy")]
    Hierarchy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightPolicy {
    pub hierarchy_weight: f64,
    pub reference_weight: f64,
    /// Applied to hierarchy links that touch a leaf.
    pub leaf_multiplier: f64,
    pub leaf_rule: LeafRule,
    /// When false every weight is 1.0.
    pub use_weights: bool,
    /// When false the hierarchy keeps its stored direction and references
    /// are inserted only as given.
    pub bidirectional: bool,
    pub reference_mode: ReferenceMode,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            hierarchy_weight: 1.0,
            reference_weight: 1.0,
            leaf_multiplier: 1.0,
            leaf_rule: LeafRule::InDegreeZero,
            use_weights: false,
            bidirectional: true,
            reference_mode: ReferenceMode::Distinct,
        }
    }
}

impl WeightPolicy {
    /// The unweighted policy that keeps edge directions as parsed.
    #[must_use]
    pub fn directional() -> Self {
        Self {
            bidirectional: false,
            ..Self::default()
        }
    }

    /// # Errors
    /// Returns `InvalidConfig` for negative or non-finite weights.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("hierarchy_weight", self.hierarchy_weight),
            ("reference_weight", self.reference_weight),
            ("leaf_multiplier", self.leaf_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RankError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    fn link_weight(&self, a: &NodeId, b: &NodeId, leaves: &BTreeSet<NodeId>) -> f64 {
        if !self.use_weights {
            return 1.0;
        }
        if leaves.contains(a) || leaves.contains(b) {
            self.hierarchy_weight * self.leaf_multiplier
        } else {
            self.hierarchy_weight
        }
    }

    fn reference_edge(&self, u: &NodeId, v: &NodeId, leaves: &BTreeSet<NodeId>) -> Edge {
        match self.reference_mode {
            ReferenceMode::Distinct if self.use_weights => Edge::reference(self.reference_weight),
            ReferenceMode::Distinct => Edge::reference(1.0),
            ReferenceMode::Hierarchy => Edge::hierarchy(self.link_weight(u, v, leaves)),
        }
    }
}

/// Merges `hierarchy` and `references` into a new ranking graph.
///
/// A relation present both as a hierarchy link and as a reference (in either
/// direction) is inserted once, as a reference.
///
/// # Errors
/// Returns `InvalidConfig` if the policy is invalid or a reference names a
/// node missing from the hierarchy.
pub fn augment(
    hierarchy: &Graph,
    references: &[(NodeId, NodeId)],
    policy: &WeightPolicy,
) -> Result<Graph> {
    policy.validate()?;
    for (u, v) in references {
        for end in [u, v] {
            if !hierarchy.contains(end) {
                return Err(RankError::config(format!(
                    "reference {u} -> {v} names unknown node {end}"
                )));
            }
        }
    }

    let refs: BTreeSet<(NodeId, NodeId)> = references.iter().cloned().collect();
    let ref_pairs: BTreeSet<(&NodeId, &NodeId)> = refs.iter().map(|(u, v)| unordered(u, v)).collect();
    let leaves = hierarchy.leaves(policy.leaf_rule);

    let orientation = if policy.bidirectional {
        Orientation::Bidirectional
    } else {
        hierarchy.orientation()
    };
    let mut out = Graph::new(orientation);
    for (id, attrs) in hierarchy.nodes() {
        out.add_node(id.clone(), attrs.clone());
    }

    let mut shadowed = 0usize;
    for (child, parent) in hierarchy.parent_links() {
        if ref_pairs.contains(&unordered(&child, &parent)) {
            shadowed += 1;
            continue;
        }
        let edge = Edge::hierarchy(policy.link_weight(&child, &parent, &leaves));
        let (down, up) = match (policy.bidirectional, hierarchy.orientation()) {
            (true, _) | (false, Orientation::Bidirectional) => (true, true),
            (false, Orientation::ChildToParent) => (false, true),
            (false, Orientation::ParentToChild) => (true, false),
        };
        if up {
            out.add_edge(child.clone(), parent.clone(), edge);
        }
        if down {
            out.add_edge(parent, child, edge);
        }
    }

    for (u, v) in &refs {
        let edge = policy.reference_edge(u, v, &leaves);
        out.add_edge(u.clone(), v.clone(), edge);
        if policy.bidirectional {
            out.add_edge(v.clone(), u.clone(), edge);
        }
    }

    debug!(
        nodes = out.node_count(),
        edges = out.edge_count(),
        references = refs.len(),
        shadowed,
        "ranking graph built"
    );
    Ok(out)
}

fn unordered<'a>(a: &'a NodeId, b: &'a NodeId) -> (&'a NodeId, &'a NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
