// src/graph/labels.rs
//! Label-assignment pass. The only stage allowed to touch node attributes
//! after parsing, and it only writes `label`.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{Graph, NodeId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelRule {
    /// Label for integer ids divisible by two.
    pub even: Option<String>,
    /// Label for the remaining integer ids.
    pub odd: Option<String>,
    /// Explicit labels; these win over the parity labels.
    pub assign: BTreeMap<NodeId, String>,
}

impl LabelRule {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.even.is_none() && self.odd.is_none() && self.assign.is_empty()
    }

    fn label_for(&self, id: &NodeId) -> Option<&String> {
        if let Some(explicit) = self.assign.get(id) {
            return Some(explicit);
        }
        let int = id.as_int()?;
        if int % 2 == 0 {
            self.even.as_ref()
        } else {
            self.odd.as_ref()
        }
    }
}

/// Returns a copy of `graph` with labels applied.
#[must_use]
pub fn assign_labels(graph: &Graph, rule: &LabelRule) -> Graph {
    let mut labelled = graph.clone();
    for id in rule.assign.keys() {
        if !graph.contains(id) {
            warn!(node = %id, "label assigned to unknown node, ignoring");
        }
    }

    let ids: Vec<NodeId> = graph.ids().cloned().collect();
    let mut applied = 0usize;
    for id in ids {
        if let Some(label) = rule.label_for(&id) {
            labelled.set_label(&id, label.clone());
            applied += 1;
        }
    }
    debug!(applied, "labels assigned");
    labelled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Orientation};

    #[test]
    fn test_parity_and_explicit() {
        let mut g = Graph::new(Orientation::ChildToParent);
        g.add_edge(NodeId::Int(1), NodeId::Int(0), Edge::hierarchy(1.0));
        g.add_edge(NodeId::Int(2), NodeId::Int(0), Edge::hierarchy(1.0));
        let rule = LabelRule {
            even: Some("important".into()),
            odd: Some("normal".into()),
            assign: BTreeMap::from([(NodeId::Int(2), "special".to_string())]),
        };
        let out = assign_labels(&g, &rule);
        let label = |i: i64| out.node(&NodeId::Int(i)).and_then(|a| a.label.clone());
        assert_eq!(label(0).as_deref(), Some("important"));
        assert_eq!(label(1).as_deref(), Some("normal"));
        assert_eq!(label(2).as_deref(), Some("special"));
        assert!(g.node(&NodeId::Int(0)).and_then(|a| a.label.clone()).is_none());
    }
}
