// src/graph/mod.rs
//! Directed graph with per-node attributes, plus the stages that build,
//! check and augment it.
//!
//! Every map is ordered by [`NodeId`], so iteration order (and with it the
//! summation order inside the solver) depends on node ids only.

pub mod augment;
pub mod cycles;
pub mod labels;
pub mod parse;
pub mod types;
pub mod validator;

pub use augment::{augment, ReferenceMode, WeightPolicy};
pub use parse::{InputFormat, ParseOutcome, SkippedLine};
pub use types::{Edge, EdgeClass, LeafRule, NodeAttrs, NodeId, Orientation};

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, NodeAttrs>,
    succ: BTreeMap<NodeId, BTreeMap<NodeId, Edge>>,
    pred: BTreeMap<NodeId, BTreeSet<NodeId>>,
    orientation: Orientation,
}

impl Graph {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Inserts a node. An existing node keeps its attributes; returns false
    /// in that case.
    pub fn add_node(&mut self, id: NodeId, attrs: NodeAttrs) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, attrs);
        true
    }

    /// Inserts or replaces `u -> v`. Missing endpoints are created at level 0.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, edge: Edge) {
        self.add_node(u.clone(), NodeAttrs::default());
        self.add_node(v.clone(), NodeAttrs::default());
        self.pred.entry(v.clone()).or_default().insert(u.clone());
        self.succ.entry(u).or_default().insert(v, edge);
    }

    pub(crate) fn set_label(&mut self, id: &NodeId, label: String) -> bool {
        match self.nodes.get_mut(id) {
            Some(attrs) => {
                attrs.label = Some(label);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&NodeAttrs> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn level(&self, id: &NodeId) -> usize {
        self.nodes.get(id).map_or(0, |a| a.level)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.succ.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &NodeAttrs)> + '_ {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes.keys()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, &Edge)> + '_ {
        self.succ
            .iter()
            .flat_map(|(u, targets)| targets.iter().map(move |(v, e)| (u, v, e)))
    }

    #[must_use]
    pub fn edge(&self, u: &NodeId, v: &NodeId) -> Option<&Edge> {
        self.succ.get(u).and_then(|t| t.get(v))
    }

    pub fn successors<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = (&'a NodeId, &'a Edge)> + 'a {
        self.succ.get(id).into_iter().flat_map(|t| t.iter())
    }

    pub fn predecessors<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.pred.get(id).into_iter().flat_map(|p| p.iter())
    }

    #[must_use]
    pub fn out_degree(&self, id: &NodeId) -> usize {
        self.succ.get(id).map_or(0, BTreeMap::len)
    }

    #[must_use]
    pub fn in_degree(&self, id: &NodeId) -> usize {
        self.pred.get(id).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn max_level(&self) -> usize {
        self.nodes.values().map(|a| a.level).max().unwrap_or(0)
    }

    /// Hierarchy links as `(child, parent)` pairs, whatever the stored
    /// orientation.
    #[must_use]
    pub fn parent_links(&self) -> Vec<(NodeId, NodeId)> {
        let mut links = BTreeSet::new();
        for (u, v, edge) in self.edges() {
            if edge.class != EdgeClass::Hierarchy {
                continue;
            }
            match self.orientation {
                Orientation::ChildToParent => {
                    links.insert((u.clone(), v.clone()));
                }
                Orientation::ParentToChild => {
                    links.insert((v.clone(), u.clone()));
                }
                Orientation::Bidirectional => {
                    if self.level(u) > self.level(v) {
                        links.insert((u.clone(), v.clone()));
                    }
                }
            }
        }
        links.into_iter().collect()
    }

    /// Children of every node that has any, in id order.
    #[must_use]
    pub fn children_index(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut index: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for (child, parent) in self.parent_links() {
            index.entry(parent).or_default().push(child);
        }
        index
    }

    /// Nodes with no parent link.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let children: BTreeSet<NodeId> = self.parent_links().into_iter().map(|(c, _)| c).collect();
        self.ids().filter(|id| !children.contains(*id)).cloned().collect()
    }

    #[must_use]
    pub fn leaves(&self, rule: LeafRule) -> BTreeSet<NodeId> {
        match rule {
            LeafRule::InDegreeZero => {
                let parents: BTreeSet<NodeId> =
                    self.parent_links().into_iter().map(|(_, p)| p).collect();
                self.ids().filter(|id| !parents.contains(*id)).cloned().collect()
            }
            LeafRule::MaxLevel => {
                let deepest = self.max_level();
                self.nodes()
                    .filter(|(_, a)| a.level == deepest)
                    .map(|(id, _)| id.clone())
                    .collect()
            }
        }
    }

    /// Looks up a node from user-supplied text: an exact name first, then an
    /// integer id.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<NodeId> {
        let name = NodeId::from(raw);
        if self.contains(&name) {
            return Some(name);
        }
        let int = NodeId::Int(raw.trim().parse().ok()?);
        self.contains(&int).then_some(int)
    }
}
