// src/render/tree.rs
//! Tree views of a ranked hierarchy.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId, Orientation};
use crate::rank::RankResult;

const BRANCH: &str = "├── ";
const LAST: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// How children are found and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeStyle {
    /// Children are the hierarchy's children, highest score first; roots are
    /// nodes without a parent.
    RankDescByPredecessor,
    /// Children are the hierarchy's deeper neighbors, by id; roots are
    /// level-0 nodes.
    LevelChildrenAlpha,
}

impl TreeStyle {
    /// Edge-list hierarchies use the predecessor view, indented ones the
    /// level view.
    #[must_use]
    pub fn default_for(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Bidirectional => Self::LevelChildrenAlpha,
            Orientation::ChildToParent | Orientation::ParentToChild => Self::RankDescByPredecessor,
        }
    }

    #[must_use]
    pub fn format_node(self, id: &NodeId, score: f64) -> String {
        match self {
            Self::RankDescByPredecessor => format!("[{id}] (Rank: {score:.5})"),
            Self::LevelChildrenAlpha => format!("{id} {score:.6}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub score: f64,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Builds the forest for one result.
///
/// Both styles walk the hierarchy's own links, so references never show up
/// as tree edges. Descent in the level style only moves to strictly deeper
/// nodes.
#[must_use]
pub fn build_forest(style: TreeStyle, hierarchy: &Graph, result: &RankResult) -> Vec<TreeNode> {
    let children = hierarchy.children_index();
    match style {
        TreeStyle::RankDescByPredecessor => {
            let mut path = BTreeSet::new();
            hierarchy
                .roots()
                .into_iter()
                .map(|root| predecessor_node(root, &children, result, &mut path))
                .collect()
        }
        TreeStyle::LevelChildrenAlpha => hierarchy
            .nodes()
            .filter(|(_, attrs)| attrs.level == 0)
            .map(|(id, _)| level_node(id, hierarchy, &children, result))
            .collect(),
    }
}

fn predecessor_node(
    id: NodeId,
    children: &BTreeMap<NodeId, Vec<NodeId>>,
    result: &RankResult,
    path: &mut BTreeSet<NodeId>,
) -> TreeNode {
    let score = result.score(&id);
    if !path.insert(id.clone()) {
        return TreeNode { id, score, children: Vec::new() };
    }

    let mut kids: Vec<NodeId> = children.get(&id).cloned().unwrap_or_default();
    kids.sort_by(|a, b| {
        result
            .score(b)
            .partial_cmp(&result.score(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(b))
    });
    let nodes = kids
        .into_iter()
        .map(|kid| predecessor_node(kid, children, result, path))
        .collect();

    path.remove(&id);
    TreeNode { id, score, children: nodes }
}

fn level_node(
    id: &NodeId,
    hierarchy: &Graph,
    children: &BTreeMap<NodeId, Vec<NodeId>>,
    result: &RankResult,
) -> TreeNode {
    let level = hierarchy.level(id);
    let nodes = children
        .get(id)
        .into_iter()
        .flatten()
        .filter(|kid| hierarchy.level(kid) > level)
        .map(|kid| level_node(kid, hierarchy, children, result))
        .collect();
    TreeNode {
        id: id.clone(),
        score: result.score(id),
        children: nodes,
    }
}

/// Renders a forest with box-drawing connectors, one node per line.
#[must_use]
pub fn render_text(forest: &[TreeNode], style: TreeStyle) -> String {
    let mut out = String::new();
    walk(forest, |prefix, connector, node| {
        let _ = writeln!(out, "{prefix}{connector}{}", style.format_node(&node.id, node.score));
    });
    out
}

/// Walks a forest depth-first, yielding `(prefix, connector, node)` for
/// every line. Roots get empty prefix and connector.
pub(crate) fn walk<'a>(forest: &'a [TreeNode], mut visit: impl FnMut(&str, &str, &'a TreeNode)) {
    fn go<'a>(nodes: &'a [TreeNode], prefix: &str, visit: &mut impl FnMut(&str, &str, &'a TreeNode)) {
        for (i, node) in nodes.iter().enumerate() {
            let last = i + 1 == nodes.len();
            visit(prefix, if last { LAST } else { BRANCH }, node);
            let next = format!("{prefix}{}", if last { SPACE } else { PIPE });
            go(&node.children, &next, visit);
        }
    }
    for root in forest {
        visit("", "", root);
        go(&root.children, "", &mut visit);
    }
}
