// src/graph/parse.rs
//! Hierarchy parsers for the two accepted input encodings.
//!
//! The caller picks the encoding; nothing here sniffs the content.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::{Edge, Graph, NodeAttrs, NodeId, Orientation};
use crate::error::{RankError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Count header, then one `a b` pair per line. Direction 0 stores
    /// `b -> a` (child to parent), direction 1 stores `a -> b`.
    EdgeList { parent_to_child: bool },
    /// One node per line, depth given by leading whitespace.
    Indented,
}

impl InputFormat {
    /// Builds an edge-list format from the numeric direction flag.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for flags other than 0 and 1.
    pub fn edge_list(flag: u8) -> Result<Self> {
        match flag {
            0 => Ok(Self::EdgeList { parent_to_child: false }),
            1 => Ok(Self::EdgeList { parent_to_child: true }),
            other => Err(RankError::config(format!(
                "edge-list direction flag must be 0 or 1, got {other}"
            ))),
        }
    }

    #[must_use]
    pub fn orientation(self) -> Orientation {
        match self {
            Self::EdgeList { parent_to_child: false } => Orientation::ChildToParent,
            Self::EdgeList { parent_to_child: true } => Orientation::ParentToChild,
            Self::Indented => Orientation::Bidirectional,
        }
    }
}

/// A line the edge-list parser dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source.
    pub line: usize,
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub graph: Graph,
    pub skipped: Vec<SkippedLine>,
}

/// Reads and parses a hierarchy file.
///
/// # Errors
/// Returns `InputNotFound` if the file does not exist, `Io` for other read
/// failures.
pub fn read(path: &Path, format: InputFormat) -> Result<ParseOutcome> {
    let content = fs::read_to_string(path).map_err(|e| RankError::from_io(e, path))?;
    debug!(path = %path.display(), ?format, "parsing hierarchy");
    Ok(parse_str(&content, format))
}

#[must_use]
pub fn parse_str(content: &str, format: InputFormat) -> ParseOutcome {
    match format {
        InputFormat::EdgeList { parent_to_child } => parse_edge_list(content, parent_to_child),
        InputFormat::Indented => ParseOutcome {
            graph: parse_indented(content),
            skipped: Vec::new(),
        },
    }
}

fn parse_edge_list(content: &str, parent_to_child: bool) -> ParseOutcome {
    let mut links = Vec::new();
    let mut skipped = Vec::new();

    // Line 1 is a legacy `<nodes> <edges>` header.
    for (idx, raw) in content.lines().enumerate().skip(1) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_pair(line) {
            Ok((a, b)) => links.push(if parent_to_child { (a, b) } else { (b, a) }),
            Err(reason) => {
                warn!(line = idx + 1, content = line, %reason, "skipping malformed edge-list line");
                skipped.push(SkippedLine {
                    line: idx + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    let orientation = if parent_to_child {
        Orientation::ParentToChild
    } else {
        Orientation::ChildToParent
    };
    let levels = depth_levels(&links, parent_to_child);

    let mut graph = Graph::new(orientation);
    for (id, level) in levels {
        graph.add_node(NodeId::Int(id), NodeAttrs::at_level(level));
    }
    for (u, v) in links {
        graph.add_edge(NodeId::Int(u), NodeId::Int(v), Edge::hierarchy(1.0));
    }

    ParseOutcome { graph, skipped }
}

fn parse_pair(line: &str) -> std::result::Result<(i64, i64), String> {
    let mut tokens = line.split_whitespace();
    let (Some(a), Some(b)) = (tokens.next(), tokens.next()) else {
        return Err("expected two node ids".to_string());
    };
    let parse = |tok: &str| {
        tok.parse::<i64>()
            .map_err(|_| format!("`{tok}` is not an integer node id"))
    };
    Ok((parse(a)?, parse(b)?))
}

/// Depth of every node along child->parent links. The first parent seen wins;
/// nodes whose parent chain loops get level 0 and are left to the validator.
fn depth_levels(links: &[(i64, i64)], parent_to_child: bool) -> BTreeMap<i64, usize> {
    let mut parent: BTreeMap<i64, i64> = BTreeMap::new();
    let mut nodes = BTreeSet::new();
    for &(u, v) in links {
        let (child, up) = if parent_to_child { (v, u) } else { (u, v) };
        parent.entry(child).or_insert(up);
        nodes.insert(u);
        nodes.insert(v);
    }
    nodes.into_iter().map(|n| (n, depth(n, &parent))).collect()
}

fn depth(start: i64, parent: &BTreeMap<i64, i64>) -> usize {
    let mut seen = BTreeSet::from([start]);
    let mut current = start;
    let mut depth = 0;
    while let Some(&up) = parent.get(&current) {
        if !seen.insert(up) {
            return 0;
        }
        depth += 1;
        current = up;
    }
    depth
}

fn parse_indented(content: &str) -> Graph {
    let mut graph = Graph::new(Orientation::Bidirectional);
    // Most recent node per level on the current root-to-line path.
    let mut open: BTreeMap<usize, NodeId> = BTreeMap::new();

    for raw in content.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let level = raw.chars().take_while(|c| c.is_whitespace()).count();
        let id = NodeId::Name(trimmed.replace("**", "").trim().to_string());

        if !graph.add_node(id.clone(), NodeAttrs::at_level(level)) {
            warn!(node = %id, level, "duplicate node name, keeping first level");
        }

        if let Some((_, parent)) = open.range(..level).next_back() {
            let parent = parent.clone();
            graph.add_edge(parent.clone(), id.clone(), Edge::hierarchy(1.0));
            graph.add_edge(id.clone(), parent, Edge::hierarchy(1.0));
        }

        open.retain(|&l, _| l < level);
        open.insert(level, id);
    }

    graph
}
