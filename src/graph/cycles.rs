// src/graph/cycles.rs
//! Cycle search over `(child, parent)` links.
//!
//! Roots are peeled off until nothing without a parent is left. Every node
//! that survives still has a surviving parent, so climbing parent links from
//! any of them must come back around.

use std::collections::{BTreeMap, BTreeSet};

use super::NodeId;

/// Returns one parent loop as a `child -> parent -> ...` path that repeats
/// its first node, or `None` if the links are acyclic.
///
/// The search is deterministic: it starts from the smallest looping node and
/// always climbs to the smallest surviving parent.
#[must_use]
pub fn find_cycle(links: &[(NodeId, NodeId)]) -> Option<Vec<NodeId>> {
    let parents = surviving_parents(links);
    let start = *parents.keys().next()?;

    let mut chain = vec![start];
    let mut at = start;
    loop {
        let parent = *parents.get(at)?.iter().next()?;
        if let Some(pos) = chain.iter().position(|n| *n == parent) {
            let mut cycle: Vec<NodeId> = chain.iter().skip(pos).map(|n| (*n).clone()).collect();
            cycle.push(parent.clone());
            return Some(cycle);
        }
        chain.push(parent);
        at = parent;
    }
}

/// Parent sets of the nodes left once roots are repeatedly removed.
fn surviving_parents(links: &[(NodeId, NodeId)]) -> BTreeMap<&NodeId, BTreeSet<&NodeId>> {
    let mut parents: BTreeMap<&NodeId, BTreeSet<&NodeId>> = BTreeMap::new();
    let mut children: BTreeMap<&NodeId, Vec<&NodeId>> = BTreeMap::new();
    for (child, parent) in links {
        parents.entry(child).or_default().insert(parent);
        parents.entry(parent).or_default();
        children.entry(parent).or_default().push(child);
    }

    let mut roots: Vec<&NodeId> = parents
        .iter()
        .filter(|(_, p)| p.is_empty())
        .map(|(id, _)| *id)
        .collect();
    while let Some(root) = roots.pop() {
        parents.remove(root);
        for child in children.get(root).into_iter().flatten() {
            if let Some(up) = parents.get_mut(child) {
                if up.remove(root) && up.is_empty() {
                    roots.push(*child);
                }
            }
        }
    }
    parents
}
