// src/rank/result.rs
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::graph::NodeId;

/// Scores produced by one solver run. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RankResult {
    scores: BTreeMap<NodeId, f64>,
    iterations: usize,
    converged: bool,
    residual: f64,
}

impl RankResult {
    pub(crate) fn new(
        scores: BTreeMap<NodeId, f64>,
        iterations: usize,
        converged: bool,
        residual: f64,
    ) -> Self {
        Self { scores, iterations, converged, residual }
    }

    /// Score of `id`, 0.0 when the node is absent.
    #[must_use]
    pub fn score(&self, id: &NodeId) -> f64 {
        self.scores.get(id).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn scores(&self) -> &BTreeMap<NodeId, f64> {
        &self.scores
    }

    /// Nodes by descending score, ties broken by id.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&NodeId, f64)> {
        let mut ranked: Vec<_> = self.scores.iter().map(|(id, s)| (id, *s)).collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// L1 distance between the last two iterates.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.residual
    }
}
