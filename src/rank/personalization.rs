// src/rank/personalization.rs
//! Restart-vector construction.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::pagerank::{self, SolverConfig};
use super::RankResult;
use crate::error::{RankError, Result};
use crate::graph::{Edge, Graph, LeafRule, NodeId, Orientation};

/// A restart distribution: non-negative entries summing to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalizationVector(BTreeMap<NodeId, f64>);

impl PersonalizationVector {
    /// Validates and normalizes raw weights.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if an entry is negative or non-finite, or if
    /// the weights sum to zero.
    pub fn from_weights(weights: BTreeMap<NodeId, f64>) -> Result<Self> {
        let mut total = 0.0;
        for (id, &w) in &weights {
            if !w.is_finite() || w < 0.0 {
                return Err(RankError::config(format!(
                    "personalization entry for {id} must be a non-negative number, got {w}"
                )));
            }
            total += w;
        }
        if total <= 0.0 {
            return Err(RankError::config("personalization must have a positive sum"));
        }
        Ok(Self(weights.into_iter().map(|(id, w)| (id, w / total)).collect()))
    }

    #[allow(clippy::cast_precision_loss)]
    fn uniform<'a>(ids: impl Iterator<Item = &'a NodeId>) -> Result<Self> {
        let ids: Vec<&NodeId> = ids.collect();
        if ids.is_empty() {
            return Ok(Self(BTreeMap::new()));
        }
        let share = 1.0 / ids.len() as f64;
        Self::from_weights(ids.into_iter().map(|id| (id.clone(), share)).collect())
    }

    #[must_use]
    pub fn get(&self, id: &NodeId) -> f64 {
        self.0.get(id).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<NodeId, f64> {
        &self.0
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersonalizationStrategy {
    Uniform,
    /// Blend of uniform and mass spread over the hierarchy's leaves.
    LeafReinforced { extra: f64, leaf_rule: LeafRule },
    /// Blend of uniform and mass spread over nodes carrying `label`.
    LabelReinforced { label: String, extra: f64 },
    /// Proportional to per-leaf counts (likes, sales, ...).
    PopularityWeighted {
        counts: BTreeMap<NodeId, f64>,
        leaf_rule: LeafRule,
    },
    /// Restart mass taken from a first solve over the references alone.
    TwoPhaseReference,
}

impl PersonalizationStrategy {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::LeafReinforced { .. } => "leaf_reinforced",
            Self::LabelReinforced { .. } => "label_reinforced",
            Self::PopularityWeighted { .. } => "popularity",
            Self::TwoPhaseReference => "two_phase",
        }
    }
}

/// Builds restart vectors over the nodes of a ranking graph.
///
/// Leaves and labels are read from the validated hierarchy; the vector
/// covers every node of `ranking`.
pub struct PersonalizationBuilder<'a> {
    hierarchy: &'a Graph,
    ranking: &'a Graph,
    references: &'a [(NodeId, NodeId)],
    solver: SolverConfig,
}

impl<'a> PersonalizationBuilder<'a> {
    #[must_use]
    pub fn new(hierarchy: &'a Graph, ranking: &'a Graph) -> Self {
        Self {
            hierarchy,
            ranking,
            references: &[],
            solver: SolverConfig::default(),
        }
    }

    /// References consumed by [`PersonalizationStrategy::TwoPhaseReference`].
    #[must_use]
    pub fn with_references(mut self, references: &'a [(NodeId, NodeId)]) -> Self {
        self.references = references;
        self
    }

    /// Solver settings for the first phase of the two-phase strategy. Weights
    /// are never used there.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = SolverConfig {
            use_weights: false,
            ..solver
        };
        self
    }

    /// # Errors
    /// Returns `InvalidConfig` if `extra` is outside `[0, 1]`, if popularity
    /// counts are negative, name unknown nodes or sum to zero on the leaves,
    /// or if the first phase of the two-phase strategy fails.
    pub fn build(&self, strategy: &PersonalizationStrategy) -> Result<PersonalizationVector> {
        self.build_with_phase(strategy).map(|(vector, _)| vector)
    }

    /// Like [`build`](Self::build), also returning the reference-only ranking
    /// when the two-phase strategy solved one.
    ///
    /// # Errors
    /// Same as [`build`](Self::build).
    pub fn build_with_phase(
        &self,
        strategy: &PersonalizationStrategy,
    ) -> Result<(PersonalizationVector, Option<RankResult>)> {
        let (vector, phase) = match strategy {
            PersonalizationStrategy::Uniform => (self.uniform()?, None),
            PersonalizationStrategy::LeafReinforced { extra, leaf_rule } => {
                let leaves = self.hierarchy.leaves(*leaf_rule);
                (self.blend(&leaves, *extra, "leaf set")?, None)
            }
            PersonalizationStrategy::LabelReinforced { label, extra } => {
                let tagged: BTreeSet<NodeId> = self
                    .hierarchy
                    .nodes()
                    .filter(|(_, a)| a.label.as_deref() == Some(label.as_str()))
                    .map(|(id, _)| id.clone())
                    .collect();
                (self.blend(&tagged, *extra, "label set")?, None)
            }
            PersonalizationStrategy::PopularityWeighted { counts, leaf_rule } => {
                (self.popularity(counts, *leaf_rule)?, None)
            }
            PersonalizationStrategy::TwoPhaseReference => self.two_phase()?,
        };
        debug!(strategy = strategy.kind(), entries = vector.len(), "personalization built");
        Ok((vector, phase))
    }

    fn uniform(&self) -> Result<PersonalizationVector> {
        PersonalizationVector::uniform(self.ranking.ids())
    }

    #[allow(clippy::cast_precision_loss)]
    fn blend(&self, targets: &BTreeSet<NodeId>, extra: f64, what: &str) -> Result<PersonalizationVector> {
        if !(0.0..=1.0).contains(&extra) {
            return Err(RankError::config(format!("extra must be in [0, 1], got {extra}")));
        }
        let targets: BTreeSet<&NodeId> = targets.iter().filter(|id| self.ranking.contains(id)).collect();
        if targets.is_empty() {
            warn!("{what} is empty, falling back to uniform personalization");
            return self.uniform();
        }

        let base = (1.0 - extra) / self.ranking.node_count() as f64;
        let boost = extra / targets.len() as f64;
        let weights = self
            .ranking
            .ids()
            .map(|id| {
                let w = if targets.contains(id) { base + boost } else { base };
                (id.clone(), w)
            })
            .collect();
        PersonalizationVector::from_weights(weights)
    }

    fn popularity(&self, counts: &BTreeMap<NodeId, f64>, rule: LeafRule) -> Result<PersonalizationVector> {
        let leaves = self.hierarchy.leaves(rule);
        let mut weights: BTreeMap<NodeId, f64> = self.ranking.ids().map(|id| (id.clone(), 0.0)).collect();
        let mut total = 0.0;

        for (id, &count) in counts {
            if !self.ranking.contains(id) {
                return Err(RankError::config(format!("popularity count names unknown node {id}")));
            }
            if !count.is_finite() || count < 0.0 {
                return Err(RankError::config(format!(
                    "popularity count for {id} must be a non-negative number, got {count}"
                )));
            }
            if !leaves.contains(id) {
                warn!(node = %id, "popularity count on a non-leaf node, ignoring");
                continue;
            }
            weights.insert(id.clone(), count);
            total += count;
        }

        if total <= 0.0 {
            return Err(RankError::config("popularity counts on leaves sum to zero"));
        }
        PersonalizationVector::from_weights(weights)
    }

    #[allow(clippy::cast_precision_loss)]
    fn two_phase(&self) -> Result<(PersonalizationVector, Option<RankResult>)> {
        if self.references.is_empty() {
            warn!("no references configured, falling back to uniform personalization");
            return Ok((self.uniform()?, None));
        }

        let mut phase_one = Graph::new(Orientation::Bidirectional);
        for (u, v) in self.references {
            if !self.ranking.contains(u) || !self.ranking.contains(v) {
                return Err(RankError::config(format!("reference {u} -> {v} names an unknown node")));
            }
            phase_one.add_edge(u.clone(), v.clone(), Edge::reference(1.0));
            phase_one.add_edge(v.clone(), u.clone(), Edge::reference(1.0));
        }
        let first = pagerank::run(&phase_one, &self.solver, None, None)?;
        debug!(
            nodes = phase_one.node_count(),
            iterations = first.iterations(),
            "reference phase solved"
        );

        let fallback = 1.0 / self.ranking.node_count() as f64;
        let weights = self
            .ranking
            .ids()
            .map(|id| {
                let w = if phase_one.contains(id) { first.score(id) } else { fallback };
                (id.clone(), w)
            })
            .collect();
        Ok((PersonalizationVector::from_weights(weights)?, Some(first)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: i64) -> NodeId {
        NodeId::Int(i)
    }

    #[test]
    fn test_from_weights_normalizes() {
        let v = PersonalizationVector::from_weights(BTreeMap::from([(n(0), 1.0), (n(1), 3.0)])).unwrap();
        assert!((v.get(&n(1)) - 0.75).abs() < 1e-12);
        assert!((v.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_weights_rejects_bad_entries() {
        assert!(PersonalizationVector::from_weights(BTreeMap::from([(n(0), -1.0), (n(1), 2.0)])).is_err());
        assert!(PersonalizationVector::from_weights(BTreeMap::from([(n(0), 0.0)])).is_err());
        assert!(PersonalizationVector::from_weights(BTreeMap::from([(n(0), f64::NAN)])).is_err());
    }

    #[test]
    fn test_extra_out_of_range() {
        let mut g = Graph::new(Orientation::ChildToParent);
        g.add_edge(n(1), n(0), Edge::hierarchy(1.0));
        let builder = PersonalizationBuilder::new(&g, &g);
        let strategy = PersonalizationStrategy::LeafReinforced {
            extra: 1.5,
            leaf_rule: LeafRule::InDegreeZero,
        };
        assert!(matches!(builder.build(&strategy), Err(RankError::InvalidConfig(_))));
    }
}
