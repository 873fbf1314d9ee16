// src/rank/mod.rs
//! Ranking pipeline: label pass, validation, then augment, personalize and
//! solve once per variant.

pub mod pagerank;
pub mod personalization;
pub mod result;
pub mod variant;

pub use pagerank::SolverConfig;
pub use personalization::{PersonalizationBuilder, PersonalizationStrategy, PersonalizationVector};
pub use result::RankResult;
pub use variant::{default_variants, DefaultInputs, SeedStrategy, Variant};

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::error::{RankError, Result};
use crate::graph::labels::{assign_labels, LabelRule};
use crate::graph::{augment, validator, Graph, NodeId};

/// Output of one variant: the graph it ranked and the scores.
#[derive(Debug, Clone)]
pub struct VariantRun {
    pub variant: Variant,
    pub graph: Graph,
    pub result: RankResult,
    /// Scores over the bidirectional reference graph, for two-phase runs.
    pub reference_phase: Option<RankResult>,
}

/// Every variant run against one validated hierarchy.
#[derive(Debug, Clone)]
pub struct Experiment {
    hierarchy: Graph,
    runs: Vec<VariantRun>,
}

impl Experiment {
    /// The labelled, validated hierarchy the variants were derived from.
    #[must_use]
    pub fn hierarchy(&self) -> &Graph {
        &self.hierarchy
    }

    #[must_use]
    pub fn runs(&self) -> &[VariantRun] {
        &self.runs
    }

    #[must_use]
    pub fn run(&self, name: &str) -> Option<&VariantRun> {
        self.runs.iter().find(|r| r.variant.name == name)
    }
}

/// Orchestrates the ranking stages.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    solver: SolverConfig,
    references: Vec<(NodeId, NodeId)>,
    labels: LabelRule,
}

impl Engine {
    /// `alpha` and `use_weights` of `solver` are overridden per variant.
    #[must_use]
    pub fn new(solver: SolverConfig) -> Self {
        Self {
            solver,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_references(mut self, references: Vec<(NodeId, NodeId)>) -> Self {
        self.references = references;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelRule) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn references(&self) -> &[(NodeId, NodeId)] {
        &self.references
    }

    /// Applies labels and validates the hierarchy.
    ///
    /// # Errors
    /// Returns `StructuralInvalid` on a cycle or a node with several parents.
    pub fn prepare(&self, parsed: &Graph) -> Result<Graph> {
        let hierarchy = if self.labels.is_empty() {
            parsed.clone()
        } else {
            assign_labels(parsed, &self.labels)
        };
        validator::check(&hierarchy)?;
        debug!(
            nodes = hierarchy.node_count(),
            edges = hierarchy.edge_count(),
            "hierarchy validated"
        );
        Ok(hierarchy)
    }

    /// Augments, personalizes and solves one variant on a prepared hierarchy.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for invalid weights, restart or seed vectors,
    /// or solver settings.
    pub fn run_variant(&self, hierarchy: &Graph, variant: &Variant) -> Result<VariantRun> {
        let ranking = augment(hierarchy, &self.references, &variant.weights)?;
        let solver = SolverConfig {
            alpha: variant.alpha,
            use_weights: variant.weights.use_weights,
            ..self.solver
        };

        let (personalization, reference_phase) = PersonalizationBuilder::new(hierarchy, &ranking)
            .with_references(&self.references)
            .with_solver(solver)
            .build_with_phase(&variant.personalization)?;
        let nstart = variant.seed.build(hierarchy);

        let result = pagerank::run(&ranking, &solver, Some(&personalization), nstart.as_ref())?;
        info!(
            variant = %variant.name,
            iterations = result.iterations(),
            converged = result.converged(),
            "variant ranked"
        );
        Ok(VariantRun {
            variant: variant.clone(),
            graph: ranking,
            result,
            reference_phase,
        })
    }

    /// Runs the full pipeline for every variant, in order.
    ///
    /// # Errors
    /// Returns `StructuralInvalid` before any solve if the hierarchy is
    /// invalid, and `InvalidConfig` for an empty or ambiguous variant list or
    /// any failing variant.
    pub fn run(&self, parsed: &Graph, variants: &[Variant]) -> Result<Experiment> {
        if variants.is_empty() {
            return Err(RankError::config("no variants to run"));
        }
        let mut seen = BTreeSet::new();
        for v in variants {
            if !seen.insert(v.name.as_str()) {
                return Err(RankError::config(format!("duplicate variant name '{}'", v.name)));
            }
        }

        let hierarchy = self.prepare(parsed)?;
        let runs = variants
            .iter()
            .map(|v| self.run_variant(&hierarchy, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Experiment { hierarchy, runs })
    }
}
