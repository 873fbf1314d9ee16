// src/render/json.rs
use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::NodeId;
use crate::rank::{Experiment, RankResult};

#[derive(Debug, Serialize)]
pub struct VariantExport<'a> {
    pub name: &'a str,
    pub alpha: f64,
    pub personalization: &'static str,
    pub iterations: usize,
    pub converged: bool,
    pub residual: f64,
    pub scores: &'a BTreeMap<NodeId, f64>,
    /// Two-phase runs only: scores over the reference graph alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_phase: Option<&'a BTreeMap<NodeId, f64>>,
}

/// One entry per variant, in run order.
#[must_use]
pub fn export(experiment: &Experiment) -> Vec<VariantExport<'_>> {
    experiment
        .runs()
        .iter()
        .map(|run| VariantExport {
            name: &run.variant.name,
            alpha: run.variant.alpha,
            personalization: run.variant.personalization.kind(),
            iterations: run.result.iterations(),
            converged: run.result.converged(),
            residual: run.result.residual(),
            scores: run.result.scores(),
            reference_phase: run.reference_phase.as_ref().map(RankResult::scores),
        })
        .collect()
}

/// Pretty-printed JSON of [`export`].
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_string(experiment: &Experiment) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&export(experiment))
}
