// src/rank/pagerank.rs
//! Power-iteration `PageRank` with personalization, seeding and edge weights.
//!
//! Dangling nodes hand their mass back through the teleport vector on every
//! iteration, so the operator stays stochastic. The seed only changes how
//! many iterations convergence takes, never the fixed point.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::personalization::PersonalizationVector;
use super::result::RankResult;
use crate::error::{RankError, Result};
use crate::graph::{Graph, NodeId};

pub const DEFAULT_ALPHA: f64 = 0.85;
pub const DEFAULT_TOL: f64 = 1e-8;
pub const DEFAULT_MAX_ITER: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Damping factor, in `[0, 1)`.
    pub alpha: f64,
    /// Per-node tolerance; the run stops once the L1 step is below `tol * N`.
    pub tol: f64,
    pub max_iter: usize,
    /// Use edge weights for transition probabilities instead of 1.0.
    pub use_weights: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            tol: DEFAULT_TOL,
            max_iter: DEFAULT_MAX_ITER,
            use_weights: false,
        }
    }
}

impl SolverConfig {
    /// # Errors
    /// Returns `InvalidConfig` if `alpha` is outside `[0, 1)` or `tol` is not
    /// a positive number.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.alpha) {
            return Err(RankError::config(format!(
                "alpha must be in [0, 1), got {}",
                self.alpha
            )));
        }
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err(RankError::config(format!(
                "tol must be a positive number, got {}",
                self.tol
            )));
        }
        Ok(())
    }
}

/// Computes `PageRank` scores for every node of `graph`.
///
/// All inputs are checked before the first iteration. Reaching `max_iter`
/// is not an error: the last iterate is returned with `converged() == false`.
///
/// # Errors
/// Returns `InvalidConfig` for an invalid config, a negative or non-finite
/// edge weight, or a personalization/seed vector that names unknown nodes,
/// holds negative entries or sums to zero.
pub fn run(
    graph: &Graph,
    config: &SolverConfig,
    personalization: Option<&PersonalizationVector>,
    nstart: Option<&BTreeMap<NodeId, f64>>,
) -> Result<RankResult> {
    config.validate()?;

    let nodes: Vec<&NodeId> = graph.ids().collect();
    let index: BTreeMap<&NodeId, usize> = nodes.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let transitions = Transitions::build(graph, &index, config.use_weights)?;

    let teleport = match personalization {
        Some(p) => dense(p.as_map(), &index, "personalization")?,
        None => uniform(nodes.len()),
    };
    let mut ranks = match nstart {
        Some(seed) => dense(seed, &index, "nstart")?,
        None => uniform(nodes.len()),
    };

    if nodes.is_empty() {
        return Ok(RankResult::new(BTreeMap::new(), 0, true, 0.0));
    }

    #[allow(clippy::cast_precision_loss)]
    let threshold = config.tol * nodes.len() as f64;
    let mut residual = f64::INFINITY;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        let next = iterate_once(&ranks, &transitions, &teleport, config.alpha);
        residual = l1_distance(&ranks, &next);
        ranks = next;
        if residual < threshold {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, residual, "pagerank converged");
    } else {
        warn!(
            max_iter = config.max_iter,
            residual,
            "pagerank did not converge, returning last iterate"
        );
    }

    let scores = nodes.into_iter().cloned().zip(ranks).collect();
    Ok(RankResult::new(scores, iterations, converged, residual))
}

/// Row-normalized adjacency, by node index.
struct Transitions {
    rows: Vec<Vec<(usize, f64)>>,
    dangling: Vec<usize>,
}

impl Transitions {
    fn build(graph: &Graph, index: &BTreeMap<&NodeId, usize>, use_weights: bool) -> Result<Self> {
        let mut rows = vec![Vec::new(); index.len()];
        let mut dangling = Vec::new();

        for (id, &i) in index {
            let mut out = Vec::new();
            for (target, edge) in graph.successors(id) {
                if !edge.weight.is_finite() || edge.weight < 0.0 {
                    return Err(RankError::config(format!(
                        "edge {id} -> {target} has invalid weight {}",
                        edge.weight
                    )));
                }
                let w = if use_weights { edge.weight } else { 1.0 };
                if let Some(&j) = index.get(target) {
                    out.push((j, w));
                }
            }
            let total: f64 = out.iter().map(|(_, w)| w).sum();
            if total > 0.0 {
                rows[i] = out.into_iter().map(|(j, w)| (j, w / total)).collect();
            } else {
                dangling.push(i);
            }
        }

        Ok(Self { rows, dangling })
    }
}

fn iterate_once(ranks: &[f64], transitions: &Transitions, teleport: &[f64], alpha: f64) -> Vec<f64> {
    let dangling_mass: f64 = transitions.dangling.iter().map(|&i| ranks[i]).sum();
    let mut next = vec![0.0; ranks.len()];

    for (u, row) in transitions.rows.iter().enumerate() {
        let share = alpha * ranks[u];
        for &(v, p) in row {
            next[v] += share * p;
        }
    }

    let restart = alpha * dangling_mass + (1.0 - alpha);
    for (v, t) in teleport.iter().enumerate() {
        next[v] += restart * t;
    }
    next
}

fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

#[allow(clippy::cast_precision_loss)]
fn uniform(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Expands a sparse vector to node order and normalizes it to sum 1.
fn dense(
    values: &BTreeMap<NodeId, f64>,
    index: &BTreeMap<&NodeId, usize>,
    what: &str,
) -> Result<Vec<f64>> {
    let mut out = vec![0.0; index.len()];
    for (id, &value) in values {
        let Some(&i) = index.get(id) else {
            return Err(RankError::config(format!("{what} references unknown node {id}")));
        };
        if !value.is_finite() || value < 0.0 {
            return Err(RankError::config(format!(
                "{what} entry for {id} must be a non-negative number, got {value}"
            )));
        }
        out[i] = value;
    }
    let total: f64 = out.iter().sum();
    if !index.is_empty() && total <= 0.0 {
        return Err(RankError::config(format!("{what} must have a positive sum")));
    }
    if total > 0.0 {
        for v in &mut out {
            *v /= total;
        }
    }
    Ok(out)
}
