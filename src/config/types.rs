// src/config/types.rs
//! Serde model of `hierank.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::graph::{LeafRule, NodeId, ReferenceMode, WeightPolicy};
use crate::render::TreeStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub solver: SolverSection,
    #[serde(default)]
    pub references: ReferenceSection,
    #[serde(default)]
    pub labels: LabelSection,
    /// Node name (or integer id as text) to count.
    #[serde(default)]
    pub popularity: BTreeMap<String, f64>,
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default, rename = "variant")]
    pub variants: Vec<VariantEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSection {
    #[serde(default = "default_tol")]
    pub tol: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self { tol: default_tol(), max_iter: default_max_iter() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceSection {
    /// Pairs of integer ids or names.
    #[serde(default)]
    pub edges: Vec<(NodeId, NodeId)>,
    /// Overrides `weights.reference_mode` of every variant.
    #[serde(default)]
    pub mode: Option<ReferenceMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelSection {
    #[serde(default)]
    pub even: Option<String>,
    #[serde(default)]
    pub odd: Option<String>,
    #[serde(default)]
    pub assign: BTreeMap<String, String>,
    /// Label boosted by the built-in `label_reinforced` variant. Falls back
    /// to `even`, then to the first assigned label.
    #[serde(default)]
    pub reinforce: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    #[serde(default)]
    pub baseline: Option<String>,
    #[serde(default)]
    pub html: Option<PathBuf>,
    #[serde(default)]
    pub json: Option<PathBuf>,
    #[serde(default)]
    pub tree_style: Option<TreeStyle>,
    #[serde(default = "default_true")]
    pub trees: bool,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            baseline: None,
            html: None,
            json: None,
            tree_style: None,
            trees: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantEntry {
    pub name: String,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default)]
    pub personalization: PersonalizationEntry,
    #[serde(default)]
    pub seed: SeedEntry,
    #[serde(default)]
    pub weights: WeightPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersonalizationEntry {
    #[default]
    Uniform,
    LeafReinforced {
        #[serde(default = "default_extra")]
        extra: f64,
        #[serde(default)]
        leaf_rule: LeafRule,
    },
    LabelReinforced {
        label: String,
        #[serde(default = "default_extra")]
        extra: f64,
    },
    /// Counts come from the `[popularity]` table.
    Popularity {
        #[serde(default)]
        leaf_rule: LeafRule,
    },
    TwoPhase,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedEntry {
    #[default]
    Uniform,
    Leaves {
        #[serde(default)]
        leaf_rule: LeafRule,
        #[serde(default = "default_mass")]
        mass: f64,
    },
}

const fn default_true() -> bool { true }
const fn default_tol() -> f64 { crate::rank::pagerank::DEFAULT_TOL }
const fn default_max_iter() -> usize { crate::rank::pagerank::DEFAULT_MAX_ITER }
const fn default_alpha() -> f64 { crate::rank::pagerank::DEFAULT_ALPHA }
const fn default_extra() -> f64 { crate::rank::variant::DEFAULT_EXTRA }
const fn default_mass() -> f64 { crate::rank::variant::DEFAULT_LEAF_MASS }
