// src/config/mod.rs
pub mod types;

pub use self::types::{
    Config, LabelSection, PersonalizationEntry, ReferenceSection, ReportSection, SeedEntry,
    SolverSection, VariantEntry,
};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RankError, Result};
use crate::graph::labels::LabelRule;
use crate::graph::{Graph, InputFormat, NodeId};
use crate::rank::{
    default_variants, DefaultInputs, Engine, PersonalizationStrategy, SeedStrategy, SolverConfig,
    Variant,
};

pub const CONFIG_FILE: &str = "hierank.toml";

/// A config resolved against a parsed hierarchy.
#[derive(Debug, Clone)]
pub struct Plan {
    pub solver: SolverConfig,
    pub references: Vec<(NodeId, NodeId)>,
    pub labels: LabelRule,
    pub variants: Vec<Variant>,
    pub report: ReportSection,
}

impl Plan {
    #[must_use]
    pub fn engine(&self) -> Engine {
        Engine::new(self.solver)
            .with_references(self.references.clone())
            .with_labels(self.labels.clone())
    }
}

impl Config {
    /// Loads `path`, or `hierank.toml` from the working directory when no
    /// path is given. A missing default file yields the built-in defaults.
    ///
    /// # Errors
    /// Returns `ConfigFile` if an explicit path cannot be read or any file
    /// fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            debug!("no {CONFIG_FILE} found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| RankError::ConfigFile {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Self::parse(&content, &path)
    }

    /// # Errors
    /// Returns `ConfigFile` on malformed TOML.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| RankError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(
            path = %path.display(),
            variants = config.variants.len(),
            references = config.references.edges.len(),
            "experiment file loaded"
        );
        Ok(config)
    }

    /// Resolves node keys against `graph` and builds the variant list.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a reference, label assignment or
    /// popularity key names a node missing from `graph`.
    pub fn resolve(&self, graph: &Graph, format: InputFormat) -> Result<Plan> {
        let references = self
            .references
            .edges
            .iter()
            .map(|(u, v)| Ok((resolve_id(graph, u, "reference")?, resolve_id(graph, v, "reference")?)))
            .collect::<Result<Vec<_>>>()?;

        let labels = self.label_rule(graph)?;
        let popularity = self
            .popularity
            .iter()
            .map(|(key, &count)| Ok((resolve_key(graph, key, "popularity")?, count)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let mut variants = if self.variants.is_empty() {
            let label = self
                .labels
                .reinforce
                .as_deref()
                .or(self.labels.even.as_deref())
                .or_else(|| self.labels.assign.values().next().map(String::as_str));
            let inputs = DefaultInputs {
                label,
                popularity: Some(&popularity),
                has_references: !references.is_empty(),
            };
            default_variants(format, &inputs)
        } else {
            self.variants.iter().map(|entry| entry.to_variant(&popularity)).collect()
        };
        if let Some(mode) = self.references.mode {
            for v in &mut variants {
                v.weights.reference_mode = mode;
            }
        }

        Ok(Plan {
            solver: SolverConfig {
                tol: self.solver.tol,
                max_iter: self.solver.max_iter,
                ..SolverConfig::default()
            },
            references,
            labels,
            variants,
            report: self.report.clone(),
        })
    }

    fn label_rule(&self, graph: &Graph) -> Result<LabelRule> {
        let assign = self
            .labels
            .assign
            .iter()
            .map(|(key, label)| Ok((resolve_key(graph, key, "label assignment")?, label.clone())))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(LabelRule {
            even: self.labels.even.clone(),
            odd: self.labels.odd.clone(),
            assign,
        })
    }
}

impl VariantEntry {
    #[must_use]
    pub fn to_variant(&self, popularity: &BTreeMap<NodeId, f64>) -> Variant {
        let personalization = match &self.personalization {
            PersonalizationEntry::Uniform => PersonalizationStrategy::Uniform,
            PersonalizationEntry::LeafReinforced { extra, leaf_rule } => {
                PersonalizationStrategy::LeafReinforced { extra: *extra, leaf_rule: *leaf_rule }
            }
            PersonalizationEntry::LabelReinforced { label, extra } => {
                PersonalizationStrategy::LabelReinforced { label: label.clone(), extra: *extra }
            }
            PersonalizationEntry::Popularity { leaf_rule } => PersonalizationStrategy::PopularityWeighted {
                counts: popularity.clone(),
                leaf_rule: *leaf_rule,
            },
            PersonalizationEntry::TwoPhase => PersonalizationStrategy::TwoPhaseReference,
        };
        let seed = match self.seed {
            SeedEntry::Uniform => SeedStrategy::Uniform,
            SeedEntry::Leaves { leaf_rule, mass } => SeedStrategy::Leaves { leaf_rule, mass },
        };
        Variant::new(self.name.clone())
            .with_alpha(self.alpha)
            .with_personalization(personalization)
            .with_seed(seed)
            .with_weights(self.weights.clone())
    }
}

/// Matches a TOML value to a node: as given, then through its other form.
fn resolve_id(graph: &Graph, id: &NodeId, what: &str) -> Result<NodeId> {
    if graph.contains(id) {
        return Ok(id.clone());
    }
    let alternate = match id {
        NodeId::Int(i) => graph.resolve(&i.to_string()),
        NodeId::Name(s) => graph.resolve(s),
    };
    alternate.ok_or_else(|| RankError::config(format!("{what} names unknown node {id}")))
}

fn resolve_key(graph: &Graph, key: &str, what: &str) -> Result<NodeId> {
    graph
        .resolve(key)
        .ok_or_else(|| RankError::config(format!("{what} names unknown node {key}")))
}
