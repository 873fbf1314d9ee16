// src/rank/variant.rs
//! Named ranking configurations and the built-in variant sets.

use std::collections::BTreeMap;

use super::pagerank::DEFAULT_ALPHA;
use super::personalization::PersonalizationStrategy;
use crate::graph::{Graph, InputFormat, LeafRule, NodeId, WeightPolicy};

/// Mass given to each leaf by the `nstart_leaves` variant.
pub const DEFAULT_LEAF_MASS: f64 = 100.0;
/// Restart share moved onto the reinforced set by the built-in variants.
pub const DEFAULT_EXTRA: f64 = 0.3;

/// How the solver's starting vector is built.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SeedStrategy {
    #[default]
    Uniform,
    /// `mass` on every leaf, nothing elsewhere.
    Leaves { leaf_rule: LeafRule, mass: f64 },
}

impl SeedStrategy {
    /// The `nstart` map for `hierarchy`, or `None` for a uniform start.
    #[must_use]
    pub fn build(&self, hierarchy: &Graph) -> Option<BTreeMap<NodeId, f64>> {
        match self {
            Self::Uniform => None,
            Self::Leaves { leaf_rule, mass } => {
                let leaves = hierarchy.leaves(*leaf_rule);
                Some(
                    hierarchy
                        .ids()
                        .map(|id| (id.clone(), if leaves.contains(id) { *mass } else { 0.0 }))
                        .collect(),
                )
            }
        }
    }
}

/// One ranking configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: String,
    pub alpha: f64,
    pub personalization: PersonalizationStrategy,
    pub seed: SeedStrategy,
    pub weights: WeightPolicy,
}

impl Variant {
    /// Uniform restart, uniform seed, default weight policy.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alpha: DEFAULT_ALPHA,
            personalization: PersonalizationStrategy::Uniform,
            seed: SeedStrategy::Uniform,
            weights: WeightPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_personalization(mut self, strategy: PersonalizationStrategy) -> Self {
        self.personalization = strategy;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: SeedStrategy) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: WeightPolicy) -> Self {
        self.weights = weights;
        self
    }
}

/// What the built-in variant sets may draw on.
#[derive(Debug, Clone, Default)]
pub struct DefaultInputs<'a> {
    /// Label to reinforce, if any labels are configured.
    pub label: Option<&'a str>,
    pub popularity: Option<&'a BTreeMap<NodeId, f64>>,
    pub has_references: bool,
}

/// The variants run when the experiment file lists none.
#[must_use]
pub fn default_variants(format: InputFormat, inputs: &DefaultInputs<'_>) -> Vec<Variant> {
    match format {
        InputFormat::EdgeList { .. } => edge_list_defaults(inputs),
        InputFormat::Indented => indented_defaults(inputs),
    }
}

fn edge_list_defaults(inputs: &DefaultInputs<'_>) -> Vec<Variant> {
    let rule = LeafRule::InDegreeZero;
    let mut variants = vec![
        Variant::new("normal").with_weights(WeightPolicy::directional()),
        Variant::new("nstart_leaves")
            .with_seed(SeedStrategy::Leaves {
                leaf_rule: rule,
                mass: DEFAULT_LEAF_MASS,
            })
            .with_weights(WeightPolicy::directional()),
        Variant::new("leaf_reinforced")
            .with_personalization(PersonalizationStrategy::LeafReinforced {
                extra: DEFAULT_EXTRA,
                leaf_rule: rule,
            })
            .with_weights(WeightPolicy::directional()),
    ];
    if let Some(label) = inputs.label {
        variants.push(
            Variant::new("label_reinforced")
                .with_personalization(PersonalizationStrategy::LabelReinforced {
                    label: label.to_string(),
                    extra: DEFAULT_EXTRA,
                })
                .with_weights(WeightPolicy::directional()),
        );
    }
    variants
}

fn indented_defaults(inputs: &DefaultInputs<'_>) -> Vec<Variant> {
    let rule = LeafRule::MaxLevel;
    let weighted = WeightPolicy {
        use_weights: true,
        reference_weight: 3.0,
        leaf_multiplier: 2.0,
        leaf_rule: rule,
        ..WeightPolicy::default()
    };

    let mut variants = vec![
        Variant::new("baseline"),
        Variant::new("weighted").with_weights(weighted.clone()),
    ];
    if let Some(counts) = inputs.popularity.filter(|c| !c.is_empty()) {
        variants.push(Variant::new("popularity").with_personalization(
            PersonalizationStrategy::PopularityWeighted {
                counts: counts.clone(),
                leaf_rule: rule,
            },
        ));
    }
    if inputs.has_references {
        variants.push(
            Variant::new("two_phase")
                .with_personalization(PersonalizationStrategy::TwoPhaseReference)
                .with_weights(weighted),
        );
    }
    variants
}
