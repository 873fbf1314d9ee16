// tests/unit_config.rs
use hierank_core::config::{Config, PersonalizationEntry, SeedEntry};
use hierank_core::graph::parse::parse_str;
use hierank_core::graph::{Graph, InputFormat, LeafRule, NodeId, ReferenceMode};
use hierank_core::rank::{PersonalizationStrategy, SeedStrategy};
use hierank_core::render::TreeStyle;
use hierank_core::RankError;
use std::fs;
use std::path::Path;

fn parse(toml: &str) -> Config {
    Config::parse(toml, Path::new("hierank.toml")).unwrap()
}

fn books() -> Graph {
    let text = "Fiction\n  Mystery\n    Historical mystery\n    Cozy mystery\n  Fantasy\n    Epic fantasy\n";
    parse_str(text, InputFormat::Indented).graph
}

fn numbers() -> Graph {
    parse_str("4 3\n0 1\n0 2\n1 3\n", InputFormat::edge_list(0).unwrap()).graph
}

#[test]
fn test_full_file() {
    let config = parse(
        r#"
[solver]
tol = 1e-6
max_iter = 50

[references]
edges = [["Historical mystery", "Epic fantasy"]]
mode = "hierarchy"

[popularity]
"Cozy mystery" = 500
"Epic fantasy" = 120.5

[report]
baseline = "base"
tree_style = "level_children_alpha"
trees = false

[[variant]]
name = "base"

[[variant]]
name = "boosted"
alpha = 0.9
personalization = { kind = "leaf_reinforced", extra = 0.4, leaf_rule = "max_level" }
seed = { kind = "leaves", mass = 10.0 }
weights = { use_weights = true, reference_weight = 3.0, leaf_multiplier = 2.0 }

[[variant]]
name = "liked"
personalization = { kind = "popularity", leaf_rule = "max_level" }
"#,
    );
    assert_eq!(config.solver.max_iter, 50);
    assert_eq!(config.report.tree_style, Some(TreeStyle::LevelChildrenAlpha));
    assert!(!config.report.trees);
    assert_eq!(
        config.variants[1].personalization,
        PersonalizationEntry::LeafReinforced { extra: 0.4, leaf_rule: LeafRule::MaxLevel }
    );
    assert_eq!(config.variants[1].seed, SeedEntry::Leaves { leaf_rule: LeafRule::InDegreeZero, mass: 10.0 });

    let plan = config.resolve(&books(), InputFormat::Indented).unwrap();
    assert_eq!(plan.solver.tol, 1e-6);
    assert_eq!(plan.references, vec![(NodeId::from("Historical mystery"), NodeId::from("Epic fantasy"))]);
    assert_eq!(plan.variants.len(), 3);
    assert!(plan.variants.iter().all(|v| v.weights.reference_mode == ReferenceMode::Hierarchy));

    let boosted = &plan.variants[1];
    assert_eq!(boosted.alpha, 0.9);
    assert!(boosted.weights.use_weights);
    assert_eq!(boosted.weights.reference_weight, 3.0);
    assert_eq!(boosted.weights.hierarchy_weight, 1.0);
    assert!(matches!(boosted.seed, SeedStrategy::Leaves { mass, .. } if mass == 10.0));

    match &plan.variants[2].personalization {
        PersonalizationStrategy::PopularityWeighted { counts, .. } => {
            assert_eq!(counts[&NodeId::from("Cozy mystery")], 500.0);
            assert_eq!(counts.len(), 2);
        }
        other => panic!("unexpected strategy {other:?}"),
    }
}

#[test]
fn test_integer_and_string_keys() {
    let config = parse(
        r#"
[references]
edges = [[3, 2], ["1", "2"]]

[labels]
even = "important"
assign = { "3" = "special" }
"#,
    );
    let plan = config.resolve(&numbers(), InputFormat::edge_list(0).unwrap()).unwrap();
    assert_eq!(
        plan.references,
        vec![(NodeId::Int(3), NodeId::Int(2)), (NodeId::Int(1), NodeId::Int(2))]
    );
    assert_eq!(plan.labels.assign[&NodeId::Int(3)], "special");
    // No [[variant]]: the edge-list defaults, with the label variant.
    let names: Vec<&str> = plan.variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["normal", "nstart_leaves", "leaf_reinforced", "label_reinforced"]);
}

#[test]
fn test_unknown_node_rejected() {
    let config = parse("[references]\nedges = [[1, 99]]\n");
    let err = config.resolve(&numbers(), InputFormat::edge_list(0).unwrap()).unwrap_err();
    assert!(matches!(err, RankError::InvalidConfig(_)));

    let config = parse("[popularity]\n\"Poetry\" = 3\n");
    assert!(config.resolve(&books(), InputFormat::Indented).is_err());
}

#[test]
fn test_indented_defaults() {
    let config = parse("[references]\nedges = [[\"Cozy mystery\", \"Epic fantasy\"]]\n[popularity]\n\"Cozy mystery\" = 3\n");
    let plan = config.resolve(&books(), InputFormat::Indented).unwrap();
    let names: Vec<&str> = plan.variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["baseline", "weighted", "popularity", "two_phase"]);
}

#[test]
fn test_load_missing_default_and_explicit() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(Config::load(Some(&missing)), Err(RankError::ConfigFile { .. })));

    let path = dir.path().join("hierank.toml");
    fs::write(&path, "[solver]\nmax_iter = 7\n").unwrap();
    assert_eq!(Config::load(Some(&path)).unwrap().solver.max_iter, 7);
}

#[test]
fn test_unknown_kind_is_malformed() {
    let err = Config::parse("[[variant]]\nname = \"x\"\npersonalization = { kind = \"magic\" }\n", Path::new("h.toml"))
        .unwrap_err();
    assert!(matches!(err, RankError::ConfigFile { .. }));
}
