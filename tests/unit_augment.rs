// tests/unit_augment.rs
use hierank_core::graph::parse::parse_str;
use hierank_core::graph::{
    augment, EdgeClass, Graph, InputFormat, LeafRule, NodeId, ReferenceMode, WeightPolicy,
};
use hierank_core::RankError;

fn n(s: &str) -> NodeId {
    NodeId::from(s)
}

fn books() -> Graph {
    let text = "\
Fiction
  Mystery
    Cozy mystery
    Detective mystery
  Fantasy
    Epic fantasy
";
    parse_str(text, InputFormat::Indented).graph
}

fn weighted() -> WeightPolicy {
    WeightPolicy {
        use_weights: true,
        hierarchy_weight: 1.0,
        reference_weight: 3.0,
        leaf_multiplier: 2.0,
        leaf_rule: LeafRule::MaxLevel,
        ..WeightPolicy::default()
    }
}

fn edge_weights(g: &Graph) -> Vec<(NodeId, NodeId, f64, EdgeClass)> {
    g.edges().map(|(u, v, e)| (u.clone(), v.clone(), e.weight, e.class)).collect()
}

#[test]
fn test_bidirectional_weights() {
    let out = augment(&books(), &[], &weighted()).unwrap();
    assert_eq!(out.node_count(), 6);
    assert_eq!(out.edge_count(), 10);
    assert_eq!(out.edge(&n("Mystery"), &n("Cozy mystery")).map(|e| e.weight), Some(2.0));
    assert_eq!(out.edge(&n("Cozy mystery"), &n("Mystery")).map(|e| e.weight), Some(2.0));
    assert_eq!(out.edge(&n("Fiction"), &n("Mystery")).map(|e| e.weight), Some(1.0));
}

#[test]
fn test_unweighted_collapses_to_one() {
    let policy = WeightPolicy { use_weights: false, ..weighted() };
    let refs = vec![(n("Cozy mystery"), n("Epic fantasy"))];
    let out = augment(&books(), &refs, &policy).unwrap();
    assert!(out.edges().all(|(_, _, e)| (e.weight - 1.0).abs() < f64::EPSILON));
}

#[test]
fn test_reference_order_and_duplicates_ignored() {
    let a = vec![(n("Cozy mystery"), n("Epic fantasy")), (n("Detective mystery"), n("Fantasy"))];
    let b = vec![
        (n("Detective mystery"), n("Fantasy")),
        (n("Cozy mystery"), n("Epic fantasy")),
        (n("Detective mystery"), n("Fantasy")),
    ];
    let ga = augment(&books(), &a, &weighted()).unwrap();
    let gb = augment(&books(), &b, &weighted()).unwrap();
    assert_eq!(edge_weights(&ga), edge_weights(&gb));
}

#[test]
fn test_reference_over_hierarchy_takes_reference_weight() {
    let refs = vec![(n("Cozy mystery"), n("Mystery"))];
    let out = augment(&books(), &refs, &weighted()).unwrap();
    for (u, v) in [("Cozy mystery", "Mystery"), ("Mystery", "Cozy mystery")] {
        let edge = out.edge(&n(u), &n(v)).unwrap();
        assert_eq!(edge.weight, 3.0);
        assert_eq!(edge.class, EdgeClass::Reference);
    }
    assert_eq!(out.edge_count(), 10);
}

#[test]
fn test_reference_mode_hierarchy() {
    let policy = WeightPolicy {
        reference_mode: ReferenceMode::Hierarchy,
        ..weighted()
    };
    let refs = vec![(n("Cozy mystery"), n("Epic fantasy"))];
    let out = augment(&books(), &refs, &policy).unwrap();
    let edge = out.edge(&n("Cozy mystery"), &n("Epic fantasy")).unwrap();
    assert_eq!(edge.class, EdgeClass::Hierarchy);
    assert_eq!(edge.weight, 2.0);
}

#[test]
fn test_hierarchy_not_mutated() {
    let h = books();
    let before = edge_weights(&h);
    let _ = augment(&h, &[(n("Cozy mystery"), n("Fantasy"))], &weighted()).unwrap();
    assert_eq!(edge_weights(&h), before);
}

#[test]
fn test_unknown_reference_rejected() {
    let err = augment(&books(), &[(n("Cozy mystery"), n("Poetry"))], &weighted()).unwrap_err();
    assert!(matches!(err, RankError::InvalidConfig(_)));
}

#[test]
fn test_negative_weight_rejected() {
    let policy = WeightPolicy { reference_weight: -1.0, ..weighted() };
    assert!(matches!(augment(&books(), &[], &policy), Err(RankError::InvalidConfig(_))));
}
