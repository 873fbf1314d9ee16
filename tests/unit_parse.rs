// tests/unit_parse.rs
use hierank_core::graph::parse::{self, parse_str};
use hierank_core::graph::{InputFormat, LeafRule, NodeId, Orientation};
use hierank_core::RankError;
use std::fs;

fn edge_list(flag: u8) -> InputFormat {
    InputFormat::edge_list(flag).unwrap()
}

#[test]
fn test_header_ignored_and_flag_zero_reverses() {
    let out = parse_str("2 1\n1 0\n", edge_list(0));
    let g = out.graph;
    assert_eq!(g.orientation(), Orientation::ChildToParent);
    assert_eq!(g.edge_count(), 1);
    assert!(g.edge(&NodeId::Int(0), &NodeId::Int(1)).is_some());
    assert_eq!(g.out_degree(&NodeId::Int(1)), 0);
    assert_eq!(g.roots(), vec![NodeId::Int(1)]);
}

#[test]
fn test_flag_one_keeps_order() {
    let g = parse_str("x\n1 0\n", edge_list(1)).graph;
    assert!(g.edge(&NodeId::Int(1), &NodeId::Int(0)).is_some());
    assert_eq!(g.parent_links(), vec![(NodeId::Int(0), NodeId::Int(1))]);
}

#[test]
fn test_levels_are_depths() {
    let g = parse_str("5 4\n0 1\n0 2\n1 3\n3 4\n", edge_list(1)).graph;
    assert_eq!(g.level(&NodeId::Int(0)), 0);
    assert_eq!(g.level(&NodeId::Int(2)), 1);
    assert_eq!(g.level(&NodeId::Int(4)), 3);
}

#[test]
fn test_malformed_lines_skipped() {
    let out = parse_str("3 3\n1 0\nbogus\n2\n\n2 0\n", edge_list(0));
    assert_eq!(out.graph.edge_count(), 2);
    assert_eq!(out.skipped.len(), 2);
    assert_eq!(out.skipped[0].line, 3);
    assert_eq!(out.skipped[0].content, "bogus");
    assert_eq!(out.skipped[1].line, 4);
}

#[test]
fn test_bad_direction_flag() {
    assert!(matches!(InputFormat::edge_list(2), Err(RankError::InvalidConfig(_))));
}

#[test]
fn test_indented_levels_and_links() {
    let text = "Fiction\n  **Mystery**\n    Cozy mystery\n    Detective mystery\n  Fantasy\n";
    let g = parse_str(text, InputFormat::Indented).graph;
    let mystery = NodeId::from("Mystery");
    assert_eq!(g.orientation(), Orientation::Bidirectional);
    assert_eq!(g.level(&mystery), 2);
    assert_eq!(g.level(&NodeId::from("Cozy mystery")), 4);
    assert!(g.edge(&NodeId::from("Fiction"), &mystery).is_some());
    assert!(g.edge(&mystery, &NodeId::from("Fiction")).is_some());
    assert_eq!(g.roots(), vec![NodeId::from("Fiction")]);

    let leaves: Vec<NodeId> = g.leaves(LeafRule::MaxLevel).into_iter().collect();
    assert_eq!(leaves, vec![NodeId::from("Cozy mystery"), NodeId::from("Detective mystery")]);
    assert!(g.leaves(LeafRule::InDegreeZero).contains(&NodeId::from("Fantasy")));
}

#[test]
fn test_indented_duplicate_keeps_first_level() {
    let g = parse_str("A\n  B\nC\n    B\n", InputFormat::Indented).graph;
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.level(&NodeId::from("B")), 2);
}

#[test]
fn test_missing_file_is_input_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse::read(&dir.path().join("nope.txt"), edge_list(0)).unwrap_err();
    assert!(matches!(err, RankError::InputNotFound { .. }));
}

#[test]
fn test_read_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.txt");
    fs::write(&path, "3 2\n1 0\n2 0\n").unwrap();
    let out = parse::read(&path, edge_list(0)).unwrap();
    assert_eq!(out.graph.node_count(), 3);
    assert!(out.skipped.is_empty());
}
