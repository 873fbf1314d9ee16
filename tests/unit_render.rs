// tests/unit_render.rs
use hierank_core::graph::parse::parse_str;
use hierank_core::graph::{InputFormat, NodeId};
use hierank_core::rank::{Engine, SolverConfig, Variant};
use hierank_core::render::{build_forest, html, json, render_text, ComparisonTable, DeltaClass, TreeStyle};
use hierank_core::graph::WeightPolicy;

fn edge_list_experiment(variants: &[Variant]) -> hierank_core::rank::Experiment {
    // 0 <- 1 <- 3, 0 <- 2 <- 4, 2 <- 5
    let g = parse_str("6 5\n0 1\n0 2\n1 3\n2 4\n2 5\n", InputFormat::edge_list(0).unwrap()).graph;
    Engine::new(SolverConfig::default()).run(&g, variants).unwrap()
}

fn directional(name: &str) -> Variant {
    Variant::new(name).with_weights(WeightPolicy::directional())
}

#[test]
fn test_predecessor_tree_orders_by_score() {
    let exp = edge_list_experiment(&[directional("normal")]);
    let run = &exp.runs()[0];
    let forest = build_forest(TreeStyle::RankDescByPredecessor, exp.hierarchy(), &run.result);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].id, NodeId::Int(0));
    // 2 has two children, 1 has one, so 2 collects more rank.
    let kids: Vec<&NodeId> = forest[0].children.iter().map(|c| &c.id).collect();
    assert_eq!(kids, [&NodeId::Int(2), &NodeId::Int(1)]);

    let text = render_text(&forest, TreeStyle::RankDescByPredecessor);
    let first = text.lines().next().unwrap();
    assert!(first.starts_with("[0] (Rank: 0."));
    assert!(text.contains("├── [2] (Rank: "));
    assert!(text.contains("│   ├── [4] (Rank: "));
    assert!(text.contains("└── [1] (Rank: "));
}

#[test]
fn test_level_tree_terminates_on_bidirectional_graph() {
    let text = "Root\n  B\n    B1\n  A\n";
    let g = parse_str(text, InputFormat::Indented).graph;
    let exp = Engine::new(SolverConfig::default()).run(&g, &[Variant::new("baseline")]).unwrap();
    let run = &exp.runs()[0];
    let forest = build_forest(TreeStyle::LevelChildrenAlpha, exp.hierarchy(), &run.result);
    let rendered = render_text(&forest, TreeStyle::LevelChildrenAlpha);
    let names: Vec<&str> = rendered
        .lines()
        .map(|l| l.trim_start_matches(['│', '├', '└', '─', ' ']).split(' ').next().unwrap_or(""))
        .collect();
    assert_eq!(names, ["Root", "A", "B", "B1"]);
}

#[test]
fn test_level_tree_ignores_cross_level_reference() {
    let g = parse_str("Root\n  A\n    A1\n  B\n", InputFormat::Indented).graph;
    let engine = Engine::new(SolverConfig::default()).with_references(vec![(NodeId::from("A1"), NodeId::from("B"))]);
    let exp = engine.run(&g, &[Variant::new("baseline")]).unwrap();
    let run = &exp.runs()[0];
    // The reference is part of the ranking graph but not a tree edge.
    assert!(run.graph.edge(&NodeId::from("A1"), &NodeId::from("B")).is_some());

    let forest = build_forest(TreeStyle::LevelChildrenAlpha, exp.hierarchy(), &run.result);
    let text = render_text(&forest, TreeStyle::LevelChildrenAlpha);
    assert_eq!(text.matches("A1 ").count(), 1, "{text}");
    let b = forest[0].children.iter().find(|c| c.id == NodeId::from("B")).unwrap();
    assert!(b.is_leaf());
}

#[test]
fn test_equal_variants_are_neutral() {
    let exp = edge_list_experiment(&[directional("v1"), directional("v2")]);
    let table = ComparisonTable::build(&exp, None).unwrap();
    assert_eq!(table.rows.len(), 6);
    for row in &table.rows {
        assert_eq!(row.cells[1].class(), Some(DeltaClass::Neu));
        assert!(row.cells[0].class().is_none());
    }
    assert!(table.render_text().lines().next().unwrap().contains("Δ v2"));
}

#[test]
fn test_table_sorted_by_baseline() {
    let exp = edge_list_experiment(&[directional("v1"), Variant::new("v2")]);
    let table = ComparisonTable::build(&exp, Some("v2")).unwrap();
    assert_eq!(table.baseline_name(), Some("v2"));
    let scores: Vec<f64> = table.rows.iter().map(|r| r.cells[1].score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(ComparisonTable::build(&exp, Some("missing")).is_err());
}

#[test]
fn test_html_report_has_panels_and_classes() {
    let exp = edge_list_experiment(&[directional("v1"), Variant::new("v2")]);
    let table = ComparisonTable::build(&exp, None).unwrap();
    let forests: Vec<_> = exp
        .runs()
        .iter()
        .map(|r| build_forest(TreeStyle::RankDescByPredecessor, exp.hierarchy(), &r.result))
        .collect();
    let panels: Vec<html::Panel<'_>> = exp
        .runs()
        .iter()
        .zip(&forests)
        .map(|(r, f)| html::Panel { title: &r.variant.name, forest: f })
        .collect();
    let doc = html::render("Results <test>", &panels, &table);
    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains("<title>Results &lt;test&gt;</title>"));
    assert_eq!(doc.matches("class=\"card\"").count(), 2);
    assert!(doc.contains("<th>Δ v2</th>"));
    assert!(doc.contains("class='node-leaf'"));
    assert!(doc.contains("class=\"pos\"") || doc.contains("class=\"neg\""));
}

#[test]
fn test_json_export() {
    let exp = edge_list_experiment(&[directional("normal")]);
    let body = json::to_string(&exp).unwrap();
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value[0]["name"], "normal");
    assert_eq!(value[0]["converged"], true);
    assert!(value[0]["scores"]["0"].as_f64().unwrap() > 0.0);
}
