// src/render/html.rs
//! Standalone HTML report: one tree panel per variant, then the comparison
//! table.

use std::fmt::Write;

use htmlize::escape_text;

use super::table::{format_delta, ComparisonTable};
use super::tree::{walk, TreeNode};
use crate::graph::NodeId;

const STYLE: &str = r"
<style>
    body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #121212; color: #e0e0e0; margin: 0; padding: 20px; }
    h1, h2 { color: #ffffff; text-align: center; }
    h3 { color: #bb86fc; border-bottom: 1px solid #333; padding-bottom: 5px; }
    .grid-container { display: grid; grid-template-columns: repeat(auto-fit, minmax(350px, 1fr)); gap: 20px; margin-bottom: 40px; }
    .card { background-color: #1e1e1e; border-radius: 8px; padding: 15px; height: 600px; overflow-y: auto; font-family: 'Consolas', monospace; font-size: 13px; }
    .tree-line { white-space: pre; line-height: 1.5; }
    .node-name { color: #9e9e9e; }
    .node-leaf { color: #ffffff; font-weight: bold; }
    .score { color: #03dac6; font-weight: bold; }
    .table-container { overflow-x: auto; background-color: #1e1e1e; padding: 20px; border-radius: 8px; }
    table { width: 100%; border-collapse: collapse; font-family: 'Consolas', monospace; }
    th, td { padding: 10px; text-align: left; border-bottom: 1px solid #333; }
    th { background-color: #2c2c2c; color: #bb86fc; }
    .pos { color: #4caf50; font-weight: bold; }
    .neg { color: #f44336; font-weight: bold; }
    .neu { color: #757575; }
</style>
";

/// One tree panel of the report.
#[derive(Debug, Clone, Copy)]
pub struct Panel<'a> {
    pub title: &'a str,
    pub forest: &'a [TreeNode],
}

/// Renders the whole document.
#[must_use]
pub fn render(title: &str, panels: &[Panel<'_>], table: &ComparisonTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape_text(title));
    out.push_str(STYLE);
    let _ = writeln!(out, "</head>\n<body>\n<h1>{}</h1>", escape_text(title));

    out.push_str("<div class=\"grid-container\">\n");
    for panel in panels {
        let _ = writeln!(
            out,
            "<div class=\"card\"><h3>{}</h3>\n{}</div>",
            escape_text(panel.title),
            render_tree(panel.forest)
        );
    }
    out.push_str("</div>\n");

    out.push_str("<h2>Comparison</h2>\n");
    out.push_str("<div class=\"table-container\">\n");
    out.push_str(&render_table(table));
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

/// Tree panel body. Nodes without rendered children get `node-leaf`.
#[must_use]
pub fn render_tree(forest: &[TreeNode]) -> String {
    let mut out = String::new();
    walk(forest, |prefix, connector, node| {
        let class = if node.is_leaf() { "node-leaf" } else { "node-name" };
        let _ = writeln!(
            out,
            "<div class='tree-line'>{prefix}{connector}<span class='{class}'>{}</span> <span class='score'>{:.6}</span></div>",
            escape_node(&node.id),
            node.score
        );
    });
    out
}

/// Comparison table with `pos`/`neg`/`neu` classes on delta cells.
#[must_use]
pub fn render_table(table: &ComparisonTable) -> String {
    let mut out = String::from("<table>\n<thead>\n<tr><th>Node</th>");
    for header in table.headers() {
        let _ = write!(out, "<th>{}</th>", escape_text(header.as_str()));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.rows {
        let _ = write!(out, "<tr><td>{}</td>", escape_node(&row.node));
        for cell in &row.cells {
            let _ = write!(out, "<td>{:.6}</td>", cell.score);
            if let (Some(delta), Some(class)) = (cell.delta, cell.class()) {
                let _ = write!(out, "<td class=\"{}\">{}</td>", class.css(), format_delta(delta));
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn escape_node(id: &NodeId) -> String {
    escape_text(id.to_string()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_escapes_and_marks_leaves() {
        let forest = vec![TreeNode {
            id: NodeId::from("Crime & <Noir>"),
            score: 0.5,
            children: vec![TreeNode {
                id: NodeId::from("Heist"),
                score: 0.5,
                children: Vec::new(),
            }],
        }];
        let html = render_tree(&forest);
        assert!(html.contains("Crime &amp; &lt;Noir&gt;"));
        assert!(html.contains("<span class='node-name'>Crime"));
        assert!(html.contains("└── <span class='node-leaf'>Heist</span>"));
    }
}
