// src/render/table.rs
//! Side-by-side score comparison across variants.

use std::cmp::Ordering;
use std::fmt::Write;

use serde::Serialize;

use crate::error::{RankError, Result};
use crate::graph::NodeId;
use crate::rank::Experiment;

/// Sign of a delta against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaClass {
    Pos,
    Neg,
    Neu,
}

impl DeltaClass {
    #[must_use]
    pub fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Pos
        } else if delta < 0.0 {
            Self::Neg
        } else {
            Self::Neu
        }
    }

    /// CSS class used by the HTML report.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Pos => "pos",
            Self::Neg => "neg",
            Self::Neu => "neu",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub score: f64,
    /// `None` in the baseline column.
    pub delta: Option<f64>,
}

impl Cell {
    #[must_use]
    pub fn class(&self) -> Option<DeltaClass> {
        self.delta.map(DeltaClass::of)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub node: NodeId,
    /// One cell per variant, in column order.
    pub cells: Vec<Cell>,
}

/// Every node, its score per variant and deltas against the baseline.
/// Rows are ordered by baseline score, highest first, ties by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub baseline: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ComparisonTable {
    /// # Errors
    /// Returns `InvalidConfig` if `baseline` names no variant of the
    /// experiment.
    pub fn build(experiment: &Experiment, baseline: Option<&str>) -> Result<Self> {
        let runs = experiment.runs();
        let base = match baseline {
            Some(name) => runs
                .iter()
                .position(|r| r.variant.name == name)
                .ok_or_else(|| RankError::config(format!("baseline variant '{name}' not found")))?,
            None => 0,
        };
        let Some(base_run) = runs.get(base) else {
            return Ok(Self { baseline: 0, columns: Vec::new(), rows: Vec::new() });
        };

        let mut rows: Vec<Row> = experiment
            .hierarchy()
            .ids()
            .map(|id| {
                let base_score = base_run.result.score(id);
                let cells = runs
                    .iter()
                    .enumerate()
                    .map(|(i, r)| {
                        let score = r.result.score(id);
                        Cell {
                            score,
                            delta: (i != base).then_some(score - base_score),
                        }
                    })
                    .collect();
                Row { node: id.clone(), cells }
            })
            .collect();

        rows.sort_by(|a, b| {
            let (sa, sb) = (a.cells[base].score, b.cells[base].score);
            sb.partial_cmp(&sa).unwrap_or(Ordering::Equal).then_with(|| a.node.cmp(&b.node))
        });

        Ok(Self {
            baseline: base,
            columns: runs.iter().map(|r| r.variant.name.clone()).collect(),
            rows,
        })
    }

    #[must_use]
    pub fn baseline_name(&self) -> Option<&str> {
        self.columns.get(self.baseline).map(String::as_str)
    }

    /// Fixed-width text, a `Δ <variant>` column after every non-baseline
    /// variant.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.render_styled(|cell, _| cell.to_owned())
    }

    /// [`render_text`](Self::render_text) with every padded delta cell passed
    /// through `paint` along with its class.
    #[must_use]
    pub fn render_styled(&self, paint: impl Fn(&str, DeltaClass) -> String) -> String {
        let node_width = self
            .rows
            .iter()
            .map(|r| r.node.to_string().chars().count())
            .chain(std::iter::once(4))
            .max()
            .unwrap_or(4);
        let headers = self.headers();
        let widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(10)).collect();

        let mut out = String::new();
        let _ = write!(out, "{:<node_width$}", "Node");
        for (h, &w) in headers.iter().zip(&widths) {
            let _ = write!(out, "  {h:>w$}");
        }
        out.push('\n');
        let total = node_width + widths.iter().map(|w| w + 2).sum::<usize>();
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for row in &self.rows {
            let _ = write!(out, "{:<node_width$}", row.node.to_string());
            let mut w = widths.iter();
            for cell in &row.cells {
                let width = w.next().copied().unwrap_or(10);
                let _ = write!(out, "  {:>width$.6}", cell.score);
                if let Some(delta) = cell.delta {
                    let width = w.next().copied().unwrap_or(10);
                    let padded = format!("{:>width$}", format_delta(delta));
                    let _ = write!(out, "  {}", paint(&padded, DeltaClass::of(delta)));
                }
            }
            out.push('\n');
        }
        out
    }

    /// Column headers after the node column.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::new();
        for (i, name) in self.columns.iter().enumerate() {
            headers.push(name.clone());
            if i != self.baseline {
                headers.push(format!("Δ {name}"));
            }
        }
        headers
    }
}

/// Delta with an explicit `+` on gains.
#[must_use]
pub fn format_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{delta:.6}")
    } else {
        format!("{delta:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_class() {
        assert_eq!(DeltaClass::of(0.1), DeltaClass::Pos);
        assert_eq!(DeltaClass::of(-0.1), DeltaClass::Neg);
        assert_eq!(DeltaClass::of(0.0), DeltaClass::Neu);
        assert_eq!(DeltaClass::Neg.css(), "neg");
    }

    #[test]
    fn test_styled_row_keeps_each_sign() {
        let table = ComparisonTable {
            baseline: 0,
            columns: vec!["base".into(), "up".into(), "down".into()],
            rows: vec![Row {
                node: NodeId::Int(4),
                cells: vec![
                    Cell { score: 0.2, delta: None },
                    Cell { score: 0.3, delta: Some(0.1) },
                    Cell { score: 0.1, delta: Some(-0.1) },
                ],
            }],
        };
        let text = table.render_styled(|cell, class| format!("<{}>{}", class.css(), cell.trim()));
        let row = text.lines().nth(2).unwrap();
        assert!(row.contains("<pos>+0.100000"), "{row}");
        assert!(row.contains("<neg>-0.100000"), "{row}");
        assert!(!row.contains("<pos>0.2"));
        assert_eq!(table.render_text().lines().nth(2).unwrap().matches('<').count(), 0);
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(0.5), "+0.500000");
        assert_eq!(format_delta(-0.25), "-0.250000");
        assert_eq!(format_delta(0.0), "0.000000");
    }
}
