// src/reporting.rs
//! Console output for ranking runs.

use colored::Colorize;

use crate::graph::{ParseOutcome, SkippedLine};
use crate::rank::{Experiment, VariantRun};
use crate::render::{render_text, ComparisonTable, DeltaClass, TreeNode, TreeStyle};

/// Prints a short parse summary, with one line per skipped input line.
pub fn print_parse_summary(outcome: &ParseOutcome) {
    let g = &outcome.graph;
    println!(
        "{} {} nodes, {} edges",
        "Parsed".green().bold(),
        g.node_count(),
        g.edge_count()
    );
    print_skipped(&outcome.skipped);
}

fn print_skipped(skipped: &[SkippedLine]) {
    if skipped.is_empty() {
        return;
    }
    println!("{}", format!("Skipped {} line(s):", skipped.len()).yellow());
    for s in skipped {
        println!(
            "  {} line {}: {} ({})",
            "-->".blue(),
            s.line,
            s.content.dimmed(),
            s.reason
        );
    }
}

pub fn print_valid() {
    println!("{}", "Hierarchy is valid.".green().bold());
}

/// Prints one variant's tree under a section header.
pub fn print_tree(run: &VariantRun, forest: &[TreeNode], style: TreeStyle) {
    let header = format!("========== {} ==========", run.variant.name.to_uppercase());
    println!("\n{}", header.cyan().bold());
    print!("{}", render_text(forest, style));
    if !run.result.converged() {
        println!(
            "{}",
            format!(
                "warning: not converged after {} iterations (residual {:.3e})",
                run.result.iterations(),
                run.result.residual()
            )
            .yellow()
        );
    }
}

/// Prints the reference-only scores a two-phase run started from, highest
/// first. Runs without a reference phase print nothing.
pub fn print_reference_phase(run: &VariantRun) {
    let Some(phase) = &run.reference_phase else {
        return;
    };
    let header = format!("========== {}: REFERENCES ONLY ==========", run.variant.name.to_uppercase());
    println!("\n{}", header.cyan().bold());
    for (id, score) in phase.ranked() {
        println!("{:<24} {score:.6}", id.to_string());
    }
}

/// Prints the comparison table, each delta colored by its sign.
pub fn print_table(table: &ComparisonTable) {
    let text = table.render_styled(|cell, class| match class {
        DeltaClass::Pos => cell.green().to_string(),
        DeltaClass::Neg => cell.red().to_string(),
        DeltaClass::Neu => cell.dimmed().to_string(),
    });
    let mut lines = text.lines();
    println!("\n{}", "========== COMPARISON ==========".cyan().bold());
    if let Some(head) = lines.next() {
        println!("{}", head.bold());
    }
    if let Some(rule) = lines.next() {
        println!("{}", rule.dimmed());
    }
    for line in lines {
        println!("{line}");
    }
}

/// One-line summary per variant.
pub fn print_summary(experiment: &Experiment) {
    println!();
    for run in experiment.runs() {
        let status = if run.result.converged() {
            "converged".green()
        } else {
            "not converged".yellow()
        };
        println!(
            "{} {:<20} {} in {} iterations",
            "✓".green(),
            run.variant.name,
            status,
            run.result.iterations()
        );
    }
}

pub fn print_written(what: &str, path: &std::path::Path) {
    println!("{} {what} written to {}", "→".blue(), path.display());
}
