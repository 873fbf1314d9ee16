// src/cli/handlers.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::cli::args::{InputArgs, RankArgs};
use crate::config::Config;
use crate::error::RankError;
use crate::exit::HierankExit;
use crate::graph::{parse, validator, ParseOutcome};
use crate::rank::Experiment;
use crate::render::{build_forest, html, json, ComparisonTable, TreeStyle};
use crate::reporting;

fn load(input: &InputArgs) -> Result<ParseOutcome> {
    let format = input.format()?;
    let outcome = parse::read(&input.file, format)?;
    info!(
        file = %input.file.display(),
        nodes = outcome.graph.node_count(),
        skipped = outcome.skipped.len(),
        "hierarchy parsed"
    );
    Ok(outcome)
}

fn check_structure(outcome: &ParseOutcome) -> Result<()> {
    if let Err(violation) = validator::check(&outcome.graph) {
        error!(%violation, "hierarchy rejected");
        return Err(RankError::from(violation).into());
    }
    Ok(())
}

/// Handles the validate command.
///
/// # Errors
/// Returns error if the file cannot be read or the hierarchy is invalid.
pub fn handle_validate(input: &InputArgs) -> Result<HierankExit> {
    let outcome = load(input)?;
    reporting::print_parse_summary(&outcome);
    check_structure(&outcome)?;
    reporting::print_valid();
    Ok(HierankExit::Success)
}

/// Handles the rank command: parse, validate, run every variant, report.
///
/// # Errors
/// Returns error on a missing input, a malformed experiment file, an invalid
/// hierarchy, an invalid variant, or a failed report write.
pub fn handle_rank(args: &RankArgs) -> Result<HierankExit> {
    let format = args.input.format()?;
    let outcome = load(&args.input)?;
    reporting::print_parse_summary(&outcome);
    check_structure(&outcome)?;

    let config = Config::load(args.config.as_deref())?;
    let plan = config.resolve(&outcome.graph, format)?;
    let experiment = plan.engine().run(&outcome.graph, &plan.variants)?;

    let style = args
        .tree_style
        .map(TreeStyle::from)
        .or(plan.report.tree_style)
        .unwrap_or_else(|| TreeStyle::default_for(format.orientation()));
    let baseline = args.baseline.as_deref().or(plan.report.baseline.as_deref());
    let table = ComparisonTable::build(&experiment, baseline)?;

    if plan.report.trees && !args.no_trees {
        for run in experiment.runs() {
            let forest = build_forest(style, experiment.hierarchy(), &run.result);
            reporting::print_tree(run, &forest, style);
        }
    }
    for run in experiment.runs() {
        reporting::print_reference_phase(run);
    }
    reporting::print_table(&table);
    reporting::print_summary(&experiment);

    if let Some(path) = args.html.as_deref().or(plan.report.html.as_deref()) {
        write_html(path, &experiment, &table, style, &args.input.file)?;
        reporting::print_written("HTML report", path);
    }
    if let Some(path) = args.json.as_deref().or(plan.report.json.as_deref()) {
        let body = json::to_string(&experiment).context("Failed to serialize scores")?;
        fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
        reporting::print_written("JSON scores", path);
    }

    Ok(HierankExit::Success)
}

fn write_html(
    path: &Path,
    experiment: &Experiment,
    table: &ComparisonTable,
    style: TreeStyle,
    source: &Path,
) -> Result<()> {
    let forests: Vec<_> = experiment
        .runs()
        .iter()
        .map(|run| build_forest(style, experiment.hierarchy(), &run.result))
        .collect();
    let panels: Vec<html::Panel<'_>> = experiment
        .runs()
        .iter()
        .zip(&forests)
        .map(|(run, forest)| html::Panel {
            title: &run.variant.name,
            forest,
        })
        .collect();
    let title = format!("PageRank results: {}", source.display());
    let doc = html::render(&title, &panels, table);
    fs::write(path, doc).with_context(|| format!("Failed to write {}", path.display()))
}
