// src/cli/args.rs
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::Result;
use crate::graph::InputFormat;
use crate::render::TreeStyle;

#[derive(Parser)]
#[command(name = "hierank", version, about = "PageRank variants over category hierarchies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a hierarchy under every configured variant
    Rank(RankArgs),
    /// Parse and validate a hierarchy without ranking it
    Validate {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, short)]
        verbose: bool,
    },
}

impl Commands {
    #[must_use]
    pub fn verbose(&self) -> bool {
        match self {
            Self::Rank(args) => args.verbose,
            Self::Validate { verbose, .. } => *verbose,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Hierarchy file
    pub file: PathBuf,
    /// Read one node per line, depth given by indentation
    #[arg(long, conflicts_with = "direction")]
    pub indented: bool,
    /// Edge-list direction: 0 stores `b -> a` (child to parent), 1 stores `a -> b`
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub direction: u8,
}

impl InputArgs {
    /// # Errors
    /// Returns `InvalidConfig` for an unknown direction flag.
    pub fn format(&self) -> Result<InputFormat> {
        if self.indented {
            Ok(InputFormat::Indented)
        } else {
            InputFormat::edge_list(self.direction)
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Experiment file (defaults to ./hierank.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Variant the comparison table measures deltas against
    #[arg(long, value_name = "NAME")]
    pub baseline: Option<String>,
    /// Write an HTML report
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,
    /// Write scores as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub tree_style: Option<TreeStyleArg>,
    /// Skip the per-variant trees
    #[arg(long)]
    pub no_trees: bool,
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeStyleArg {
    /// Children by descending score, `[node] (Rank: x)`
    Predecessor,
    /// Children by level then name, `node x`
    Level,
}

impl From<TreeStyleArg> for TreeStyle {
    fn from(arg: TreeStyleArg) -> Self {
        match arg {
            TreeStyleArg::Predecessor => Self::RankDescByPredecessor,
            TreeStyleArg::Level => Self::LevelChildrenAlpha,
        }
    }
}
