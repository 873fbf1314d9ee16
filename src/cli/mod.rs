// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, InputArgs, RankArgs};
pub use handlers::{handle_rank, handle_validate};
