// src/lib.rs
//! Random-walk-with-restart ranking for category hierarchies.
//!
//! The pipeline is a chain of pure stages: [`graph::parse`] builds a
//! hierarchy, [`graph::labels`] tags it, [`graph::validator`] checks it is a
//! forest, [`graph::augment`] derives the weighted ranking graph, and
//! [`rank`] personalizes and solves it once per [`rank::Variant`].
//! [`render`] projects the results onto trees, tables, HTML and JSON.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod graph;
pub mod rank;
pub mod render;
pub mod reporting;

pub use error::{RankError, Result};
