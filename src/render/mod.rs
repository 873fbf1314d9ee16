// src/render/mod.rs
//! Pure projections of ranking results: trees, the comparison table, HTML
//! and JSON.

pub mod html;
pub mod json;
pub mod table;
pub mod tree;

pub use table::{Cell, ComparisonTable, DeltaClass, Row};
pub use tree::{build_forest, render_text, TreeNode, TreeStyle};
