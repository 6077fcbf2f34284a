// File: crates/report-figures/src/lib.rs
// Summary: Report figure data and builders shared by the two binaries.

pub mod cli;
pub mod hematology;
pub mod pathways;
pub mod trends;

pub use cli::{init_tracing, preview, OutputArgs};
