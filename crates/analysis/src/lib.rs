//! # Analysis Crate
//!
//! Reads the data files the GDSiMS engine writes into a run's
//! `output_files` directory and turns them into plots:
//!
//! - genotype totals over time, and the allele frequencies derived from them
//! - patch coordinates
//! - per-patch drive allele frequency, one frame per recorded day
//!
//! [`PlotWorkspace`] follows a run's lifecycle so plots are only drawn from
//! files the engine has finished writing.

pub mod catalog;
pub mod data;
pub mod errors;
pub mod plot;
pub mod workspace;

pub use catalog::{DataKind, RunCatalog, RunFiles};
pub use workspace::PlotWorkspace;
