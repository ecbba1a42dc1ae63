//! # Simulation Crate
//!
//! The `sim` crate prepares and supervises runs of the external GDSiMS gene
//! drive engine. It holds the parameter model and its validation, writes the
//! run directory the engine reads from, speaks the engine's stdin menu
//! protocol, and tracks progress while the engine runs.

pub mod engine;
pub mod errors;
pub mod params;
pub mod prelude;
pub mod simulation;
pub mod storage;
pub mod validation;

pub use params::{InputParams, ParamSet};
