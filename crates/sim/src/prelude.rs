//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use gdsims_sim::prelude::*;
//!
//! let set = ParamSet::default();
//! let report = validate_set(&set, &ValidationOptions::default());
//! assert!(report.is_ok());
//! ```

pub use crate::engine::{locate_engine, EngineRunner, RunOutcome};
pub use crate::errors;
pub use crate::params::{
    AdvParams, AdvancedForm, AuxFile, BoundaryType, DispersalType, InputParams, MainParams,
    ModelOptions, ParamSet,
};
pub use crate::simulation::{launch, RunEvent, RunHandle, RunObserver, ProgressState};
pub use crate::storage::RunDir;
pub use crate::validation::{validate_set, ValidationOptions, ValidationReport};
