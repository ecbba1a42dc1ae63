//! Readers for the engine's whitespace-delimited data files.
//!
//! Every file starts with [`HEADER_LINES`] header lines followed by one
//! numeric row per line:
//!
//! | file                          | columns                                   |
//! |-------------------------------|-------------------------------------------|
//! | `Totals<label>run<N>.txt`     | day, WW, WD, DD, WR, RR, DR               |
//! | `CoordinateList<label>run<N>` | index, x, y                               |
//! | `LocalData<label>run<N>.txt`  | day, patch, WW, WD, DD, WR, RR, DR        |

pub mod coords;
pub mod local;
pub mod table;
pub mod totals;

pub use coords::{axis_range, Coordinates};
pub use local::{
    drive_allele_frequency, frames_from_params, LocalData, LocalFrame, ALL_WILD, NO_POPULATION,
};
pub use table::Table;
pub use totals::{
    AlleleFrequencies, AlleleSeries, Genotype, GenotypeCounts, TotalsLine, TotalsSeries,
};

pub use gdsims_sim::simulation::HEADER_LINES;
