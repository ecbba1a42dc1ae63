//! Pre-flight checks on a parameter set.
//!
//! Validation never fails: every problem, including unreadable auxiliary
//! files, becomes a [`Diagnostic`] in the returned [`ValidationReport`], in
//! the order the checks run. Errors block a run, warnings do not.

mod aux_files;

use crate::params::{AdvParams, AuxFile, InputParams, MainParams, ParamSet, ENGINE_FIELDS};
use std::fmt;

/// Whether a diagnostic blocks the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered list of diagnostics from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// `true` when there are no errors. Warnings may still be present.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// All messages, errors and warnings mixed, in check order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().map(|d| d.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message: message.into(),
        });
    }

    pub(crate) fn warning(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        });
    }
}

/// Knobs for behaviour that is deliberately configurable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Treat a non-integer line in the release-times file as an error.
    /// Off by default: such a line is only reported as a warning.
    pub strict_release_times: bool,
}

/// The three optional auxiliary file selections.
#[derive(Debug, Clone, Copy)]
pub struct AuxFiles<'a> {
    pub rainfall: &'a AuxFile,
    pub coords: &'a AuxFile,
    pub release_times: &'a AuxFile,
}

impl<'a> From<&'a AdvParams> for AuxFiles<'a> {
    fn from(adv: &'a AdvParams) -> Self {
        Self {
            rainfall: &adv.rainfall,
            coords: &adv.coords,
            release_times: &adv.release_times,
        }
    }
}

/// Validate `params` and the auxiliary files against the horizon `max_t` and
/// patch count `num_pat`.
///
/// Checks run in a fixed order and none short-circuits: field bounds, the
/// recording window, the aestivation window, the rainfall file, the
/// coordinates file, the release-times file and finally the non-blocking
/// warnings.
pub fn validate(
    params: &InputParams,
    aux: AuxFiles<'_>,
    max_t: u32,
    num_pat: u32,
    options: &ValidationOptions,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for field in &ENGINE_FIELDS {
        let value = (field.get)(params);
        if !field.in_bounds(value) {
            report.error(format!(
                "{} = {} is out of bounds {} ≤ {} ≤ {}.",
                field.engine_name, value, field.min, field.engine_name, field.max
            ));
        }
    }

    if params.rec_end < params.rec_start {
        report.error("rec_end must be equal to or larger than rec_start.");
    }
    if params.t_hide2 < params.t_hide1 {
        report.error("t_hide2 must be equal to or larger than t_hide1.");
    }
    if params.t_wake2 < params.t_wake1 {
        report.error("t_wake2 must be equal to or larger than t_wake1.");
    }

    match aux.rainfall {
        AuxFile::Disabled => {}
        AuxFile::Unselected => report.error("No rainfall file selected."),
        AuxFile::Selected(path) => aux_files::check_rainfall(path, max_t, &mut report),
    }
    match aux.coords {
        AuxFile::Disabled => {}
        AuxFile::Unselected => report.error("No patch coordinates file selected."),
        AuxFile::Selected(path) => aux_files::check_coords(path, num_pat, &mut report),
    }
    match aux.release_times {
        AuxFile::Disabled => {}
        AuxFile::Unselected => report.error("No release times file selected."),
        AuxFile::Selected(path) => {
            aux_files::check_release_times(path, max_t, options, &mut report)
        }
    }

    let aestivation_days = [params.t_hide1, params.t_hide2, params.t_wake1, params.t_wake2];
    if aestivation_days.iter().any(|&day| day > max_t) {
        report.warning(
            "The aestivation interval times are larger than max_t. \
             The simulation will only run partly through the aestivation period.",
        );
    }
    if params.rec_start > max_t {
        report.warning("rec_start > max_t. This simulation will not include local recording.");
    }
    if i64::from(max_t) - i64::from(params.rec_interval_local) - i64::from(params.rec_start) < 0 {
        report.warning(
            "The interval between rec_start and max_t is larger than rec_interval_local. \
             The simulation will only record local data for day 0.",
        );
    }

    tracing::debug!(
        errors = report.error_count(),
        warnings = report.warnings().count(),
        "Validated parameters"
    );
    report
}

/// Validate the advanced form on its own, with `max_t` and `num_pat` taken
/// from the main form.
pub fn validate_advanced(
    adv: &AdvParams,
    max_t: u32,
    num_pat: u32,
    options: &ValidationOptions,
) -> ValidationReport {
    let set = ParamSet {
        main: MainParams {
            max_t,
            num_pat,
            ..MainParams::default()
        },
        advanced: adv.clone(),
    };
    validate(&set.to_input(), AuxFiles::from(adv), max_t, num_pat, options)
}

/// Validate a complete form state before a run.
pub fn validate_set(set: &ParamSet, options: &ValidationOptions) -> ValidationReport {
    validate(
        &set.to_input(),
        AuxFiles::from(&set.advanced),
        set.main.max_t,
        set.main.num_pat,
        options,
    )
}
