use super::InputParams;
use crate::errors::FieldError;
use std::fmt;

/// Numeric kind of an engine field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Float => "number",
        }
    }
}

/// A single engine field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Int(u32),
    Float(f64),
}

impl ParamValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => f64::from(v),
            Self::Float(v) => v,
        }
    }

    /// Parse `text` as a value of the given kind.
    pub fn parse(kind: FieldKind, text: &str) -> Option<Self> {
        let text = text.trim();
        match kind {
            FieldKind::Int => text.parse::<u32>().ok().map(Self::Int),
            FieldKind::Float => text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Float),
        }
    }
}

/// Formats the way the engine's positional parser reads it: plain decimal,
/// `.` separator, no exponent.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Metadata for one line of the parameter file.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// Name the engine uses for the field (and the form label).
    pub engine_name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    pub get: fn(&InputParams) -> ParamValue,
    set: fn(&mut InputParams, ParamValue) -> Option<()>,
}

impl FieldSpec {
    pub fn in_bounds(&self, value: ParamValue) -> bool {
        let v = value.as_f64();
        v >= self.min && v <= self.max
    }

    /// Store `value` into `params`, converting to the field's kind.
    ///
    /// Bounds are not checked here, but an integer field rejects a value
    /// that is not a whole number representable as `u32`.
    pub fn set(&self, params: &mut InputParams, value: ParamValue) -> Result<(), FieldError> {
        (self.set)(params, value).ok_or(FieldError {
            name: self.engine_name,
            value: value.as_f64(),
            kind: self.kind.name(),
        })
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("engine_name", &self.engine_name)
            .field("kind", &self.kind)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

/// `x` as a `u32`, if it is a whole number in range.
fn whole_u32(x: f64) -> Option<u32> {
    if x.fract() != 0.0 {
        return None;
    }
    u32::try_from(x as i64).ok()
}

macro_rules! int_field {
    ($field:ident, $name:literal, $min:expr, $max:expr, $desc:literal) => {
        FieldSpec {
            engine_name: $name,
            description: $desc,
            kind: FieldKind::Int,
            min: $min as f64,
            max: $max as f64,
            get: |p| ParamValue::Int(p.$field),
            set: |p, v| {
                p.$field = match v {
                    ParamValue::Int(i) => i,
                    ParamValue::Float(x) => whole_u32(x)?,
                };
                Some(())
            },
        }
    };
}

macro_rules! float_field {
    ($field:ident, $name:literal, $min:expr, $max:expr, $desc:literal) => {
        FieldSpec {
            engine_name: $name,
            description: $desc,
            kind: FieldKind::Float,
            min: $min,
            max: $max,
            get: |p| ParamValue::Float(p.$field),
            set: |p, v| {
                p.$field = v.as_f64();
                Some(())
            },
        }
    };
}

/// Engine fields in parameter-file order.
///
/// The order is the interface with the engine: line `i` of `params.txt`
/// holds `ENGINE_FIELDS[i]`.
pub static ENGINE_FIELDS: [FieldSpec; 34] = [
    int_field!(num_runs, "num_runs", 1, 10_000, "Number of simulation replicates to run."),
    int_field!(max_t, "max_t", 1, 10_000, "Maximum simulated time (in days)."),
    int_field!(num_pat, "num_pat", 1, 100_000, "Number of population sites chosen for the simulation."),
    float_field!(mu_j, "mu_j", 0.0, 0.99, "Juvenile density independent mortality rate per day."),
    float_field!(mu_a, "mu_a", 0.001, 0.999, "Adult mortality rate per day."),
    float_field!(beta, "beta", 0.01, 10_000.0, "Parameter that controls mating rate."),
    float_field!(theta, "theta", 0.01, 10_000.0, "Average egg laying rate of wildtype females (eggs per day)."),
    float_field!(comp_power, "comp_power", 1e-9, 10_000.0, "Parameter that controls the juvenile survival probability."),
    int_field!(min_dev, "min_dev", 1, 10_000, "Minimum development time for a juvenile (in days)."),
    float_field!(gamma, "gamma", 0.0, 1.0, "Rate of r2 allele formation from W/D meiosis."),
    float_field!(xi, "xi", 0.0, 1.0, "Somatic Cas9 expression fitness cost."),
    float_field!(e, "e", 0.0, 1.0, "Homing rate in females."),
    int_field!(driver_start, "driver_start", 1, 10_000, "Time to start releasing drive alleles into the mosquito population."),
    int_field!(num_driver_m, "num_driver_M", 0, 100_000, "Number of drive heterozygous (WD) male mosquitoes per release."),
    int_field!(num_driver_sites, "num_driver_sites", 0, 100_000, "Number of gene drive release sites per year."),
    float_field!(disp_rate, "disp_rate", 0.0, 1.0, "Adult dispersal rate."),
    float_field!(max_disp, "max_disp", 0.01, 10_000.0, "Maximum dispersal distance at which two sites are connected."),
    float_field!(psi, "psi", 0.0, 1.0, "Aestivation rate."),
    float_field!(mu_aes, "mu_aes", 0.0, 1.0, "Aestivation mortality rate."),
    int_field!(t_hide1, "t_hide1", 0, 365, "Start day of aestivation-hiding period (exclusive)."),
    int_field!(t_hide2, "t_hide2", 0, 365, "End day of aestivation-hiding period (inclusive)."),
    int_field!(t_wake1, "t_wake1", 0, 365, "Start day of aestivation-waking period (exclusive)."),
    int_field!(t_wake2, "t_wake2", 0, 365, "End day of aestivation-waking period (inclusive)."),
    float_field!(alpha0_mean, "alpha0_mean", 0.01, 1e8, "Mean of the baseline contribution to the carrying capacity."),
    float_field!(alpha0_variance, "alpha0_variance", 0.0, 1e8, "Variance of the baseline contribution to the carrying capacity."),
    float_field!(alpha1, "alpha1", 0.0, 1e8, "Rainfall contribution factor to carrying capacity."),
    float_field!(amp, "amp", 0.0, 1.0, "Amplitude of rainfall fluctuations."),
    float_field!(resp, "resp", 0.0, 10_000.0, "Carrying capacity's responsiveness to rainfall contribution."),
    int_field!(rec_start, "rec_start", 0, 100_000, "Start time for the data recording window (inclusive)."),
    int_field!(rec_end, "rec_end", 0, 100_000, "End time for the data recording window (inclusive)."),
    int_field!(rec_interval_global, "rec_interval_global", 1, 100_000, "Time interval for global data recording/output."),
    int_field!(rec_interval_local, "rec_interval_local", 1, 100_000, "Time interval at which to collect/record local data (in days)."),
    int_field!(rec_sites_freq, "rec_sites_freq", 1, 100_000, "Fraction of sites to collect local data for (1 is all sites, 10 is 1 in 10 etc)."),
    int_field!(set_label, "set_label", 0, 10_000_000, "'Set of repetitions' index label for output files."),
];

/// Look up a field by its engine name.
pub fn field(engine_name: &str) -> Option<&'static FieldSpec> {
    ENGINE_FIELDS.iter().find(|f| f.engine_name == engine_name)
}
