use crate::errors::ParamFileError;
use crate::params::{FieldKind, InputParams, ModelOptions, ParamValue, ENGINE_FIELDS};
use std::fs;
use std::path::Path;

impl InputParams {
    /// Render the positional parameter file: one value per line, in
    /// [`ENGINE_FIELDS`] order, newline terminated.
    pub fn to_param_file(&self) -> String {
        let mut out = String::with_capacity(ENGINE_FIELDS.len() * 8);
        for field in &ENGINE_FIELDS {
            out.push_str(&(field.get)(self).to_string());
            out.push('\n');
        }
        out
    }

    /// Read a positional parameter file back. The options that are not part
    /// of the file are taken from `model`.
    pub fn parse_param_file(text: &str, model: ModelOptions) -> Result<Self, ParamFileError> {
        let mut lines: Vec<&str> = text.lines().map(str::trim).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.len() != ENGINE_FIELDS.len() {
            return Err(ParamFileError::WrongLength {
                expected: ENGINE_FIELDS.len(),
                found: lines.len(),
            });
        }

        let mut params = InputParams {
            model,
            ..InputParams::default()
        };
        for (i, (field, text)) in ENGINE_FIELDS.iter().zip(&lines).enumerate() {
            let value = parse_value(field.kind, text).ok_or_else(|| ParamFileError::Parse {
                line: i + 1,
                name: field.engine_name,
                value: text.to_string(),
                kind: field.kind.name(),
            })?;
            field.set(&mut params, value)?;
        }
        Ok(params)
    }
}

/// Integers written as whole floats (`10.0`) are accepted.
fn parse_value(kind: FieldKind, text: &str) -> Option<ParamValue> {
    ParamValue::parse(kind, text).or_else(|| match kind {
        FieldKind::Int => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| ParamValue::Int(v as u32)),
        FieldKind::Float => None,
    })
}

/// Read `params.txt` from disk, with default model options.
pub fn read_param_file(path: &Path) -> Result<InputParams, ParamFileError> {
    let text = fs::read_to_string(path)?;
    InputParams::parse_param_file(&text, ModelOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BoundaryType, ParamSet, PRESETS};

    #[test]
    fn test_default_file_contents() {
        let text = InputParams::default().to_param_file();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 34);
        assert_eq!(lines[0], "1");
        assert_eq!(lines[1], "1500");
        assert_eq!(lines[2], "100");
        assert_eq!(lines[3], "0.05");
        assert_eq!(lines[5], "100");
        assert_eq!(lines[7], "0.066666667");
        assert_eq!(lines[23], "100000");
        assert_eq!(lines[33], "1");
        assert!(text.ends_with("1\n"));
    }

    #[test]
    fn test_round_trip_by_position() {
        for preset in &PRESETS {
            let mut set: ParamSet = preset.params();
            set.advanced.set_aestivation(true);
            set.advanced.psi = 0.125;
            set.advanced.t_hide1 = 30;
            set.advanced.t_hide2 = 60;
            set.advanced.alpha0_mean = 12345.678;
            set.advanced.comp_power = 1e-9;
            set.advanced.boundary_type = BoundaryType::Edge;
            let params = set.to_input();

            let text = params.to_param_file();
            let back = InputParams::parse_param_file(&text, params.model.clone()).unwrap();
            assert_eq!(params, back);
        }
    }

    #[test]
    fn test_wrong_length() {
        let err = InputParams::parse_param_file("1\n2\n3\n", ModelOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ParamFileError::WrongLength {
                expected: 34,
                found: 3
            }
        ));
    }

    #[test]
    fn test_parse_error_names_the_field() {
        let mut text = InputParams::default().to_param_file();
        text = text.replacen("0.05", "fast", 1);
        let err = InputParams::parse_param_file(&text, ModelOptions::default()).unwrap_err();
        match err {
            ParamFileError::Parse { line, name, .. } => {
                assert_eq!(line, 4);
                assert_eq!(name, "mu_j");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_whole_float_integers_accepted() {
        let text = InputParams::default()
            .to_param_file()
            .replacen("1500", "1500.0", 1);
        let params = InputParams::parse_param_file(&text, ModelOptions::default()).unwrap();
        assert_eq!(params.max_t, 1500);
    }
}
