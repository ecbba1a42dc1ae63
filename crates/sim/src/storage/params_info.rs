use crate::params::{InputParams, ENGINE_FIELDS};
use std::path::PathBuf;

const DELIMITER: char = ',';
const QUOTE: char = '|';

/// Render `paramsInfo.csv`: one row per parameter with its display name,
/// engine name (blank for front-end-only options), value and description.
///
/// Quoting is minimal with `|` as the quote character and rows end in CRLF.
pub fn format_params_info(params: &InputParams) -> String {
    let mut out = String::new();
    write_row(
        &mut out,
        &["Parameter name", "Program equivalent", "Value", "Description"],
    );

    for field in &ENGINE_FIELDS {
        let value = (field.get)(params).to_string();
        write_row(
            &mut out,
            &[field.engine_name, field.engine_name, &value, field.description],
        );
    }

    let model = &params.model;
    write_row(
        &mut out,
        &[
            "dispersal type",
            "",
            &model.dispersal_type.to_string(),
            "Adult dispersal model.",
        ],
    );
    write_row(
        &mut out,
        &[
            "boundary type",
            "",
            &model.boundary_type.to_string(),
            "Boundary type of the simulated area.",
        ],
    );
    write_row(
        &mut out,
        &["rainfall file", "", &file_value(&model.rainfall_file), "Rainfall data file"],
    );
    write_row(
        &mut out,
        &[
            "patch coordinates file",
            "",
            &file_value(&model.coords_file),
            "Patch coordinates file",
        ],
    );
    write_row(
        &mut out,
        &[
            "release times file",
            "",
            &file_value(&model.release_times_file),
            "Release times file",
        ],
    );
    out
}

fn file_value(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "None".to_string(),
    }
}

fn write_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE || c == '\r' || c == '\n');
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}
