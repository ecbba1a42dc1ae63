//! Structural checks on the user-supplied auxiliary files.

use super::{ValidationOptions, ValidationReport};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static INTEGER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("valid integer pattern"));

/// Rainfall: one non-negative number per line, 365 or `max_t` lines.
pub(super) fn check_rainfall(path: &Path, max_t: u32, report: &mut ValidationReport) {
    let values = match fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| parse_column(&text))
    {
        Ok(values) => values,
        Err(e) => {
            report.error(format!("An error occured with the rainfall file: {e}"));
            return;
        }
    };

    if values.len() != 365 && values.len() != max_t as usize {
        report.error("The number of daily rainfall values in the file is not 365 or max_t.");
        return;
    }

    for (i, value) in values.iter().enumerate() {
        if *value < 0.0 {
            report.error(format!(
                "Rainfall value r for day {} is out of bounds r ≥ 0.",
                i + 1
            ));
        }
    }
}

/// Parse a single numeric column. Blank lines and `#` comments are skipped.
fn parse_column(text: &str) -> Result<Vec<f64>, String> {
    let mut values = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(token), None) = (tokens.next(), tokens.next()) else {
            return Err(format!("line {} has more than one value", n + 1));
        };
        let value = token
            .parse::<f64>()
            .map_err(|_| format!("could not convert string to float: '{token}' (line {})", n + 1))?;
        values.push(value);
    }
    Ok(values)
}

/// Coordinates: exactly `num_pat` rows of `x y y|n`. Row errors accumulate.
pub(super) fn check_coords(path: &Path, num_pat: u32, report: &mut ValidationReport) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            report.error(format!("An error occured with the patch coordinates file: {e}"));
            return;
        }
    };

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() != num_pat as usize {
        report.error("The number of patch coordinates in the file does not match num_pat.");
        return;
    }

    for (i, line) in lines.iter().enumerate() {
        let row = i + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [x, y, release_site] = tokens[..] else {
            report.error(format!(
                "Patch coordinate {row} does not have three values (x y y|n)."
            ));
            continue;
        };

        if let Err(e) = x.parse::<f64>() {
            report.error(format!(
                "An error occured for patch coordinate x{row}: {e} ('{x}')"
            ));
        }
        if let Err(e) = y.parse::<f64>() {
            report.error(format!(
                "An error occured for patch coordinate y{row}: {e} ('{y}')"
            ));
        }
        if release_site != "y" && release_site != "n" {
            report.error(format!(
                "Patch coordinate {row} has an invalid release site choice."
            ));
        }
    }
}

/// Release times: one integer in `[0, max_t]` per line.
///
/// An out-of-range integer is an error. A line that is not an integer is a
/// warning unless `options.strict_release_times` is set.
pub(super) fn check_release_times(
    path: &Path,
    max_t: u32,
    options: &ValidationOptions,
    report: &mut ValidationReport,
) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            report.error(format!("An error occured with the release times file: {e}"));
            return;
        }
    };

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if INTEGER_LINE.is_match(line) {
            // Anything too large for i64 is out of range too.
            let in_range = line
                .parse::<i64>()
                .map(|t| (0..=i64::from(max_t)).contains(&t))
                .unwrap_or(false);
            if !in_range {
                report.error(format!(
                    "Release time t{} is out of bounds 0 ≤ t ≤ max_t.",
                    i + 1
                ));
            }
        } else {
            let message = format!("Release time t{} is not an integer.", i + 1);
            if options.strict_release_times {
                report.error(message);
            } else {
                report.warning(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("1\n\n2.5 # wet\n").unwrap(), vec![1.0, 2.5]);
        assert!(parse_column("1 2\n").is_err());
        assert!(parse_column("one\n").is_err());
    }

    #[test]
    fn test_integer_pattern() {
        assert!(INTEGER_LINE.is_match("12"));
        assert!(INTEGER_LINE.is_match("-3"));
        assert!(INTEGER_LINE.is_match("+7"));
        assert!(!INTEGER_LINE.is_match("1.0"));
        assert!(!INTEGER_LINE.is_match(""));
        assert!(!INTEGER_LINE.is_match("1e3"));
    }
}
