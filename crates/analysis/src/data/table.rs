use super::HEADER_LINES;
use crate::errors::DataFileError;
use std::fs;
use std::path::{Path, PathBuf};

/// Rectangular numeric table read from an engine data file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    width: usize,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Read `path`, skipping the header lines.
    pub fn read(path: &Path, min_columns: usize) -> Result<Self, DataFileError> {
        let text = fs::read_to_string(path).map_err(|e| DataFileError::io(path, e))?;
        Self::parse(&text, path, min_columns)
    }

    /// Parse file contents. `path` only labels errors. Blank lines are
    /// skipped; every other row must have the same number of columns, at
    /// least `min_columns`.
    pub fn parse(text: &str, path: &Path, min_columns: usize) -> Result<Self, DataFileError> {
        let mut table = Table::default();
        for (index, line) in text.lines().enumerate().skip(HEADER_LINES) {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| DataFileError::Parse {
                        path: PathBuf::from(path),
                        line: line_no,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let expected = if table.rows.is_empty() {
                min_columns.max(row.len())
            } else {
                table.width
            };
            if row.len() != expected {
                return Err(DataFileError::Columns {
                    path: PathBuf::from(path),
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            table.width = expected;
            table.rows.push(row);
        }
        Ok(table)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }
}
