use super::table::Table;
use crate::errors::DataFileError;
use std::path::Path;

/// Patch positions from a `CoordinateList` file, in patch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinates {
    pub points: Vec<(f64, f64)>,
}

impl Coordinates {
    pub fn read(path: &Path) -> Result<Self, DataFileError> {
        Ok(Self::from_table(&Table::read(path, 3)?))
    }

    pub fn from_table(table: &Table) -> Self {
        Self {
            points: table.rows().iter().map(|row| (row[1], row[2])).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_range(&self) -> (f64, f64) {
        axis_range(self.points.iter().map(|p| p.0))
    }

    pub fn y_range(&self) -> (f64, f64) {
        axis_range(self.points.iter().map(|p| p.1))
    }
}

/// Axis limits spanning `values`. A single distinct value `v` is padded by
/// half its magnitude on each side, or by 0.5 when it is zero, so the range
/// never has zero width.
pub fn axis_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return (0.0, 1.0);
    }
    if min < max {
        return (min, max);
    }
    let pad = if min == 0.0 { 0.5 } else { min.abs() / 2.0 };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range() {
        assert_eq!(axis_range([1.0, -2.0, 3.0]), (-2.0, 3.0));
        assert_eq!(axis_range([4.0]), (2.0, 6.0));
        assert_eq!(axis_range([-4.0, -4.0]), (-6.0, -2.0));
        assert_eq!(axis_range([0.0]), (-0.5, 0.5));
        assert_eq!(axis_range(Vec::new()), (0.0, 1.0));
    }

    #[test]
    fn test_reads_x_and_y_columns() {
        let text = "Coordinates\nindex x y\n0 0.5 0.25\n1 0.75 1\n";
        let table = Table::parse(text, Path::new("c"), 3).unwrap();
        let coords = Coordinates::from_table(&table);
        assert_eq!(coords.points, vec![(0.5, 0.25), (0.75, 1.0)]);
        assert_eq!(coords.x_range(), (0.5, 0.75));
    }

    #[test]
    fn test_single_patch_has_nonzero_ranges() {
        let coords = Coordinates {
            points: vec![(2.0, 0.0)],
        };
        assert_eq!(coords.x_range(), (1.0, 3.0));
        assert_eq!(coords.y_range(), (-0.5, 0.5));
    }
}
