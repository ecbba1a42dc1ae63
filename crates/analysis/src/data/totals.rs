//! Genotype totals over time and the allele frequencies derived from them.

use super::table::Table;
use crate::errors::DataFileError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Male genotype classes, in data file column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genotype {
    WW,
    WD,
    DD,
    WR,
    RR,
    DR,
}

impl Genotype {
    pub const ALL: [Genotype; 6] = [
        Genotype::WW,
        Genotype::WD,
        Genotype::DD,
        Genotype::WR,
        Genotype::RR,
        Genotype::DR,
    ];

    /// Genotypes that can still transmit disease.
    pub const TRANSMITTING: [Genotype; 3] = [Genotype::WW, Genotype::WD, Genotype::WR];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WW => "WW",
            Self::WD => "WD",
            Self::DD => "DD",
            Self::WR => "WR",
            Self::RR => "RR",
            Self::DR => "DR",
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counts of the six genotypes, indexed by [`Genotype::index`].
pub type GenotypeCounts = [f64; 6];

fn sum(counts: &GenotypeCounts, genotypes: &[Genotype]) -> f64 {
    genotypes.iter().map(|g| counts[g.index()]).sum()
}

/// One line of the totals chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalsLine {
    Genotype(Genotype),
    /// Sum of all six genotypes.
    All,
    /// WW + WD + WR.
    Transmitting,
}

impl TotalsLine {
    /// Every line, in legend order.
    pub fn all() -> Vec<TotalsLine> {
        let mut lines: Vec<_> = Genotype::ALL.into_iter().map(Self::Genotype).collect();
        lines.push(Self::All);
        lines.push(Self::Transmitting);
        lines
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Genotype(g) => g.label(),
            Self::All => "Total",
            Self::Transmitting => "Transmitting (WW+WD+WR)",
        }
    }

    pub fn value(&self, counts: &GenotypeCounts) -> f64 {
        match self {
            Self::Genotype(g) => counts[g.index()],
            Self::All => sum(counts, &Genotype::ALL),
            Self::Transmitting => sum(counts, &Genotype::TRANSMITTING),
        }
    }
}

impl FromStr for TotalsLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Some(g) = Genotype::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(key))
        {
            return Ok(Self::Genotype(g));
        }
        match key.to_ascii_lowercase().as_str() {
            "all" | "total" => Ok(Self::All),
            "transmitting" | "trans" => Ok(Self::Transmitting),
            _ => Err(format!(
                "unknown line '{s}' (expected WW, WD, DD, WR, RR, DR, all or transmitting)"
            )),
        }
    }
}

/// Allele frequencies for one day. Alleles are counted once per genotype
/// that carries them, so the three values need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlleleFrequencies {
    pub wild: f64,
    pub drive: f64,
    pub resistance: f64,
}

impl AlleleFrequencies {
    /// All zero when the population is empty.
    pub fn from_counts(counts: &GenotypeCounts) -> Self {
        use Genotype::*;
        let total = sum(counts, &Genotype::ALL);
        if total == 0.0 {
            return Self::default();
        }
        Self {
            wild: sum(counts, &[WW, WD, WR]) / total,
            drive: sum(counts, &[WD, DD, DR]) / total,
            resistance: sum(counts, &[WR, RR, DR]) / total,
        }
    }
}

/// Genotype counts per recorded day from a `Totals` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalsSeries {
    pub days: Vec<f64>,
    pub counts: Vec<GenotypeCounts>,
}

impl TotalsSeries {
    pub fn read(path: &Path) -> Result<Self, DataFileError> {
        Ok(Self::from_table(&Table::read(path, 7)?))
    }

    pub fn from_table(table: &Table) -> Self {
        let mut series = Self::default();
        for row in table.rows() {
            series.days.push(row[0]);
            let mut counts = [0.0; 6];
            counts.copy_from_slice(&row[1..7]);
            series.counts.push(counts);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Drop the first `days` rows (burn-in).
    pub fn skip_days(mut self, days: usize) -> Self {
        let n = days.min(self.days.len());
        self.days.drain(..n);
        self.counts.drain(..n);
        self
    }

    /// `(day, value)` points of one chart line.
    pub fn line(&self, line: TotalsLine) -> Vec<(f64, f64)> {
        self.days
            .iter()
            .zip(&self.counts)
            .map(|(&day, counts)| (day, line.value(counts)))
            .collect()
    }

    pub fn allele_frequencies(&self) -> AlleleSeries {
        AlleleSeries {
            days: self.days.clone(),
            frequencies: self.counts.iter().map(AlleleFrequencies::from_counts).collect(),
        }
    }
}

/// Allele frequencies per recorded day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlleleSeries {
    pub days: Vec<f64>,
    pub frequencies: Vec<AlleleFrequencies>,
}

impl AlleleSeries {
    pub fn wild(&self) -> Vec<(f64, f64)> {
        self.points(|f| f.wild)
    }

    pub fn drive(&self) -> Vec<(f64, f64)> {
        self.points(|f| f.drive)
    }

    pub fn resistance(&self) -> Vec<(f64, f64)> {
        self.points(|f| f.resistance)
    }

    fn points(&self, pick: impl Fn(&AlleleFrequencies) -> f64) -> Vec<(f64, f64)> {
        self.days
            .iter()
            .zip(&self.frequencies)
            .map(|(&day, f)| (day, pick(f)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_allele_frequencies() {
        let f = AlleleFrequencies::from_counts(&[40.0, 30.0, 10.0, 10.0, 5.0, 5.0]);
        assert!(close(f.wild, 0.80));
        assert!(close(f.drive, 0.45));
        assert!(close(f.resistance, 0.20));
    }

    #[test]
    fn test_allele_frequencies_empty_population() {
        assert_eq!(
            AlleleFrequencies::from_counts(&[0.0; 6]),
            AlleleFrequencies::default()
        );
    }

    #[test]
    fn test_aggregate_lines() {
        let counts = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
        assert_eq!(TotalsLine::All.value(&counts), 63.0);
        assert_eq!(TotalsLine::Transmitting.value(&counts), 11.0);
        assert_eq!(TotalsLine::Genotype(Genotype::RR).value(&counts), 16.0);
    }

    #[test]
    fn test_parse_lines() {
        assert_eq!("dr".parse::<TotalsLine>(), Ok(TotalsLine::Genotype(Genotype::DR)));
        assert_eq!("All".parse::<TotalsLine>(), Ok(TotalsLine::All));
        assert_eq!("transmitting".parse::<TotalsLine>(), Ok(TotalsLine::Transmitting));
        assert!("XY".parse::<TotalsLine>().is_err());
        assert_eq!(TotalsLine::all().len(), 8);
    }

    #[test]
    fn test_series_from_file_text() {
        let text = "Totals\nday WW WD DD WR RR DR\n0 10 0 0 0 0 0\n1 8 2 0 0 0 0\n2 6 3 1 0 0 0\n";
        let table = Table::parse(text, Path::new("t"), 7).unwrap();
        let series = TotalsSeries::from_table(&table);
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.line(TotalsLine::Genotype(Genotype::WD)),
            vec![(0.0, 0.0), (1.0, 2.0), (2.0, 3.0)]
        );

        let skipped = series.clone().skip_days(2);
        assert_eq!(skipped.days, vec![2.0]);
        assert!(series.clone().skip_days(10).is_empty());

        let alleles = series.allele_frequencies();
        assert_eq!(alleles.drive()[1], (1.0, 0.2));
        assert_eq!(alleles.wild()[0], (0.0, 1.0));
    }
}
