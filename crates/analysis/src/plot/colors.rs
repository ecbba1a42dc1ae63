//! Named colours of the charts.

use crate::data::{Genotype, TotalsLine, NO_POPULATION};
use plotters::style::RGBColor;

pub const MEDIUM_TURQUOISE: RGBColor = RGBColor(72, 209, 204);
pub const DARK_CYAN: RGBColor = RGBColor(0, 139, 139);
pub const ROYAL_BLUE: RGBColor = RGBColor(65, 105, 225);
pub const SLATE_GRAY: RGBColor = RGBColor(112, 128, 144);
pub const REBECCA_PURPLE: RGBColor = RGBColor(102, 51, 153);
pub const DARK_VIOLET: RGBColor = RGBColor(148, 0, 211);
pub const HOT_PINK: RGBColor = RGBColor(255, 105, 180);
pub const PERU: RGBColor = RGBColor(205, 133, 63);
pub const DARK_GRAY: RGBColor = RGBColor(169, 169, 169);
pub const LIGHT_SALMON: RGBColor = RGBColor(255, 160, 122);
pub const BLACK: RGBColor = RGBColor(0, 0, 0);

/// One colour per 0.1-wide frequency bin, from [0, 0.1) up to [0.9, 1].
pub const FREQUENCY_BINS: [RGBColor; 10] = [
    RGBColor(127, 255, 212),
    MEDIUM_TURQUOISE,
    DARK_CYAN,
    RGBColor(70, 130, 180),
    ROYAL_BLUE,
    RGBColor(0, 0, 205),
    RGBColor(106, 90, 205),
    DARK_VIOLET,
    RGBColor(75, 0, 130),
    BLACK,
];

/// Colour-bar entries from bottom to top: reserved colours first.
pub fn legend_entries() -> Vec<(RGBColor, String)> {
    let mut entries = vec![(DARK_GRAY, "no pop".to_string()), (LIGHT_SALMON, "wild".to_string())];
    entries.extend(
        FREQUENCY_BINS
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, format!("{:.1}", i as f64 / 10.0))),
    );
    entries
}

pub fn totals_line(line: TotalsLine) -> RGBColor {
    match line {
        TotalsLine::Genotype(Genotype::WW) => MEDIUM_TURQUOISE,
        TotalsLine::Genotype(Genotype::WD) => DARK_CYAN,
        TotalsLine::Genotype(Genotype::DD) => ROYAL_BLUE,
        TotalsLine::Genotype(Genotype::WR) => SLATE_GRAY,
        TotalsLine::Genotype(Genotype::RR) => REBECCA_PURPLE,
        TotalsLine::Genotype(Genotype::DR) => DARK_VIOLET,
        TotalsLine::All => BLACK,
        TotalsLine::Transmitting => HOT_PINK,
    }
}

/// Colour of a patch with drive allele frequency `value`.
pub fn frequency_color(value: f64) -> RGBColor {
    if value <= NO_POPULATION {
        DARK_GRAY
    } else if value < 0.0 {
        LIGHT_SALMON
    } else {
        let bin = ((value * 10.0).floor() as usize).min(FREQUENCY_BINS.len() - 1);
        FREQUENCY_BINS[bin]
    }
}
