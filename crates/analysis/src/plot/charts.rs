use super::colors::{self, frequency_color, legend_entries, HOT_PINK, PERU, REBECCA_PURPLE, ROYAL_BLUE};
use super::{Chart, DrawResult};
use crate::data::{axis_range, AlleleSeries, Coordinates, LocalFrame, TotalsLine, TotalsSeries};
use crate::errors::RenderError;
use plotters::coord::Shift;
use plotters::prelude::*;

const FONT: &str = "sans-serif";

/// Genotype totals over time, one line per selected [`TotalsLine`].
#[derive(Debug)]
pub struct TotalsChart<'a> {
    series: &'a TotalsSeries,
    lines: Vec<TotalsLine>,
    title: String,
}

impl<'a> TotalsChart<'a> {
    pub fn new(
        series: &'a TotalsSeries,
        lines: Vec<TotalsLine>,
        title: impl Into<String>,
    ) -> Result<Self, RenderError> {
        if series.is_empty() {
            return Err(RenderError::Empty("the totals file has no rows"));
        }
        if lines.is_empty() {
            return Err(RenderError::Empty("no lines selected"));
        }
        Ok(Self {
            series,
            lines,
            title: title.into(),
        })
    }
}

impl Chart for TotalsChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let (x0, x1) = axis_range(self.series.days.iter().copied());
        let y_max = self
            .lines
            .iter()
            .flat_map(|&line| self.series.line(line))
            .map(|(_, y)| y)
            .fold(0.0, f64::max);

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, 0.0..(y_max * 1.05).max(1.0))?;
        chart
            .configure_mesh()
            .x_desc("Day")
            .y_desc("Total number of individuals")
            .draw()?;

        for &line in &self.lines {
            let color = colors::totals_line(line);
            chart
                .draw_series(LineSeries::new(self.series.line(line), color))?
                .label(line.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}

/// Wild, drive and resistance allele frequencies over time.
#[derive(Debug)]
pub struct AlleleChart<'a> {
    series: &'a AlleleSeries,
    title: String,
}

impl<'a> AlleleChart<'a> {
    pub fn new(series: &'a AlleleSeries, title: impl Into<String>) -> Result<Self, RenderError> {
        if series.days.is_empty() {
            return Err(RenderError::Empty("the totals file has no rows"));
        }
        Ok(Self {
            series,
            title: title.into(),
        })
    }
}

impl Chart for AlleleChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let (x0, x1) = axis_range(self.series.days.iter().copied());
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, 0.0..1.05)?;
        chart
            .configure_mesh()
            .x_desc("Day")
            .y_desc("Allele frequency")
            .draw()?;

        let lines = [
            ("wild", HOT_PINK, self.series.wild()),
            ("drive", ROYAL_BLUE, self.series.drive()),
            ("r2 (non-functional) resistance", REBECCA_PURPLE, self.series.resistance()),
        ];
        for (label, color, points) in lines {
            chart
                .draw_series(LineSeries::new(points, color))?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}

/// Patch positions.
#[derive(Debug)]
pub struct CoordsChart<'a> {
    coords: &'a Coordinates,
    title: String,
}

impl<'a> CoordsChart<'a> {
    pub fn new(coords: &'a Coordinates, title: impl Into<String>) -> Result<Self, RenderError> {
        if coords.is_empty() {
            return Err(RenderError::Empty("the coordinate list has no patches"));
        }
        Ok(Self {
            coords,
            title: title.into(),
        })
    }
}

impl Chart for CoordsChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let (x0, x1) = self.coords.x_range();
        let (y0, y1) = self.coords.y_range();
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x0..x1, y0..y1)?;
        chart.configure_mesh().x_desc("x").y_desc("y").draw()?;
        chart.draw_series(
            self.coords
                .points
                .iter()
                .map(|&p| Circle::new(p, 2, PERU.filled())),
        )?;
        Ok(())
    }
}

/// Drive allele frequency per patch on one recorded day, with a colour bar.
#[derive(Debug)]
pub struct LocalChart<'a> {
    coords: &'a Coordinates,
    frame: &'a LocalFrame,
    title: String,
}

impl<'a> LocalChart<'a> {
    pub fn new(
        coords: &'a Coordinates,
        frame: &'a LocalFrame,
        title: impl Into<String>,
    ) -> Result<Self, RenderError> {
        if coords.is_empty() {
            return Err(RenderError::Empty("the coordinate list has no patches"));
        }
        Ok(Self {
            coords,
            frame,
            title: title.into(),
        })
    }

    fn caption(&self) -> String {
        if self.title.is_empty() {
            format!("t = {}", self.frame.day)
        } else {
            format!("{}    t = {}", self.title, self.frame.day)
        }
    }
}

impl Chart for LocalChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let width = root.dim_in_pixel().0 as i32;
        let (plot_area, bar_area) = root.split_horizontally(width - 150);

        let (x0, x1) = self.coords.x_range();
        let (y0, y1) = self.coords.y_range();
        let mut chart = ChartBuilder::on(&plot_area)
            .caption(self.caption(), (FONT, 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x0..x1, y0..y1)?;
        chart.configure_mesh().x_desc("x").y_desc("y").draw()?;
        chart.draw_series(
            self.coords
                .points
                .iter()
                .zip(&self.frame.frequencies)
                .map(|(&p, &f)| Circle::new(p, 3, frequency_color(f).filled())),
        )?;

        draw_color_bar(&bar_area)
    }
}

fn draw_color_bar<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
    let (_, height) = area.dim_in_pixel();
    let entries = legend_entries();
    let top = 50;
    let bottom = height as i32 - 50;
    let step = (bottom - top) / entries.len() as i32;
    let text: TextStyle = (FONT, 12).into();

    area.draw_text("Drive allele", &text, (10, 10))?;
    area.draw_text("frequency", &text, (10, 26))?;
    // Lowest entry at the bottom.
    for (i, (color, label)) in entries.iter().enumerate() {
        let y1 = bottom - i as i32 * step;
        let y0 = y1 - step;
        area.draw(&Rectangle::new([(10, y0), (40, y1)], color.filled()))?;
        area.draw_text(label, &text, (48, y1 - 12))?;
    }
    area.draw_text("1.0", &text, (48, bottom - entries.len() as i32 * step - 6))?;
    Ok(())
}
