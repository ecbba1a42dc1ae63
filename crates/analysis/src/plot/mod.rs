//! Chart rendering with plotters.
//!
//! Each chart implements [`Chart`], which draws onto any plotters backend,
//! and [`render`] picks the backend from the output file extension.

pub mod animation;
pub mod charts;
pub mod colors;

pub use animation::{
    check_interval, export_gif, export_gif_blocking, play, LocalAnimation, DEFAULT_INTERVAL_MS,
    INTERVAL_RANGE_MS,
};
pub use charts::{AlleleChart, CoordsChart, LocalChart, TotalsChart};

use crate::errors::RenderError;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Default image size in pixels.
pub const DEFAULT_SIZE: (u32, u32) = (800, 600);

pub type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Something that can draw itself onto a drawing area.
pub trait Chart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB>;
}

/// Still image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(RenderError::Format(ext)),
        }
    }
}

pub(crate) fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Draw `chart` into the image file `path` (`.png` or `.svg`).
pub fn render(chart: &impl Chart, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
    match ImageFormat::from_path(path)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            chart.draw(&root).map_err(draw_err)?;
            root.present().map_err(draw_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            chart.draw(&root).map_err(draw_err)?;
            root.present().map_err(draw_err)?;
        }
    }
    tracing::debug!(path = %path.display(), "Rendered chart");
    Ok(())
}
