//! Frame-by-frame display and GIF export of local drive allele frequency.

use super::charts::LocalChart;
use super::{draw_err, render, Chart};
use crate::data::{Coordinates, LocalData, LocalFrame};
use crate::errors::{DataFileError, RenderError};
use plotters::prelude::*;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_INTERVAL_MS: u64 = 200;

pub const INTERVAL_RANGE_MS: RangeInclusive<u64> = 1..=10_000;

pub fn check_interval(ms: u64) -> Result<Duration, RenderError> {
    if INTERVAL_RANGE_MS.contains(&ms) {
        Ok(Duration::from_millis(ms))
    } else {
        Err(RenderError::Interval(ms))
    }
}

/// The recorded frames of one replicate.
#[derive(Debug, Clone)]
pub struct LocalAnimation {
    coords: Coordinates,
    local: LocalData,
    frames: usize,
    title: String,
}

impl LocalAnimation {
    /// Animate the first `frames` frames of `local` (at most as many as it
    /// holds).
    pub fn new(
        coords: Coordinates,
        local: LocalData,
        frames: usize,
        title: impl Into<String>,
    ) -> Result<Self, RenderError> {
        let frames = frames.min(local.frame_count());
        if frames == 0 {
            return Err(RenderError::Empty("no local data frames were recorded"));
        }
        Ok(Self {
            coords,
            local,
            frames,
            title: title.into(),
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn frame(&self, t: usize) -> Result<LocalFrame, RenderError> {
        if t >= self.frames {
            return Err(DataFileError::NoSuchFrame {
                frame: t,
                frames: self.frames,
            }
            .into());
        }
        Ok(self.local.frame(t)?)
    }

    /// Render frame `t` as a still image; returns its simulated day.
    pub fn render_frame(&self, t: usize, path: &Path, size: (u32, u32)) -> Result<u32, RenderError> {
        let frame = self.frame(t)?;
        render(&LocalChart::new(&self.coords, &frame, self.title.as_str())?, path, size)?;
        Ok(frame.day)
    }
}

/// Write every frame to an animated GIF, `interval_ms` apart. Blocks until
/// encoding is done; returns the number of frames written.
pub fn export_gif_blocking(
    animation: &LocalAnimation,
    path: &Path,
    size: (u32, u32),
    interval_ms: u32,
) -> Result<usize, RenderError> {
    let root = BitMapBackend::gif(path, size, interval_ms)
        .map_err(draw_err)?
        .into_drawing_area();
    for t in 0..animation.frame_count() {
        let frame = animation.frame(t)?;
        LocalChart::new(&animation.coords, &frame, animation.title.as_str())?
            .draw(&root)
            .map_err(draw_err)?;
        root.present().map_err(draw_err)?;
    }
    tracing::info!(
        path = %path.display(),
        frames = animation.frame_count(),
        "Animation exported"
    );
    Ok(animation.frame_count())
}

/// [`export_gif_blocking`] on a blocking worker thread.
pub async fn export_gif(
    animation: LocalAnimation,
    path: PathBuf,
    size: (u32, u32),
    interval_ms: u32,
) -> Result<usize, RenderError> {
    tokio::task::spawn_blocking(move || export_gif_blocking(&animation, &path, size, interval_ms))
        .await?
}

/// Re-render `path` once per `interval` with successive frames. Calls
/// `on_frame(index, day)` after each frame is written.
pub async fn play(
    animation: &LocalAnimation,
    path: &Path,
    size: (u32, u32),
    interval: Duration,
    mut on_frame: impl FnMut(usize, u32),
) -> Result<(), RenderError> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    for t in 0..animation.frame_count() {
        ticker.tick().await;
        let day = animation.render_frame(t, path, size)?;
        on_frame(t, day);
    }
    Ok(())
}
