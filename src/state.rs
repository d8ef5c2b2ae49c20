use anyhow::{bail, Context, Result};
use eframe::egui::Color32;

use crate::color::source_colors;
use crate::config::Config;
use crate::data::loader::load_file;
use crate::data::model::{Series, SmoothedSeries};

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// One line on a chart: a source's smoothed timings for one operation.
#[derive(Debug, Clone)]
pub struct ChartLine {
    /// Legend entry, e.g. `"Tree push_back"`.
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw the chart of a single operation.
#[derive(Debug, Clone)]
pub struct OperationChart {
    pub operation: String,
    pub lines: Vec<ChartLine>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Loaded, smoothed and chart-ready data, independent of rendering.
pub struct AppState {
    pub config: Config,
    /// One chart per plotted operation, in column order.
    pub charts: Vec<OperationChart>,
}

impl AppState {
    /// Load every configured source, smooth it and build the charts.
    pub fn load(config: Config) -> Result<Self> {
        config.validate().context("invalid configuration")?;

        let mut smoothed = Vec::with_capacity(config.sources.len());
        for source in &config.sources {
            let series = load_file(&source.path)
                .with_context(|| format!("failed to load {} results", source.label))?;
            smoothed.push(smooth_source(&config, &source.label, &series)?);
        }

        let charts = build_charts(&config, &smoothed);
        Ok(Self { config, charts })
    }
}

/// Check a source's width against the plotted operations, then smooth it.
fn smooth_source(config: &Config, label: &str, series: &Series) -> Result<SmoothedSeries> {
    let needed = config.plotted().len();
    if !series.is_empty() && series.width() < needed {
        bail!(
            "{label} results have {} measurements per line, but {needed} operations are plotted",
            series.width()
        );
    }
    if series.width() > needed {
        log::warn!(
            "{label} results have {} measurements per line; only the first {needed} are plotted",
            series.width()
        );
    }

    let smoothed = series.smooth(config.block_size);
    log::debug!(
        "Smoothed {label}: {} rows into {} points (block size {})",
        series.len(),
        smoothed.sizes.len(),
        config.block_size
    );
    Ok(smoothed)
}

/// One chart per plotted operation, one line per source.
pub fn build_charts(config: &Config, smoothed: &[SmoothedSeries]) -> Vec<OperationChart> {
    let colors = source_colors(&config.sources);

    config
        .plotted()
        .iter()
        .enumerate()
        .map(|(op, operation)| {
            let lines = config
                .sources
                .iter()
                .zip(&colors)
                .zip(smoothed)
                .map(|((source, &color), series)| ChartLine {
                    name: format!("{} {operation}", source.label),
                    color,
                    points: series.points(op).unwrap_or_default(),
                })
                .collect();
            OperationChart {
                operation: operation.clone(),
                lines,
            }
        })
        .collect()
}
