use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use speedgraph::app::{ExportFailure, SpeedGraphApp};
use speedgraph::config::Config;
use speedgraph::export;
use speedgraph::state::AppState;

/// Compare tree-list and vector benchmark timings per operation.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON configuration file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Result file of the first source (tree list).
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Result file of the second source (vector).
    #[arg(long)]
    vector: Option<PathBuf>,

    /// Number of samples averaged into one plotted point.
    #[arg(long)]
    block_size: Option<NonZeroUsize>,

    /// Save a PNG of the chart window, then close it.
    #[arg(long, conflicts_with = "no_window")]
    export_png: Option<PathBuf>,

    /// Write the smoothed chart data as CSV.
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Do not open the chart window.
    #[arg(long)]
    no_window: bool,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::debug!("{args:#?}");

    let config = build_config(&args)?;
    let state = AppState::load(config).context("failed to prepare charts")?;

    if let Some(path) = &args.export_csv {
        let sources: Vec<String> = state.config.sources.iter().map(|s| s.label.clone()).collect();
        export::write_csv(path, &state.charts, &sources)?;
    }

    if args.no_window {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let failure = ExportFailure::default();
    let app_failure = failure.clone();
    eframe::run_native(
        "Speed Graph – Tree vs Vector",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SpeedGraphApp::new(state, args.export_png, app_failure)))
        }),
    )
    .map_err(|e| anyhow!("chart window failed: {e}"))?;

    if let Some(error) = failure.take() {
        return Err(error.context("failed to export chart image"));
    }
    Ok(())
}

/// Defaults, then the config file, then command line overrides.
fn build_config(args: &Cli) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path).context("failed to load config")?,
        None => Config::default(),
    };

    if let Some(path) = &args.tree {
        override_source(&mut config, 0, path)?;
    }
    if let Some(path) = &args.vector {
        override_source(&mut config, 1, path)?;
    }
    if let Some(block_size) = args.block_size {
        config.block_size = block_size;
    }

    log::info!(
        "Plotting {:?} from {} sources with block size {}",
        config.plotted(),
        config.sources.len(),
        config.block_size
    );
    Ok(config)
}

fn override_source(config: &mut Config, idx: usize, path: &Path) -> Result<()> {
    let source = config
        .sources
        .get_mut(idx)
        .with_context(|| format!("config has no source #{idx} to override"))?;
    source.path = path.to_path_buf();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_default_config() {
        let args = Cli::parse_from([
            "speedgraph",
            "--tree",
            "bench/tree.txt",
            "--vector",
            "bench/vec.txt",
            "--block-size",
            "250",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.sources[0].path, PathBuf::from("bench/tree.txt"));
        assert_eq!(config.sources[1].path, PathBuf::from("bench/vec.txt"));
        assert_eq!(config.block_size.get(), 250);
        assert_eq!(config.operations.len(), 5);
    }

    #[test]
    fn zero_block_size_flag_is_rejected() {
        assert!(Cli::try_parse_from(["speedgraph", "--block-size", "0"]).is_err());
    }

    #[test]
    fn png_export_requires_a_window() {
        assert!(
            Cli::try_parse_from(["speedgraph", "--export-png", "out.png", "--no-window"]).is_err()
        );
        assert!(Cli::try_parse_from(["speedgraph", "--export-csv", "out.csv", "--no-window"]).is_ok());
    }
}
