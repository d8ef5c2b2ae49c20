use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::ColorImage;
use serde::Serialize;

use crate::state::OperationChart;

// ---------------------------------------------------------------------------
// CSV export of the smoothed chart data
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PointRecord<'a> {
    operation: &'a str,
    source: &'a str,
    elements: f64,
    nanoseconds: f64,
}

/// Write every plotted point as `operation,source,elements,nanoseconds`.
pub fn write_csv(path: &Path, charts: &[OperationChart], sources: &[String]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("failed to create {path:?}"))?;

    let mut n_points = 0;
    for chart in charts {
        for (line, source) in chart.lines.iter().zip(sources) {
            for &[elements, nanoseconds] in &line.points {
                writer
                    .serialize(PointRecord {
                        operation: &chart.operation,
                        source,
                        elements,
                        nanoseconds,
                    })
                    .context("failed to write CSV record")?;
                n_points += 1;
            }
        }
    }
    writer.flush().context("failed to flush CSV writer")?;

    log::info!("Wrote {n_points} points to {path:?}");
    Ok(())
}

// ---------------------------------------------------------------------------
// PNG export of a window screenshot
// ---------------------------------------------------------------------------

pub fn write_png(path: &Path, screenshot: &ColorImage) -> Result<()> {
    let [width, height] = screenshot.size;
    let image = image::RgbaImage::from_raw(
        width as u32,
        height as u32,
        screenshot.as_raw().to_vec(),
    )
    .context("screenshot buffer does not match its size")?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {path:?}"))?;

    log::info!("Saved {width}x{height} chart image to {path:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use eframe::egui::Color32;

    use super::*;
    use crate::state::ChartLine;

    #[test]
    fn csv_has_one_record_per_point() {
        let charts = vec![OperationChart {
            operation: "insert".into(),
            lines: vec![
                ChartLine {
                    name: "Tree insert".into(),
                    color: Color32::GREEN,
                    points: vec![[5.0, 40.0], [15.0, 42.5]],
                },
                ChartLine {
                    name: "vector insert".into(),
                    color: Color32::RED,
                    points: vec![[5.0, 10.0]],
                },
            ],
        }];
        let sources = vec!["Tree".to_string(), "vector".to_string()];
        let path = std::env::temp_dir().join(format!("speedgraph-{}.csv", std::process::id()));

        write_csv(&path, &charts, &sources).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "operation,source,elements,nanoseconds");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "insert,Tree,15.0,42.5");
        assert_eq!(lines[3], "insert,vector,5.0,10.0");
    }

    #[test]
    fn png_round_trips_dimensions() {
        let screenshot = ColorImage::new([3, 2], Color32::WHITE);
        let path = std::env::temp_dir().join(format!("speedgraph-{}.png", std::process::id()));

        write_png(&path, &screenshot).unwrap();
        let decoded = image::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn png_into_directory_path_fails() {
        let screenshot = ColorImage::new([2, 2], Color32::WHITE);
        let err = write_png(&std::env::temp_dir(), &screenshot).unwrap_err();
        assert!(format!("{err:#}").contains("failed to write"));
    }
}
