use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use eframe::egui::{self, ColorImage};

use crate::export::write_png;
use crate::state::AppState;
use crate::ui::plot;

/// Frames drawn before the screenshot is requested, so plot bounds settle.
const FRAMES_BEFORE_CAPTURE: u32 = 3;
/// Frames to wait for the screenshot after requesting it.
const CAPTURE_TIMEOUT_FRAMES: u32 = 120;

/// Slot where the window reports a failed PNG export back to its caller.
pub type ExportFailure = Rc<RefCell<Option<anyhow::Error>>>;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpeedGraphApp {
    pub state: AppState,
    /// Where to save a screenshot of the window before closing it.
    png_export: Option<PngExport>,
    failure: ExportFailure,
}

impl SpeedGraphApp {
    pub fn new(state: AppState, png_path: Option<PathBuf>, failure: ExportFailure) -> Self {
        Self {
            state,
            png_export: png_path.map(PngExport::new),
            failure,
        }
    }

    /// Drive the capture-then-close sequence for `--export-png`.
    fn poll_export(&mut self, ctx: &egui::Context) {
        let Some(export) = &mut self.png_export else {
            return;
        };

        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });

        match export.advance(screenshot.as_deref()) {
            ExportStep::Wait => {}
            ExportStep::Capture => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            }
            ExportStep::Done(result) => {
                if let Err(e) = result {
                    log::error!("Failed to export chart image: {e:#}");
                    *self.failure.borrow_mut() = Some(e);
                }
                self.png_export = None;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }
        ctx.request_repaint();
    }
}

impl eframe::App for SpeedGraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_grid(ui, &self.state);
        });

        self.poll_export(ctx);
    }
}

// ---------------------------------------------------------------------------
// PNG export sequence
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum ExportStep {
    /// Keep drawing.
    Wait,
    /// Ask the viewport for a screenshot.
    Capture,
    /// Export finished (or gave up); close the window.
    Done(Result<()>),
}

struct PngExport {
    path: PathBuf,
    frames: u32,
    requested: bool,
}

impl PngExport {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            frames: 0,
            requested: false,
        }
    }

    /// Called once per frame with the screenshot delivered in that frame, if any.
    fn advance(&mut self, screenshot: Option<&ColorImage>) -> ExportStep {
        if let Some(image) = screenshot {
            return ExportStep::Done(write_png(&self.path, image));
        }

        self.frames += 1;
        if !self.requested {
            if self.frames >= FRAMES_BEFORE_CAPTURE {
                self.requested = true;
                return ExportStep::Capture;
            }
            return ExportStep::Wait;
        }

        if self.frames >= FRAMES_BEFORE_CAPTURE + CAPTURE_TIMEOUT_FRAMES {
            return ExportStep::Done(Err(anyhow!(
                "no screenshot received within {CAPTURE_TIMEOUT_FRAMES} frames"
            )));
        }
        ExportStep::Wait
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::Color32;

    use super::*;

    fn temp_png(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("speedgraph-app-{}-{name}.png", std::process::id()))
    }

    #[test]
    fn requests_capture_once_after_warmup_frames() {
        let mut export = PngExport::new(temp_png("warmup"));
        for _ in 1..FRAMES_BEFORE_CAPTURE {
            assert!(matches!(export.advance(None), ExportStep::Wait));
        }
        assert!(matches!(export.advance(None), ExportStep::Capture));
        assert!(matches!(export.advance(None), ExportStep::Wait));
    }

    #[test]
    fn screenshot_is_written_and_finishes() {
        let path = temp_png("written");
        let mut export = PngExport::new(path.clone());
        let image = ColorImage::new([4, 4], Color32::BLACK);

        let step = export.advance(Some(&image));
        let written = path.exists();
        std::fs::remove_file(&path).ok();

        assert!(matches!(step, ExportStep::Done(Ok(()))));
        assert!(written);
    }

    #[test]
    fn unwritable_path_finishes_with_error() {
        let mut export = PngExport::new(std::env::temp_dir());
        let image = ColorImage::new([2, 2], Color32::WHITE);
        assert!(matches!(export.advance(Some(&image)), ExportStep::Done(Err(_))));
    }

    #[test]
    fn missing_screenshot_times_out_with_error() {
        let mut export = PngExport::new(temp_png("timeout"));
        let mut steps = 0;
        let result = loop {
            steps += 1;
            if let ExportStep::Done(result) = export.advance(None) {
                break result;
            }
            assert!(steps < 10_000, "export never finished");
        };
        assert!(result.is_err());
        assert_eq!(steps, FRAMES_BEFORE_CAPTURE + CAPTURE_TIMEOUT_FRAMES);
    }
}
