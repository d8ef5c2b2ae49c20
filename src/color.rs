use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::SourceConfig;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Source colours
// ---------------------------------------------------------------------------

/// One colour per source: the configured RGB if present, otherwise the
/// palette entry at the source's position.
pub fn source_colors(sources: &[SourceConfig]) -> Vec<Color32> {
    let palette = generate_palette(sources.len());
    sources
        .iter()
        .zip(palette)
        .map(|(src, fallback)| match src.color {
            Some([r, g, b]) => Color32::from_rgb(r, g, b),
            None => fallback,
        })
        .collect()
}
