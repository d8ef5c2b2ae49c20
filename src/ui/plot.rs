use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::{AppState, OperationChart};

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Lay the operation charts out in rows of `grid_columns`, sharing the
/// available height evenly.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let charts = &state.charts;
    let columns = state.config.grid_columns.max(1);
    let rows = charts.len().div_ceil(columns).max(1);
    let spacing = ui.spacing().item_spacing.y;
    let cell_height = ((ui.available_height() - spacing * (rows - 1) as f32) / rows as f32).max(50.0);

    for (row, row_charts) in charts.chunks(columns).enumerate() {
        ui.columns(columns, |cells: &mut [Ui]| {
            for (col, (cell, chart)) in cells.iter_mut().zip(row_charts).enumerate() {
                operation_plot(cell, state, chart, row * columns + col, cell_height);
            }
        });
    }
}

/// Render one operation's chart: every source as a line, with a legend.
fn operation_plot(ui: &mut Ui, state: &AppState, chart: &OperationChart, index: usize, height: f32) {
    Plot::new(("operation_plot", index))
        .legend(Legend::default())
        .x_axis_label(state.config.x_label.as_str())
        .y_axis_label(state.config.y_label.as_str())
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for line in &chart.lines {
                let points: PlotPoints = line.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&line.name)
                        .color(line.color)
                        .width(1.5),
                );
            }
        });
}
