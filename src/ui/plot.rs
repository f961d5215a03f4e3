use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::state::Session;

/// Id of the plot widget that receives the chart.
pub const SCATTER_SLOT: &str = "penguin_scatterplot";

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot for the current selection.
pub fn scatter_plot(ui: &mut Ui, session: &mut Session) {
    let spec = session.chart();

    ui.heading(&spec.title);

    if spec.is_empty() {
        ui.label("No penguins to plot for the current selection.");
    }

    // The marker size is a diameter; egui_plot wants a radius.
    let radius = spec.max_marker_size / 2.0;

    Plot::new(SCATTER_SLOT)
        .legend(Legend::default())
        .x_axis_label(&spec.x_label)
        .y_axis_label(&spec.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &spec.series {
                let [r, g, b] = series.color;
                let points = Points::new(PlotPoints::new(series.points.clone()))
                    .name(&series.name)
                    .color(Color32::from_rgb(r, g, b))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius);
                plot_ui.points(points);
            }
        });
}
