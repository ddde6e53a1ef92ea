use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Segment scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Scatter `total_spent` against `number_of_purchases`, one series per
/// cluster.
pub fn segment_plot(ui: &mut Ui, state: &AppState) {
    let (seg, colors) = match (&state.result, &state.colors) {
        (Some(seg), Some(colors)) => (seg, colors),
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Select a file, pick features, and press Cluster");
            });
            return;
        }
    };

    Plot::new("segment_plot")
        .legend(Legend::default())
        .x_axis_label("Total Spent")
        .y_axis_label("Number of Purchases")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for summary in &seg.summary {
                let points: PlotPoints = seg
                    .rows
                    .iter()
                    .filter(|r| r.cluster == summary.cluster)
                    .map(|r| [r.total_spent, r.number_of_purchases])
                    .collect();

                let series = Points::new(points)
                    .name(format!("Cluster {}", summary.cluster))
                    .color(colors.color_for(summary.cluster).gamma_multiply(0.8))
                    .radius(3.0);

                plot_ui.points(series);
            }
        });
}
