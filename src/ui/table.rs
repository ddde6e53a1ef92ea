use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 6] = [
    "Cluster",
    "Avg Spent",
    "Avg Purchases",
    "Avg Age",
    "Avg CLV",
    "Count",
];

// ---------------------------------------------------------------------------
// Cluster summary table (bottom panel)
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, state: &AppState) {
    let (seg, colors) = match (&state.result, &state.colors) {
        (Some(seg), Some(colors)) => (seg, colors),
        _ => {
            ui.label("No clusters yet.");
            return;
        }
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(60.0))
        .columns(Column::remainder().at_least(80.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for s in &seg.summary {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(s.cluster.to_string())
                                .color(colors.color_for(s.cluster))
                                .strong(),
                        );
                    });
                    for value in [s.avg_spent, s.avg_purchases, s.avg_age, s.avg_clv] {
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{value:.2}"));
                        });
                    }
                    row.col(|ui: &mut Ui| {
                        ui.label(s.count.to_string());
                    });
                });
            }
        });
}
