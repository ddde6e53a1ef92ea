use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::data::model::Feature;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – clustering controls
// ---------------------------------------------------------------------------

/// Render the controls: file, features, cluster count, trigger, errors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Customer Segmentation");
    ui.separator();

    // ---- Input file ----
    ui.strong("Data file");
    let file_label = state
        .file_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "No file selected".to_string());
    let label = ui.label(&file_label);
    if let Some(path) = &state.file_path {
        label.on_hover_text(path.display().to_string());
    }
    if ui.button("Select File…").clicked() {
        open_file_dialog(state);
    }
    ui.separator();

    // ---- Features ----
    ui.strong("Features");
    for feature in Feature::ALL {
        ui.checkbox(state.selection.checked_mut(feature), feature.to_string());
    }
    ui.separator();

    // ---- Cluster count ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Number of Clusters:");
        ui.add(egui::TextEdit::singleline(&mut state.cluster_count).desired_width(48.0));
    });
    ui.add_space(4.0);

    if ui.button("Cluster").clicked() {
        state.run_clustering();
    }

    // ---- Error area ----
    if let Some(err) = &state.error {
        ui.add_space(8.0);
        ui.label(RichText::new(err.kind()).small().color(Color32::RED));
        ui.label(RichText::new(err.user_message()).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(seg) = &state.result {
            let features: Vec<String> = seg.features.iter().map(|f| f.to_string()).collect();
            ui.label(format!(
                "{} customers in {} clusters on {}",
                seg.rows.len(),
                seg.summary.len(),
                features.join(", ")
            ));
            if state.stale {
                ui.label(RichText::new("(from previous run)").color(Color32::YELLOW));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open customer data")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.set_file(path);
    }
}
