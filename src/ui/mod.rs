/// Presentation layer: egui widgets reading from [`crate::state::AppState`].
///
/// * `panels` – top bar and the left control panel
/// * `table`  – per-cluster summary table
/// * `plot`   – spend vs. purchases scatter plot

pub mod panels;
pub mod plot;
pub mod table;
