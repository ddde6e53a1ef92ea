use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
// Cluster colours: label → Color32
// ---------------------------------------------------------------------------

/// One colour per cluster label of a run, stable for the run's `k`.
#[derive(Debug, Clone)]
pub struct ClusterColors {
    colors: Vec<Color32>,
}

impl ClusterColors {
    pub fn new(n_clusters: usize) -> Self {
        ClusterColors {
            colors: generate_palette(n_clusters),
        }
    }

    /// Colour for a label; labels beyond `k` fall back to grey.
    pub fn color_for(&self, cluster: usize) -> Color32 {
        self.colors.get(cluster).copied().unwrap_or(Color32::GRAY)
    }
}
