use std::path::PathBuf;

use crate::color::ClusterColors;
use crate::error::SegmentError;
use crate::input::{ClusterRequest, FeatureSelection};
use crate::segment::kmeans::KMeansSettings;
use crate::segment::{self, Segmentation};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. This is the session the
/// clustering action reads its inputs from; nothing lives in globals.
pub struct AppState {
    /// File chosen in the picker (None until the user picks one).
    pub file_path: Option<PathBuf>,

    /// Feature checkboxes.
    pub selection: FeatureSelection,

    /// Raw text of the cluster-count entry.
    pub cluster_count: String,

    /// K-means tunables used for every run.
    pub settings: KMeansSettings,

    /// Last successful run.
    pub result: Option<Segmentation>,

    /// Colours for `result`'s clusters.
    pub colors: Option<ClusterColors>,

    /// Set when a run failed after `result` was produced, so the UI can
    /// mark the shown results as belonging to an earlier run.
    pub stale: bool,

    /// Error from the last run.
    pub error: Option<SegmentError>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            file_path: None,
            selection: FeatureSelection::default(),
            cluster_count: "3".to_string(),
            settings: KMeansSettings::default(),
            result: None,
            colors: None,
            stale: false,
            error: None,
        }
    }
}

impl AppState {
    /// Start with a file already chosen (e.g. from the command line).
    pub fn with_file(path: Option<PathBuf>) -> Self {
        Self {
            file_path: path,
            ..Self::default()
        }
    }

    /// Remember the picked file. Results stay until the next run.
    pub fn set_file(&mut self, path: PathBuf) {
        log::info!("Selected {}", path.display());
        self.file_path = Some(path);
    }

    /// Handle the "Cluster" action: validate, load, segment, and either
    /// replace the results or record the error. Runs to completion on the
    /// calling (UI) thread.
    pub fn run_clustering(&mut self) {
        let outcome = ClusterRequest::collect(
            self.file_path.as_deref(),
            &self.selection,
            &self.cluster_count,
        )
        .and_then(|request| segment::run(&request, &self.settings));

        match outcome {
            Ok(seg) => self.set_result(seg),
            Err(e) => {
                log::error!("Clustering failed: {e}");
                self.stale = self.result.is_some();
                self.error = Some(e);
            }
        }
    }

    fn set_result(&mut self, seg: Segmentation) {
        self.colors = Some(ClusterColors::new(seg.n_clusters));
        self.result = Some(seg);
        self.stale = false;
        self.error = None;
    }

    /// Human-readable message for the error area.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(SegmentError::user_message)
    }
}
