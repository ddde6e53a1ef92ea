use std::path::{Path, PathBuf};

use crate::data::model::Feature;
use crate::error::{Result, SegmentError};

// ---------------------------------------------------------------------------
// Validated clustering request
// ---------------------------------------------------------------------------

/// The user's choices for one clustering run, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRequest {
    pub path: PathBuf,
    /// Non-empty, in [`Feature::ALL`] order.
    pub features: Vec<Feature>,
    /// At least 1.
    pub n_clusters: usize,
}

impl ClusterRequest {
    /// Validate raw control values. Nothing here touches the file system;
    /// a bad path only surfaces when the table is loaded.
    pub fn collect(
        path: Option<&Path>,
        selection: &FeatureSelection,
        cluster_count: &str,
    ) -> Result<Self> {
        let features = selection.features();
        if features.is_empty() {
            return Err(SegmentError::Validation("no features selected"));
        }

        let n_clusters = parse_cluster_count(cluster_count)
            .ok_or(SegmentError::Validation("invalid cluster count"))?;

        let path = path
            .ok_or(SegmentError::Validation("no file selected"))?
            .to_path_buf();

        Ok(ClusterRequest {
            path,
            features,
            n_clusters,
        })
    }
}

fn parse_cluster_count(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok().filter(|&n| n >= 1)
}

// ---------------------------------------------------------------------------
// Checkbox state
// ---------------------------------------------------------------------------

/// One checkbox per [`Feature`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSelection {
    checked: [bool; 3],
}

impl FeatureSelection {
    pub fn is_checked(&self, feature: Feature) -> bool {
        self.checked[Self::slot(feature)]
    }

    pub fn checked_mut(&mut self, feature: Feature) -> &mut bool {
        &mut self.checked[Self::slot(feature)]
    }

    pub fn set(&mut self, feature: Feature, on: bool) {
        *self.checked_mut(feature) = on;
    }

    /// Checked features in fixed order.
    pub fn features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|&f| self.is_checked(f))
            .collect()
    }

    fn slot(feature: Feature) -> usize {
        feature as usize
    }
}
