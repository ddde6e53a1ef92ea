use std::collections::HashSet;

use linfa::prelude::*;
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2};
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use crate::error::{Result, SegmentError};

/// Seed for every K-means run, so identical inputs give identical labels.
pub const KMEANS_SEED: u64 = 42;

/// K-means tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansSettings {
    pub seed: u64,
    pub max_iterations: u64,
    pub tolerance: f64,
    /// Independent k-means++ initialisations; the lowest-inertia run wins.
    pub n_runs: usize,
}

impl Default for KMeansSettings {
    fn default() -> Self {
        Self {
            seed: KMEANS_SEED,
            max_iterations: 300,
            tolerance: 1e-4,
            n_runs: 10,
        }
    }
}

/// Partition the rows of `data` into `n_clusters` groups and return one label
/// in `0..n_clusters` per row. With fewer distinct rows than clusters some
/// labels are left unused.
pub fn assign_clusters(
    data: &Array2<f64>,
    n_clusters: usize,
    settings: &KMeansSettings,
) -> Result<Array1<usize>> {
    let n_rows = data.nrows();
    if n_clusters < 1 {
        return Err(SegmentError::Clustering(
            "number of clusters must be at least 1".into(),
        ));
    }
    if n_clusters > n_rows {
        return Err(SegmentError::Clustering(format!(
            "number of clusters ({n_clusters}) exceeds number of rows ({n_rows})"
        )));
    }
    // k-means++ cannot seed more centroids than there are distinct points;
    // the surplus clusters stay empty.
    let distinct = count_distinct_rows(data, n_clusters);
    let fitted_clusters = distinct.min(n_clusters);
    if fitted_clusters < n_clusters {
        log::warn!(
            "Only {distinct} distinct points for {n_clusters} clusters; \
             {} clusters will be empty",
            n_clusters - fitted_clusters
        );
    }

    let rng = Xoshiro256Plus::seed_from_u64(settings.seed);
    let dataset = DatasetBase::from(data.clone());
    let model = KMeans::params_with_rng(fitted_clusters, rng)
        .max_n_iterations(settings.max_iterations)
        .tolerance(settings.tolerance)
        .n_runs(settings.n_runs)
        .fit(&dataset)
        .map_err(|e| SegmentError::Clustering(e.to_string()))?;

    let labels = model.predict(data);
    log::debug!(
        "K-means converged: {} rows, {} clusters, centroids {:?}",
        n_rows,
        fitted_clusters,
        model.centroids().shape()
    );
    Ok(labels)
}

/// Count distinct rows, stopping early once `limit` is reached.
fn count_distinct_rows(data: &Array2<f64>, limit: usize) -> usize {
    let mut seen: HashSet<Vec<u64>> = HashSet::new();
    for row in data.rows() {
        // Normalise -0.0 so it compares equal to 0.0.
        seen.insert(row.iter().map(|&v| (v + 0.0).to_bits()).collect());
        if seen.len() >= limit {
            break;
        }
    }
    seen.len()
}
