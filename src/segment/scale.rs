use linfa::prelude::*;
use linfa::DatasetBase;
use linfa_preprocessing::linear_scaling::LinearScaler;
use ndarray::Array2;

use crate::error::{Result, SegmentError};

/// Standardize each column to zero mean and unit variance using population
/// statistics. Constant columns keep scale 1 and become all zeros.
pub fn standardize(data: &Array2<f64>, names: &[&str]) -> Result<Array2<f64>> {
    if data.nrows() == 0 {
        return Ok(data.clone());
    }

    for (col, name) in names.iter().enumerate() {
        if data.column(col).iter().all(|&v| v == data[[0, col]]) {
            log::warn!("Column '{name}' is constant; it carries no weight in clustering");
        }
    }

    let dataset = DatasetBase::from(data.clone());
    let scaler = LinearScaler::standard()
        .fit(&dataset)
        .map_err(|e| SegmentError::Clustering(e.to_string()))?;
    let scaled = scaler.transform(data.clone());

    // Huge inputs overflow the column statistics.
    if scaled.iter().any(|v| !v.is_finite()) {
        return Err(SegmentError::Clustering(
            "feature values too large to standardize".into(),
        ));
    }
    Ok(scaled)
}
