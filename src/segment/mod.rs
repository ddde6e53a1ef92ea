//! Segmentation engine: from a loaded table to per-cluster summaries.
//!
//! ```text
//!   CustomerTable + [Feature] + k
//!        │
//!        ▼
//!   project ──► standardize ──► k-means ──► labels
//!        │                                    │
//!        ▼                                    ▼
//!   CLV per row ─────────────────────► group by label ──► ClusterSummary
//! ```
//!
//! Every step is fallible and reports a [`SegmentError`]; nothing is shown
//! unless the whole chain succeeds.

pub mod kmeans;
pub mod scale;
pub mod summary;

use ndarray::Array2;

use crate::data::loader;
use crate::data::model::{CustomerTable, Feature};
use crate::error::{Result, SegmentError};
use crate::input::ClusterRequest;

use self::kmeans::{assign_clusters, KMeansSettings};
use self::summary::{compute_clv, label_rows, summarize, ClusterSummary, LabeledRow};

/// The outcome of one successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// One entry per input row, in input order.
    pub rows: Vec<LabeledRow>,
    /// One entry per non-empty cluster, ascending by label.
    pub summary: Vec<ClusterSummary>,
    pub features: Vec<Feature>,
    pub n_clusters: usize,
}

/// Load the requested file and segment it.
pub fn run(request: &ClusterRequest, settings: &KMeansSettings) -> Result<Segmentation> {
    let table = loader::load_file(&request.path).map_err(|e| SegmentError::DataLoad {
        path: request.path.clone(),
        message: format!("{e:#}"),
    })?;
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.column_names,
        request.path.display()
    );
    segment(&table, &request.features, request.n_clusters, settings)
}

/// Cluster `table` on `features` into `n_clusters` groups and summarise.
pub fn segment(
    table: &CustomerTable,
    features: &[Feature],
    n_clusters: usize,
    settings: &KMeansSettings,
) -> Result<Segmentation> {
    if features.is_empty() {
        return Err(SegmentError::Validation("no features selected"));
    }

    let projected = extract_features(table, features)?;
    let names: Vec<&str> = features.iter().map(|f| f.column()).collect();
    let scaled = scale::standardize(&projected, &names)?;
    let labels = assign_clusters(&scaled, n_clusters, settings)?.to_vec();

    let clv = compute_clv(table)?;
    let rows = label_rows(table, &labels, &clv)?;
    let summary = summarize(&rows);

    log::info!(
        "Segmented {} rows on {:?} into {} clusters ({} non-empty)",
        rows.len(),
        names,
        n_clusters,
        summary.len()
    );

    Ok(Segmentation {
        rows,
        summary,
        features: features.to_vec(),
        n_clusters,
    })
}

/// Project the table onto `features`, in order, as an `rows x features`
/// matrix. Every column is checked for presence before any value is read.
pub fn extract_features(table: &CustomerTable, features: &[Feature]) -> Result<Array2<f64>> {
    let indices = features
        .iter()
        .map(|f| {
            table
                .column_index(f.column())
                .ok_or_else(|| SegmentError::schema(f.column()))
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut values = Vec::with_capacity(table.len() * features.len());
    for (row_no, row) in table.rows.iter().enumerate() {
        for (&idx, feature) in indices.iter().zip(features) {
            let v = row[idx].as_f64().ok_or_else(|| SegmentError::NonNumeric {
                column: feature.column().to_string(),
                row: row_no + 1,
            })?;
            values.push(v);
        }
    }

    Array2::from_shape_vec((table.len(), features.len()), values)
        .map_err(|e| SegmentError::Clustering(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::CellValue;
    use crate::input::FeatureSelection;

    const HEADER: &str = "customer_id,total_spent,number_of_purchases,age,region";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    fn sample_table() -> CustomerTable {
        let rows = [
            (1, 120.0, 3, 22.0),
            (2, 150.0, 4, 25.0),
            (3, 130.0, 2, 23.0),
            (4, 2400.0, 60, 48.0),
            (5, 2600.0, 55, 52.0),
            (6, 2500.0, 58, 50.0),
            (7, 800.0, 20, 35.0),
            (8, 760.0, 22, 37.0),
        ];
        CustomerTable::new(
            HEADER.split(',').map(String::from).collect(),
            rows.iter()
                .map(|&(id, spent, n, age)| {
                    vec![
                        CellValue::Integer(id),
                        CellValue::Float(spent),
                        CellValue::Integer(n),
                        CellValue::Float(age),
                        CellValue::String("west".into()),
                    ]
                })
                .collect(),
        )
    }

    fn all_features() -> Vec<Feature> {
        Feature::ALL.to_vec()
    }

    #[test]
    fn repeated_runs_are_identical() {
        let table = sample_table();
        let settings = KMeansSettings::default();
        let a = segment(&table, &all_features(), 3, &settings).unwrap();
        let b = segment(&table, &all_features(), 3, &settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn counts_cover_every_row() {
        let table = sample_table();
        let settings = KMeansSettings::default();
        for k in 1..=table.len() {
            let seg = segment(&table, &[Feature::TotalSpent, Feature::Age], k, &settings).unwrap();
            let total: usize = seg.summary.iter().map(|s| s.count).sum();
            assert_eq!(total, table.len(), "k = {k}");
            assert!(seg.summary.windows(2).all(|w| w[0].cluster < w[1].cluster));
            assert!(seg.rows.iter().all(|r| r.cluster < k));
        }
    }

    fn repeated_purchases_table() -> CustomerTable {
        let purchases = [5, 5, 9, 9, 9, 5, 12, 12];
        CustomerTable::new(
            HEADER.split(',').map(String::from).collect(),
            purchases
                .iter()
                .enumerate()
                .map(|(i, &n)| {
                    vec![
                        CellValue::Integer(i as i64 + 1),
                        CellValue::Float(100.0 + i as f64),
                        CellValue::Integer(n),
                        CellValue::Integer(30),
                        CellValue::Null,
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn duplicate_feature_rows_still_partition_for_every_k() {
        let table = repeated_purchases_table();
        let settings = KMeansSettings::default();
        for k in 1..=table.len() {
            let seg = segment(&table, &[Feature::NumberOfPurchases], k, &settings).unwrap();
            let total: usize = seg.summary.iter().map(|s| s.count).sum();
            assert_eq!(total, table.len(), "k = {k}");
            // Only three distinct purchase counts exist.
            assert!(seg.summary.len() <= 3.min(k), "k = {k}");
            assert!(seg.rows.iter().all(|r| r.cluster < k));
            assert_eq!(seg.n_clusters, k);
        }
    }

    #[test]
    fn fewer_distinct_rows_than_clusters_omits_empty_groups() {
        let file = write_csv(&[
            "1,100,5,30,north",
            "2,110,5,31,north",
            "3,120,9,32,south",
            "4,130,9,33,south",
        ]);
        let table = loader::load_file(file.path()).unwrap();
        let seg = segment(&table, &[Feature::NumberOfPurchases], 3, &KMeansSettings::default())
            .unwrap();
        assert_eq!(seg.summary.len(), 2);
        assert_eq!(seg.summary.iter().map(|s| s.count).sum::<usize>(), 4);
        assert_eq!(seg.rows[0].cluster, seg.rows[1].cluster);
        assert_eq!(seg.rows[2].cluster, seg.rows[3].cluster);
    }

    #[test]
    fn huge_values_report_a_clustering_error() {
        let file = write_csv(&[
            "1,1e308,5,30,north",
            "2,1.5e308,6,31,north",
            "3,1.7e308,7,32,south",
        ]);
        let table = loader::load_file(file.path()).unwrap();
        let err = segment(&table, &[Feature::TotalSpent], 2, &KMeansSettings::default())
            .unwrap_err();
        assert_eq!(
            err,
            SegmentError::Clustering("feature values too large to standardize".into())
        );
    }

    #[test]
    fn two_rows_two_clusters_is_a_trivial_partition() {
        let file = write_csv(&["1,200,50,30,north", "2,40,10,60,south"]);
        let mut selection = FeatureSelection::default();
        selection.set(Feature::TotalSpent, true);
        let request = ClusterRequest::collect(Some(file.path()), &selection, "2").unwrap();

        let seg = run(&request, &KMeansSettings::default()).unwrap();
        assert_eq!(seg.summary.len(), 2);
        assert_ne!(seg.rows[0].cluster, seg.rows[1].cluster);
        for s in &seg.summary {
            assert_eq!(s.count, 1);
            let row = seg.rows.iter().find(|r| r.cluster == s.cluster).unwrap();
            assert_eq!(s.avg_spent, row.total_spent);
            assert_eq!(s.avg_purchases, row.number_of_purchases);
            assert_eq!(s.avg_age, row.age);
            assert_eq!(s.avg_clv, row.clv);
        }
        let first = seg.rows.iter().find(|r| r.total_spent == 200.0).unwrap();
        assert_eq!(first.clv, 100.0);
    }

    #[test]
    fn unselected_columns_are_still_required_for_clv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "customer_id,age\n1,30\n2,40").unwrap();
        let table = loader::load_file(file.path()).unwrap();
        let err = segment(&table, &[Feature::Age], 2, &KMeansSettings::default()).unwrap_err();
        assert_eq!(err, SegmentError::schema("total_spent"));
    }

    #[test]
    fn missing_selected_feature_is_a_schema_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "customer_id,total_spent,number_of_purchases\n1,3,4").unwrap();
        let table = loader::load_file(file.path()).unwrap();
        let err = segment(&table, &[Feature::Age], 1, &KMeansSettings::default()).unwrap_err();
        assert_eq!(err, SegmentError::schema("age"));
    }

    #[test]
    fn missing_value_in_selected_feature_is_rejected() {
        let file = write_csv(&["1,200,50,30,north", "2,,10,60,south"]);
        let table = loader::load_file(file.path()).unwrap();
        let err = segment(&table, &[Feature::TotalSpent], 1, &KMeansSettings::default())
            .unwrap_err();
        assert_eq!(
            err,
            SegmentError::NonNumeric {
                column: "total_spent".into(),
                row: 2
            }
        );
    }

    #[test]
    fn too_many_clusters_is_a_clustering_error() {
        let table = sample_table();
        let err = segment(&table, &all_features(), 9, &KMeansSettings::default()).unwrap_err();
        assert!(matches!(err, SegmentError::Clustering(_)));
    }

    #[test]
    fn unreadable_file_is_a_load_error() {
        let request = ClusterRequest {
            path: Path::new("/definitely/not/here.csv").to_path_buf(),
            features: vec![Feature::Age],
            n_clusters: 1,
        };
        let err = run(&request, &KMeansSettings::default()).unwrap_err();
        assert!(matches!(err, SegmentError::DataLoad { .. }));
    }

    #[test]
    fn projection_follows_requested_order() {
        let table = sample_table();
        let m = extract_features(&table, &[Feature::Age, Feature::TotalSpent]).unwrap();
        assert_eq!(m.shape(), &[8, 2]);
        assert_eq!(m[[0, 0]], 22.0);
        assert_eq!(m[[0, 1]], 120.0);
    }
}
