use std::collections::BTreeMap;

use crate::data::model::{columns, CustomerTable};
use crate::error::{Result, SegmentError};

/// Simplified customer lifetime value.
pub fn clv(total_spent: f64, number_of_purchases: f64) -> f64 {
    total_spent * (number_of_purchases / 100.0)
}

/// One input row after clustering, with the values the plot and the
/// summary need.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub cluster: usize,
    pub total_spent: f64,
    pub number_of_purchases: f64,
    pub age: f64,
    pub clv: f64,
}

/// Aggregates for one non-empty cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub count: usize,
    pub avg_spent: f64,
    pub avg_purchases: f64,
    pub avg_age: f64,
    pub avg_clv: f64,
}

/// Read one numeric column in full, failing on the first bad cell.
fn numeric_column(table: &CustomerTable, name: &str) -> Result<Vec<f64>> {
    let idx = table
        .column_index(name)
        .ok_or_else(|| SegmentError::schema(name))?;
    table
        .column(idx)
        .enumerate()
        .map(|(row, cell)| {
            cell.as_f64().ok_or_else(|| SegmentError::NonNumeric {
                column: name.to_string(),
                row: row + 1,
            })
        })
        .collect()
}

/// Per-row CLV together with the columns it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClvColumns {
    pub total_spent: Vec<f64>,
    pub number_of_purchases: Vec<f64>,
    pub clv: Vec<f64>,
}

/// Compute CLV for every row. Needs `total_spent` and `number_of_purchases`
/// whether or not they were clustered on.
pub fn compute_clv(table: &CustomerTable) -> Result<ClvColumns> {
    let total_spent = numeric_column(table, columns::TOTAL_SPENT)?;
    let number_of_purchases = numeric_column(table, columns::NUMBER_OF_PURCHASES)?;
    let values = total_spent
        .iter()
        .zip(&number_of_purchases)
        .map(|(&s, &p)| clv(s, p))
        .collect();
    Ok(ClvColumns {
        total_spent,
        number_of_purchases,
        clv: values,
    })
}

/// Attach labels and CLV to each row; `labels` has one entry per table row.
/// Also needs `age` and `customer_id`.
pub fn label_rows(
    table: &CustomerTable,
    labels: &[usize],
    clv: &ClvColumns,
) -> Result<Vec<LabeledRow>> {
    let age = numeric_column(table, columns::AGE)?;
    if table.column_index(columns::CUSTOMER_ID).is_none() {
        return Err(SegmentError::schema(columns::CUSTOMER_ID));
    }

    Ok(labels
        .iter()
        .enumerate()
        .map(|(i, &cluster)| LabeledRow {
            cluster,
            total_spent: clv.total_spent[i],
            number_of_purchases: clv.number_of_purchases[i],
            age: age[i],
            clv: clv.clv[i],
        })
        .collect())
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    spent: f64,
    purchases: f64,
    age: f64,
    clv: f64,
}

/// Group by cluster label, ascending. Labels with no rows produce nothing.
pub fn summarize(rows: &[LabeledRow]) -> Vec<ClusterSummary> {
    let mut groups: BTreeMap<usize, Accumulator> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(row.cluster).or_default();
        acc.count += 1;
        acc.spent += row.total_spent;
        acc.purchases += row.number_of_purchases;
        acc.age += row.age;
        acc.clv += row.clv;
    }

    groups
        .into_iter()
        .map(|(cluster, acc)| {
            let n = acc.count as f64;
            ClusterSummary {
                cluster,
                count: acc.count,
                avg_spent: acc.spent / n,
                avg_purchases: acc.purchases / n,
                avg_age: acc.age / n,
                avg_clv: acc.clv / n,
            }
        })
        .collect()
}
