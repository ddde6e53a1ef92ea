use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between pressing "Cluster" and showing a
/// result. The UI turns each variant into one message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SegmentError {
    /// User input was rejected before any file I/O.
    #[error("{0}")]
    Validation(&'static str),

    /// The file is missing, unreadable, or not a parseable table.
    #[error("could not load {}: {message}", .path.display())]
    DataLoad { path: PathBuf, message: String },

    /// A required column is absent from the table.
    #[error("column '{column}' not found in the data")]
    Schema { column: String },

    /// A required cell is empty or not a number. `row` is 1-based.
    #[error("column '{column}' has a missing or non-numeric value in row {row}")]
    NonNumeric { column: String, row: usize },

    /// K-means could not run with the requested parameters.
    #[error("clustering failed: {0}")]
    Clustering(String),
}

impl SegmentError {
    pub fn schema(column: &str) -> Self {
        SegmentError::Schema {
            column: column.to_string(),
        }
    }

    /// Short label for the error kind, shown next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            SegmentError::Validation(_) => "invalid input",
            SegmentError::DataLoad { .. } => "load error",
            SegmentError::Schema { .. } => "schema error",
            SegmentError::NonNumeric { .. } => "data error",
            SegmentError::Clustering(_) => "clustering error",
        }
    }

    /// Message rendered in the error area.
    pub fn user_message(&self) -> String {
        format!("An error occurred: {self}")
    }
}

pub type Result<T> = std::result::Result<T, SegmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = SegmentError::Validation("no features selected");
        assert_eq!(err.user_message(), "An error occurred: no features selected");

        let err = SegmentError::schema("age");
        assert_eq!(err.to_string(), "column 'age' not found in the data");
        assert_eq!(err.kind(), "schema error");

        let err = SegmentError::DataLoad {
            path: PathBuf::from("customers.csv"),
            message: "No such file".into(),
        };
        assert_eq!(err.to_string(), "could not load customers.csv: No such file");
    }
}
