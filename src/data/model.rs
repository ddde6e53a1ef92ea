use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the customer table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, guessed from the source file's representation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Interpret the cell as a finite `f64`. Text, booleans, nulls and NaN
    /// do not count as numbers.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Guess the type of a textual cell (CSV).
    pub fn guess(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Feature – the fixed set of columns the user may cluster on
// ---------------------------------------------------------------------------

/// A clusterable column. The order of [`Feature::ALL`] is the order in which
/// selected features are projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    TotalSpent,
    NumberOfPurchases,
    Age,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::TotalSpent, Feature::NumberOfPurchases, Feature::Age];

    /// Column name in the source table.
    pub fn column(self) -> &'static str {
        match self {
            Feature::TotalSpent => columns::TOTAL_SPENT,
            Feature::NumberOfPurchases => columns::NUMBER_OF_PURCHASES,
            Feature::Age => columns::AGE,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Well-known column names.
pub mod columns {
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const TOTAL_SPENT: &str = "total_spent";
    pub const NUMBER_OF_PURCHASES: &str = "number_of_purchases";
    pub const AGE: &str = "age";
}

// ---------------------------------------------------------------------------
// CustomerTable – the complete loaded table
// ---------------------------------------------------------------------------

/// A row-oriented table. Every row has exactly `column_names.len()` cells,
/// in header order.
#[derive(Debug, Clone, Default)]
pub struct CustomerTable {
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl CustomerTable {
    /// Build a table, padding short rows with nulls and truncating long ones.
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = column_names.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        CustomerTable { column_names, rows }
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column.
    pub fn column<'a>(&'a self, idx: usize) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_picks_narrowest_type() {
        assert_eq!(CellValue::guess("42"), CellValue::Integer(42));
        assert_eq!(CellValue::guess(" 3.5 "), CellValue::Float(3.5));
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("abc"), CellValue::String("abc".into()));
    }

    #[test]
    fn as_f64_rejects_text_and_nan() {
        assert_eq!(CellValue::Integer(7).as_f64(), Some(7.0));
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::String("7".into()).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn rows_are_aligned_to_header() {
        let table = CustomerTable::new(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Integer(1)], vec![CellValue::Integer(1); 3]],
        );
        assert!(table.rows.iter().all(|r| r.len() == 2));
        assert_eq!(table.rows[0][1], CellValue::Null);
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("c"), None);
    }

    #[test]
    fn feature_columns_follow_fixed_order() {
        let names: Vec<&str> = Feature::ALL.iter().map(|f| f.column()).collect();
        assert_eq!(names, ["total_spent", "number_of_purchases", "age"]);
        assert_eq!(Feature::NumberOfPurchases.to_string(), "number_of_purchases");
    }
}
