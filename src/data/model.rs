use std::fmt;

use chrono::NaiveDateTime;

use super::error::{DataError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single raw cell as produced by a source file
// ---------------------------------------------------------------------------

/// A dynamically-typed cell before normalization.
///
/// CSV sources only ever produce `Text` and `Empty`; spreadsheet sources
/// keep the most specific scalar the workbook stores.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
            // `f64` Display is the shortest round-trip form: 5.0 -> "5".
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(true) => write!(f, "TRUE"),
            CellValue::Bool(false) => write!(f, "FALSE"),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format(super::normalize::DATE_FORMAT)),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – ordered columns plus rectangular rows
// ---------------------------------------------------------------------------

/// Column names in display order plus rows aligned positionally with them.
///
/// Column names need not be unique. Every row holds exactly
/// `columns().len()` cells; [`Table::new`] rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<C = String> {
    columns: Vec<String>,
    rows: Vec<Vec<C>>,
}

/// A table straight from a source file, before normalization.
pub type RawTable = Table<CellValue>;

impl<C> Table<C> {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<C>>) -> Result<Self> {
        let expected = columns.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(DataError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<C>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows (it may still have columns).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert every cell, keeping shape and column names.
    pub fn map_cells<D>(self, mut f: impl FnMut(C) -> D) -> Table<D> {
        Table {
            columns: self.columns,
            rows: self
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(&mut f).collect())
                .collect(),
        }
    }

    /// Keep only rows accepted by `keep`, in their original order.
    pub(crate) fn retain_rows(&self, mut keep: impl FnMut(&[C]) -> bool) -> Self
    where
        C: Clone,
    {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Pick columns by 0-based index; indices must already be in bounds.
    pub(crate) fn select_columns(&self, indices: &[usize]) -> Self
    where
        C: Clone,
    {
        Self {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".to_string(), "2".into()], vec!["3".into()]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DataError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn map_cells_keeps_shape() {
        let raw = RawTable::new(
            vec!["n".into()],
            vec![vec![CellValue::Int(3)], vec![CellValue::Empty]],
        )
        .unwrap();
        let t = raw.map_cells(|c| c.to_string());
        assert_eq!(t.columns(), ["n"]);
        assert_eq!(t.rows(), [vec!["3".to_string()], vec![String::new()]]);
    }

    #[test]
    fn bools_and_floats_display_like_a_spreadsheet() {
        assert_eq!(CellValue::Bool(true).to_string(), "TRUE");
        assert_eq!(CellValue::Float(5.0).to_string(), "5");
        assert_eq!(CellValue::Float(1.25).to_string(), "1.25");
    }
}
