use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of pipeline failures, used to pick how the
/// application reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File could not be opened, read, parsed or written.
    Io,
    /// Unsupported file type or malformed table shape.
    Format,
    /// Column list is not a comma-separated integer list.
    Parse,
    /// A column position is outside the table.
    Range,
    /// Filtering was asked to run without a query while one is required.
    EmptyQuery,
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read CSV file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not read spreadsheet {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("could not write spreadsheet {}: {source}", path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("spreadsheet {} has no worksheets", path.display())]
    NoWorksheet { path: PathBuf },

    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line} of the CSV file has {found} fields but the header has {expected}")]
    WideCsvLine {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("sheet '{sheet}' has {rows} rows and {columns} columns, more than a worksheet holds")]
    SheetTooLarge {
        sheet: String,
        rows: usize,
        columns: usize,
    },

    #[error("invalid column numbers '{input}': enter comma-separated numbers")]
    InvalidColumnList { input: String },

    #[error("column number {position} is out of range (1-{column_count})")]
    ColumnOutOfRange { position: i64, column_count: usize },

    #[error("please enter filter text")]
    EmptyQuery,
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::Io { .. }
            | DataError::Csv { .. }
            | DataError::Workbook { .. }
            | DataError::Xlsx { .. }
            | DataError::SheetTooLarge { .. } => ErrorKind::Io,
            DataError::UnsupportedFormat { .. }
            | DataError::NoWorksheet { .. }
            | DataError::RaggedRow { .. }
            | DataError::WideCsvLine { .. } => ErrorKind::Format,
            DataError::InvalidColumnList { .. } => ErrorKind::Parse,
            DataError::ColumnOutOfRange { .. } => ErrorKind::Range,
            DataError::EmptyQuery => ErrorKind::EmptyQuery,
        }
    }
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;
