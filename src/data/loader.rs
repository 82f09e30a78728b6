use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::error::{DataError, Result};
use super::model::{CellValue, RawTable, Table};
use super::normalize::{normalize, parse_iso_datetime};

/// Text markers that read as a missing value in CSV files (the pandas defaults).
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Knobs for [`load_file_with`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Raw rows dropped before the header row.
    pub skip_rows: usize,
    /// CSV cells equal to one of these load as [`CellValue::Empty`].
    pub na_values: BTreeSet<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file, skipping `skip_rows` raw rows before the header.
pub fn load_file(path: &Path, skip_rows: usize) -> Result<RawTable> {
    load_file_with(
        path,
        &LoadOptions {
            skip_rows,
            ..LoadOptions::default()
        },
    )
}

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – comma-separated text, every cell read as text
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet
pub fn load_file_with(path: &Path, options: &LoadOptions) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, options),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path, options.skip_rows),
        _ => Err(DataError::UnsupportedFormat { extension: ext }),
    }
}

pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xlsm", "xlsb", "xls", "ods"];

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: after `skip_rows` raw lines, one header row, then data.
/// Rows shorter than the header are padded with empty cells.
fn load_csv(path: &Path, options: &LoadOptions) -> Result<RawTable> {
    let io_err = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut buf = BufReader::new(file);
    // Skipped lines count raw file lines, blank ones included.
    let mut line = String::new();
    for _ in 0..options.skip_rows {
        line.clear();
        if buf.read_line(&mut line).map_err(io_err)? == 0 {
            break;
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(buf);
    let mut records = reader.records();

    let Some(header) = records.next().transpose().map_err(csv_err)? else {
        return Ok(Table::empty());
    };
    let columns = header_names(header.iter().map(str::to_string));
    let width = columns.len();

    let mut rows = Vec::new();
    for result in records {
        let record = result.map_err(csv_err)?;
        if record.len() > width {
            let line = record.position().map_or(0, |p| p.line() as usize);
            return Err(DataError::WideCsvLine {
                line: options.skip_rows + line,
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<CellValue> = record
            .iter()
            .map(|value| {
                if options.na_values.contains(value) {
                    CellValue::Empty
                } else {
                    CellValue::Text(value.to_string())
                }
            })
            .collect();
        row.resize(width, CellValue::Empty);
        rows.push(row);
    }

    Table::new(columns, rows)
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Read the first worksheet.  Rows are counted from row 1 of the sheet, so
/// blank rows above the used range count toward `skip_rows`.
fn load_workbook(path: &Path, skip_rows: usize) -> Result<RawTable> {
    let wb_err = |source| DataError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(wb_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(wb_err)?;

    let first_used_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut sheet_rows = range.rows().skip(skip_rows.saturating_sub(first_used_row));

    let Some(header) = sheet_rows.next() else {
        return Ok(Table::empty());
    };
    let columns = header_names(header.iter().map(|c| normalize(&cell_from_data(c))));
    let rows = sheet_rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Table::new(columns, rows)
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if dt.is_datetime() => CellValue::DateTime(value),
            // Durations have no calendar date; keep the serial number.
            _ => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// Blank header cells get a positional placeholder name.
fn header_names(names: impl Iterator<Item = String>) -> Vec<String> {
    names
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                format!("Unnamed: {i}")
            } else {
                name
            }
        })
        .collect()
}
