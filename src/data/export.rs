use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::Workbook;

use super::error::{DataError, Result};
use super::model::Table;

pub const ORIGINAL_SHEET: &str = "Original";
pub const FILTERED_SHEET: &str = "Filtered";
pub const CUSTOM_SHEET: &str = "Custom Filtered";

/// Worksheet limits, header row included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;
pub const MAX_SHEET_COLUMNS: usize = 16_384;

/// One named worksheet of an export.
#[derive(Debug, Clone, Copy)]
pub struct Sheet<'a> {
    pub name: &'a str,
    pub table: &'a Table,
}

impl<'a> Sheet<'a> {
    pub fn new(name: &'a str, table: &'a Table) -> Self {
        Self { name, table }
    }
}

/// Write `sheets` into a single `.xlsx` file at `path`, in order.
///
/// Every cell is written as text with the column names as the header row.
/// The workbook is rendered in memory and moved into place only once fully
/// written: on error `path` is left as it was and no temporary file remains.
pub fn export_sheets(path: &Path, sheets: &[Sheet<'_>]) -> Result<()> {
    let xlsx_err = |source| DataError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    let io_err = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };

    for sheet in sheets {
        let rows = sheet.table.row_count() + 1;
        let columns = sheet.table.column_count();
        if rows > MAX_SHEET_ROWS || columns > MAX_SHEET_COLUMNS {
            return Err(DataError::SheetTooLarge {
                sheet: sheet.name.to_string(),
                rows,
                columns,
            });
        }
    }

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).map_err(xlsx_err)?;

        // Both fit after the size check above.
        let header = std::iter::once(sheet.table.columns());
        let body = sheet.table.rows().iter().map(Vec::as_slice);
        for (row_num, row) in (0u32..).zip(header.chain(body)) {
            for (col, value) in (0u16..).zip(row) {
                if value.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(row_num, col, value)
                    .map_err(xlsx_err)?;
            }
        }
    }
    let buffer = workbook.save_to_buffer().map_err(xlsx_err)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".tabsift-")
        .suffix(".xlsx.part")
        .tempfile_in(dir)
        .map_err(io_err)?;
    tmp.write_all(&buffer).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    log::info!(
        "Exported {} sheet(s) to {}",
        sheets.len(),
        path.display()
    );
    Ok(())
}
