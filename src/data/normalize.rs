use chrono::{NaiveDate, NaiveDateTime};

use super::model::{CellValue, RawTable, Table};

/// Display format for every date-like cell: day/month/four-digit year.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Convert one raw cell into its display string.
///
/// Missing values become `""`, dates drop their time of day, everything else
/// uses its natural textual form.
pub fn normalize(cell: &CellValue) -> String {
    cell.to_string()
}

/// Normalize every cell of a freshly loaded table, producing the working table.
pub fn normalize_table(raw: RawTable) -> Table {
    raw.map_cells(|cell| normalize(&cell))
}

/// Parse an ISO-style date or datetime string; tries FORMATS in order.
///
/// Used for spreadsheet cells stored as ISO text (`DateTimeIso`).
pub(crate) fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
