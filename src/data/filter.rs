use super::error::{DataError, Result};
use super::model::Table;

// ---------------------------------------------------------------------------
// Row filter: case-insensitive substring match across all columns
// ---------------------------------------------------------------------------

/// Filter policy for the working table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowFilter {
    /// Reject an empty query instead of treating it as "match everything".
    pub require_nonempty_query: bool,
}

impl RowFilter {
    pub fn new(require_nonempty_query: bool) -> Self {
        Self {
            require_nonempty_query,
        }
    }

    /// Return a new table holding the rows of `table` that match `query`.
    ///
    /// A row matches when at least one of its cells contains `query`,
    /// ignoring case. An empty query keeps every row unless the policy
    /// requires one. Row order is preserved and an empty result is not an
    /// error.
    pub fn apply(&self, table: &Table, query: &str) -> Result<Table> {
        if query.is_empty() {
            if self.require_nonempty_query {
                return Err(DataError::EmptyQuery);
            }
            return Ok(table.clone());
        }

        let needle = query.to_lowercase();
        let filtered = table.retain_rows(|row| row_matches(row, &needle));
        log::debug!(
            "filter '{query}' kept {} of {} rows",
            filtered.row_count(),
            table.row_count()
        );
        Ok(filtered)
    }
}

/// `needle` must already be lower-cased.
fn row_matches(row: &[String], needle: &str) -> bool {
    row.iter().any(|cell| cell.to_lowercase().contains(needle))
}
