use super::error::{DataError, Result};
use super::model::Table;

/// Parse a comma-separated list of 1-based column numbers, e.g. `"4, 2,7,1"`.
///
/// Only syntax is checked here; see [`project`] for bounds.
pub fn parse_positions(input: &str) -> Result<Vec<i64>> {
    let invalid = || DataError::InvalidColumnList {
        input: input.to_string(),
    };
    if input.trim().is_empty() {
        return Err(invalid());
    }
    input
        .split(',')
        .map(|tok| tok.trim().parse::<i64>().map_err(|_| invalid()))
        .collect()
}

/// Select and reorder columns by 1-based position. Repeats are allowed.
///
/// Fails without a partial result if any position is outside
/// `1..=table.column_count()`.
pub fn project(table: &Table, positions: &[i64]) -> Result<Table> {
    let column_count = table.column_count();
    let indices = positions
        .iter()
        .map(|&position| {
            usize::try_from(position)
                .ok()
                .filter(|p| (1..=column_count).contains(p))
                .map(|p| p - 1)
                .ok_or(DataError::ColumnOutOfRange {
                    position,
                    column_count,
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    Ok(table.select_columns(&indices))
}

/// Parse `input` and project `table` onto it in one step.
pub fn project_from_input(table: &Table, input: &str) -> Result<Table> {
    let positions = parse_positions(input)?;
    let projected = project(table, &positions)?;
    log::debug!("projected onto columns {positions:?}");
    Ok(projected)
}
