use std::io::Write;
use std::path::Path;

use tabsift::data::export::{export_sheets, Sheet, FILTERED_SHEET, ORIGINAL_SHEET};
use tabsift::data::filter::RowFilter;
use tabsift::data::loader::load_file;
use tabsift::data::normalize::normalize_table;
use tabsift::data::projection::{parse_positions, project, project_from_input};
use tabsift::data::{ErrorKind, Table};

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn load_working(path: &Path, skip_rows: usize) -> Table {
    normalize_table(load_file(path, skip_rows).unwrap())
}

/// 3 columns, 4 rows; row 2 holds "Apple" in column 1.
fn produce(dir: &Path) -> Table {
    let path = write_file(
        dir,
        "produce.csv",
        "item,stock,aisle\n\
         carrot,12,A1\n\
         Apple,40,B2\n\
         leek,,C3\n\
         onion,7,NA\n",
    );
    load_working(&path, 0)
}

#[test]
fn filter_then_project_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let table = produce(dir.path());
    assert_eq!((table.row_count(), table.column_count()), (4, 3));

    let filtered = RowFilter::default().apply(&table, "apple").unwrap();
    assert_eq!(filtered.rows(), &table.rows()[1..2]);

    let projected = project(&filtered, &[3, 1]).unwrap();
    assert_eq!(projected.columns(), ["aisle", "item"]);
    assert_eq!(projected.rows(), [vec!["B2".to_string(), "Apple".into()]]);
}

#[test]
fn missing_values_normalize_to_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let table = produce(dir.path());
    assert_eq!(table.rows()[2][1], "");
    assert_eq!(table.rows()[3][2], "");
}

#[test]
fn empty_query_is_identity() {
    let dir = tempfile::tempdir().unwrap();
    let table = produce(dir.path());
    assert_eq!(RowFilter::default().apply(&table, "").unwrap(), table);
}

#[test]
fn kept_rows_match_and_dropped_rows_do_not() {
    let dir = tempfile::tempdir().unwrap();
    let table = produce(dir.path());
    for query in ["o", "1", "B", "zz", "ON"] {
        let filtered = RowFilter::default().apply(&table, query).unwrap();
        let needle = query.to_lowercase();
        let matches = |row: &Vec<String>| row.iter().any(|c| c.to_lowercase().contains(&needle));
        assert!(filtered.rows().iter().all(matches), "query {query:?}");
        let mut dropped = table.rows().iter().filter(|r| !filtered.rows().contains(*r));
        assert!(dropped.all(|r| !matches(r)), "query {query:?}");
        assert_eq!(
            RowFilter::default().apply(&filtered, query).unwrap(),
            filtered
        );
    }
}

#[test]
fn projection_columns_follow_positions() {
    let dir = tempfile::tempdir().unwrap();
    let table = produce(dir.path());
    let positions = [2, 2, 3, 1];
    let projected = project(&table, &positions).unwrap();
    assert_eq!(projected.column_count(), positions.len());
    for (row_in, row_out) in table.rows().iter().zip(projected.rows()) {
        for (i, &p) in positions.iter().enumerate() {
            assert_eq!(row_out[i], row_in[p as usize - 1]);
        }
    }
}

#[test]
fn projection_error_classes() {
    let dir = tempfile::tempdir().unwrap();
    let table = produce(dir.path());
    assert_eq!(project(&table, &[5]).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(project(&table, &[0]).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(parse_positions("a,b").unwrap_err().kind(), ErrorKind::Parse);
    assert_eq!(
        project_from_input(&table, "a,5").unwrap_err().kind(),
        ErrorKind::Parse
    );
}

#[test]
fn export_then_load_round_trips_text() {
    let dir = tempfile::tempdir().unwrap();
    let table = produce(dir.path());
    let filtered = RowFilter::default().apply(&table, "o").unwrap();
    let out = dir.path().join("export.xlsx");

    export_sheets(
        &out,
        &[
            Sheet::new(ORIGINAL_SHEET, &table),
            Sheet::new(FILTERED_SHEET, &filtered),
        ],
    )
    .unwrap();

    // The first sheet is the one read back.
    let reloaded = load_working(&out, 0);
    assert_eq!(reloaded, table);
}

#[test]
fn dated_text_survives_round_trip_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let table = Table::new(
        vec!["placed".into(), "code".into()],
        vec![
            vec!["05/03/2024".to_string(), "007".into()],
            vec!["31/12/1999".to_string(), "TRUE".into()],
        ],
    )
    .unwrap();
    let out = dir.path().join("dates.xlsx");
    export_sheets(&out, &[Sheet::new(FILTERED_SHEET, &table)]).unwrap();

    assert_eq!(load_working(&out, 0), table);
}

#[test]
fn unsupported_extension_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "table.tsv", "a\tb\n");
    assert_eq!(load_file(&path, 0).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn trailing_blank_rows_are_dropped_by_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "tail.csv", "a,b\n1,2\nNA,\n");
    let table = load_working(&path, 0);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[1], ["", ""]);

    let out = dir.path().join("tail.xlsx");
    export_sheets(&out, &[Sheet::new(FILTERED_SHEET, &table)]).unwrap();

    // A row with no written cells leaves nothing for the reader to find.
    let reloaded = load_working(&out, 0);
    assert_eq!(reloaded.rows(), &table.rows()[..1]);
}
