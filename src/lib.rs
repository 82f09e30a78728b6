//! Load a CSV or spreadsheet, filter its rows by substring, pick columns and
//! export the results to a multi-sheet workbook.

pub mod app;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
