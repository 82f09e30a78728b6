use std::hash::Hash;

use eframe::egui::{self, Align, Color32, Label, Layout, RichText, ScrollArea, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::Table;

const ROW_HEIGHT: f32 = 20.0;
/// Header holds the 1-based column number above the column name.
const HEADER_HEIGHT: f32 = 36.0;
const MIN_COLUMN_WIDTH: f32 = 30.0;
const MAX_COLUMN_WIDTH: f32 = 150.0;
const PIXELS_PER_CHAR: f32 = 10.0;

/// Initial width of column `col`: 10 px per character of its longest text,
/// capped at 150 px.
pub fn column_width(table: &Table, col: usize) -> f32 {
    let header = table.columns()[col].chars().count();
    let longest = table
        .rows()
        .iter()
        .map(|row| row[col].chars().count())
        .fold(header, usize::max);
    (longest as f32 * PIXELS_PER_CHAR).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

/// Initial widths of every column, computed once per table.
pub fn column_widths(table: &Table) -> Vec<f32> {
    (0..table.column_count())
        .map(|col| column_width(table, col))
        .collect()
}

// ---------------------------------------------------------------------------
// Table grid
// ---------------------------------------------------------------------------

/// Render `table` as a striped, scrollable grid.
///
/// `widths` comes from [`column_widths`]; it only sets the first-frame
/// layout. Right-clicking a cell copies its text to the clipboard.
pub fn table_grid(ui: &mut Ui, id_salt: impl Hash, table: &Table, widths: &[f32]) {
    if table.column_count() == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("The file has no columns.");
        });
        return;
    }

    let id = egui::Id::new(id_salt);
    ScrollArea::horizontal()
        .id_salt(id.with("hscroll"))
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.push_id(id.with("table"), |ui: &mut Ui| {
                let max_h = ui.available_height();
                let mut builder = TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .cell_layout(Layout::left_to_right(Align::Center))
                    .min_scrolled_height(0.0)
                    .max_scroll_height(max_h);
                for col in 0..table.column_count() {
                    let width = widths.get(col).copied().unwrap_or(MIN_COLUMN_WIDTH);
                    builder = builder.column(
                        Column::initial(width)
                            .at_least(MIN_COLUMN_WIDTH)
                            .clip(true),
                    );
                }

                builder
                    .header(HEADER_HEIGHT, |mut header| {
                        for (i, name) in table.columns().iter().enumerate() {
                            header.col(|ui: &mut Ui| {
                                ui.vertical_centered(|ui: &mut Ui| {
                                    ui.label(
                                        RichText::new((i + 1).to_string())
                                            .small()
                                            .color(Color32::GRAY),
                                    );
                                    ui.add(Label::new(RichText::new(name.as_str()).strong()).truncate());
                                });
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, table.row_count(), |mut row| {
                            let cells = &table.rows()[row.index()];
                            for value in cells {
                                row.col(|ui: &mut Ui| {
                                    let response = ui.add(
                                        Label::new(value.as_str())
                                            .truncate()
                                            .sense(Sense::click()),
                                    );
                                    if response.secondary_clicked() {
                                        ui.ctx().copy_text(value.clone());
                                        log::debug!("Copied cell value to clipboard");
                                    }
                                });
                            }
                        });
                    });
            });
        });
}
