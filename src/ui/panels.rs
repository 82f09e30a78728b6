use eframe::egui::{RichText, TextEdit, Ui};

use super::dialogs::{open_file_dialog, save_file_dialog};
use super::grid;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bottom panel – inputs and actions
// ---------------------------------------------------------------------------

/// Render the load / filter controls.
pub fn control_bar(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(6.0);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        if ui.button("Load CSV/XLSX File").clicked() {
            open_file_dialog(state);
        }

        ui.separator();

        ui.label("Filter Text:");
        ui.add(TextEdit::singleline(&mut state.filter_text).desired_width(160.0));

        ui.label("Skip Rows:");
        ui.add(TextEdit::singleline(&mut state.skip_rows_text).desired_width(40.0));

        ui.separator();

        if ui.button("Filter & Save").clicked() {
            filter_and_save(state);
        }
        if ui.button("Filter & Show").clicked() {
            state.show_filtered();
        }
        if ui.button("Filter & Custom Show").clicked() {
            state.begin_custom_show();
        }
    });
    ui.add_space(6.0);
}

fn filter_and_save(state: &mut AppState) {
    let filtered = match state.filtered() {
        Ok(table) => table,
        Err(notice) => {
            state.report(notice);
            return;
        }
    };
    if let Some(path) = save_file_dialog(&state.config.start_dir(), "filtered.xlsx") {
        state.save_original_and_filtered(&filtered, &path);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the source file summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        match (&state.source_path, &state.table) {
            (Some(path), Some(table)) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(RichText::new(name).strong());
                ui.separator();
                ui.label(format!(
                    "{} rows, {} columns",
                    table.row_count(),
                    table.column_count()
                ));
            }
            _ => {
                ui.label("No file loaded.");
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – working table
// ---------------------------------------------------------------------------

pub fn main_grid(ui: &mut Ui, state: &AppState) {
    match &state.table {
        Some(table) => grid::table_grid(ui, "main_grid", table, &state.column_widths),
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Load a CSV or Excel file to get started");
            });
        }
    }
}
