use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, Context, Id, Key, RichText, Ui};

use super::grid;
use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::state::{AppState, Notice, NoticeLevel, ViewKind};

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Select CSV or Excel file")
        .set_directory(state.config.start_dir())
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("CSV Files", &["csv"])
        .add_filter("Excel Files", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .pick_file();

    match file {
        Some(path) => state.load_path(&path),
        None => state.report(Notice::info("No file selected!")),
    }
}

/// Ask for an `.xlsx` destination, adding the extension when left off.
pub fn save_file_dialog(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut path = rfd::FileDialog::new()
        .set_title("Save as")
        .set_directory(start_dir)
        .set_file_name(file_name)
        .add_filter("Excel files", &["xlsx"])
        .save_file()?;
    if path.extension().is_none() {
        path.set_extension("xlsx");
    }
    Some(path)
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

/// Blocking message box for the pending notice, if any.
pub fn notice_modal(ctx: &Context, state: &mut AppState) {
    let Some(notice) = &state.notice else {
        return;
    };
    let color = match notice.level {
        NoticeLevel::Info => ctx.style().visuals.text_color(),
        NoticeLevel::Warning => Color32::from_rgb(0xd0, 0x90, 0x00),
        NoticeLevel::Error => Color32::RED,
    };

    let mut dismissed = false;
    let response = egui::Modal::new(Id::new("notice_modal")).show(ctx, |ui: &mut Ui| {
        ui.set_min_width(260.0);
        ui.heading(notice.title());
        ui.label(RichText::new(&notice.message).color(color));
        ui.add_space(8.0);
        if ui.button("OK").clicked() {
            dismissed = true;
        }
    });
    if dismissed || response.should_close() {
        state.notice = None;
    }
}

/// Prompt for the column list of "Filter & Custom Show".
pub fn column_prompt_modal(ctx: &Context, state: &mut AppState) {
    let Some(input) = state.column_prompt.as_mut() else {
        return;
    };

    let mut submitted = false;
    let mut cancelled = false;
    let response = egui::Modal::new(Id::new("column_prompt")).show(ctx, |ui: &mut Ui| {
        ui.heading("Custom Columns");
        ui.label("Enter column numbers (1-indexed) separated by commas:");
        let edit = ui.text_edit_singleline(input);
        if edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            submitted = true;
        }
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("OK").clicked() {
                submitted = true;
            }
            if ui.button("Cancel").clicked() {
                cancelled = true;
            }
        });
    });

    if submitted {
        let input = input.clone();
        state.finish_custom_show(&input);
    } else if cancelled || response.should_close() {
        state.column_prompt = None;
    }
}

// ---------------------------------------------------------------------------
// Result windows
// ---------------------------------------------------------------------------

/// One window per derived table; custom views get a Download button.
pub fn result_windows(ctx: &Context, state: &mut AppState) {
    let mut download = None;
    for view in &mut state.views {
        egui::Window::new(view.title())
            .id(Id::new(("result_view", view.id)))
            .open(&mut view.open)
            .default_size([800.0, 600.0])
            .show(ctx, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(format!("{} rows", view.table.row_count()));
                    if view.kind == ViewKind::Custom && ui.button("Download").clicked() {
                        download = Some(view.id);
                    }
                });
                ui.separator();
                grid::table_grid(ui, ("result_grid", view.id), &view.table, &view.column_widths);
            });
    }
    state.prune_views();

    if let Some(view_id) = download {
        if let Some(path) = save_file_dialog(&state.config.start_dir(), "custom_filtered.xlsx") {
            state.save_view(view_id, &path);
        }
    }
}
