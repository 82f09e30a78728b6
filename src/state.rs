use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::data::export::{export_sheets, Sheet, CUSTOM_SHEET, FILTERED_SHEET, ORIGINAL_SHEET};
use crate::data::filter::RowFilter;
use crate::data::loader::{load_file_with, LoadOptions};
use crate::data::normalize::normalize_table;
use crate::data::projection::project_from_input;
use crate::data::{DataError, ErrorKind, Table};
use crate::ui::grid::column_widths;

// ---------------------------------------------------------------------------
// Notices – blocking messages shown to the user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.level {
            NoticeLevel::Info => "Info",
            NoticeLevel::Warning => "Warning",
            NoticeLevel::Error => "Error",
        }
    }
}

impl From<DataError> for Notice {
    fn from(err: DataError) -> Self {
        match err.kind() {
            ErrorKind::EmptyQuery => Notice::warning(err.to_string()),
            _ => Notice::error(err.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Result views – derived tables shown in their own window
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Plain "Filter & Show" output.
    Filtered,
    /// Filtered and projected; can be downloaded as a single sheet.
    Custom,
}

#[derive(Debug, Clone)]
pub struct ResultView {
    pub id: u64,
    pub kind: ViewKind,
    pub table: Table,
    pub column_widths: Vec<f32>,
    pub open: bool,
}

impl ResultView {
    pub fn title(&self) -> &'static str {
        match self.kind {
            ViewKind::Filtered => "Filtered Results",
            ViewKind::Custom => "Custom Filtered Results",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

const NO_ROWS_FOUND: &str = "No rows found.";

/// The full UI state, independent of rendering.
///
/// Holds at most one working table. Every action leaves it unchanged unless
/// a new file loads successfully.
pub struct AppState {
    pub config: AppConfig,

    /// Working table (None until the user loads a file).
    pub table: Option<Table>,

    /// Initial grid widths of the working table.
    pub column_widths: Vec<f32>,

    /// Path of the loaded file, for the title bar.
    pub source_path: Option<PathBuf>,

    /// Filter text input, re-read on every filter action.
    pub filter_text: String,

    /// Skip-rows text input.
    pub skip_rows_text: String,

    /// Column list prompt for "Filter & Custom Show" (Some while open).
    pub column_prompt: Option<String>,

    /// Open result windows.
    pub views: Vec<ResultView>,

    /// Blocking message shown in the UI.
    pub notice: Option<Notice>,

    next_view_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            table: None,
            column_widths: Vec::new(),
            source_path: None,
            filter_text: String::new(),
            skip_rows_text: "0".to_string(),
            column_prompt: None,
            views: Vec::new(),
            notice: None,
            next_view_id: 0,
        }
    }

    fn row_filter(&self) -> RowFilter {
        RowFilter::new(self.config.require_nonempty_query)
    }

    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            skip_rows: self.config.parse_skip_rows(&self.skip_rows_text),
            na_values: self.config.csv_na_values.iter().cloned().collect(),
        }
    }

    pub fn report(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::error!("{}", notice.message),
            NoticeLevel::Warning => log::warn!("{}", notice.message),
            NoticeLevel::Info => log::info!("{}", notice.message),
        }
        self.notice = Some(notice);
    }

    /// Load and normalize `path`, replacing the working table on success.
    pub fn load_path(&mut self, path: &Path) {
        match load_file_with(path, &self.load_options()) {
            Ok(raw) => {
                let table = normalize_table(raw);
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    table.row_count(),
                    table.columns(),
                    path.display()
                );
                self.column_widths = column_widths(&table);
                self.table = Some(table);
                self.source_path = Some(path.to_path_buf());
            }
            Err(e) => self.report(Notice::error(format!(
                "An error occurred while processing the file: {e}"
            ))),
        }
    }

    /// Filter the working table with the current filter text.
    ///
    /// No table, a rejected query and an empty result all come back as a
    /// notice for the caller to show.
    pub fn filtered(&self) -> Result<Table, Notice> {
        let message = format!("No rows found containing '{}'.", self.filter_text);
        self.filtered_or(message)
    }

    fn filtered_or(&self, empty_message: String) -> Result<Table, Notice> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| Notice::warning("No data loaded!"))?;
        let filtered = self.row_filter().apply(table, &self.filter_text)?;
        if filtered.is_empty() {
            return Err(Notice::info(empty_message));
        }
        Ok(filtered)
    }

    /// Write the "Original" and "Filtered" sheets to `path`.
    pub fn save_original_and_filtered(&mut self, filtered: &Table, path: &Path) {
        let Some(original) = self.table.as_ref() else {
            self.report(Notice::warning("No data loaded!"));
            return;
        };
        let sheets = [
            Sheet::new(ORIGINAL_SHEET, original),
            Sheet::new(FILTERED_SHEET, filtered),
        ];
        let notice = match export_sheets(path, &sheets) {
            Ok(()) => Notice::info(format!("File saved successfully at {}", path.display())),
            Err(e) => Notice::error(format!("Failed to save file: {e}")),
        };
        self.report(notice);
    }

    /// "Filter & Show": open a window with the filtered rows.
    pub fn show_filtered(&mut self) {
        match self.filtered() {
            Ok(table) => self.push_view(ViewKind::Filtered, table),
            Err(notice) => self.report(notice),
        }
    }

    /// "Filter & Custom Show", first step: check that filtering yields rows,
    /// then ask for the column list.
    pub fn begin_custom_show(&mut self) {
        match self.filtered_or(NO_ROWS_FOUND.to_string()) {
            Ok(_) => self.column_prompt = Some(String::new()),
            Err(notice) => self.report(notice),
        }
    }

    /// "Filter & Custom Show", second step: filter, project onto
    /// `column_input` and open the result window.
    pub fn finish_custom_show(&mut self, column_input: &str) {
        self.column_prompt = None;
        if column_input.trim().is_empty() {
            self.report(Notice::warning("No column input provided!"));
            return;
        }
        let result = self
            .filtered_or(NO_ROWS_FOUND.to_string())
            .and_then(|filtered| project_from_input(&filtered, column_input).map_err(Notice::from));
        match result {
            Ok(table) => self.push_view(ViewKind::Custom, table),
            Err(notice) => self.report(notice),
        }
    }

    /// Download a custom view as a single "Custom Filtered" sheet.
    pub fn save_view(&mut self, view_id: u64, path: &Path) {
        let Some(view) = self.views.iter().find(|v| v.id == view_id) else {
            return;
        };
        let notice = match export_sheets(path, &[Sheet::new(CUSTOM_SHEET, &view.table)]) {
            Ok(()) => Notice::info(format!("File saved successfully at {}", path.display())),
            Err(e) => Notice::error(format!("Failed to save file: {e}")),
        };
        self.report(notice);
    }

    fn push_view(&mut self, kind: ViewKind, table: Table) {
        self.next_view_id += 1;
        self.views.push(ResultView {
            id: self.next_view_id,
            kind,
            column_widths: column_widths(&table),
            table,
            open: true,
        });
    }

    /// Drop windows the user has closed.
    pub fn prune_views(&mut self) {
        self.views.retain(|v| v.open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn loaded() -> (AppState, tempfile::NamedTempFile) {
        let file = csv_file("name,kind,origin\npear,fruit,FR\nApple pie,dessert,US\nleek,veg,NL\n");
        let mut state = AppState::default();
        state.load_path(file.path());
        assert!(state.notice.is_none());
        (state, file)
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let (mut state, _file) = loaded();
        state.load_path(Path::new("/no/such/file.csv"));
        assert_eq!(state.table.as_ref().map(Table::row_count), Some(3));
        assert_eq!(state.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Error));
    }

    #[test]
    fn invalid_skip_rows_text_loads_from_the_top() {
        let file = csv_file("a,b\n1,2\n");
        let mut state = AppState::default();
        state.skip_rows_text = "lots".into();
        state.load_path(file.path());
        assert_eq!(state.table.unwrap().columns(), ["a", "b"]);
    }

    #[test]
    fn filter_without_data_warns() {
        let state = AppState::default();
        let notice = state.filtered().unwrap_err();
        assert_eq!(notice.level, NoticeLevel::Warning);
    }

    #[test]
    fn empty_result_is_informational() {
        let (mut state, _file) = loaded();
        state.filter_text = "banana".into();
        state.show_filtered();
        assert!(state.views.is_empty());
        let notice = state.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "No rows found containing 'banana'.");
    }

    #[test]
    fn empty_query_policy_is_configurable() {
        let (mut state, _file) = loaded();
        assert_eq!(state.filtered().unwrap().row_count(), 3);

        state.config.require_nonempty_query = true;
        let notice = state.filtered().unwrap_err();
        assert_eq!(notice.message, "please enter filter text");
    }

    #[test]
    fn custom_show_projects_filtered_rows() {
        let (mut state, _file) = loaded();
        state.filter_text = "apple".into();
        state.begin_custom_show();
        assert_eq!(state.column_prompt.as_deref(), Some(""));

        state.finish_custom_show("3, 1");
        assert!(state.column_prompt.is_none());
        let view = state.views.last().unwrap();
        assert_eq!(view.kind, ViewKind::Custom);
        assert_eq!(view.table.columns(), ["origin", "name"]);
        assert_eq!(view.table.rows(), [vec!["US".to_string(), "Apple pie".into()]]);
    }

    #[test]
    fn custom_show_reports_bad_columns() {
        let (mut state, _file) = loaded();
        state.finish_custom_show("4");
        assert!(state.views.is_empty());
        assert!(state.notice.unwrap().message.contains("out of range"));

        state.notice = None;
        state.finish_custom_show("  ");
        assert_eq!(state.notice.unwrap().message, "No column input provided!");
    }

    #[test]
    fn save_writes_both_sheets_and_keeps_working_table() {
        let (mut state, _file) = loaded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.xlsx");
        state.filter_text = "US".into();

        let filtered = state.filtered().unwrap();
        state.save_original_and_filtered(&filtered, &path);

        assert_eq!(state.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));
        assert!(path.exists());
        assert_eq!(state.table.as_ref().map(Table::row_count), Some(3));
    }

    #[test]
    fn closed_views_are_pruned() {
        let (mut state, _file) = loaded();
        state.show_filtered();
        state.show_filtered();
        state.views[0].open = false;
        state.prune_views();
        assert_eq!(state.views.len(), 1);
        assert_eq!(state.views[0].id, 2);
    }

    #[test]
    fn custom_show_with_no_matches_says_no_rows_found() {
        let (mut state, _file) = loaded();
        state.filter_text = "banana".into();
        state.begin_custom_show();
        assert!(state.column_prompt.is_none());
        let notice = state.notice.take().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "No rows found.");

        state.finish_custom_show("1");
        assert!(state.views.is_empty());
        assert_eq!(state.notice.unwrap().message, "No rows found.");
    }

    #[test]
    fn column_widths_follow_the_table_they_describe() {
        let (mut state, _file) = loaded();
        assert_eq!(state.column_widths.len(), 3);

        state.filter_text = "apple".into();
        state.begin_custom_show();
        state.finish_custom_show("2");
        let view = state.views.last().unwrap();
        assert_eq!(view.column_widths, column_widths(&view.table));
        assert_eq!(view.column_widths.len(), 1);
    }
}
