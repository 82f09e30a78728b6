use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{dialogs, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TabsiftApp {
    pub state: AppState,
}

impl TabsiftApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl Default for TabsiftApp {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl eframe::App for TabsiftApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: source summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Bottom panel: inputs and actions ----
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            panels::control_bar(ui, &mut self.state);
        });

        // ---- Central panel: working table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::main_grid(ui, &self.state);
        });

        // ---- Floating windows and modals ----
        dialogs::result_windows(ctx, &mut self.state);
        dialogs::column_prompt_modal(ctx, &mut self.state);
        dialogs::notice_modal(ctx, &mut self.state);
    }
}
