use eframe::egui;
use tabsift::app::TabsiftApp;
use tabsift::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::error!("{e:#}; using default configuration");
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tabsift – Table Viewer With Filter",
        options,
        Box::new(|_cc| Ok(Box::new(TabsiftApp::new(config)))),
    )
}
