mod analysis;
mod app;
mod color;
mod config;
mod data;
mod fonts;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::SurveyLensApp;
use config::{Settings, SETTINGS_FILE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE));
    // Optional survey to open right away, e.g. when launched from a file manager.
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "中文課多元資料分析工具",
        options,
        Box::new(|cc| Ok(Box::new(SurveyLensApp::new(cc, settings, initial)))),
    )
}
