use std::path::PathBuf;

use eframe::egui;

use crate::config::Settings;
use crate::fonts::install_cjk_font;
use crate::state::AppState;
use crate::ui::cloud::CloudCache;
use crate::ui::{panels, report};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SurveyLensApp {
    pub state: AppState,
    cloud_cache: CloudCache,
}

impl SurveyLensApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        initial: Option<PathBuf>,
    ) -> Self {
        let font = install_cjk_font(&cc.egui_ctx, settings.font_path.as_deref());
        let mut state = AppState::new(settings);

        if let Err(e) = font {
            log::warn!("{e}; Chinese labels may not render");
            state.font_warning = Some(format!("字型：{e}"));
        }
        if let Some(path) = initial {
            panels::open_path(&mut state, &path);
        }

        Self {
            state,
            cloud_cache: CloudCache::default(),
        }
    }
}

impl eframe::App for SurveyLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: section and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        self.state.refresh();

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            report::section_report(ui, &self.state, &mut self.cloud_cache);
        });
    }
}
