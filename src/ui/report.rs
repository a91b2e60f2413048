use eframe::egui::{RichText, ScrollArea, Ui};

use crate::analysis::pie::PieOutcome;
use crate::analysis::text::WordCloudOutcome;
use crate::analysis::ViewModel;
use crate::state::AppState;
use crate::ui::charts;
use crate::ui::cloud::{self, CloudCache};

// ---------------------------------------------------------------------------
// Central panel – charts for the selected section
// ---------------------------------------------------------------------------

/// Render every chart of the current view model.
pub fn section_report(ui: &mut Ui, state: &AppState, cache: &mut CloudCache) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("上傳 CSV 檔案以開始分析（檔案 → 開啟 CSV…）");
        });
        return;
    }
    let Some(view) = &state.view else {
        ui.label("請選擇主題區塊。");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for notice in &view.notices {
                charts::skipped(ui, notice.to_string());
            }
            if !view.notices.is_empty() {
                ui.separator();
            }

            numeric_block(ui, view);
            categorical_block(ui, view);
            text_block(ui, view, cache, state.settings.cloud_width, state.settings.cloud_height);
        });
}

fn numeric_block(ui: &mut Ui, view: &ViewModel) {
    let Some(radar) = &view.radar else {
        return;
    };
    ui.heading("📈 數值整合雷達圖");
    charts::radar_chart(ui, radar);
    ui.separator();
}

fn categorical_block(ui: &mut Ui, view: &ViewModel) {
    if view.group.text.is_empty() {
        return;
    }
    ui.heading("🧩 類別欄位圓餅統計圖");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (idx, outcome) in view.pies.iter().enumerate() {
            // Skipped columns are already listed among the notices.
            if let PieOutcome::Pie { title, slices } = outcome {
                ui.vertical(|ui: &mut Ui| {
                    charts::pie_chart(ui, &format!("pie_{idx}"), title, slices);
                });
            }
        }
    });
    ui.separator();
}

fn text_block(ui: &mut Ui, view: &ViewModel, cache: &mut CloudCache, width: f32, height: f32) {
    // Insufficient text is reported among the notices.
    let Some(WordCloudOutcome::Ready { frequencies, top }) = &view.word_cloud else {
        return;
    };
    ui.heading("☁️ 質性補充文字雲");
    cloud::word_cloud(ui, cache, frequencies, [width, height]);
    ui.add_space(6.0);
    ui.label(RichText::new(format!("前 {} 名詞語", top.len())).strong());
    cloud::frequency_table(ui, top);
}
