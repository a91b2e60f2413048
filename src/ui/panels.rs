use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Demographic;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – section and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: section picker and the three demographic filters.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("主題區塊");
    ui.separator();

    if state.table.is_none() {
        ui.label("尚未載入資料。");
        return;
    }
    if state.sections.is_empty() {
        ui.label("檔案中沒有基本資料以外的區塊。");
        return;
    }

    // Clone what we need so we can mutate state inside the loops.
    let sections: Vec<String> = state.sections.sections().map(str::to_owned).collect();
    let options = state.filter_options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let current = state.section.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("section")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for section in &sections {
                        if ui.selectable_label(current == *section, section).clicked() {
                            state.select_section(section);
                        }
                    }
                });

            ui.add_space(8.0);
            ui.heading("篩選");
            ui.separator();

            for field in Demographic::ALL {
                let values = options.get(&field).map(Vec::as_slice).unwrap_or_default();
                let n_selected = state.filters.accepted(field).len();
                let header_text = if n_selected == 0 {
                    format!("{}（全部）", field.filter_label())
                } else {
                    format!("{}（{n_selected}/{}）", field.filter_label(), values.len())
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.field())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        if ui.small_button("清除").clicked() {
                            state.clear_filter(field);
                        }
                        for value in values {
                            let mut checked = state.filters.accepted(field).contains(value);
                            if ui.checkbox(&mut checked, value).changed() {
                                state.toggle_filter_value(field, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("檔案", |ui: &mut Ui| {
            if ui.button("開啟 CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(view) = &state.view {
            ui.label(format!(
                "共 {} 筆，符合篩選 {} 筆",
                view.total_rows, view.filtered_rows
            ));
            ui.separator();
        }

        if let Some(warning) = &state.font_warning {
            ui.label(RichText::new(warning).color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("開啟問卷 CSV（需含 Section 雙層欄位）")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path);
    }
}

/// Load `path`, reporting failure in the status bar.
pub fn open_path(state: &mut AppState, path: &Path) {
    if let Err(e) = state.load_path(path) {
        log::error!("Failed to load file: {e:#}");
        state.status_message = Some(format!("錯誤：{e:#}"));
    }
}
