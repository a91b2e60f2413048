use eframe::egui::{self, Color32, FontId, Sense, Ui, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::analysis::cloud::{layout, PlacedWord};
use crate::color::word_color;

/// Placement for the last word list drawn; the spiral search is too slow to
/// run every frame.
#[derive(Default)]
pub struct CloudCache {
    words: Vec<(String, usize)>,
    size: [f32; 2],
    placed: Vec<PlacedWord>,
}

impl CloudCache {
    fn placed_for(&mut self, ui: &Ui, words: &[(String, usize)], size: [f32; 2]) -> &[PlacedWord] {
        if self.words != words || self.size != size {
            self.placed = layout(words, size[0], size[1], |text, font_size| {
                let galley = ui.fonts(|f| {
                    f.layout_no_wrap(
                        text.to_owned(),
                        FontId::proportional(font_size),
                        Color32::WHITE,
                    )
                });
                let s = galley.size();
                [s.x, s.y]
            });
            log::debug!("Placed {}/{} words in the cloud", self.placed.len(), words.len());
            self.words = words.to_vec();
            self.size = size;
        }
        &self.placed
    }
}

/// Paint the frequency-weighted word cloud on a white canvas.
pub fn word_cloud(ui: &mut Ui, cache: &mut CloudCache, words: &[(String, usize)], size: [f32; 2]) {
    let placed = cache.placed_for(ui, words, size);
    let (response, painter) = ui.allocate_painter(Vec2::new(size[0], size[1]), Sense::hover());
    let origin = response.rect.min;
    painter.rect_filled(response.rect, 0.0, Color32::WHITE);

    for (rank, word) in placed.iter().enumerate() {
        let color = word_color(rank, placed.len());
        let galley = painter.layout_no_wrap(
            word.text.clone(),
            FontId::proportional(word.font_size),
            color,
        );
        painter.galley(origin + egui::vec2(word.rect.x, word.rect.y), galley, color);
    }
}

/// Top tokens with their counts.
pub fn frequency_table(ui: &mut Ui, top: &[(String, usize)]) {
    ui.push_id("word_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(80.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("詞語");
                });
                header.col(|ui| {
                    ui.strong("出現次數");
                });
            })
            .body(|mut body| {
                for (word, count) in top {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(word);
                        });
                        row.col(|ui| {
                            ui.label(count.to_string());
                        });
                    });
                }
            });
    });
}
