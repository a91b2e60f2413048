use std::f64::consts::TAU;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::analysis::pie::PieSlice;
use crate::analysis::RadarView;
use crate::color::generate_palette;

const CHART_SIZE: f32 = 420.0;
const RING_COUNT: usize = 4;
const ARC_SEGMENTS: f64 = 96.0;

fn polar(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.cos(), radius * angle.sin()]
}

fn circle(radius: f64) -> Vec<[f64; 2]> {
    (0..=ARC_SEGMENTS as usize)
        .map(|i| polar(TAU * i as f64 / ARC_SEGMENTS, radius))
        .collect()
}

/// Static (non-interactive) square plot used by both chart kinds.
fn chart_plot(id: &str) -> Plot {
    Plot::new(id.to_owned())
        .width(CHART_SIZE)
        .height(CHART_SIZE)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

// ---------------------------------------------------------------------------
// Radar
// ---------------------------------------------------------------------------

/// Render the averaged scores as a filled radar polygon plus the mean table.
pub fn radar_chart(ui: &mut Ui, radar: &RadarView) {
    ui.label(RichText::new(&radar.title).strong());

    let chart = &radar.chart;
    let outer = chart.max_value().ceil().max(1.0);
    let accent = Color32::from_rgb(31, 119, 180);

    chart_plot("radar")
        .include_x(-outer * 1.35)
        .include_x(outer * 1.35)
        .include_y(-outer * 1.2)
        .include_y(outer * 1.2)
        .show(ui, |plot_ui| {
            // Rings and spokes.
            for ring in 1..=RING_COUNT {
                let r = outer * ring as f64 / RING_COUNT as f64;
                plot_ui.line(
                    Line::new(PlotPoints::from(circle(r)))
                        .color(Color32::DARK_GRAY)
                        .width(0.5),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(r * 0.05, r), format!("{r:.1}"))
                        .color(Color32::GRAY)
                        .anchor(Align2::LEFT_BOTTOM),
                );
            }
            for ((label, _), &angle) in chart.points.iter().zip(&chart.angles) {
                let [x, y] = polar(angle, outer);
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[0.0, 0.0], [x, y]]))
                        .color(Color32::DARK_GRAY)
                        .width(0.5),
                );
                let [lx, ly] = polar(angle, outer * 1.15);
                plot_ui.text(Text::new(PlotPoint::new(lx, ly), label.as_str()));
            }

            let outline: Vec<[f64; 2]> = chart
                .angles
                .iter()
                .zip(&chart.values)
                .map(|(&a, &v)| polar(a, v))
                .collect();
            // The polygon closes itself; drop the repeated vertex.
            let fill: Vec<[f64; 2]> = outline[..outline.len() - 1].to_vec();
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(fill))
                    .fill_color(accent.gamma_multiply(0.25))
                    .stroke(Stroke::NONE),
            );
            plot_ui.line(Line::new(PlotPoints::from(outline.clone())).color(accent).width(2.0));
            plot_ui.points(Points::new(PlotPoints::from(outline)).color(accent).radius(3.0));
        });

    ui.add_space(6.0);
    ui.push_id("radar_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(80.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("題目");
                });
                header.col(|ui| {
                    ui.strong("平均分數");
                });
            })
            .body(|mut body| {
                for (label, mean) in &chart.points {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(label);
                        });
                        row.col(|ui| {
                            ui.label(format!("{mean:.2}"));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// One filled wedge per answer, starting at 3 o'clock and going
/// counter-clockwise, labelled with its one-decimal share.
pub fn pie_chart(ui: &mut Ui, id: &str, title: &str, slices: &[PieSlice]) {
    ui.label(RichText::new(title).strong());

    let colors = generate_palette(slices.len());
    chart_plot(id)
        .legend(Legend::default())
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.3)
        .include_y(1.3)
        .show(ui, |plot_ui| {
            let mut start = 0.0_f64;
            for (slice, color) in slices.iter().zip(colors) {
                let sweep = TAU * slice.percent / 100.0;
                let steps = ((sweep / TAU) * ARC_SEGMENTS).ceil().max(2.0) as usize;

                let mut wedge = vec![[0.0, 0.0]];
                wedge.extend(
                    (0..=steps).map(|i| polar(start + sweep * i as f64 / steps as f64, 1.0)),
                );
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge))
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = start + sweep / 2.0;
                let [px, py] = polar(mid, 0.6);
                plot_ui.text(
                    Text::new(PlotPoint::new(px, py), slice.percent_label()).color(Color32::BLACK),
                );
                let [lx, ly] = polar(mid, 1.15);
                plot_ui.text(Text::new(PlotPoint::new(lx, ly), slice.label.as_str()));

                start += sweep;
            }
        });
}

/// A short grey line for charts that were skipped.
pub fn skipped(ui: &mut Ui, text: impl Into<String>) {
    ui.label(RichText::new(text.into()).italics().color(Color32::GRAY));
}
