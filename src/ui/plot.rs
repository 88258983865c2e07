use std::f32::consts::{PI, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{generate_palette, DivergingScale};
use crate::data::aggregate::{Dashboard, GroupMean, HistogramBin};
use crate::format;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

/// Shown in place of a chart when the filter left no rows.
fn no_data(ui: &mut Ui, chart: &str) {
    ui.add_space(8.0);
    ui.label(
        RichText::new(format!("⚠ No data to display in the {chart} chart."))
            .color(ui.visuals().warn_fg_color),
    );
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong().size(15.0));
}

// ---------------------------------------------------------------------------
// Top job titles – horizontal bar chart
// ---------------------------------------------------------------------------

pub fn top_titles_chart(ui: &mut Ui, dashboard: &Dashboard) {
    chart_title(ui, "Top job titles by mean salary");
    if dashboard.is_empty() {
        no_data(ui, "job titles");
        return;
    }
    title_bars(ui, &dashboard.top_titles);
}

fn title_bars(ui: &mut Ui, groups: &[GroupMean]) {
    let labels: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();
    let bars: Vec<Bar> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean)
                .name(format!("{} ({} rows)", g.key, g.count))
                .width(0.7)
        })
        .collect();

    Plot::new("top_titles_plot")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_label("Mean annual salary (USD)")
        .x_axis_formatter(|mark, _range| format::currency(mark.value))
        .y_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(BAR_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Salary distribution – histogram
// ---------------------------------------------------------------------------

pub fn histogram_chart(ui: &mut Ui, dashboard: &Dashboard) {
    chart_title(ui, "Annual salary distribution");
    if dashboard.is_empty() {
        no_data(ui, "salary distribution");
        return;
    }
    histogram_bars(ui, &dashboard.histogram);
}

fn histogram_bars(ui: &mut Ui, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!(
                    "{} – {}",
                    format::currency(b.start),
                    format::currency(b.end)
                ))
        })
        .collect();

    Plot::new("salary_histogram_plot")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .x_axis_formatter(|mark, _range| format::currency(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Remote-work share – donut
// ---------------------------------------------------------------------------

pub fn remote_donut(ui: &mut Ui, dashboard: &Dashboard) {
    chart_title(ui, "Share of work arrangements");
    if dashboard.is_empty() {
        no_data(ui, "work arrangement");
        return;
    }

    let counts = &dashboard.remote;
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let colors = generate_palette(counts.len());

    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer = (rect.width().min(rect.height()) / 2.0 - 40.0).max(20.0);
    let inner = outer * 0.5;
    let text_color = ui.visuals().text_color();

    // Clockwise from 12 o'clock.
    let mut start = -PI / 2.0;
    for ((label, n), color) in counts.iter().zip(colors) {
        let sweep = TAU * (*n as f32 / total.max(1) as f32);
        for shape in ring_segment(center, inner, outer, start, start + sweep, color) {
            painter.add(shape);
        }

        let mid = start + sweep / 2.0;
        let label_pos = center + Vec2::angled(mid) * (outer + 22.0);
        painter.text(
            label_pos,
            Align2::CENTER_CENTER,
            format!("{label}\n{}", format::percent(*n, total)),
            FontId::proportional(12.0),
            text_color,
        );
        start += sweep;
    }
}

/// Annular sector split into small convex quads.
fn ring_segment(center: Pos2, inner: f32, outer: f32, from: f32, to: f32, color: Color32) -> Vec<Shape> {
    let steps = ((to - from) / 0.05).ceil().max(1.0) as usize;
    let step = (to - from) / steps as f32;
    (0..steps)
        .map(|i| {
            let a0 = from + step * i as f32;
            let a1 = a0 + step;
            Shape::convex_polygon(
                vec![
                    center + Vec2::angled(a0) * outer,
                    center + Vec2::angled(a1) * outer,
                    center + Vec2::angled(a1) * inner,
                    center + Vec2::angled(a0) * inner,
                ],
                color,
                Stroke::NONE,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mean salary by country – choropleth-style tiles
// ---------------------------------------------------------------------------

pub fn country_map(ui: &mut Ui, dashboard: &Dashboard, focus_title: &str) {
    chart_title(ui, &format!("Mean {focus_title} salary by country"));
    if dashboard.is_empty() {
        no_data(ui, "country");
        return;
    }

    let Some(scale) = DivergingScale::spanning(dashboard.countries.iter().map(|g| g.mean)) else {
        ui.label(format!("No {focus_title} rows in the current selection."));
        return;
    };

    egui::ScrollArea::vertical()
        .id_salt("country_tiles")
        .max_height(CHART_HEIGHT - 40.0)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for g in &dashboard.countries {
                    country_tile(ui, g, &scale);
                }
            });
        });

    legend(ui, &scale);
}

fn country_tile(ui: &mut Ui, group: &GroupMean, scale: &DivergingScale) {
    let (rect, response) = ui.allocate_exact_size(Vec2::new(56.0, 36.0), Sense::hover());
    let fill = scale.color_for(group.mean);
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, fill);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        &group.key,
        FontId::monospace(13.0),
        contrast_text(fill),
    );
    response.on_hover_text(format!(
        "{}: {} ({} rows)",
        group.key,
        format::currency(group.mean),
        format::count(group.count)
    ));
}

fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn legend(ui: &mut Ui, scale: &DivergingScale) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format::currency(scale.min));
        let (rect, _) = ui.allocate_exact_size(Vec2::new(160.0, 12.0), Sense::hover());
        let steps = 40;
        let w = rect.width() / steps as f32;
        for i in 0..steps {
            let t = i as f64 / (steps - 1) as f64;
            let value = scale.min + (scale.max - scale.min) * t;
            let cell = egui::Rect::from_min_size(
                Pos2::new(rect.left() + w * i as f32, rect.top()),
                Vec2::new(w + 0.5, rect.height()),
            );
            ui.painter().rect_filled(cell, 0.0, scale.color_for(value));
        }
        ui.label(format::currency(scale.max));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_segment_covers_sweep() {
        let shapes = ring_segment(Pos2::ZERO, 5.0, 10.0, 0.0, PI, Color32::RED);
        assert_eq!(shapes.len(), (PI / 0.05).ceil() as usize);
        assert_eq!(ring_segment(Pos2::ZERO, 5.0, 10.0, 0.0, 0.0, Color32::RED).len(), 1);
    }

    #[test]
    fn test_contrast_text() {
        assert_eq!(contrast_text(Color32::from_rgb(255, 255, 191)), Color32::BLACK);
        assert_eq!(contrast_text(Color32::from_rgb(165, 0, 38)), Color32::WHITE);
    }
}
