use eframe::egui::{RichText, Ui};

use crate::data::aggregate::Summary;
use crate::format;

/// Four KPI cards: mean salary, max salary, record count, most frequent title.
pub fn kpi_row(ui: &mut Ui, summary: &Summary) {
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Mean salary", &format::currency(summary.mean_salary));
        metric(&mut cols[1], "Max salary", &format::currency(summary.max_salary));
        metric(&mut cols[2], "Total records", &format::count(summary.total_records));
        metric(&mut cols[3], "Most frequent title", &summary.most_common_title);
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}
