use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{SalaryDataset, REQUIRED_COLUMNS};
use crate::format;

/// Scrollable dump of the filtered records, one row per record.
pub fn data_table(ui: &mut Ui, dataset: &SalaryDataset, indices: &[usize]) {
    ui.push_id("data_table", |ui: &mut Ui| table(ui, dataset, indices));
}

fn table(ui: &mut Ui, dataset: &SalaryDataset, indices: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), REQUIRED_COLUMNS.len() - 1)
        .column(Column::remainder().at_least(80.0))
        .max_scroll_height(420.0)
        .header(20.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let Some(rec) = indices
                    .get(row.index())
                    .and_then(|&i| dataset.records.get(i))
                else {
                    return;
                };
                let cells = [
                    rec.year.to_string(),
                    rec.seniority.clone(),
                    rec.contract.clone(),
                    rec.company_size.clone(),
                    rec.job_title.clone(),
                    rec.remote.clone(),
                    rec.residence_iso3.clone(),
                    format::currency(rec.usd),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
