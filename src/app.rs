use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{metrics, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryPandaApp {
    pub state: AppState,
}

impl SalaryPandaApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryPandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| central(ui, &self.state));
        });
    }
}

fn central(ui: &mut Ui, state: &AppState) {
    ui.heading("🎲 Data-industry salary dashboard");
    ui.label(
        "Explore salaries in the data field over recent years. \
         Use the filters on the left to refine the analysis.",
    );

    let Some(dataset) = &state.dataset else {
        ui.add_space(24.0);
        ui.label("No dataset loaded. Use File → Open… or File → Reload source.");
        return;
    };
    if dataset.is_empty() {
        ui.add_space(24.0);
        ui.label("The loaded dataset has no rows.");
        return;
    }
    let dashboard = &state.dashboard;

    ui.add_space(8.0);
    ui.label(RichText::new("Key metrics (annual salary in USD)").strong().size(17.0));
    metrics::kpi_row(ui, &dashboard.summary);

    ui.separator();
    ui.label(RichText::new("Charts").strong().size(17.0));

    ui.columns(2, |cols| {
        plot::top_titles_chart(&mut cols[0], dashboard);
        plot::histogram_chart(&mut cols[1], dashboard);
    });
    ui.add_space(12.0);
    ui.columns(2, |cols| {
        plot::remote_donut(&mut cols[0], dashboard);
        plot::country_map(&mut cols[1], dashboard, &state.config.focus_title);
    });

    ui.separator();
    ui.label(RichText::new("Detailed data").strong().size(17.0));
    table::data_table(ui, dataset, &state.visible_indices);
}
