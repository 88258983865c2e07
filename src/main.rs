mod app;
mod color;
mod config;
mod data;
mod error;
mod format;
mod state;
mod ui;

use app::SalaryPandaApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let (config, config_error) = match DashboardConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("Invalid configuration, using defaults: {e:#}");
            (DashboardConfig::default(), Some(format!("Config error: {e:#}")))
        }
    };

    let mut state = AppState::new(config);
    state.load_configured_source();
    if state.status_message.is_none() {
        state.status_message = config_error;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Panda – Data Salaries Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryPandaApp::new(state)))),
    )
}
