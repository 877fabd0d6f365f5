mod app;
mod color;
mod config;
mod data;
mod state;
mod stats;
mod ui;

use app::AttritionApp;
use clap::Parser;
use config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::parse();
    log::info!("Starting dashboard with data file {}", config.data.display());

    eframe::run_native(
        "Employee Attrition Dashboard",
        config.native_options(),
        Box::new(move |_cc| Ok(Box::new(AttritionApp::new(&config)))),
    )
}
