use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

pub const DEFAULT_DATA_FILE: &str = "IBM HR Employee Attrition Data.csv";

/// Interactive dashboard exploring the drivers of employee attrition.
#[derive(Debug, Clone, Parser)]
#[command(name = "attrition-dashboard", version, about, long_about = None)]
pub struct DashboardConfig {
    /// Employee table to load (.csv, .tsv, .json, .parquet)
    #[arg(env = "ATTRITION_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}

impl DashboardConfig {
    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([self.width, self.height])
                .with_min_inner_size([800.0, 600.0]),
            ..Default::default()
        }
    }
}
