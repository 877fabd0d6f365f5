use eframe::egui::{self, Ui};
use egui_extras::{Size, StripBuilder};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AttritionApp {
    pub state: AppState,
}

impl AttritionApp {
    /// Create the app and load the configured table once.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(&config.data);
        state.reload();
        Self { state }
    }
}

impl eframe::App for AttritionApp {
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

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

/// Fixed layout: header, two rows of two charts, one full-width chart.
fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(dash) = &state.dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => ui.heading(format!("{msg}\n\nFile → Open… to choose another file")),
            None => ui.heading("Open a file to explore attrition  (File → Open…)"),
        });
        return;
    };
    let colors = &state.colors;
    let [overall, department, overtime, work_life, income] = &dash.charts;

    StripBuilder::new(ui)
        .size(Size::exact(130.0))
        .size(Size::remainder().at_least(200.0))
        .size(Size::remainder().at_least(200.0))
        .size(Size::remainder().at_least(200.0))
        .vertical(|mut strip| {
            strip.cell(|ui| panels::header(ui, dash));
            strip.strip(|builder| {
                builder.sizes(Size::remainder(), 2).horizontal(|mut strip| {
                    strip.cell(|ui| plot::chart_panel(ui, overall, colors));
                    strip.cell(|ui| plot::chart_panel(ui, department, colors));
                });
            });
            strip.strip(|builder| {
                builder.sizes(Size::remainder(), 2).horizontal(|mut strip| {
                    strip.cell(|ui| plot::chart_panel(ui, overtime, colors));
                    strip.cell(|ui| plot::chart_panel(ui, work_life, colors));
                });
            });
            strip.cell(|ui| {
                ui.separator();
                plot::chart_panel(ui, income, colors);
            });
        });
}
