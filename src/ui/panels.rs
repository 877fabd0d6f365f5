use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::ALL;
use crate::state::AppState;
use crate::ui::chart::DashboardView;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Department ----
    let mut department = state.selection.department.clone();
    ui.label("Select Department");
    egui::ComboBox::from_id_salt("department_filter")
        .width(ui.available_width())
        .selected_text(department.as_deref().unwrap_or(ALL))
        .show_ui(ui, |ui: &mut Ui| {
            for (choice, label) in state.options.department_entries() {
                ui.selectable_value(&mut department, choice, label);
            }
        });
    state.set_department(department);

    ui.add_space(8.0);

    // ---- Job level ----
    let mut job_level = state.selection.job_level;
    let selected_level = job_level.map(|j| j.to_string());
    ui.label("Select Job Level");
    egui::ComboBox::from_id_salt("job_level_filter")
        .width(ui.available_width())
        .selected_text(selected_level.as_deref().unwrap_or(ALL))
        .show_ui(ui, |ui: &mut Ui| {
            for (choice, label) in state.options.job_level_entries() {
                ui.selectable_value(&mut job_level, choice, label);
            }
        });
    state.set_job_level(job_level);

    ui.add_space(8.0);
    if !state.selection.is_unconstrained() && ui.button("Clear filters").clicked() {
        state.set_department(None);
        state.set_job_level(None);
    }
}

// ---------------------------------------------------------------------------
// Header – title and key metrics
// ---------------------------------------------------------------------------

/// Title, subtitle and the three KPI tiles.
pub fn header(ui: &mut Ui, dashboard: &DashboardView) {
    ui.heading("Employee Attrition Dashboard");
    ui.label("Interactive dashboard to explore key drivers of employee attrition");
    ui.add_space(6.0);
    ui.strong("Key Metrics");

    ui.columns(dashboard.metrics.len(), |cols: &mut [Ui]| {
        for (col, metric) in cols.iter_mut().zip(dashboard.metrics.iter()) {
            col.label(RichText::new(metric.label).weak());
            col.label(RichText::new(&metric.value).size(28.0).strong());
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(dash)) = (&state.table, &state.dashboard) {
            ui.label(format!(
                "{} employees loaded, {} shown",
                table.len(),
                dash.kpi.total_employees
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open employee data")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("CSV / TSV", &["csv", "tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_or_report(&path);
    }
}
