/// Rendering stage.
///
/// * `chart`  – turns a filtered view into metrics and chart specs (no egui)
/// * `panels` – side panel filters, header metrics, menu bar
/// * `plot`   – draws a chart spec with egui_plot
pub mod chart;
pub mod panels;
pub mod plot;
