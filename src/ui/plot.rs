use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot, Points};

use crate::color::CategoryColors;
use crate::ui::chart::{ChartBody, ChartSpec};

// ---------------------------------------------------------------------------
// Chart panels (central area)
// ---------------------------------------------------------------------------

/// Render one chart panel: subheading plus bar chart or box plot.
pub fn chart_panel(ui: &mut Ui, spec: &ChartSpec, colors: &CategoryColors) {
    ui.strong(spec.title);

    if spec.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No data for the current filters");
        });
        return;
    }

    let labels = spec.categories();
    let plot = Plot::new(spec.id)
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show_grid([false, true])
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false);

    match &spec.body {
        ChartBody::Bars(data) => {
            let bars: Vec<Bar> = data
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    Bar::new(i as f64, d.value as f64)
                        .name(d.category.to_string())
                        .width(0.6)
                        .fill(colors.color_for(&d.category))
                })
                .collect();
            plot.show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(spec.y_label));
            });
        }
        ChartBody::Boxes(groups) => {
            plot.show(ui, |plot_ui| {
                for (i, (category, stats)) in groups.iter().enumerate() {
                    let x = i as f64;
                    let color = colors.color_for(category);
                    let spread = BoxSpread::new(
                        stats.whisker_low,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.whisker_high,
                    );
                    let elem = BoxElem::new(x, spread)
                        .name(category.to_string())
                        .box_width(0.5)
                        .whisker_width(0.3)
                        .fill(color.gamma_multiply(0.4))
                        .stroke(Stroke::new(1.5, color));
                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(category.to_string()));

                    if !stats.outliers.is_empty() {
                        let points: Vec<[f64; 2]> = stats.outliers.iter().map(|&y| [x, y]).collect();
                        plot_ui.points(Points::new(points).radius(2.5).color(color));
                    }
                }
            });
        }
    }
}

/// Tick label for an x grid mark: the category at that integer slot, blank elsewhere.
fn category_label(labels: &[String], value: f64) -> String {
    let slot = value.round();
    if (value - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}
