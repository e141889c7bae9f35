use eframe::egui::{self, Align2, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text,
};

use crate::config::{BAR_HEADROOM, DECIMALS, NO_DATA_MESSAGE, PLOT_HEIGHT};
use crate::data::aggregate::{Measure, RegionSummary};
use crate::data::model::Region;
use crate::view::{BarChartSpec, ScatterSpec};

/// Category name for an x-axis grid mark, or nothing between categories.
pub fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn no_data(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), PLOT_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(NO_DATA_MESSAGE).italics());
        });
    });
}

// ---------------------------------------------------------------------------
// Bar chart with value labels
// ---------------------------------------------------------------------------

/// Draw a categorical bar chart with the value printed above each bar.
pub fn bar_chart(ui: &mut Ui, spec: &BarChartSpec) {
    ui.label(RichText::new(&spec.title).size(18.0).strong());

    if spec.is_empty() {
        no_data(ui);
        return;
    }

    let labels: Vec<String> = spec.bars.iter().map(|b| b.label.clone()).collect();
    let text_color = ui.visuals().text_color();

    let bars: Vec<Bar> = spec
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.value)
                .name(&b.label)
                .fill(b.fill)
                .stroke(Stroke::new(1.0, b.stroke))
                .width(0.7)
        })
        .collect();

    Plot::new(spec.id)
        .x_axis_label(&spec.x_label)
        .y_axis_label(&spec.y_label)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .include_x(-0.6)
        .include_x(spec.bars.len() as f64 - 0.4)
        .include_y(0.0)
        .include_y(spec.max_value() * BAR_HEADROOM)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .height(PLOT_HEIGHT)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            for (i, b) in spec.bars.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, b.value),
                        RichText::new(&b.annotation).color(text_color),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter + regression line
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, spec: &ScatterSpec) {
    ui.label(RichText::new(&spec.title).size(18.0).strong());

    if spec.points.is_empty() {
        no_data(ui);
    } else {
        Plot::new("height_vs_weight")
            .legend(Legend::default())
            .x_axis_label(&spec.x_label)
            .y_axis_label(&spec.y_label)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true)
            .height(PLOT_HEIGHT)
            .show(ui, |plot_ui| {
                let points: PlotPoints = spec.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name("Pokémon")
                        .color(spec.point_color)
                        .radius(3.0),
                );

                if let Some(fit) = &spec.regression {
                    let line: PlotPoints = vec![fit.start, fit.end].into_iter().collect();
                    plot_ui.line(
                        Line::new(line)
                            .name("Least-squares fit")
                            .color(fit.color)
                            .width(2.0),
                    );
                }
            });
    }

    ui.add_space(8.0);
    ui.heading(spec.correlation_text());
}

// ---------------------------------------------------------------------------
// Region summary table
// ---------------------------------------------------------------------------

/// Count / min / mean / max per region, under the height and weight charts.
pub fn summary_table(ui: &mut Ui, measure: Measure, rows: &[(Region, RegionSummary)]) {
    if rows.is_empty() {
        return;
    }
    let unit = measure.unit();

    ui.push_id(measure.label(), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .column(Column::auto().at_least(80.0))
            .columns(Column::auto().at_least(70.0), 4)
            .header(20.0, |mut header| {
                for title in ["Region", "Count", "Min", "Mean", "Max"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (region, s) in rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(region.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(s.count.to_string());
                        });
                        for v in [s.min, s.mean, s.max] {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{v:.DECIMALS$} {unit}"));
                            });
                        }
                    });
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_marks() {
        let labels = vec!["fire".to_string(), "water".to_string()];
        assert_eq!(category_label(&labels, 0.0), "fire");
        assert_eq!(category_label(&labels, 1.0), "water");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
