use eframe::egui::{self, Ui};

use crate::config::{TYPE_COLOR_EXPLANATION, TYPE_FILTER_WIDTH};
use crate::data::aggregate::Measure;
use crate::state::Selections;
use crate::ui::{panels, plot};
use crate::view::DashboardView;

pub fn type_tab(ui: &mut Ui, selections: &mut Selections, view: &DashboardView) {
    ui.heading("Pokémon Type Counts by Region");

    egui::SidePanel::left("type_filter_panel")
        .resizable(false)
        .default_width(TYPE_FILTER_WIDTH)
        .show_inside(ui, |ui: &mut Ui| {
            panels::type_filter(ui, selections, &view.type_options);
        });

    egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
        plot::bar_chart(ui, &view.type_chart);
        ui.small(format!(
            "{} type entries across {} Pokémon (dual-type Pokémon count once per type)",
            view.type_slots, view.visible_records
        ));
        egui::CollapsingHeader::new("See explanation")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.label(TYPE_COLOR_EXPLANATION);
            });
    });
}

pub fn measure_tab(ui: &mut Ui, measure: Measure, selections: &mut Selections, view: &DashboardView) {
    let (stat, chart, summary) = match measure {
        Measure::Height => (
            &mut selections.height_stat,
            &view.height_chart,
            &view.height_summary,
        ),
        Measure::Weight => (
            &mut selections.weight_stat,
            &view.weight_chart,
            &view.weight_summary,
        ),
    };

    ui.heading(format!("Pokémon {}s", measure.label()));
    let id = format!("{}_stat", measure.label().to_ascii_lowercase());
    let label = format!("Select {} statistic", measure.label().to_ascii_lowercase());
    panels::stat_selector(ui, &id, &label, stat);
    ui.add_space(4.0);

    plot::bar_chart(ui, chart);
    ui.add_space(8.0);
    plot::summary_table(ui, measure, summary);
}

pub fn correlation_tab(ui: &mut Ui, view: &DashboardView) {
    ui.heading("Height vs Weight Correlation");
    plot::scatter_plot(ui, &view.scatter);
}
