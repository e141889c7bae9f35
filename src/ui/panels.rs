use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::{to_color32, type_color};
use crate::data::aggregate::Statistic;
use crate::data::model::{PokeType, Region};
use crate::state::{AppState, Selections, Tab};
use crate::view::DashboardView;

// ---------------------------------------------------------------------------
// Left side panel – region filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, selections: &mut Selections) {
    ui.heading("Filters");
    ui.separator();

    let n_selected = selections.regions.len();
    ui.strong(format!("Select Regions  ({n_selected}/{})", Region::ALL.len()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            selections.select_all_regions();
        }
        if ui.small_button("None").clicked() {
            selections.select_no_regions();
        }
    });

    for region in Region::ALL {
        let mut checked = selections.regions.contains(&region);
        if ui.checkbox(&mut checked, region.as_str()).changed() {
            selections.set_region(region, checked);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title strip with record counts.
pub fn top_bar(ui: &mut Ui, view: &DashboardView) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(crate::config::APP_TITLE);
        ui.separator();
        ui.label(format!(
            "{} records loaded, {} visible",
            view.total_records, view.visible_records
        ));
    });
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            if ui
                .selectable_value(&mut state.tab, tab, tab.label())
                .clicked()
            {
                log::debug!("switched to {} tab", tab.label());
            }
        }
    });
}

/// Multi-select over the types present in the filtered data.
pub fn type_filter(ui: &mut Ui, selections: &mut Selections, options: &[PokeType]) {
    ui.strong("Filter Pokémon Types");

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            selections.select_all_types();
        }
        if ui.small_button("None").clicked() {
            selections.select_no_types();
        }
    });

    ScrollArea::vertical()
        .id_salt("type_filter")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for &ptype in options {
                let mut checked = selections.types.contains(&ptype);
                let text = RichText::new(ptype.as_str()).color(to_color32(type_color(ptype)));
                if ui.checkbox(&mut checked, text).changed() {
                    selections.set_type(ptype, checked);
                }
            }
        });
}

/// Min / Mean / Max dropdown.
pub fn stat_selector(ui: &mut Ui, id: &str, label: &str, stat: &mut Statistic) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(stat.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for option in Statistic::ALL {
                    if ui
                        .selectable_value(stat, option, option.to_string())
                        .changed()
                    {
                        log::debug!("{id} set to {option}");
                    }
                }
            });
    });
}
