use std::sync::Arc;

use eframe::egui;

use crate::config::SIDE_PANEL_WIDTH;
use crate::data::aggregate::Measure;
use crate::data::model::Table;
use crate::state::{AppState, Tab};
use crate::ui::{panels, tabs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let before = self.state.selections.clone();
        let view = self.state.view();

        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &view);
        });

        // ---- Left side panel: region filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(SIDE_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state.selections);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state);
            ui.separator();

            let selections = &mut self.state.selections;
            match self.state.tab {
                // Holds its own side panel, so it stays outside the scroll area.
                Tab::Type => tabs::type_tab(ui, selections, &view),
                Tab::Height => scrolled(ui, |ui| {
                    tabs::measure_tab(ui, Measure::Height, selections, &view)
                }),
                Tab::Weight => scrolled(ui, |ui| {
                    tabs::measure_tab(ui, Measure::Weight, selections, &view)
                }),
                Tab::HeightVsWeight => scrolled(ui, |ui| tabs::correlation_tab(ui, &view)),
            }
        });

        // The view above was built from the old selections; redraw with the new ones.
        if self.state.selections != before {
            ctx.request_repaint();
        }
    }
}

fn scrolled(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, add_contents);
}
