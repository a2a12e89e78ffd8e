use eframe::egui::{self, ScrollArea};

use crate::state::SessionState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: SessionState,
}

impl DashboardApp {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: row counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: category filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts, preview, conclusions ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let view = &self.state.view;
                    ui.heading(crate::view::TITLE);
                    ui.separator();
                    plot::top_categories_chart(ui, view);
                    ui.add_space(12.0);
                    plot::delivery_time_chart(ui, view);
                    ui.add_space(12.0);
                    table::preview_table(ui, &view.preview);
                    ui.add_space(12.0);
                    table::conclusions(ui);
                });
        });
    }
}
