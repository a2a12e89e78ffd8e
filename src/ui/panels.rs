use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::SessionState;

// ---------------------------------------------------------------------------
// Left side panel – category multi-select
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut SessionState) {
    ui.heading("Filter Options");
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let options: Vec<String> = state.catalog().category_options().iter().cloned().collect();

    let n_selected = state.filters.len();
    let n_total = options.len();
    ui.strong(format!("Select Product Categories  ({n_selected}/{n_total})"));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });
    ui.separator();

    let mut toggled: Option<String> = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for category in &options {
                let mut checked = state.filters.contains(category);
                if ui.checkbox(&mut checked, category.as_str()).changed() {
                    toggled = Some(category.clone());
                }
            }
        });

    if let Some(category) = toggled {
        state.toggle_category(&category);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status bar with merged and visible row counts.
pub fn top_bar(ui: &mut Ui, state: &SessionState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let view = &state.view;
        let counts = state.catalog().source_counts();
        ui.label(format!(
            "{} order items merged, {} visible",
            view.total_rows, view.visible_rows
        ))
        .on_hover_text(format!(
            "customers: {}\norder items: {}\norders: {}\nproducts: {}\ncategory translations: {}",
            counts.customers,
            counts.order_items,
            counts.orders,
            counts.products,
            counts.category_translation
        ));

        if state.filters.is_empty() {
            ui.separator();
            ui.label(RichText::new("No categories selected").weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
