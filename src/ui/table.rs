use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::view::{TablePreview, CONCLUSIONS};

const ROW_HEIGHT: f32 = 18.0;

/// The first filtered rows, every column, scrollable sideways.
pub fn preview_table(ui: &mut Ui, preview: &TablePreview) {
    ui.heading("Filtered Data Preview");

    if preview.rows.is_empty() {
        ui.label(RichText::new("No rows match the selected categories.").weak());
        return;
    }

    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0), preview.columns.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for name in &preview.columns {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for row in &preview.rows {
                        body.row(ROW_HEIGHT, |mut cells| {
                            for cell in row {
                                cells.col(|ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    }
                });
        });
}

/// Static closing remarks.
pub fn conclusions(ui: &mut Ui) {
    ui.heading("Conclusions");
    for (title, text) in CONCLUSIONS {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label("•");
            ui.label(RichText::new(format!("{title}:")).strong());
            ui.label(text);
        });
    }
}
