//! Read-only view of a document's data

use eframe::egui;

use crate::core::document::Document;

/// Pretty-printed document contents
pub struct DataView;

impl DataView {
    pub fn show(ui: &mut egui::Ui, document: &Document) {
        egui::CollapsingHeader::new(format!("Data ({} keys)", document.len()))
            .id_salt("data_view")
            .default_open(true)
            .show(ui, |ui| {
                if document.is_empty() {
                    ui.weak("(empty document)");
                    return;
                }
                egui::ScrollArea::vertical()
                    .id_salt("data_view_scroll")
                    .max_height(320.0)
                    .show(ui, |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(document.to_display_json()).monospace(),
                            )
                            .selectable(true),
                        );
                    });
            });
    }
}
