//! Document editor panel: picker, data view, raw YAML editor, and form

use eframe::egui;

use crate::app::WorldbookApp;
use super::data_view::DataView;
use super::forms::FormPanel;

/// Central editing panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut WorldbookApp) {
        ui.vertical(|ui| {
            Self::show_picker(ui, app);
            ui.separator();

            if app.session.is_none() {
                Self::show_welcome(ui, app);
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("editor_scroll")
                .show(ui, |ui| {
                    if let Some(session) = &app.session {
                        DataView::show(ui, session.document());
                    }

                    ui.add_space(8.0);
                    egui::CollapsingHeader::new("Edit as YAML")
                        .id_salt("raw_editor")
                        .show(ui, |ui| {
                            Self::show_raw_editor(ui, app);
                        });

                    let has_form = app.session.as_ref().is_some_and(|s| s.form.is_some());
                    if has_form {
                        egui::CollapsingHeader::new("Edit with form")
                            .id_salt("form_editor")
                            .default_open(true)
                            .show(ui, |ui| {
                                FormPanel::show(ui, app);
                            });
                    }
                });
        });
    }

    /// Document selector
    fn show_picker(ui: &mut egui::Ui, app: &mut WorldbookApp) {
        let selected = app.session.as_ref().map(|s| s.filename().to_string());
        let mut choice = None;

        ui.horizontal(|ui| {
            ui.label("Document");
            egui::ComboBox::from_id_salt("document_picker")
                .selected_text(selected.as_deref().unwrap_or("Select a document"))
                .width(280.0)
                .show_ui(ui, |ui| {
                    for name in &app.files {
                        let is_selected = selected.as_deref() == Some(name.as_str());
                        if ui.selectable_label(is_selected, name.as_str()).clicked() {
                            choice = Some(name.clone());
                        }
                    }
                });
            ui.label(format!("{} files", app.files.len()));
        });

        if let Some(name) = choice {
            app.open_document(&name);
        }
    }

    /// Raw YAML editor with save and revert
    fn show_raw_editor(ui: &mut egui::Ui, app: &mut WorldbookApp) {
        let rows = app.config.editor.raw_editor_rows;
        let Some(session) = app.session.as_mut() else {
            return;
        };

        egui::TextEdit::multiline(&mut session.raw_text)
            .font(egui::TextStyle::Monospace)
            .code_editor()
            .desired_width(f32::INFINITY)
            .desired_rows(rows)
            .show(ui);

        let dirty = session.is_dirty();
        let mut save = false;
        let mut revert = false;
        ui.horizontal(|ui| {
            save = ui.add_enabled(dirty, egui::Button::new("Save")).clicked();
            if dirty {
                revert = ui.button("Revert").clicked();
                ui.label("unsaved changes");
            }
        });

        if revert {
            if let Err(e) = session.revert() {
                app.report_error("Failed to revert", e);
            }
        } else if save {
            app.save_raw();
        }
    }

    /// Shown when no document is open
    fn show_welcome(ui: &mut egui::Ui, app: &WorldbookApp) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading(app.category.label());
            ui.add_space(12.0);
            if app.files.is_empty() {
                ui.label("No documents yet. Create one from the sidebar.");
            } else {
                ui.label("Select a document to view or edit it.");
            }
            ui.add_space(10.0);
            ui.label("Keyboard shortcuts:");
            ui.label("  Ctrl+S - Save");
        });
    }
}
