//! Specialized per-category forms

use eframe::egui;

use crate::app::{Status, WorldbookApp};
use crate::core::literal::parse_mapping_literal;
use crate::core::record::{
    mapping_to_rows, CharacterRecord, FieldRecord, FieldRows, FuturePlansRecord, NarouPostRecord,
    SynopsisRecord,
};

/// Form editor for the open document
pub struct FormPanel;

impl FormPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut WorldbookApp) {
        let WorldbookApp {
            session,
            literal_inputs,
            status,
            ..
        } = &mut *app;
        let Some(form) = session.as_mut().and_then(|s| s.form.as_mut()) else {
            return;
        };

        match form {
            FieldRecord::Character(record) => Self::character(ui, record, literal_inputs, status),
            FieldRecord::Synopsis(record) => Self::synopsis(ui, record),
            FieldRecord::FuturePlans(record) => Self::future_plans(ui, record),
            FieldRecord::NarouPost(record) => Self::narou_post(ui, record),
        }

        ui.add_space(8.0);
        let dirty = app.session.as_ref().is_some_and(|s| s.form_is_dirty());
        let mut save = false;
        let mut revert = false;
        ui.horizontal(|ui| {
            save = ui.button("Save (form)").clicked();
            if dirty {
                revert = ui.button("Revert").clicked();
                ui.label("unsaved changes");
            }
        });

        if revert {
            if let Some(Err(e)) = app.session.as_mut().map(|s| s.revert()) {
                app.report_error("Failed to revert", e);
            }
        } else if save {
            app.save_form();
        }
    }

    fn character(
        ui: &mut egui::Ui,
        record: &mut CharacterRecord,
        literal_inputs: &mut [String; 2],
        status: &mut Option<Status>,
    ) {
        egui::Grid::new("character_fields").num_columns(2).show(ui, |ui| {
            ui.label("Name");
            ui.text_edit_singleline(&mut record.name);
            ui.end_row();
            ui.label("Species");
            ui.text_edit_singleline(&mut record.species);
            ui.end_row();
            ui.label("Age");
            ui.text_edit_singleline(&mut record.age);
            ui.end_row();
        });

        let [physical_literal, personality_literal] = literal_inputs;

        ui.separator();
        ui.strong("Physical attributes");
        Self::rows_editor(ui, "physical_attributes", &mut record.physical_attributes);
        Self::literal_paste(ui, "physical_literal", physical_literal, &mut record.physical_attributes, status);

        ui.separator();
        ui.strong("Personality");
        Self::rows_editor(ui, "personality", &mut record.personality);
        Self::literal_paste(ui, "personality_literal", personality_literal, &mut record.personality, status);
    }

    fn synopsis(ui: &mut egui::Ui, record: &mut SynopsisRecord) {
        ui.label("Title");
        ui.text_edit_singleline(&mut record.title);
        ui.label("Content");
        ui.add(
            egui::TextEdit::multiline(&mut record.content)
                .desired_width(f32::INFINITY)
                .desired_rows(12),
        );
    }

    fn future_plans(ui: &mut egui::Ui, record: &mut FuturePlansRecord) {
        ui.label("Plans (one per line)");
        ui.add(
            egui::TextEdit::multiline(&mut record.plans_text)
                .desired_width(f32::INFINITY)
                .desired_rows(12),
        );
    }

    fn narou_post(ui: &mut egui::Ui, record: &mut NarouPostRecord) {
        egui::Grid::new("narou_post_fields").num_columns(2).show(ui, |ui| {
            ui.label("Episode title");
            ui.text_edit_singleline(&mut record.episode_title);
            ui.end_row();
            ui.label("Posted date");
            ui.add(egui::TextEdit::singleline(&mut record.posted_date).hint_text("2025-04-23"));
            ui.end_row();
        });
        ui.label("Content");
        ui.add(
            egui::TextEdit::multiline(&mut record.content)
                .desired_width(f32::INFINITY)
                .desired_rows(16),
        );
    }

    /// Editable key/value rows. Rows left with a blank key are not saved.
    fn rows_editor(ui: &mut egui::Ui, id: &str, rows: &mut FieldRows) {
        let mut remove = None;
        egui::Grid::new(id).num_columns(3).striped(true).show(ui, |ui| {
            for (i, (key, value)) in rows.iter_mut().enumerate() {
                ui.add(egui::TextEdit::singleline(key).hint_text("key").desired_width(140.0));
                ui.add(egui::TextEdit::singleline(value).hint_text("value").desired_width(260.0));
                if ui.small_button("\u{2715}").on_hover_text("Remove").clicked() {
                    remove = Some(i);
                }
                ui.end_row();
            }
        });

        if let Some(i) = remove {
            rows.remove(i);
        }
        if ui.small_button("+ Add").clicked() {
            rows.push((String::new(), String::new()));
        }
    }

    /// Replace rows from a pasted mapping literal
    fn literal_paste(
        ui: &mut egui::Ui,
        id: &str,
        input: &mut String,
        rows: &mut FieldRows,
        status: &mut Option<Status>,
    ) {
        egui::CollapsingHeader::new("Paste as literal")
            .id_salt(id)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(input)
                        .code_editor()
                        .hint_text("{'height': 'tall', 'eyes': 'green'}")
                        .desired_width(f32::INFINITY)
                        .desired_rows(3),
                );
                if ui.button("Replace rows").clicked() {
                    match parse_mapping_literal(input) {
                        Ok(mapping) => {
                            *rows = mapping_to_rows(&mapping);
                            input.clear();
                            *status = None;
                        }
                        Err(e) => {
                            tracing::error!("Rejected literal input: {}", e);
                            *status = Some(Status::Error(e.to_string()));
                        }
                    }
                }
            });
    }
}
